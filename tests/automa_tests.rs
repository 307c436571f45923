//! Automa opponent tests.
//!
//! Covers the patch selection policy on hand-built windows and whole games
//! played by Automa seats only.

use rust_patchwork::automa::choose_patch;
use rust_patchwork::{
    AutomaCard, Difficulty, Game, GameConfig, Patch, PatchChoice, PatchFilter, PatchId, PlayerId,
    PlayerSpec, Shape,
};

fn patch(id: u32, cells: &[(i32, i32)], price: u32, moves: u32, buttons: u32) -> Patch {
    Patch::new(PatchId::new(id), Shape::from_pairs(cells).unwrap(), price, moves, buttons)
}

fn domino(id: u32, price: u32, moves: u32, buttons: u32) -> Patch {
    patch(id, &[(0, 0), (1, 0)], price, moves, buttons)
}

fn automa_game(difficulties: &[Difficulty], seed: u64) -> Game {
    let players = difficulties
        .iter()
        .enumerate()
        .map(|(i, &d)| PlayerSpec::automa(format!("Automa {i}"), d))
        .collect();
    Game::new(GameConfig::standard(players).with_seed(seed)).unwrap()
}

fn total_buttons(game: &Game) -> u32 {
    game.players().map(|(_, seat)| seat.buttons).sum::<u32>() + game.bank().balance()
}

/// Test that ties after every filter go to the last candidate in window order.
#[test]
fn test_tie_picks_last_affordable() {
    let window = [domino(0, 3, 1, 1), domino(1, 4, 1, 1), domino(2, 6, 1, 1)];
    let refs: Vec<&Patch> = window.iter().collect();
    let card = AutomaCard::new(5, 1).with_filter(PatchFilter::MostButtons);

    assert_eq!(choose_patch(&card, &refs, 0, None), PatchChoice::Buy(1));
}

/// Test that filters apply in card order.
#[test]
fn test_filters_apply_in_order() {
    let window = [
        patch(0, &[(0, 0), (1, 0), (2, 0)], 2, 1, 0),
        domino(1, 2, 1, 2),
        patch(2, &[(0, 0), (1, 0), (2, 0)], 2, 1, 1),
    ];
    let refs: Vec<&Patch> = window.iter().collect();

    let largest_first = AutomaCard::new(9, 1)
        .with_filter(PatchFilter::Largest)
        .with_filter(PatchFilter::MostButtons);
    assert_eq!(choose_patch(&largest_first, &refs, 0, None), PatchChoice::Buy(2));

    let buttons_first = AutomaCard::new(9, 1)
        .with_filter(PatchFilter::MostButtons)
        .with_filter(PatchFilter::Largest);
    assert_eq!(choose_patch(&buttons_first, &refs, 0, None), PatchChoice::Buy(1));
}

/// Test that the Automa avoids passing the next player when it can.
#[test]
fn test_no_overtake() {
    let window = [domino(0, 1, 2, 0), domino(1, 1, 6, 0)];
    let refs: Vec<&Patch> = window.iter().collect();
    let card = AutomaCard::new(5, 1).with_filter(PatchFilter::NoOvertake);

    assert_eq!(choose_patch(&card, &refs, 10, Some(13)), PatchChoice::Buy(0));
    // Nobody ahead: the filter keeps everything
    assert_eq!(choose_patch(&card, &refs, 10, None), PatchChoice::Buy(1));
    // Every patch overtakes: the filter keeps everything
    assert_eq!(choose_patch(&card, &refs, 10, Some(11)), PatchChoice::Buy(1));
}

/// Test that the Automa advances when nothing is within budget.
#[test]
fn test_advance_when_nothing_affordable() {
    let window = [domino(0, 6, 1, 0), domino(1, 8, 1, 0)];
    let refs: Vec<&Patch> = window.iter().collect();

    assert_eq!(choose_patch(&AutomaCard::new(5, 1), &refs, 0, None), PatchChoice::Advance);
    assert_eq!(choose_patch(&AutomaCard::new(5, 1), &[], 0, None), PatchChoice::Advance);
}

/// Test cumulative tier scoring.
#[test]
fn test_difficulty_scoring() {
    let patches: Vec<Patch> = (0..3).map(|i| domino(i, 1, 1, 2)).collect();

    assert_eq!(Difficulty::Intern.score(10, &patches, true), 10);
    assert_eq!(Difficulty::Apprentice.score(10, &patches, true), 17);
    assert_eq!(Difficulty::Apprentice.score(10, &patches, false), 10);
    assert_eq!(Difficulty::Craftsman.score(10, &patches, true), 23);
    assert_eq!(Difficulty::Master.score(10, &patches, true), 23 + 3 - 12);
}

/// Test that two Automa seats play a standard game to the end.
#[test]
fn test_automa_game_completes() {
    let mut game = automa_game(&[Difficulty::Apprentice, Difficulty::Master], 7);
    let total = total_buttons(&game);

    let mut turns = 0;
    while !game.is_finished() {
        let turn = game.play_automa_turn().unwrap();
        assert!(turn.card.budget > 0);
        assert_eq!(total_buttons(&game), total);
        turns += 1;
        assert!(turns < 500, "game did not finish");
    }

    let result = game.result().unwrap();
    assert_eq!(result.standings.len(), 2);
    assert!(result.winner().is_some());
    assert_eq!(game.history().len(), turns);
    assert!(game.play_automa_turn().is_err());
}

/// Test that Automa games are reproducible from the seed.
#[test]
fn test_automa_game_deterministic() {
    let play = |seed| {
        let mut game = automa_game(&[Difficulty::Craftsman, Difficulty::Intern, Difficulty::Master], seed);
        let mut log = Vec::new();
        while !game.is_finished() {
            let turn = game.play_automa_turn().unwrap();
            log.push((turn.player, turn.choice, turn.patch, turn.income));
        }
        (log, game.ranking())
    };

    assert_eq!(play(3), play(3));
}

/// Test that the special tile reaches at most one Automa.
#[test]
fn test_special_tile_awarded_once() {
    let mut game = automa_game(&[Difficulty::Master, Difficulty::Master], 11);
    while !game.is_finished() {
        game.play_automa_turn().unwrap();
    }

    let holders = game.players().filter(|(_, seat)| seat.has_special_tile).count();
    assert_eq!(holders, 1);
    assert!(game.player(PlayerId::new(2)).is_err());
}
