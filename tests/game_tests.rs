//! Whole-game tests driven through the public API.
//!
//! Human seats are played by scripted agents through `drive_turn`; Automa
//! seats play themselves. Set `RUST_LOG=rust_patchwork=debug` to see the
//! engine's log while these run.

use tracing_subscriber::EnvFilter;

use rust_patchwork::core::PatchSpec;
use rust_patchwork::{
    drive_turn, Command, Difficulty, Game, GameConfig, GameError, GameSnapshot, Patch,
    PatchChoice, PlayerAgent, PlayerId, PlayerSpec, TurnOutcome, TurnPhase,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Buys the first affordable window patch that fits, otherwise advances,
/// and steers every patch to the first legal placement.
struct GreedyAgent;

impl PlayerAgent for GreedyAgent {
    fn choose_patch(&mut self, game: &Game) -> Option<PatchChoice> {
        let seat = game.player(game.current_player()).ok()?;
        let quilt = seat.quilt()?;
        let index = game
            .window()
            .iter()
            .position(|p| p.price() <= seat.buttons && quilt.find_placement(p).is_some());
        Some(index.map_or(PatchChoice::Advance, PatchChoice::Buy))
    }

    fn choose_command(&mut self, patch: &Patch, game: &Game) -> Option<Command> {
        steer_to_fit(patch, game)
    }
}

fn steer_to_fit(patch: &Patch, game: &Game) -> Option<Command> {
    let quilt = game.player(game.current_player()).ok()?.quilt()?;
    let target = quilt.find_placement(patch)?;
    Some(steer(patch, &target))
}

fn steer(patch: &Patch, target: &Patch) -> Command {
    let (from, to) = (patch.origin(), target.origin());
    if patch.is_flipped() != target.is_flipped() {
        Command::Flip
    } else if patch.rotation_index() != target.rotation_index() {
        Command::RotateRight
    } else if from.x < to.x {
        Command::Right
    } else if from.x > to.x {
        Command::Left
    } else if from.y < to.y {
        Command::Down
    } else if from.y > to.y {
        Command::Up
    } else {
        Command::Place
    }
}

/// Always advances, but still sews the bonus patches it earns.
struct AdvanceAgent;

impl PlayerAgent for AdvanceAgent {
    fn choose_patch(&mut self, _game: &Game) -> Option<PatchChoice> {
        Some(PatchChoice::Advance)
    }

    fn choose_command(&mut self, patch: &Patch, game: &Game) -> Option<Command> {
        steer_to_fit(patch, game)
    }
}

/// Picks the first patch, then gives up on it.
struct IndecisiveAgent;

impl PlayerAgent for IndecisiveAgent {
    fn choose_patch(&mut self, _game: &Game) -> Option<PatchChoice> {
        Some(PatchChoice::Buy(0))
    }

    fn choose_command(&mut self, _patch: &Patch, _game: &Game) -> Option<Command> {
        Some(Command::Cancel)
    }
}

fn total_buttons(game: &Game) -> u32 {
    game.players().map(|(_, seat)| seat.buttons).sum::<u32>() + game.bank().balance()
}

fn play_out(game: &mut Game, agent: &mut dyn PlayerAgent) -> usize {
    let total = total_buttons(game);
    let mut turns = 0;
    while !game.is_finished() {
        let outcome = drive_turn(game, agent).unwrap();
        assert_eq!(outcome, TurnOutcome::Completed);
        assert_eq!(total_buttons(game), total, "buttons leaked on turn {turns}");
        turns += 1;
        assert!(turns < 1000, "game did not finish");
    }
    turns
}

/// Test a full two-player game between greedy humans.
#[test]
fn test_human_game_completes() {
    init_tracing();
    let config = GameConfig::standard(vec![PlayerSpec::human("Ada"), PlayerSpec::human("Grace")])
        .with_seed(42);
    let mut game = Game::new(config).unwrap();

    let turns = play_out(&mut game, &mut GreedyAgent);

    assert_eq!(game.history().len(), turns);
    assert!(game.pending().is_empty());
    let result = game.result().unwrap();
    assert_eq!(result.standings.len(), 2);

    // Every seat ends on the last space and scored by its quilt
    let last = game.track().last_space();
    for (player, seat) in game.players() {
        assert_eq!(game.track().position(player), Some(last));
        let quilt = seat.quilt().unwrap();
        assert_eq!(seat.score(), quilt.score(seat.buttons, seat.has_special_tile));
        assert!(!quilt.patches().is_empty());
    }

    assert_eq!(drive_turn(&mut game, &mut GreedyAgent), Err(GameError::GameFinished));
}

/// Test a mixed roster of a human and two Automa seats.
#[test]
fn test_mixed_game_completes() {
    init_tracing();
    let config = GameConfig::standard(vec![
        PlayerSpec::automa("Automa", Difficulty::Craftsman),
        PlayerSpec::human("Ada"),
        PlayerSpec::automa("Automa II", Difficulty::Intern),
    ])
    .with_seed(9);
    let mut game = Game::new(config).unwrap();

    play_out(&mut game, &mut GreedyAgent);

    let result = game.result().unwrap();
    assert_eq!(result.standings.len(), 3);
    let holders = game.players().filter(|(_, seat)| seat.has_special_tile).count();
    assert!(holders <= 1);
    let mut ranks: Vec<_> = PlayerId::all(3).map(|p| result.rank_of(p).unwrap()).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);
}

/// Test that a player who only advances still finishes with buttons.
#[test]
fn test_advance_only_game() {
    let config = GameConfig::standard(vec![PlayerSpec::human("Ada"), PlayerSpec::human("Grace")]);
    let mut game = Game::new(config).unwrap();

    play_out(&mut game, &mut AdvanceAgent);

    // No patch was ever bought; only bonus patches were sewn
    assert_eq!(game.offer().len(), 33);
    let mut bonus = 0;
    for (_, seat) in game.players() {
        let patches = seat.quilt().unwrap().patches();
        assert!(patches.iter().all(|p| p.cell_count() == 1));
        bonus += patches.len();
        assert!(seat.buttons > 5);
    }
    assert_eq!(bonus, 5);
}

/// Test that a cancelled purchase stalls the turn without changing state.
#[test]
fn test_cancelled_purchase_stalls() {
    let config = GameConfig::standard(vec![PlayerSpec::human("Ada"), PlayerSpec::human("Grace")]);
    let mut game = Game::new(config).unwrap();
    let before = game.snapshot();

    let outcome = drive_turn(&mut game, &mut IndecisiveAgent).unwrap();

    assert_eq!(outcome, TurnOutcome::Stalled);
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.phase(), TurnPhase::AwaitingMainAction);

    // The same turn can be resumed by another agent
    assert_eq!(drive_turn(&mut game, &mut AdvanceAgent).unwrap(), TurnOutcome::Completed);
    assert_eq!(game.turn_number(), 2);
}

/// Test that the same seed replays the same game.
#[test]
fn test_seeded_games_match() {
    let play = |seed| {
        let config = GameConfig::standard(vec![
            PlayerSpec::human("Ada"),
            PlayerSpec::automa("Automa", Difficulty::Master),
        ])
        .with_seed(seed);
        let mut game = Game::new(config).unwrap();
        play_out(&mut game, &mut GreedyAgent);
        game.snapshot()
    };

    assert_eq!(play(5), play(5));
}

/// Test that snapshots survive a bincode round trip mid-game.
#[test]
fn test_snapshot_encoding() {
    let config = GameConfig::standard(vec![
        PlayerSpec::human("Ada"),
        PlayerSpec::automa("Automa", Difficulty::Apprentice),
    ]);
    let mut game = Game::new(config).unwrap();
    for _ in 0..6 {
        drive_turn(&mut game, &mut GreedyAgent).unwrap();
    }

    let snapshot = game.snapshot();
    let decoded = GameSnapshot::decode(&snapshot.encode().unwrap()).unwrap();

    assert_eq!(decoded, snapshot);
    assert_eq!(decoded.seats.len(), 2);
    assert_eq!(decoded.window.len(), 3);
    assert!(decoded.seats[1].quilt.is_none());
    assert!(GameSnapshot::decode(&[1, 2, 3]).is_err());
}

/// Test that configurations survive a JSON round trip.
#[test]
fn test_config_json_round_trip() {
    let config = GameConfig::standard(vec![
        PlayerSpec::human("Ada"),
        PlayerSpec::automa("Automa", Difficulty::Master),
    ])
    .with_seed(1234)
    .with_quilt_size(7, 9);

    let json = serde_json::to_string(&config).unwrap();
    let parsed: GameConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, config);
    assert!(Game::new(parsed).is_ok());
}

/// Test that human-only operations are refused on an Automa turn.
#[test]
fn test_automa_turn_refuses_human_actions() {
    let config = GameConfig::standard(vec![
        PlayerSpec::automa("Automa", Difficulty::Intern),
        PlayerSpec::human("Ada"),
    ]);
    let mut game = Game::new(config).unwrap();

    let automa = game.current_player();
    assert_eq!(game.advance(), Err(GameError::AutomaControlled(automa)));
    assert_eq!(game.select_patch(0), Err(GameError::AutomaControlled(automa)));

    // drive_turn lets the Automa play for itself
    assert_eq!(drive_turn(&mut game, &mut AdvanceAgent).unwrap(), TurnOutcome::Completed);
    assert_eq!(game.history().len(), 1);
}

/// Test that a patch with a cell far outside any quilt is refused at setup.
#[test]
fn test_far_patch_cell_rejected() {
    let config = GameConfig::standard(vec![PlayerSpec::human("Ada"), PlayerSpec::human("Grace")])
        .with_patch(PatchSpec::new(&[(0, 0), (i32::MIN, 0)], 1, 1, 0));

    assert_eq!(Game::new(config).err(), Some(GameError::InvalidShape));
}
