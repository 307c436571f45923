//! Automa patch selection.
//!
//! The affordable window patches (`price <= budget`) are the candidates.
//! None means the Automa advances; exactly one is bought outright. Otherwise
//! the card's filters narrow the set in order, and the last remaining
//! candidate in window order is bought.

use tracing::trace;

use crate::core::PatchChoice;
use crate::patches::Patch;

use super::card::{AutomaCard, PatchFilter};

/// Pick a window patch for the Automa, or decide to advance.
///
/// `position` is the Automa's space; `next_other` is the space of the next
/// player ahead of it, if any.
#[must_use]
pub fn choose_patch(
    card: &AutomaCard,
    window: &[&Patch],
    position: usize,
    next_other: Option<usize>,
) -> PatchChoice {
    let mut candidates: Vec<(usize, &Patch)> = window
        .iter()
        .enumerate()
        .filter(|(_, p)| p.price() <= card.budget)
        .map(|(i, p)| (i, *p))
        .collect();

    match candidates.len() {
        0 => return PatchChoice::Advance,
        1 => return PatchChoice::Buy(candidates[0].0),
        _ => {}
    }

    for filter in &card.filters {
        candidates = apply_filter(*filter, candidates, position, next_other);
        trace!(?filter, left = candidates.len(), "automa filter applied");
    }

    candidates
        .last()
        .map_or(PatchChoice::Advance, |&(index, _)| PatchChoice::Buy(index))
}

fn apply_filter<'a>(
    filter: PatchFilter,
    candidates: Vec<(usize, &'a Patch)>,
    position: usize,
    next_other: Option<usize>,
) -> Vec<(usize, &'a Patch)> {
    match filter {
        PatchFilter::Largest => keep_max(candidates, |p| p.cell_count() as u64),
        PatchFilter::MostButtons => keep_max(candidates, |p| u64::from(p.buttons())),
        PatchFilter::NoOvertake => {
            let Some(limit) = next_other else {
                return candidates;
            };
            let kept: Vec<_> = candidates
                .iter()
                .copied()
                .filter(|(_, p)| position + p.moves() as usize <= limit)
                .collect();
            if kept.is_empty() {
                candidates
            } else {
                kept
            }
        }
    }
}

fn keep_max<'a>(
    candidates: Vec<(usize, &'a Patch)>,
    key: impl Fn(&Patch) -> u64,
) -> Vec<(usize, &'a Patch)> {
    let Some(best) = candidates.iter().map(|(_, p)| key(p)).max() else {
        return candidates;
    };
    candidates.into_iter().filter(|(_, p)| key(p) == best).collect()
}
