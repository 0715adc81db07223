use serde::Deserialize;

pub const FIRST_HOLE: u8 = 1;
pub const LAST_HOLE: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Prev,
    Next,
}

/// Keeps only real hole numbers, ascending and without repeats.
#[must_use]
pub fn normalize_completed(reported: &[i64]) -> Vec<u8> {
    let mut holes: Vec<u8> = reported
        .iter()
        .filter_map(|h| u8::try_from(*h).ok())
        .filter(|h| (FIRST_HOLE..=LAST_HOLE).contains(h))
        .collect();
    holes.sort_unstable();
    holes.dedup();
    holes
}

/// Holes 1–18 that the server has not marked completed, in order.
#[must_use]
pub fn available_holes(completed: &[u8]) -> Vec<u8> {
    (FIRST_HOLE..=LAST_HOLE)
        .filter(|h| !completed.contains(h))
        .collect()
}

#[must_use]
pub fn first_available(completed: &[u8]) -> Option<u8> {
    (FIRST_HOLE..=LAST_HOLE).find(|h| !completed.contains(h))
}

/// Neighbour of `current` within the available holes.
///
/// `None` at either end of the list, or when `current` is itself completed.
#[must_use]
pub fn step_hole(current: u8, completed: &[u8], direction: Direction) -> Option<u8> {
    let available = available_holes(completed);
    let idx = available.iter().position(|h| *h == current)?;
    match direction {
        Direction::Prev => idx.checked_sub(1).map(|i| available[i]),
        Direction::Next => available.get(idx + 1).copied(),
    }
}
