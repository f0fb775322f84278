//! Treasure candidate generation.
//!
//! A fixed fraction of the clear cells is sampled into a candidate set, and
//! one candidate becomes the true treasure. The sampling RNG is injected so
//! tests can be deterministic while the real game stays unpredictable.

use thiserror::Error;

use crate::board::{Board, Cell};
use crate::rng::GameRng;

/// No clear cell qualified as a treasure candidate. Fatal at game start;
/// happens when the clear-cell pool is tiny or every sample was excluded.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no clear cell qualified as a treasure candidate")]
pub struct NoCandidates;

/// The generated treasure layout for one game.
#[derive(Debug, Clone)]
pub struct TreasureHunt {
    /// Possible treasure locations, in generation order.
    pub candidates: Vec<Cell>,
    /// The one candidate that actually holds the treasure.
    pub treasure: Cell,
}

/// Generate the candidate set and pick the treasure.
///
/// Samples `floor(|clear| / 3)` times uniformly from the clear cells. A
/// sample is skipped if it is the start cell, already a candidate, or in
/// the board's exclusion list (cells known to be unreachable under the
/// active rule set). Duplicate draws are why the final candidate count is
/// usually below the iteration count.
pub fn generate(
    board: &Board,
    exclusions: &[Cell],
    rng: &mut GameRng,
) -> Result<TreasureHunt, NoCandidates> {
    let clear = board.clear_cells();
    let mut candidates: Vec<Cell> = Vec::new();

    for _ in 0..clear.len() / 3 {
        let cell = clear[rng.rn2(clear.len() as u32) as usize];
        if cell == board.start() || exclusions.contains(&cell) || candidates.contains(&cell) {
            continue;
        }
        candidates.push(cell);
    }

    let treasure = *rng.choose(&candidates).ok_or(NoCandidates)?;
    Ok(TreasureHunt {
        candidates,
        treasure,
    })
}
