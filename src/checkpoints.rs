//! Checkpoint placement module.
//!
//! Checkpoints are hidden path cells the player has to visit before the exit unlocks. The order in
//! which [`place`] draws them is the canonical checkpoint order of a session.

use rand::Rng;
use tracing::debug;

use crate::maze::{Maze, Position};

/// Number of checkpoints placed when no other count is configured.
pub const DEFAULT_CHECKPOINT_COUNT: usize = 4;

/// Draws up to `count` distinct checkpoint cells from the interior path cells of `maze`.
///
/// The candidates are every path cell strictly inside the border except the start and exit cells.
/// Each draw picks a candidate uniformly and removes it from the pool, so no cell is drawn twice.
/// When `count` exceeds the pool, every candidate is returned.
pub fn place<R: Rng + ?Sized>(maze: &Maze, count: usize, rng: &mut R) -> Vec<Position> {
    let start = maze.start();
    let exit = maze.exit();
    let mut candidates: Vec<Position> = maze
        .interior()
        .filter(|position| maze.is_path(*position) && *position != start && *position != exit)
        .collect();

    let draws = count.min(candidates.len());
    let mut placed = Vec::with_capacity(draws);
    for _ in 0..draws {
        let index = rng.gen_range(0..candidates.len());
        placed.push(candidates.remove(index));
    }

    debug!(
        requested = count,
        placed = placed.len(),
        "placed checkpoints"
    );

    placed
}
