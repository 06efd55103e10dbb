//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng as _};

use crate::{checkpoints::DEFAULT_CHECKPOINT_COUNT, game::GameSettings};

/// Runtime options for the game binary.
///
/// Every option has a sensible default, so running the binary with no arguments starts a 25x25
/// maze with four checkpoints and resets disabled.
#[derive(Parser)]
#[command(version, about)]
pub struct Config {
    /// Maze height in cells; must be odd and at least 5.
    #[arg(long, default_value_t = 25)]
    pub rows: usize,
    /// Maze width in cells; must be odd and at least 5.
    #[arg(long, default_value_t = 25)]
    pub cols: usize,
    /// Number of hidden checkpoints per maze.
    #[arg(long, default_value_t = DEFAULT_CHECKPOINT_COUNT)]
    pub checkpoints: usize,
    /// Seed for reproducible mazes, checkpoints and question order.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Admin password that allows resetting a finished game.
    #[arg(long, env = "MAZE_ADMIN_SECRET", hide_env_values = true)]
    pub admin_secret: Option<String>,
    /// File to write diagnostic logs to; logging is off without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Validates the maze options and bundles them as [`GameSettings`].
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is even or outside
    /// [`MIN_SIDE`](crate::maze::MIN_SIDE) to [`MAX_SIDE`](crate::maze::MAX_SIDE).
    pub fn settings(&self) -> Result<GameSettings> {
        let settings = GameSettings {
            rows: self.rows,
            cols: self.cols,
            checkpoints: self.checkpoints,
        };
        settings.validate()?;

        Ok(settings)
    }

    /// Builds the random source: seeded when `--seed` is given, from OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}
