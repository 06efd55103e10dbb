//! Checkpoint maze: a fog-of-war maze game for the terminal.
//!
//! Every session generates a perfect maze, hides a handful of checkpoints in it and locks the exit
//! until the player has reached all of them. Each checkpoint asks a multiple-choice question that
//! must be answered before the player may move on. Once the exit is reached, only someone holding
//! the admin secret can start a fresh maze.
//!
//! The rules live in [`game`] and know nothing about the terminal; [`App`] wraps them with the
//! Ratatui front end.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

pub mod auth;
pub mod checkpoints;
pub mod config;
pub mod game;
pub mod logging;
pub mod maze;
pub mod questions;
pub mod timer;

mod app;
mod events;
mod types;
mod ui;

pub use app::App;
