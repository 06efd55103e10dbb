//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::debug;

use crate::{
    game::{AnswerOutcome, MoveOutcome, Phase, ResetOutcome},
    maze::Direction,
    types::{ConfirmItem, Screen, TitleItem},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches key presses to [`handle_key`]. It uses
/// a timeout to avoid blocking the UI, which also keeps the timer display ticking.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code, Instant::now())?;
            }
        }
    }

    Ok(())
}

/// Dispatches a key press to the handler of the current screen and session phase.
pub(crate) fn handle_key(app: &mut App, code: KeyCode, now: Instant) -> Result<()> {
    match app.screen {
        Screen::Title(item) => handle_title_key(app, item, code, now),
        Screen::ConfirmQuit(item) => handle_confirm_key(app, item, code),
        Screen::InGame => match app.game.session().phase() {
            Phase::NotStarted | Phase::Playing => handle_play_key(app, code, now),
            Phase::AnsweringQuestion { .. } => handle_question_key(app, code),
            Phase::Completed { .. } => handle_completed_key(app, code)?,
        },
    }

    Ok(())
}

/// Maps movement keys to directions.
///
/// Both the arrow keys and the vim-style 'h', 'j', 'k' and 'l' keys move the player.
const fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
        _ => None,
    }
}

/// Handles keys on the title menu.
///
/// 'j' and 'k' move between "Start Game" and "Quit", 'l' or Enter selects, and 'q' quits.
fn handle_title_key(app: &mut App, item: TitleItem, code: KeyCode, now: Instant) {
    match (code, item) {
        (KeyCode::Char('j') | KeyCode::Down, TitleItem::StartGame) => {
            app.screen = Screen::Title(TitleItem::Quit);
        }
        (KeyCode::Char('k') | KeyCode::Up, TitleItem::Quit) => {
            app.screen = Screen::Title(TitleItem::StartGame);
        }
        (KeyCode::Char('l') | KeyCode::Enter, TitleItem::StartGame) => {
            if app.game.session_mut().start(now) {
                app.ticker.clear();
                app.status = None;
            }
            app.screen = Screen::InGame;
        }
        (KeyCode::Char('l') | KeyCode::Enter, TitleItem::Quit)
        | (KeyCode::Char('q') | KeyCode::Esc, _) => app.exit = true,
        _ => {}
    }
}

/// Handles keys while the player is moving through the maze.
fn handle_play_key(app: &mut App, code: KeyCode, now: Instant) {
    if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
        app.screen = Screen::ConfirmQuit(ConfirmItem::Resume);
        return;
    }

    let Some(direction) = direction_for(code) else {
        return;
    };
    let outcome = app.game.session_mut().move_player(direction, now);
    debug!(?direction, ?outcome, "move handled");
    match outcome {
        MoveOutcome::Moved | MoveOutcome::CheckpointCollected { .. } => app.status = None,
        MoveOutcome::Ignored
        | MoveOutcome::Blocked
        | MoveOutcome::ExitLocked { .. }
        | MoveOutcome::Escaped { .. } => app.notify(outcome.notification()),
    }
}

/// Handles keys while a checkpoint question is open.
///
/// 'j' and 'k' move the selection, digit keys pick an option directly, and 'l' or Enter submits.
fn handle_question_key(app: &mut App, code: KeyCode) {
    let session = app.game.session_mut();
    let options = session
        .current_question()
        .map_or(0, |question| question.options.len());
    let selected = session.selected_answer();

    match code {
        KeyCode::Char('j') | KeyCode::Down => {
            let next = selected.map_or(0, |option| (option + 1).min(options.saturating_sub(1)));
            let _ = session.select_answer(next);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let previous = selected.map_or(0, |option| option.saturating_sub(1));
            let _ = session.select_answer(previous);
        }
        KeyCode::Char(digit @ '1'..='9') => {
            if let Some(option) = digit.to_digit(10).and_then(|value| usize::try_from(value).ok())
            {
                let _ = session.select_answer(option - 1);
            }
        }
        KeyCode::Char('l') | KeyCode::Enter => {
            let outcome = session.submit_answer();
            if outcome == AnswerOutcome::Correct {
                app.status = None;
            } else {
                app.notify(outcome.notification());
            }
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.screen = Screen::ConfirmQuit(ConfirmItem::Resume);
        }
        _ => {}
    }
}

/// Handles keys on the completion popup.
///
/// Until the admin password is accepted, printable keys go into the password field and Enter
/// submits it. Once accepted, Enter resets the game. Esc quits.
fn handle_completed_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Esc => app.exit = true,
        KeyCode::Char(character) if app.admin.is_none() => app.password.push(character),
        KeyCode::Backspace => {
            let _ = app.password.pop();
        }
        KeyCode::Enter if app.admin.is_none() => {
            match app.gate.unlock(&app.password) {
                Ok(token) => {
                    app.admin = Some(token);
                    app.status = None;
                }
                Err(notification) => app.status = Some(notification),
            }
            app.password.clear();
        }
        KeyCode::Enter => reset_game(app)?,
        _ => {}
    }

    Ok(())
}

/// Spends the admin token on a reset and returns to the title menu.
fn reset_game(app: &mut App) -> Result<()> {
    let outcome = app.game.reset(app.admin.take())?;
    match outcome {
        ResetOutcome::Reset => {
            app.screen = Screen::Title(TitleItem::StartGame);
            app.ticker.clear();
            app.password.clear();
            app.status = None;
        }
        ResetOutcome::Denied => app.notify(outcome.notification()),
    }

    Ok(())
}

/// Handles keys on the quit confirmation popup.
///
/// 'y' quits and 'n' resumes directly; 'j', 'k' and 'l' work as in the title menu.
fn handle_confirm_key(app: &mut App, item: ConfirmItem, code: KeyCode) {
    match (code, item) {
        (KeyCode::Char('j') | KeyCode::Down, ConfirmItem::Resume) => {
            app.screen = Screen::ConfirmQuit(ConfirmItem::Quit);
        }
        (KeyCode::Char('k') | KeyCode::Up, ConfirmItem::Quit) => {
            app.screen = Screen::ConfirmQuit(ConfirmItem::Resume);
        }
        (KeyCode::Char('y'), _) | (KeyCode::Char('l') | KeyCode::Enter, ConfirmItem::Quit) => {
            app.exit = true;
        }
        (KeyCode::Char('n' | 'h') | KeyCode::Esc, _)
        | (KeyCode::Char('l') | KeyCode::Enter, ConfirmItem::Resume) => {
            app.screen = Screen::InGame;
        }
        _ => {}
    }
}
