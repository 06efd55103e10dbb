//! Core application state and main loop for the maze game.

use std::time::Instant;

use color_eyre::eyre::Result;
use rand::rngs::StdRng;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    auth::{AdminGate, AdminToken},
    config::Config,
    events,
    game::{Game, Notification},
    timer::ElapsedTicker,
    types::{Screen, TitleItem},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to. The rules themselves
/// live in [`Game`]; this structure only adds what the presentation needs around them.
pub struct App {
    /// Application exit flag.
    ///
    /// This field is set to `true` when the user wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Game rules and the session being played.
    pub(crate) game: Game<StdRng>,
    /// Shared-secret check for resets.
    pub(crate) gate: AdminGate,
    /// Admin token obtained on the completion screen, spent by the next reset.
    pub(crate) admin: Option<AdminToken>,
    /// Password typed so far on the completion screen.
    pub(crate) password: String,
    /// Last notification shown on the status line.
    pub(crate) status: Option<Notification>,
    /// Displayed elapsed time.
    ///
    /// This field refreshes once per second while playing and holds still while a popup is open.
    pub(crate) ticker: ElapsedTicker,
}

impl App {
    /// Creates the application from the parsed command line.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configured maze dimensions are invalid.
    pub fn new(config: &Config) -> Result<Self> {
        let settings = config.settings()?;
        let game = Game::new(settings, config.rng())?;
        let gate = AdminGate::new(config.admin_secret.clone());
        if !gate.is_enabled() {
            info!("no admin secret configured; resets are disabled");
        }

        Ok(Self::with_game(game, gate))
    }

    /// Creates the application around an existing game and admin gate.
    pub(crate) fn with_game(game: Game<StdRng>, gate: AdminGate) -> Self {
        Self {
            exit: false,
            screen: Screen::Title(TitleItem::StartGame),
            game,
            gate,
            admin: None,
            password: String::new(),
            status: None,
            ticker: ElapsedTicker::new(),
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function refreshes the timer, redraws and handles user input until the exit flag is
    /// set, after which it returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            self.refresh_ticker(Instant::now());
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(std::io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Advances the elapsed-time display as of `now`.
    ///
    /// The quit confirmation is modal, so the tick stops while it is open even though the session
    /// is still playing underneath.
    pub(crate) fn refresh_ticker(&mut self, now: Instant) {
        if self.screen == Screen::InGame {
            self.ticker.update(self.game.session(), now);
        } else {
            self.ticker.pause();
        }
    }

    /// Shows `notification` on the status line, keeping the previous one when [`None`].
    pub(crate) fn notify(&mut self, notification: Option<Notification>) {
        if notification.is_some() {
            self.status = notification;
        }
    }
}
