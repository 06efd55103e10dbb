//! Type definitions and enums for screen navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. The in-game screen
/// further splits into question and completion popups based on the session phase, so only the
/// screens the session knows nothing about live here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Title menu shown before a session starts.
    Title(TitleItem),
    /// Maze view, including the question and completion popups.
    InGame,
    /// Confirmation popup shown over the maze before quitting a game in progress.
    ConfirmQuit(ConfirmItem),
}

/// Title menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TitleItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Quit" menu option.
    Quit,
}

/// Quit confirmation choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ConfirmItem {
    /// Close the popup and keep playing.
    Resume,
    /// Leave the game, losing progress.
    Quit,
}

/// Generic menu type configuration.
///
/// This enumeration holds the specifics of each menu drawn through the shared menu layout: its
/// title and its number of items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MenuType {
    /// Title menu configuration.
    Title(u8),
    /// Quit confirmation configuration.
    ConfirmQuit(u8),
}

impl MenuType {
    /// Returns the title drawn in the menu's border.
    pub(crate) const fn repr(self) -> &'static str {
        match self {
            Self::Title(_) => "Checkpoint Maze",
            Self::ConfirmQuit(_) => "Leave? Progress will be lost",
        }
    }

    /// Returns the number of menu items, used to size the menu container.
    pub(crate) const fn value(self) -> u8 {
        match self {
            Self::Title(value) | Self::ConfirmQuit(value) => value,
        }
    }
}
