//! Application State Machine
//!
//! Screen flow as an explicit transition table: (state, trigger) either
//! maps to exactly one next state or is rejected. Side effects of a
//! transition (session setup, asset release) belong to the frame driver.

use std::fmt;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::game::state::PlayerSlot;

/// Screen the settings menu returns to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingsOrigin {
    /// Opened from the main menu
    Menu,
    /// Opened from the pause menu
    Pause,
}

impl SettingsOrigin {
    /// State to go back to.
    pub const fn state(self) -> AppState {
        match self {
            SettingsOrigin::Menu => AppState::Menu,
            SettingsOrigin::Pause => AppState::Pause,
        }
    }
}

/// Current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum AppState {
    /// Title menu
    #[default]
    Menu,
    /// Choosing the arena
    MapSelect,
    /// Choosing a character for the given player
    CharacterSelect(PlayerSlot),
    /// Adjusting sensitivity, field of view and cursor lock
    Settings {
        /// Where cancel leads
        origin: SettingsOrigin,
    },
    /// Match running
    Arena,
    /// Match suspended
    Pause,
    /// Shutting down (terminal)
    Exit,
}

/// Input that may move the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Accept / advance
    Confirm,
    /// Leave the current screen
    Cancel,
    /// Step back within a flow
    Back,
    /// Open the settings menu
    OpenSettings,
    /// Quit from anywhere
    Quit,
}

/// Rejected transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The table has no entry for this pair.
    #[error("no transition from {from} on {trigger:?}")]
    Unhandled {
        /// State the trigger arrived in
        from: AppState,
        /// Trigger that was rejected
        trigger: Trigger,
    },

    /// Nothing leaves `Exit`.
    #[error("application has exited")]
    Terminal,
}

impl AppState {
    /// Look up the next state.
    pub fn next(self, trigger: Trigger) -> Result<AppState, TransitionError> {
        use AppState::*;
        use Trigger::*;

        let next = match (self, trigger) {
            (Exit, _) => return Err(TransitionError::Terminal),
            (_, Quit) => Exit,

            (Menu, Confirm) => MapSelect,
            (Menu, Cancel) => Exit,
            (Menu, OpenSettings) => Settings { origin: SettingsOrigin::Menu },

            (MapSelect, Confirm) => CharacterSelect(PlayerSlot::First),
            (MapSelect, Cancel | Back) => Menu,

            (CharacterSelect(PlayerSlot::First), Confirm) => CharacterSelect(PlayerSlot::Second),
            (CharacterSelect(PlayerSlot::First), Cancel | Back) => MapSelect,
            (CharacterSelect(PlayerSlot::Second), Confirm) => Arena,
            (CharacterSelect(PlayerSlot::Second), Cancel | Back) => {
                CharacterSelect(PlayerSlot::First)
            }

            (Arena, Cancel) => Pause,

            (Pause, Confirm) => Arena,
            (Pause, Cancel) => Menu,
            (Pause, OpenSettings) => Settings { origin: SettingsOrigin::Pause },

            (Settings { origin }, Cancel | Back) => origin.state(),

            (from, trigger) => return Err(TransitionError::Unhandled { from, trigger }),
        };

        Ok(next)
    }

    /// No transitions leave this state.
    pub fn is_terminal(self) -> bool {
        self == AppState::Exit
    }

    /// The arena session should exist in this state.
    ///
    /// Settings opened from pause keeps the paused session alive.
    pub fn holds_session(self) -> bool {
        matches!(
            self,
            AppState::Arena
                | AppState::Pause
                | AppState::Settings { origin: SettingsOrigin::Pause }
        )
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppState::Menu => write!(f, "Menu"),
            AppState::MapSelect => write!(f, "MapSelect"),
            AppState::CharacterSelect(slot) => write!(f, "CharacterSelect({slot:?})"),
            AppState::Settings { origin } => write!(f, "Settings(from {origin:?})"),
            AppState::Arena => write!(f, "Arena"),
            AppState::Pause => write!(f, "Pause"),
            AppState::Exit => write!(f, "Exit"),
        }
    }
}
