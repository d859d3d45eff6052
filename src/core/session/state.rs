//=========================================================================
// Session State
//=========================================================================
//
// The five session states and the transition table between them.
//
//   MainMenu ──start──> Playing <──resume── Paused
//                        │   └────pause────────^
//                        ├──complete_level──> LevelComplete ─┐
//                        └──game_over───────> GameOver ──────┤
//                                                            │
//   restart: any state ─> Playing      start <───────────────┘
//
// Requests that are not in the table, and requests whose target equals
// the current state, resolve to `None` (a silent no-op).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== SessionState ========================================================

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    MainMenu,
    Playing,
    Paused,
    GameOver,
    LevelComplete,
}

impl SessionState {
    /// `true` for GameOver and LevelComplete.
    ///
    /// Terminal states reject every ledger and timer mutation until the
    /// session is started or restarted.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::LevelComplete)
    }

    /// Resolves a transition request against the current state.
    ///
    /// Returns the next state, or `None` when the request is invalid
    /// here or would not change the state. `Restart` always resolves to
    /// `Playing`, even from `Playing`, because it also resets counters.
    pub fn resolve(self, request: Transition) -> Option<SessionState> {
        use SessionState::*;

        let next = match (request, self) {
            (Transition::Start, MainMenu | GameOver | LevelComplete) => Playing,
            (Transition::Pause, Playing) => Paused,
            (Transition::Resume, Paused) => Playing,
            (Transition::GameOver, MainMenu | Playing | Paused) => GameOver,
            (Transition::CompleteLevel, Playing) => LevelComplete,
            (Transition::Restart, _) => return Some(Playing),
            _ => return None,
        };

        (next != self).then_some(next)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MainMenu => "MainMenu",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::GameOver => "GameOver",
            Self::LevelComplete => "LevelComplete",
        };
        f.write_str(name)
    }
}

//=== Transition ==========================================================

/// A state change request issued by a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Start,
    Pause,
    Resume,
    GameOver,
    CompleteLevel,
    Restart,
}

//=========================================================================
// Unit Tests
//=========================================================================
