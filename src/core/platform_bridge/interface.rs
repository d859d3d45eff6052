//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Host-to-core contract: the events a host may send and the errors the
// platform layer can report.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::world::GameEvent;

//=== UiCommand ===========================================================

/// Button clicks reported by the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiCommand {
    /// Title screen "Start".
    StartClicked,

    /// Title screen "Exit".
    ExitClicked,

    /// Game-over panel "Reload".
    ReloadClicked,

    /// Game-over panel "Quit".
    QuitClicked,

    PauseClicked,
    ResumeClicked,
}

//=== PlatformEvent =======================================================

/// Events sent from the host to the logic thread.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    /// Batched input events for a frame.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Collision and destruction events from the physics layer.
    Contacts(Vec<GameEvent>),

    Ui(UiCommand),

    /// Window close requested.
    WindowClosed,
}

//=== FrameEvents =========================================================

/// Everything the host sent since the previous tick, split by kind.
#[derive(Debug, Clone, Default)]
pub struct FrameEvents {
    pub inputs: Vec<Vec<InputEvent>>,
    pub contacts: Vec<GameEvent>,
    pub ui: Vec<UiCommand>,
}

impl FrameEvents {
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.contacts.is_empty() && self.ui.is_empty()
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
        self.contacts.clear();
        self.ui.clear();
    }

    /// Single batch of input events.
    pub fn with_inputs(mut self, events: Vec<InputEvent>) -> Self {
        self.inputs.push(events);
        self
    }

    pub fn with_contact(mut self, event: GameEvent) -> Self {
        self.contacts.push(event);
        self
    }

    pub fn with_ui(mut self, command: UiCommand) -> Self {
        self.ui.push(command);
        self
    }
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop execution error.
    EventLoopExecution(String),

    /// Window creation failed.
    WindowCreation(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::world::{EntityId, GameEvent};

    #[test]
    fn frame_builders_fill_each_list() {
        let frame = FrameEvents::default()
            .with_inputs(vec![InputEvent::key_down(KeyCode::Space)])
            .with_contact(GameEvent::EnemyDestroyed {
                enemy: EntityId(1),
                bullet: None,
            })
            .with_ui(UiCommand::StartClicked);

        assert_eq!(frame.inputs.len(), 1);
        assert_eq!(frame.contacts.len(), 1);
        assert_eq!(frame.ui, vec![UiCommand::StartClicked]);
        assert!(!frame.is_empty());
    }

    #[test]
    fn error_messages() {
        let err = PlatformError::WindowCreation("no display".into());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
