//=========================================================================
// Input Events
//=========================================================================
//
// Portable representation of keyboard and mouse input.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held / pressed / released)
//         ↓
//    ActionMapper (game actions)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical key location, independent of keyboard layout.
///
/// Covers what an arcade shooter binds: letters, arrows, the menu keys
/// and the debug function keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,

    //--- Function Keys ----------------------------------------------------
    F1,
    F2,

    /// Any key the input layer has no variant for.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// `MouseMoved` events compare equal regardless of coordinates so that a
/// burst of moves coalesces to the last position.
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Cursor position in window pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// Ignored by the input system.
    Unidentified,
}

impl InputEvent {
    /// Shorthand for an unmodified key press.
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Shorthand for an unmodified key release.
    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns the event with `modifiers` applied. No effect on
    /// `MouseMoved` and `Unidentified`.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. }
            | Self::KeyUp { modifiers: m, .. }
            | Self::MouseButtonDown { modifiers: m, .. }
            | Self::MouseButtonUp { modifiers: m, .. } => {
                *m = modifiers;
            }
            _ => {}
        }
        self
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Consistent with `PartialEq`: coordinates are not hashed.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            _ => {}
        }
    }
}

//=== Modifiers ===========================================================

/// Shift / Ctrl / Alt state. Bindings match modifiers exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

//=========================================================================
// Unit Tests
//=========================================================================
