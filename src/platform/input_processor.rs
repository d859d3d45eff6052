//=========================================================================
// Input Processor
//=========================================================================
//
// Translates winit window events into portable InputEvents.
//
//   winit KeyEvent / MouseInput / CursorMoved → InputProcessor → InputEvent
//
// Modifier state is sticky: the last ModifiersChanged applies to every
// following key and button event. Keys with no KeyCode variant are
// filtered out here so they never reach the logic thread.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
        }
    }

    //--- Modifier State ---------------------------------------------------

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.current_modifiers = modifiers_from(state);
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Translation ------------------------------------------------------

    /// `None` for keys the game has no code for.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };
        self.process_key(code, key_event.state)
    }

    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = button_from(button);
        let modifiers = self.current_modifiers;

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    pub(crate) fn process_mouse_move(&self, x: f64, y: f64) -> InputEvent {
        InputEvent::MouseMoved {
            x: x as f32,
            y: y as f32,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_key(&self, code: WinitKeyCode, state: ElementState) -> Option<InputEvent> {
        let key = key_from(code);
        if key == KeyCode::Unidentified {
            return None;
        }

        let modifiers = self.current_modifiers;
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// winit already folds Cmd into the logo key and Option into Alt.
fn modifiers_from(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
    }
}

fn button_from(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

fn key_from(code: WinitKeyCode) -> KeyCode {
    use WinitKeyCode as W;
    match code {
        //--- Letters ------------------------------------------------------
        W::KeyA => KeyCode::KeyA,
        W::KeyB => KeyCode::KeyB,
        W::KeyC => KeyCode::KeyC,
        W::KeyD => KeyCode::KeyD,
        W::KeyE => KeyCode::KeyE,
        W::KeyF => KeyCode::KeyF,
        W::KeyG => KeyCode::KeyG,
        W::KeyH => KeyCode::KeyH,
        W::KeyI => KeyCode::KeyI,
        W::KeyJ => KeyCode::KeyJ,
        W::KeyK => KeyCode::KeyK,
        W::KeyL => KeyCode::KeyL,
        W::KeyM => KeyCode::KeyM,
        W::KeyN => KeyCode::KeyN,
        W::KeyO => KeyCode::KeyO,
        W::KeyP => KeyCode::KeyP,
        W::KeyQ => KeyCode::KeyQ,
        W::KeyR => KeyCode::KeyR,
        W::KeyS => KeyCode::KeyS,
        W::KeyT => KeyCode::KeyT,
        W::KeyU => KeyCode::KeyU,
        W::KeyV => KeyCode::KeyV,
        W::KeyW => KeyCode::KeyW,
        W::KeyX => KeyCode::KeyX,
        W::KeyY => KeyCode::KeyY,
        W::KeyZ => KeyCode::KeyZ,

        //--- Arrows -------------------------------------------------------
        W::ArrowUp => KeyCode::ArrowUp,
        W::ArrowDown => KeyCode::ArrowDown,
        W::ArrowLeft => KeyCode::ArrowLeft,
        W::ArrowRight => KeyCode::ArrowRight,

        //--- Menu and debug -----------------------------------------------
        W::Space => KeyCode::Space,
        W::Enter | W::NumpadEnter => KeyCode::Enter,
        W::Escape => KeyCode::Escape,
        W::Tab => KeyCode::Tab,
        W::Backspace => KeyCode::Backspace,
        W::F1 => KeyCode::F1,
        W::F2 => KeyCode::F2,

        _ => KeyCode::Unidentified,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift {
            state.insert(ModifiersState::SHIFT);
        }
        if ctrl {
            state.insert(ModifiersState::CONTROL);
        }
        if alt {
            state.insert(ModifiersState::ALT);
        }
        state
    }

    #[test]
    fn starts_with_no_modifiers() {
        let processor = InputProcessor::new();
        assert_eq!(processor.current_modifiers(), Modifiers::NONE);
    }

    #[test]
    fn modifiers_stick_until_changed() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, false, false));

        let button = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);
        let key = processor.process_key(WinitKeyCode::Space, ElementState::Pressed);

        assert_eq!(
            button,
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                modifiers: Modifiers::SHIFT,
            }
        );
        assert_eq!(key, Some(InputEvent::key_down(KeyCode::Space).with_modifiers(Modifiers::SHIFT)));

        processor.update_modifiers(ModifiersState::empty());
        assert_eq!(
            processor.process_key(WinitKeyCode::Space, ElementState::Released),
            Some(InputEvent::key_up(KeyCode::Space))
        );
    }

    #[test]
    fn ctrl_alt_are_tracked() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(false, true, true));

        let mods = processor.current_modifiers();
        assert!(!mods.shift && mods.ctrl && mods.alt);
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert!(processor.process_key(WinitKeyCode::F13, ElementState::Pressed).is_none());
        assert!(processor.process_key(WinitKeyCode::Digit1, ElementState::Pressed).is_none());
    }

    #[test]
    fn debug_and_menu_keys_translate() {
        assert_eq!(key_from(WinitKeyCode::F1), KeyCode::F1);
        assert_eq!(key_from(WinitKeyCode::F2), KeyCode::F2);
        assert_eq!(key_from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(key_from(WinitKeyCode::Escape), KeyCode::Escape);
        assert_eq!(key_from(WinitKeyCode::KeyW), KeyCode::KeyW);
    }

    #[test]
    fn mouse_buttons_translate() {
        assert_eq!(button_from(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(button_from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(button_from(WinitMouseButton::Middle), MouseButton::Middle);
        assert_eq!(button_from(WinitMouseButton::Back), MouseButton::Other);
    }

    #[test]
    fn mouse_move_keeps_coordinates() {
        let processor = InputProcessor::new();
        match processor.process_mouse_move(123.5, 456.75) {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (123.5, 456.75)),
            other => panic!("Expected MouseMoved, got {:?}", other),
        }
    }
}
