//=========================================================================
// State Tracker
//=========================================================================
//
// Held keys and buttons plus per-frame press/release deltas.
//
// Frame lifecycle: begin_frame() → process_event()* → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State -------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas -----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Forgets last frame's presses and releases. Held state survives.
    pub(super) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
    }

    /// Applies one event. Returns `true` for a fresh press (key or button
    /// that was not already held), so OS auto-repeat is filtered out.
    pub(super) fn process_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                let fresh = self.keys_down.insert(*key);
                if fresh {
                    self.keys_pressed.insert(*key);
                }
                fresh
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released.insert(*key);
                }
                false
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                let fresh = self.buttons_down.insert(*button);
                if fresh {
                    self.buttons_pressed.insert(*button);
                }
                fresh
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                self.buttons_down.remove(button);
                false
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
                false
            }

            InputEvent::Unidentified => false,
        }
    }

    /// Releases everything held (focus loss, scene change).
    pub(super) fn release_all(&mut self) {
        self.keys_released.extend(self.keys_down.drain());
        self.buttons_down.clear();
        self.modifiers = Modifiers::NONE;
    }

    //--- Query API --------------------------------------------------------

    /// Key went down this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) -> usize {
        tracker.begin_frame();
        events.iter().filter(|e| tracker.process_event(e)).count()
    }

    #[test]
    fn press_lasts_one_frame_hold_persists() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[InputEvent::key_down(KeyCode::Space)]);
        assert!(tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_down(KeyCode::Space));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_down(KeyCode::Space));

        frame(&mut tracker, &[InputEvent::key_up(KeyCode::Space)]);
        assert!(tracker.is_key_released(KeyCode::Space));
        assert!(!tracker.is_key_down(KeyCode::Space));
    }

    #[test]
    fn auto_repeat_is_not_a_fresh_press() {
        let mut tracker = StateTracker::new();
        let fresh = frame(
            &mut tracker,
            &[
                InputEvent::key_down(KeyCode::KeyA),
                InputEvent::key_down(KeyCode::KeyA),
            ],
        );
        assert_eq!(fresh, 1);
    }

    #[test]
    fn release_of_unheld_key_is_ignored() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::key_up(KeyCode::KeyW)]);
        assert!(!tracker.is_key_released(KeyCode::KeyW));
    }

    #[test]
    fn mouse_tracking() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            &[
                InputEvent::MouseButtonDown {
                    button: MouseButton::Left,
                    modifiers: Modifiers::NONE,
                },
                InputEvent::MouseMoved { x: 12.0, y: 34.0 },
            ],
        );

        assert!(tracker.is_button_pressed(MouseButton::Left));
        assert!(tracker.is_button_down(MouseButton::Left));
        assert_eq!(tracker.mouse_position(), (12.0, 34.0));
    }

    #[test]
    fn release_all_clears_held_state() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::key_down(KeyCode::ArrowLeft)]);

        tracker.release_all();

        assert!(!tracker.is_key_down(KeyCode::ArrowLeft));
        assert!(tracker.is_key_released(KeyCode::ArrowLeft));
    }
}
