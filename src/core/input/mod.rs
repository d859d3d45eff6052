//=========================================================================
// Input System
//=========================================================================
//
// Per-tick input processing and action queries for game code.
//
// Architecture:
//   Vec<InputEvent> batches → StateTracker (held/pressed)
//                           → ActionMapper (pressed actions)
//                                   ↓
//        is_action_pressed / is_action_down / axis / raw key queries
//
// Frame lifecycle: process_frame(batches) once per tick, then query.
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod action_mapper;
mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, InputContext};
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use action_mapper::ActionMapper;

//=== InputSystem =========================================================

/// Input state and bindings for one game.
///
/// ```
/// use aetheric_arcade::core::input::{Action, InputContext, InputEvent, InputSystem, KeyCode};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Ship { Fire }
/// impl Action for Ship {}
///
/// let mut input = InputSystem::new();
/// input.bind_key(KeyCode::Space, Ship::Fire, InputContext::Primary);
///
/// input.process_frame(&[vec![InputEvent::key_down(KeyCode::Space)]]);
/// assert!(input.is_action_pressed(Ship::Fire));
///
/// input.process_frame(&[]);
/// assert!(!input.is_action_pressed(Ship::Fire));
/// assert!(input.is_action_down(Ship::Fire));
/// ```
#[derive(Debug)]
pub struct InputSystem<A: Action> {
    tracker: StateTracker,
    mapper: ActionMapper<A>,
    actions_pressed: HashSet<A>,
}

impl<A: Action> InputSystem<A> {
    pub fn new() -> Self {
        Self {
            tracker: StateTracker::new(),
            mapper: ActionMapper::new(),
            actions_pressed: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Folds this tick's event batches into the input state.
    ///
    /// Actions fire on fresh presses only; held keys do not retrigger.
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>]) {
        self.tracker.begin_frame();
        self.actions_pressed.clear();

        for event in batches.iter().flatten() {
            if !self.tracker.process_event(event) {
                continue;
            }
            if let Some(action) = self.mapper.map_event(event) {
                trace!("Action {:?} from {:?}", action, event);
                self.actions_pressed.insert(action);
            }
        }
    }

    /// Releases all held keys and buttons.
    pub fn release_all(&mut self) {
        self.tracker.release_all();
        self.actions_pressed.clear();
    }

    //--- Bindings ---------------------------------------------------------

    pub fn bind_key(&mut self, key: KeyCode, action: A, context: InputContext) {
        self.mapper.bind_key(key, Modifiers::NONE, action, context);
    }

    pub fn bind_key_with_mods(
        &mut self,
        key: KeyCode,
        modifiers: Modifiers,
        action: A,
        context: InputContext,
    ) {
        self.mapper.bind_key(key, modifiers, action, context);
    }

    pub fn bind_mouse(&mut self, button: MouseButton, action: A, context: InputContext) {
        self.mapper.bind_mouse(button, Modifiers::NONE, action, context);
    }

    pub fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.mapper.unbind_key(key, context);
    }

    pub fn clear_context(&mut self, context: InputContext) {
        self.mapper.clear_context(context);
    }

    //--- Context ----------------------------------------------------------

    /// Switches the active binding set. Held keys stay held.
    pub fn set_context(&mut self, context: InputContext) {
        if self.mapper.current_context() != context {
            debug!("Input context: {:?} -> {:?}", self.mapper.current_context(), context);
            self.mapper.set_context(context);
        }
    }

    pub fn context(&self) -> InputContext {
        self.mapper.current_context()
    }

    //--- Action Queries ---------------------------------------------------

    /// `action` was triggered this tick.
    pub fn is_action_pressed(&self, action: A) -> bool {
        self.actions_pressed.contains(&action)
    }

    /// Any key or button bound to `action` is held, in the active context.
    pub fn is_action_down(&self, action: A) -> bool {
        self.mapper.keys_for(action).any(|k| self.tracker.is_key_down(k))
            || self
                .mapper
                .buttons_for(action)
                .any(|b| self.tracker.is_button_down(b))
    }

    /// Digital axis in [-1, 1]: `positive` held minus `negative` held.
    pub fn axis(&self, negative: A, positive: A) -> f32 {
        let value = |a: A| if self.is_action_down(a) { 1.0 } else { 0.0 };
        value(positive) - value(negative)
    }

    //--- Raw Queries ------------------------------------------------------

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.tracker.is_key_pressed(key)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.tracker.is_key_down(key)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.tracker.mouse_position()
    }

    pub fn state(&self) -> &StateTracker {
        &self.tracker
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
