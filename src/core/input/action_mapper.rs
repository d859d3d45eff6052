//=========================================================================
// Action Mapper
//=========================================================================
//
// Resolves keys and mouse buttons to game actions.
//
// Architecture:
//   (key/button, modifiers, context) → HashMap → Action
//
// Only bindings in the active context resolve.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::{Action, InputContext},
    event::{InputEvent, KeyCode, Modifiers, MouseButton},
};

//=== ActionMapper ========================================================

#[derive(Debug)]
pub(crate) struct ActionMapper<A: Action> {
    key_bindings: HashMap<(KeyCode, Modifiers, InputContext), A>,
    mouse_bindings: HashMap<(MouseButton, Modifiers, InputContext), A>,
    current_context: InputContext,
}

impl<A: Action> ActionMapper<A> {
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
            current_context: InputContext::Primary,
        }
    }

    //--- Binding API ------------------------------------------------------

    pub(crate) fn bind_key(&mut self, key: KeyCode, modifiers: Modifiers, action: A, context: InputContext) {
        self.key_bindings.insert((key, modifiers, context), action);
    }

    pub(crate) fn bind_mouse(
        &mut self,
        button: MouseButton,
        modifiers: Modifiers,
        action: A,
        context: InputContext,
    ) {
        self.mouse_bindings.insert((button, modifiers, context), action);
    }

    /// Removes every binding of `key` in `context`, whatever the modifiers.
    pub(crate) fn unbind_key(&mut self, key: KeyCode, context: InputContext) {
        self.key_bindings
            .retain(|&(k, _, ctx), _| !(k == key && ctx == context));
    }

    pub(crate) fn clear_context(&mut self, context: InputContext) {
        self.key_bindings.retain(|&(_, _, ctx), _| ctx != context);
        self.mouse_bindings.retain(|&(_, _, ctx), _| ctx != context);
    }

    //--- Context ----------------------------------------------------------

    pub(crate) fn set_context(&mut self, context: InputContext) {
        self.current_context = context;
    }

    pub(crate) fn current_context(&self) -> InputContext {
        self.current_context
    }

    //--- Resolution -------------------------------------------------------

    /// Action triggered by a press event in the active context.
    pub(crate) fn map_event(&self, event: &InputEvent) -> Option<A> {
        match event {
            InputEvent::KeyDown { key, modifiers } => self
                .key_bindings
                .get(&(*key, *modifiers, self.current_context))
                .copied(),
            InputEvent::MouseButtonDown { button, modifiers } => self
                .mouse_bindings
                .get(&(*button, *modifiers, self.current_context))
                .copied(),
            _ => None,
        }
    }

    /// Keys bound to `action` in the active context, any modifiers.
    pub(crate) fn keys_for(&self, action: A) -> impl Iterator<Item = KeyCode> + '_ {
        let context = self.current_context;
        self.key_bindings
            .iter()
            .filter(move |(binding, a)| binding.2 == context && **a == action)
            .map(|(&(key, _, _), _)| key)
    }

    /// Mouse buttons bound to `action` in the active context.
    pub(crate) fn buttons_for(&self, action: A) -> impl Iterator<Item = MouseButton> + '_ {
        let context = self.current_context;
        self.mouse_bindings
            .iter()
            .filter(move |(binding, a)| binding.2 == context && **a == action)
            .map(|(&(button, _, _), _)| button)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
