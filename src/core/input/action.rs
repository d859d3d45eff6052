//=========================================================================
// Action Trait & Input Context
//=========================================================================
//
// Actions: game-defined identifiers the input layer routes without
// interpreting.
// Contexts: separate binding sets for menu and gameplay.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// ```
/// use aetheric_arcade::core::input::Action;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum ShipAction { Fire, Pause }
///
/// impl Action for ShipAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== InputContext ========================================================

/// Which binding set is active.
///
/// The same key can mean different things per context, e.g. Escape
/// quits from the title screen and pauses during a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputContext {
    /// Gameplay bindings.
    #[default]
    Primary,

    /// User-defined contexts (menus, dialogue, ...).
    Custom(u32),
}

impl InputContext {
    #[inline]
    pub const fn custom(id: u32) -> Self {
        Self::Custom(id)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_is_default() {
        assert_eq!(InputContext::default(), InputContext::Primary);
    }

    #[test]
    fn primary_differs_from_custom_zero() {
        assert_ne!(InputContext::Primary, InputContext::custom(0));
    }
}
