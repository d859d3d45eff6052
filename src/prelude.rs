//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_arcade::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// Session
pub use crate::core::session::{
    HostRequest, NullBoundary, SceneBoundary, Session, SessionConfig, SessionState,
};

// Notifications
pub use crate::core::notify::{Notification, NotificationBus, NotificationKind, SubscriptionId};

// Input
pub use crate::core::input::{Action, InputContext, InputEvent, KeyCode, Modifiers, MouseButton};

// Scenes and host events
pub use crate::core::platform_bridge::{FrameEvents, PlatformEvent, TickControl, UiCommand};
pub use crate::core::scene::{FrameContext, Scene};
pub use crate::core::world::{EntityId, EntityTag, GameEvent};

// Game
pub use crate::game::{GameAction, GameLoop};
