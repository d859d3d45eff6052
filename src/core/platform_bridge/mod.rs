//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the host side (winit platform, physics/UI embedders)
// and the logic thread. Hosts only ever send `PlatformEvent`s; the logic
// thread drains them once per tick through the `EventCollector`.
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use interface::{FrameEvents, PlatformError, PlatformEvent, UiCommand};
