//=========================================================================
// Scene System
//=========================================================================
//
// Name-keyed scenes with enter/exit hooks and a per-tick update.
//
// Architecture:
//   SceneDirector
//     ├─ scenes: HashMap<String, Box<dyn Scene<A>>>
//     └─ active: Option<String>
//
// Flow:
//   GameLoop → director.update(&mut FrameContext) → active Scene::update()
//   HostRequest::LoadScene / ReloadScene → director.load() / reload()
//
//=========================================================================

//=== Module Declarations =================================================

mod director;

//=== Public API ==========================================================

pub use director::SceneDirector;

//=== Internal Dependencies ===============================================

use crate::core::clock::GameClock;
use crate::core::input::{Action, InputContext, InputSystem};
use crate::core::message_bus::MessageBus;
use crate::core::session::Session;
use crate::core::world::EntityRegistry;

//=== FrameContext ========================================================

/// Everything a scene may touch during one tick.
///
/// Input, messages and the clock are read-only: they are produced by the
/// game loop before scenes run.
pub struct FrameContext<'a, A: Action> {
    pub session: &'a mut Session,
    pub world: &'a mut EntityRegistry,
    pub input: &'a InputSystem<A>,
    pub bus: &'a MessageBus,
    pub clock: &'a GameClock,

    /// Scaled seconds since the previous tick.
    pub dt: f32,
}

//=== Scene Trait =========================================================

/// Scene behavior. Only `update` is required.
///
/// ```
/// use aetheric_arcade::core::input::Action;
/// use aetheric_arcade::core::scene::{FrameContext, Scene};
///
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Ship { Fire }
/// # impl Action for Ship {}
/// struct Credits;
///
/// impl Scene<Ship> for Credits {
///     fn update(&mut self, _ctx: &mut FrameContext<'_, Ship>) {}
/// }
/// ```
pub trait Scene<A: Action>: Send {
    /// Called when the scene becomes active, including on reload.
    fn on_enter(&mut self, _ctx: &mut FrameContext<'_, A>) {}

    /// Called when the scene stops being active, including on reload.
    fn on_exit(&mut self, _ctx: &mut FrameContext<'_, A>) {}

    /// Called every tick while active.
    fn update(&mut self, ctx: &mut FrameContext<'_, A>);

    /// Binding set used while this scene is active.
    fn input_context(&self) -> InputContext {
        InputContext::Primary
    }
}
