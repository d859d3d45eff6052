//=========================================================================
// Scene Director
//=========================================================================
//
// Registers scenes by name and keeps exactly one of them active.
//
// Scenes are stored in a HashMap and keep their own state between
// activations. Loading or reloading always runs `on_exit` on the outgoing
// scene before `on_enter` on the incoming one.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{FrameContext, Scene};
use crate::core::input::{Action, InputContext};

//=== SceneDirector =======================================================

pub struct SceneDirector<A: Action> {
    scenes: HashMap<String, Box<dyn Scene<A>>>,
    active: Option<String>,
    started: bool,
}

impl<A: Action> SceneDirector<A> {
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            active: None,
            started: false,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers `scene` under `name`, replacing any previous one.
    pub fn register<T>(&mut self, name: impl Into<String>, scene: T)
    where
        T: Scene<A> + 'static,
    {
        let name = name.into();
        if self.scenes.insert(name.clone(), Box::new(scene)).is_some() {
            warn!("Scene '{}' was already registered and has been replaced", name);
        }
    }

    /// Registers `scene` and makes it the scene entered by [`start`](Self::start).
    pub fn register_default<T>(&mut self, name: impl Into<String>, scene: T)
    where
        T: Scene<A> + 'static,
    {
        let name = name.into();
        self.register(name.clone(), scene);
        debug!("Registered scene '{}' as default", name);
        self.active = Some(name);
    }

    /// Enters the default scene. Later calls do nothing.
    pub fn start(&mut self, ctx: &mut FrameContext<'_, A>) {
        if self.started {
            return;
        }
        self.started = true;

        let Some(name) = self.active.as_deref() else {
            warn!("Scene director started without a default scene");
            return;
        };

        info!("Entering initial scene '{}'", name);
        if let Some(scene) = self.scenes.get_mut(name) {
            scene.on_enter(ctx);
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Makes `name` the active scene. Unknown names are logged and ignored.
    pub fn load(&mut self, name: &str, ctx: &mut FrameContext<'_, A>) -> bool {
        if !self.scenes.contains_key(name) {
            warn!("Attempted to load unregistered scene '{}'", name);
            return false;
        }

        self.exit_active(ctx);

        info!("Loading scene '{}'", name);
        self.active = Some(name.to_owned());
        self.started = true;

        if let Some(scene) = self.scenes.get_mut(name) {
            scene.on_enter(ctx);
        }
        true
    }

    /// Exits and re-enters the active scene.
    pub fn reload(&mut self, ctx: &mut FrameContext<'_, A>) -> bool {
        let Some(name) = self.active.clone() else {
            warn!("Reload requested with no active scene");
            return false;
        };
        self.load(&name, ctx)
    }

    //--- Update -----------------------------------------------------------

    pub fn update(&mut self, ctx: &mut FrameContext<'_, A>) {
        if !self.started {
            return;
        }
        if let Some(scene) = self.active_scene_mut() {
            scene.update(ctx);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Binding set of the active scene, `Primary` when there is none.
    pub fn input_context(&self) -> InputContext {
        self.active
            .as_deref()
            .and_then(|name| self.scenes.get(name))
            .map_or(InputContext::Primary, |scene| scene.input_context())
    }

    //--- Internal Helpers -------------------------------------------------

    fn active_scene_mut(&mut self) -> Option<&mut Box<dyn Scene<A>>> {
        let name = self.active.as_deref()?;
        self.scenes.get_mut(name)
    }

    fn exit_active(&mut self, ctx: &mut FrameContext<'_, A>) {
        if !self.started {
            return;
        }
        if let Some(name) = self.active.as_deref() {
            debug!("Exiting scene '{}'", name);
        }
        if let Some(scene) = self.active_scene_mut() {
            scene.on_exit(ctx);
        }
    }
}

impl<A: Action> Default for SceneDirector<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
