//=========================================================================
// Scene Boundary
//=========================================================================
//
// Outbound requests from the session to the hosting environment.
//
// The session never touches the world, the scene stack or the process
// directly. It asks the host through this trait, and the host applies
// the request on its own schedule.
//
// Implementations:
//   Sender<HostRequest>  queued, applied by the game loop at tick end
//   NullBoundary         drops everything (headless sessions, tests)
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::world::EntityTag;

//=== SceneBoundary =======================================================

/// Host capabilities the session relies on.
pub trait SceneBoundary: Send {
    /// Destroys every live entity carrying one of `tags`.
    fn despawn_tagged(&mut self, tags: &[EntityTag]);

    /// Replaces the active scene with the scene registered as `name`.
    fn load_scene(&mut self, name: &str);

    /// Tears down and re-enters the active scene.
    fn reload_active_scene(&mut self);

    /// Sets the host time scale (0 freezes gameplay time, 1 is normal).
    fn set_time_scale(&mut self, scale: f32);

    /// Requests process termination.
    fn quit(&mut self);
}

//=== HostRequest =========================================================

/// A [`SceneBoundary`] call captured as data.
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    DespawnTagged(Vec<EntityTag>),
    LoadScene(String),
    ReloadScene,
    SetTimeScale(f32),
    Quit,
}

/// Forwards every request over the channel.
///
/// A disconnected receiver means the host has shut down; the request is
/// dropped with a warning.
impl SceneBoundary for Sender<HostRequest> {
    fn despawn_tagged(&mut self, tags: &[EntityTag]) {
        forward(self, HostRequest::DespawnTagged(tags.to_vec()));
    }

    fn load_scene(&mut self, name: &str) {
        forward(self, HostRequest::LoadScene(name.to_owned()));
    }

    fn reload_active_scene(&mut self) {
        forward(self, HostRequest::ReloadScene);
    }

    fn set_time_scale(&mut self, scale: f32) {
        forward(self, HostRequest::SetTimeScale(scale));
    }

    fn quit(&mut self) {
        forward(self, HostRequest::Quit);
    }
}

fn forward(sender: &Sender<HostRequest>, request: HostRequest) {
    if let Err(e) = sender.send(request) {
        warn!(target: "session", "Host disconnected, dropping {:?}", e.into_inner());
    }
}

//=== NullBoundary ========================================================

/// Boundary that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBoundary;

impl SceneBoundary for NullBoundary {
    fn despawn_tagged(&mut self, _tags: &[EntityTag]) {}
    fn load_scene(&mut self, _name: &str) {}
    fn reload_active_scene(&mut self) {}
    fn set_time_scale(&mut self, _scale: f32) {}
    fn quit(&mut self) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
