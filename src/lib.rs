//=========================================================================
// Aetheric Arcade — Library Root
//
// Session core for a top-down arcade shooter: score, lives, countdown,
// game state machine and the notifications a HUD listens to, driven by a
// fixed-tick logic thread behind a winit window.
//
// Typical usage:
// ```no_run
// use aetheric_arcade::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the game-agnostic systems (session, input, scenes, buses).
// `game` is the shooter itself: controls, player, menu and level scenes,
// and the per-tick GameLoop.
//
pub mod core;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the OS window and is not part of the public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
