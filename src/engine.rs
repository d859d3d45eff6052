//=========================================================================
// Aetheric Arcade Engine
//
// Entry point that wires the game loop, the logic thread and the window.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init(|game| ...)
//         ├─ with_channel_capacity() ├─ host_handle()
//         ├─ with_session_config()   └─ run(): spawns logic thread,
//         ├─ with_main_scene()                 runs platform,
//         └─ with_window_title()               joins on exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformEvent;
use crate::core::session::SessionConfig;
use crate::core::CoreSystemsOrchestrator;
use crate::game::{GameLoop, DEFAULT_MAIN_SCENE};
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0
/// - **Channel capacity**: 128 events
/// - **Session**: [`SessionConfig::default()`]
/// - **Main scene**: `"Example"`
///
/// # Examples
///
/// ```no_run
/// use aetheric_arcade::EngineBuilder;
/// use aetheric_arcade::core::session::SessionConfig;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_session_config(SessionConfig::default().with_starting_lives(5))
///     .build()
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    config: SessionConfig,
    main_scene: String,
    window_title: String,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            config: SessionConfig::default(),
            main_scene: DEFAULT_MAIN_SCENE.to_string(),
            window_title: "Aetheric Arcade".to_string(),
        }
    }

    /// Sets the logic thread's fixed update rate.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the platform → logic channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Invalid fields are replaced with defaults when the session is built.
    pub fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Scene the Start button loads.
    pub fn with_main_scene(mut self, name: impl Into<String>) -> Self {
        self.main_scene = name.into();
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, main scene: '{}')",
            self.tps, self.channel_capacity, self.main_scene
        );

        let (sender, receiver) = bounded(self.channel_capacity);

        Engine {
            game: GameLoop::new(self.config, self.main_scene),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window_title: self.window_title,
            sender,
            receiver,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Runtime: one logic thread stepping the [`GameLoop`] at a fixed rate,
/// plus the window on the calling thread.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► GameLoop: input, scenes, session
///   │
///   └─► Platform (winit event loop)
///
/// Platform → logic:  bounded channel of PlatformEvent
/// Logic → platform:  exit flag
/// ```
pub struct Engine {
    game: GameLoop,
    tps: f64,
    channel_capacity: usize,
    window_title: String,
    sender: Sender<PlatformEvent>,
    receiver: Receiver<PlatformEvent>,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Configures the game before it starts: subscribe HUD observers,
    /// rebind controls, register extra scenes.
    ///
    /// ```no_run
    /// use aetheric_arcade::EngineBuilder;
    /// use aetheric_arcade::core::notify::NotificationKind;
    ///
    /// EngineBuilder::new()
    ///     .build()
    ///     .init(|game| {
    ///         game.session_mut()
    ///             .notifications()
    ///             .subscribe(NotificationKind::ScoreChanged, |n| println!("{:?}", n));
    ///     })
    ///     .run();
    /// ```
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GameLoop),
    {
        info!("Initializing game");
        init_fn(&mut self.game);
        self
    }

    /// Sender for host-side producers: physics contacts, UI buttons, or a
    /// test harness driving the game without a window.
    pub fn host_handle(&self) -> Sender<PlatformEvent> {
        self.sender.clone()
    }

    pub fn game(&self) -> &GameLoop {
        &self.game
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes or the session quits.
    ///
    /// # Lifecycle
    ///
    /// 1. Spawns the logic thread at the configured TPS
    /// 2. Runs the platform event loop on this thread (blocks)
    /// 3. Window closed → `WindowClosed` → logic thread stops;
    ///    session quit → exit flag → event loop stops
    /// 4. Joins the logic thread
    pub fn run(self) {
        info!(
            "Starting engine runtime (TPS: {}, channel: {})",
            self.tps, self.channel_capacity
        );

        let exit_flag = Arc::new(AtomicBool::new(false));

        //--- 1. Logic thread ----------------------------------------------
        let core_handle = CoreSystemsOrchestrator::new(self.game).spawn_core_thread(
            self.receiver,
            self.tps,
            Arc::clone(&exit_flag),
        );
        info!("Core logic thread spawned");

        //--- 2. Platform --------------------------------------------------
        let platform = Platform::new(self.sender, exit_flag, self.window_title);
        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 3. Cleanup ---------------------------------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SessionState;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.main_scene, DEFAULT_MAIN_SCENE);
        assert_eq!(builder.config, SessionConfig::default());
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_window_title("Test")
            .build();

        assert_eq!(engine.tps, 120.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.window_title, "Test");
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn build_starts_on_title_screen() {
        let engine = EngineBuilder::new()
            .with_session_config(SessionConfig::default().with_starting_lives(5))
            .with_main_scene("Stage1")
            .build();

        assert_eq!(engine.game().active_scene(), Some(crate::game::MENU_SCENE));
        assert_eq!(engine.game().session().lives(), 5);
        assert_eq!(engine.game().session().state(), SessionState::MainMenu);
    }

    #[test]
    fn init_runs_against_game() {
        let engine = EngineBuilder::new().build().init(|game| {
            game.session_mut().start();
        });
        assert_eq!(engine.game().session().state(), SessionState::Playing);
    }

    #[test]
    fn host_handle_feeds_logic_channel() {
        let engine = EngineBuilder::new().with_channel_capacity(4).build();
        let handle = engine.host_handle();

        handle.send(PlatformEvent::WindowClosed).unwrap();
        assert!(matches!(
            engine.receiver.try_recv(),
            Ok(PlatformEvent::WindowClosed)
        ));
    }
}
