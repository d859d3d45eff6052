//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges winit (OS window and input) with the logic thread.
//
// ```text
//  Main Thread:                      Logic Thread:
//  ┌───────────────────────────┐    ┌──────────────────────┐
//  │  winit event loop         │    │  EventCollector      │
//  │   ↓                       │    │   ↓                  │
//  │  InputProcessor           │    │  GameLoop::step      │
//  │   ↓                       │    │   ├─ InputSystem     │
//  │  InputBuffer              │    │   ├─ SceneDirector   │
//  │   ↓ RedrawRequested       │    │   └─ Session         │
//  │  Sender<PlatformEvent> ───┼───>│                      │
//  │                           │    │                      │
//  │  about_to_wait:           │    │  on exit:            │
//  │   exit flag set? → exit <─┼────┼─ exit flag raised    │
//  └───────────────────────────┘    └──────────────────────┘
// ```
//
// Frame boundary is RedrawRequested: everything buffered since the last
// redraw goes out as one `PlatformEvent::Inputs`. Empty frames are not
// sent.
//
// Shutdown runs both ways. Closing the window sends `WindowClosed`; a
// session quit on the logic thread raises the shared exit flag, which is
// polled here between event batches.
//
// winit requires the event loop on the main thread on macOS/iOS, so this
// runs on the thread that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Window owner and input batcher. Not `Send`; lives on the main thread.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    title: String,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,

    /// Raised by the logic thread when the session quits.
    exit_flag: Arc<AtomicBool>,

    /// Fatal error raised inside a winit callback, reported by `run`.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        event_sender: Sender<PlatformEvent>,
        exit_flag: Arc<AtomicBool>,
        title: impl Into<String>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            title: title.into(),
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            exit_flag,
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes or the logic
    /// thread raises the exit flag.
    ///
    /// # Errors
    ///
    /// Fails if the event loop cannot be created or run, or if the window
    /// cannot be created.
    ///
    /// # Panics
    ///
    /// winit panics if this is called off the main thread on macOS/iOS.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))?;

        match self.failure.take() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends the buffered frame, if any. A disconnected logic thread only
    /// costs a warning so the window can still be closed.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let discrete_count = discrete.len();
        let continuous_count = continuous.len();

        trace!(
            target: "platform",
            "Flushing {} discrete + {} continuous events",
            discrete_count,
            continuous_count
        );

        if self
            .event_sender
            .send(PlatformEvent::Inputs { discrete, continuous })
            .is_err()
        {
            warn!(
                target: "platform",
                "Channel disconnected, dropping {} events",
                discrete_count + continuous_count
            );
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        let _ = self.event_sender.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    fn exit_requested(&self) -> bool {
        self.exit_flag.load(Ordering::Acquire)
    }
}

//=== winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.failure = Some(PlatformError::WindowCreation(e.to_string()));
                self.shutdown(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.shutdown(event_loop);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.input_processor.update_modifiers(modifiers.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_mouse_move(position.x, position.y);
                self.buffer.push_continuous(event);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                match self.input_processor.process_key_event(&event) {
                    Some(event) => self.buffer.push_discrete(event),
                    None => trace!(target: "platform", "Unmapped key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(button, state);
                self.buffer.push_discrete(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested() {
            info!(target: "platform", "Session quit, closing window");
            event_loop.exit();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
