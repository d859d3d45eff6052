//=========================================================================
// Core Systems
//=========================================================================
//
// Session logic plus the engine systems that drive it, and the
// orchestrator that runs them on the logic thread.
//
// Responsibilities:
// - Own the game simulation on a dedicated thread
// - Drain host events once per tick
// - Keep a fixed tick rate (TPS)
// - Signal the platform when the simulation asks to quit
//
// The orchestrator never touches the window. Communication with the
// platform happens only through the crossbeam channel and a shared
// exit flag.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod input;
pub mod message_bus;
pub mod notify;
pub mod platform_bridge;
pub mod scene;
pub mod session;
pub mod world;

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{info, warn};

//=== Internal Dependencies ===============================================

use platform_bridge::{EventCollector, FrameEvents, PlatformEvent, TickControl};

//=== Simulation ==========================================================

/// Anything the orchestrator can step once per tick.
pub trait Simulation: Send + 'static {
    /// Advances by `dt` seconds of real time with this tick's host events.
    fn step(&mut self, dt: f32, frame: &FrameEvents) -> TickControl;
}

//=== CoreSystemsOrchestrator =============================================

pub struct CoreSystemsOrchestrator<S: Simulation> {
    simulation: S,
}

impl<S: Simulation> CoreSystemsOrchestrator<S> {
    pub fn new(simulation: S) -> Self {
        Self { simulation }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects host events (exits on WindowClosed / disconnect)
    //  2. Steps the simulation with a fixed dt
    //  3. Sleeps to maintain fixed pacing
    //
    // On exit the shared flag is raised so the platform closes too.
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
        exit_flag: Arc<AtomicBool>,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);
        let dt = frame_duration.as_secs_f32();

        thread::spawn(move || {
            let mut simulation = self.simulation;
            let mut collector = EventCollector::new(receiver);

            loop {
                let frame_start = Instant::now();

                if collector.collect_frame() == TickControl::Exit {
                    info!("Host disconnected or window closed");
                    break;
                }

                let frame = collector.take_frame();
                if simulation.step(dt, &frame) == TickControl::Exit {
                    info!("Simulation requested exit");
                    break;
                }

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    warn!("Tick overran budget: {:?} > {:?}", elapsed, frame_duration);
                }
            }

            exit_flag.store(true, Ordering::Release);
            info!("Core thread exiting.");
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
