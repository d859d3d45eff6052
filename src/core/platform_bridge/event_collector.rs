//=========================================================================
// Event Collector
//=========================================================================
//
// Drains host events for one tick, with bounded polling and shutdown
// detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → FrameEvents → TickControl
//
// Bounded polling prevents starvation when the host floods the channel.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{FrameEvents, PlatformEvent};

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    frame: FrameEvents,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            frame: FrameEvents::default(),
        }
    }

    /// Collects pending host events into this tick's frame.
    ///
    /// Returns `Exit` on `WindowClosed` or when every sender is gone.
    pub fn collect_frame(&mut self) -> TickControl {
        self.frame.clear();
        let mut drained = 0;

        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "platform", "All host senders dropped");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    pub fn frame(&self) -> &FrameEvents {
        &self.frame
    }

    /// Takes the collected frame, leaving an empty one behind.
    pub fn take_frame(&mut self) -> FrameEvents {
        std::mem::take(&mut self.frame)
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                if !discrete.is_empty() {
                    self.frame.inputs.push(discrete);
                }
                if !continuous.is_empty() {
                    self.frame.inputs.push(continuous);
                }
            }
            PlatformEvent::Contacts(events) => self.frame.contacts.extend(events),
            PlatformEvent::Ui(command) => self.frame.ui.push(command),
            PlatformEvent::WindowClosed => return TickControl::Exit,
        }
        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
