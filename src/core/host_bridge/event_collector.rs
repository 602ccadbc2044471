//=========================================================================
// Event Collector
//=========================================================================
//
// Host event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostEvent> → collect_frame() → input_batches → TickControl
//
// Bounded polling prevents starvation. The collector never blocks: the
// caller owns tick pacing.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::HostEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

/// Upper bound of host events drained in one tick.
pub const MAX_EVENTS_PER_TICK: usize = 100;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects host events with bounded polling and batch extraction.
#[derive(Debug)]
pub struct EventCollector {
    receiver: Receiver<HostEvent>,
    input_batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    pub fn new(receiver: Receiver<HostEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
        }
    }

    /// Collects pending host events (bounded to prevent starvation).
    ///
    /// Events beyond the bound stay queued for the next tick.
    pub fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_TICK {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    debug!("Host channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_TICK {
            warn!("Event queue backlog: drained {} events this tick", drained);
        }

        TickControl::Continue
    }

    /// Returns collected input batches for this tick.
    pub fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Takes ownership of collected input batches, leaving an empty vec.
    pub fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    fn handle_event(&mut self, event: HostEvent) -> TickControl {
        match event {
            HostEvent::Inputs(batch) => {
                if !batch.is_empty() {
                    self.input_batches.push(batch);
                }
                TickControl::Continue
            }
            HostEvent::Shutdown => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
