//=========================================================================
// Host Bridge
//=========================================================================
//
// Bridges the host layer (winit, SDL, a test harness...) with the core
// simulation.
//
// This module defines the contract between host implementations and
// core logic, so the host can be swapped without changing core code.
//
// Components:
// - `interface`: Event types crossing the channel (the contract)
// - `event_collector`: Core-side draining at each tick boundary
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl, MAX_EVENTS_PER_TICK};
pub use interface::HostEvent;
