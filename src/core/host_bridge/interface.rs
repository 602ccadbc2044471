//=========================================================================
// Host Bridge Interface
//=========================================================================
//
// Host-to-core event types.
//
// Defines the contract for communication between the host and the
// simulation core over a bounded crossbeam channel.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== HostEvent ===========================================================

/// Events sent from the host to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Batched input events, applied in order.
    Inputs(Vec<InputEvent>),

    /// Host is closing; the engine stops ticking.
    Shutdown,
}
