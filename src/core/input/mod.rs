//=========================================================================
// Input System
//
// Keyboard state consumed by the platformer default controls.
//
// Responsibilities:
// - Represent host key events in a portable form
// - Track held keys across ticks and per-tick press/release deltas
//
// Notes:
// The engine owns one StateTracker and feeds it the events collected
// at each tick boundary. Scenes receive it read-only.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode};
pub use state_tracker::StateTracker;
