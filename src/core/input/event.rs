//=========================================================================
// Input Event Types
//
// Defines the internal representation of keyboard input events.
//
// This module abstracts away host-specific input (e.g. Winit, SDL)
// into a small, engine-friendly format used by the state tracker and
// the platformer default controls.
//
// Design:
// Events are designed to be:
// - Copy-cheap (no heap allocations)
// - Hash-stable for efficient HashSet/HashMap usage
//
// Event Flow:
// ```text
// Host Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (processes events)
//         ↓
//    PlatformerInput (default controls)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - Shift keys (left and right are distinct)
/// - Common special keys (Space, Enter, Escape, etc.)
///
/// Host mapping:
/// - Winit: Uses `winit::keyboard::KeyCode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ShiftRight,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Delete key
    Delete,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified
}

//=== InputEvent ==========================================================

/// Low-level keyboard event from the host layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown { key: KeyCode },

    /// Key released.
    KeyUp { key: KeyCode },

    /// Unrecognized or unsupported event.
    ///
    /// These are silently ignored by the input system.
    Unidentified
}

impl InputEvent {
    /// Key carried by the event, if any.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown { key } | Self::KeyUp { key } => Some(*key),
            Self::Unidentified => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_depends_on_type_and_key() {
        let down = InputEvent::KeyDown { key: KeyCode::ArrowLeft };
        assert_eq!(down, InputEvent::KeyDown { key: KeyCode::ArrowLeft });
        assert_ne!(down, InputEvent::KeyUp { key: KeyCode::ArrowLeft });
        assert_ne!(down, InputEvent::KeyDown { key: KeyCode::ArrowRight });
    }

    #[test]
    fn events_deduplicate_in_sets() {
        let mut set = HashSet::new();
        set.insert(InputEvent::KeyDown { key: KeyCode::Space });
        set.insert(InputEvent::KeyDown { key: KeyCode::Space });
        set.insert(InputEvent::Unidentified);
        set.insert(InputEvent::Unidentified);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn key_accessor() {
        assert_eq!(InputEvent::KeyUp { key: KeyCode::ShiftLeft }.key(), Some(KeyCode::ShiftLeft));
        assert_eq!(InputEvent::Unidentified.key(), None);
    }

    #[test]
    fn shift_sides_are_distinct() {
        assert_ne!(KeyCode::ShiftLeft, KeyCode::ShiftRight);
    }
}
