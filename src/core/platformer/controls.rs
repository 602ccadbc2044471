//=========================================================================
// Platformer Controls
//=========================================================================
//
// Per-character input latch and the default keyboard bindings.
//
// Architecture:
//   simulate_control("Jump") ─┐
//                             ├─> PlatformerInput (six flags) ─> step ─> reset
//   StateTracker (defaults) ──┘
//
// The latch is consumed exactly once per tick and must be re-asserted
// every tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, StateTracker};

//=== Default Bindings ====================================================

pub const DEFAULT_LEFT_KEYS: &[KeyCode] = &[KeyCode::ArrowLeft];
pub const DEFAULT_RIGHT_KEYS: &[KeyCode] = &[KeyCode::ArrowRight];
/// Up grabs a ladder and climbs it.
pub const DEFAULT_UP_KEYS: &[KeyCode] = &[KeyCode::ArrowUp];
pub const DEFAULT_DOWN_KEYS: &[KeyCode] = &[KeyCode::ArrowDown];
pub const DEFAULT_JUMP_KEYS: &[KeyCode] = &[KeyCode::ShiftLeft, KeyCode::ShiftRight, KeyCode::Space];

//=== ControlInput ========================================================

/// One of the six simulated controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlInput {
    Left,
    Right,
    Up,
    Down,
    Ladder,
    Jump,
}

impl ControlInput {
    pub const ALL: [ControlInput; 6] = [
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Ladder,
        Self::Jump,
    ];

    /// Parses a control name. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Left" => Some(Self::Left),
            "Right" => Some(Self::Right),
            "Up" => Some(Self::Up),
            "Down" => Some(Self::Down),
            "Ladder" => Some(Self::Ladder),
            "Jump" => Some(Self::Jump),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Ladder => "Ladder",
            Self::Jump => "Jump",
        }
    }
}

//=== PlatformerInput =====================================================

/// Input latch of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub ladder: bool,
    pub jump: bool,
}

impl PlatformerInput {
    /// Reads the default bindings from the keyboard state.
    pub fn from_keys(keys: &StateTracker) -> Self {
        let up = keys.is_any_key_down(DEFAULT_UP_KEYS);
        Self {
            left: keys.is_any_key_down(DEFAULT_LEFT_KEYS),
            right: keys.is_any_key_down(DEFAULT_RIGHT_KEYS),
            up,
            down: keys.is_any_key_down(DEFAULT_DOWN_KEYS),
            ladder: up,
            jump: keys.is_any_key_down(DEFAULT_JUMP_KEYS),
        }
    }

    pub fn set(&mut self, control: ControlInput) {
        match control {
            ControlInput::Left => self.left = true,
            ControlInput::Right => self.right = true,
            ControlInput::Up => self.up = true,
            ControlInput::Down => self.down = true,
            ControlInput::Ladder => self.ladder = true,
            ControlInput::Jump => self.jump = true,
        }
    }

    pub fn is_set(&self, control: ControlInput) -> bool {
        match control {
            ControlInput::Left => self.left,
            ControlInput::Right => self.right,
            ControlInput::Up => self.up,
            ControlInput::Down => self.down,
            ControlInput::Ladder => self.ladder,
            ControlInput::Jump => self.jump,
        }
    }

    /// ORs `other` into this latch.
    pub fn merge(&mut self, other: PlatformerInput) {
        self.left |= other.left;
        self.right |= other.right;
        self.up |= other.up;
        self.down |= other.down;
        self.ladder |= other.ladder;
        self.jump |= other.jump;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
