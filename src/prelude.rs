//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_platformer::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Objects
pub use crate::core::world::{Body, ObjectHandle, SceneObject};

// Platforms
pub use crate::core::platform::{PlatformMarker, PlatformType};

// Characters
pub use crate::core::platformer::{ControlInput, PlatformerController, PlatformerSettings};

// Scene system
pub use crate::core::scene::{Scene, SceneKey, SceneManager};

// Input system
pub use crate::core::input::{InputEvent, KeyCode, StateTracker};

// Host communication
pub use crate::core::host_bridge::{HostEvent, TickControl};

// Errors
pub use crate::core::error::{ConfigError, SettingError};
