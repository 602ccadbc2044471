//=========================================================================
// Platforms
//=========================================================================
//
// Platform tagging and per-scene registration.
//
// Architecture:
//   SceneEntity
//     └─ PlatformMarker { platform_type, activated, registered, parent_scene }
//           │
//           └─ add/remove ──> Scene::platforms (PlatformRegistry)
//
// Lifecycle:
//   activate   → register in the current scene's registry
//   deactivate → unregister
//   new scene  → forget the old registration, re-register on next check
//   destroy    → unregister if still registered
//
//=========================================================================

//=== Module Declarations =================================================

mod registry;

//=== External Dependencies ===============================================

use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::error::ConfigError;
use crate::core::scene::SceneId;
use crate::core::world::ObjectHandle;

//=== Public API ==========================================================

pub use registry::PlatformRegistry;

//=== PlatformType ========================================================

/// Collision behaviour of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlatformType {
    /// Solid from every side.
    #[default]
    Normal,

    /// One-way: solid only when landed on from above while not already
    /// overlapped. Never blocks horizontal movement.
    Jumpthru,

    /// Never obstructs. Lets a character climb vertically.
    Ladder,
}

impl PlatformType {
    /// Parses a persisted type name.
    ///
    /// Only the exact, case-sensitive names "Ladder" and "Jumpthru" are
    /// recognised. Every other string is a Normal platform; unknown names
    /// are not an error.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Ladder" => Self::Ladder,
            "Jumpthru" => Self::Jumpthru,
            _ => Self::Normal,
        }
    }

    /// Persisted name of the type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NormalPlatform",
            Self::Jumpthru => "Jumpthru",
            Self::Ladder => "Ladder",
        }
    }
}

impl From<&str> for PlatformType {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

//=== PlatformEntry =======================================================

/// A registered platform as seen by the resolver: the object and its type.
#[derive(Debug)]
pub struct PlatformEntry<'a, O> {
    pub handle: ObjectHandle,
    pub object: &'a O,
    pub platform_type: PlatformType,
}

//=== PlatformSettings ====================================================

/// Persisted configuration of a platform marker.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSettings {
    #[serde(default, with = "platform_type_name")]
    pub platform_type: PlatformType,
}

impl PlatformSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}

mod platform_type_name {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PlatformType;

    pub fn serialize<S: Serializer>(value: &PlatformType, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PlatformType, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(PlatformType::from_name(&name))
    }
}

//=== PlatformMarker ======================================================

/// Component tagging a scene object as a platform.
///
/// The marker is owned by its entity. The registry only stores the
/// entity's handle; registration state is mirrored here so the marker
/// can always undo exactly what it did.
#[derive(Debug, Clone)]
pub struct PlatformMarker {
    platform_type: PlatformType,
    activated: bool,
    registered: bool,
    parent_scene: Option<SceneId>,
}

impl PlatformMarker {
    /// Creates an active, not yet registered marker.
    pub fn new(platform_type: PlatformType) -> Self {
        Self {
            platform_type,
            activated: true,
            registered: false,
            parent_scene: None,
        }
    }

    pub fn from_settings(settings: &PlatformSettings) -> Self {
        Self::new(settings.platform_type)
    }

    pub fn settings(&self) -> PlatformSettings {
        PlatformSettings {
            platform_type: self.platform_type,
        }
    }

    pub fn platform_type(&self) -> PlatformType {
        self.platform_type
    }

    pub fn set_platform_type(&mut self, platform_type: PlatformType) {
        self.platform_type = platform_type;
    }

    /// Changes the type from its persisted name (unknown names give Normal).
    pub fn change_platform_type(&mut self, name: &str) {
        self.platform_type = PlatformType::from_name(name);
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    //--- Lifecycle --------------------------------------------------------

    pub(crate) fn activate(
        &mut self,
        handle: ObjectHandle,
        scene: SceneId,
        registry: &mut PlatformRegistry,
    ) {
        self.activated = true;
        self.check_registration(handle, scene, registry);
    }

    pub(crate) fn deactivate(&mut self, handle: ObjectHandle, registry: &mut PlatformRegistry) {
        self.activated = false;
        self.release(handle, registry);
    }

    /// Brings registration in line with activation for the given scene.
    ///
    /// A different scene than the remembered one means the entity moved;
    /// the previous scene already dropped its entry on detach, so only the
    /// flag is reset before adopting the new registry.
    pub(crate) fn check_registration(
        &mut self,
        handle: ObjectHandle,
        scene: SceneId,
        registry: &mut PlatformRegistry,
    ) {
        if self.parent_scene != Some(scene) {
            if self.parent_scene.is_some() {
                debug!("Platform {:?} moved to scene {:?}", handle, scene);
            }
            self.parent_scene = Some(scene);
            self.registered = false;
        }

        if self.activated && !self.registered {
            registry.add_platform(handle);
            self.registered = true;
        } else if !self.activated && self.registered {
            self.release(handle, registry);
        }
    }

    /// Unregisters if registered. Used on deactivation, destruction and detach.
    pub(crate) fn release(&mut self, handle: ObjectHandle, registry: &mut PlatformRegistry) {
        if self.registered {
            registry.remove_platform(handle);
            self.registered = false;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
