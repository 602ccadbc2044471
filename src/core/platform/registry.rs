//=========================================================================
// Platform Registry
//=========================================================================
//
// Per-scene set of the platforms currently taking part in collisions.
//
// Architecture:
//   PlatformMarker ──add/remove──> PlatformRegistry (BTreeSet<ObjectHandle>)
//                                         ↓
//   PlatformerController ←── platforms() (broad-phase input)
//
// The registry is owned by its scene and holds handles only. Entries are
// mutated by platform markers; controllers only read. Iteration order is
// ascending handle order, so ties between platforms resolve the same way
// on every run.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeSet;

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::world::ObjectHandle;

//=== PlatformRegistry ====================================================

/// Set of registered platform objects of one scene.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    platforms: BTreeSet<ObjectHandle>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self {
            platforms: BTreeSet::new(),
        }
    }

    /// Registers a platform. Returns `false` if it was already present.
    pub fn add_platform(&mut self, handle: ObjectHandle) -> bool {
        let inserted = self.platforms.insert(handle);
        if inserted {
            trace!("Platform {:?} registered", handle);
        }
        inserted
    }

    /// Unregisters a platform. Returns `false` if it was not present.
    pub fn remove_platform(&mut self, handle: ObjectHandle) -> bool {
        let removed = self.platforms.remove(&handle);
        if removed {
            trace!("Platform {:?} unregistered", handle);
        }
        removed
    }

    /// Read-only view of every registered platform.
    pub fn all_platforms(&self) -> &BTreeSet<ObjectHandle> {
        &self.platforms
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.platforms.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
