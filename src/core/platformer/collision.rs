//=========================================================================
// Collision Queries
//=========================================================================
//
// Broad-phase pruning and the narrow-phase predicates used by the
// per-tick resolver.
//
// Architecture:
//   Scene::platforms() ──bounding circles──> candidates (handle order)
//                                                 ↓
//   PlatformQuery { scene, owner, candidates } ── is_colliding(...) etc.
//
// Candidates are computed once per tick. Every predicate walks them in
// ascending handle order, so "the first platform" is deterministic.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::platform::PlatformType;
use crate::core::scene::Scene;
use crate::core::world::{ObjectHandle, SceneObject};

//=== Candidate ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Candidate {
    pub handle: ObjectHandle,
    pub platform_type: PlatformType,
}

//=== PlatformQuery =======================================================

/// Moves the owner object and tests it against this tick's candidates.
pub(super) struct PlatformQuery<'s, O> {
    scene: &'s mut Scene<O>,
    owner: ObjectHandle,
    candidates: Vec<Candidate>,
}

impl<'s, O: SceneObject> PlatformQuery<'s, O> {
    /// Collects the registered platforms near the owner.
    ///
    /// The owner's bounding circle is inflated by half of
    /// `max_movement`. The owner itself is never a candidate.
    pub fn new(scene: &'s mut Scene<O>, owner: ObjectHandle, max_movement: f64) -> Option<Self> {
        let reach = scene.object(owner)?.bounding_circle().inflated(max_movement);

        let candidates = scene
            .platforms()
            .filter(|entry| entry.handle != owner)
            .filter(|entry| reach.overlaps(&entry.object.bounding_circle()))
            .map(|entry| Candidate {
                handle: entry.handle,
                platform_type: entry.platform_type,
            })
            .collect();

        Some(Self {
            scene,
            owner,
            candidates,
        })
    }

    //--- Owner Position ---------------------------------------------------

    pub fn x(&self) -> f64 {
        self.scene.object(self.owner).map_or(0.0, |o| o.x())
    }

    pub fn y(&self) -> f64 {
        self.scene.object(self.owner).map_or(0.0, |o| o.y())
    }

    pub fn set_x(&mut self, x: f64) {
        if let Some(object) = self.scene.object_mut(self.owner) {
            object.set_x(x);
        }
    }

    pub fn set_y(&mut self, y: f64) {
        if let Some(object) = self.scene.object_mut(self.owner) {
            object.set_y(y);
        }
    }

    pub fn height(&self) -> f64 {
        self.scene.object(self.owner).map_or(0.0, |o| o.height())
    }

    //--- Candidates -------------------------------------------------------

    pub fn is_candidate(&self, handle: ObjectHandle) -> bool {
        self.candidates.iter().any(|c| c.handle == handle)
    }

    /// Position of a platform, if it still exists.
    pub fn platform_position(&self, handle: ObjectHandle) -> Option<(f64, f64)> {
        self.scene.object(handle).map(|o| (o.x(), o.y()))
    }

    //--- Narrow Phase -----------------------------------------------------

    /// Precise overlap between the owner and one platform.
    pub fn collides_with(&self, platform: ObjectHandle) -> bool {
        match (self.scene.object(self.owner), self.scene.object(platform)) {
            (Some(owner), Some(other)) => owner.is_colliding_with(other),
            _ => false,
        }
    }

    /// Any obstacle overlapped, ignoring `except` and ladders (and
    /// jump-thrus when `exclude_jumpthrus` is set).
    pub fn is_colliding(&self, except: Option<ObjectHandle>, exclude_jumpthrus: bool) -> bool {
        self.candidates.iter().any(|c| {
            Some(c.handle) != except
                && c.platform_type != PlatformType::Ladder
                && !(exclude_jumpthrus && c.platform_type == PlatformType::Jumpthru)
                && self.collides_with(c.handle)
        })
    }

    /// Any non-ladder platform overlapped, ignoring those in `except`.
    pub fn is_colliding_except(&self, except: &[ObjectHandle]) -> bool {
        self.first_colliding_except(except).is_some()
    }

    /// First non-ladder platform overlapped, ignoring those in `except`.
    pub fn first_colliding_except(&self, except: &[ObjectHandle]) -> Option<ObjectHandle> {
        self.candidates
            .iter()
            .filter(|c| c.platform_type != PlatformType::Ladder)
            .filter(|c| !except.contains(&c.handle))
            .map(|c| c.handle)
            .find(|&handle| self.collides_with(handle))
    }

    /// Jump-thru platforms currently overlapped.
    pub fn overlapped_jumpthrus(&self) -> Vec<ObjectHandle> {
        self.candidates
            .iter()
            .filter(|c| c.platform_type == PlatformType::Jumpthru)
            .map(|c| c.handle)
            .filter(|&handle| self.collides_with(handle))
            .collect()
    }

    pub fn is_overlapping_ladder(&self) -> bool {
        self.candidates
            .iter()
            .any(|c| c.platform_type == PlatformType::Ladder && self.collides_with(c.handle))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
