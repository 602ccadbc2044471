//=========================================================================
// Scene Manager
//=========================================================================
//
// Loaded scenes keyed by a game-defined identifier.
//
// Scenes are stored in a HashMap by key; a Vec of keys remembers load
// order so every tick steps scenes in the same sequence.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::input::StateTracker;
use crate::core::world::{Body, ObjectHandle, SceneObject};

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys uniquely identify scenes in the SceneManager's HashMap.
/// Typically implemented by game-specific enums.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Manager =======================================================

/// Owns every loaded scene.
///
/// Loading creates a fresh [`Scene`] with a new identity; unloading
/// deactivates its platforms before dropping it.
#[derive(Debug)]
pub struct SceneManager<K: SceneKey, O: SceneObject = Body> {
    scenes: HashMap<K, Scene<O>>,
    load_order: Vec<K>,
}

impl<K: SceneKey, O: SceneObject> SceneManager<K, O> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            load_order: Vec::new(),
        }
    }

    //--- Loading ----------------------------------------------------------

    /// Loads a new, empty scene under `key`.
    ///
    /// Returns `false` and keeps the existing scene if `key` is already
    /// loaded.
    pub fn load(&mut self, key: K) -> bool {
        if self.scenes.contains_key(&key) {
            warn!("Scene {:?} is already loaded, keeping the existing instance", key);
            return false;
        }

        let scene = Scene::new();
        info!("Scene {:?} loaded as {:?}", key, scene.id());
        self.scenes.insert(key, scene);
        self.load_order.push(key);
        true
    }

    /// Unloads the scene under `key`, tearing down its platforms.
    pub fn unload(&mut self, key: K) -> bool {
        let Some(mut scene) = self.scenes.remove(&key) else {
            debug!("Scene {:?} not loaded, skipping unload", key);
            return false;
        };

        self.load_order.retain(|&k| k != key);
        scene.unload();
        true
    }

    pub fn is_loaded(&self, key: K) -> bool {
        self.scenes.contains_key(&key)
    }

    pub fn get(&self, key: K) -> Option<&Scene<O>> {
        self.scenes.get(&key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut Scene<O>> {
        self.scenes.get_mut(&key)
    }

    /// Loaded keys in load order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.load_order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    //--- Object Transfer --------------------------------------------------

    /// Moves an object from one loaded scene to another.
    ///
    /// Returns the object's handle in the destination scene, or `None`
    /// if either scene is not loaded or the object does not exist.
    pub fn transfer(&mut self, from: K, handle: ObjectHandle, to: K) -> Option<ObjectHandle> {
        if from == to {
            return self.scenes.get(&from).filter(|s| s.contains(handle)).map(|_| handle);
        }

        if !self.scenes.contains_key(&to) {
            warn!("Cannot transfer {:?}: scene {:?} is not loaded", handle, to);
            return None;
        }

        let Some(entity) = self.scenes.get_mut(&from).and_then(|scene| scene.detach(handle)) else {
            warn!("Cannot transfer {:?}: not found in scene {:?}", handle, from);
            return None;
        };

        let scene = self.scenes.get_mut(&to)?;
        let moved = scene.attach(entity);
        debug!("Transferred {:?} from {:?} to {:?} as {:?}", handle, from, to, moved);
        Some(moved)
    }

    //--- Update Loop ------------------------------------------------------

    /// Steps every loaded scene once, in load order.
    pub fn step_all(&mut self, elapsed_us: u64, keys: &StateTracker) {
        for key in &self.load_order {
            if let Some(scene) = self.scenes.get_mut(key) {
                scene.begin_tick(elapsed_us);
                scene.step(keys);
            }
        }
    }
}

impl<K: SceneKey, O: SceneObject> Default for SceneManager<K, O> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
