//=========================================================================
// Scene System
//=========================================================================
//
// Scene-owned object storage, platform registry and tick timing.
//
// Architecture:
//   SceneManager<K>
//     └─ scenes: HashMap<K, Scene>
//          ├─ objects:   ObjectArena<SceneEntity>
//          ├─ platforms: PlatformRegistry
//          └─ timing:    elapsed_us, first_tick
//
// Flow (one tick):
//   begin_tick(elapsed_us) → step(keys)
//     ├─ platform markers: check_registration()
//     ├─ controllers:      step_pre_events() in ascending handle order
//     └─ first_tick = false
//
//=========================================================================

//=== Module Declarations =================================================

mod scene_manager;

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::StateTracker;
use crate::core::platform::{PlatformEntry, PlatformMarker, PlatformRegistry, PlatformType};
use crate::core::platformer::PlatformerController;
use crate::core::world::{Body, ObjectArena, ObjectHandle, SceneObject};

//=== Public API ==========================================================

pub use scene_manager::{SceneKey, SceneManager};

//=== SceneId =============================================================

/// Process-unique identity of a scene instance.
///
/// Two scenes loaded under the same key at different times get
/// different ids, so components can tell that their scene was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(u64);

impl SceneId {
    pub(crate) fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

//=== SceneEntity =========================================================

/// A scene object together with its optional platform components.
#[derive(Debug)]
pub struct SceneEntity<O = Body> {
    body: O,
    platform: Option<PlatformMarker>,
    platformer: Option<PlatformerController>,
}

impl<O> SceneEntity<O> {
    pub fn new(body: O) -> Self {
        Self {
            body,
            platform: None,
            platformer: None,
        }
    }

    /// Tags the entity as a platform.
    pub fn with_platform(mut self, marker: PlatformMarker) -> Self {
        self.platform = Some(marker);
        self
    }

    /// Makes the entity a platformer character.
    pub fn with_platformer(mut self, controller: PlatformerController) -> Self {
        self.platformer = Some(controller);
        self
    }

    pub fn body(&self) -> &O {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut O {
        &mut self.body
    }

    pub fn platform(&self) -> Option<&PlatformMarker> {
        self.platform.as_ref()
    }

    pub fn platformer(&self) -> Option<&PlatformerController> {
        self.platformer.as_ref()
    }

    pub fn platformer_mut(&mut self) -> Option<&mut PlatformerController> {
        self.platformer.as_mut()
    }

    pub fn into_body(self) -> O {
        self.body
    }
}

//=== Scene ===============================================================

/// A live scene: its objects, its platform registry and its clock.
///
/// The registry lives exactly as long as the scene. Unloading the scene
/// deactivates every platform before its objects are dropped.
///
/// # Example
///
/// ```
/// use aetheric_platformer::core::input::StateTracker;
/// use aetheric_platformer::core::platform::PlatformType;
/// use aetheric_platformer::core::platformer::PlatformerController;
/// use aetheric_platformer::core::scene::Scene;
/// use aetheric_platformer::core::world::Body;
///
/// let mut scene: Scene = Scene::new();
/// scene.spawn_platform(Body::new(-100.0, 50.0, 300.0, 20.0), PlatformType::Normal);
/// let player = scene.spawn_platformer(Body::new(0.0, 0.0, 20.0, 40.0), PlatformerController::new());
///
/// let keys = StateTracker::new();
/// for _ in 0..60 {
///     scene.begin_tick(16_667);
///     scene.step(&keys);
/// }
///
/// assert!(scene.platformer(player).is_some_and(|c| c.is_on_floor()));
/// ```
#[derive(Debug)]
pub struct Scene<O = Body> {
    id: SceneId,
    objects: ObjectArena<SceneEntity<O>>,
    platforms: PlatformRegistry,
    elapsed_us: u64,
    first_tick: bool,
}

impl<O: SceneObject> Scene<O> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        let id = SceneId::next();
        debug!("Scene {:?} created", id);

        Self {
            id,
            objects: ObjectArena::new(),
            platforms: PlatformRegistry::new(),
            elapsed_us: 0,
            first_tick: true,
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    //--- Objects ----------------------------------------------------------

    /// Adds an entity to the scene.
    ///
    /// Active platform markers are registered immediately.
    pub fn spawn(&mut self, mut entity: SceneEntity<O>) -> ObjectHandle {
        if let Some(controller) = entity.platformer.as_mut() {
            controller.on_owner_changed(&entity.body);
        }

        let handle = self.objects.insert(entity);
        self.check_platform(handle);
        handle
    }

    pub fn spawn_object(&mut self, body: O) -> ObjectHandle {
        self.spawn(SceneEntity::new(body))
    }

    pub fn spawn_platform(&mut self, body: O, platform_type: PlatformType) -> ObjectHandle {
        self.spawn(SceneEntity::new(body).with_platform(PlatformMarker::new(platform_type)))
    }

    pub fn spawn_platformer(&mut self, body: O, controller: PlatformerController) -> ObjectHandle {
        self.spawn(SceneEntity::new(body).with_platformer(controller))
    }

    /// Destroys an object. Its platform, if any, is unregistered first.
    ///
    /// Returns `false` for a stale handle.
    pub fn destroy_object(&mut self, handle: ObjectHandle) -> bool {
        let destroyed = self.detach(handle).is_some();
        if destroyed {
            debug!("Object {:?} destroyed in scene {:?}", handle, self.id);
        }
        destroyed
    }

    /// Removes an entity so it can be attached to another scene.
    ///
    /// The platform is unregistered here. Its remembered scene becomes
    /// stale, which makes the next check in the new scene re-register it.
    pub fn detach(&mut self, handle: ObjectHandle) -> Option<SceneEntity<O>> {
        let entity = self.objects.get_mut(handle)?;
        if let Some(marker) = entity.platform.as_mut() {
            marker.release(handle, &mut self.platforms);
        }
        self.objects.remove(handle)
    }

    /// Inserts an entity detached from another scene.
    pub fn attach(&mut self, entity: SceneEntity<O>) -> ObjectHandle {
        let handle = self.objects.insert(entity);
        self.check_platform(handle);
        handle
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.objects.contains(handle)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn entity(&self, handle: ObjectHandle) -> Option<&SceneEntity<O>> {
        self.objects.get(handle)
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&O> {
        self.objects.get(handle).map(|entity| &entity.body)
    }

    pub fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut O> {
        self.objects.get_mut(handle).map(|entity| &mut entity.body)
    }

    //--- Platforms --------------------------------------------------------

    pub fn platform_marker(&self, handle: ObjectHandle) -> Option<&PlatformMarker> {
        self.objects.get(handle).and_then(|entity| entity.platform.as_ref())
    }

    /// Activates or deactivates a platform, updating the registry at once.
    ///
    /// Returns `false` if the object has no platform marker.
    pub fn set_platform_activated(&mut self, handle: ObjectHandle, activated: bool) -> bool {
        let id = self.id;
        let Some(marker) = self.objects.get_mut(handle).and_then(|e| e.platform.as_mut()) else {
            return false;
        };

        if activated {
            marker.activate(handle, id, &mut self.platforms);
        } else {
            marker.deactivate(handle, &mut self.platforms);
        }
        true
    }

    /// Changes a platform's type from its persisted name.
    ///
    /// Returns `false` if the object has no platform marker.
    pub fn change_platform_type(&mut self, handle: ObjectHandle, name: &str) -> bool {
        match self.objects.get_mut(handle).and_then(|e| e.platform.as_mut()) {
            Some(marker) => {
                marker.change_platform_type(name);
                true
            }
            None => false,
        }
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.platforms
    }

    /// Registered platforms in ascending handle order.
    pub fn platforms(&self) -> impl Iterator<Item = PlatformEntry<'_, O>> + '_ {
        self.platforms.all_platforms().iter().filter_map(|&handle| {
            let entity = self.objects.get(handle)?;
            let marker = entity.platform.as_ref()?;
            Some(PlatformEntry {
                handle,
                object: &entity.body,
                platform_type: marker.platform_type(),
            })
        })
    }

    //--- Characters -------------------------------------------------------

    pub fn platformer(&self, handle: ObjectHandle) -> Option<&PlatformerController> {
        self.objects.get(handle).and_then(|entity| entity.platformer.as_ref())
    }

    pub fn platformer_mut(&mut self, handle: ObjectHandle) -> Option<&mut PlatformerController> {
        self.objects.get_mut(handle).and_then(|entity| entity.platformer.as_mut())
    }

    //--- Timing -----------------------------------------------------------

    /// Sets the elapsed time of the tick about to be stepped.
    pub fn begin_tick(&mut self, elapsed_us: u64) {
        self.elapsed_us = elapsed_us;
    }

    pub fn elapsed_time_us(&self) -> u64 {
        self.elapsed_us
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_us as f64 / 1_000_000.0
    }

    /// `true` until the first call to [`Scene::step`] completes.
    pub fn is_first_tick(&self) -> bool {
        self.first_tick
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one simulation step.
    ///
    /// Platform registrations are brought up to date before any
    /// character moves, then characters resolve in handle order.
    pub fn step(&mut self, keys: &StateTracker) {
        let id = self.id;
        for (handle, entity) in self.objects.iter_mut() {
            if let Some(marker) = entity.platform.as_mut() {
                marker.check_registration(handle, id, &mut self.platforms);
            }
        }

        let characters: Vec<ObjectHandle> = self
            .objects
            .iter()
            .filter(|(_, entity)| entity.platformer.is_some())
            .map(|(handle, _)| handle)
            .collect();

        for handle in characters {
            let Some(mut controller) = self.objects.get_mut(handle).and_then(|e| e.platformer.take()) else {
                continue;
            };

            controller.step_pre_events(handle, self, keys);

            if let Some(entity) = self.objects.get_mut(handle) {
                entity.platformer = Some(controller);
            }
        }

        self.first_tick = false;
    }

    /// Tears the scene down: every platform is deactivated, then every
    /// object is dropped.
    pub fn unload(&mut self) {
        for (handle, entity) in self.objects.iter_mut() {
            if let Some(marker) = entity.platform.as_mut() {
                marker.deactivate(handle, &mut self.platforms);
            }
        }

        if !self.platforms.is_empty() {
            warn!(
                "Scene {:?} still had {} registered platforms after deactivation",
                self.id,
                self.platforms.len()
            );
        }

        self.objects.clear();
        info!("Scene {:?} unloaded", self.id);
    }

    //--- Internal Helpers -------------------------------------------------

    fn check_platform(&mut self, handle: ObjectHandle) {
        let id = self.id;
        if let Some(marker) = self.objects.get_mut(handle).and_then(|e| e.platform.as_mut()) {
            marker.check_registration(handle, id, &mut self.platforms);
        }
    }
}

impl<O: SceneObject> Default for Scene<O> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
