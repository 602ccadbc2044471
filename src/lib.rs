//=========================================================================
// Aetheric Platformer — Library Root
//
// Platform objects and a platformer character controller that resolves
// movement against them each tick.
//
// Responsibilities:
// - Expose the fixed-step `Engine` driver and its builder
// - Expose `core` for direct scene manipulation (spawning, stepping,
//   querying characters)
// - Expose `host` for translating winit keyboard events
//
// Typical usage:
// ```
// use aetheric_platformer::prelude::*;
//
// let mut scene: Scene = Scene::new();
// scene.spawn_platform(Body::new(-500.0, 100.0, 1000.0, 20.0), PlatformType::Normal);
// let player = scene.spawn_platformer(Body::new(0.0, 0.0, 20.0, 40.0), PlatformerController::new());
//
// scene.begin_tick(16_000);
// scene.step(&StateTracker::new());
// assert!(scene.object(player).unwrap().y() > 0.0);
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the simulation: scenes, platforms and the controller.
// `host` converts window-system keyboard events into engine events.
//
pub mod core;
pub mod host;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
