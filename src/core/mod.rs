//=========================================================================
// Core Systems
//
// Simulation-side modules. Nothing in here touches the window system;
// the host layer feeds keyboard events in through `host_bridge`.
//
// Layout:
// ```text
//   world      ── object arena, handles, SceneObject trait
//   geometry   ── AABB and bounding-circle primitives
//   platform   ── platform markers and the per-scene registry
//   platformer ── character controller and collision resolution
//   scene      ── Scene (objects + registry + clock) and SceneManager
//   input      ── keyboard events and held-key tracking
//   host_bridge── host → engine channel draining
//   error      ── setting and configuration errors
// ```
//
//=========================================================================

//=== Module Declarations =================================================

pub mod error;
pub mod geometry;
pub mod host_bridge;
pub mod input;
pub mod platform;
pub mod platformer;
pub mod scene;
pub mod world;
