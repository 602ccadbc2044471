//=========================================================================
// World Objects
//=========================================================================
//
// Object model consumed by the platform resolver.
//
// Architecture:
//   ObjectArena<T>
//     ├─ slots: Vec<Slot<T>>  (value + generation)
//     └─ ObjectHandle          (index + generation, Copy)
//
//   SceneObject trait  ← Body (rectangle) or any host object type
//
//=========================================================================

//=== Module Declarations =================================================

mod arena;
mod object;

//=== Public API ==========================================================

pub use arena::{ObjectArena, ObjectHandle};
pub use object::{Body, SceneObject};
