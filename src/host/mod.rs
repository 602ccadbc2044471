//=========================================================================
// Host Integration
//
// Helpers for hosts that own a winit event loop.
//
// Architecture:
// ```text
//  Host Thread (winit)                 Engine::tick()
//  ┌──────────────────────────┐       ┌──────────────────────┐
//  │  WindowEvent::KeyboardInput      │  EventCollector      │
//  │   ↓                      │       │   ↓                  │
//  │  InputProcessor          │       │  StateTracker        │
//  │   ↓                      │       │   ↓                  │
//  │  Vec<InputEvent>         │       │  SceneManager        │
//  │   ↓                      │       │   └─ Scene::step()   │
//  │  Sender<HostEvent> ──────┼──────>│                      │
//  └──────────────────────────┘       └──────────────────────┘
// ```
//
// The engine never creates windows itself; the host forwards converted
// key events through `Engine::sender()` and sends `HostEvent::Shutdown`
// when it closes.
//
//=========================================================================

//=== Module Declarations =================================================

mod input_processor;

//=== Public API ==========================================================

pub use input_processor::InputProcessor;
