//=========================================================================
// Aetheric Platformer Engine
//
// Main entry point and coordinator for the simulation.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──tick()──>  SceneManager::step_all()
//         │                          │
//         ├─ with_tps()              ├─ EventCollector (Receiver<HostEvent>)
//         └─ with_channel_capacity() ├─ StateTracker (held keys)
//                                    └─ run(): paced tick() until Exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::host_bridge::{EventCollector, HostEvent, TickControl};
use crate::core::input::StateTracker;
use crate::core::scene::{SceneKey, SceneManager};
use crate::core::world::{Body, SceneObject};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (simulation steps per second)
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```
/// use aetheric_platformer::EngineBuilder;
/// use aetheric_platformer::core::scene::SceneKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Level { One }
/// impl SceneKey for Level {}
///
/// let mut engine = EngineBuilder::<Level>::new()
///     .with_tps(120.0)
///     .with_channel_capacity(256)
///     .build()
///     .init(|scenes| {
///         scenes.load(Level::One);
///     });
///
/// engine.tick();
/// assert!(engine.scenes().is_loaded(Level::One));
/// ```
pub struct EngineBuilder<K: SceneKey, O: SceneObject = Body> {
    tps: f64,
    channel_capacity: usize,
    _phantom: PhantomData<(K, O)>,
}

impl<K: SceneKey, O: SceneObject> EngineBuilder<K, O> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            _phantom: PhantomData,
        }
    }

    /// Sets the fixed number of simulation steps per second.
    ///
    /// Every tick advances scenes by exactly `1 / tps` seconds, so the
    /// simulation is reproducible regardless of wall-clock jitter.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for host → engine communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine instance with no scene loaded.
    pub fn build(self) -> Engine<K, O> {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        let (sender, receiver) = bounded(self.channel_capacity);

        Engine {
            scenes: SceneManager::new(),
            keys: StateTracker::new(),
            collector: EventCollector::new(receiver),
            sender,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl<K: SceneKey, O: SceneObject> Default for EngineBuilder<K, O> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Fixed-step simulation driver.
///
/// Owns the scene manager, the keyboard state and the receiving end of
/// the host channel. One [`tick`](Engine::tick) drains host events,
/// updates the keyboard state and steps every loaded scene once.
pub struct Engine<K: SceneKey, O: SceneObject = Body> {
    scenes: SceneManager<K, O>,
    keys: StateTracker,
    collector: EventCollector,
    sender: Sender<HostEvent>,
    tps: f64,
    channel_capacity: usize,
}

impl<K: SceneKey, O: SceneObject> Engine<K, O> {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to the scene manager before ticking starts.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut SceneManager<K, O>),
    {
        info!("Initializing engine scenes");
        init_fn(&mut self.scenes);
        self
    }

    //--- Accessors --------------------------------------------------------

    /// Sending end of the host channel. Clone freely.
    pub fn sender(&self) -> Sender<HostEvent> {
        self.sender.clone()
    }

    pub fn scenes(&self) -> &SceneManager<K, O> {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager<K, O> {
        &mut self.scenes
    }

    pub fn keys(&self) -> &StateTracker {
        &self.keys
    }

    pub fn tps(&self) -> f64 {
        self.tps
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    /// Simulated time of one tick, in microseconds.
    pub fn tick_us(&self) -> u64 {
        (1_000_000.0 / self.tps).round() as u64
    }

    //--- Execution --------------------------------------------------------

    /// Runs one simulation step.
    ///
    /// Returns [`TickControl::Exit`] without stepping when the host has
    /// shut down or dropped every sender.
    pub fn tick(&mut self) -> TickControl {
        if self.collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        self.keys.clear();
        for batch in self.collector.take_batches() {
            self.keys.process_events(&batch);
        }

        let tick_us = self.tick_us();
        self.scenes.step_all(tick_us, &self.keys);
        TickControl::Continue
    }

    /// Ticks at the configured rate until the host shuts down.
    ///
    /// Blocks the calling thread. Returns the engine so its final state
    /// can be inspected.
    pub fn run(mut self) -> Self {
        info!("Starting engine loop (TPS: {})", self.tps);
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);

        loop {
            let frame_start = Instant::now();

            if self.tick() == TickControl::Exit {
                info!("Engine loop exiting");
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }

        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
