use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::{Snapshot, TickEngine};
use crate::error::EngineError;
use crate::input::Direction;

/// Cloneable handle for driving one engine from several threads.
///
/// Input threads call [`SharedEngine::set_intended_direction`] at any time; the
/// clock thread calls [`SharedEngine::step`]. At most one step runs at once: a
/// second caller gets [`EngineError::ReentrantStepRejected`] instead of
/// queueing behind the first.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    engine: Arc<Mutex<TickEngine>>,
    stepping: Arc<AtomicBool>,
}

impl SharedEngine {
    #[must_use]
    pub fn new(engine: TickEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            stepping: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs one tick unless another tick is already in flight.
    pub fn step(&self) -> Result<Snapshot, EngineError> {
        let _guard = StepGuard::acquire(&self.stepping)?;
        Ok(self.lock().step())
    }

    /// Queues a turn; returns whether it was accepted.
    pub fn set_intended_direction(&self, direction: Direction) -> bool {
        self.lock().set_intended_direction(direction)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Starts a new game. Shares the in-flight marker with [`SharedEngine::step`],
    /// so a reset never lands in the middle of a tick.
    pub fn reset(&self) -> Result<Snapshot, EngineError> {
        let _guard = StepGuard::acquire(&self.stepping)?;
        let mut engine = self.lock();
        engine.reset()?;
        Ok(engine.snapshot())
    }

    /// Runs `f` with read access to the engine. State changes go through
    /// `step`, `reset` and `set_intended_direction` only.
    pub fn with_engine<T>(&self, f: impl FnOnce(&TickEngine) -> T) -> T {
        f(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, TickEngine> {
        self.engine
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Holds the in-flight marker for the duration of one step.
struct StepGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> StepGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, EngineError> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| EngineError::ReentrantStepRejected)?;
        Ok(Self { flag })
    }
}

impl Drop for StepGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
