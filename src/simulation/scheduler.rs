//! Periodic triggers on a simulated millisecond clock
//!
//! Three independent tasks share one timeline. Each task remembers when it
//! is next due; pausing freezes the clock and resuming re-arms every task
//! one interval ahead so missed ticks are never replayed.

/// Interval of the signal controller tick
pub const PHASE_TICK_MS: u64 = 1000;

/// Default interval of the motion tick, roughly one animation frame
pub const DEFAULT_FRAME_MS: u64 = 16;

/// The periodic actions driven by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Phase,
    Motion,
    Spawn,
}

/// A single repeating task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PeriodicTask {
    interval_ms: u64,
    next_due_ms: u64,
}

impl PeriodicTask {
    fn new(interval_ms: u64, now_ms: u64) -> Self {
        let interval_ms = interval_ms.max(1);
        Self {
            interval_ms,
            next_due_ms: now_ms + interval_ms,
        }
    }
}

/// Deterministic scheduler for the phase, motion and spawn triggers
#[derive(Debug, Clone)]
pub struct Scheduler {
    now_ms: u64,
    phase: PeriodicTask,
    motion: PeriodicTask,
    spawn: PeriodicTask,
}

impl Scheduler {
    pub fn new(frame_ms: u64, spawn_interval_ms: u64) -> Self {
        Self {
            now_ms: 0,
            phase: PeriodicTask::new(PHASE_TICK_MS, 0),
            motion: PeriodicTask::new(frame_ms, 0),
            spawn: PeriodicTask::new(spawn_interval_ms, 0),
        }
    }

    /// Simulated milliseconds elapsed while running
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Arm every task one full interval after the current clock
    pub fn resume(&mut self, spawn_interval_ms: u64) {
        self.phase = PeriodicTask::new(self.phase.interval_ms, self.now_ms);
        self.motion = PeriodicTask::new(self.motion.interval_ms, self.now_ms);
        self.spawn = PeriodicTask::new(spawn_interval_ms, self.now_ms);
    }

    /// Rewind the clock to zero with fresh tasks
    pub fn reset(&mut self, spawn_interval_ms: u64) {
        self.now_ms = 0;
        self.resume(spawn_interval_ms);
    }

    /// Pop the earliest trigger due at or before `until_ms`
    ///
    /// The clock moves to the trigger's due time. Ties resolve phase first,
    /// then motion, then spawn. The spawn task is re-armed with
    /// `spawn_interval_ms` so frequency changes apply from the next spawn on.
    pub fn pop_due(&mut self, until_ms: u64, spawn_interval_ms: u64) -> Option<Trigger> {
        let (trigger, due_ms) = [
            (Trigger::Phase, self.phase.next_due_ms),
            (Trigger::Motion, self.motion.next_due_ms),
            (Trigger::Spawn, self.spawn.next_due_ms),
        ]
        .into_iter()
        .filter(|(_, due)| *due <= until_ms)
        .min_by_key(|(_, due)| *due)?;

        self.now_ms = due_ms;
        match trigger {
            Trigger::Phase => self.phase.next_due_ms += self.phase.interval_ms,
            Trigger::Motion => self.motion.next_due_ms += self.motion.interval_ms,
            Trigger::Spawn => {
                self.spawn.interval_ms = spawn_interval_ms.max(1);
                self.spawn.next_due_ms += self.spawn.interval_ms;
            }
        }
        Some(trigger)
    }

    /// Move the clock forward once no more triggers are due
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
