//! Tick source ownership
//!
//! The engine holds at most one `TickHandle` and cancels it on every exit
//! from an active round, so two sources never drive the same round.

/// Requested tick cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    pub period_ms: u32,
}

/// Opaque handle to a running tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Something that can call `GameEngine::on_tick` periodically
pub trait TickScheduler {
    fn start(&mut self, schedule: TickSchedule) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler that only records what is running; ticks are delivered by hand.
/// Used headless (console front end, tests).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Vec<(TickHandle, TickSchedule)>,
    cancelled: Vec<TickHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Running sources
    pub fn active(&self) -> &[(TickHandle, TickSchedule)] {
        &self.active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Handles cancelled so far, oldest first
    pub fn cancelled(&self) -> &[TickHandle] {
        &self.cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, schedule: TickSchedule) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.active.push((handle, schedule));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        let before = self.active.len();
        self.active.retain(|(h, _)| *h != handle);
        if self.active.len() != before {
            self.cancelled.push(handle);
        }
    }
}
