use std::time::Duration;

/// Turns elapsed wall-clock time into discrete simulation ticks.
///
/// The loop feeds it the time since its previous iteration. A tick fires
/// once the accumulated time is strictly greater than the interval, and
/// accumulation then starts over from zero: a slow iteration never produces
/// a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    accumulated: Duration,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add `elapsed`; returns true when a tick is due
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.accumulated += elapsed;
        if self.accumulated > self.interval {
            self.accumulated = Duration::ZERO;
            return true;
        }
        false
    }

    /// Forget accumulated time, e.g. when a new game starts
    pub fn restart(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Time still to accumulate before the next tick can fire
    pub fn until_next_tick(&self) -> Duration {
        self.interval.saturating_sub(self.accumulated)
    }
}
