use std::time::Duration;

/// Turns real frame times into a whole number of fixed simulation ticks.
///
/// Leftover time carries over to the next frame. If a frame falls so far behind that more than
/// `max_catch_up` ticks are owed, the excess is dropped instead of replayed.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    tick: Duration,
    max_catch_up: u32,
    accumulator: Duration,
    dropped: Duration,
}

impl TickScheduler {
    pub fn new(tick: Duration, max_catch_up: u32) -> Self {
        Self {
            tick: tick.max(Duration::from_micros(1)),
            max_catch_up: max_catch_up.max(1),
            accumulator: Duration::ZERO,
            dropped: Duration::ZERO,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    /// Total backlog thrown away so far.
    pub fn dropped(&self) -> Duration {
        self.dropped
    }

    /// Adds `dt` of real time and returns how many ticks to run now.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(dt);

        let mut ticks = 0u32;
        while self.accumulator >= self.tick && ticks < self.max_catch_up {
            self.accumulator -= self.tick;
            ticks += 1;
        }

        if self.accumulator >= self.tick {
            tracing::debug!(backlog_ms = self.accumulator.as_millis() as u64, "dropping tick backlog");
            self.dropped = self.dropped.saturating_add(self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}
