use std::time::Duration;

/// Wall-clock cost of one simulation tick, split by phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickTimings {
    /// Pulling input (capture + detection).
    pub sample: Duration,
    /// Advancing game state.
    pub simulate: Duration,
    /// Drawing into the surface (zero when the tick did not render).
    pub render: Duration,
    pub total: Duration,
}

/// Optional hook interface for capturing per-tick timings.
///
/// Generic over nothing game-specific so it can be shared by headful and headless drivers.
pub trait Profiler {
    fn on_tick(&mut self, _tick: u64, _timings: TickTimings) {}
}

/// Profiler that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProfiler;

impl Profiler for NoopProfiler {}

/// Running totals, enough for an end-of-run summary line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimingSummary {
    pub ticks: u64,
    pub sample: Duration,
    pub simulate: Duration,
    pub render: Duration,
    pub total: Duration,
    pub worst_total: Duration,
}

impl TimingSummary {
    pub fn mean_total(&self) -> Duration {
        if self.ticks == 0 {
            return Duration::ZERO;
        }
        let per = self.total.as_nanos() / self.ticks as u128;
        Duration::from_nanos(per.min(u64::MAX as u128) as u64)
    }
}

impl Profiler for TimingSummary {
    fn on_tick(&mut self, _tick: u64, t: TickTimings) {
        self.ticks += 1;
        self.sample += t.sample;
        self.simulate += t.simulate;
        self.render += t.render;
        self.total += t.total;
        self.worst_total = self.worst_total.max(t.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tracks_worst_and_mean() {
        let mut s = TimingSummary::default();
        assert_eq!(s.mean_total(), Duration::ZERO);

        for ms in [2u64, 4, 6] {
            s.on_tick(
                0,
                TickTimings {
                    total: Duration::from_millis(ms),
                    ..TickTimings::default()
                },
            );
        }
        assert_eq!(s.ticks, 3);
        assert_eq!(s.worst_total, Duration::from_millis(6));
        assert_eq!(s.mean_total(), Duration::from_millis(4));
    }
}
