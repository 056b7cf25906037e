//! Periodic tick sources.
//!
//! The controller never sleeps or spawns timers itself. It arms a
//! [`TickSource`] and asks it, once per host frame, whether a tick is due.

use std::time::{Duration, Instant};

/// Something that decides when the next simulation tick is due.
pub trait TickSource {
    /// Begins periodic ticking with `period`, replacing any previous schedule.
    fn arm(&mut self, period: Duration);

    /// Cancels periodic ticking.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;

    /// Returns true when one tick is due at `now`. At most one tick is
    /// reported per call, so a stalled host never gets a burst of catch-up ticks.
    fn poll(&mut self, now: Instant) -> bool;

    /// How long until the next tick is due, or `None` while disarmed.
    fn time_until_due(&self, now: Instant) -> Option<Duration>;
}

/// Wall-clock interval timer.
///
/// The first period starts at the first poll after arming, so arming itself
/// does not need to read the clock.
#[derive(Debug, Clone, Default)]
pub struct IntervalTimer {
    period: Option<Duration>,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSource for IntervalTimer {
    fn arm(&mut self, period: Duration) {
        self.period = Some(period);
        self.next_due = None;
    }

    fn disarm(&mut self) {
        self.period = None;
        self.next_due = None;
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    fn poll(&mut self, now: Instant) -> bool {
        let Some(period) = self.period else {
            return false;
        };

        let Some(due) = self.next_due else {
            self.next_due = Some(now + period);
            return false;
        };

        if now < due {
            return false;
        }

        let next = due + period;
        self.next_due = Some(if next <= now { now + period } else { next });
        true
    }

    fn time_until_due(&self, now: Instant) -> Option<Duration> {
        let period = self.period?;
        Some(match self.next_due {
            Some(due) => due.saturating_duration_since(now),
            None => period,
        })
    }
}

/// Tick source driven by hand, for headless and deterministic runs.
#[derive(Debug, Clone, Default)]
pub struct ManualTickSource {
    period: Option<Duration>,
    queued: u32,
    arm_count: u32,
}

impl ManualTickSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one tick. Ignored while disarmed, like a cancelled timer.
    pub fn fire(&mut self) {
        if self.period.is_some() {
            self.queued += 1;
        }
    }

    /// How many times the source has been armed since creation.
    #[must_use]
    pub fn arm_count(&self) -> u32 {
        self.arm_count
    }

    #[must_use]
    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl TickSource for ManualTickSource {
    fn arm(&mut self, period: Duration) {
        self.period = Some(period);
        self.queued = 0;
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.period = None;
        self.queued = 0;
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }

    fn poll(&mut self, _now: Instant) -> bool {
        if self.queued == 0 {
            return false;
        }

        self.queued -= 1;
        true
    }

    fn time_until_due(&self, _now: Instant) -> Option<Duration> {
        let period = self.period?;
        Some(if self.queued > 0 { Duration::ZERO } else { period })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{IntervalTimer, ManualTickSource, TickSource};

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn interval_timer_fires_once_per_period() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new();
        timer.arm(PERIOD);

        assert!(!timer.poll(start));
        assert!(!timer.poll(start + Duration::from_millis(99)));
        assert!(timer.poll(start + PERIOD));
        assert!(!timer.poll(start + Duration::from_millis(150)));
        assert!(timer.poll(start + Duration::from_millis(200)));
    }

    #[test]
    fn interval_timer_does_not_burst_after_a_stall() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new();
        timer.arm(PERIOD);
        assert!(!timer.poll(start));

        let late = start + Duration::from_millis(1_000);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert!(timer.poll(late + PERIOD));
    }

    #[test]
    fn disarmed_interval_timer_never_fires() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new();
        assert!(!timer.poll(start + PERIOD));

        timer.arm(PERIOD);
        assert!(!timer.poll(start));
        timer.disarm();

        assert!(!timer.is_armed());
        assert!(!timer.poll(start + Duration::from_millis(500)));
    }

    #[test]
    fn interval_timer_reports_time_until_the_next_tick() {
        let start = Instant::now();
        let mut timer = IntervalTimer::new();
        assert_eq!(timer.time_until_due(start), None);

        let period = Duration::from_millis(10);
        timer.arm(period);
        assert_eq!(timer.time_until_due(start), Some(period));

        assert!(!timer.poll(start));
        assert_eq!(
            timer.time_until_due(start + Duration::from_millis(4)),
            Some(Duration::from_millis(6))
        );
        assert_eq!(
            timer.time_until_due(start + Duration::from_millis(25)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn manual_source_only_fires_when_armed() {
        let now = Instant::now();
        let mut source = ManualTickSource::new();

        source.fire();
        assert!(!source.poll(now));

        source.arm(PERIOD);
        source.fire();
        source.fire();
        assert!(source.poll(now));
        assert!(source.poll(now));
        assert!(!source.poll(now));

        source.fire();
        source.disarm();
        assert!(!source.poll(now));
        assert_eq!(source.arm_count(), 1);
    }
}
