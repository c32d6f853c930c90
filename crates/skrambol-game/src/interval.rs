use std::time::{Duration, Instant};

/// A cancellable recurring tick.
///
/// The owner polls the interval with the current instant; the interval
/// reports whether a period boundary has passed since the last firing. It
/// fires at most once per poll, and periods missed between polls are
/// skipped rather than replayed. Once cancelled, it never fires again until
/// restarted.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use skrambol_game::Interval;
///
/// let t0 = Instant::now();
/// let mut autosave = Interval::new(Duration::from_secs(5));
/// autosave.start(t0);
///
/// assert!(!autosave.poll(t0 + Duration::from_secs(4)));
/// assert!(autosave.poll(t0 + Duration::from_secs(5)));
///
/// autosave.cancel();
/// assert!(!autosave.poll(t0 + Duration::from_secs(60)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Interval {
    /// Creates an inactive interval with the given period.
    ///
    /// A zero period is bumped to one millisecond so the interval cannot fire
    /// on every poll.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// Returns the period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` if the interval is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Starts (or restarts) the interval; the first firing is one period
    /// after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Stops the interval.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Returns `true` if a period boundary has been reached.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due + self.period;
        if next <= now {
            // Skip every whole period we slept through.
            let behind = now.duration_since(due);
            let periods = behind.as_nanos() / self.period.as_nanos() + 1;
            let skip = u32::try_from(periods).unwrap_or(u32::MAX);
            next = due + self.period.saturating_mul(skip);
        }
        self.next_due = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_interval_never_fires() {
        let t0 = Instant::now();
        let mut interval = Interval::new(Duration::from_millis(100));
        assert!(!interval.is_active());
        assert!(!interval.poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_fires_once_per_period() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut interval = Interval::new(ms(100));
        interval.start(t0);

        assert!(!interval.poll(t0 + ms(99)));
        assert!(interval.poll(t0 + ms(100)));
        assert!(!interval.poll(t0 + ms(150)));
        assert!(interval.poll(t0 + ms(210)));
    }

    #[test]
    fn test_missed_periods_are_skipped() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut interval = Interval::new(ms(100));
        interval.start(t0);

        assert!(interval.poll(t0 + ms(1050)));
        assert!(!interval.poll(t0 + ms(1099)));
        assert!(interval.poll(t0 + ms(1100)));
    }

    #[test]
    fn test_cancel_and_restart() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut interval = Interval::new(ms(100));
        interval.start(t0);
        interval.cancel();
        assert!(!interval.poll(t0 + ms(500)));

        interval.start(t0 + ms(500));
        assert!(!interval.poll(t0 + ms(550)));
        assert!(interval.poll(t0 + ms(600)));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let interval = Interval::new(Duration::ZERO);
        assert_eq!(interval.period(), Duration::from_millis(1));
    }
}
