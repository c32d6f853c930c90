use std::time::{Duration, Instant};

use crate::Interval;

/// Default period between published elapsed-time updates.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Lifecycle of a [`SessionTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TimerState {
    /// Not counting. Initial state, and the state after teardown.
    Stopped,
    /// Counting; ticks publish new elapsed values.
    Running,
    /// Stopped at a win; the elapsed value is final.
    Frozen,
}

/// Elapsed play time for one session.
///
/// While running, every due tick publishes
/// `restored + (now - started_at)`. Freezing cancels the tick before the
/// state changes, so no tick can publish after [`freeze`](Self::freeze)
/// returns and the frozen value stays put until the next
/// [`start`](Self::start).
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use skrambol_game::{SessionTimer, TimerState};
///
/// let t0 = Instant::now();
/// let mut timer = SessionTimer::default();
/// timer.start(t0, Duration::from_secs(10));
///
/// assert_eq!(
///     timer.tick(t0 + Duration::from_millis(100)),
///     Some(Duration::from_millis(10_100))
/// );
///
/// let frozen = timer.freeze();
/// assert_eq!(timer.state(), TimerState::Frozen);
/// assert_eq!(timer.tick(t0 + Duration::from_secs(60)), None);
/// assert_eq!(timer.elapsed(), frozen);
/// ```
#[derive(Debug, Clone)]
pub struct SessionTimer {
    state: TimerState,
    started_at: Option<Instant>,
    restored: Duration,
    elapsed: Duration,
    tick: Interval,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl SessionTimer {
    /// Creates a stopped timer that publishes every `tick_period`.
    #[must_use]
    pub fn new(tick_period: Duration) -> Self {
        Self {
            state: TimerState::Stopped,
            started_at: None,
            restored: Duration::ZERO,
            elapsed: Duration::ZERO,
            tick: Interval::new(tick_period),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Returns the last published elapsed time.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Starts counting from `restored`.
    ///
    /// Starting a running timer restarts it.
    pub fn start(&mut self, now: Instant, restored: Duration) {
        if self.state.is_running() {
            log::debug!("timer restarted while running");
        }
        self.state = TimerState::Running;
        self.started_at = Some(now);
        self.restored = restored;
        self.elapsed = restored;
        self.tick.start(now);
    }

    /// Publishes a new elapsed value if running and a tick is due.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        if !self.state.is_running() || !self.tick.poll(now) {
            return None;
        }
        let started_at = self.started_at?;
        self.elapsed = self.restored + now.saturating_duration_since(started_at);
        Some(self.elapsed)
    }

    /// Freezes the timer at its last published value and returns it.
    ///
    /// Only a running timer freezes; in any other state this is a no-op.
    pub fn freeze(&mut self) -> Duration {
        if self.state.is_running() {
            self.tick.cancel();
            self.started_at = None;
            self.state = TimerState::Frozen;
        }
        self.elapsed
    }

    /// Stops the timer from any state, cancelling pending ticks.
    ///
    /// The last published value stays readable.
    pub fn stop(&mut self) {
        self.tick.cancel();
        self.started_at = None;
        self.state = TimerState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_initially_stopped() {
        let mut timer = SessionTimer::default();
        assert!(timer.state().is_stopped());
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.tick(Instant::now() + ms(500)), None);
    }

    #[test]
    fn test_ticks_publish_on_period() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::default();
        timer.start(t0, Duration::ZERO);

        assert_eq!(timer.tick(t0 + ms(50)), None);
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.tick(t0 + ms(100)), Some(ms(100)));
        assert_eq!(timer.tick(t0 + ms(320)), Some(ms(320)));
        assert_eq!(timer.elapsed(), ms(320));
    }

    #[test]
    fn test_start_resumes_from_restored_value() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::default();
        timer.start(t0, ms(42_000));
        assert_eq!(timer.elapsed(), ms(42_000));
        assert_eq!(timer.tick(t0 + ms(1_000)), Some(ms(43_000)));
    }

    #[test]
    fn test_freeze_is_terminal_until_next_start() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::default();
        timer.start(t0, Duration::ZERO);
        timer.tick(t0 + ms(700));

        assert_eq!(timer.freeze(), ms(700));
        for step in 1..50 {
            assert_eq!(timer.tick(t0 + ms(700 + step * 100)), None);
        }
        assert_eq!(timer.elapsed(), ms(700));

        // A second freeze keeps the value.
        assert_eq!(timer.freeze(), ms(700));

        timer.start(t0 + ms(10_000), Duration::ZERO);
        assert!(timer.state().is_running());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_stop_from_any_state() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::default();

        timer.start(t0, Duration::ZERO);
        timer.stop();
        assert!(timer.state().is_stopped());
        assert_eq!(timer.tick(t0 + ms(1_000)), None);

        timer.start(t0, Duration::ZERO);
        timer.freeze();
        timer.stop();
        assert!(timer.state().is_stopped());

        // Freezing a stopped timer does nothing.
        timer.freeze();
        assert!(timer.state().is_stopped());
    }
}
