//! Play-time rules for a tile-swap puzzle session.
//!
//! - [`evaluate`] compares a live arrangement against its solved reference.
//! - [`SessionTimer`] tracks elapsed play time and freezes it on a win.
//! - [`Interval`] is the cancellable recurring tick both the timer and
//!   autosave run on.
//! - [`Clock`] supplies the current instant so all of the above can be driven
//!   deterministically in tests.

pub use self::{
    clock::{Clock, ManualClock, SystemClock},
    elapsed::{ElapsedDisplay, format_elapsed},
    interval::Interval,
    progress::{Progress, ProgressError, evaluate},
    timer::{DEFAULT_TICK_PERIOD, SessionTimer, TimerState},
};

mod clock;
mod elapsed;
mod interval;
mod progress;
mod timer;
