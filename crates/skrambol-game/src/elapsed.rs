use std::{
    fmt::{self, Display},
    time::Duration,
};

/// Displays a duration as `HH:MM:SS.mmm`.
///
/// Hours are not wrapped at 24.
///
/// ```
/// use std::time::Duration;
///
/// use skrambol_game::ElapsedDisplay;
///
/// let shown = ElapsedDisplay(Duration::from_millis(3_723_004)).to_string();
/// assert_eq!(shown, "01:02:03.004");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedDisplay(pub Duration);

impl Display for ElapsedDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_ms = self.0.as_millis();
        let millis = total_ms % 1000;
        let secs = (total_ms / 1000) % 60;
        let mins = (total_ms / 60_000) % 60;
        let hours = total_ms / 3_600_000;
        write!(f, "{hours:02}:{mins:02}:{secs:02}.{millis:03}")
    }
}

/// Formats a duration as `HH:MM:SS.mmm`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    ElapsedDisplay(elapsed).to_string()
}
