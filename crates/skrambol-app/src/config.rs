//! Session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use skrambol_core::GridDimensions;
use skrambol_game::DEFAULT_TICK_PERIOD;
use skrambol_generator::GridSeed;

/// Storage key the session snapshot is written under.
pub const DEFAULT_STORAGE_KEY: &str = "skrambol__game-session";

/// Default period of the recurring snapshot save.
pub const DEFAULT_AUTOSAVE_PERIOD: Duration = Duration::from_secs(5);

/// Difficulty label carried into snapshots and game records.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy.
    #[display("easy")]
    Easy,
    /// Medium.
    #[display("medium")]
    Medium,
    /// Hard.
    #[default]
    #[display("hard")]
    Hard,
}

/// How fresh arrangements are scrambled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrambleMode {
    /// A new random seed for every fresh arrangement.
    #[default]
    Random,
    /// Every fresh arrangement is shuffled from the same seed.
    Seeded(GridSeed),
    /// The solution with its first two tiles exchanged.
    NearlySolved,
}

/// Settings a [`PuzzleSession`](crate::session::PuzzleSession) is built with.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use skrambol_app::config::{Difficulty, SessionConfig};
///
/// let config = SessionConfig::default()
///     .with_autosave_period(Duration::from_secs(30))
///     .with_difficulty(Difficulty::Easy);
/// assert_eq!(config.dimensions().tile_count(), 84);
/// assert_eq!(config.autosave_period(), Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    dimensions: GridDimensions,
    tick_period: Duration,
    autosave_period: Duration,
    storage_key: String,
    difficulty: Difficulty,
    scramble: ScrambleMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dimensions: GridDimensions::default(),
            tick_period: DEFAULT_TICK_PERIOD,
            autosave_period: DEFAULT_AUTOSAVE_PERIOD,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            difficulty: Difficulty::default(),
            scramble: ScrambleMode::default(),
        }
    }
}

impl SessionConfig {
    /// Sets the grid shape.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: GridDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Sets the period between published timer values.
    #[must_use]
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Sets the period of the recurring snapshot save.
    #[must_use]
    pub fn with_autosave_period(mut self, period: Duration) -> Self {
        self.autosave_period = period;
        self
    }

    /// Sets the storage key snapshots are written under.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the difficulty label.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets how fresh arrangements are scrambled.
    #[must_use]
    pub fn with_scramble(mut self, scramble: ScrambleMode) -> Self {
        self.scramble = scramble;
        self
    }

    /// Returns the grid shape.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Returns the timer tick period.
    #[must_use]
    pub const fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Returns the autosave period.
    #[must_use]
    pub const fn autosave_period(&self) -> Duration {
        self.autosave_period
    }

    /// Returns the storage key.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Returns the difficulty label.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the scramble mode.
    #[must_use]
    pub const fn scramble(&self) -> ScrambleMode {
        self.scramble
    }
}
