//! Win handoff.
//!
//! When a session is won it produces a [`WinPayload`]. The caller turns it
//! into a [`GameRecord`] for a named player and hands that to a
//! [`SubmissionSink`], which owns whatever happens next (a score server, a
//! local table, ...). [`LocalLeaderboard`] is the in-process sink.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use skrambol_core::{Arrangement, Position};
use skrambol_game::Progress;

pub use self::{
    leaderboard::{LEADERBOARD_LIMIT, LocalLeaderboard},
    player_name::{PlayerName, PlayerNameError},
};
use crate::{config::Difficulty, puzzle::PuzzleId};

mod leaderboard;
mod player_name;

/// Final state of a won session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinPayload {
    /// Puzzle that was solved.
    pub puzzle_id: PuzzleId,
    /// Play time at the moment the timer froze.
    pub final_elapsed: Duration,
    /// The solved live arrangement.
    pub final_arrangement: Arrangement,
    /// Progress of the final arrangement.
    pub progress: Progress,
}

impl WinPayload {
    /// Returns the final play time in whole milliseconds, saturating.
    #[must_use]
    pub fn final_elapsed_ms(&self) -> u64 {
        u64::try_from(self.final_elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// A finished game as submitted for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Puzzle that was played.
    pub puzzle_id: PuzzleId,
    /// Who played it.
    #[serde(with = "player_name_serde")]
    pub player: PlayerName,
    /// Final current position of each tile.
    pub piece_positions: Vec<u32>,
    /// Play time in milliseconds.
    pub time_spent_ms: u64,
    /// Completion rounded to a whole percent.
    pub completion_percentage: u8,
    /// `true` if the puzzle was solved.
    pub is_finished: bool,
    /// Difficulty played at.
    pub difficulty_level: Difficulty,
}

impl GameRecord {
    /// Builds the record for a won session.
    #[must_use]
    pub fn from_win(payload: &WinPayload, player: PlayerName, difficulty: Difficulty) -> Self {
        Self {
            puzzle_id: payload.puzzle_id.clone(),
            player,
            piece_positions: payload
                .final_arrangement
                .current_positions()
                .into_iter()
                .map(Position::value)
                .collect(),
            time_spent_ms: payload.final_elapsed_ms(),
            completion_percentage: payload.progress.rounded_percent(),
            is_finished: payload.progress.is_win(),
            difficulty_level: difficulty,
        }
    }

    /// Checks the record before submission.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an empty puzzle id, no piece
    /// positions, or a completion above 100 %.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        if self.puzzle_id.is_empty() {
            return Err(SubmissionError::MissingPuzzleId);
        }
        if self.piece_positions.is_empty() {
            return Err(SubmissionError::MissingPositions);
        }
        if self.completion_percentage > 100 {
            return Err(SubmissionError::CompletionOutOfRange {
                value: self.completion_percentage,
            });
        }
        Ok(())
    }
}

mod player_name_serde {
    use serde::{Deserialize as _, Deserializer, Serializer, de::Error as _};

    use super::PlayerName;

    pub(super) fn serialize<S>(name: &PlayerName, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(name)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<PlayerName, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

/// Receives finished games.
pub trait SubmissionSink {
    /// Accepts one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is invalid or cannot be stored.
    fn submit(&mut self, record: GameRecord) -> Result<(), SubmissionError>;
}

impl<T> SubmissionSink for &mut T
where
    T: SubmissionSink + ?Sized,
{
    fn submit(&mut self, record: GameRecord) -> Result<(), SubmissionError> {
        (**self).submit(record)
    }
}

/// Errors from submitting a [`GameRecord`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SubmissionError {
    /// The record names no puzzle.
    #[display("game record has no puzzle id")]
    MissingPuzzleId,
    /// The record has no piece positions.
    #[display("game record has no piece positions")]
    MissingPositions,
    /// The completion is above 100 %.
    #[display("completion percentage {value} exceeds 100")]
    CompletionOutOfRange {
        /// The recorded value.
        value: u8,
    },
    /// The sink refused an otherwise valid record.
    #[display("submission rejected: {reason}")]
    Rejected {
        /// Why the sink refused it.
        reason: String,
    },
}
