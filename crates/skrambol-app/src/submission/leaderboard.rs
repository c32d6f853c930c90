use super::{GameRecord, PlayerName, SubmissionError, SubmissionSink};
use crate::puzzle::PuzzleId;

/// Maximum number of entries [`LocalLeaderboard::entries_for`] returns.
pub const LEADERBOARD_LIMIT: usize = 100;

/// An in-memory per-puzzle leaderboard.
///
/// Only finished games are accepted. Entries rank by ascending play time;
/// equal times keep submission order.
///
/// # Examples
///
/// ```
/// use skrambol_app::{
///     config::Difficulty,
///     puzzle::PuzzleId,
///     submission::{GameRecord, LocalLeaderboard, PlayerName, SubmissionSink as _},
/// };
///
/// let record = |player: &str, ms| GameRecord {
///     puzzle_id: PuzzleId::new("p"),
///     player: PlayerName::new(player).unwrap(),
///     piece_positions: vec![1, 2],
///     time_spent_ms: ms,
///     completion_percentage: 100,
///     is_finished: true,
///     difficulty_level: Difficulty::Hard,
/// };
///
/// let mut board = LocalLeaderboard::default();
/// board.submit(record("slow", 90_000)).unwrap();
/// board.submit(record("fast", 30_000)).unwrap();
///
/// let names: Vec<_> = board
///     .entries_for(&PuzzleId::new("p"))
///     .iter()
///     .map(|r| r.player.name().to_owned())
///     .collect();
/// assert_eq!(names, ["fast", "slow"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalLeaderboard {
    records: Vec<GameRecord>,
}

impl LocalLeaderboard {
    /// Returns the number of accepted records across all puzzles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record was accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the ranked records for one puzzle, fastest first.
    #[must_use]
    pub fn entries_for(&self, puzzle_id: &PuzzleId) -> Vec<&GameRecord> {
        let mut entries: Vec<_> = self
            .records
            .iter()
            .filter(|record| record.puzzle_id == *puzzle_id)
            .collect();
        entries.sort_by_key(|record| record.time_spent_ms);
        entries.truncate(LEADERBOARD_LIMIT);
        entries
    }

    /// Returns the 1-based rank of `player`'s best time on a puzzle.
    #[must_use]
    pub fn rank_of(&self, puzzle_id: &PuzzleId, player: &PlayerName) -> Option<usize> {
        self.entries_for(puzzle_id)
            .iter()
            .position(|record| record.player == *player)
            .map(|index| index + 1)
    }
}

impl SubmissionSink for LocalLeaderboard {
    fn submit(&mut self, record: GameRecord) -> Result<(), SubmissionError> {
        record.validate()?;
        if !record.is_finished {
            return Err(SubmissionError::Rejected {
                reason: "only finished games are ranked".to_owned(),
            });
        }
        log::info!(
            "leaderboard: {} finished {} in {} ms",
            record.player,
            record.puzzle_id,
            record.time_spent_ms
        );
        self.records.push(record);
        Ok(())
    }
}
