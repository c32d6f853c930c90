use serde::{Deserialize, Serialize};
use skrambol_core::Position;

use crate::{config::Difficulty, puzzle::PuzzleId};

/// Version written into every stored snapshot.
///
/// Documents with any other version are treated as absent.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A restorable copy of session progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Puzzle the progress belongs to.
    pub puzzle_id: PuzzleId,
    /// Current position of each tile, in arrangement order.
    pub positions: Vec<Position>,
    /// Elapsed play time in milliseconds.
    pub elapsed_ms: u64,
    /// Completion rounded to a whole percent.
    pub completion_percentage: u8,
    /// `true` once the puzzle has been solved.
    pub is_finished: bool,
    /// Difficulty the session was played at.
    pub difficulty: Option<Difficulty>,
}

/// Stored form of a [`SessionSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SessionSnapshotDto {
    pub(crate) version: u32,
    pub(crate) puzzle_id: String,
    pub(crate) piece_positions: Vec<u32>,
    pub(crate) time_spent_ms: u64,
    pub(crate) completion_percentage: u8,
    pub(crate) is_finished: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) difficulty_level: Option<Difficulty>,
}

impl From<&SessionSnapshot> for SessionSnapshotDto {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            puzzle_id: snapshot.puzzle_id.as_str().to_owned(),
            piece_positions: snapshot.positions.iter().copied().map(Position::value).collect(),
            time_spent_ms: snapshot.elapsed_ms,
            completion_percentage: snapshot.completion_percentage,
            is_finished: snapshot.is_finished,
            difficulty_level: snapshot.difficulty,
        }
    }
}

impl TryFrom<SessionSnapshotDto> for SessionSnapshot {
    type Error = SnapshotDtoError;

    fn try_from(dto: SessionSnapshotDto) -> Result<Self, Self::Error> {
        if dto.version != SNAPSHOT_VERSION {
            return Err(SnapshotDtoError::UnsupportedVersion { found: dto.version });
        }
        if dto.completion_percentage > 100 {
            return Err(SnapshotDtoError::CompletionOutOfRange {
                value: dto.completion_percentage,
            });
        }
        let positions = dto
            .piece_positions
            .iter()
            .map(|&value| Position::try_new(value).ok_or(SnapshotDtoError::ZeroPosition))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            puzzle_id: PuzzleId::new(dto.puzzle_id),
            positions,
            elapsed_ms: dto.time_spent_ms,
            completion_percentage: dto.completion_percentage,
            is_finished: dto.is_finished,
            difficulty: dto.difficulty_level,
        })
    }
}

/// Reasons a stored snapshot document is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SnapshotDtoError {
    /// The document was written by an incompatible version.
    #[display("unsupported snapshot version {found}")]
    UnsupportedVersion {
        /// Version found in the document.
        found: u32,
    },
    /// A stored position is zero.
    #[display("stored positions are 1-based, found 0")]
    ZeroPosition,
    /// The stored completion exceeds 100 %.
    #[display("completion percentage {value} exceeds 100")]
    CompletionOutOfRange {
        /// The stored value.
        value: u8,
    },
}
