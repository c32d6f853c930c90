//! Ordered tile sequences.

use std::{collections::HashSet, slice};

use crate::{Position, Tile, TileId};

/// An ordered sequence of tiles whose current positions form a permutation.
///
/// Every `Arrangement` upholds the tile invariant: for `N` tiles, the current
/// positions are exactly `{1..=N}`, the home positions are exactly
/// `{1..=N}`, and tile ids are unique. Constructors validate it and
/// [`swap_tiles`](Self::swap_tiles) preserves it.
///
/// The same type represents both the solved reference (every tile at home)
/// and the live arrangement being played.
///
/// # Examples
///
/// ```
/// use skrambol_core::{Arrangement, Position, SwapOutcome, TileId};
///
/// let solution = Arrangement::solved(3);
/// let scrambled = solution
///     .with_current_positions(&[Position::new(2), Position::new(1), Position::new(3)])
///     .unwrap();
/// assert!(!scrambled.tiles()[0].is_home());
///
/// let mut live = scrambled.clone();
/// let outcome = live.swap_tiles(TileId::new(1), TileId::new(2)).unwrap();
/// assert_eq!(outcome, SwapOutcome::Swapped);
/// assert_eq!(live, solution);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    tiles: Vec<Tile>,
}

impl Arrangement {
    /// Creates the solved arrangement of `count` tiles.
    ///
    /// Tile `i` (1-based) gets id `i`, home `i` and current position `i`.
    #[must_use]
    pub fn solved(count: usize) -> Self {
        let tiles = Position::all(count)
            .map(|pos| Tile::new(TileId::new(pos.value()), pos, pos))
            .collect();
        Self { tiles }
    }

    /// Creates an arrangement from tiles, validating the tile invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ArrangementError::DuplicateTile`] if two tiles share an id,
    /// [`ArrangementError::PositionOutOfRange`] if a home or current position
    /// exceeds the tile count, and [`ArrangementError::DuplicatePosition`] if
    /// two tiles share a home or current position.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, ArrangementError> {
        let len = tiles.len();
        let mut ids = HashSet::with_capacity(len);
        for tile in &tiles {
            if !ids.insert(tile.id()) {
                return Err(ArrangementError::DuplicateTile { id: tile.id() });
            }
        }
        check_permutation(tiles.iter().map(Tile::home), len)?;
        check_permutation(tiles.iter().map(Tile::current), len)?;
        Ok(Self { tiles })
    }

    /// Returns a copy of this arrangement with the given current positions.
    ///
    /// `positions[i]` becomes the current position of the `i`-th tile. Ids and
    /// home positions are carried over untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ArrangementError::LengthMismatch`] if `positions` has a
    /// different length than this arrangement, or a position error if the
    /// values are not a permutation of `1..=N`.
    pub fn with_current_positions(&self, positions: &[Position]) -> Result<Self, ArrangementError> {
        if positions.len() != self.tiles.len() {
            return Err(ArrangementError::LengthMismatch {
                expected: self.tiles.len(),
                actual: positions.len(),
            });
        }
        check_permutation(positions.iter().copied(), positions.len())?;

        let mut tiles = self.tiles.clone();
        for (tile, pos) in tiles.iter_mut().zip(positions) {
            tile.set_current(*pos);
        }
        Ok(Self { tiles })
    }

    /// Returns the number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the arrangement has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Returns the tiles in sequence order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterates over the tiles in sequence order.
    pub fn iter(&self) -> slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Returns the current positions in sequence order.
    #[must_use]
    pub fn current_positions(&self) -> Vec<Position> {
        self.tiles.iter().map(Tile::current).collect()
    }

    /// Returns the sequence index and tile for `id`.
    #[must_use]
    pub fn find(&self, id: TileId) -> Option<(usize, &Tile)> {
        self.tiles.iter().enumerate().find(|(_, tile)| tile.id() == id)
    }

    /// Returns the tile currently occupying `pos`.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.current() == pos)
    }

    /// Returns the number of tiles sitting in their home slot.
    #[must_use]
    pub fn home_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_home()).count()
    }

    /// Exchanges the current positions of two tiles.
    ///
    /// Swapping a tile with itself leaves the arrangement unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ArrangementError::UnknownTile`] if either id is not part of
    /// this arrangement. The arrangement is not modified in that case.
    pub fn swap_tiles(&mut self, a: TileId, b: TileId) -> Result<SwapOutcome, ArrangementError> {
        let (index_a, _) = self.find(a).ok_or(ArrangementError::UnknownTile { id: a })?;
        let (index_b, _) = self.find(b).ok_or(ArrangementError::UnknownTile { id: b })?;
        if index_a == index_b {
            return Ok(SwapOutcome::Unchanged);
        }

        let pos_a = self.tiles[index_a].current();
        let pos_b = self.tiles[index_b].current();
        self.tiles[index_a].set_current(pos_b);
        self.tiles[index_b].set_current(pos_a);
        Ok(SwapOutcome::Swapped)
    }
}

impl<'a> IntoIterator for &'a Arrangement {
    type Item = &'a Tile;
    type IntoIter = slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of [`Arrangement::swap_tiles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SwapOutcome {
    /// The two tiles exchanged positions.
    Swapped,
    /// Both ids named the same tile; nothing moved.
    Unchanged,
}

/// Violations of the tile invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ArrangementError {
    /// Two sequences that must align have different lengths.
    #[display("length mismatch: expected {expected} tiles, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
    /// A position is larger than the tile count.
    #[display("position {position} is out of range for {len} tiles")]
    PositionOutOfRange {
        /// The offending position.
        position: Position,
        /// Number of tiles.
        len: usize,
    },
    /// A position appears more than once.
    #[display("position {position} appears more than once")]
    DuplicatePosition {
        /// The repeated position.
        position: Position,
    },
    /// A tile id appears more than once.
    #[display("{id} appears more than once")]
    DuplicateTile {
        /// The repeated id.
        id: TileId,
    },
    /// A tile id is not part of the arrangement.
    #[display("{id} is not part of the arrangement")]
    UnknownTile {
        /// The missing id.
        id: TileId,
    },
}

fn check_permutation<I>(positions: I, len: usize) -> Result<(), ArrangementError>
where
    I: IntoIterator<Item = Position>,
{
    let mut seen = vec![false; len];
    for position in positions {
        let Some(slot) = seen.get_mut(position.index()) else {
            return Err(ArrangementError::PositionOutOfRange { position, len });
        };
        if *slot {
            return Err(ArrangementError::DuplicatePosition { position });
        }
        *slot = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn positions(values: &[u32]) -> Vec<Position> {
        values.iter().copied().map(Position::new).collect()
    }

    #[test]
    fn test_solved_places_every_tile_at_home() {
        let arrangement = Arrangement::solved(9);
        assert_eq!(arrangement.len(), 9);
        assert_eq!(arrangement.home_count(), 9);
        for (i, tile) in arrangement.iter().enumerate() {
            assert_eq!(tile.home(), Position::from_index(i));
            assert_eq!(tile.current(), Position::from_index(i));
        }
    }

    #[test]
    fn test_solved_degenerate_sizes() {
        assert!(Arrangement::solved(0).is_empty());
        assert_eq!(Arrangement::solved(1).home_count(), 1);
    }

    #[test]
    fn test_with_current_positions_keeps_ids_and_homes() {
        let solution = Arrangement::solved(9);
        let live = solution
            .with_current_positions(&positions(&[3, 1, 4, 2, 6, 5, 8, 7, 9]))
            .unwrap();

        for (live_tile, solved_tile) in live.iter().zip(&solution) {
            assert_eq!(live_tile.id(), solved_tile.id());
            assert_eq!(live_tile.home(), solved_tile.home());
        }
        assert_eq!(live.home_count(), 1);
        assert_eq!(live.tile_at(Position::new(3)).map(Tile::id), Some(TileId::new(1)));
    }

    #[test]
    fn test_with_current_positions_rejects_invalid_permutations() {
        let solution = Arrangement::solved(3);

        assert_eq!(
            solution.with_current_positions(&positions(&[1, 2])),
            Err(ArrangementError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            solution.with_current_positions(&positions(&[1, 2, 2])),
            Err(ArrangementError::DuplicatePosition {
                position: Position::new(2)
            })
        );
        assert_eq!(
            solution.with_current_positions(&positions(&[1, 2, 4])),
            Err(ArrangementError::PositionOutOfRange {
                position: Position::new(4),
                len: 3
            })
        );
    }

    #[test]
    fn test_from_tiles_validates_ids_and_positions() {
        let p = Position::new;
        let ok = Arrangement::from_tiles(vec![
            Tile::new(TileId::new(10), p(1), p(2)),
            Tile::new(TileId::new(20), p(2), p(1)),
        ]);
        assert!(ok.is_ok());

        let duplicate_id = Arrangement::from_tiles(vec![
            Tile::new(TileId::new(10), p(1), p(1)),
            Tile::new(TileId::new(10), p(2), p(2)),
        ]);
        assert_eq!(
            duplicate_id,
            Err(ArrangementError::DuplicateTile {
                id: TileId::new(10)
            })
        );

        let duplicate_home = Arrangement::from_tiles(vec![
            Tile::new(TileId::new(1), p(1), p(1)),
            Tile::new(TileId::new(2), p(1), p(2)),
        ]);
        assert!(matches!(
            duplicate_home,
            Err(ArrangementError::DuplicatePosition { .. })
        ));
    }

    #[test]
    fn test_swap_tiles() {
        let mut arrangement = Arrangement::solved(4);

        assert_eq!(
            arrangement.swap_tiles(TileId::new(1), TileId::new(4)),
            Ok(SwapOutcome::Swapped)
        );
        assert_eq!(arrangement.current_positions(), positions(&[4, 2, 3, 1]));

        assert_eq!(
            arrangement.swap_tiles(TileId::new(2), TileId::new(2)),
            Ok(SwapOutcome::Unchanged)
        );
        assert_eq!(arrangement.current_positions(), positions(&[4, 2, 3, 1]));
    }

    #[test]
    fn test_swap_unknown_tile_leaves_arrangement_untouched() {
        let mut arrangement = Arrangement::solved(4);
        let before = arrangement.clone();

        assert_eq!(
            arrangement.swap_tiles(TileId::new(1), TileId::new(99)),
            Err(ArrangementError::UnknownTile {
                id: TileId::new(99)
            })
        );
        assert_eq!(arrangement, before);
    }

    proptest! {
        #[test]
        fn swaps_preserve_the_permutation(
            len in 1usize..40,
            swaps in prop::collection::vec((0usize..40, 0usize..40), 0..60),
        ) {
            let mut arrangement = Arrangement::solved(len);
            for (a, b) in swaps {
                let a = TileId::new(u32::try_from(a % len).unwrap() + 1);
                let b = TileId::new(u32::try_from(b % len).unwrap() + 1);
                arrangement.swap_tiles(a, b).unwrap();
            }
            let rebuilt = Arrangement::from_tiles(arrangement.tiles().to_vec());
            prop_assert_eq!(rebuilt, Ok(arrangement));
        }
    }
}
