use skrambol_core::Arrangement;

/// How close a live arrangement is to its solved reference.
///
/// # Example
///
/// ```
/// use skrambol_core::{Arrangement, TileId};
/// use skrambol_game::evaluate;
///
/// let solution = Arrangement::solved(4);
/// let mut pieces = solution.clone();
/// pieces.swap_tiles(TileId::new(1), TileId::new(2)).unwrap();
///
/// let progress = evaluate(&pieces, &solution).unwrap();
/// assert_eq!(progress.correct(), 2);
/// assert_eq!(progress.rounded_percent(), 50);
/// assert!(!progress.is_win());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Progress {
    correct: usize,
    total: usize,
}

impl Progress {
    /// Returns the number of slots whose tile matches the reference.
    #[must_use]
    pub const fn correct(&self) -> usize {
        self.correct
    }

    /// Returns the number of slots compared.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns the exact percentage of matching slots in `0.0..=100.0`.
    ///
    /// An empty grid is trivially complete and reports `100.0`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        100.0 * self.correct as f64 / self.total as f64
    }

    /// Returns the percentage rounded to the nearest whole number.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percent(&self) -> u8 {
        self.percent().round().clamp(0.0, 100.0) as u8
    }

    /// Returns `true` if every slot matches the reference.
    #[must_use]
    pub const fn is_win(&self) -> bool {
        self.correct == self.total
    }
}

/// Compares `pieces` against `solution` slot by slot.
///
/// The comparison is strictly positional: index `i` of `pieces` is compared
/// with index `i` of `solution` on current position, regardless of tile id.
///
/// # Errors
///
/// Returns [`ProgressError::LengthMismatch`] if the two arrangements have
/// different lengths. Such a pair never counts as a win.
pub fn evaluate(pieces: &Arrangement, solution: &Arrangement) -> Result<Progress, ProgressError> {
    if pieces.len() != solution.len() {
        return Err(ProgressError::LengthMismatch {
            pieces: pieces.len(),
            solution: solution.len(),
        });
    }
    let correct = pieces
        .iter()
        .zip(solution)
        .filter(|(piece, solved)| piece.current() == solved.current())
        .count();
    Ok(Progress {
        correct,
        total: solution.len(),
    })
}

/// Errors returned by [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProgressError {
    /// The arrangements describe grids of different sizes.
    #[display("cannot compare {pieces} pieces against a {solution}-tile solution")]
    LengthMismatch {
        /// Length of the live arrangement.
        pieces: usize,
        /// Length of the solved reference.
        solution: usize,
    },
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use skrambol_core::{Position, TileId};
    use skrambol_generator::GridGenerator;

    use super::*;

    fn arrangement(values: &[u32]) -> Arrangement {
        let positions: Vec<Position> = values.iter().copied().map(Position::new).collect();
        Arrangement::solved(values.len())
            .with_current_positions(&positions)
            .unwrap()
    }

    #[test]
    fn test_solution_against_itself_is_a_win() {
        let solution = Arrangement::solved(84);
        let progress = evaluate(&solution, &solution).unwrap();
        assert_eq!(progress.percent(), 100.0);
        assert_eq!(progress.rounded_percent(), 100);
        assert!(progress.is_win());
    }

    #[test]
    fn test_three_by_three_walkthrough() {
        let solution = Arrangement::solved(9);
        let mut pieces = arrangement(&[3, 1, 4, 2, 6, 5, 8, 7, 9]);

        let progress = evaluate(&pieces, &solution).unwrap();
        assert_eq!(progress.correct(), 1);
        assert_eq!(progress.rounded_percent(), 11);
        assert!(!progress.is_win());

        // Tile 1 sits at 3 and tile 2 sits at 1: swapping them puts 1 home.
        pieces.swap_tiles(TileId::new(1), TileId::new(2)).unwrap();
        assert_eq!(
            pieces.current_positions(),
            arrangement(&[1, 3, 4, 2, 6, 5, 8, 7, 9]).current_positions()
        );
        let progress = evaluate(&pieces, &solution).unwrap();
        assert_eq!(progress.correct(), 2);
        assert!(!progress.is_win());

        for (a, b) in [(2, 4), (3, 4), (5, 6), (7, 8)] {
            pieces.swap_tiles(TileId::new(a), TileId::new(b)).unwrap();
        }
        let progress = evaluate(&pieces, &solution).unwrap();
        assert_eq!(pieces, solution);
        assert!(progress.is_win());
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let result = evaluate(&Arrangement::solved(3), &Arrangement::solved(4));
        assert_eq!(
            result,
            Err(ProgressError::LengthMismatch {
                pieces: 3,
                solution: 4
            })
        );
    }

    #[test]
    fn test_empty_grid_is_complete() {
        let empty = Arrangement::solved(0);
        let progress = evaluate(&empty, &empty).unwrap();
        assert_eq!(progress.percent(), 100.0);
        assert!(progress.is_win());
    }

    #[test]
    fn test_generated_grid_is_scored() {
        let grid = GridGenerator::new(84).generate();
        let progress = evaluate(&grid.pieces, &grid.solution).unwrap();
        assert_eq!(progress.total(), 84);
        assert_eq!(progress.correct(), grid.pieces.home_count());
    }

    proptest! {
        #[test]
        fn percent_counts_mismatches(
            len in 2usize..60,
            swaps in prop::collection::vec((0usize..60, 0usize..60), 1..20),
        ) {
            let solution = Arrangement::solved(len);
            let mut pieces = solution.clone();
            for (a, b) in swaps {
                let a = TileId::new(u32::try_from(a % len).unwrap() + 1);
                let b = TileId::new(u32::try_from(b % len).unwrap() + 1);
                pieces.swap_tiles(a, b).unwrap();
            }
            let mismatched = len - pieces.home_count();
            let progress = evaluate(&pieces, &solution).unwrap();

            prop_assert_eq!(progress.correct(), len - mismatched);
            let expected = 100.0 * (len - mismatched) as f64 / len as f64;
            prop_assert!((progress.percent() - expected).abs() < 1e-9);
            prop_assert!(progress.percent() < 100.0 || mismatched == 0);
            prop_assert_eq!(progress.is_win(), mismatched == 0);
        }
    }
}
