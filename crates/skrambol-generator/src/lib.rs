//! Scrambled grid generation.
//!
//! Builds the solved reference for a grid and a shuffled live arrangement
//! derived from it. Shuffles are driven by a [`GridSeed`], so the same seed
//! always yields the same scramble.
//!
//! # Examples
//!
//! ```
//! use skrambol_generator::GridGenerator;
//!
//! let grid = GridGenerator::new(9).generate();
//! assert_eq!(grid.pieces.len(), 9);
//! assert_eq!(grid.solution.home_count(), 9);
//! ```

use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64;
use skrambol_core::{Arrangement, GridDimensions};

pub use self::seed::{GridSeed, SeedParseError};

mod seed;

/// Output of [`GridGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGrid {
    /// The live arrangement to play, with shuffled current positions.
    pub pieces: Arrangement,
    /// The solved reference; every tile is at home.
    pub solution: Arrangement,
    /// The seed the shuffle was drawn from.
    pub seed: GridSeed,
}

/// Generates solved references and their scrambles.
///
/// Generators hold no mutable state, so repeated calls are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGenerator {
    tile_count: usize,
}

impl GridGenerator {
    /// Creates a generator for `tile_count` tiles.
    #[must_use]
    pub const fn new(tile_count: usize) -> Self {
        Self { tile_count }
    }

    /// Creates a generator whose tile count matches a displayed grid.
    #[must_use]
    pub fn for_dimensions(dimensions: GridDimensions) -> Self {
        Self::new(dimensions.tile_count())
    }

    /// Returns the number of tiles generated grids contain.
    #[must_use]
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Generates a grid from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedGrid {
        self.generate_with_seed(GridSeed::random())
    }

    /// Generates a grid deterministically from `seed`.
    ///
    /// The current positions `1..=N` are permuted with an unbiased
    /// Fisher–Yates shuffle (for `i` from `N-1` down to `1`, swap slot `i`
    /// with a uniformly chosen slot in `0..=i`). Ids and home positions are
    /// left untouched. With `N <= 1` the shuffle is a no-op.
    #[must_use]
    pub fn generate_with_seed(&self, seed: GridSeed) -> GeneratedGrid {
        let solution = Arrangement::solved(self.tile_count);
        let mut positions = solution.current_positions();
        let mut rng = Pcg64::from_seed(*seed.as_bytes());
        positions.shuffle(&mut rng);

        #[expect(clippy::missing_panics_doc)]
        let pieces = solution
            .with_current_positions(&positions)
            .expect("a shuffle of 1..=N is a permutation of 1..=N");

        GeneratedGrid {
            pieces,
            solution,
            seed,
        }
    }

    /// Generates a grid that is one swap away from solved.
    ///
    /// The first two tiles exchange positions; every other tile is at home.
    /// Useful for demos and for practising the win flow. With fewer than two
    /// tiles the result is already solved.
    #[must_use]
    pub fn generate_nearly_solved(&self) -> GeneratedGrid {
        let solution = Arrangement::solved(self.tile_count);
        let mut pieces = solution.clone();
        if let [first, second, ..] = solution.tiles() {
            let _ = pieces.swap_tiles(first.id(), second.id());
        }
        GeneratedGrid {
            pieces,
            solution,
            seed: GridSeed::from_bytes([0; 32]),
        }
    }
}

/// Generates a scrambled grid of `size` tiles from a random seed.
///
/// Shorthand for `GridGenerator::new(size).generate()`.
#[must_use]
pub fn generate_grid(size: usize) -> GeneratedGrid {
    GridGenerator::new(size).generate()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use skrambol_core::Position;

    use super::*;

    const SEED: &str = "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3";

    fn seed() -> GridSeed {
        SEED.parse().unwrap()
    }

    #[test]
    fn test_same_seed_same_scramble() {
        let generator = GridGenerator::new(84);
        let a = generator.generate_with_seed(seed());
        let b = generator.generate_with_seed(seed());
        assert_eq!(a, b);
        assert_eq!(a.seed, seed());
    }

    #[test]
    fn test_different_seeds_differ() {
        let generator = GridGenerator::new(84);
        let a = generator.generate_with_seed(GridSeed::derive("one"));
        let b = generator.generate_with_seed(GridSeed::derive("two"));
        // 84! possible scrambles; a collision here means the seed is ignored.
        assert_ne!(a.pieces, b.pieces);
        assert_eq!(a.solution, b.solution);
    }

    #[test]
    fn test_degenerate_sizes_are_solved() {
        for size in [0, 1] {
            let grid = generate_grid(size);
            assert_eq!(grid.pieces, grid.solution);
            assert_eq!(grid.pieces.len(), size);
        }
    }

    #[test]
    fn test_for_dimensions_matches_tile_count() {
        let dims = GridDimensions::new(3, 3).unwrap();
        let generator = GridGenerator::for_dimensions(dims);
        assert_eq!(generator.tile_count(), 9);
        assert_eq!(generator.generate().pieces.len(), 9);
    }

    #[test]
    fn test_nearly_solved_is_one_swap_away() {
        let grid = GridGenerator::new(9).generate_nearly_solved();
        assert_eq!(grid.pieces.home_count(), 7);
        assert_eq!(grid.pieces.tiles()[0].current(), Position::new(2));
        assert_eq!(grid.pieces.tiles()[1].current(), Position::new(1));

        let tiny = GridGenerator::new(1).generate_nearly_solved();
        assert_eq!(tiny.pieces, tiny.solution);
    }

    proptest! {
        #[test]
        fn pieces_are_a_permutation(size in 1usize..150, bytes in any::<[u8; 32]>()) {
            let grid = GridGenerator::new(size).generate_with_seed(GridSeed::from_bytes(bytes));
            let positions: HashSet<u32> =
                grid.pieces.iter().map(|tile| tile.current().value()).collect();
            let expected: HashSet<u32> = (1..=u32::try_from(size).unwrap()).collect();
            prop_assert_eq!(grid.pieces.len(), size);
            prop_assert_eq!(positions, expected);
        }

        #[test]
        fn shuffle_touches_only_current_positions(size in 1usize..150, bytes in any::<[u8; 32]>()) {
            let grid = GridGenerator::new(size).generate_with_seed(GridSeed::from_bytes(bytes));
            for (piece, solved) in grid.pieces.iter().zip(&grid.solution) {
                prop_assert_eq!(piece.id(), solved.id());
                prop_assert_eq!(piece.home(), solved.home());
                prop_assert_eq!(solved.current(), solved.home());
            }
        }
    }
}
