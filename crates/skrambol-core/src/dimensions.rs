//! Displayed grid shape.

use crate::Position;

/// Number of columns in the default board.
pub const DEFAULT_COLS: u16 = 12;
/// Number of rows in the default board.
pub const DEFAULT_ROWS: u16 = 7;

/// Columns × rows of the displayed grid.
///
/// The tile count handed to the generator must equal `cols * rows`; building
/// both from one `GridDimensions` keeps them in agreement.
///
/// # Examples
///
/// ```
/// use skrambol_core::{GridDimensions, Position};
///
/// let dims = GridDimensions::new(3, 3).unwrap();
/// assert_eq!(dims.tile_count(), 9);
/// assert_eq!(dims.cell_of(Position::new(5)), Some((1, 1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    cols: u16,
    rows: u16,
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
        }
    }
}

impl GridDimensions {
    /// Creates grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`DimensionsError::Empty`] if either side is zero.
    pub fn new(cols: u16, rows: u16) -> Result<Self, DimensionsError> {
        if cols == 0 || rows == 0 {
            return Err(DimensionsError::Empty { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Returns the total number of tiles (`cols * rows`).
    #[must_use]
    pub fn tile_count(&self) -> usize {
        usize::from(self.cols) * usize::from(self.rows)
    }

    /// Returns the 0-based `(column, row)` of a slot, or `None` if the slot is
    /// outside this grid.
    #[must_use]
    pub fn cell_of(&self, pos: Position) -> Option<(u16, u16)> {
        let index = pos.index();
        if index >= self.tile_count() {
            return None;
        }
        let cols = usize::from(self.cols);
        let col = u16::try_from(index % cols).ok()?;
        let row = u16::try_from(index / cols).ok()?;
        Some((col, row))
    }
}

/// Errors produced when building [`GridDimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DimensionsError {
    /// One of the sides was zero.
    #[display("grid must have at least one column and one row (got {cols}x{rows})")]
    Empty {
        /// Requested column count.
        cols: u16,
        /// Requested row count.
        rows: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_twelve_by_seven() {
        let dims = GridDimensions::default();
        assert_eq!(dims.cols(), 12);
        assert_eq!(dims.rows(), 7);
        assert_eq!(dims.tile_count(), 84);
    }

    #[test]
    fn test_cell_of_is_row_major() {
        let dims = GridDimensions::new(4, 2).unwrap();
        assert_eq!(dims.cell_of(Position::new(1)), Some((0, 0)));
        assert_eq!(dims.cell_of(Position::new(4)), Some((3, 0)));
        assert_eq!(dims.cell_of(Position::new(5)), Some((0, 1)));
        assert_eq!(dims.cell_of(Position::new(8)), Some((3, 1)));
        assert_eq!(dims.cell_of(Position::new(9)), None);
    }

    #[test]
    fn test_zero_side_is_rejected() {
        assert_eq!(
            GridDimensions::new(0, 3),
            Err(DimensionsError::Empty { cols: 0, rows: 3 })
        );
        assert!(GridDimensions::new(3, 0).is_err());
    }
}
