//! Grid slot representation.

use std::fmt::{self, Display};

/// A 1-based slot in the puzzle grid.
///
/// Slots are numbered in row-major order starting at 1, so a grid with `N`
/// tiles has positions `1..=N`.
///
/// # Examples
///
/// ```
/// use skrambol_core::Position;
///
/// let pos = Position::new(5);
/// assert_eq!(pos.value(), 5);
/// assert_eq!(pos.index(), 4);
///
/// assert_eq!(Position::try_new(0), None);
/// assert_eq!(Position::from_index(0), Position::new(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u32);

impl Position {
    /// The first slot of every grid.
    pub const FIRST: Self = Self(1);

    /// Creates a position from its 1-based value.
    ///
    /// # Panics
    ///
    /// Panics if `value` is zero.
    ///
    /// ```should_panic
    /// use skrambol_core::Position;
    ///
    /// let _ = Position::new(0);
    /// ```
    #[must_use]
    pub const fn new(value: u32) -> Self {
        assert!(value > 0, "Invalid position value: 0");
        Self(value)
    }

    /// Creates a position from its 1-based value, returning `None` for zero.
    #[must_use]
    pub const fn try_new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    /// Creates a position from a 0-based sequence index.
    ///
    /// # Panics
    ///
    /// Panics if `index + 1` does not fit in a `u32`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let value = u32::try_from(index + 1).expect("grid index fits in u32");
        Self(value)
    }

    /// Returns the 1-based value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the 0-based index of this slot.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Iterates over `1..=count` in order.
    pub fn all(count: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..count).map(Self::from_index)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Position> for u32 {
    fn from(pos: Position) -> u32 {
        pos.value()
    }
}
