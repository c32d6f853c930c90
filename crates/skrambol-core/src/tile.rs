//! Movable puzzle tiles.

use std::fmt::{self, Display};

use crate::Position;

/// Stable identity of a tile within one session.
///
/// Identifiers are opaque; they never change when tiles move and never
/// collide within an [`Arrangement`](crate::Arrangement).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(u32);

impl TileId {
    /// Creates a tile identifier from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

/// One movable unit of the puzzle grid.
///
/// `home` is where the tile belongs in the solved image and never changes.
/// `current` is where the tile sits right now; only an
/// [`Arrangement`](crate::Arrangement) may move it, so the permutation
/// invariant cannot be broken from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    home: Position,
    current: Position,
}

impl Tile {
    /// Creates a tile.
    #[must_use]
    pub const fn new(id: TileId, home: Position, current: Position) -> Self {
        Self { id, home, current }
    }

    /// Returns the tile identifier.
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Returns the slot this tile occupies in the solved image.
    #[must_use]
    pub const fn home(&self) -> Position {
        self.home
    }

    /// Returns the slot this tile currently occupies.
    #[must_use]
    pub const fn current(&self) -> Position {
        self.current
    }

    /// Returns `true` if the tile sits in its home slot.
    #[must_use]
    pub fn is_home(&self) -> bool {
        self.home == self.current
    }

    pub(crate) fn set_current(&mut self, current: Position) {
        self.current = current;
    }
}
