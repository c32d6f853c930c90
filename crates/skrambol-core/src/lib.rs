//! Core data structures for tile-swap puzzles.
//!
//! This crate provides the data model shared by grid generation, progress
//! evaluation, and session management.
//!
//! # Overview
//!
//! - [`position`]: 1-based grid slots ([`Position`])
//! - [`tile`]: movable tiles ([`Tile`], [`TileId`])
//! - [`dimensions`]: the displayed grid shape ([`GridDimensions`])
//! - [`arrangement`]: ordered tile sequences that always hold a permutation
//!   of positions ([`Arrangement`])
//!
//! # Examples
//!
//! ```
//! use skrambol_core::{Arrangement, Position, TileId};
//!
//! let mut arrangement = Arrangement::solved(4);
//! arrangement.swap_tiles(TileId::new(1), TileId::new(3)).unwrap();
//!
//! assert_eq!(arrangement.tiles()[0].current(), Position::new(3));
//! assert_eq!(arrangement.tiles()[2].current(), Position::new(1));
//! ```

pub mod arrangement;
pub mod dimensions;
pub mod position;
pub mod tile;

pub use self::{
    arrangement::{Arrangement, ArrangementError, SwapOutcome},
    dimensions::{DimensionsError, GridDimensions},
    position::Position,
    tile::{Tile, TileId},
};
