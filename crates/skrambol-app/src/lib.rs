//! Session layer for the skrambol tile puzzle.
//!
//! This crate ties the lower layers together into a playable session:
//!
//! - [`session`]: the puzzle session controller (`Loading -> Playing -> Won`)
//! - [`persistence`]: durable snapshots of an in-progress session
//! - [`submission`]: the win handoff to a score sink
//! - [`config`] and [`puzzle`]: inputs the controller is built from
//!
//! # Examples
//!
//! ```
//! use skrambol_app::{
//!     config::SessionConfig,
//!     persistence::MemoryStore,
//!     puzzle::PuzzleInfo,
//!     session::{LoadOutcome, PuzzleSession},
//! };
//! use skrambol_core::GridDimensions;
//! use skrambol_game::ManualClock;
//!
//! let config = SessionConfig::default().with_dimensions(GridDimensions::new(3, 3).unwrap());
//! let mut session = PuzzleSession::new(config, MemoryStore::default(), ManualClock::new());
//!
//! let outcome = session
//!     .load(PuzzleInfo::new("sunset", "https://example.com/sunset.jpg", "Sunset"))
//!     .unwrap();
//! assert!(matches!(outcome, LoadOutcome::Fresh { .. }));
//! assert_eq!(session.pieces().map(|p| p.len()), Some(9));
//! ```

pub mod config;
pub mod persistence;
pub mod puzzle;
pub mod session;
pub mod submission;
pub mod version;
