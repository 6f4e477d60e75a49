//! Compact, immutable chess move values for move generation and search.
//!
//! A [`Move`] is built once from its source and destination [`Occupant`]s,
//! classifies itself at construction time and afterwards only answers
//! read-only queries.

pub mod moves;
pub mod occupant;

pub use moves::{Move, MoveError, MoveKind, sort_best_first};
pub use occupant::Occupant;
