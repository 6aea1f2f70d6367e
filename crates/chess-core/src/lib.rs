//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`ChessCoordinate`], [`File`] and [`Rank`] for human-facing coordinates
//! - [`GridPos`] for the internal zero-based grid
//! - [`RuleViolation`] and [`InternalError`] for the error taxonomy

mod color;
mod coordinate;
mod error;
mod grid;
mod piece;

pub use color::Color;
pub use coordinate::{ChessCoordinate, File, Rank};
pub use error::{InternalError, RuleViolation};
pub use grid::GridPos;
pub use piece::{Piece, PieceKind};
