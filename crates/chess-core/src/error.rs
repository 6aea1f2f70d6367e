//! Rule and engine error taxonomy.
//!
//! Two classes of failure are kept apart so callers can tell an illegal
//! move from an engine bug:
//!
//! - [`RuleViolation`]: a rejected user action. The match state is left
//!   untouched; the caller reports the message and re-prompts.
//! - [`InternalError`]: a broken engine invariant. Should never occur in a
//!   correct build, but stays a catchable value so tests can assert on it.

use thiserror::Error;

use crate::{ChessCoordinate, Color};

/// A chess rule was violated by a user action. Recoverable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("invalid coordinate '{0}': valid values run from a1 to h8")]
    InvalidCoordinate(String),

    #[error("there is no piece on {0}")]
    EmptySquare(ChessCoordinate),

    #[error("the piece on {0} belongs to the opponent")]
    OpponentPiece(ChessCoordinate),

    #[error("the piece on {0} has no possible moves")]
    NoMovesAvailable(ChessCoordinate),

    #[error("the piece on {from} cannot move to {to}")]
    UnreachableTarget {
        from: ChessCoordinate,
        to: ChessCoordinate,
    },

    #[error("you cannot put your own king in check")]
    SelfCheck,
}

/// An engine invariant was broken. Indicates a bug, not a bad move.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InternalError {
    #[error("no {0} king on the board")]
    KingMissing(Color),

    #[error("there is no piece pending promotion")]
    NoPromotionPending,
}
