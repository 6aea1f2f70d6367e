//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - 8x8 mailbox storage with placement/removal/query primitives
//! - [`SquareSet`] - compact sets of board cells for move results
//! - [`movegen`] - per-piece reachable-cell generation
//! - [`ChessMatch`] - the match state machine: validation, apply/rollback,
//!   check and checkmate detection, castling, en passant and promotion
//!
//! # Architecture
//!
//! Queries flow one way (match -> board -> piece generators) and mutation
//! flows the other (the match issues placement and removal commands to the
//! board, informed by generated move sets). The board knows nothing about
//! the rules; the generators know nothing about turn order; the match owns
//! everything that spans a move.
//!
//! # Example
//!
//! ```
//! use chess_match::ChessMatch;
//!
//! let mut game = ChessMatch::new();
//! let start = "e2".parse().unwrap();
//! let end = "e4".parse().unwrap();
//! let captured = game.perform_move(start, end).unwrap();
//! assert!(captured.is_none());
//! assert_eq!(game.turn(), 2);
//! ```

mod board;
mod game;
pub mod movegen;
mod square_set;

pub use board::{Board, BoardSnapshot};
pub use game::{ChessMatch, MatchError};
pub use movegen::{attacked_by, can_reach, reachable_from, MoveContext};
pub use square_set::{MoveMatrix, SquareSet, SquareSetIter};
