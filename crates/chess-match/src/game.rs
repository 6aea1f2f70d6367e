//! The match state machine.
//!
//! [`ChessMatch`] owns the board and the turn/check/checkmate/en-passant/
//! promotion state, validates and applies moves, and detects check and
//! checkmate by move simulation. Moves are applied through an explicit
//! move record so a rejected move can be rolled back bit-exactly: after
//! rollback, board occupancy, move counts and the captured list are
//! indistinguishable from before the attempt.

use chess_core::{
    ChessCoordinate, Color, File, GridPos, InternalError, Piece, PieceKind, Rank, RuleViolation,
};
use thiserror::Error;

use crate::board::{Board, BoardSnapshot};
use crate::movegen::{self, MoveContext};
use crate::square_set::{MoveMatrix, SquareSet};

/// Error type for match operations.
///
/// The two variants keep "illegal move" (re-prompt the user) and "engine
/// bug" (abort) distinguishable for callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// What a single applied move did to the board, in enough detail to be
/// undone exactly.
#[derive(Debug, Clone, Copy)]
struct MoveRecord {
    from: GridPos,
    to: GridPos,
    /// The captured piece and the cell it stood on. For en passant the
    /// cell differs from the move target.
    captured: Option<(GridPos, Piece)>,
    /// Rook relocation (corner, transit) performed as part of castling.
    rook_hop: Option<(GridPos, GridPos)>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A chess match in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessMatch {
    board: Board,
    /// Half-move counter; starts at 1 and increments after every completed
    /// half-move that does not end the match.
    turn: u32,
    current_player: Color,
    check: bool,
    checkmate: bool,
    /// Cell of the pawn that just advanced two squares, if any. Valid for
    /// exactly one subsequent half-move.
    en_passant: Option<GridPos>,
    /// Cell of the piece pending a promotion choice, if any.
    promoted: Option<GridPos>,
    /// Captured pieces in capture order.
    captured: Vec<Piece>,
}

impl Default for ChessMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessMatch {
    /// Creates a match with the standard initial setup, White to move.
    pub fn new() -> Self {
        let mut game = Self::with_position(Board::new(), Color::White);
        game.initial_setup();
        game
    }

    /// Creates a match from an arbitrary position.
    ///
    /// The position is taken as given: the check flag is computed when
    /// both kings are present, and checkmate is evaluated on the first
    /// move. Intended for fixtures and analysis of mid-game positions.
    pub fn with_position(board: Board, current_player: Color) -> Self {
        let mut game = ChessMatch {
            board,
            turn: 1,
            current_player,
            check: false,
            checkmate: false,
            en_passant: None,
            promoted: None,
            captured: Vec::new(),
        };
        if let Ok(flag) = game.is_in_check(current_player) {
            game.check = flag;
        }
        game
    }

    fn initial_setup(&mut self) {
        for (index, &file) in File::ALL.iter().enumerate() {
            self.place_initial(file, Rank::R1, BACK_RANK[index], Color::White);
            self.place_initial(file, Rank::R2, PieceKind::Pawn, Color::White);
            self.place_initial(file, Rank::R8, BACK_RANK[index], Color::Black);
            self.place_initial(file, Rank::R7, PieceKind::Pawn, Color::Black);
        }
    }

    fn place_initial(&mut self, file: File, rank: Rank, kind: PieceKind, color: Color) {
        let at = ChessCoordinate::new(file, rank).to_grid();
        self.board.place(Piece::new(kind, color), at);
    }

    /// Returns the half-move counter (starts at 1).
    #[inline]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the player to move.
    #[inline]
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Returns true if the player to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.check
    }

    /// Returns true if the match has ended in checkmate.
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Returns a reference to the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the 8x8 grid of (kind, color) pairs for display layers.
    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Returns the captured pieces in capture order.
    #[inline]
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    /// Returns the coordinate of the currently en-passant-vulnerable pawn.
    pub fn en_passant_vulnerable(&self) -> Option<ChessCoordinate> {
        self.en_passant.map(ChessCoordinate::from_grid)
    }

    /// Returns the piece awaiting a promotion choice, if any.
    pub fn pending_promotion(&self) -> Option<Piece> {
        self.promoted.and_then(|cell| self.board.piece_at(cell))
    }

    /// Returns the cells the piece on `start` can reach.
    ///
    /// Fails when the cell is empty, the piece belongs to the opponent,
    /// or the piece has nowhere to go.
    pub fn possible_moves(&self, start: ChessCoordinate) -> Result<SquareSet, RuleViolation> {
        self.reachable_or_fail(start.to_grid())
    }

    /// [`possible_moves`](Self::possible_moves) in the boolean-matrix form
    /// used for square highlighting.
    pub fn possible_moves_matrix(
        &self,
        start: ChessCoordinate,
    ) -> Result<MoveMatrix, RuleViolation> {
        self.possible_moves(start).map(SquareSet::to_matrix)
    }

    /// Moves the piece on `start` to `end`, returning the captured piece,
    /// if any.
    ///
    /// A move that would leave the mover's own king in check is rolled
    /// back completely and rejected; the match is then observably
    /// unchanged. A pawn reaching its last rank is promoted to a queen
    /// immediately; the choice can still be overridden through
    /// [`promote`](Self::promote) before the next operation.
    pub fn perform_move(
        &mut self,
        start: ChessCoordinate,
        end: ChessCoordinate,
    ) -> Result<Option<Piece>, MatchError> {
        let from = start.to_grid();
        let to = end.to_grid();
        let targets = self.reachable_or_fail(from)?;
        if !targets.contains(to) {
            return Err(RuleViolation::UnreachableTarget { from: start, to: end }.into());
        }

        let record = self.apply_move(from, to);
        match self.is_in_check(self.current_player) {
            Ok(false) => {}
            Ok(true) => {
                self.undo_move(record);
                return Err(RuleViolation::SelfCheck.into());
            }
            Err(err) => {
                self.undo_move(record);
                return Err(err.into());
            }
        }
        let captured = record.captured.map(|(_, piece)| piece);

        self.promoted = None;
        if let Some(mover) = self.board.piece_at(to) {
            if mover.kind == PieceKind::Pawn && to.row() == mover.color.promotion_row() {
                self.board.place(Piece::new(PieceKind::Queen, mover.color), to);
                self.promoted = Some(to);
            }
        }

        let opponent = self.current_player.opposite();
        self.check = self.is_in_check(opponent)?;
        if self.is_checkmated(opponent)? {
            self.checkmate = true;
        } else {
            self.next_turn();
        }

        self.en_passant = match self.board.piece_at(to) {
            Some(piece)
                if piece.kind == PieceKind::Pawn
                    && (to.row() as i8 - from.row() as i8).abs() == 2 =>
            {
                Some(to)
            }
            _ => None,
        };

        Ok(captured)
    }

    /// Replaces the piece pending promotion with a fresh piece of the
    /// requested type.
    ///
    /// Fails when no promotion is pending. A code outside B/N/R/Q leaves
    /// the pending piece in place and returns it unchanged, so the caller
    /// may ask again. A valid code swaps the piece, clears the pending
    /// state and returns the replacement.
    pub fn promote(&mut self, code: char) -> Result<Piece, MatchError> {
        let cell = self.promoted.ok_or(InternalError::NoPromotionPending)?;
        let pending = self
            .board
            .piece_at(cell)
            .expect("a promoted piece stands on the recorded cell");
        let Some(kind) = PieceKind::from_promotion_code(code) else {
            return Ok(pending);
        };
        let replacement = Piece::new(kind, pending.color);
        self.board.place(replacement, cell);
        self.promoted = None;
        Ok(replacement)
    }

    fn reachable_or_fail(&self, start: GridPos) -> Result<SquareSet, RuleViolation> {
        let coord = ChessCoordinate::from_grid(start);
        let piece = self
            .board
            .piece_at(start)
            .ok_or(RuleViolation::EmptySquare(coord))?;
        if piece.color != self.current_player {
            return Err(RuleViolation::OpponentPiece(coord));
        }
        let moves = movegen::reachable_from(&self.board, start, MoveContext::new(self.en_passant));
        if moves.is_empty() {
            return Err(RuleViolation::NoMovesAvailable(coord));
        }
        Ok(moves)
    }

    fn next_turn(&mut self) {
        self.turn += 1;
        self.current_player = self.current_player.opposite();
    }

    /// Applies a move, returning the record needed to undo it exactly.
    /// Handles the castling rook relocation and the en-passant capture of
    /// the passed-over pawn.
    fn apply_move(&mut self, from: GridPos, to: GridPos) -> MoveRecord {
        let mut mover = self
            .board
            .remove(from)
            .expect("a piece stands on the validated start cell");
        mover.move_count += 1;

        let mut captured = self.board.remove(to).map(|piece| (to, piece));

        // En passant: a pawn moving diagonally onto an empty cell captures
        // the pawn it passed.
        if mover.kind == PieceKind::Pawn && from.col() != to.col() && captured.is_none() {
            if let Some(passed) = to.offset(-mover.color.pawn_direction(), 0) {
                captured = self.board.remove(passed).map(|piece| (passed, piece));
            }
        }

        // Castling: a king moving two columns drags the corner rook to the
        // cell it crossed.
        let mut rook_hop = None;
        if mover.kind == PieceKind::King && (to.col() as i8 - from.col() as i8).abs() == 2 {
            let (corner, transit) = if to.col() > from.col() {
                (from.offset(0, 3), from.offset(0, 1))
            } else {
                (from.offset(0, -4), from.offset(0, -1))
            };
            if let (Some(corner), Some(transit)) = (corner, transit) {
                if let Some(mut rook) = self.board.remove(corner) {
                    rook.move_count += 1;
                    self.board.place(rook, transit);
                    rook_hop = Some((corner, transit));
                }
            }
        }

        self.board.place(mover, to);
        if let Some((_, piece)) = captured {
            self.captured.push(piece);
        }

        MoveRecord {
            from,
            to,
            captured,
            rook_hop,
        }
    }

    /// Exact inverse of [`apply_move`](Self::apply_move) given its record.
    fn undo_move(&mut self, record: MoveRecord) {
        let MoveRecord {
            from,
            to,
            captured,
            rook_hop,
        } = record;

        let mut mover = self
            .board
            .remove(to)
            .expect("apply placed the mover on the target cell");
        mover.move_count -= 1;
        self.board.place(mover, from);

        if let Some((cell, piece)) = captured {
            self.board.place(piece, cell);
            self.captured.pop();
        }

        if let Some((corner, transit)) = rook_hop {
            if let Some(mut rook) = self.board.remove(transit) {
                rook.move_count -= 1;
                self.board.place(rook, corner);
            }
        }
    }

    fn king_cell(&self, color: Color) -> Option<GridPos> {
        self.board
            .iter()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(pos, _)| pos)
    }

    /// Returns true if `color`'s king is attacked by any opposing piece.
    fn is_in_check(&self, color: Color) -> Result<bool, InternalError> {
        let king = self
            .king_cell(color)
            .ok_or(InternalError::KingMissing(color))?;
        Ok(movegen::attacked_by(&self.board, color.opposite(), king))
    }

    /// Returns true if `color` is in check and no move of any of its
    /// pieces escapes it. Every candidate is tried by apply, check test
    /// and undo; the board is unchanged afterwards.
    fn is_checkmated(&mut self, color: Color) -> Result<bool, InternalError> {
        if !self.is_in_check(color)? {
            return Ok(false);
        }
        let origins: Vec<GridPos> = self
            .board
            .iter()
            .filter(|(_, piece)| piece.color == color)
            .map(|(pos, _)| pos)
            .collect();
        for origin in origins {
            let targets =
                movegen::reachable_from(&self.board, origin, MoveContext::new(self.en_passant));
            for target in targets {
                let record = self.apply_move(origin, target);
                let still_in_check = self.is_in_check(color);
                self.undo_move(record);
                if !still_in_check? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}
