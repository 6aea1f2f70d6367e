//! Per-piece move generation.
//!
//! [`reachable_from`] produces the set of cells the piece on a given cell
//! can reach given current board occupancy, ignoring whether the move would
//! expose its own king (the match layer filters that by simulation). The
//! six piece kinds form a closed set, so generation dispatches on
//! [`PieceKind`] rather than through a trait object.
//!
//! Match-wide context a generator needs (the en-passant-vulnerable cell,
//! whether castling is considered) is passed in explicitly through
//! [`MoveContext`]; generators are pure functions of board and context.

use chess_core::{Color, GridPos, Piece, PieceKind};

use crate::{Board, SquareSet};

const ROOK_RAYS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_RAYS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Match-wide inputs to move generation.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext {
    /// Cell of the pawn that is currently en-passant-vulnerable, if any.
    en_passant: Option<GridPos>,
    /// Whether king generation considers castling. Disabled when computing
    /// attack coverage, since castling never attacks a cell and the safety
    /// test must not recurse into opponent castling.
    include_castling: bool,
}

impl MoveContext {
    /// Full generation context for the side to move.
    #[inline]
    pub const fn new(en_passant: Option<GridPos>) -> Self {
        MoveContext {
            en_passant,
            include_castling: true,
        }
    }

    /// Context for attack-coverage queries (check tests, castling safety).
    #[inline]
    pub const fn attacks() -> Self {
        MoveContext {
            en_passant: None,
            include_castling: false,
        }
    }
}

/// Returns the set of cells the piece on `at` can reach. Empty when the
/// cell is empty.
pub fn reachable_from(board: &Board, at: GridPos, ctx: MoveContext) -> SquareSet {
    let Some(piece) = board.piece_at(at) else {
        return SquareSet::EMPTY;
    };
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, at, piece, ctx),
        PieceKind::Knight => step_moves(board, at, piece, &KNIGHT_JUMPS),
        PieceKind::Bishop => slider_moves(board, at, piece, &BISHOP_RAYS),
        PieceKind::Rook => slider_moves(board, at, piece, &ROOK_RAYS),
        PieceKind::Queen => {
            slider_moves(board, at, piece, &ROOK_RAYS) | slider_moves(board, at, piece, &BISHOP_RAYS)
        }
        PieceKind::King => king_moves(board, at, piece, ctx),
    }
}

/// Returns true if the piece on `at` can reach `target`.
#[inline]
pub fn can_reach(board: &Board, at: GridPos, target: GridPos, ctx: MoveContext) -> bool {
    reachable_from(board, at, ctx).contains(target)
}

/// Returns true if any piece of color `by` reaches `target`.
pub fn attacked_by(board: &Board, by: Color, target: GridPos) -> bool {
    board
        .iter()
        .filter(|(_, piece)| piece.color == by)
        .any(|(pos, _)| reachable_from(board, pos, MoveContext::attacks()).contains(target))
}

/// Walks each ray cell by cell: empty cells are reachable and the scan
/// continues, an opponent stops the ray after including its cell, an ally
/// stops the ray without including it.
fn slider_moves(board: &Board, at: GridPos, piece: Piece, rays: &[(i8, i8)]) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    for &(d_row, d_col) in rays {
        let mut cursor = at;
        while let Some(next) = cursor.offset(d_row, d_col) {
            match board.piece_at(next) {
                None => {
                    moves.insert(next);
                    cursor = next;
                }
                Some(other) => {
                    if other.color != piece.color {
                        moves.insert(next);
                    }
                    break;
                }
            }
        }
    }
    moves
}

/// Fixed-offset movement: on-board targets not occupied by an ally.
fn step_moves(board: &Board, at: GridPos, piece: Piece, offsets: &[(i8, i8)]) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    for &(d_row, d_col) in offsets {
        if let Some(target) = at.offset(d_row, d_col) {
            match board.piece_at(target) {
                Some(other) if other.color == piece.color => {}
                _ => moves.insert(target),
            }
        }
    }
    moves
}

fn king_moves(board: &Board, at: GridPos, piece: Piece, ctx: MoveContext) -> SquareSet {
    let mut moves = step_moves(board, at, piece, &KING_STEPS);
    if ctx.include_castling && !piece.has_moved() && !attacked_by(board, piece.color.opposite(), at)
    {
        // Kingside: rook three columns to the right, two cells between.
        if let Some(target) = castling_target(board, at, piece.color, 3, &[1, 2]) {
            moves.insert(target);
        }
        // Queenside: rook four columns to the left, three cells between.
        if let Some(target) = castling_target(board, at, piece.color, -4, &[-1, -2, -3]) {
            moves.insert(target);
        }
    }
    moves
}

/// Returns the king's castling destination if every condition holds: an
/// unmoved same-color rook on the expected corner, the cells strictly
/// between king and rook empty, and neither the transit cell nor the
/// destination attacked. The first two `between` deltas are the transit
/// and destination columns.
fn castling_target(
    board: &Board,
    king_at: GridPos,
    color: Color,
    rook_delta: i8,
    between: &[i8],
) -> Option<GridPos> {
    let corner = king_at.offset(0, rook_delta)?;
    match board.piece_at(corner) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.color == color && !rook.has_moved() => {}
        _ => return None,
    }
    for &d_col in between {
        let cell = king_at.offset(0, d_col)?;
        if board.is_occupied(cell) {
            return None;
        }
    }
    let transit = king_at.offset(0, between[0])?;
    let target = king_at.offset(0, between[1])?;
    let opponent = color.opposite();
    if attacked_by(board, opponent, transit) || attacked_by(board, opponent, target) {
        return None;
    }
    Some(target)
}

fn pawn_moves(board: &Board, at: GridPos, piece: Piece, ctx: MoveContext) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    let dir = piece.color.pawn_direction();

    // Forward onto empty cells; the double step needs an unmoved pawn and
    // both cells free.
    if let Some(one) = at.offset(dir, 0) {
        if !board.is_occupied(one) {
            moves.insert(one);
            if !piece.has_moved() {
                if let Some(two) = at.offset(2 * dir, 0) {
                    if !board.is_occupied(two) {
                        moves.insert(two);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        // Diagonal capture onto an opponent-occupied cell.
        if let Some(diag) = at.offset(dir, d_col) {
            match board.piece_at(diag) {
                Some(other) if other.color != piece.color => moves.insert(diag),
                _ => {}
            }
        }
        // En passant: the vulnerable pawn stands beside this one, and the
        // empty cell diagonally behind it is reachable.
        if let (Some(side), Some(vulnerable)) = (at.offset(0, d_col), ctx.en_passant) {
            if side == vulnerable {
                match board.piece_at(side) {
                    Some(other) if other.kind == PieceKind::Pawn && other.color != piece.color => {
                        if let Some(behind) = at.offset(dir, d_col) {
                            moves.insert(behind);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    moves
}
