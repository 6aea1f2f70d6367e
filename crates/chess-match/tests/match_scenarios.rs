//! End-to-end scenarios for the match state machine.
//!
//! Each test drives a match through [`ChessMatch::perform_move`] the way a
//! console front end would, and asserts on the observable state only.

use chess_core::{ChessCoordinate, Color, GridPos, PieceKind, RuleViolation};
use chess_match::{ChessMatch, MatchError, SquareSet};
use proptest::prelude::*;

fn coord(s: &str) -> ChessCoordinate {
    s.parse().unwrap()
}

fn grid(s: &str) -> GridPos {
    coord(s).to_grid()
}

fn play(game: &mut ChessMatch, moves: &[(&str, &str)]) {
    for &(from, to) in moves {
        game.perform_move(coord(from), coord(to))
            .unwrap_or_else(|err| panic!("{}-{} should be legal: {}", from, to, err));
    }
}

#[test]
fn initial_pawn_double_step() {
    let mut game = ChessMatch::new();
    let captured = game.perform_move(coord("e2"), coord("e4")).unwrap();
    assert_eq!(captured, None);
    assert_eq!(game.en_passant_vulnerable(), Some(coord("e4")));
    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.turn(), 2);
    assert!(!game.in_check());

    let pawn = game.board().piece_at(grid("e4")).unwrap();
    assert_eq!(pawn.kind, PieceKind::Pawn);
    assert_eq!(pawn.move_count, 1);
    assert!(game.board().piece_at(grid("e2")).is_none());
}

#[test]
fn single_step_does_not_mark_en_passant() {
    let mut game = ChessMatch::new();
    play(&mut game, &[("e2", "e3")]);
    assert_eq!(game.en_passant_vulnerable(), None);
}

#[test]
fn en_passant_captures_the_passed_pawn() {
    let mut game = ChessMatch::new();
    play(
        &mut game,
        &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")],
    );
    assert_eq!(game.en_passant_vulnerable(), Some(coord("d5")));

    let moves = game.possible_moves(coord("e5")).unwrap();
    assert!(moves.contains(grid("d6")));

    let captured = game.perform_move(coord("e5"), coord("d6")).unwrap();
    let pawn = captured.expect("en passant captures the passed pawn");
    assert_eq!(pawn.kind, PieceKind::Pawn);
    assert_eq!(pawn.color, Color::Black);

    // The capturing pawn lands on d6; d5 is empty, not d6's old occupant.
    assert_eq!(
        game.board().piece_at(grid("d6")).map(|p| (p.kind, p.color)),
        Some((PieceKind::Pawn, Color::White))
    );
    assert!(game.board().piece_at(grid("d5")).is_none());
    assert_eq!(game.captured_pieces(), &[pawn]);
}

#[test]
fn en_passant_window_closes_after_one_half_move() {
    let mut game = ChessMatch::new();
    play(
        &mut game,
        &[
            ("e2", "e4"),
            ("a7", "a6"),
            ("e4", "e5"),
            ("d7", "d5"),
            // White declines the en passant capture...
            ("b1", "c3"),
            ("a6", "a5"),
        ],
    );
    // ...and the chance is gone.
    let moves = game.possible_moves(coord("e5")).unwrap();
    assert!(!moves.contains(grid("d6")));
}

#[test]
fn kingside_castling_relocates_both_pieces() {
    let mut game = ChessMatch::new();
    play(
        &mut game,
        &[
            ("g1", "f3"),
            ("a7", "a6"),
            ("e2", "e3"),
            ("b7", "b6"),
            ("f1", "e2"),
            ("a6", "a5"),
        ],
    );
    let moves = game.possible_moves(coord("e1")).unwrap();
    assert!(moves.contains(grid("g1")));

    let captured = game.perform_move(coord("e1"), coord("g1")).unwrap();
    assert_eq!(captured, None);

    let king = game.board().piece_at(grid("g1")).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(king.move_count, 1);
    let rook = game.board().piece_at(grid("f1")).unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert_eq!(rook.move_count, 1);
    assert!(game.board().piece_at(grid("e1")).is_none());
    assert!(game.board().piece_at(grid("h1")).is_none());
}

#[test]
fn promotion_auto_queens_then_accepts_override() {
    let mut game = ChessMatch::new();
    play(
        &mut game,
        &[
            ("a2", "a4"),
            ("h7", "h6"),
            ("a4", "a5"),
            ("h6", "h5"),
            ("a5", "a6"),
            ("h5", "h4"),
            ("a6", "b7"),
            ("h4", "h3"),
        ],
    );
    let captured = game.perform_move(coord("b7"), coord("a8")).unwrap();
    assert_eq!(captured.map(|p| p.kind), Some(PieceKind::Rook));

    // The pawn is auto-promoted to a queen and flagged for override.
    let pending = game.pending_promotion().unwrap();
    assert_eq!(pending.kind, PieceKind::Queen);
    assert_eq!(pending.color, Color::White);

    // An unknown code is a no-op that keeps the choice open.
    let unchanged = game.promote('K').unwrap();
    assert_eq!(unchanged.kind, PieceKind::Queen);
    assert!(game.pending_promotion().is_some());

    // A valid code swaps the piece in place and closes the window.
    let rook = game.promote('R').unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert_eq!(rook.color, Color::White);
    assert_eq!(
        game.board().piece_at(grid("a8")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(game.pending_promotion(), None);
    assert_eq!(
        game.promote('R'),
        Err(MatchError::Internal(
            chess_core::InternalError::NoPromotionPending
        ))
    );
}

#[test]
fn fools_mate_is_checkmate_and_keeps_the_turn() {
    let mut game = ChessMatch::new();
    play(
        &mut game,
        &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")],
    );
    let turn_before = game.turn();
    game.perform_move(coord("d8"), coord("h4")).unwrap();

    assert!(game.is_checkmate());
    assert!(game.in_check());
    // The mating side keeps the turn; the match is over.
    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.turn(), turn_before);
}

#[test]
fn self_check_is_rejected_and_rolls_back() {
    let mut game = ChessMatch::new();
    play(&mut game, &[("e2", "e4"), ("e7", "e5"), ("d1", "h5")]);

    let before_board = game.board_snapshot();
    let before_turn = game.turn();

    // f6 would open the h5-e8 diagonal onto the black king.
    let err = game.perform_move(coord("f7"), coord("f6")).unwrap_err();
    assert_eq!(err, MatchError::Rule(RuleViolation::SelfCheck));

    assert_eq!(game.board_snapshot(), before_board);
    assert_eq!(game.turn(), before_turn);
    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.captured_pieces().len(), 0);
    // The pawn is still there with its moves intact.
    let pawn = game.board().piece_at(grid("f7")).unwrap();
    assert_eq!(pawn.move_count, 0);
    assert!(game.possible_moves(coord("f7")).is_ok());
}

#[test]
fn possible_moves_is_idempotent() {
    let game = ChessMatch::new();
    let first = game.possible_moves(coord("b1")).unwrap();
    let second = game.possible_moves(coord("b1")).unwrap();
    assert_eq!(first, second);
    let cells: Vec<GridPos> = first.into_iter().collect();
    assert_eq!(cells, vec![grid("a3"), grid("c3")]);
}

#[test]
fn knight_shuffle_alternates_turns() {
    let mut game = ChessMatch::new();
    let shuffle = [
        ("g1", "f3"),
        ("g8", "f6"),
        ("f3", "g1"),
        ("f6", "g8"),
        ("g1", "f3"),
        ("g8", "f6"),
        ("f3", "g1"),
        ("f6", "g8"),
    ];
    for (count, &(from, to)) in shuffle.iter().enumerate() {
        let expected = if count % 2 == 0 {
            Color::White
        } else {
            Color::Black
        };
        assert_eq!(game.current_player(), expected);
        assert_eq!(game.turn(), count as u32 + 1);
        game.perform_move(coord(from), coord(to)).unwrap();
    }
    assert_eq!(game.current_player(), Color::White);
    assert_eq!(game.turn(), 9);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Random legal play through the public interface: after every
    /// completed non-mating half-move, the turn counter and the player to
    /// move stay in lock step.
    #[test]
    fn turn_alternates_through_random_play(
        walk in proptest::collection::vec(
            (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
            1..60,
        )
    ) {
        let mut game = ChessMatch::new();
        let mut completed = 0u32;
        for (origin_index, target_index) in walk {
            if game.is_checkmate() {
                break;
            }
            let snapshot = game.board_snapshot();
            let mut movable: Vec<(ChessCoordinate, SquareSet)> = Vec::new();
            for row in 0..8u8 {
                for col in 0..8u8 {
                    let Some((_, color)) = snapshot[row as usize][col as usize] else {
                        continue;
                    };
                    if color != game.current_player() {
                        continue;
                    }
                    let pos = GridPos::new(row, col).unwrap();
                    let from = ChessCoordinate::from_grid(pos);
                    if let Ok(moves) = game.possible_moves(from) {
                        movable.push((from, moves));
                    }
                }
            }
            if movable.is_empty() {
                break;
            }
            let (from, moves) = movable[origin_index.index(movable.len())];
            let targets: Vec<GridPos> = moves.into_iter().collect();
            let to = ChessCoordinate::from_grid(targets[target_index.index(targets.len())]);
            if game.perform_move(from, to).is_ok() && !game.is_checkmate() {
                completed += 1;
                prop_assert_eq!(game.turn(), completed + 1);
                let expected = if completed % 2 == 0 {
                    Color::White
                } else {
                    Color::Black
                };
                prop_assert_eq!(game.current_player(), expected);
            }
        }
    }
}
