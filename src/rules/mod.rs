//! Move generation and game-state classification.
//!
//! Everything here is a pure function of a board, a color and the move
//! history. The history stands in for castling rights and en passant state.

pub mod attacks;
pub mod castling;
pub mod state;

pub use attacks::{is_in_check, kings_adjacent};
pub use castling::castling_moves;
pub use state::{game_state, GameState};

use crate::board::{Board, Color, Piece, PieceKind, Square};
use crate::error::Result;
use crate::moves::{Move, MoveKind};
use attacks::{BISHOP_DIRS, KING_STEPS, KNIGHT_JUMPS, ROOK_DIRS};
use std::cmp::Reverse;

/// What to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenOptions {
    /// Drop moves leaving the mover's king attacked and flag checking moves.
    pub legal: bool,
    /// Drop quiet pawn pushes.
    pub captures_only: bool,
}

impl GenOptions {
    pub const LEGAL: GenOptions = GenOptions { legal: true, captures_only: false };
    pub const PSEUDO: GenOptions = GenOptions { legal: false, captures_only: false };
    /// Cheap attack approximation used by the evaluator.
    pub const ATTACKS: GenOptions = GenOptions { legal: false, captures_only: true };
}

/// Moves of the piece standing on `from`.
pub fn compute_moves(
    board: &Board,
    piece: Piece,
    from: Square,
    history: &[Move],
    opts: GenOptions,
) -> Result<Vec<Move>> {
    let mut out = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, piece, from, history, opts.captures_only, &mut out),
        PieceKind::Knight => step_moves(board, piece, from, &KNIGHT_JUMPS, &mut out),
        PieceKind::Bishop => ray_moves(board, piece, from, &BISHOP_DIRS, &mut out),
        PieceKind::Rook => ray_moves(board, piece, from, &ROOK_DIRS, &mut out),
        PieceKind::Queen => {
            ray_moves(board, piece, from, &ROOK_DIRS, &mut out);
            ray_moves(board, piece, from, &BISHOP_DIRS, &mut out);
        }
        PieceKind::King => {
            step_moves(board, piece, from, &KING_STEPS, &mut out);
            out.extend(castling_moves(board, piece, from, history)?);
        }
    }
    if opts.legal {
        legal_only(board, piece.color, out)
    } else {
        Ok(out)
    }
}

/// Moves of every piece of `color`, most valuable piece first.
pub fn compute_all_moves(board: &Board, color: Color, history: &[Move], opts: GenOptions) -> Result<Vec<Move>> {
    let mut out = Vec::new();
    for (sq, piece) in by_value(board, color) {
        out.extend(compute_moves(board, piece, sq, history, opts)?);
    }
    Ok(out)
}

/// Whether `color` has at least one legal move.
pub fn can_move(board: &Board, color: Color, history: &[Move]) -> Result<bool> {
    for (sq, piece) in by_value(board, color) {
        if !compute_moves(board, piece, sq, history, GenOptions::LEGAL)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn by_value(board: &Board, color: Color) -> Vec<(Square, Piece)> {
    let mut pieces: Vec<(Square, Piece)> = board.pieces(color).collect();
    pieces.sort_by_key(|&(_, p)| Reverse(p.value()));
    pieces
}

fn legal_only(board: &Board, color: Color, candidates: Vec<Move>) -> Result<Vec<Move>> {
    board.king_square(color)?;
    board.king_square(!color)?;
    let mut scratch = board.copy();
    let mut out = Vec::with_capacity(candidates.len());
    for mv in candidates {
        scratch.do_move(&mv);
        let verdict = verdict_after(&scratch, color);
        scratch.undo_move(&mv);
        if let Some(checking) = verdict? {
            out.push(mv.with_checking(checking));
        }
    }
    Ok(out)
}

/// `None` if the position after a move by `color` is illegal, otherwise
/// whether the opponent is in check.
fn verdict_after(board: &Board, color: Color) -> Result<Option<bool>> {
    if board.find_king(!color).is_none() || kings_adjacent(board) || is_in_check(board, color)? {
        return Ok(None);
    }
    Ok(Some(is_in_check(board, !color)?))
}

fn push_target(board: &Board, piece: Piece, from: Square, to: Square, out: &mut Vec<Move>) -> bool {
    match board.get(to) {
        None => {
            out.push(Move::plain(piece, from, to, None));
            true
        }
        Some(other) if other.color != piece.color => {
            out.push(Move::plain(piece, from, to, Some(other)));
            false
        }
        Some(_) => false,
    }
}

fn step_moves(board: &Board, piece: Piece, from: Square, steps: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in steps {
        if let Some(to) = from.offset(df, dr) {
            push_target(board, piece, from, to, out);
        }
    }
}

fn ray_moves(board: &Board, piece: Piece, from: Square, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(df, dr) {
            if !push_target(board, piece, from, to, out) {
                break;
            }
            cur = to;
        }
    }
}

fn pawn_moves(
    board: &Board,
    pawn: Piece,
    from: Square,
    history: &[Move],
    captures_only: bool,
    out: &mut Vec<Move>,
) {
    let dir = pawn.color.forward();

    if !captures_only {
        if let Some(one) = from.offset(0, dir).filter(|&s| board.is_empty(s)) {
            push_pawn(pawn, from, one, None, out);
            if from.rank() == pawn.color.pawn_rank() {
                if let Some(two) = from.offset(0, 2 * dir).filter(|&s| board.is_empty(s)) {
                    out.push(Move::plain(pawn, from, two, None));
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            if let Some(target) = board.get(to).filter(|t| t.color != pawn.color) {
                push_pawn(pawn, from, to, Some(target), out);
            }
        }
    }

    if let Some(captured) = en_passant_target(pawn, from, history) {
        if let Some(to) = captured.offset(0, dir) {
            out.push(Move::new(MoveKind::EnPassant { pawn, from, to, captured }));
        }
    }
}

/// Square of an enemy pawn that just advanced two squares to land beside `from`.
fn en_passant_target(pawn: Piece, from: Square, history: &[Move]) -> Option<Square> {
    let last = history.last()?;
    let MoveKind::Plain { piece, from: lf, to: lt, .. } = last.kind else {
        return None;
    };
    let double_step = piece == Piece::new(PieceKind::Pawn, !pawn.color) && lf.rank().abs_diff(lt.rank()) == 2;
    let beside = lt.rank() == from.rank() && lt.file().abs_diff(from.file()) == 1;
    (double_step && beside).then_some(lt)
}

fn push_pawn(pawn: Piece, from: Square, to: Square, taken: Option<Piece>, out: &mut Vec<Move>) {
    if to.rank() != pawn.color.promotion_rank() {
        out.push(Move::plain(pawn, from, to, taken));
        return;
    }
    for kind in PieceKind::PROMOTIONS {
        let promoted = Piece::new(kind, pawn.color);
        out.push(Move::new(MoveKind::Promotion { pawn, from, to, taken, promoted }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn startpos_has_twenty_moves_each() {
        let b = Board::standard();
        assert_eq!(compute_all_moves(&b, Color::White, &[], GenOptions::LEGAL).unwrap().len(), 20);
        assert_eq!(compute_all_moves(&b, Color::Black, &[], GenOptions::LEGAL).unwrap().len(), 20);
    }

    #[test]
    fn all_moves_start_with_the_most_valuable_piece() {
        let b = Board::standard();
        let moves = compute_all_moves(&b, Color::White, &[], GenOptions::LEGAL).unwrap();
        // King and queen are boxed in; knights come before pawns.
        assert_eq!(moves[0].piece().kind, PieceKind::Knight);
        assert_eq!(moves.last().unwrap().piece().kind, PieceKind::Pawn);
    }

    #[test]
    fn captures_only_drops_pawn_pushes() {
        let b = Board::standard();
        let e2 = sq("e2");
        let pawn = b.get(e2).unwrap();
        assert_eq!(compute_moves(&b, pawn, e2, &[], GenOptions::PSEUDO).unwrap().len(), 2);
        assert!(compute_moves(&b, pawn, e2, &[], GenOptions::ATTACKS).unwrap().is_empty());
        let g1 = sq("g1");
        let knight = b.get(g1).unwrap();
        assert_eq!(compute_moves(&b, knight, g1, &[], GenOptions::ATTACKS).unwrap().len(), 2);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let b = Board::parse(
            ". . . . ♚ . . .\n\
             . . . . ♜ . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . ♘ . . .\n\
             . . . . ♔ . . .\n",
        )
        .unwrap();
        let knight = b.get(sq("e2")).unwrap();
        assert!(compute_moves(&b, knight, sq("e2"), &[], GenOptions::LEGAL).unwrap().is_empty());
        assert_eq!(compute_moves(&b, knight, sq("e2"), &[], GenOptions::PSEUDO).unwrap().len(), 6);
    }

    #[test]
    fn legal_filter_flags_checking_moves() {
        let b = Board::parse(
            ". . . . ♚ . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             ♖ . . . ♔ . . .\n",
        )
        .unwrap();
        let rook = b.get(sq("a1")).unwrap();
        let moves = compute_moves(&b, rook, sq("a1"), &[], GenOptions::LEGAL).unwrap();
        let checking: Vec<String> = moves.iter().filter(|m| m.checking).map(|m| m.to().to_string()).collect();
        assert_eq!(checking, vec!["a8".to_string()]);
    }

    #[test]
    fn missing_opponent_king_is_an_error() {
        let b = Board::parse(
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . ♕ ♔ . . .\n",
        )
        .unwrap();
        let err = compute_all_moves(&b, Color::White, &[], GenOptions::LEGAL).unwrap_err();
        assert_eq!(err, crate::error::ChessError::MissingKing(Color::Black));
        // Pseudo-legal generation does not need the opponent king.
        assert!(!compute_all_moves(&b, Color::White, &[], GenOptions::PSEUDO).unwrap().is_empty());
    }

    #[test]
    fn kings_never_stand_adjacent() {
        let b = Board::parse(
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . ♚ . . .\n\
             . . . . . . . .\n\
             . . . . ♔ . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n",
        )
        .unwrap();
        let king = b.get(sq("e4")).unwrap();
        let moves = compute_moves(&b, king, sq("e4"), &[], GenOptions::LEGAL).unwrap();
        assert_eq!(moves.len(), 5);
        assert!(moves.iter().all(|m| m.to().rank() <= 3));
    }

    #[test]
    fn promotion_expands_to_four_pieces() {
        let b = Board::parse(
            ". ♜ . . . . . ♚\n\
             ♙ . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . ♔ . . .\n",
        )
        .unwrap();
        let pawn = b.get(sq("a7")).unwrap();
        let moves = compute_moves(&b, pawn, sq("a7"), &[], GenOptions::LEGAL).unwrap();
        assert_eq!(moves.len(), 8);
        let kinds: Vec<PieceKind> = moves
            .iter()
            .filter_map(|m| match m.kind {
                MoveKind::Promotion { promoted, taken: Some(_), .. } => Some(promoted.kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, PieceKind::PROMOTIONS.to_vec());
    }

    #[test]
    fn en_passant_only_right_after_the_double_step() {
        let mut b = Board::standard();
        let mut history = Vec::new();
        for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
            let piece = b.get(sq(from)).unwrap();
            let mv = Move::plain(piece, sq(from), sq(to), None);
            b.do_move(&mv);
            history.push(mv);
        }
        let pawn = b.get(sq("e5")).unwrap();
        let moves = compute_moves(&b, pawn, sq("e5"), &history, GenOptions::LEGAL).unwrap();
        let ep: Vec<&Move> = moves.iter().filter(|m| matches!(m.kind, MoveKind::EnPassant { .. })).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to(), sq("d6"));

        // One tempo later the right is gone.
        let knight = b.get(sq("g1")).unwrap();
        let quiet = Move::plain(knight, sq("g1"), sq("f3"), None);
        b.do_move(&quiet);
        history.push(quiet);
        let knight = b.get(sq("g8")).unwrap();
        let quiet = Move::plain(knight, sq("g8"), sq("f6"), None);
        b.do_move(&quiet);
        history.push(quiet);
        let moves = compute_moves(&b, pawn, sq("e5"), &history, GenOptions::LEGAL).unwrap();
        assert!(moves.iter().all(|m| !matches!(m.kind, MoveKind::EnPassant { .. })));
    }
}
