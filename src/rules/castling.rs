use super::attacks::is_in_check;
use crate::board::{Board, Piece, PieceKind, Square};
use crate::error::Result;
use crate::moves::{Move, MoveKind};

const KING_FILE: u8 = 4;

/// (rook file, king target file, rook target file)
const SIDES: [(u8, u8, u8); 2] = [(0, 2, 3), (7, 6, 5)];

/// Castling moves available to `king` standing on `from`.
///
/// Rights come from the history: neither the king's nor the rook's home
/// square may ever have been vacated. A side that fails any condition is
/// silently left out.
pub fn castling_moves(board: &Board, king: Piece, from: Square, history: &[Move]) -> Result<Vec<Move>> {
    let color = king.color;
    let rank = color.home_rank();
    let home = Square::new(KING_FILE, rank);
    if king.kind != PieceKind::King || from != home || history.iter().any(|m| m.moves_from(home)) {
        return Ok(Vec::new());
    }
    if is_in_check(board, color)? {
        return Ok(Vec::new());
    }

    let rook = Piece::new(PieceKind::Rook, color);
    let mut out = Vec::new();
    for (rook_file, king_to_file, rook_to_file) in SIDES {
        let rook_from = Square::new(rook_file, rank);
        if board.get(rook_from) != Some(rook) || history.iter().any(|m| m.moves_from(rook_from)) {
            continue;
        }
        let (lo, hi) = (rook_file.min(KING_FILE) + 1, rook_file.max(KING_FILE));
        if (lo..hi).any(|f| !board.is_empty(Square::new(f, rank))) {
            continue;
        }
        if !transit_is_safe(board, king, home, king_to_file)? {
            continue;
        }
        out.push(Move::new(MoveKind::Castling {
            king,
            king_from: home,
            king_to: Square::new(king_to_file, rank),
            rook,
            rook_from,
            rook_to: Square::new(rook_to_file, rank),
        }));
    }
    Ok(out)
}

/// Steps the king one square at a time towards `to_file`, checking each
/// square (the landing square included) for attacks.
fn transit_is_safe(board: &Board, king: Piece, home: Square, to_file: u8) -> Result<bool> {
    let mut scratch = board.copy();
    let files: Vec<u8> = if to_file > KING_FILE {
        (KING_FILE + 1..=to_file).collect()
    } else {
        (to_file..KING_FILE).rev().collect()
    };
    for file in files {
        let step = Move::plain(king, home, Square::new(file, home.rank()), None);
        scratch.do_move(&step);
        let attacked = is_in_check(&scratch, king.color);
        scratch.undo_move(&step);
        if attacked? {
            return Ok(false);
        }
    }
    Ok(true)
}
