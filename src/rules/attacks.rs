use crate::board::{Board, Color, Piece, PieceKind, Square};
use crate::error::Result;

pub(crate) const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const KING_STEPS: [(i8, i8); 8] =
    [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] =
    [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];

/// First occupied square along a ray, excluding `from`.
fn first_along(board: &Board, from: Square, (df, dr): (i8, i8)) -> Option<Piece> {
    let mut cur = from;
    while let Some(next) = cur.offset(df, dr) {
        if let Some(p) = board.get(next) {
            return Some(p);
        }
        cur = next;
    }
    None
}

/// Whether `color`'s king is attacked, found by casting each attack shape
/// outward from the king instead of generating the opponent's moves.
pub fn is_in_check(board: &Board, color: Color) -> Result<bool> {
    let king = board.king_square(color)?;
    let enemy = !color;

    let hit = |dirs: &[(i8, i8)], kinds: [PieceKind; 2]| {
        dirs.iter().any(|&d| {
            matches!(first_along(board, king, d), Some(p) if p.color == enemy && kinds.contains(&p.kind))
        })
    };
    if hit(&ROOK_DIRS, [PieceKind::Rook, PieceKind::Queen]) {
        return Ok(true);
    }
    if hit(&BISHOP_DIRS, [PieceKind::Bishop, PieceKind::Queen]) {
        return Ok(true);
    }

    let enemy_knight = Some(Piece::new(PieceKind::Knight, enemy));
    if KNIGHT_JUMPS.iter().any(|&(df, dr)| king.offset(df, dr).map_or(false, |s| board.get(s) == enemy_knight)) {
        return Ok(true);
    }

    // Enemy pawns attack the king from the squares diagonally ahead of it.
    let enemy_pawn = Some(Piece::new(PieceKind::Pawn, enemy));
    let ahead = color.forward();
    Ok([-1, 1].iter().any(|&df| king.offset(df, ahead).map_or(false, |s| board.get(s) == enemy_pawn)))
}

/// Kings standing next to each other can never arise from legal play.
pub fn kings_adjacent(board: &Board) -> bool {
    match (board.find_king(Color::White), board.find_king(Color::Black)) {
        (Some(w), Some(b)) => w.chebyshev(b) <= 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        Board::parse(text).unwrap()
    }

    #[test]
    fn rook_check_blocked_by_any_piece() {
        let b = board(
            "♚ . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             ♜ . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             ♔ . . . . . . .\n",
        );
        assert!(is_in_check(&b, Color::White).unwrap());
        let mut blocked = b.copy();
        blocked.set(Square::new(0, 1), Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert!(!is_in_check(&blocked, Color::White).unwrap());
    }

    #[test]
    fn pawn_attacks_only_forward_diagonals() {
        let b = board(
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . ♟ . . . .\n\
             . . . . ♔ . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . ♚\n",
        );
        assert!(is_in_check(&b, Color::White).unwrap());
        // A black pawn behind the white king gives no check.
        let b2 = board(
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . ♔ . . .\n\
             . . . ♟ . . . .\n\
             . . . . . . . .\n\
             . . . . . . . ♚\n",
        );
        assert!(!is_in_check(&b2, Color::White).unwrap());
    }

    #[test]
    fn knight_and_bishop_checks() {
        let b = board(
            ". . . . ♚ . . .\n\
             . . . . . . . .\n\
             . . . ♘ . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             ♗ . . . ♔ . . .\n",
        );
        assert!(is_in_check(&b, Color::Black).unwrap());
        assert!(!is_in_check(&b, Color::White).unwrap());
    }

    #[test]
    fn missing_king_is_reported() {
        let b = board(". . . . ♚ . . .\n\n\n\n\n\n\n\n");
        assert!(is_in_check(&b, Color::White).is_err());
    }
}
