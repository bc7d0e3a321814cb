pub mod piece;
pub mod square;
mod text;

pub use piece::{Color, Piece, PieceKind};
pub use square::Square;

use crate::error::{ChessError, Result};
use crate::moves::{Move, MoveKind};

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

/// 8x8 grid of optional pieces, indexed `[rank][file]`.
///
/// The board only stores placement. Side to move, castling rights and en
/// passant eligibility are derived from the move history by the rules engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The initial position.
    pub fn standard() -> Self {
        let mut b = Self::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            for color in [Color::White, Color::Black] {
                b.set(Square::new(file, color.home_rank()), Some(Piece::new(kind, color)));
                b.set(Square::new(file, color.pawn_rank()), Some(Piece::new(PieceKind::Pawn, color)));
            }
        }
        b
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.rank() as usize][sq.file() as usize] = piece;
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Independent deep clone used before speculative moves.
    pub fn copy(&self) -> Board {
        self.clone()
    }

    /// Pieces of one color in board order (rank 1 first, file a first).
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.get(sq) {
            Some(p) if p.color == color => Some((sq, p)),
            _ => None,
        })
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.get(sq) == Some(Piece::new(PieceKind::King, color)))
    }

    pub fn king_square(&self, color: Color) -> Result<Square> {
        self.find_king(color).ok_or(ChessError::MissingKing(color))
    }

    /// Sum of piece values of one color.
    pub fn material(&self, color: Color) -> i32 {
        self.pieces(color).map(|(_, p)| p.value()).sum()
    }

    /// Applies a move without any legality check.
    pub fn do_move(&mut self, mv: &Move) {
        match mv.kind {
            MoveKind::Plain { piece, from, to, .. } => {
                self.set(from, None);
                self.set(to, Some(piece));
            }
            MoveKind::Castling { king, king_from, king_to, rook, rook_from, rook_to } => {
                self.set(king_from, None);
                self.set(rook_from, None);
                self.set(king_to, Some(king));
                self.set(rook_to, Some(rook));
            }
            MoveKind::EnPassant { pawn, from, to, captured } => {
                self.set(from, None);
                self.set(captured, None);
                self.set(to, Some(pawn));
            }
            MoveKind::Promotion { from, to, promoted, .. } => {
                self.set(from, None);
                self.set(to, Some(promoted));
            }
        }
    }

    /// Exact inverse of `do_move`, restoring any captured piece.
    pub fn undo_move(&mut self, mv: &Move) {
        match mv.kind {
            MoveKind::Plain { piece, from, to, taken } => {
                self.set(to, taken);
                self.set(from, Some(piece));
            }
            MoveKind::Castling { king, king_from, king_to, rook, rook_from, rook_to } => {
                self.set(king_to, None);
                self.set(rook_to, None);
                self.set(king_from, Some(king));
                self.set(rook_from, Some(rook));
            }
            MoveKind::EnPassant { pawn, from, to, captured } => {
                self.set(to, None);
                self.set(captured, Some(Piece::new(PieceKind::Pawn, !pawn.color)));
                self.set(from, Some(pawn));
            }
            MoveKind::Promotion { pawn, from, to, taken, .. } => {
                self.set(to, taken);
                self.set(from, Some(pawn));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_position_layout() {
        let b = Board::standard();
        assert_eq!(b.get(Square::new(4, 0)), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(b.get(Square::new(3, 7)), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(b.pieces(Color::White).count(), 16);
        assert_eq!(b.pieces(Color::Black).count(), 16);
        assert_eq!(b.material(Color::White), b.material(Color::Black));
        assert!(b.is_empty(Square::new(4, 3)));
    }

    #[test]
    fn missing_king_is_an_error() {
        let b = Board::empty();
        assert_eq!(b.king_square(Color::Black), Err(ChessError::MissingKing(Color::Black)));
    }

    #[test]
    fn copy_is_independent() {
        let a = Board::standard();
        let mut b = a.copy();
        b.set(Square::new(0, 0), None);
        assert!(a.get(Square::new(0, 0)).is_some());
        assert_ne!(a, b);
    }
}
