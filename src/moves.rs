use crate::board::{Piece, PieceKind, Square};
use serde::{Deserialize, Serialize};

/// The shape of a move; one variant per special rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Plain { piece: Piece, from: Square, to: Square, taken: Option<Piece> },
    Castling {
        king: Piece,
        king_from: Square,
        king_to: Square,
        rook: Piece,
        rook_from: Square,
        rook_to: Square,
    },
    /// `captured` is the square of the pawn taken, which differs from `to`.
    EnPassant { pawn: Piece, from: Square, to: Square, captured: Square },
    Promotion { pawn: Piece, from: Square, to: Square, taken: Option<Piece>, promoted: Piece },
}

/// A move together with whether it gives check.
///
/// Moves are built by the rules engine; `checking` is filled in by the
/// legality filter and left `false` for pseudo-legal moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    pub checking: bool,
}

impl Move {
    pub fn new(kind: MoveKind) -> Self {
        Self { kind, checking: false }
    }

    pub fn plain(piece: Piece, from: Square, to: Square, taken: Option<Piece>) -> Self {
        Self::new(MoveKind::Plain { piece, from, to, taken })
    }

    pub fn with_checking(mut self, checking: bool) -> Self {
        self.checking = checking;
        self
    }

    /// The piece that moves (the king for castling, the pawn for promotion).
    pub fn piece(&self) -> Piece {
        match self.kind {
            MoveKind::Plain { piece, .. } => piece,
            MoveKind::Castling { king, .. } => king,
            MoveKind::EnPassant { pawn, .. } => pawn,
            MoveKind::Promotion { pawn, .. } => pawn,
        }
    }

    pub fn from(&self) -> Square {
        match self.kind {
            MoveKind::Plain { from, .. } => from,
            MoveKind::Castling { king_from, .. } => king_from,
            MoveKind::EnPassant { from, .. } => from,
            MoveKind::Promotion { from, .. } => from,
        }
    }

    pub fn to(&self) -> Square {
        match self.kind {
            MoveKind::Plain { to, .. } => to,
            MoveKind::Castling { king_to, .. } => king_to,
            MoveKind::EnPassant { to, .. } => to,
            MoveKind::Promotion { to, .. } => to,
        }
    }

    pub fn taken(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Plain { taken, .. } | MoveKind::Promotion { taken, .. } => taken,
            MoveKind::EnPassant { pawn, .. } => Some(Piece::new(PieceKind::Pawn, !pawn.color)),
            MoveKind::Castling { .. } => None,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.taken().is_some()
    }

    pub fn is_pawn_move(&self) -> bool {
        self.piece().kind == PieceKind::Pawn
    }

    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::Castling { .. })
    }

    /// Whether a move vacates `sq`; castling vacates the rook square too.
    pub fn moves_from(&self, sq: Square) -> bool {
        match self.kind {
            MoveKind::Castling { king_from, rook_from, .. } => king_from == sq || rook_from == sq,
            _ => self.from() == sq,
        }
    }

    /// Same move regardless of the `checking` flag.
    pub fn same_as(&self, other: &Move) -> bool {
        self.kind == other.kind
    }
}
