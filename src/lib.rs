//! Chess rules engine with a depth-limited heuristic search and an opening book.
pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod notation;
pub mod openings;
pub mod perft;
pub mod rules;
pub mod search;

pub use board::{Board, Color, Piece, PieceKind, Square};
pub use error::{ChessError, Result};
pub use game::{Game, Player, PlayerKind};
pub use moves::{Move, MoveKind};
pub use rules::GameState;
