use crate::board::Color;

/// Errors raised by the rules engine, the search and the notation translator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// A queried board has no king of this color.
    #[error("no {0} king on the board")]
    MissingKing(Color),

    /// Move selection was requested for a position without legal moves.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// A notation string matched none of the legal moves, or is malformed.
    #[error("illegal move request: {0}")]
    IllegalMoveRequest(String),

    /// A notation string matched more than one legal move.
    #[error("ambiguous move request: {0}")]
    AmbiguousMoveRequest(String),

    #[error("board text error: {0}")]
    BoardParse(String),
}

pub type Result<T> = std::result::Result<T, ChessError>;
