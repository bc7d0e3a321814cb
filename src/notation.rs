//! Basic (`e2-e4`, `d4xe5+`, `0-0`) and UCI (`e2e4`, `a7a8q`) move notation,
//! and the translator from notation strings to legal structured moves.

use crate::board::{Board, Color, PieceKind, Square};
use crate::error::{ChessError, Result};
use crate::moves::{Move, MoveKind};
use crate::rules::{self, GenOptions};
use std::fmt;

impl fmt::Display for Move {
    /// Basic notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MoveKind::Castling { king_to, .. } => {
                f.write_str(if king_to.file() == 2 { "0-0-0" } else { "0-0" })?;
            }
            _ => {
                let sep = if self.is_capture() { 'x' } else { '-' };
                write!(f, "{}{}{}", self.from(), sep, self.to())?;
            }
        }
        if self.checking {
            f.write_str("+")?;
        }
        Ok(())
    }
}

pub fn to_uci(mv: &Move) -> String {
    match mv.kind {
        MoveKind::Promotion { from, to, promoted, .. } => format!("{from}{to}{}", promoted.kind.letter()),
        _ => format!("{}{}", mv.from(), mv.to()),
    }
}

/// Resolves a UCI string against the legal moves of `color`.
pub fn match_uci(board: &Board, color: Color, history: &[Move], uci: &str) -> Result<Move> {
    let uci = uci.trim();
    let valid = matches!(uci.len(), 4 | 5)
        && uci.is_ascii()
        && uci[0..2].parse::<Square>().is_ok()
        && uci[2..4].parse::<Square>().is_ok()
        && uci[4..].chars().all(|c| matches!(c, 'q' | 'r' | 'b' | 'n'));
    if !valid {
        return Err(ChessError::IllegalMoveRequest(format!("malformed UCI move {uci:?}")));
    }
    let legal = rules::compute_all_moves(board, color, history, GenOptions::LEGAL)?;
    single(legal.into_iter().filter(|m| to_uci(m) == uci).collect(), uci)
}

/// A basic-notation move as written, before it is matched to a legal move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BasicMove {
    Castle { queenside: bool, checking: bool },
    Step { from: Square, to: Square, capture: bool, checking: bool },
}

pub fn parse_basic(text: &str) -> Result<BasicMove> {
    let text = text.trim();
    let (body, checking) = match text.strip_suffix('+') {
        Some(body) => (body, true),
        None => (text, false),
    };
    let bad = || ChessError::IllegalMoveRequest(format!("malformed move {text:?}"));
    match body {
        "0-0" => return Ok(BasicMove::Castle { queenside: false, checking }),
        "0-0-0" => return Ok(BasicMove::Castle { queenside: true, checking }),
        _ => {}
    }
    if body.len() != 5 || !body.is_ascii() {
        return Err(bad());
    }
    let capture = match &body[2..3] {
        "-" => false,
        "x" => true,
        _ => return Err(bad()),
    };
    let from = body[0..2].parse().map_err(|_| bad())?;
    let to = body[3..5].parse().map_err(|_| bad())?;
    Ok(BasicMove::Step { from, to, capture, checking })
}

/// Resolves a basic-notation string against the legal moves of `color`.
///
/// Basic notation does not name a promotion piece, so a promoting pawn move
/// resolves to the queen promotion.
pub fn match_basic(board: &Board, color: Color, history: &[Move], text: &str) -> Result<Move> {
    let parsed = parse_basic(text)?;
    let legal = rules::compute_all_moves(board, color, history, GenOptions::LEGAL)?;
    let found: Vec<Move> = legal
        .into_iter()
        .filter(|m| match (parsed, m.kind) {
            (BasicMove::Castle { queenside, .. }, MoveKind::Castling { king_to, .. }) => {
                queenside == (king_to.file() == 2)
            }
            (BasicMove::Step { from, to, capture, .. }, kind) => {
                !matches!(kind, MoveKind::Castling { .. })
                    && m.from() == from
                    && m.to() == to
                    && m.is_capture() == capture
            }
            _ => false,
        })
        .filter(|m| match m.kind {
            MoveKind::Promotion { promoted, .. } => promoted.kind == PieceKind::Queen,
            _ => true,
        })
        .collect();
    single(found, text)
}

fn single(mut found: Vec<Move>, request: &str) -> Result<Move> {
    match found.len() {
        0 => Err(ChessError::IllegalMoveRequest(request.to_string())),
        1 => Ok(found.remove(0)),
        _ => Err(ChessError::AmbiguousMoveRequest(request.to_string())),
    }
}
