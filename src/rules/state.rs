use super::{attacks::is_in_check, can_move};
use crate::board::{Board, Color};
use crate::error::Result;
use crate::moves::Move;
use serde::{Deserialize, Serialize};

/// Plies inspected by the repetition check.
pub const REPETITION_WINDOW: usize = 10;
/// Plies without a capture or pawn move that end the game.
pub const FIFTY_MOVE_PLIES: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    /// The side to move is checkmated.
    Loss,
    DrawStalemate,
    DrawThreefold,
    Draw50Moves,
    /// Set by the players, never derived from the position.
    DrawAgreement,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::InProgress
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameState::DrawStalemate | GameState::DrawThreefold | GameState::Draw50Moves | GameState::DrawAgreement
        )
    }
}

/// Classifies the position for `to_move`.
pub fn game_state(board: &Board, to_move: Color, history: &[Move]) -> Result<GameState> {
    if !can_move(board, to_move, history)? {
        return Ok(if is_in_check(board, to_move)? { GameState::Loss } else { GameState::DrawStalemate });
    }
    if is_repetition(history) {
        return Ok(GameState::DrawThreefold);
    }
    if is_fifty_move_draw(history) {
        return Ok(GameState::Draw50Moves);
    }
    Ok(GameState::InProgress)
}

/// Offset-based repetition: over the last ten plies every move equals the
/// move four plies later, i.e. both sides shuttled back and forth so the
/// resulting position occurred three times. Different move orders reaching
/// the same position are not detected.
pub fn is_repetition(history: &[Move]) -> bool {
    if history.len() < REPETITION_WINDOW {
        return false;
    }
    let tail = &history[history.len() - REPETITION_WINDOW..];
    (0..REPETITION_WINDOW - 4).all(|i| tail[i].same_as(&tail[i + 4]))
}

pub fn is_fifty_move_draw(history: &[Move]) -> bool {
    history.len() >= FIFTY_MOVE_PLIES
        && history[history.len() - FIFTY_MOVE_PLIES..].iter().all(|m| !m.is_capture() && !m.is_pawn_move())
}
