use crate::board::{Board, Color, PieceKind, Square};
use crate::error::Result;
use crate::moves::Move;
use crate::rules::{self, GameState, GenOptions};

// Mate scoring
pub const BEST: i32 = 1_000_000;
pub const WORST: i32 = -BEST;
/// Cost of a drawn position to the side it is evaluated for.
pub const DRAW_PENALTY: i32 = 30;
pub const MATERIAL_WEIGHT: i32 = 10;

// Development heuristic
const DEVELOPMENT_WINDOW: usize = 5;
const CASTLE_BONUS: i32 = 15;
const KING_WALK_PENALTY: i32 = 20;
const EARLY_HEAVY_PENALTY: i32 = 10;
const REPEAT_PENALTY: i32 = 5;

/// Scores the position after a move from `perspective`'s point of view.
/// `state` is the state for `to_move` in this position.
pub fn evaluate_board(
    board: &Board,
    perspective: Color,
    to_move: Color,
    history: &[Move],
    state: GameState,
) -> Result<i32> {
    match state {
        GameState::Loss if to_move == perspective => Ok(WORST),
        GameState::Loss => Ok(BEST),
        s if s.is_draw() => Ok(-DRAW_PENALTY),
        _ => Ok(MATERIAL_WEIGHT * material_delta(board, perspective)
            + heat_score(board, perspective, history)?
            + development_score(history, perspective)),
    }
}

/// Own material minus the opponent's, in pawns.
pub fn material_delta(board: &Board, color: Color) -> i32 {
    board.material(color) - board.material(!color)
}

/// 0 on the rim up to 3 on the four central squares.
pub fn center_weight(sq: Square) -> i32 {
    let f = sq.file().min(7 - sq.file());
    let r = sq.rank().min(7 - sq.rank());
    f.min(r) as i32
}

/// 3 on the king's own square, dropping by one per step of distance.
pub fn king_weight(sq: Square, king: Square) -> i32 {
    (3 - sq.chebyshev(king) as i32).max(0)
}

/// Pressure `color` puts on the center and the enemy king, minus the
/// pressure it receives.
pub fn heat_score(board: &Board, color: Color, history: &[Move]) -> Result<i32> {
    Ok(side_heat(board, color, history)? - side_heat(board, !color, history)?)
}

fn side_heat(board: &Board, color: Color, history: &[Move]) -> Result<i32> {
    let target = board.king_square(!color)?;
    let moves = rules::compute_all_moves(board, color, history, GenOptions::ATTACKS)?;
    Ok(moves.iter().map(|m| center_weight(m.to()) + king_weight(m.to(), target)).sum())
}

/// Opening-phase bonus of `color` minus the opponent's.
pub fn development_score(history: &[Move], color: Color) -> i32 {
    side_development(history, color) - side_development(history, !color)
}

fn side_development(history: &[Move], color: Color) -> i32 {
    let mut score = 0;
    // Current squares of non-pawn pieces that already moved.
    let mut moved: Vec<Square> = Vec::new();
    for mv in history.iter().filter(|m| m.piece().color == color).take(DEVELOPMENT_WINDOW) {
        if mv.is_castling() {
            score += CASTLE_BONUS;
            continue;
        }
        let kind = mv.piece().kind;
        if matches!(kind, PieceKind::Queen | PieceKind::Rook | PieceKind::King) {
            score -= EARLY_HEAVY_PENALTY;
        }
        // A king step also gives up castling.
        if kind == PieceKind::King {
            score -= KING_WALK_PENALTY;
        }
        if kind == PieceKind::Pawn {
            continue;
        }
        match moved.iter().position(|&s| s == mv.from()) {
            Some(i) => {
                score -= REPEAT_PENALTY;
                moved[i] = mv.to();
            }
            None => moved.push(mv.to()),
        }
    }
    score
}
