use crate::board::{Board, Color};
use crate::error::Result;
use crate::moves::Move;
use crate::rules::{compute_all_moves, GenOptions};
use rayon::prelude::*;

/// Leaf count of the legal move tree, using make/unmake on one board.
pub fn perft(board: &mut Board, color: Color, history: &mut Vec<Move>, depth: u32) -> Result<u64> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = compute_all_moves(board, color, history, GenOptions::LEGAL)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }
    let mut nodes = 0u64;
    for mv in moves {
        board.do_move(&mv);
        history.push(mv);
        let sub = perft(board, !color, history, depth - 1);
        history.pop();
        board.undo_move(&mv);
        nodes += sub?;
    }
    Ok(nodes)
}

/// Root-split parallel perft: each root move's subtree runs on its own board copy.
pub fn perft_parallel(board: &Board, color: Color, history: &[Move], depth: u32) -> Result<u64> {
    if depth <= 1 {
        return perft(&mut board.copy(), color, &mut history.to_vec(), depth);
    }
    let roots = compute_all_moves(board, color, history, GenOptions::LEGAL)?;
    let counts: Vec<u64> = roots
        .par_iter()
        .map(|mv| {
            let mut b = board.copy();
            b.do_move(mv);
            let mut h = history.to_vec();
            h.push(*mv);
            perft(&mut b, !color, &mut h, depth - 1)
        })
        .collect::<Result<_>>()?;
    Ok(counts.into_iter().sum())
}

/// Per-root-move leaf counts, for diffing against another generator.
pub fn divide(board: &Board, color: Color, history: &[Move], depth: u32) -> Result<Vec<(Move, u64)>> {
    let roots = compute_all_moves(board, color, history, GenOptions::LEGAL)?;
    let mut out = Vec::with_capacity(roots.len());
    for mv in roots {
        let mut b = board.copy();
        b.do_move(&mv);
        let mut h = history.to_vec();
        h.push(mv);
        let n = perft(&mut b, !color, &mut h, depth.saturating_sub(1))?;
        out.push((mv, n));
    }
    Ok(out)
}
