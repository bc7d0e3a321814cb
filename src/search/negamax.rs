use crate::board::{Board, Color};
use crate::error::{ChessError, Result};
use crate::game::Game;
use crate::moves::Move;
use crate::openings::OpeningBook;
use crate::rules::{self, GenOptions};
use crate::search::eval::{evaluate_board, DRAW_PENALTY};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Score given to candidates that were not evaluated before the deadline.
pub const DEFAULT_SCORE: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies searched beyond the candidate move.
    pub depth: u32,
    pub movetime: Option<Duration>,
    /// Seed for tie-breaking and book choices; entropy when unset.
    pub seed: Option<u64>,
    pub use_book: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 1, movetime: Some(Duration::from_secs(5)), seed: None, use_book: true }
    }
}

/// A candidate move and its score for the side playing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveAnalysis {
    pub mv: Move,
    pub score: i32,
}

/// Depth-limited move selector.
///
/// Every candidate is scored by the static evaluation of the resulting
/// position or, with depth left, by the negated score of the opponent's best
/// reply. There is no pruning: each level enumerates all legal moves.
pub struct Searcher<R = SmallRng> {
    config: SearchConfig,
    rng: R,
    book: Option<Arc<OpeningBook>>,
    nodes: u64,
}

impl Searcher<SmallRng> {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl Default for Searcher<SmallRng> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<R: Rng> Searcher<R> {
    pub fn with_rng(config: SearchConfig, rng: R) -> Self {
        Self { config, rng, book: Some(OpeningBook::standard()), nodes: 0 }
    }

    /// Replaces the opening book; `None` disables book lookups.
    pub fn with_book(mut self, book: Option<Arc<OpeningBook>>) -> Self {
        self.book = book;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Positions scored by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Book move if the game is still in the book, otherwise a searched move
    /// within the configured depth and move time.
    pub fn choose_move(&mut self, game: &Game) -> Result<Move> {
        if self.config.use_book {
            if let Some(book) = &self.book {
                let moves = book.find_possible_moves(game)?;
                if let Some(&mv) = moves.choose(&mut self.rng) {
                    log::debug!("book move {mv} ({} candidates)", moves.len());
                    return Ok(mv);
                }
            }
        }
        // A movetime too large to add to the clock means no deadline.
        let deadline = self.config.movetime.and_then(|t| Instant::now().checked_add(t));
        self.select_move(game, self.config.depth, deadline)
    }

    /// Best move for the side to move; ties are broken at random.
    pub fn select_move(&mut self, game: &Game, depth: u32, deadline: Option<Instant>) -> Result<Move> {
        let analyses = self.analyse(game, depth, deadline)?;
        let best = analyses.iter().map(|a| a.score).max().ok_or(ChessError::NoLegalMoves)?;
        let tied: Vec<Move> = analyses.iter().filter(|a| a.score == best).map(|a| a.mv).collect();
        let pick = tied[self.rng.gen_range(0..tied.len())];
        log::info!("selected {pick} score {best} ({} tied, {} nodes)", tied.len(), self.nodes);
        Ok(pick)
    }

    /// Scores every legal move of the side to move.
    pub fn analyse(&mut self, game: &Game, depth: u32, deadline: Option<Instant>) -> Result<Vec<MoveAnalysis>> {
        self.nodes = 0;
        let color = game.to_move();
        let moves = rules::compute_all_moves(game.board(), color, game.history(), GenOptions::LEGAL)?;
        if moves.is_empty() {
            return Err(ChessError::NoLegalMoves);
        }
        let mut history = game.history().to_vec();
        let analyses = self.score_moves(game.board(), color, &mut history, moves, depth, deadline)?;
        for a in &analyses {
            log::debug!("candidate {} scored {}", a.mv, a.score);
        }
        Ok(analyses)
    }

    /// Whether to accept a draw offered by the side to move: only when the
    /// proposer stands better than us by more than the draw penalty.
    pub fn is_draw_acceptable(&self, game: &Game) -> Result<bool> {
        let proposer = game.to_move();
        let (board, history, state) = (game.board(), game.history(), game.state());
        let own = evaluate_board(board, !proposer, proposer, history, state)?;
        let theirs = evaluate_board(board, proposer, proposer, history, state)?;
        log::debug!("draw offer: own {own}, opponent {theirs}");
        Ok(theirs - own > DRAW_PENALTY)
    }

    fn score_moves(
        &mut self,
        board: &Board,
        color: Color,
        history: &mut Vec<Move>,
        moves: Vec<Move>,
        depth: u32,
        deadline: Option<Instant>,
    ) -> Result<Vec<MoveAnalysis>> {
        let mut out = Vec::with_capacity(moves.len());
        for mv in moves {
            let expired = deadline.map_or(false, |d| Instant::now() >= d);
            let score = if expired { DEFAULT_SCORE } else { self.score_move(board, color, history, mv, depth, deadline)? };
            out.push(MoveAnalysis { mv, score });
        }
        Ok(out)
    }

    fn score_move(
        &mut self,
        board: &Board,
        color: Color,
        history: &mut Vec<Move>,
        mv: Move,
        depth: u32,
        deadline: Option<Instant>,
    ) -> Result<i32> {
        self.nodes += 1;
        let mut child = board.copy();
        child.do_move(&mv);
        history.push(mv);
        let score = self.score_position(&child, color, history, depth, deadline);
        history.pop();
        score
    }

    /// Score for `color`, who just moved into `board`.
    fn score_position(
        &mut self,
        board: &Board,
        color: Color,
        history: &mut Vec<Move>,
        depth: u32,
        deadline: Option<Instant>,
    ) -> Result<i32> {
        let opponent = !color;
        let state = rules::game_state(board, opponent, history)?;
        if depth == 0 || state.is_terminal() {
            return evaluate_board(board, color, opponent, history, state);
        }
        let replies = rules::compute_all_moves(board, opponent, history, GenOptions::LEGAL)?;
        let scored = self.score_moves(board, opponent, history, replies, depth - 1, deadline)?;
        let best_reply = scored.iter().max_by_key(|a| a.score);
        if let Some(reply) = best_reply {
            log::trace!("depth {depth}: best reply {} scored {}", reply.mv, reply.score);
        }
        Ok(best_reply.map_or(DEFAULT_SCORE, |a| -a.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn default_config() {
        let c = SearchConfig::default();
        assert_eq!(c.depth, 1);
        assert!(c.use_book);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<SearchConfig>(&json).unwrap(), c);
    }

    #[test]
    fn zero_rng_picks_the_first_tied_move() {
        // With every candidate timed out, all scores tie at the default.
        let game = Game::default();
        let mut s = Searcher::with_rng(SearchConfig::default(), StepRng::new(0, 0));
        let past = Some(Instant::now());
        let analyses = s.analyse(&game, 0, past).unwrap();
        assert_eq!(analyses.len(), 20);
        assert!(analyses.iter().all(|a| a.score == DEFAULT_SCORE));
        let picked = s.select_move(&game, 0, past).unwrap();
        assert_eq!(picked, analyses[0].mv);
        assert_eq!(s.nodes(), 0);
    }

    #[test]
    fn book_is_consulted_first() {
        let game = Game::default();
        let mut s = Searcher::new(SearchConfig { seed: Some(3), ..SearchConfig::default() });
        let mv = s.choose_move(&game).unwrap();
        assert_eq!(s.nodes(), 0, "book move should not need a search");
        let first: Vec<String> = ["c2c4", "d2d4", "e2e4", "g1f3"].iter().map(|s| s.to_string()).collect();
        assert!(first.contains(&crate::notation::to_uci(&mv)));
    }

    #[test]
    fn huge_movetime_means_no_deadline() {
        let game = Game::default();
        let config = SearchConfig { depth: 0, movetime: Some(Duration::MAX), seed: Some(2), use_book: false };
        let mut s = Searcher::new(config);
        let mv = s.choose_move(&game).unwrap();
        assert!(game.legal_moves().unwrap().contains(&mv));
        assert_eq!(s.nodes(), 20);
    }

    #[test]
    fn without_book_choose_move_searches() {
        let game = Game::default();
        let config = SearchConfig { depth: 0, seed: Some(1), use_book: false, ..SearchConfig::default() };
        let mut s = Searcher::new(config).with_book(None);
        s.choose_move(&game).unwrap();
        assert_eq!(s.nodes(), 20);
    }
}
