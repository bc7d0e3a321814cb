use crate::board::{Board, Color};
use crate::error::Result;
use crate::moves::Move;
use crate::rules::{self, GameState, GenOptions};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Engine,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
}

impl Player {
    pub fn human(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: PlayerKind::Human }
    }

    pub fn engine(name: impl Into<String>) -> Self {
        Self { name: name.into(), kind: PlayerKind::Engine }
    }
}

/// One game session: the board, the moves that led to it, and who is to move.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    history: Vec<Move>,
    to_move: Color,
    state: GameState,
    players: [Player; 2],
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Player::human("White"), Player::engine("Black"))
    }
}

impl Game {
    pub fn new(white: Player, black: Player) -> Self {
        Self {
            board: Board::standard(),
            history: Vec::new(),
            to_move: Color::White,
            state: GameState::InProgress,
            players: [white, black],
        }
    }

    /// A game starting from an arbitrary placement with an empty history.
    pub fn from_board(board: Board, to_move: Color) -> Result<Self> {
        let mut game = Self { board, to_move, ..Self::default() };
        game.refresh_state()?;
        Ok(game)
    }

    /// Replays `moves` from the initial position.
    pub fn from_moves(moves: &[Move]) -> Result<Self> {
        let mut game = Self::default();
        for mv in moves {
            game.apply(*mv)?;
        }
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.players[0],
            Color::Black => &self.players[1],
        }
    }

    pub fn legal_moves(&self) -> Result<Vec<Move>> {
        rules::compute_all_moves(&self.board, self.to_move, &self.history, GenOptions::LEGAL)
    }

    /// Plays a move produced by the rules engine and reclassifies the game.
    pub fn apply(&mut self, mv: Move) -> Result<GameState> {
        self.board.do_move(&mv);
        self.history.push(mv);
        self.to_move = !self.to_move;
        self.refresh_state()?;
        log::debug!("{} played {}, state {:?}", !self.to_move, mv, self.state);
        Ok(self.state)
    }

    /// Takes back the last move, if any.
    pub fn undo(&mut self) -> Result<Option<Move>> {
        let Some(mv) = self.history.pop() else {
            return Ok(None);
        };
        self.board.undo_move(&mv);
        self.to_move = !self.to_move;
        self.refresh_state()?;
        Ok(Some(mv))
    }

    /// Ends the game as a draw both players agreed to.
    pub fn agree_draw(&mut self) {
        self.state = GameState::DrawAgreement;
    }

    fn refresh_state(&mut self) -> Result<()> {
        self.state = rules::game_state(&self.board, self.to_move, &self.history)?;
        Ok(())
    }
}
