//! Opening book: a prefix tree of known opening lines keyed by UCI moves.

use crate::error::Result;
use crate::game::Game;
use crate::moves::Move;
use crate::notation::{match_uci, to_uci};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// A named line in UCI notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessOpening {
    pub name: String,
    pub moves: Vec<String>,
}

fn line(name: &str, moves: &[&str]) -> ChessOpening {
    ChessOpening { name: name.to_string(), moves: moves.iter().map(|m| m.to_string()).collect() }
}

/// The built-in corpus.
pub fn standard_openings() -> Vec<ChessOpening> {
    vec![
        line("Italian Game", &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1g1", "g8f6"]),
        line("Two Knights Defense", &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]),
        line("Ruy Lopez", &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6"]),
        line("Scotch Game", &["e2e4", "e7e5", "g1f3", "b8c6", "d2d4", "e5d4", "f3d4", "f8c5"]),
        line("Petrov's Defense", &["e2e4", "e7e5", "g1f3", "g8f6", "f3e5", "d7d6", "e5f3", "f6e4"]),
        line("Vienna Game", &["e2e4", "e7e5", "b1c3", "g8f6", "f2f4", "d7d5", "f4e5", "f6e4"]),
        line("King's Gambit", &["e2e4", "e7e5", "f2f4", "e5f4", "g1f3", "g7g5", "h2h4", "g5g4"]),
        line("Sicilian Defense - Dragon Variation", &["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "g7g6"]),
        line("Sicilian Defense - Najdorf Variation", &["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "a7a6"]),
        line("French Defense", &["e2e4", "e7e6", "d2d4", "d7d5", "b1c3", "f8b4", "e4e5", "c7c5"]),
        line("Caro-Kann Defense", &["e2e4", "c7c6", "d2d4", "d7d5", "b1c3", "d5e4", "c3e4", "c8f5"]),
        line("Pirc Defense", &["e2e4", "d7d6", "d2d4", "g8f6", "b1c3", "g7g6", "f2f4", "f8g7"]),
        line("Alekhine's Defense", &["e2e4", "g8f6", "e4e5", "f6d5", "d2d4", "d7d6", "g1f3", "c8g4"]),
        line("Scandinavian Defense", &["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "g8f6"]),
        line("Queen's Gambit Declined", &["d2d4", "d7d5", "c2c4", "e7e6", "b1c3", "g8f6", "c1g5", "f8e7"]),
        line("Queen's Gambit Accepted", &["d2d4", "d7d5", "c2c4", "d5c4", "g1f3", "g8f6", "e2e3", "e7e6"]),
        line("Slav Defense", &["d2d4", "d7d5", "c2c4", "c7c6", "g1f3", "g8f6", "b1c3", "d5c4"]),
        line("London System", &["d2d4", "d7d5", "g1f3", "g8f6", "c1f4", "c7c5", "e2e3", "b8c6"]),
        line("King's Indian Defense", &["d2d4", "g8f6", "c2c4", "g7g6", "b1c3", "f8g7", "e2e4", "d7d6"]),
        line("Nimzo-Indian Defense", &["d2d4", "g8f6", "c2c4", "e7e6", "b1c3", "f8b4", "e2e3", "e8g8"]),
        line("Queen's Indian Defense", &["d2d4", "g8f6", "c2c4", "e7e6", "g1f3", "b7b6", "g2g3", "c8b7"]),
        line("Catalan Opening", &["d2d4", "g8f6", "c2c4", "e7e6", "g2g3", "d7d5", "f1g2", "f8e7"]),
        line("Benoni Defense", &["d2d4", "g8f6", "c2c4", "c7c5", "d4d5", "e7e6", "b1c3", "e6d5"]),
        line("Dutch Defense", &["d2d4", "f7f5", "g2g3", "g8f6", "f1g2", "e7e6", "g1f3", "f8e7"]),
        line("English Opening", &["c2c4", "e7e5", "b1c3", "g8f6", "g2g3", "d7d5", "c4d5", "f6d5"]),
        line("Reti Opening", &["g1f3", "d7d5", "c2c4", "e7e6", "g2g3", "g8f6", "f1g2", "f8e7"]),
    ]
}

/// Trie node; `name` is set where a known line ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningNode {
    pub name: Option<String>,
    pub children: BTreeMap<String, OpeningNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningBook {
    root: OpeningNode,
}

impl OpeningBook {
    pub fn new(openings: &[ChessOpening]) -> Self {
        let mut root = OpeningNode::default();
        for opening in openings {
            let mut node = &mut root;
            for mv in &opening.moves {
                node = node.children.entry(mv.clone()).or_default();
            }
            node.name = Some(opening.name.clone());
        }
        Self { root }
    }

    /// Loads a JSON array of `{ "name": ..., "moves": [...] }` records.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let openings: Vec<ChessOpening> = serde_json::from_str(json)?;
        Ok(Self::new(&openings))
    }

    /// Shared book built from `standard_openings` on first use.
    pub fn standard() -> Arc<OpeningBook> {
        static BOOK: OnceLock<Arc<OpeningBook>> = OnceLock::new();
        BOOK.get_or_init(|| Arc::new(OpeningBook::new(&standard_openings()))).clone()
    }

    pub fn root(&self) -> &OpeningNode {
        &self.root
    }

    /// Node reached by following `history`, if every move is in the book.
    pub fn node_for(&self, history: &[Move]) -> Option<&OpeningNode> {
        history.iter().try_fold(&self.root, |node, mv| node.children.get(&to_uci(mv)))
    }

    /// Book continuations for the current position of `game`; empty once the
    /// game leaves the book.
    pub fn find_possible_moves(&self, game: &Game) -> Result<Vec<Move>> {
        let Some(node) = self.node_for(game.history()) else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(node.children.len());
        for uci in node.children.keys() {
            match match_uci(game.board(), game.to_move(), game.history(), uci) {
                Ok(mv) => out.push(mv),
                Err(e) => log::warn!("book move {uci} does not apply: {e}"),
            }
        }
        Ok(out)
    }

    /// Name of the deepest named line the history has followed.
    pub fn opening_name(&self, history: &[Move]) -> Option<&str> {
        let mut node = &self.root;
        let mut name = None;
        for mv in history {
            match node.children.get(&to_uci(mv)) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(n) = node.name.as_deref() {
                name = Some(n);
            }
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, uci: &str) {
        let mv = match_uci(game.board(), game.to_move(), game.history(), uci).unwrap();
        game.apply(mv).unwrap();
    }

    #[test]
    fn root_offers_every_first_move() {
        let book = OpeningBook::standard();
        let moves = book.find_possible_moves(&Game::default()).unwrap();
        let mut ucis: Vec<String> = moves.iter().map(to_uci).collect();
        ucis.sort();
        assert_eq!(ucis, vec!["c2c4", "d2d4", "e2e4", "g1f3"]);
    }

    #[test]
    fn follows_a_line_and_names_it() {
        let book = OpeningBook::standard();
        let mut game = Game::default();
        for uci in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4"] {
            play(&mut game, uci);
        }
        let moves: Vec<String> = book.find_possible_moves(&game).unwrap().iter().map(to_uci).collect();
        assert_eq!(moves, vec!["f8c5", "g8f6"]);
        play(&mut game, "g8f6");
        assert_eq!(book.opening_name(game.history()), Some("Two Knights Defense"));
    }

    #[test]
    fn leaving_the_book_yields_nothing() {
        let book = OpeningBook::standard();
        let mut game = Game::default();
        play(&mut game, "a2a3");
        assert!(book.find_possible_moves(&game).unwrap().is_empty());
        assert_eq!(book.opening_name(game.history()), None);
    }

    #[test]
    fn every_standard_line_is_playable() {
        for opening in standard_openings() {
            let mut game = Game::default();
            for uci in &opening.moves {
                let mv = match_uci(game.board(), game.to_move(), game.history(), uci)
                    .unwrap_or_else(|e| panic!("{}: {e}", opening.name));
                game.apply(mv).unwrap();
            }
            assert_eq!(OpeningBook::standard().opening_name(game.history()), Some(opening.name.as_str()));
        }
    }

    #[test]
    fn loads_from_json() {
        let book = OpeningBook::from_json(r#"[{"name": "Bird", "moves": ["f2f4"]}]"#).unwrap();
        assert_eq!(book.root().children.len(), 1);
        assert_eq!(book.root().children["f2f4"].name.as_deref(), Some("Bird"));
    }
}
