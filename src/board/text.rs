use super::{Board, Piece, Square};
use crate::error::{ChessError, Result};
use std::fmt;

const BLANK: char = ' ';

impl Board {
    /// Fixed-width text form: rank 8 first, each cell a glyph (or blank)
    /// followed by a space.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity(8 * 8 * 4);
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                out.push(self.get(Square::new(file, rank)).map_or(BLANK, Piece::glyph));
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    /// Inverse of `dump`. `.` is accepted as a blank, and missing trailing
    /// cells on a line are treated as blanks.
    pub fn parse(text: &str) -> Result<Board> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() != 8 {
            return Err(ChessError::BoardParse(format!("expected 8 lines, got {}", lines.len())));
        }
        let mut board = Board::empty();
        for (i, line) in lines.iter().enumerate() {
            let rank = 7 - i as u8;
            let chars: Vec<char> = line.chars().collect();
            if chars.len() > 16 {
                return Err(ChessError::BoardParse(format!("line {} is too long: {line:?}", i + 1)));
            }
            for (idx, &c) in chars.iter().enumerate() {
                if idx % 2 == 1 {
                    if c != ' ' {
                        return Err(ChessError::BoardParse(format!("line {}: expected a separator at column {}", i + 1, idx + 1)));
                    }
                    continue;
                }
                let file = (idx / 2) as u8;
                let piece = match c {
                    BLANK | '.' => None,
                    g => Some(Piece::from_glyph(g).ok_or_else(|| {
                        ChessError::BoardParse(format!("line {}: unknown glyph {g:?}", i + 1))
                    })?),
                };
                board.set(Square::new(file, rank), piece);
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
