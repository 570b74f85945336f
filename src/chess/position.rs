use super::error::ChessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A square on the board in algebraic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: u8, // 0-7 corresponding to a-h
    pub rank: u8, // 0-7 corresponding to 1-8
}

impl Position {
    pub fn new(file: u8, rank: u8) -> Result<Self, ChessError> {
        if file > 7 {
            return Err(ChessError::InvalidPosition(format!(
                "File must be 0-7, got {}",
                file
            )));
        }
        if rank > 7 {
            return Err(ChessError::InvalidPosition(format!(
                "Rank must be 0-7, got {}",
                rank
            )));
        }

        Ok(Self { file, rank })
    }

    /// Create position without validation (for internal use when bounds are guaranteed)
    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Create position from file and rank characters
    pub fn from_chars(file: char, rank: char) -> Result<Self, ChessError> {
        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) {
            return Err(ChessError::InvalidPosition(format!(
                "Invalid file '{}'. Must be a-h.",
                file
            )));
        }

        if !('1'..='8').contains(&rank) {
            return Err(ChessError::InvalidPosition(format!(
                "Invalid rank '{}'. Must be 1-8.",
                rank
            )));
        }

        Ok(Position {
            file: file_lower as u8 - b'a',
            rank: rank as u8 - b'1',
        })
    }

    /// Whether both coordinates lie within a-h and 1-8. Only squares built
    /// with `new_unchecked`, struct literals or deserialization can fail this.
    pub fn is_on_board(&self) -> bool {
        self.file <= 7 && self.rank <= 7
    }

    /// Grid row: row 0 holds rank 8, row 7 holds rank 1
    pub fn row(&self) -> usize {
        7 - self.rank as usize
    }

    /// Grid column: column 0 holds file a
    pub fn col(&self) -> usize {
        self.file as usize
    }

    pub const fn from_row_col(row: usize, col: usize) -> Self {
        Self {
            file: col as u8,
            rank: 7 - row as u8,
        }
    }

    pub fn file_char(&self) -> char {
        (self.file + b'a') as char
    }

    pub fn rank_char(&self) -> char {
        (self.rank + b'1') as char
    }

    /// Square reached by stepping `file_delta` files and `rank_delta` ranks,
    /// or `None` when that leaves the board
    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Position> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Position::new_unchecked(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// All 64 squares, a1 first
    pub fn all_positions() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Position { file, rank }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", self.file_char(), self.rank_char())
        } else {
            write!(f, "({},{})", self.file, self.rank)
        }
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank),
            _ => Err(ChessError::InvalidPosition(format!(
                "Position must be exactly 2 characters (e.g., 'e4'), got '{}'",
                s
            ))),
        }
    }
}
