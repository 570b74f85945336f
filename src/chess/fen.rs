//! Forsyth–Edwards Notation fields.
//!
//! `<placement> <active-color> <castling> <en-passant> <halfmove> <fullmove>`

use super::{Board, ChessError, Color, Position};
use serde::{Deserialize, Serialize};

/// Castling availability for both players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    /// All castling available
    pub const fn all() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    /// Parse the castling field ("KQkq", "Kq", "-")
    pub fn from_fen(field: &str) -> Result<Self, ChessError> {
        if field == "-" {
            return Ok(Self::none());
        }

        let mut rights = Self::none();
        let mut last_index = None;

        for c in field.chars() {
            let index = match c {
                'K' => 0,
                'Q' => 1,
                'k' => 2,
                'q' => 3,
                _ => {
                    return Err(ChessError::InvalidFen(format!(
                        "Invalid castling rights character '{c}' (valid: K, Q, k, q, or - for none)"
                    )))
                }
            };
            if last_index.is_some_and(|last| index <= last) {
                return Err(ChessError::InvalidFen(format!(
                    "Castling rights '{field}' repeat a flag or are not in KQkq order"
                )));
            }
            last_index = Some(index);

            match index {
                0 => rights.white_kingside = true,
                1 => rights.white_queenside = true,
                2 => rights.black_kingside = true,
                _ => rights.black_queenside = true,
            }
        }

        Ok(rights)
    }

    pub fn to_fen(&self) -> String {
        let mut result = String::new();

        if self.white_kingside {
            result.push('K');
        }
        if self.white_queenside {
            result.push('Q');
        }
        if self.black_kingside {
            result.push('k');
        }
        if self.black_queenside {
            result.push('q');
        }

        if result.is_empty() {
            "-".to_string()
        } else {
            result
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

/// The six decoded FEN fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    pub board: Board,
    pub active_color: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Position>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenRecord {
    pub fn parse(fen: &str) -> Result<Self, ChessError> {
        let fen = fen.trim();
        if fen.is_empty() {
            return Err(ChessError::InvalidFen(
                "FEN string cannot be empty".to_string(),
            ));
        }

        let parts: Vec<&str> = fen.split_whitespace().collect();
        let [placement, active_color, castling, en_passant, halfmove, fullmove] =
            parts.as_slice()
        else {
            let found_count = parts.len();
            return Err(ChessError::InvalidFen(format!(
                "FEN must have exactly 6 fields (piece_placement active_color castling_rights en_passant halfmove fullmove), found {found_count}"
            )));
        };

        let board = Board::from_placement_fen(placement)?;

        let active_color = match *active_color {
            "w" => Color::White,
            "b" => Color::Black,
            _ => {
                return Err(ChessError::InvalidFen(format!(
                    "Invalid active color '{active_color}' (must be 'w' for White or 'b' for Black)"
                )))
            }
        };

        let castling_rights = CastlingRights::from_fen(castling)?;

        let en_passant_target = match *en_passant {
            "-" => None,
            square => {
                let pos = square.parse::<Position>().map_err(|e| {
                    ChessError::InvalidFen(format!("Invalid en passant target '{square}': {e}"))
                })?;
                if pos.rank != 2 && pos.rank != 5 {
                    return Err(ChessError::InvalidFen(format!(
                        "Invalid en passant target '{square}' (en passant squares must be on rank 3 or 6)"
                    )));
                }
                Some(pos)
            }
        };

        let halfmove_clock = halfmove.parse::<u32>().map_err(|e| {
            ChessError::InvalidFen(format!(
                "Invalid halfmove clock '{halfmove}' (must be a non-negative integer): {e}"
            ))
        })?;

        let fullmove_number = fullmove.parse::<u32>().map_err(|e| {
            ChessError::InvalidFen(format!(
                "Invalid fullmove number '{fullmove}' (must be a positive integer): {e}"
            ))
        })?;
        if fullmove_number == 0 {
            return Err(ChessError::InvalidFen(
                "Fullmove number must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            board,
            active_color,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
        })
    }

    pub fn to_fen(&self) -> String {
        let en_passant = self
            .en_passant_target
            .map(|pos| pos.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {} {} {}",
            self.board.placement_fen(),
            self.active_color.fen_char(),
            self.castling_rights.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
