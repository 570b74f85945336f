use super::error::ChessError;
use super::piece::{Color, PieceType};
use super::position::Position;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A proposed move, as typed by a player or dropped on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceType>,
}

impl MoveRequest {
    pub const fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn with_promotion(from: Position, to: Position, promotion: PieceType) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Dashed `from-to` key used by the unlock sequence, e.g. `e2-e4`
    pub fn key(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

fn move_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([a-hA-H][1-8])[-\s]?([a-hA-H][1-8])=?([qrbnQRBN])?$")
            .expect("move pattern is a valid regex")
    })
}

/// Accepts `e2e4`, `e2-e4`, `e2 e4` and a promotion suffix (`e7e8q`, `e7-e8=Q`)
impl FromStr for MoveRequest {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let captures = move_pattern().captures(trimmed).ok_or_else(|| {
            ChessError::InvalidMove(format!(
                "Invalid move format '{trimmed}'. Expected 'e2e4', 'e2-e4' or 'e7e8q' for promotion."
            ))
        })?;

        let from = captures[1].parse::<Position>()?;
        let to = captures[2].parse::<Position>()?;
        let promotion = captures
            .get(3)
            .map(|m| m.as_str().parse::<PieceType>())
            .transpose()?;

        Ok(Self { from, to, promotion })
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// A move the engine accepted, as recorded in the game history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece_type: PieceType,
    pub color: Color,
    /// Display notation, e.g. `e2e4`, `Ng1f3`, `e4xd5`
    pub notation: String,
    /// Type of the piece removed from `to`, if any
    pub captured: Option<PieceType>,
    /// Promotion the caller asked for. Recorded only; the board keeps the pawn.
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Dashed `from-to` key, see [`MoveRequest::key`]
    pub fn key(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

/// Simplified display notation: piece letter (omitted for pawns), source
/// square, `x` on capture, destination square. No disambiguation, check
/// suffixes or castling symbols.
pub fn notation(piece_type: PieceType, from: Position, to: Position, capture: bool) -> String {
    let mut san = String::with_capacity(6);
    if piece_type != PieceType::Pawn {
        san.push(piece_type.letter());
    }
    san.push_str(&from.to_string());
    if capture {
        san.push('x');
    }
    san.push_str(&to.to_string());
    san
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn parses_accepted_input_forms() {
        for input in ["e2e4", "e2-e4", "e2 e4", " E2E4 "] {
            let request: MoveRequest = input.parse().unwrap();
            assert_eq!(request, MoveRequest::new(pos("e2"), pos("e4")), "{input}");
        }

        let promo: MoveRequest = "e7e8q".parse().unwrap();
        assert_eq!(promo.promotion, Some(PieceType::Queen));
        let promo: MoveRequest = "a2-a1=N".parse().unwrap();
        assert_eq!(promo.promotion, Some(PieceType::Knight));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "e4", "Nf3", "e2e9", "e2e4k", "e2--e4", "O-O"] {
            assert!(input.parse::<MoveRequest>().is_err(), "{input}");
        }
    }

    #[test]
    fn notation_shapes() {
        assert_eq!(notation(PieceType::Pawn, pos("e2"), pos("e4"), false), "e2e4");
        assert_eq!(notation(PieceType::Knight, pos("g1"), pos("f3"), false), "Ng1f3");
        assert_eq!(notation(PieceType::Pawn, pos("e4"), pos("d5"), true), "e4xd5");
        assert_eq!(notation(PieceType::Queen, pos("d1"), pos("h5"), true), "Qd1xh5");
    }

    #[test]
    fn request_key_and_display() {
        let request = MoveRequest::with_promotion(pos("b7"), pos("b8"), PieceType::Rook);
        assert_eq!(request.key(), "b7-b8");
        assert_eq!(request.to_string(), "b7b8r");
    }
}
