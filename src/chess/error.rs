use super::piece::Color;
use super::position::Position;

/// Errors raised while parsing chess input (squares, pieces, FEN, move text)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid piece type: {0}")]
    InvalidPieceType(String),
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
    #[error("Invalid move: {0}")]
    InvalidMove(String),
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
}

/// Why the engine refused a proposed move.
///
/// A rejection is a value, not a failure: the game state is left untouched
/// and the caller can simply try another move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("square {0} is off the board")]
    OffBoard(Position),

    #[error("no piece at {0}")]
    NoPieceAtSource(Position),

    #[error("cannot move {piece_color} piece when it is {turn}'s turn")]
    WrongTurn { piece_color: Color, turn: Color },

    #[error("source and destination are both {0}")]
    SameSquare(Position),

    /// Only produced when strict legality checking is enabled
    #[error("illegal move {from}{to}: {reason}")]
    Illegal {
        from: Position,
        to: Position,
        reason: String,
    },
}
