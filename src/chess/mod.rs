pub use self::board::Board;
pub use self::error::{ChessError, MoveRejection};
pub use self::fen::{CastlingRights, FenRecord};
pub use self::game::{Game, GameSnapshot, GameStatus, LegalityMode, DEMO_MOVES, FIFTY_MOVE_LIMIT};
pub use self::moves::{Move, MoveRequest};
pub use self::piece::{Color, Piece, PieceType};
pub use self::position::Position;

mod board;
mod error;
mod fen;
mod game;
pub mod moves;
mod piece;
mod position;
pub mod rules;
