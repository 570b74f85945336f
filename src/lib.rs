pub mod chess;
pub mod cli;
pub mod gate;
pub mod session;

// Re-export key types for easy testing
pub use chess::{Game, LegalityMode, Move, MoveRejection, MoveRequest};
pub use gate::{Credentials, SequenceDetector};
pub use session::GameSession;
