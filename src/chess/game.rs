use super::fen::{CastlingRights, FenRecord};
use super::moves::{self, Move, MoveRequest};
use super::{rules, Board, ChessError, Color, MoveRejection, PieceType, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Opening moves reported by [`Game::legal_moves`] whatever the position
pub const DEMO_MOVES: [&str; 6] = ["e4", "e5", "d4", "d5", "Nf3", "Nc6"];

/// Half-move clock value at which the fifty-move rule ends the game
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// How much checking [`Game::apply_move`] does before accepting a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalityMode {
    /// Only the side to move and a non-empty, non-null move are checked
    #[default]
    Permissive,
    /// Movement patterns, path obstruction and king safety are enforced too
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Checkmate,
    Draw,
}

/// Authoritative game state: board, turn, counters and move history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Position>,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<Move>,
    check: bool,
    checkmate: bool,
    mode: LegalityMode,
}

/// Serializable view of a game for renderers and persistence layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub fen: String,
    pub turn: Color,
    pub status: GameStatus,
    pub mode: LegalityMode,
    pub history: Vec<Move>,
}

impl Game {
    /// New game in the starting position with permissive move acceptance
    pub fn new() -> Self {
        Self::with_mode(LegalityMode::Permissive)
    }

    pub fn with_mode(mode: LegalityMode) -> Self {
        Self {
            board: Board::starting_position(),
            turn: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
            check: false,
            checkmate: false,
            mode,
        }
    }

    /// Load a position from FEN. History starts empty.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let record = FenRecord::parse(fen)?;
        Ok(Self {
            board: record.board,
            turn: record.active_color,
            castling_rights: record.castling_rights,
            en_passant_target: record.en_passant_target,
            halfmove_clock: record.halfmove_clock,
            fullmove_number: record.fullmove_number,
            history: Vec::new(),
            check: false,
            checkmate: false,
            mode: LegalityMode::Permissive,
        })
    }

    /// Restore the starting position, clearing history, counters and flags.
    /// The legality mode is kept.
    pub fn reset(&mut self) {
        *self = Self::with_mode(self.mode);
    }

    pub fn mode(&self) -> LegalityMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LegalityMode) {
        self.mode = mode;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Try to move the piece on `from` to `to`.
    ///
    /// Rejected when either square is off the board, when `from` is empty or
    /// holds a piece of the side not to move, or when `from` equals `to` (and, in [`LegalityMode::Strict`], when the move breaks
    /// the movement rules). A rejection leaves the game untouched.
    ///
    /// An accepted move silently captures whatever stands on `to`, flips the
    /// turn and is appended to the history. Castling rights, the en passant
    /// target, the half-move clock and the check flags are not updated, and a
    /// requested promotion is recorded without changing the pawn.
    pub fn apply_move(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<PieceType>,
    ) -> Result<Move, MoveRejection> {
        if let Some(square) = [from, to].into_iter().find(|p| !p.is_on_board()) {
            warn!("Rejected move {}{}: {} is off the board", from, to, square);
            return Err(MoveRejection::OffBoard(square));
        }

        let piece = self.board.get_piece(from).ok_or_else(|| {
            warn!("Rejected move {}{}: no piece at source", from, to);
            MoveRejection::NoPieceAtSource(from)
        })?;

        if piece.color != self.turn {
            warn!(
                "Rejected move {}{}: {} piece moved on {}'s turn",
                from, to, piece.color, self.turn
            );
            return Err(MoveRejection::WrongTurn {
                piece_color: piece.color,
                turn: self.turn,
            });
        }

        if from == to {
            warn!("Rejected move {}{}: same square", from, to);
            return Err(MoveRejection::SameSquare(from));
        }

        if self.mode == LegalityMode::Strict {
            rules::check_move(&self.board, from, to, piece).map_err(|reason| {
                warn!("Rejected move {}{}: {}", from, to, reason);
                MoveRejection::Illegal { from, to, reason }
            })?;
        }

        let captured = self.board.relocate(from, to);
        let notation = moves::notation(piece.piece_type, from, to, captured.is_some());

        self.turn = self.turn.opposite();
        if self.turn == Color::White {
            self.fullmove_number += 1;
        }

        let record = Move {
            from,
            to,
            piece_type: piece.piece_type,
            color: piece.color,
            notation,
            captured: captured.map(|p| p.piece_type),
            promotion,
        };
        debug!("Applied move {} (ply {})", record.notation, self.history.len() + 1);
        self.history.push(record.clone());

        Ok(record)
    }

    /// [`Game::apply_move`] for a parsed request
    pub fn apply_request(&mut self, request: MoveRequest) -> Result<Move, MoveRejection> {
        self.apply_move(request.from, request.to, request.promotion)
    }

    pub fn to_fen(&self) -> String {
        FenRecord {
            board: self.board.clone(),
            active_color: self.turn,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Suggested moves for the demo opponent.
    ///
    /// This is a fixed list of opening moves and does not depend on the
    /// position. Use [`rules::generate_legal_moves`] for a real generator.
    pub fn legal_moves(&self) -> Vec<String> {
        DEMO_MOVES.iter().map(|m| m.to_string()).collect()
    }

    pub fn is_game_over(&self) -> bool {
        self.checkmate || self.is_draw()
    }

    pub fn is_in_check(&self) -> bool {
        self.check
    }

    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Fifty-move rule only
    pub fn is_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_LIMIT
    }

    /// Force the check flags. Move application never sets them, so this is
    /// the only way a game reaches checkmate.
    pub fn set_check_flags(&mut self, check: bool, checkmate: bool) {
        self.check = check;
        self.checkmate = checkmate;
    }

    pub fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate
        } else if self.is_draw() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            fen: self.to_fen(),
            turn: self.turn,
            status: self.status(),
            mode: self.mode,
            history: self.history.clone(),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
