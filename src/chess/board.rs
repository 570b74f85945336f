use super::{ChessError, Color, Piece, PieceType, Position};

/// 8x8 grid of squares. Row 0 is rank 8, column 0 is file a.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

impl Board {
    /// A board with no pieces on it
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting position
    pub fn starting_position() -> Self {
        let mut board = Self::empty();

        for (col, &piece_type) in BACK_RANK.iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(piece_type, Color::Black));
            board.squares[1][col] = Some(Piece::new(PieceType::Pawn, Color::Black));
            board.squares[6][col] = Some(Piece::new(PieceType::Pawn, Color::White));
            board.squares[7][col] = Some(Piece::new(piece_type, Color::White));
        }

        board
    }

    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        if !pos.is_on_board() {
            return None;
        }
        self.squares[pos.row()][pos.col()]
    }

    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) -> Result<(), ChessError> {
        if !pos.is_on_board() {
            let file = pos.file;
            let rank = pos.rank;
            return Err(ChessError::InvalidPosition(format!(
                "Position ({file},{rank}) is out of bounds"
            )));
        }

        self.squares[pos.row()][pos.col()] = piece;
        Ok(())
    }

    /// Move whatever stands on `from` to `to`, returning the piece it displaced.
    /// Both squares must be on the board.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let moving = self.squares[from.row()][from.col()].take();
        std::mem::replace(&mut self.squares[to.row()][to.col()], moving)
    }

    /// Occupied squares with their pieces, rank 8 first
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (Position::from_row_col(row, col), piece))
            })
        })
    }

    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| *piece == Piece::new(PieceType::King, color))
            .map(|(pos, _)| pos)
    }

    /// Piece-placement field of FEN: ranks 8 to 1 separated by '/',
    /// digits for runs of empty squares
    pub fn placement_fen(&self) -> String {
        let mut ranks = Vec::with_capacity(8);

        for row in &self.squares {
            let mut rank_string = String::new();
            let mut empty_count = 0;

            for cell in row {
                match cell {
                    Some(piece) => {
                        if empty_count > 0 {
                            rank_string.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        rank_string.push(piece.fen_char());
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                rank_string.push_str(&empty_count.to_string());
            }

            ranks.push(rank_string);
        }

        ranks.join("/")
    }

    /// Parse the piece-placement field of FEN
    pub fn from_placement_fen(placement: &str) -> Result<Self, ChessError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            let found_ranks = ranks.len();
            return Err(ChessError::InvalidFen(format!(
                "Piece placement must have exactly 8 ranks separated by '/', found {found_ranks}"
            )));
        }

        let mut board = Self::empty();

        for (row, rank_str) in ranks.iter().enumerate() {
            let fen_rank_number = 8 - row;

            if rank_str.is_empty() {
                return Err(ChessError::InvalidFen(format!(
                    "Rank {fen_rank_number} cannot be empty"
                )));
            }

            let mut col = 0;

            for c in rank_str.chars() {
                if col >= 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "Rank {fen_rank_number} has more than 8 squares (found character '{c}')"
                    )));
                }

                if let Some(empty_squares) = c.to_digit(10) {
                    let empty_squares = empty_squares as usize;
                    if empty_squares == 0 || col + empty_squares > 8 {
                        return Err(ChessError::InvalidFen(format!(
                            "Invalid empty square count '{c}' in rank {fen_rank_number}"
                        )));
                    }
                    col += empty_squares;
                } else {
                    let piece = Piece::from_fen_char(c).map_err(|_| {
                        ChessError::InvalidFen(format!(
                            "Invalid piece character '{c}' in rank {fen_rank_number} (valid pieces: KQRBNPkqrbnp)"
                        ))
                    })?;
                    board.squares[row][col] = Some(piece);
                    col += 1;
                }
            }

            if col != 8 {
                return Err(ChessError::InvalidFen(format!(
                    "Rank {fen_rank_number} must represent exactly 8 squares, found {col}"
                )));
            }
        }

        Ok(board)
    }

    /// Board as text from White's perspective, with coordinate labels.
    /// `unicode` selects figurines instead of FEN letters.
    pub fn render(&self, unicode: bool) -> String {
        let mut result = String::from("  a b c d e f g h\n");

        for (row, cells) in self.squares.iter().enumerate() {
            let rank_number = 8 - row;
            result.push_str(&format!("{rank_number} "));

            let symbols: Vec<String> = cells
                .iter()
                .map(|cell| match cell {
                    Some(piece) if unicode => piece.unicode_symbol().to_string(),
                    Some(piece) => piece.fen_char().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            result.push_str(&symbols.join(" "));

            result.push_str(&format!(" {rank_number}\n"));
        }

        result.push_str("  a b c d e f g h");
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_placement() {
        assert_eq!(
            Board::starting_position().placement_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(Board::empty().placement_fen(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn relocate_returns_displaced_piece() {
        let mut board = Board::starting_position();
        let b1: Position = "b1".parse().unwrap();
        let b8: Position = "b8".parse().unwrap();
        let displaced = board.relocate(b1, b8);
        assert_eq!(displaced, Some(Piece::new(PieceType::Knight, Color::Black)));
        assert_eq!(board.get_piece(b1), None);
        assert_eq!(
            board.get_piece(b8),
            Some(Piece::new(PieceType::Knight, Color::White))
        );
    }

    #[test]
    fn placement_rejects_bad_rank_widths() {
        assert!(Board::from_placement_fen("8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement_fen("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement_fen("ppppppppp/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement_fen("7/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement_fen("x7/8/8/8/8/8/8/8").is_err());
    }

    #[test]
    fn finds_kings() {
        let board = Board::starting_position();
        assert_eq!(board.find_king(Color::White).unwrap().to_string(), "e1");
        assert_eq!(board.find_king(Color::Black).unwrap().to_string(), "e8");
        assert_eq!(Board::empty().find_king(Color::White), None);
    }
}
