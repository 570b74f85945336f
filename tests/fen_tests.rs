use chessgate::chess::{ChessError, Color, Game, Piece, PieceType, Position};

#[cfg(test)]
mod fen_parsing_tests {
    use super::*;

    #[test]
    fn test_standard_starting_position_fen() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let game = Game::from_fen(fen).expect("Failed to parse standard starting position FEN");
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_valid_fen_variations_round_trip() {
        let test_cases = vec![
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
            "8/8/8/8/8/8/8/8 b - - 50 100",
            "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 37",
        ];

        for fen in test_cases {
            let game = Game::from_fen(fen).unwrap_or_else(|e| panic!("{fen}: {e}"));
            assert_eq!(game.to_fen(), fen);
        }
    }

    #[test]
    fn test_fields_are_loaded() {
        let game = Game::from_fen("4k3/8/8/3pP3/8/8/8/4K3 b - d6 7 37").unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.en_passant_target(), Some("d6".parse::<Position>().unwrap()));
        assert_eq!(game.halfmove_clock(), 7);
        assert_eq!(game.fullmove_number(), 37);
        assert_eq!(game.castling_rights().to_fen(), "-");
        assert_eq!(
            game.board().get_piece("e5".parse().unwrap()),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let game = Game::from_fen("  8/8/8/8/8/8/8/K6k w - - 0 1\n").unwrap();
        assert_eq!(game.to_fen(), "8/8/8/8/8/8/8/K6k w - - 0 1");
    }

    #[test]
    fn test_moves_continue_from_loaded_position() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R b K - 3 20").unwrap();
        game.apply_move("e8".parse().unwrap(), "d7".parse().unwrap(), None)
            .unwrap();
        assert_eq!(game.fullmove_number(), 21);
        assert_eq!(game.to_fen(), "8/3k4/8/8/8/8/8/4K2R w K - 3 21");
    }
}

#[cfg(test)]
mod fen_error_tests {
    use super::*;

    fn assert_invalid(fen: &str) {
        match Game::from_fen(fen) {
            Err(ChessError::InvalidFen(_)) => {}
            other => panic!("expected InvalidFen for '{fen}', got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_field_count() {
        assert_invalid("");
        assert_invalid("   ");
        assert_invalid("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0");
        assert_invalid("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra");
    }

    #[test]
    fn test_bad_placement() {
        assert_invalid("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1");
        assert_invalid("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNRR w KQkq - 0 1");
        assert_invalid("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1");
        assert_invalid("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1");
        assert_invalid("rnbqkbnr/pppppppp/0/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    }

    #[test]
    fn test_bad_side_fields() {
        let placement = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
        assert_invalid(&format!("{placement} x KQkq - 0 1"));
        assert_invalid(&format!("{placement} w KQxq - 0 1"));
        assert_invalid(&format!("{placement} w QK - 0 1"));
        assert_invalid(&format!("{placement} w KQkq e4 0 1"));
        assert_invalid(&format!("{placement} w KQkq z3 0 1"));
        assert_invalid(&format!("{placement} w KQkq - -1 1"));
        assert_invalid(&format!("{placement} w KQkq - 0 0"));
        assert_invalid(&format!("{placement} w KQkq - 0 one"));
    }
}
