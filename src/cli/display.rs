use crate::chess::{Game, GameStatus};

/// Render the board plus the side to move and move number
pub fn format_board(game: &Game, unicode: bool) -> String {
    let mut out = game.board().render(unicode);
    out.push_str(&format!("\nTo move: {}", game.turn()));
    out.push_str(&format!("\nMove #: {}", game.fullmove_number()));
    if game.halfmove_clock() > 0 {
        out.push_str(&format!(
            "\nHalfmove clock: {} (50-move rule)",
            game.halfmove_clock()
        ));
    }
    out
}

/// Move history as a two-column table, one row per full move
pub fn format_move_history(game: &Game) -> String {
    let history = game.history();
    if history.is_empty() {
        return "No moves in history.".to_string();
    }

    let mut lines = vec![
        "Move History".to_string(),
        "┌──────┬─────────┬─────────┐".to_string(),
        "│ Move │  White  │  Black  │".to_string(),
        "├──────┼─────────┼─────────┤".to_string(),
    ];

    for (i, move_pair) in history.chunks(2).enumerate() {
        let white_move = move_pair.first().map(|m| m.notation.as_str()).unwrap_or("-");
        let black_move = move_pair.get(1).map(|m| m.notation.as_str()).unwrap_or("-");
        lines.push(format!(
            "│ {:>4} │ {:^7} │ {:^7} │",
            i + 1,
            white_move,
            black_move
        ));
    }

    lines.push("└──────┴─────────┴─────────┘".to_string());
    lines.join("\n")
}

pub fn format_status(game: &Game) -> String {
    let status = match game.status() {
        GameStatus::InProgress => "In progress",
        GameStatus::Checkmate => "Checkmate",
        GameStatus::Draw => "Draw (50-move rule)",
    };
    let mut out = format!("Game status: {status}");
    if game.is_in_check() && !game.is_checkmate() {
        out.push_str(&format!("\n{} is in check", game.turn()));
    }
    out
}

/// Heuristic check for a terminal that can draw chess figurines
pub fn supports_unicode() -> bool {
    std::env::var("TERM")
        .map(|term| {
            term.contains("xterm")
                || term.contains("screen")
                || term.contains("tmux")
                || term == "alacritty"
                || term == "kitty"
        })
        .unwrap_or(false)
        || std::env::var("TERM_PROGRAM").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_table_pairs_moves() {
        let mut game = Game::new();
        game.apply_request("e2e4".parse().unwrap()).unwrap();
        game.apply_request("e7e5".parse().unwrap()).unwrap();
        game.apply_request("g1f3".parse().unwrap()).unwrap();

        let table = format_move_history(&game);
        assert!(table.contains("│    1 │  e2e4   │  e7e5   │"));
        assert!(table.contains("│    2 │  Ng1f3  │    -    │"));
    }

    #[test]
    fn empty_history_message() {
        assert_eq!(format_move_history(&Game::new()), "No moves in history.");
    }

    #[test]
    fn status_reflects_forced_flags() {
        let mut game = Game::new();
        assert_eq!(format_status(&game), "Game status: In progress");
        game.set_check_flags(true, false);
        assert!(format_status(&game).contains("White is in check"));
        game.set_check_flags(true, true);
        assert_eq!(format_status(&game), "Game status: Checkmate");
    }
}
