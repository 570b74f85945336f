use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chessgate")]
#[command(about = "A chess board that unlocks a secure area when the right moves are played")]
pub struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play an interactive game in the terminal
    ///
    /// Type moves like 'e2e4' or 'e2-e4'. Type 'help' inside the game for
    /// the full list of commands.
    ///
    /// Examples:
    ///   chessgate play
    ///   chessgate play --strict --ai
    Play {
        /// Enforce piece movement rules and king safety
        #[arg(long)]
        strict: bool,
        /// Let the computer answer every White move with a random legal Black move
        #[arg(long)]
        ai: bool,
        /// Draw the board with letters instead of Unicode figurines
        #[arg(long)]
        ascii: bool,
    },

    /// Apply moves from the starting position and print the resulting FEN
    ///
    /// Examples:
    ///   chessgate fen e2e4 e7e5
    ///   chessgate fen --strict g1-f3
    Fen {
        /// Moves to apply in order
        moves: Vec<String>,
        /// Enforce piece movement rules and king safety
        #[arg(long)]
        strict: bool,
    },

    /// Show a position as a board diagram
    ///
    /// Examples:
    ///   chessgate board
    ///   chessgate board --fen "8/8/8/8/8/8/8/K6k w - - 0 1"
    Board {
        /// Position to draw (defaults to the starting position)
        #[arg(short, long)]
        fen: Option<String>,
        /// Draw the board with letters instead of Unicode figurines
        #[arg(long)]
        ascii: bool,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration (overwrites an existing file)
    Init,
}
