pub mod app;
pub mod commands;
pub mod display;

pub use app::{fen_after_moves, App, Config, GateConfig, Reply};
pub use commands::{Cli, Commands, ConfigCommand};
pub use display::{format_board, format_move_history, format_status, supports_unicode};
