use anyhow::{Context, Result};
use chessgate::chess::{Game, LegalityMode};
use chessgate::cli::{
    fen_after_moves, format_board, supports_unicode, App, Cli, Commands, Config, ConfigCommand,
};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load_or_create_default(),
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Path and init must work even when the existing file is broken
    let config = match &cli.command {
        Commands::Config {
            command: ConfigCommand::Path | ConfigCommand::Init,
        } => Config::default(),
        _ => load_config(cli.config.as_ref())?,
    };
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Play { strict, ai, ascii } => {
            let mut config = config;
            config.strict_legality |= strict;
            let unicode = config.unicode_board && !ascii && supports_unicode();

            let mut app = App::new(config, ai)?;
            app.set_unicode(unicode);

            let stdin = io::stdin();
            app.run(stdin.lock(), io::stdout())?;
        }
        Commands::Fen { moves, strict } => {
            let mode = if strict || config.strict_legality {
                LegalityMode::Strict
            } else {
                LegalityMode::Permissive
            };
            println!("{}", fen_after_moves(&moves, mode)?);
        }
        Commands::Board { fen, ascii } => {
            let game = match fen {
                Some(fen) => Game::from_fen(&fen).context("Could not load position")?,
                None => Game::new(),
            };
            let unicode = config.unicode_board && !ascii && supports_unicode();
            println!("{}", format_board(&game, unicode));
        }
        Commands::Config { command } => {
            let path = match cli.config {
                Some(path) => path,
                None => Config::default_config_file()?,
            };
            match command {
                ConfigCommand::Path => println!("{}", path.display()),
                ConfigCommand::Show => {
                    let content = toml::to_string_pretty(&config)
                        .context("Failed to serialize configuration")?;
                    print!("{content}");
                }
                ConfigCommand::Init => {
                    Config::default().save_to(&path)?;
                    info!("Wrote default configuration to {}", path.display());
                    println!("Wrote default configuration to {}", path.display());
                }
            }
        }
    }

    Ok(())
}
