use crate::chess::{rules, Color, Game, LegalityMode, MoveRequest};
use crate::cli::display::{format_board, format_move_history, format_status};
use crate::gate::{Credentials, SequenceDetector, DEFAULT_UNLOCK_SEQUENCE};
use crate::session::GameSession;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Unlock gate settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Moves that unlock the gate, as `from-to` text
    pub unlock_sequence: Vec<String>,
    pub username: String,
    pub password: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        let credentials = Credentials::default();
        Self {
            unlock_sequence: DEFAULT_UNLOCK_SEQUENCE.iter().map(|s| s.to_string()).collect(),
            username: credentials.username,
            password: credentials.password,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enforce movement rules and king safety instead of accepting any move
    pub strict_legality: bool,
    /// Draw the board with Unicode figurines
    pub unicode_board: bool,
    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
    pub gate: GateConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_legality: false,
            unicode_board: true,
            log_level: "warn".to_string(),
            gate: GateConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        ProjectDirs::from("dev", "chessgate", "chessgate")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the default config file path
    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default file, creating it if it doesn't exist
    pub fn load_or_create_default() -> Result<Self> {
        let config_file = Self::default_config_file()?;

        if config_file.exists() {
            Self::load_from(&config_file)
        } else {
            let config = Config::default();
            config.save_to(&config_file)?;
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).context("Failed to parse configuration file")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content).context("Failed to write configuration file")?;

        Ok(())
    }

    /// Check that the unlock sequence is usable
    pub fn validate(&self) -> Result<()> {
        self.detector().map(|_| ())
    }

    pub fn legality_mode(&self) -> LegalityMode {
        if self.strict_legality {
            LegalityMode::Strict
        } else {
            LegalityMode::Permissive
        }
    }

    pub fn detector(&self) -> Result<SequenceDetector> {
        SequenceDetector::parse(&self.gate.unlock_sequence)
            .context("Invalid unlock sequence in configuration")
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.gate.username.clone(), self.gate.password.clone())
    }
}

/// Response to one line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

const HELP: &str = "\
Commands:
  <move>            play a move, e.g. e2e4, e2-e4, e7e8q
  board             show the board
  fen               show the position as FEN
  history           show the move history
  moves             show the suggested opening moves
  legal             list every legal move for the side to move
  status            show the game status
  json              dump the game as JSON
  login <user> <pw> sign in once the board is unlocked
  reset             start a new game
  help              show this help
  quit              leave";

/// Interactive terminal game
pub struct App {
    session: GameSession,
    config: Config,
    ai_opponent: bool,
    unicode: bool,
}

impl App {
    pub fn new(config: Config, ai_opponent: bool) -> Result<Self> {
        let session = GameSession::new(
            config.legality_mode(),
            config.detector()?,
            config.credentials(),
        );
        let unicode = config.unicode_board;
        Ok(Self {
            session,
            config,
            ai_opponent,
            unicode,
        })
    }

    pub fn set_unicode(&mut self, unicode: bool) {
        self.unicode = unicode;
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        info!("Starting interactive session {}", self.session.id());
        writeln!(output, "{}", format_board(self.session.game(), self.unicode))?;
        writeln!(output, "Type 'help' for commands.")?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            let reply = self.execute(&line);
            if !reply.output.is_empty() {
                writeln!(output, "{}", reply.output)?;
            }
            output.flush()?;
            if reply.quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle one line of input
    pub fn execute(&mut self, line: &str) -> Reply {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Reply::text("");
        };

        match command.to_lowercase().as_str() {
            "quit" | "exit" | "q" => Reply {
                output: "Goodbye.".to_string(),
                quit: true,
            },
            "help" | "?" => Reply::text(HELP),
            "board" => Reply::text(format_board(self.session.game(), self.unicode)),
            "fen" => Reply::text(self.session.game().to_fen()),
            "history" => Reply::text(format_move_history(self.session.game())),
            "moves" => Reply::text(self.session.game().legal_moves().join(" ")),
            "legal" => {
                let moves: Vec<String> = rules::generate_legal_moves(self.session.game())
                    .iter()
                    .map(|m| m.to_string())
                    .collect();
                Reply::text(moves.join(" "))
            }
            "status" => Reply::text(format_status(self.session.game())),
            "json" => match serde_json::to_string_pretty(&self.session.game().snapshot()) {
                Ok(json) => Reply::text(json),
                Err(e) => Reply::text(format!("Failed to serialize game: {e}")),
            },
            "reset" => {
                self.session.reset();
                let mut out = self.take_messages();
                out.push(format_board(self.session.game(), self.unicode));
                Reply::text(out.join("\n"))
            }
            "login" => {
                let (Some(username), Some(password)) = (words.next(), words.next()) else {
                    return Reply::text("Usage: login <username> <password>");
                };
                let mut out = match self.session.login(username, password) {
                    Ok(token) => vec![format!("Access token: {token}")],
                    Err(e) => vec![format!("Login failed: {e}")],
                };
                out.extend(self.take_messages());
                Reply::text(out.join("\n"))
            }
            _ => self.play(line),
        }
    }

    fn play(&mut self, line: &str) -> Reply {
        let request = match line.parse::<MoveRequest>() {
            Ok(request) => request,
            Err(e) => return Reply::text(format!("{e}\nType 'help' for commands.")),
        };

        let mut out = Vec::new();
        match self.session.submit_move(request) {
            Ok(played) => out.push(format!("Played {}", played.record.notation)),
            Err(rejection) => return Reply::text(format!("Move rejected: {rejection}")),
        }
        out.extend(self.take_messages());

        if self.ai_opponent && self.session.game().turn() == Color::Black {
            if let Some(reply) = self.ai_reply() {
                out.push(reply);
                out.extend(self.take_messages());
            }
        }

        out.push(format_board(self.session.game(), self.unicode));
        Reply::text(out.join("\n"))
    }

    /// Play a random legal move for the side to move
    fn ai_reply(&mut self) -> Option<String> {
        let candidates = rules::generate_legal_moves(self.session.game());
        let choice = *candidates.choose(&mut rand::thread_rng())?;
        debug!("Computer picked {} from {} candidates", choice, candidates.len());
        self.session
            .submit_move(choice)
            .ok()
            .map(|played| format!("Computer played {}", played.record.notation))
    }

    fn take_messages(&mut self) -> Vec<String> {
        self.session
            .drain_messages()
            .into_iter()
            .map(|m| format!("[System] {}", m.text))
            .collect()
    }
}

/// Apply `moves` from the starting position and return the final FEN
pub fn fen_after_moves(moves: &[String], mode: LegalityMode) -> Result<String> {
    let mut game = Game::with_mode(mode);
    for text in moves {
        let request = text
            .parse::<MoveRequest>()
            .with_context(|| format!("Could not parse move '{text}'"))?;
        game.apply_request(request)
            .with_context(|| format!("Move '{text}' was rejected"))?;
    }
    Ok(game.to_fen())
}
