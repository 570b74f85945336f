//! One player's game session: the board engine, the unlock sequence and the
//! system messages a chat panel would show.

use crate::chess::{Game, LegalityMode, Move, MoveRejection, MoveRequest};
use crate::gate::{AccessToken, Credentials, GateError, SequenceDetector, SequenceProgress};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// A notice addressed to the player by the system rather than by an opponent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub text: String,
}

impl SystemMessage {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// What happened when a move was submitted to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMove {
    pub record: Move,
    pub progress: SequenceProgress,
    /// True when this move completed the unlock sequence
    pub unlocked: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    game: Game,
    detector: SequenceDetector,
    credentials: Credentials,
    unlocked: bool,
    token: Option<AccessToken>,
    username: Option<String>,
    messages: Vec<SystemMessage>,
}

impl GameSession {
    pub fn new(mode: LegalityMode, detector: SequenceDetector, credentials: Credentials) -> Self {
        Self {
            id: Uuid::new_v4(),
            game: Game::with_mode(mode),
            detector,
            credentials,
            unlocked: false,
            token: None,
            username: None,
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn detector(&self) -> &SequenceDetector {
        &self.detector
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn messages(&self) -> &[SystemMessage] {
        &self.messages
    }

    /// Remove and return the messages posted since the last drain
    pub fn drain_messages(&mut self) -> Vec<SystemMessage> {
        std::mem::take(&mut self.messages)
    }

    fn post(&mut self, text: impl Into<String>) {
        self.messages.push(SystemMessage::new(text));
    }

    /// Play a move on the board and feed it to the unlock sequence.
    /// Rejected moves do not touch the sequence.
    pub fn submit_move(&mut self, request: MoveRequest) -> Result<SessionMove, MoveRejection> {
        let record = self.game.apply_request(request)?;
        let progress = self.detector.observe(&record.key());

        let mut unlocked = false;
        match progress {
            SequenceProgress::Advanced { matched, total } if matched > 1 => {
                self.post(format!(
                    "Authentication sequence progress: {}/{}",
                    matched, total
                ));
            }
            SequenceProgress::Completed => {
                let total = self.detector.len();
                if total > 1 {
                    self.post(format!("Authentication sequence progress: {total}/{total}"));
                }
                info!("Unlock sequence completed in session {}", self.id);
                self.unlocked = true;
                unlocked = true;
                self.post(
                    "Authentication required! Use the special credentials to access the secure drive.",
                );
            }
            _ => {}
        }

        Ok(SessionMove {
            record,
            progress,
            unlocked,
        })
    }

    /// Start a new game. An unlocked gate stays unlocked.
    pub fn reset(&mut self) {
        self.game.reset();
        self.detector.reset();
        info!("Board reset in session {}", self.id);
        self.post("Board has been reset");
    }

    /// Sign in once the unlock sequence has been played
    pub fn login(&mut self, username: &str, password: &str) -> Result<AccessToken, GateError> {
        if !self.unlocked {
            warn!("Login attempt before unlock in session {}", self.id);
            return Err(GateError::Locked);
        }

        if !self.credentials.verify(username, password) {
            warn!("Failed login for '{}' in session {}", username, self.id);
            return Err(GateError::InvalidCredentials);
        }

        let token = AccessToken::issue();
        self.token = Some(token.clone());
        self.username = Some(username.to_string());
        info!("User '{}' signed in to session {}", username, self.id);
        self.post(format!("Welcome, {username}! You are now logged in."));
        Ok(token)
    }

    /// History as numbered display lines: `1. e2e4`, `1. e7e5`, `2. Ng1f3`
    pub fn move_history_lines(&self) -> Vec<String> {
        self.game
            .history()
            .iter()
            .enumerate()
            .map(|(index, mv)| format!("{}. {}", index / 2 + 1, mv.notation))
            .collect()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(
            LegalityMode::Permissive,
            SequenceDetector::default(),
            Credentials::default(),
        )
    }
}
