//! Hidden move-sequence unlock and credential check.
//!
//! Playing the unlock sequence on the board, one move at a time, opens the
//! gate; the player then signs in with the configured credentials.

use crate::chess::{ChessError, MoveRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Italian Game opening, as `from-to` keys
pub const DEFAULT_UNLOCK_SEQUENCE: [&str; 6] =
    ["e2-e4", "e7-e5", "g1-f3", "b8-c6", "f1-c4", "g8-f6"];

pub const DEFAULT_USERNAME: &str = "testuser";
pub const DEFAULT_PASSWORD: &str = "12345678";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("the unlock sequence has not been played yet")]
    Locked,
    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Result of feeding one move to a [`SequenceDetector`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceProgress {
    /// The move was the next expected step
    Advanced { matched: usize, total: usize },
    /// The final step was played; the detector has rewound
    Completed,
    /// The move did not match; the detector has rewound
    Broken,
}

/// Tracks how far into the unlock sequence the played moves have got
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceDetector {
    steps: Vec<String>,
    matched: usize,
}

impl SequenceDetector {
    pub fn new(steps: Vec<String>) -> Self {
        Self { steps, matched: 0 }
    }

    /// Build a detector from user-supplied step text, normalizing each
    /// step to its `from-to` key
    pub fn parse(steps: &[String]) -> Result<Self, ChessError> {
        if steps.is_empty() {
            return Err(ChessError::InvalidMove(
                "unlock sequence cannot be empty".to_string(),
            ));
        }
        let keys = steps
            .iter()
            .map(|step| step.parse::<MoveRequest>().map(|request| request.key()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(keys))
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Feed the key (`e2-e4`) of a move that was just played.
    ///
    /// A mismatch rewinds to the first step without re-testing the
    /// mismatching move against it.
    pub fn observe(&mut self, key: &str) -> SequenceProgress {
        if self.steps.get(self.matched).map(String::as_str) != Some(key) {
            if self.matched > 0 {
                debug!("Unlock sequence broken by {} after {} steps", key, self.matched);
            }
            self.matched = 0;
            return SequenceProgress::Broken;
        }

        self.matched += 1;
        if self.matched >= self.steps.len() {
            self.matched = 0;
            return SequenceProgress::Completed;
        }

        debug!("Unlock sequence at {}/{}", self.matched, self.steps.len());
        SequenceProgress::Advanced {
            matched: self.matched,
            total: self.steps.len(),
        }
    }

    pub fn reset(&mut self) {
        self.matched = 0;
    }
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::new(DEFAULT_UNLOCK_SEQUENCE.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

/// Opaque token handed out after a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn issue() -> Self {
        Self(format!("session_{}", Uuid::new_v4().hyphenated()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
