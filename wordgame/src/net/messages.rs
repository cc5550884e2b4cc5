//! JSON payloads exchanged with the remote game authority.

use serde::{Deserialize, Serialize};

/// Response to `POST /new`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewSession {
    pub id: String,
    pub current: String,
    pub guesses_remaining: u32,
}

/// Body of `POST /guess`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GuessRequest {
    pub id: String,
    /// Always exactly one character on the wire.
    pub guess: String,
}

impl GuessRequest {
    #[must_use]
    pub fn new(id: impl Into<String>, letter: char) -> Self {
        Self {
            id: id.into(),
            guess: letter.to_string(),
        }
    }
}

/// Response to `POST /guess`. The session id is implied by the request.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GuessOutcome {
    pub current: String,
    pub guesses_remaining: u32,
}

/// Error body the authority sends alongside a non-success status.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Response to `GET /health`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: String,
}
