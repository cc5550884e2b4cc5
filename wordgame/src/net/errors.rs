//! Errors raised while talking to the remote game authority.

use std::fmt;
use thiserror::Error;

/// Which remote operation a failure belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    CreateSession,
    SubmitGuess,
    Health,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::CreateSession => "create session",
            Self::SubmitGuess => "submit guess",
            Self::Health => "health check",
        };
        write!(f, "{repr}")
    }
}

/// Underlying cause of a failed request.
///
/// Kept for logs and display only; the state machine treats every
/// cause the same way.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FailureReason {
    /// The request never produced a response (connection, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(String),
    /// The authority answered with a non-success status.
    #[error("status {code}{}", status_detail(.message))]
    Status { code: u16, message: Option<String> },
    /// The response body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

fn status_detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

/// The single error kind the session machine knows about.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{operation} request failed: {reason}")]
pub struct RemoteRequestFailed {
    pub operation: Operation,
    pub reason: FailureReason,
}

impl RemoteRequestFailed {
    #[must_use]
    pub const fn new(operation: Operation, reason: FailureReason) -> Self {
        Self { operation, reason }
    }
}
