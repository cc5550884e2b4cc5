//! Session context, state names, and the snapshot published to presentation layers.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Character the remote authority uses for an unrevealed position in the mask.
pub const PLACEHOLDER: char = '_';

/// Phase of a game session.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// Quiescent pre-session state. Only `new` leaves it.
    Idle,
    /// Waiting for the authority to create a session.
    Loading,
    /// Waiting for the player to pick a letter.
    Playing,
    /// Waiting for the authority to judge the letter in flight.
    Guessing,
    Win,
    Lose,
    /// A remote request failed. Only `retry` and `new` leave it.
    Failure,
}

impl GameState {
    /// Whether the session is over and only `new` can leave this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }

    /// Whether a remote request is outstanding in this state.
    #[must_use]
    pub const fn is_waiting(self) -> bool {
        matches!(self, Self::Loading | Self::Guessing)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Guessing => "guessing",
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Failure => "failure",
        };
        write!(f, "{repr}")
    }
}

/// Everything the client knows about the current session.
///
/// The authority owns the word; this is only the last view of it that
/// the authority handed back.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameContext {
    /// Session identifier issued by the authority. Empty before the
    /// first session is created.
    pub id: String,
    /// Masked word, with [`PLACEHOLDER`] for every unrevealed position.
    pub current: String,
    /// Remaining wrong guesses, exactly as last reported by the authority.
    pub guesses_remaining: u32,
    /// Letters the player has attempted, in the order they were submitted.
    pub guessed_letters: Vec<char>,
    /// Letter currently in flight to the authority.
    #[serde(serialize_with = "serialize_guess", deserialize_with = "deserialize_guess")]
    pub current_guess: Option<char>,
}

impl GameContext {
    /// Whether every position of the mask has been revealed.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.current.contains(PLACEHOLDER)
    }

    /// Whether the authority reports no guesses left.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.guesses_remaining == 0
    }

    /// Whether `letter` has already been tried this session, ignoring case.
    #[must_use]
    pub fn has_guessed(&self, letter: char) -> bool {
        self.guessed_letters
            .iter()
            .any(|guessed| guessed.eq_ignore_ascii_case(&letter))
    }
}

// The pending guess travels as a one-character string, or "" when none is outstanding.
fn serialize_guess<S: Serializer>(guess: &Option<char>, serializer: S) -> Result<S::Ok, S::Error> {
    match guess {
        Some(letter) => serializer.collect_str(letter),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_guess<'de, D>(deserializer: D) -> Result<Option<char>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(letter), None) => Ok(Some(letter)),
        _ => Err(serde::de::Error::custom(format!(
            "expected at most one character, got {raw:?}"
        ))),
    }
}

/// Immutable copy of the machine's state handed to presentation layers.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: GameState,
    pub context: GameContext,
}

/// Generation token attached to every remote request.
///
/// A completion is only applied if it carries the token of the request
/// the machine is still waiting on.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct InvocationId(pub(crate) u64);

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
