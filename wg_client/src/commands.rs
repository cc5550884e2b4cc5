use std::fmt;
use wordgame::{GameEvent, Snapshot};

use crate::render::is_key_enabled;

/// A line of user input, interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward an event to the session.
    Event(GameEvent),
    /// Print the help text.
    Help,
    /// Leave the client.
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was typed.
    Empty,
    /// A single character that is not a letter a-z.
    NotALetter(char),
    /// The letter's key is disabled: already tried, or not the player's move.
    KeyDisabled(char),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Type a letter to guess it, or 'help' to see available commands"),
            Self::NotALetter(c) => write!(f, "'{}' is not a letter. Guesses must be a-z", c),
            Self::KeyDisabled(c) => write!(
                f,
                "'{}' can't be guessed right now (already tried, or no game in play)",
                c
            ),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string into a [`Command`].
///
/// # Examples
///
/// ```
/// use wg_client::commands::{Command, parse_command};
/// use wordgame::GameEvent;
///
/// assert_eq!(parse_command("e"), Ok(Command::Event(GameEvent::Guess('e'))));
/// assert_eq!(parse_command("E"), Ok(Command::Event(GameEvent::Guess('e'))));
/// assert_eq!(parse_command("new"), Ok(Command::Event(GameEvent::New)));
/// assert_eq!(parse_command("retry"), Ok(Command::Event(GameEvent::Retry)));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    match trimmed.to_lowercase().as_str() {
        "" => return Err(ParseError::Empty),
        "new" | "play" => return Ok(Command::Event(GameEvent::New)),
        "retry" => return Ok(Command::Event(GameEvent::Retry)),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Ok(Command::Event(GameEvent::Guess(c.to_ascii_lowercase())))
        }
        (Some(c), None) => Err(ParseError::NotALetter(c)),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Apply the keyboard rules to an event before it reaches the session.
///
/// Only guesses are filtered: a letter key is disabled unless the game is
/// in play and the letter has not been tried yet.
///
/// # Errors
///
/// Returns [`ParseError::KeyDisabled`] for a guess whose key is disabled.
pub fn admit(event: GameEvent, snapshot: &Snapshot) -> Result<GameEvent, ParseError> {
    match event {
        GameEvent::Guess(letter) if !is_key_enabled(letter, snapshot) => {
            Err(ParseError::KeyDisabled(letter))
        }
        event => Ok(event),
    }
}
