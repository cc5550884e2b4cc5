//! Plain-text rendering of session snapshots.

use wordgame::{GameState, Snapshot};

/// Keyboard rows, top to bottom.
pub const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

pub const HELP: &str = "\
a-z
        Guess a letter. Each letter can only be tried once per game.
new
        Abandon the current game and start a new one.
retry
        Re-send the request that failed.
help
        Show this help.
quit
        Leave the game.
";

/// Whether the key for `letter` accepts presses in this snapshot.
pub fn is_key_enabled(letter: char, snapshot: &Snapshot) -> bool {
    snapshot.state == GameState::Playing && !snapshot.context.has_guessed(letter)
}

fn heading(snapshot: &Snapshot) -> String {
    match snapshot.state {
        GameState::Idle => "Ready. Type 'new' to play.".to_string(),
        GameState::Loading => "Loading...".to_string(),
        GameState::Playing => format!(
            "Playing ({} guesses remaining)",
            snapshot.context.guesses_remaining
        ),
        GameState::Guessing => match snapshot.context.current_guess {
            Some(letter) => format!("Guessing '{letter}'..."),
            None => "Guessing...".to_string(),
        },
        GameState::Win => "You win! Type 'new' to play again.".to_string(),
        GameState::Lose => "You lose. Type 'new' to play again.".to_string(),
        GameState::Failure => {
            "Couldn't reach the game server. Type 'retry' to try again.".to_string()
        }
    }
}

/// Spread the mask out so each position reads as its own tile.
fn tiles(current: &str) -> String {
    current
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyboard with tried letters blanked out.
fn keyboard(snapshot: &Snapshot) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(indent, row)| {
            let keys = row
                .chars()
                .map(|letter| {
                    if snapshot.context.has_guessed(letter) {
                        "·".to_string()
                    } else {
                        letter.to_ascii_uppercase().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!("{}{keys}", " ".repeat(indent))
        })
        .collect()
}

/// Render a snapshot as the lines printed after every update.
pub fn render(snapshot: &Snapshot) -> String {
    let mut lines = vec![heading(snapshot)];

    if !snapshot.context.current.is_empty() {
        lines.push(String::new());
        lines.push(format!("    {}", tiles(&snapshot.context.current)));
    }

    if matches!(
        snapshot.state,
        GameState::Playing | GameState::Guessing | GameState::Lose | GameState::Win
    ) {
        lines.push(String::new());
        lines.extend(keyboard(snapshot));
    }

    lines.join("\n")
}
