//! # Wordgame
//!
//! Client-side engine for a letter-guessing word game played against a
//! remote game authority that owns the hidden word.
//!
//! ## Architecture
//!
//! The core is a synchronous finite state machine with seven states:
//!
//! - **Idle**: No session yet; only `new` leaves it
//! - **Loading**: Waiting for the authority to open a session
//! - **Playing**: Waiting for the player to pick a letter
//! - **Guessing**: Waiting for the authority to judge a letter
//! - **Win/Lose**: Session over; only `new` leaves them
//! - **Failure**: A remote request failed; `retry` re-attempts it
//!
//! The machine never does I/O. It returns effects that the session actor
//! executes against an [`Authority`](net::client::Authority), and it only
//! accepts completions tagged with the request it is still waiting on.
//!
//! ## Core Modules
//!
//! - [`game`]: State machine, context, and snapshots
//! - [`session`]: Async actor driving the machine
//! - [`net`]: Authority trait, HTTP client, and wire payloads
//! - [`config`]: Environment-driven configuration
//!
//! ## Example
//!
//! ```
//! use wordgame::{GameEvent, GameMachine, GameState};
//!
//! let mut machine = GameMachine::new();
//! let effect = machine.handle(GameEvent::New);
//! assert!(effect.is_some());
//! assert_eq!(machine.state(), GameState::Loading);
//! ```

/// Environment-driven configuration.
pub mod config;

/// Core game logic: state machine, context, and snapshots.
pub mod game;
pub use game::{
    Effect, GameContext, GameEvent, GameMachine, GameState, MachineEvent, PLACEHOLDER, Snapshot,
};

/// Networking components for talking to the game authority.
pub mod net;
pub use net::{
    client::{Authority, HttpAuthority},
    errors::RemoteRequestFailed,
};

/// Async session driver.
pub mod session;
pub use session::{SessionActor, SessionHandle};
