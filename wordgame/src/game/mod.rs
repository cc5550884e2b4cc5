//! Game session engine: the state machine and the data it owns.
//!
//! This module provides:
//! - The session context and state names shared with presentation layers
//! - The synchronous state machine that decides transitions and side effects

pub mod entities;
pub mod state_machine;

pub use entities::{GameContext, GameState, InvocationId, PLACEHOLDER, Snapshot};
pub use state_machine::{Effect, GameEvent, GameMachine, MachineEvent};
