//! Session driver running a [`GameMachine`](crate::game::GameMachine) against a remote authority.
//!
//! The machine itself is synchronous. This module implements:
//! - SessionActor: owns the machine, executes its effects on spawned tasks,
//!   and feeds the tagged completions back in
//! - SessionHandle: cheap cloneable handle used by presentation layers
//!
//! ## Architecture
//!
//! The actor runs in its own Tokio task with an mpsc inbox. User events and
//! request completions are processed one at a time, so the context is never
//! mutated concurrently. After each processed message the snapshot is
//! published on a `watch` channel if it changed, so a subscriber always
//! observes the latest state even when it reads late.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wordgame::{
//!     config::{AuthorityConfig, SessionConfig},
//!     game::GameEvent,
//!     net::client::HttpAuthority,
//!     session::SessionActor,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let authority = HttpAuthority::new(&AuthorityConfig::new("http://localhost:1337"))?;
//! let (actor, handle) = SessionActor::new(Arc::new(authority), SessionConfig::default());
//! tokio::spawn(actor.run());
//!
//! let mut snapshots = handle.subscribe();
//! handle.dispatch(GameEvent::Guess('e')).await?;
//! while snapshots.changed().await.is_ok() {
//!     let snapshot = snapshots.borrow_and_update().clone();
//!     println!("{} {}", snapshot.state, snapshot.context.current);
//! }
//! # Ok(())
//! # }
//! ```

pub mod actor;
pub mod messages;

pub use actor::{SessionActor, SessionHandle};
pub use messages::{SessionError, SessionMessage};
