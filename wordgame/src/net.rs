//! Networking layer for talking to the remote game authority.
//!
//! The authority speaks JSON over HTTP. Every failure, whatever its
//! cause, reaches the session machine as [`errors::RemoteRequestFailed`].

/// Authority trait and its HTTP implementation.
pub mod client;

/// Error type shared by every remote operation.
pub mod errors;

/// Request and response payloads.
pub mod messages;
