//! Terminal front end for the word-guessing game.
//!
//! [`commands`] turns typed lines into session events and applies the
//! keyboard rules; [`render`] turns snapshots into text.

pub mod commands;
pub mod render;
