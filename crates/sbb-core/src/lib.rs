//! Core moderation logic for the sticker ban bot.
//!
//! This crate is framework-agnostic. Telegram lives behind the messaging port
//! implemented in the adapter crate.

pub mod ban_store;
pub mod classifier;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod messaging;

pub use errors::{Error, Result};
