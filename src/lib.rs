//! Chat Ladder - Elo ratings for chat groups
//!
//! This crate keeps independent 1v1 and 2v2 Elo ladders for every chat, applies
//! reported game results, and persists all ladders to a JSON snapshot.

pub mod config;
pub mod error;
pub mod rating;
pub mod service;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use rating::{RatingStore, RatingTable};
pub use service::{Command, CommandHandler, LadderService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
