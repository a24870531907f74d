//! Service layer for the chat-ladder bot
//!
//! This module contains command parsing and the handler that applies commands to
//! the shared rating store.

pub mod command;
pub mod handler;

pub use command::{Command, INFO_TEXT, USAGE_TEXT};
pub use handler::{format_stats, CommandHandler, LadderService};
