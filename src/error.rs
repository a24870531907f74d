//! Error types for the rating service
//!
//! Rating operations and snapshot persistence return [`LadderError`] so callers can
//! tell a rejected report from a storage failure. Everything above the core uses
//! anyhow through the [`Result`] alias.

use std::path::PathBuf;

use crate::types::PlayerHandle;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for rating and storage scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Winner {winner} is neither {player1} nor {player2}")]
    InvalidWinner {
        player1: PlayerHandle,
        player2: PlayerHandle,
        winner: PlayerHandle,
    },

    #[error("Winners {winner1} and {winner2} are not on the same team")]
    WinnersNotOnOneTeam {
        winner1: PlayerHandle,
        winner2: PlayerHandle,
    },

    #[error("Game report has {tokens} words, expected 4 for 1x1 or 7 for 2x2")]
    MalformedReport { tokens: usize },

    #[error("Snapshot I/O failed for {}: {source}", .path.display())]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot at {} is malformed: {source}", .path.display())]
    SnapshotFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl LadderError {
    /// Whether the error is a rejected match report rather than an infrastructure failure
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LadderError::InvalidWinner { .. } | LadderError::WinnersNotOnOneTeam { .. }
        )
    }
}
