//! Common types used throughout the rating service

use serde::{Deserialize, Serialize};

/// Identifier of a chat; every chat keeps its own ladder
pub type GroupId = i64;

/// Player handle as typed in the chat, usually an @-mention
pub type PlayerHandle = String;

/// Integer Elo rating. Unbounded in both directions.
pub type Rating = i32;

/// Rating every player starts from
pub const INITIAL_RATING: Rating = 1500;

/// Which of the two independent ladders a rating belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingMode {
    Individual,
    Team,
}

impl std::fmt::Display for RatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingMode::Individual => write!(f, "1x1"),
            RatingMode::Team => write!(f, "2x2"),
        }
    }
}

/// One line of a ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub handle: PlayerHandle,
    pub rating: Rating,
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.handle, self.rating)
    }
}

/// Rating change applied to one player by a match report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub handle: PlayerHandle,
    pub old_rating: Rating,
    pub new_rating: Rating,
}

impl RatingChange {
    pub fn delta(&self) -> Rating {
        self.new_rating - self.old_rating
    }
}
