//! Elo expected-score and update math
//!
//! Ratings are integers, so every delta is produced by truncating `K * (S - E)`
//! toward zero. A 1v1 game uses a 400 point spread; a 2v2 game compares the sums of
//! the two teams and uses 800.

use crate::types::Rating;

/// Fixed K-factor for both ladders
pub const K_FACTOR: f64 = 32.0;

/// Logistic spread applied to individual ratings
pub const INDIVIDUAL_SPREAD: f64 = 400.0;

/// Logistic spread applied to summed team ratings
pub const TEAM_SPREAD: f64 = 800.0;

/// Score credited to the winner of a game
pub const WIN: f64 = 1.0;

/// Score credited to the loser of a game
pub const LOSS: f64 = 0.0;

/// Probability that a side rated `own` beats a side rated `opponent`
///
/// Takes `i64` so that team sums never overflow.
pub fn expected_score(own: i64, opponent: i64, spread: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - own) as f64 / spread))
}

/// Truncated rating change for an actual score against an expected one
///
/// The float-to-int `as` cast truncates toward zero: 15.9 becomes 15 and -15.9
/// becomes -15.
pub fn rating_delta(actual: f64, expected: f64) -> Rating {
    (K_FACTOR * (actual - expected)) as Rating
}

/// Deltas for the winning and losing side of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EloDeltas {
    pub winner: Rating,
    pub loser: Rating,
}

/// Compute both deltas for a decided game
///
/// The two expected scores are evaluated independently, each from its own side's
/// point of view, rather than deriving one as the complement of the other.
pub fn game_deltas(winner_rating: i64, loser_rating: i64, spread: f64) -> EloDeltas {
    let expected_winner = expected_score(winner_rating, loser_rating, spread);
    let expected_loser = expected_score(loser_rating, winner_rating, spread);

    EloDeltas {
        winner: rating_delta(WIN, expected_winner),
        loser: rating_delta(LOSS, expected_loser),
    }
}
