//! Per-chat rating table
//!
//! A [`RatingTable`] holds two independent ladders, one for 1v1 games and one for
//! 2v2 games. Reports are validated before anything is touched, so a rejected report
//! never changes a rating.

use crate::error::LadderError;
use crate::rating::elo::{self, INDIVIDUAL_SPREAD, TEAM_SPREAD};
use crate::rating::ladder::Ladder;
use crate::types::{Rating, RatingChange, RatingMode, Standing, INITIAL_RATING};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Both ladders of one chat
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingTable {
    #[serde(default)]
    individual: Ladder,
    #[serde(default)]
    team: Ladder,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from existing ladders
    pub fn from_ladders(individual: Ladder, team: Ladder) -> Self {
        Self { individual, team }
    }

    pub fn ladder(&self, mode: RatingMode) -> &Ladder {
        match mode {
            RatingMode::Individual => &self.individual,
            RatingMode::Team => &self.team,
        }
    }

    fn ladder_mut(&mut self, mode: RatingMode) -> &mut Ladder {
        match mode {
            RatingMode::Individual => &mut self.individual,
            RatingMode::Team => &mut self.team,
        }
    }

    pub fn rating(&self, mode: RatingMode, handle: &str) -> Option<Rating> {
        self.ladder(mode).get(handle)
    }

    /// Make sure a player is rated in both ladders, leaving existing ratings alone
    pub fn initialize_player(&mut self, handle: &str) {
        let added_individual = self.individual.insert_if_absent(handle, INITIAL_RATING);
        let added_team = self.team.insert_if_absent(handle, INITIAL_RATING);
        if added_individual || added_team {
            debug!("Initialized player '{}' at {}", handle, INITIAL_RATING);
        }
    }

    /// Record a 1v1 game between `player1` and `player2`
    ///
    /// `winner` has to be one of the two players. Returns the changes applied to the
    /// winner and the loser, in that order.
    pub fn update_individual(
        &mut self,
        player1: &str,
        player2: &str,
        winner: &str,
    ) -> Result<Vec<RatingChange>, LadderError> {
        if winner != player1 && winner != player2 {
            return Err(LadderError::InvalidWinner {
                player1: player1.to_string(),
                player2: player2.to_string(),
                winner: winner.to_string(),
            });
        }

        let loser = if winner == player1 { player2 } else { player1 };

        self.initialize_player(winner);
        self.initialize_player(loser);

        let winner_rating = self.individual.get(winner).unwrap_or(INITIAL_RATING);
        let loser_rating = self.individual.get(loser).unwrap_or(INITIAL_RATING);
        let deltas = elo::game_deltas(
            i64::from(winner_rating),
            i64::from(loser_rating),
            INDIVIDUAL_SPREAD,
        );

        Ok(vec![
            self.apply(RatingMode::Individual, winner, deltas.winner),
            self.apply(RatingMode::Individual, loser, deltas.loser),
        ])
    }

    /// Record a 2v2 game of `player1` and `player2` against `player3` and `player4`
    ///
    /// Both winners must belong to the same team. Every member of a team receives
    /// the full delta computed from the team sums, so a team's combined rating moves
    /// by twice that delta. Returns the changes for the winning team followed by the
    /// losing team.
    #[allow(clippy::too_many_arguments)]
    pub fn update_team(
        &mut self,
        player1: &str,
        player2: &str,
        player3: &str,
        player4: &str,
        winner1: &str,
        winner2: &str,
    ) -> Result<Vec<RatingChange>, LadderError> {
        let team1 = members(player1, player2);
        let team2 = members(player3, player4);
        let winners = members(winner1, winner2);

        let (winning, losing) = if is_subset(&winners, &team1) {
            (team1, team2)
        } else if is_subset(&winners, &team2) {
            (team2, team1)
        } else {
            return Err(LadderError::WinnersNotOnOneTeam {
                winner1: winner1.to_string(),
                winner2: winner2.to_string(),
            });
        };

        for player in winning.iter().chain(losing.iter()) {
            self.initialize_player(player);
        }

        let deltas = elo::game_deltas(
            self.team_rating(&winning),
            self.team_rating(&losing),
            TEAM_SPREAD,
        );

        let mut changes = Vec::with_capacity(winning.len() + losing.len());
        for player in &winning {
            changes.push(self.apply(RatingMode::Team, player, deltas.winner));
        }
        for player in &losing {
            changes.push(self.apply(RatingMode::Team, player, deltas.loser));
        }
        Ok(changes)
    }

    fn team_rating(&self, members: &[&str]) -> i64 {
        members
            .iter()
            .map(|player| i64::from(self.team.get(player).unwrap_or(INITIAL_RATING)))
            .sum()
    }

    /// Add `delta` to a player's current rating
    fn apply(&mut self, mode: RatingMode, handle: &str, delta: Rating) -> RatingChange {
        let ladder = self.ladder_mut(mode);
        let old_rating = ladder.get(handle).unwrap_or(INITIAL_RATING);
        let new_rating = old_rating.saturating_add(delta);
        ladder.set(handle.to_string(), new_rating);

        RatingChange {
            handle: handle.to_string(),
            old_rating,
            new_rating,
        }
    }

    /// Ratings of one ladder, highest first
    pub fn standings(&self, mode: RatingMode) -> Vec<Standing> {
        self.ladder(mode).standings()
    }

    /// Standings as `handle: rating` lines, empty when nobody is rated
    pub fn format_standings(&self, mode: RatingMode) -> String {
        self.standings(mode)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.individual.is_empty() && self.team.is_empty()
    }
}

/// Distinct members of a pair, in the order given
fn members<'a>(first: &'a str, second: &'a str) -> Vec<&'a str> {
    if first == second {
        vec![first]
    } else {
        vec![first, second]
    }
}

fn is_subset(subset: &[&str], superset: &[&str]) -> bool {
    subset.iter().all(|member| superset.contains(member))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(players: &[&str]) -> RatingTable {
        let mut table = RatingTable::new();
        for player in players {
            table.initialize_player(player);
        }
        table
    }

    fn set(table: &mut RatingTable, mode: RatingMode, handle: &str, rating: i32) {
        table.ladder_mut(mode).set(handle.to_string(), rating);
    }

    #[test]
    fn test_initialize_player_sets_both_ladders() {
        let table = table_with(&["@a"]);
        assert_eq!(table.rating(RatingMode::Individual, "@a"), Some(1500));
        assert_eq!(table.rating(RatingMode::Team, "@a"), Some(1500));
    }

    #[test]
    fn test_initialize_player_keeps_existing_rating() {
        let mut table = table_with(&["@a"]);
        set(&mut table, RatingMode::Individual, "@a", 1700);
        set(&mut table, RatingMode::Team, "@a", 1300);

        table.initialize_player("@a");

        assert_eq!(table.rating(RatingMode::Individual, "@a"), Some(1700));
        assert_eq!(table.rating(RatingMode::Team, "@a"), Some(1300));
        assert_eq!(table.ladder(RatingMode::Individual).len(), 1);
    }

    #[test]
    fn test_individual_even_match() {
        let mut table = table_with(&["A", "B"]);
        let changes = table.update_individual("A", "B", "A").unwrap();

        assert_eq!(table.rating(RatingMode::Individual, "A"), Some(1516));
        assert_eq!(table.rating(RatingMode::Individual, "B"), Some(1484));
        assert_eq!(changes[0].handle, "A");
        assert_eq!(changes[0].delta(), 16);
        assert_eq!(changes[1].handle, "B");
        assert_eq!(changes[1].delta(), -16);
    }

    #[test]
    fn test_individual_favourite_wins() {
        let mut table = table_with(&["A", "B"]);
        set(&mut table, RatingMode::Individual, "B", 1600);

        table.update_individual("A", "B", "B").unwrap();

        assert_eq!(table.rating(RatingMode::Individual, "B"), Some(1611));
        assert_eq!(table.rating(RatingMode::Individual, "A"), Some(1489));
    }

    #[test]
    fn test_individual_does_not_touch_team_ladder() {
        let mut table = table_with(&["A", "B"]);
        table.update_individual("A", "B", "B").unwrap();

        assert_eq!(table.rating(RatingMode::Team, "A"), Some(1500));
        assert_eq!(table.rating(RatingMode::Team, "B"), Some(1500));
    }

    #[test]
    fn test_individual_rejects_outside_winner() {
        let mut table = table_with(&["A", "B"]);
        let before = table.clone();

        let err = table.update_individual("A", "B", "C").unwrap_err();

        assert!(matches!(err, LadderError::InvalidWinner { .. }));
        assert!(err.is_rejection());
        assert_eq!(table, before);
        assert!(!table.ladder(RatingMode::Individual).contains("C"));
    }

    #[test]
    fn test_individual_winner_is_second_player() {
        let mut table = table_with(&["A", "B"]);
        table.update_individual("A", "B", "B").unwrap();
        assert_eq!(table.rating(RatingMode::Individual, "B"), Some(1516));
        assert_eq!(table.rating(RatingMode::Individual, "A"), Some(1484));
    }

    #[test]
    fn test_individual_self_match_nets_zero() {
        let mut table = table_with(&["A"]);
        table.update_individual("A", "A", "A").unwrap();
        assert_eq!(table.rating(RatingMode::Individual, "A"), Some(1500));
    }

    #[test]
    fn test_ratings_can_go_negative() {
        let mut table = table_with(&["A", "B"]);
        set(&mut table, RatingMode::Individual, "A", 10);
        set(&mut table, RatingMode::Individual, "B", 10);

        table.update_individual("A", "B", "B").unwrap();

        assert_eq!(table.rating(RatingMode::Individual, "A"), Some(-6));
        assert_eq!(table.rating(RatingMode::Individual, "B"), Some(26));
    }

    #[test]
    fn test_team_even_match() {
        let mut table = table_with(&["A", "B", "C", "D"]);
        let changes = table.update_team("A", "B", "C", "D", "A", "B").unwrap();

        assert_eq!(table.rating(RatingMode::Team, "A"), Some(1516));
        assert_eq!(table.rating(RatingMode::Team, "B"), Some(1516));
        assert_eq!(table.rating(RatingMode::Team, "C"), Some(1484));
        assert_eq!(table.rating(RatingMode::Team, "D"), Some(1484));

        let deltas: Vec<i32> = changes.iter().map(RatingChange::delta).collect();
        assert_eq!(deltas, vec![16, 16, -16, -16]);
    }

    #[test]
    fn test_team_second_team_wins_in_any_order() {
        let mut table = table_with(&["A", "B", "C", "D"]);
        table.update_team("A", "B", "C", "D", "D", "C").unwrap();

        assert_eq!(table.rating(RatingMode::Team, "C"), Some(1516));
        assert_eq!(table.rating(RatingMode::Team, "D"), Some(1516));
        assert_eq!(table.rating(RatingMode::Team, "A"), Some(1484));
        assert_eq!(table.rating(RatingMode::Team, "B"), Some(1484));
    }

    #[test]
    fn test_team_uses_summed_ratings() {
        let mut table = table_with(&["A", "B", "C", "D"]);
        set(&mut table, RatingMode::Team, "A", 1600);
        set(&mut table, RatingMode::Team, "B", 1500);
        set(&mut table, RatingMode::Team, "C", 1500);
        set(&mut table, RatingMode::Team, "D", 1500);

        // 3100 vs 3000 over 800: expected 0.5715, delta trunc(13.71) = 13
        table.update_team("A", "B", "C", "D", "A", "B").unwrap();

        assert_eq!(table.rating(RatingMode::Team, "A"), Some(1613));
        assert_eq!(table.rating(RatingMode::Team, "B"), Some(1513));
        assert_eq!(table.rating(RatingMode::Team, "C"), Some(1487));
        assert_eq!(table.rating(RatingMode::Team, "D"), Some(1487));
    }

    #[test]
    fn test_team_rejects_split_winners() {
        let mut table = table_with(&["A", "B", "C", "D"]);
        let before = table.clone();

        let err = table.update_team("A", "B", "C", "D", "A", "C").unwrap_err();

        assert!(matches!(err, LadderError::WinnersNotOnOneTeam { .. }));
        assert_eq!(table, before);
    }

    #[test]
    fn test_team_rejects_unknown_winner() {
        let mut table = table_with(&["A", "B", "C", "D"]);
        let before = table.clone();

        assert!(table.update_team("A", "B", "C", "D", "A", "E").is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_team_repeated_winner_is_accepted() {
        let mut table = table_with(&["A", "B", "C", "D"]);
        table.update_team("A", "B", "C", "D", "B", "B").unwrap();
        assert_eq!(table.rating(RatingMode::Team, "A"), Some(1516));
        assert_eq!(table.rating(RatingMode::Team, "B"), Some(1516));
    }

    #[test]
    fn test_team_does_not_touch_individual_ladder() {
        let mut table = table_with(&["A", "B", "C", "D"]);
        table.update_team("A", "B", "C", "D", "A", "B").unwrap();
        for player in ["A", "B", "C", "D"] {
            assert_eq!(table.rating(RatingMode::Individual, player), Some(1500));
        }
    }

    #[test]
    fn test_standings_and_formatting() {
        let mut table = table_with(&["@a", "@b", "@c"]);
        table.update_individual("@a", "@b", "@b").unwrap();

        let standings = table.standings(RatingMode::Individual);
        let order: Vec<&str> = standings.iter().map(|s| s.handle.as_str()).collect();
        assert_eq!(order, vec!["@b", "@c", "@a"]);

        assert_eq!(
            table.format_standings(RatingMode::Individual),
            "@b: 1516\n@c: 1500\n@a: 1484"
        );
    }

    #[test]
    fn test_empty_table() {
        let table = RatingTable::new();
        assert!(table.is_empty());
        assert!(table.standings(RatingMode::Individual).is_empty());
        assert!(table.standings(RatingMode::Team).is_empty());
        assert_eq!(table.format_standings(RatingMode::Team), "");
    }

    #[test]
    fn test_is_empty_with_one_ladder_populated() {
        let mut individual = Ladder::new();
        individual.set("@a".to_string(), 1500);
        let table = RatingTable::from_ladders(individual, Ladder::new());
        assert!(!table.is_empty());
    }
}
