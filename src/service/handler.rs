//! Command handling over the shared rating store
//!
//! [`LadderService`] is the single owner of the [`RatingStore`] while the service
//! runs. Every command takes the store lock for its whole duration, so reports from
//! concurrently dispatched messages are applied one at a time.

use crate::error::{LadderError, Result};
use crate::rating::{RatingStore, RatingTable};
use crate::service::command::{Command, INFO_TEXT};
use crate::types::{GroupId, RatingMode, Standing};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub const NO_RATINGS_TEXT: &str = "No ratings recorded yet.";
pub const UPDATED_TEXT: &str = "Ratings updated.";
pub const INVALID_WINNER_TEXT: &str = "Error: the winner must be either @player1 or @player2.";
pub const SPLIT_WINNERS_TEXT: &str = "Error: the winners must be from the same team.";

/// Trait defining the interface for handling chat commands
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Handle one command for a chat, returning the messages to send back in order
    async fn handle_command(&self, group: GroupId, command: Command) -> Result<Vec<String>>;
}

/// Rating service shared by every chat
#[derive(Debug)]
pub struct LadderService {
    store: Mutex<RatingStore>,
}

impl LadderService {
    pub fn new(store: RatingStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Write the snapshot now
    pub async fn flush(&self) -> std::result::Result<(), LadderError> {
        self.store.lock().await.save_all()
    }

    /// Current standings of a chat without creating its table
    pub async fn standings(&self, group: GroupId, mode: RatingMode) -> Vec<Standing> {
        self.store
            .lock()
            .await
            .get(group)
            .map(|table| table.standings(mode))
            .unwrap_or_default()
    }

    pub fn into_store(self) -> RatingStore {
        self.store.into_inner()
    }

    fn apply_report(
        table: &mut RatingTable,
        command: &Command,
    ) -> std::result::Result<(), LadderError> {
        match command {
            Command::Report1v1 {
                player1,
                player2,
                winner,
            } => {
                table.initialize_player(player1);
                table.initialize_player(player2);
                table.update_individual(player1, player2, winner)?;
            }
            Command::Report2v2 { players, winners } => {
                for player in players {
                    table.initialize_player(player);
                }
                let [p1, p2, p3, p4] = players;
                let [w1, w2] = winners;
                table.update_team(p1, p2, p3, p4, w1, w2)?;
            }
            Command::Stats | Command::Info => {}
        }
        Ok(())
    }
}

#[async_trait]
impl CommandHandler for LadderService {
    async fn handle_command(&self, group: GroupId, command: Command) -> Result<Vec<String>> {
        let mut store = self.store.lock().await;
        let table = store.get_or_create(group);

        match command {
            Command::Info => Ok(vec![INFO_TEXT.to_string()]),
            Command::Stats => Ok(vec![format_stats(table)]),
            report => match Self::apply_report(table, &report) {
                Ok(()) => {
                    info!("Chat {}: recorded {:?}", group, report);
                    let stats = format_stats(table);
                    if let Err(e) = store.save_all() {
                        error!("Failed to save ratings, keeping them in memory: {}", e);
                    }
                    Ok(vec![UPDATED_TEXT.to_string(), stats])
                }
                Err(e) if e.is_rejection() => {
                    warn!("Chat {}: rejected report: {}", group, e);
                    let reply = match e {
                        LadderError::InvalidWinner { .. } => INVALID_WINNER_TEXT,
                        _ => SPLIT_WINNERS_TEXT,
                    };
                    Ok(vec![reply.to_string()])
                }
                Err(e) => Err(e.into()),
            },
        }
    }
}

/// Reply to `/stats`: both ladders, skipping an empty one
pub fn format_stats(table: &RatingTable) -> String {
    if table.is_empty() {
        return NO_RATINGS_TEXT.to_string();
    }

    let mut message = String::from("Player ratings:\n");
    let individual = table.format_standings(RatingMode::Individual);
    if !individual.is_empty() {
        message.push_str(&format!("{}:\n{}\n\n", RatingMode::Individual, individual));
    }
    let team = table.format_standings(RatingMode::Team);
    if !team.is_empty() {
        message.push_str(&format!("{}:\n{}", RatingMode::Team, team));
    }
    message
}
