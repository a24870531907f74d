//! Chat commands understood by the service

use crate::error::LadderError;
use crate::types::PlayerHandle;

/// Help text sent in reply to `/info`
pub const INFO_TEXT: &str = "Bot commands:\n\
    /stats - Show the ratings of this chat's players.\n\
    /game @player1 @player2 @winner - Report a 1x1 game.\n\
    /game @player1 @player2 @player3 @player4 @winner1 @winner2 - Report a 2x2 game.";

/// Reply sent when a `/game` message has the wrong number of words
pub const USAGE_TEXT: &str = "Invalid command format. Use:\n\
    /game @player1 @player2 @winner for 1x1\n\
    /game @player1 @player2 @player3 @player4 @winner1 @winner2 for 2x2";

/// A parsed chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Stats,
    Info,
    Report1v1 {
        player1: PlayerHandle,
        player2: PlayerHandle,
        winner: PlayerHandle,
    },
    Report2v2 {
        players: [PlayerHandle; 4],
        winners: [PlayerHandle; 2],
    },
}

impl Command {
    /// Parse a chat message
    ///
    /// Returns `Ok(None)` for messages that are not commands. Words are separated by
    /// single spaces, so a doubled space produces an empty word and changes the count.
    pub fn parse(text: &str) -> Result<Option<Self>, LadderError> {
        if text.starts_with("/stats") {
            return Ok(Some(Command::Stats));
        }
        if text.starts_with("/game") {
            return Self::parse_report(text).map(Some);
        }
        if text.starts_with("/info") {
            return Ok(Some(Command::Info));
        }
        Ok(None)
    }

    fn parse_report(text: &str) -> Result<Self, LadderError> {
        let args: Vec<&str> = text.split(' ').collect();
        let owned = |i: usize| args[i].to_string();

        match args.as_slice() {
            ["/game", _, _, _] => Ok(Command::Report1v1 {
                player1: owned(1),
                player2: owned(2),
                winner: owned(3),
            }),
            ["/game", _, _, _, _, _, _] => Ok(Command::Report2v2 {
                players: [owned(1), owned(2), owned(3), owned(4)],
                winners: [owned(5), owned(6)],
            }),
            _ => Err(LadderError::MalformedReport { tokens: args.len() }),
        }
    }
}
