//! Insertion-ordered map from player handle to rating
//!
//! Standings break ties by the order in which players first appeared, so the map
//! remembers that order and keeps it through serialization. On the wire a ladder is
//! a plain JSON object in that same order.

use crate::types::{PlayerHandle, Rating, Standing};
use serde::de::{MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Ratings for one mode of play within one chat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ladder {
    entries: Vec<Standing>,
    index: HashMap<PlayerHandle, usize>,
}

impl Ladder {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.index.contains_key(handle)
    }

    /// Current rating of a player, `None` if unrated
    pub fn get(&self, handle: &str) -> Option<Rating> {
        self.index.get(handle).map(|&slot| self.entries[slot].rating)
    }

    /// Add a player at `rating` unless already present. Returns whether it was added.
    pub fn insert_if_absent(&mut self, handle: &str, rating: Rating) -> bool {
        if self.contains(handle) {
            return false;
        }
        self.push(handle.to_string(), rating);
        true
    }

    /// Set a player's rating, appending the player if unrated
    pub fn set(&mut self, handle: PlayerHandle, rating: Rating) -> Option<Rating> {
        match self.index.get(&handle) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].rating, rating)),
            None => {
                self.push(handle, rating);
                None
            }
        }
    }

    fn push(&mut self, handle: PlayerHandle, rating: Rating) {
        self.index.insert(handle.clone(), self.entries.len());
        self.entries.push(Standing { handle, rating });
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Standing> {
        self.entries.iter()
    }

    /// Entries sorted by rating, highest first, ties kept in insertion order
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings = self.entries.clone();
        standings.sort_by(|a, b| b.rating.cmp(&a.rating));
        standings
    }
}

impl<H: Into<PlayerHandle>> FromIterator<(H, Rating)> for Ladder {
    fn from_iter<I: IntoIterator<Item = (H, Rating)>>(iter: I) -> Self {
        let mut ladder = Ladder::new();
        for (handle, rating) in iter {
            ladder.set(handle.into(), rating);
        }
        ladder
    }
}

impl Serialize for Ladder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|entry| (&entry.handle, entry.rating)))
    }
}

impl<'de> Deserialize<'de> for Ladder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LadderVisitor;

        impl<'de> Visitor<'de> for LadderVisitor {
            type Value = Ladder;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of player handles to integer ratings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Ladder, A::Error> {
                let mut ladder = Ladder::with_capacity(access.size_hint().unwrap_or(0));
                // A repeated handle keeps its first position and its last value
                while let Some((handle, rating)) = access.next_entry::<PlayerHandle, Rating>()? {
                    ladder.set(handle, rating);
                }
                Ok(ladder)
            }
        }

        deserializer.deserialize_map(LadderVisitor)
    }
}
