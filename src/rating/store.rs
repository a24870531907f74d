//! Rating store and snapshot persistence
//!
//! The store owns every chat's [`RatingTable`] and mirrors the whole set to a single
//! JSON snapshot. The snapshot is always rewritten in full; there is no incremental
//! persistence.

use crate::error::LadderError;
use crate::rating::table::RatingTable;
use crate::types::GroupId;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// All rating tables, keyed by chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingStore {
    path: PathBuf,
    groups: BTreeMap<GroupId, RatingTable>,
}

impl RatingStore {
    /// Create an empty store that persists to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            groups: BTreeMap::new(),
        }
    }

    /// Load the snapshot at `path`, starting empty if it cannot be used
    ///
    /// A missing or zero-length snapshot is an ordinary first start. A snapshot that
    /// cannot be read or parsed is logged and ignored.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::try_load(&path) {
            Ok(store) => {
                info!(
                    "Loaded rating snapshot from {} ({} chats)",
                    path.display(),
                    store.len()
                );
                store
            }
            Err(e) => {
                warn!("Starting with empty ratings: {}", e);
                Self::new(path)
            }
        }
    }

    /// Load the snapshot at `path`, reporting why it could not be used
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, LadderError> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No rating snapshot at {}", path.display());
                return Ok(Self::new(path));
            }
            Err(source) => {
                return Err(LadderError::SnapshotIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if content.is_empty() {
            return Ok(Self::new(path));
        }

        // A literal `null` is treated like an empty snapshot
        let groups: Option<BTreeMap<GroupId, RatingTable>> = serde_json::from_str(&content)
            .map_err(|source| LadderError::SnapshotFormat {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            groups: groups.unwrap_or_default(),
        })
    }

    /// Write every chat's ratings to the snapshot, replacing what was there
    pub fn save_all(&self) -> Result<(), LadderError> {
        let json = serde_json::to_string_pretty(&self.groups).map_err(|source| {
            LadderError::SnapshotFormat {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, json).map_err(|source| LadderError::SnapshotIo {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            "Saved rating snapshot to {} ({} chats)",
            self.path.display(),
            self.groups.len()
        );
        Ok(())
    }

    /// Table for a chat, created empty on first use
    pub fn get_or_create(&mut self, group: GroupId) -> &mut RatingTable {
        self.groups.entry(group).or_insert_with(|| {
            debug!("Created rating table for chat {}", group);
            RatingTable::new()
        })
    }

    pub fn get(&self, group: GroupId) -> Option<&RatingTable> {
        self.groups.get(&group)
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &RatingTable)> {
        self.groups.iter().map(|(&group, table)| (group, table))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of chats with a table
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
