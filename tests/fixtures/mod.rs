//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use chat_ladder::{Command, CommandHandler, GroupId, LadderService, RatingStore};
use std::path::{Path, PathBuf};

/// Snapshot path under the OS temp dir, removed when dropped
pub struct TempSnapshot {
    path: PathBuf,
}

impl TempSnapshot {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "chat-ladder-{}-{}.json",
            name,
            uuid::Uuid::new_v4()
        ));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn read(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap_or_default()
    }

    pub fn write(&self, content: &str) {
        std::fs::write(&self.path, content).expect("write snapshot fixture");
    }
}

impl Drop for TempSnapshot {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Service over whatever the snapshot currently holds
pub fn create_test_service(snapshot: &TempSnapshot) -> LadderService {
    LadderService::new(RatingStore::load(snapshot.path()))
}

/// Run one chat message through the parser and the service
pub async fn send(service: &LadderService, group: GroupId, text: &str) -> Vec<String> {
    let command = Command::parse(text)
        .expect("well-formed command")
        .expect("text is a command");
    service
        .handle_command(group, command)
        .await
        .expect("command handled")
}
