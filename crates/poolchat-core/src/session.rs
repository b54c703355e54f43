//! Persistence for an in-progress conversation.
//!
//! The widget keeps its state under a single fixed key so a reload can
//! pick up where the visitor left off. Restoring always goes through
//! `Conversation::rehydrate`: a state persisted mid-submission has no
//! async callback to re-attach, so it comes back at the editable step.

use crate::engine::Conversation;
use crate::error::Result;
use crate::io;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "chat-session.json";

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Session storage rooted at `dir`; the key within it is fixed.
    pub fn open(dir: &Path) -> Self {
        Self {
            path: dir.join(SESSION_FILE),
        }
    }

    /// Restore the persisted conversation, coerced out of any in-flight
    /// step. Missing or unreadable state yields `None`: the widget
    /// starts fresh rather than failing.
    pub fn load(&self) -> Option<Conversation> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        let conversation: Conversation = serde_json::from_str(&data).ok()?;
        Some(conversation.rehydrate())
    }

    pub fn save(&self, conversation: &Conversation) -> Result<()> {
        let data = serde_json::to_vec(conversation)?;
        io::atomic_write(&self.path, &data)
    }

    /// Drop the persisted state (on reset).
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
