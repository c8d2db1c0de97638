//! Chat session context: the active dataset, conversation memory and transcript.
//!
//! A `Session` is a plain value owned by its caller. Nothing here is global, so
//! two sessions never share memory or files.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::dataset::DatasetFile;
use crate::core::message::{MemoryEntry, Message, Role};

/// The dataset the backend is currently answering questions about.
#[derive(Debug, Clone)]
pub struct ActiveDataset {
    pub file: DatasetFile,
    /// Identifier assigned by the backend on upload, when it sent one.
    pub file_id: Option<String>,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    dataset: Option<ActiveDataset>,
    memory: Vec<MemoryEntry>,
    transcript: Vec<Message>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            dataset: None,
            memory: Vec::new(),
            transcript: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn dataset(&self) -> Option<&ActiveDataset> {
        self.dataset.as_ref()
    }

    pub fn has_dataset(&self) -> bool {
        self.dataset.is_some()
    }

    /// Make `file` the active dataset, replacing any previous one.
    pub fn attach(&mut self, file: DatasetFile, file_id: Option<String>) {
        self.dataset = Some(ActiveDataset { file, file_id });
    }

    /// Forget the active dataset. Memory and transcript are kept.
    pub fn detach(&mut self) -> Option<ActiveDataset> {
        self.dataset.take()
    }

    /// Append a message to the transcript. Memory is not touched.
    pub fn push_message(&mut self, role: Role, content: impl Into<String>) -> &Message {
        self.transcript.push(Message::new(role, content));
        &self.transcript[self.transcript.len() - 1]
    }

    /// Record a completed exchange in the conversation memory.
    pub fn remember(&mut self, question: &str, answer: &str) {
        self.memory.push(MemoryEntry {
            role: Role::User,
            content: question.to_string(),
        });
        self.memory.push(MemoryEntry {
            role: Role::Assistant,
            content: answer.to_string(),
        });
    }

    pub fn memory(&self) -> &[MemoryEntry] {
        &self.memory
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Drop the dataset, memory and transcript. The session id is kept.
    pub fn reset(&mut self) {
        self.dataset = None;
        self.memory.clear();
        self.transcript.clear();
    }
}
