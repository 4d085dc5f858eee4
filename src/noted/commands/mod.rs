//! # Command Layer
//!
//! Pure business logic over the in-memory [`NoteCollection`]. Commands never
//! touch storage; the API facade persists after every mutating command.
//!
//! Guard conditions (empty content) are silent: the command returns an empty
//! [`CmdResult`] with `changed == false`.

use crate::model::Note;

pub mod create;
pub mod delete;
pub mod edit;
pub mod filter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<Note>,
    pub messages: Vec<CmdMessage>,
    /// Whether the collection must be written back to storage.
    pub changed: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_notes(mut self, notes: Vec<Note>) -> Self {
        self.affected_notes = notes;
        self
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn changed(mut self) -> Self {
        self.changed = true;
        self
    }

    pub fn merge(&mut self, other: CmdResult) {
        self.affected_notes.extend(other.affected_notes);
        self.listed_notes.extend(other.listed_notes);
        self.messages.extend(other.messages);
        self.changed |= other.changed;
    }
}
