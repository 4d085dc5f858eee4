//! # API Facade
//!
//! [`NotesApi`] is the list/filter controller: it owns the authoritative
//! [`NoteCollection`] and the current search query, and it is the only writer
//! of the collection. Every UI client (the CLI, the editors) goes through it.
//!
//! ## Write-through
//!
//! Each mutating method runs the matching command from `commands/*.rs` on the
//! in-memory collection and, when the command reports a change, serializes the
//! whole collection back to the store before returning. After any successful
//! call the stored blob equals the in-memory collection.
//!
//! When the stored data was unusable and could not be backed up, the facade is
//! read-only: every mutating method fails with [`NotesError::Store`] before
//! touching the collection.
//!
//! ## Filtered view
//!
//! [`NotesApi::filtered_view`] recomputes the projection on every call instead
//! of caching it, so it can never lag behind a mutation or a query change.
//!
//! ## Generic Over KeyValueStore
//!
//! - Production: `NotesApi<FileStore>`
//! - Testing: `NotesApi<InMemoryStore>`

use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::index::NoteSelector;
use crate::model::{Note, NoteCollection};
use crate::store::notes::{load_notes, save_notes};
use crate::store::KeyValueStore;
use tracing::debug;
use uuid::Uuid;

pub struct NotesApi<S: KeyValueStore> {
    store: S,
    notes: NoteCollection,
    query: String,
    load_warning: Option<String>,
    read_only: bool,
}

impl<S: KeyValueStore> NotesApi<S> {
    /// Loads the collection from `store`. Never fails: unusable stored data
    /// yields an empty collection and a [`load_warning`](Self::load_warning).
    pub fn load(mut store: S) -> Self {
        let loaded = load_notes(&mut store);
        Self {
            store,
            notes: loaded.notes,
            query: String::new(),
            load_warning: loaded.warning,
            read_only: loaded.read_only,
        }
    }

    pub fn create_note(&mut self, content: impl Into<String>) -> Result<CmdResult> {
        self.ensure_writable()?;
        let result = commands::create::run(&mut self.notes, content.into());
        self.persist_if_changed(result)
    }

    pub fn edit_note(&mut self, id: Uuid, content: impl Into<String>) -> Result<CmdResult> {
        self.ensure_writable()?;
        let result = commands::edit::run(&mut self.notes, id, content.into());
        self.persist_if_changed(result)
    }

    pub fn delete_note(&mut self, id: Uuid) -> Result<CmdResult> {
        self.ensure_writable()?;
        let result = commands::delete::run(&mut self.notes, id);
        self.persist_if_changed(result)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn search_query(&self) -> &str {
        &self.query
    }

    pub fn filtered_view(&self) -> Vec<&Note> {
        commands::filter::run(&self.notes, &self.query)
    }

    /// The filtered view as an owned result, with an info message when
    /// nothing matched.
    pub fn list_notes(&self) -> CmdResult {
        let listed: Vec<Note> = self.filtered_view().into_iter().cloned().collect();
        let mut result = CmdResult::default();
        if listed.is_empty() {
            let message = if self.query.is_empty() {
                "No notes yet.".to_string()
            } else {
                format!("No notes match '{}'.", self.query)
            };
            result.add_message(CmdMessage::info(message));
        }
        result.with_listed_notes(listed)
    }

    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    pub fn get_note(&self, id: &Uuid) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn resolve(&self, selector: &NoteSelector) -> Result<Uuid> {
        selector.resolve(&self.notes)
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(NotesError::Store(
                "Stored notes are unreadable and could not be backed up; refusing to overwrite them"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn persist_if_changed(&mut self, result: CmdResult) -> Result<CmdResult> {
        if result.changed {
            save_notes(&mut self.store, self.notes.as_slice())?;
            debug!(count = self.notes.len(), "collection written through");
        }
        Ok(result)
    }
}
