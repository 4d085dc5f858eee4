//! Reading and writing the note collection through a [`KeyValueStore`].
//!
//! Loading never fails: a missing blob is an empty collection, and an
//! unreadable or malformed blob is reported as a warning, copied to
//! [`BACKUP_KEY`], and replaced by an empty collection. When that copy cannot
//! be made the result is marked read-only, so nothing overwrites the only copy
//! of the user's data.

use super::KeyValueStore;
use crate::error::{NotesError, Result};
use crate::model::{Note, NoteCollection};
use tracing::{debug, warn};

/// Key holding the serialized collection.
pub const NOTES_KEY: &str = "notes";

/// Key receiving a blob that could not be read or parsed at startup.
pub const BACKUP_KEY: &str = "notes.bak";

#[derive(Debug, Default)]
pub struct LoadedNotes {
    pub notes: NoteCollection,
    /// Diagnostic for the user when the stored data was not usable as-is.
    pub warning: Option<String>,
    /// Set when unusable data could not be backed up and must not be
    /// overwritten.
    pub read_only: bool,
}

impl LoadedNotes {
    /// Empty collection standing in for stored data that could not be used.
    /// The raw blob is copied aside first; `backup` performs the copy.
    fn recovered<F>(reason: String, backup: F) -> Self
    where
        F: FnOnce() -> Result<()>,
    {
        let (warning, read_only) = match backup() {
            Ok(()) => (
                format!("{}; starting empty, previous data kept under '{}'", reason, BACKUP_KEY),
                false,
            ),
            Err(e) => {
                warn!(error = %e, "could not back up unusable notes");
                (
                    format!("{}; could not back it up, so changes will not be saved", reason),
                    true,
                )
            }
        };
        LoadedNotes {
            notes: NoteCollection::new(),
            warning: Some(warning),
            read_only,
        }
    }
}

pub fn load_notes<S: KeyValueStore>(store: &mut S) -> LoadedNotes {
    let raw = match store.get_item(NOTES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return LoadedNotes::default(),
        Err(e) => {
            warn!(error = %e, "could not read stored notes, starting empty");
            return LoadedNotes::recovered(format!("Could not read stored notes ({})", e), || {
                store.copy_item(NOTES_KEY, BACKUP_KEY)
            });
        }
    };

    match serde_json::from_str::<Vec<Note>>(&raw) {
        Ok(parsed) => {
            let (notes, dropped) = NoteCollection::from_loaded(parsed);
            debug!(count = notes.len(), "loaded notes");
            let warning = (dropped > 0).then(|| {
                warn!(dropped, "dropped invalid stored notes");
                format!("Ignored {} invalid stored note(s)", dropped)
            });
            LoadedNotes {
                notes,
                warning,
                read_only: false,
            }
        }
        Err(e) => {
            warn!(error = %e, "stored notes are malformed, starting empty");
            LoadedNotes::recovered(format!("Stored notes could not be parsed ({})", e), || {
                store.set_item(BACKUP_KEY, &raw)
            })
        }
    }
}

pub fn save_notes<S: KeyValueStore>(store: &mut S, notes: &[Note]) -> Result<()> {
    let blob = serde_json::to_string_pretty(notes).map_err(NotesError::Serialization)?;
    store.set_item(NOTES_KEY, &blob)?;
    debug!(count = notes.len(), "persisted notes");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::fs::FileStore;
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    const NOT_UTF8: &[u8] = b"[{\"id\":\"9b2f4c3e-8a64-4b8e-9d2a-5f0e7c1a2b3c\",\"date\":\"2024-02-01T12:30:00Z\",\"content\":\"caf\xe9\"}]";

    /// A store whose reads and copies fail, counting attempted writes.
    #[derive(Default)]
    struct UnreadableStore {
        writes: usize,
    }

    impl KeyValueStore for UnreadableStore {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(NotesError::Store("disk unreadable".into()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            self.writes += 1;
            Ok(())
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }

        fn copy_item(&mut self, _from: &str, _to: &str) -> Result<()> {
            Err(NotesError::Store("disk unreadable".into()))
        }
    }

    #[test]
    fn missing_blob_loads_empty_without_warning() {
        let mut store = InMemoryStore::new();
        let loaded = load_notes(&mut store);
        assert!(loaded.notes.is_empty());
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn loads_saved_notes_in_order() {
        let mut store = StoreFixture::new()
            .with_note("newest")
            .with_note("oldest")
            .build();
        let loaded = load_notes(&mut store);
        let contents: Vec<_> = loaded.notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["newest", "oldest"]);
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn malformed_blob_fails_safe_and_is_backed_up() {
        let mut store = StoreFixture::new().with_raw("{not json").build();
        let loaded = load_notes(&mut store);

        assert!(loaded.notes.is_empty());
        assert!(loaded.warning.unwrap().contains("could not be parsed"));
        assert_eq!(
            store.get_item(BACKUP_KEY).unwrap().as_deref(),
            Some("{not json")
        );
        // The stored blob is untouched until the next mutation
        assert_eq!(
            store.get_item(NOTES_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn unreadable_bytes_are_backed_up_verbatim() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.json"), NOT_UTF8).unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        let loaded = load_notes(&mut store);

        assert!(loaded.notes.is_empty());
        assert!(!loaded.read_only);
        assert!(loaded.warning.unwrap().contains("Could not read stored notes"));
        assert_eq!(fs::read(dir.path().join("notes.bak.json")).unwrap(), NOT_UTF8);
    }

    #[test]
    fn failed_backup_marks_load_read_only() {
        let mut store = UnreadableStore::default();

        let loaded = load_notes(&mut store);

        assert!(loaded.read_only);
        assert!(loaded.warning.unwrap().contains("changes will not be saved"));
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn invalid_entries_are_dropped_with_warning() {
        let blob = r#"[
            {"id":"9b2f4c3e-8a64-4b8e-9d2a-5f0e7c1a2b3c","date":"2024-02-01T12:30:00.000Z","content":"ok"},
            {"id":"1c2d3e4f-0000-4000-8000-000000000000","date":"2024-02-01T12:00:00Z","content":""}
        ]"#;
        let mut store = StoreFixture::new().with_raw(blob).build();
        let loaded = load_notes(&mut store);

        assert_eq!(loaded.notes.len(), 1);
        assert_eq!(loaded.warning.as_deref(), Some("Ignored 1 invalid stored note(s)"));
    }

    #[test]
    fn save_writes_a_json_array() {
        let mut store = InMemoryStore::new();
        let notes = vec![Note::new("hello".into())];
        save_notes(&mut store, &notes).unwrap();

        let raw = store.get_item(NOTES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["content"], "hello");
        assert!(value[0]["id"].is_string());
        assert!(value[0]["date"].is_string());
    }
}
