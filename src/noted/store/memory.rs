use super::KeyValueStore;
use crate::error::Result;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    items: HashMap<String, String>,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.writes += 1;
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }

    fn copy_item(&mut self, from: &str, to: &str) -> Result<()> {
        if let Some(value) = self.items.get(from).cloned() {
            self.writes += 1;
            self.items.insert(to.to_string(), value);
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Note;
    use crate::store::notes::{save_notes, NOTES_KEY};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        notes: Vec<Note>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                notes: Vec::new(),
            }
        }

        /// Appends a note; fixture notes keep the order they are added in.
        pub fn with_note(mut self, content: &str) -> Self {
            self.notes.push(Note::new(content.to_string()));
            self
        }

        pub fn with_raw(mut self, blob: &str) -> Self {
            self.store.set_item(NOTES_KEY, blob).unwrap();
            self.store.writes = 0;
            self
        }

        /// Seeds the store; the seeding write is not counted.
        pub fn build(mut self) -> InMemoryStore {
            if !self.notes.is_empty() {
                save_notes(&mut self.store, &self.notes).unwrap();
                self.store.writes = 0;
            }
            self.store
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_writes() {
        let mut store = InMemoryStore::new();
        store.set_item("a", "1").unwrap();
        store.set_item("a", "2").unwrap();
        assert_eq!(store.write_count(), 2);
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn copy_duplicates_existing_value_only() {
        let mut store = InMemoryStore::new();
        store.copy_item("a", "b").unwrap();
        assert_eq!(store.get_item("b").unwrap(), None);

        store.set_item("a", "1").unwrap();
        store.copy_item("a", "b").unwrap();
        assert_eq!(store.get_item("b").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let mut store = InMemoryStore::new();
        assert!(store.remove_item("nope").is_ok());
    }
}
