//! # Storage Layer
//!
//! Notes are persisted through the [`KeyValueStore`] trait: a string key maps to
//! a string blob, the same contract as a browser's local storage. The whole
//! collection lives under a single key and is rewritten on every mutation.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one `<key>.json` file per key
//! - [`memory::InMemoryStore`]: in-memory storage for testing, counts writes
//!
//! ## Storage Format
//!
//! ```text
//! ~/.local/share/noted/
//! ├── notes.json      # JSON array of {id, date, content}, newest first
//! ├── notes.bak.json  # Unparseable blob preserved on a failed load
//! └── config.json     # NotesConfig
//! ```
//!
//! Reading and writing the collection itself is done by [`notes`], which owns
//! the fail-safe load rules.

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod notes;

/// Abstract key-value persistence.
pub trait KeyValueStore {
    /// Returns the blob stored under `key`, or `None` if the key was never set.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the blob stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;

    /// Copies the stored bytes of `from` to `to` without decoding them, so a
    /// blob that cannot be read as text can still be set aside. Copying a
    /// missing key is not an error.
    fn copy_item(&mut self, from: &str, to: &str) -> Result<()>;
}
