use super::KeyValueStore;
use crate::error::{NotesError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const FILE_EXT: &str = ".json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    pub fn item_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(NotesError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}{}", key, FILE_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotesError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(NotesError::Io)?;
        Ok(Some(content))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.item_path(key)?;

        // Write to a sibling temp file, then rename over the target
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(NotesError::Io)?;
        fs::rename(&tmp, &path).map_err(NotesError::Io)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(NotesError::Io)?;
        }
        Ok(())
    }

    fn copy_item(&mut self, from: &str, to: &str) -> Result<()> {
        let source = self.item_path(from)?;
        let target = self.item_path(to)?;
        if !source.exists() {
            return Ok(());
        }
        fs::copy(source, target).map_err(NotesError::Io)?;
        Ok(())
    }
}
