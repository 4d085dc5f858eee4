use crate::editor::note::ClearPolicy;
use crate::error::{NotesError, Result};
use crate::speech::RecognitionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LOCALE: &str = "pt-BR";

/// Configuration for noted, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    /// Speech recognition locale (BCP 47, e.g. "pt-BR", "en-US")
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Ask before deleting a note whose text was cleared
    #[serde(default = "default_confirm")]
    pub confirm_delete_on_clear: bool,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_confirm() -> bool {
    true
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            confirm_delete_on_clear: default_confirm(),
        }
    }
}

/// Keys accepted by `noted config`.
pub const CONFIG_KEYS: &[&str] = &["locale", "confirm-delete"];

impl NotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotesError::Io)?;
        let config: NotesConfig =
            serde_json::from_str(&content).map_err(NotesError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotesError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotesError::Serialization)?;
        fs::write(config_path, content).map_err(NotesError::Io)?;
        Ok(())
    }

    pub fn recognition(&self) -> RecognitionConfig {
        RecognitionConfig::default().with_locale(self.locale.clone())
    }

    pub fn clear_policy(&self) -> ClearPolicy {
        if self.confirm_delete_on_clear {
            ClearPolicy::Confirm
        } else {
            ClearPolicy::DeleteImmediately
        }
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "locale" => Ok(self.locale.clone()),
            "confirm-delete" => Ok(self.confirm_delete_on_clear.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "locale" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(NotesError::Api("Locale cannot be empty".into()));
                }
                self.locale = value.to_string();
            }
            "confirm-delete" => {
                self.confirm_delete_on_clear = match value.trim() {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    other => {
                        return Err(NotesError::Api(format!(
                            "Expected true or false for confirm-delete, got '{}'",
                            other
                        )))
                    }
                };
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> NotesError {
    NotesError::Api(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = NotesConfig::default();
        assert_eq!(config.locale, "pt-BR");
        assert!(config.confirm_delete_on_clear);
        assert_eq!(config.clear_policy(), ClearPolicy::Confirm);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = NotesConfig::load(dir.path()).unwrap();
        assert_eq!(config, NotesConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");

        let mut config = NotesConfig::default();
        config.set("locale", "en-US").unwrap();
        config.set("confirm-delete", "off").unwrap();
        config.save(&nested).unwrap();

        let loaded = NotesConfig::load(&nested).unwrap();
        assert_eq!(loaded.locale, "en-US");
        assert_eq!(loaded.clear_policy(), ClearPolicy::DeleteImmediately);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"locale":"es-ES"}"#).unwrap();

        let config = NotesConfig::load(dir.path()).unwrap();
        assert_eq!(config.locale, "es-ES");
        assert!(config.confirm_delete_on_clear);
    }

    #[test]
    fn test_recognition_uses_locale() {
        let mut config = NotesConfig::default();
        config.set("locale", "fr-FR").unwrap();
        assert_eq!(config.recognition().locale, "fr-FR");
    }

    #[test]
    fn test_rejects_unknown_key_and_bad_values() {
        let mut config = NotesConfig::default();
        assert!(config.set("colour", "red").is_err());
        assert!(config.set("confirm-delete", "maybe").is_err());
        assert!(config.set("locale", "  ").is_err());
        assert!(config.get("colour").is_err());
    }
}
