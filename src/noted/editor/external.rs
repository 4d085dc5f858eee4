use crate::error::{NotesError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use uuid::Uuid;

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(NotesError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait"
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| NotesError::Api("Empty editor command".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| NotesError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(NotesError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(NotesError::Io)
}

/// Opens the editor on `initial` and returns the edited text, with trailing
/// newlines removed.
pub fn edit_text(initial: &str) -> Result<String> {
    let temp_file = env::temp_dir().join(format!("noted-{}.txt", Uuid::new_v4()));
    fs::write(&temp_file, initial).map_err(NotesError::Io)?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(normalize_buffer(&result?))
}

/// Editors append a final newline; a note never keeps it.
pub fn normalize_buffer(buffer: &str) -> String {
    buffer.trim_end_matches(['\n', '\r']).to_string()
}
