use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single note. The timestamp is replaced wholesale on every edit, so there
/// is no separate created/updated pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub content: String,
}

impl Note {
    pub fn new(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            content,
        }
    }

    /// Builds the replacement for an edited note: same id, fresh timestamp.
    pub fn revised(id: Uuid, content: String) -> Self {
        Self {
            id,
            date: Utc::now(),
            content,
        }
    }
}

/// The authoritative, newest-first list of notes.
///
/// Order is the insertion order: notes are prepended on create and on edit,
/// never sorted by date. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from loaded notes, dropping entries that break the
    /// invariants (empty content, repeated id). Returns the collection and the
    /// number of dropped entries.
    pub fn from_loaded(notes: Vec<Note>) -> (Self, usize) {
        let total = notes.len();
        let mut kept: Vec<Note> = Vec::with_capacity(total);
        for note in notes {
            if note.content.is_empty() || kept.iter().any(|n| n.id == note.id) {
                continue;
            }
            kept.push(note);
        }
        let dropped = total - kept.len();
        (Self { notes: kept }, dropped)
    }

    pub fn prepend(&mut self, note: Note) {
        self.notes.insert(0, note);
    }

    /// Removes the note with `id`, returning it if present.
    pub fn remove(&mut self, id: &Uuid) -> Option<Note> {
        let pos = self.position(id)?;
        Some(self.notes.remove(pos))
    }

    pub fn get(&self, id: &Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.notes.iter().position(|n| &n.id == id)
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
