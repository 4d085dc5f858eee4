//! # Note Selectors
//!
//! Notes are identified by UUID in storage, which is unwieldy to type. The CLI
//! lets users refer to a note either by its 1-based position in the collection
//! (newest first, the order `list` prints) or by its UUID, in full or as a
//! unique prefix of at least [`MIN_PREFIX_LEN`] characters.
//!
//! Positions always refer to the full collection, never to a filtered view, so
//! `noted edit 2` means the same note no matter what was last searched.

use crate::error::{NotesError, Result};
use crate::model::NoteCollection;
use std::str::FromStr;
use uuid::Uuid;

pub const MIN_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteSelector {
    Position(usize),
    Id(Uuid),
    IdPrefix(String),
}

impl std::fmt::Display for NoteSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteSelector::Position(n) => write!(f, "{}", n),
            NoteSelector::Id(id) => write!(f, "{}", id),
            NoteSelector::IdPrefix(prefix) => write!(f, "{}…", prefix),
        }
    }
}

impl FromStr for NoteSelector {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                return Err(NotesError::InvalidSelector(s.to_string()));
            }
            return Ok(NoteSelector::Position(n));
        }
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(NoteSelector::Id(id));
        }
        let is_hex = s.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
        if s.len() >= MIN_PREFIX_LEN && is_hex {
            return Ok(NoteSelector::IdPrefix(s.to_ascii_lowercase()));
        }
        Err(NotesError::InvalidSelector(s.to_string()))
    }
}

impl NoteSelector {
    /// Resolves the selector against `notes`, returning the matching id.
    pub fn resolve(&self, notes: &NoteCollection) -> Result<Uuid> {
        match self {
            NoteSelector::Position(n) => n
                .checked_sub(1)
                .and_then(|i| notes.as_slice().get(i))
                .map(|note| note.id)
                .ok_or_else(|| NotesError::InvalidSelector(n.to_string())),
            NoteSelector::Id(id) => notes
                .get(id)
                .map(|note| note.id)
                .ok_or(NotesError::NoteNotFound(*id)),
            NoteSelector::IdPrefix(prefix) => {
                let mut candidates = notes
                    .iter()
                    .filter(|note| note.id.to_string().starts_with(prefix.as_str()));
                match (candidates.next(), candidates.next()) {
                    (Some(note), None) => Ok(note.id),
                    (Some(_), Some(_)) => Err(NotesError::Api(format!(
                        "Id prefix '{}' matches more than one note",
                        prefix
                    ))),
                    (None, _) => Err(NotesError::InvalidSelector(prefix.clone())),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Note;

    fn notes() -> NoteCollection {
        let mut notes = NoteCollection::new();
        notes.prepend(Note::new("older".into()));
        notes.prepend(Note::new("newer".into()));
        notes
    }

    #[test]
    fn parses_positions() {
        assert_eq!("3".parse::<NoteSelector>().unwrap(), NoteSelector::Position(3));
        assert!("0".parse::<NoteSelector>().is_err());
    }

    #[test]
    fn parses_full_ids_and_prefixes() {
        let id = Uuid::new_v4();
        assert_eq!(
            id.to_string().parse::<NoteSelector>().unwrap(),
            NoteSelector::Id(id)
        );
        assert_eq!(
            "AB12cd".parse::<NoteSelector>().unwrap(),
            NoteSelector::IdPrefix("ab12cd".into())
        );
        assert!("abc".parse::<NoteSelector>().is_err());
        assert!("hello".parse::<NoteSelector>().is_err());
    }

    #[test]
    fn resolves_position_newest_first() {
        let notes = notes();
        let id = NoteSelector::Position(1).resolve(&notes).unwrap();
        assert_eq!(notes.get(&id).unwrap().content, "newer");
        assert!(NoteSelector::Position(3).resolve(&notes).is_err());
    }

    #[test]
    fn position_zero_is_invalid_not_a_panic() {
        let err = NoteSelector::Position(0)
            .resolve(&NoteCollection::new())
            .unwrap_err();
        assert!(matches!(err, NotesError::InvalidSelector(_)));
        assert!(NoteSelector::Position(0).resolve(&notes()).is_err());
    }

    #[test]
    fn resolves_unique_prefix() {
        let notes = notes();
        let target = notes.as_slice()[1].id;
        let prefix = target.to_string()[..8].to_string();
        let id = NoteSelector::IdPrefix(prefix).resolve(&notes).unwrap();
        assert_eq!(id, target);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let notes = notes();
        let err = NoteSelector::Id(Uuid::new_v4()).resolve(&notes).unwrap_err();
        assert!(matches!(err, NotesError::NoteNotFound(_)));
    }
}
