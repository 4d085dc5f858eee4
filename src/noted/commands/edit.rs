use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Note, NoteCollection};
use uuid::Uuid;

/// Replaces the content of note `id` and moves it to the front.
///
/// Empty content is rejected without a message. An unknown id leaves the
/// collection untouched and reports a warning.
pub fn run(notes: &mut NoteCollection, id: Uuid, content: String) -> CmdResult {
    if content.is_empty() {
        return CmdResult::default();
    }

    if notes.remove(&id).is_none() {
        return CmdResult::default()
            .with_message(CmdMessage::warning(format!("Note not found: {}", id)));
    }

    let note = Note::revised(id, content);
    notes.prepend(note.clone());

    CmdResult::default()
        .with_affected_notes(vec![note])
        .with_message(CmdMessage::success("Note edited"))
        .changed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;

    fn seeded() -> NoteCollection {
        let mut notes = NoteCollection::new();
        create::run(&mut notes, "first".into());
        create::run(&mut notes, "second".into());
        create::run(&mut notes, "third".into());
        notes
    }

    #[test]
    fn moves_edited_note_to_front() {
        let mut notes = seeded();
        let target = notes.as_slice()[2].clone();

        let result = run(&mut notes, target.id, "first, revised".into());

        assert!(result.changed);
        assert_eq!(notes.len(), 3);
        let front = &notes.as_slice()[0];
        assert_eq!(front.id, target.id);
        assert_eq!(front.content, "first, revised");
        assert!(front.date >= target.date);
        assert_eq!(notes.iter().filter(|n| n.id == target.id).count(), 1);
    }

    #[test]
    fn empty_content_is_ignored() {
        let mut notes = seeded();
        let before = notes.clone();
        let id = notes.as_slice()[1].id;

        let result = run(&mut notes, id, String::new());

        assert!(!result.changed);
        assert!(result.messages.is_empty());
        assert_eq!(notes, before);
    }

    #[test]
    fn unknown_id_does_not_touch_other_notes() {
        let mut notes = seeded();
        let before = notes.clone();

        let result = run(&mut notes, Uuid::new_v4(), "ghost".into());

        assert!(!result.changed);
        assert_eq!(notes, before);
        assert_eq!(result.messages.len(), 1);
    }
}
