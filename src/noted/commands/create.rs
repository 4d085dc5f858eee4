use crate::commands::{CmdMessage, CmdResult};
use crate::model::{Note, NoteCollection};

pub fn run(notes: &mut NoteCollection, content: String) -> CmdResult {
    if content.is_empty() {
        return CmdResult::default();
    }

    let note = Note::new(content);
    notes.prepend(note.clone());

    CmdResult::default()
        .with_affected_notes(vec![note])
        .with_message(CmdMessage::success("Note created"))
        .changed()
}
