use crate::commands::{CmdMessage, CmdResult};
use crate::model::NoteCollection;
use uuid::Uuid;

/// Removes note `id`. Always reports a change so the collection is persisted
/// even when nothing matched.
pub fn run(notes: &mut NoteCollection, id: Uuid) -> CmdResult {
    let removed: Vec<_> = notes.remove(&id).into_iter().collect();

    CmdResult::default()
        .with_affected_notes(removed)
        .with_message(CmdMessage::success("Note deleted"))
        .changed()
}
