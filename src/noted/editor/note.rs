use crate::api::NotesApi;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Note;
use crate::store::KeyValueStore;
use uuid::Uuid;

/// What happens when an existing note's text is emptied.
///
/// Clearing the text and saving an empty text are the same intent: delete the
/// note. The policy only decides whether that intent needs confirming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearPolicy {
    DeleteImmediately,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEditorState {
    Editing,
    /// The text was emptied; waiting for `confirm_delete` or `cancel_delete`.
    PendingDelete,
    /// The note was deleted. Every further call is a no-op.
    Closed,
}

/// Views, edits, or deletes one existing note.
pub struct NoteEditor {
    id: Uuid,
    saved: String,
    buffer: String,
    state: NoteEditorState,
    policy: ClearPolicy,
}

impl NoteEditor {
    pub fn new(note: &Note, policy: ClearPolicy) -> Self {
        Self {
            id: note.id,
            saved: note.content.clone(),
            buffer: note.content.clone(),
            state: NoteEditorState::Editing,
            policy,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn state(&self) -> NoteEditorState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer != self.saved
    }

    /// Replaces the buffered text. Emptying it is a delete intent.
    pub fn set_text<S: KeyValueStore>(
        &mut self,
        text: impl Into<String>,
        api: &mut NotesApi<S>,
    ) -> Result<CmdResult> {
        if self.state == NoteEditorState::Closed {
            return Ok(CmdResult::default());
        }
        self.buffer = text.into();
        if self.buffer.is_empty() {
            return self.delete_intent(api);
        }
        self.state = NoteEditorState::Editing;
        Ok(CmdResult::default())
    }

    /// Writes the buffer to the note. An empty buffer is a delete intent.
    pub fn save<S: KeyValueStore>(&mut self, api: &mut NotesApi<S>) -> Result<CmdResult> {
        match self.state {
            NoteEditorState::Closed => return Ok(CmdResult::default()),
            NoteEditorState::PendingDelete => return self.delete_intent(api),
            NoteEditorState::Editing => {}
        }
        if self.buffer.is_empty() {
            return self.delete_intent(api);
        }

        let result = api.edit_note(self.id, self.buffer.clone())?;
        if result.changed {
            self.saved = self.buffer.clone();
        }
        Ok(result)
    }

    /// Deletes the note outright.
    pub fn delete<S: KeyValueStore>(&mut self, api: &mut NotesApi<S>) -> Result<CmdResult> {
        if self.state == NoteEditorState::Closed {
            return Ok(CmdResult::default());
        }
        let result = api.delete_note(self.id)?;
        self.state = NoteEditorState::Closed;
        Ok(result)
    }

    pub fn confirm_delete<S: KeyValueStore>(
        &mut self,
        api: &mut NotesApi<S>,
    ) -> Result<CmdResult> {
        if self.state != NoteEditorState::PendingDelete {
            return Ok(CmdResult::default());
        }
        self.delete(api)
    }

    /// Backs out of a pending delete, restoring the last saved text.
    pub fn cancel_delete(&mut self) {
        if self.state == NoteEditorState::PendingDelete {
            self.buffer = self.saved.clone();
            self.state = NoteEditorState::Editing;
        }
    }

    fn delete_intent<S: KeyValueStore>(&mut self, api: &mut NotesApi<S>) -> Result<CmdResult> {
        match self.policy {
            ClearPolicy::DeleteImmediately => self.delete(api),
            ClearPolicy::Confirm => {
                self.state = NoteEditorState::PendingDelete;
                Ok(CmdResult::default().with_message(CmdMessage::warning(
                    "Note is empty; confirm to delete it",
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn api_with(content: &str) -> NotesApi<InMemoryStore> {
        NotesApi::load(StoreFixture::new().with_note(content).build())
    }

    fn first(api: &NotesApi<InMemoryStore>) -> Note {
        api.notes().as_slice()[0].clone()
    }

    #[test]
    fn save_edits_and_moves_note_to_front() {
        let mut api = NotesApi::load(
            StoreFixture::new()
                .with_note("newer")
                .with_note("buy milk")
                .build(),
        );
        let note = api.notes().as_slice()[1].clone();
        let mut editor = NoteEditor::new(&note, ClearPolicy::Confirm);

        editor.set_text("buy oat milk", &mut api).unwrap();
        assert!(editor.is_dirty());
        let result = editor.save(&mut api).unwrap();

        assert_eq!(result.messages[0].content, "Note edited");
        assert_eq!(first(&api).id, note.id);
        assert_eq!(first(&api).content, "buy oat milk");
        assert!(!editor.is_dirty());
    }

    #[test]
    fn clearing_deletes_immediately_under_immediate_policy() {
        let mut api = api_with("buy milk");
        let note = first(&api);
        let mut editor = NoteEditor::new(&note, ClearPolicy::DeleteImmediately);

        let result = editor.set_text("", &mut api).unwrap();

        assert_eq!(result.messages[0].content, "Note deleted");
        assert!(api.notes().is_empty());
        assert_eq!(editor.state(), NoteEditorState::Closed);
    }

    #[test]
    fn clearing_waits_for_confirmation_by_default() {
        let mut api = api_with("buy milk");
        let note = first(&api);
        let mut editor = NoteEditor::new(&note, ClearPolicy::Confirm);

        editor.set_text("", &mut api).unwrap();
        assert_eq!(editor.state(), NoteEditorState::PendingDelete);
        assert_eq!(api.notes().len(), 1);

        editor.confirm_delete(&mut api).unwrap();
        assert!(api.notes().is_empty());
        assert_eq!(editor.state(), NoteEditorState::Closed);
    }

    #[test]
    fn cancel_restores_saved_text() {
        let mut api = api_with("buy milk");
        let note = first(&api);
        let mut editor = NoteEditor::new(&note, ClearPolicy::Confirm);

        editor.set_text("", &mut api).unwrap();
        editor.cancel_delete();

        assert_eq!(editor.state(), NoteEditorState::Editing);
        assert_eq!(editor.text(), "buy milk");
        assert_eq!(api.store().write_count(), 0);
    }

    #[test]
    fn typing_again_leaves_pending_delete() {
        let mut api = api_with("buy milk");
        let note = first(&api);
        let mut editor = NoteEditor::new(&note, ClearPolicy::Confirm);

        editor.set_text("", &mut api).unwrap();
        editor.set_text("b", &mut api).unwrap();

        assert_eq!(editor.state(), NoteEditorState::Editing);
        assert_eq!(api.notes().len(), 1);
    }

    #[test]
    fn saving_empty_text_is_the_same_delete_intent() {
        let mut api = api_with("buy milk");
        let note = first(&api);
        let mut immediate = NoteEditor::new(&note, ClearPolicy::DeleteImmediately);
        immediate.buffer.clear();

        immediate.save(&mut api).unwrap();

        assert!(api.notes().is_empty());
    }

    #[test]
    fn explicit_delete_always_succeeds() {
        let mut api = api_with("buy milk");
        let note = first(&api);
        let mut editor = NoteEditor::new(&note, ClearPolicy::Confirm);

        let result = editor.delete(&mut api).unwrap();

        assert_eq!(result.messages[0].content, "Note deleted");
        assert!(api.notes().is_empty());
    }

    #[test]
    fn closed_editor_ignores_further_calls() {
        let mut api = api_with("buy milk");
        let note = first(&api);
        let mut editor = NoteEditor::new(&note, ClearPolicy::Confirm);
        editor.delete(&mut api).unwrap();
        api.create_note("another").unwrap();
        let writes = api.store().write_count();

        editor.set_text("resurrect", &mut api).unwrap();
        editor.save(&mut api).unwrap();
        editor.delete(&mut api).unwrap();

        assert_eq!(api.store().write_count(), writes);
        assert_eq!(api.notes().len(), 1);
    }
}
