//! # Editors
//!
//! Editors hold the text a user is working on before it reaches the
//! collection. They never write storage themselves: saving or deleting goes
//! through [`NotesApi`](crate::api::NotesApi).
//!
//! - [`create::NewNoteEditor`]: composes a new note, typed or dictated
//! - [`note::NoteEditor`]: edits or deletes an existing note
//! - [`external`]: hands a text buffer to the user's `$EDITOR`

pub mod create;
pub mod external;
pub mod note;
