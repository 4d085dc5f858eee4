//! # Noted Architecture
//!
//! Noted is a **UI-agnostic note-taking library** with a CLI client. Notes are
//! short texts, typed or dictated, kept newest-first and filtered by a live
//! search query.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Editors (editor/)                                          │
//! │  - New note: typed or dictated, owns the capture session    │
//! │  - Existing note: edit, clear-to-delete, delete             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the collection and the search query                 │
//! │  - Writes the whole collection through after each mutation  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure transformations of the in-memory collection         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait, FileStore, InMemoryStore            │
//! │  - Fail-safe loading of the serialized collection           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Speech capture (`speech/`) sits beside the editors: the create editor is the
//! only owner of a live capture session.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `editor/` inward, code never writes to stdout/stderr and never exits
//! the process. Outcomes are returned as `Result<CmdResult>`, with user-facing
//! notifications carried as [`commands::CmdMessage`]s. Diagnostics go through
//! `tracing`.
//!
//! ## Module Overview
//!
//! - [`api`]: The list/filter controller
//! - [`commands`]: Business logic for each mutation and the filter
//! - [`editor`]: Create and edit editors, `$EDITOR` integration
//! - [`speech`]: Recognizer traits, capture sessions, line-fed recognizer
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Note` and `NoteCollection`
//! - [`index`]: Selecting notes by position or id
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod index;
pub mod model;
pub mod speech;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
