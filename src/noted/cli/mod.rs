//! # CLI Layer
//!
//! This module is **one possible UI client** for noted. It is the only place
//! that parses arguments, talks to the terminal, and decides exit codes.
//!
//! - `setup`: clap definitions
//! - `commands`: context setup and per-command handlers
//! - `print`: turning `CmdResult`s and notes into terminal output

pub mod commands;
mod print;
mod setup;
