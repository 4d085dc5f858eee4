use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "noted", bin_name = "noted", version)]
#[command(about = "Quick notes for the command line, typed or dictated", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes, newest first, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Only show notes containing this text (case-insensitive)
        query: Vec<String>,
    },

    /// Search notes (dedicated command)
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Create a note from arguments, piped stdin, or $EDITOR
    #[command(alias = "n")]
    Create {
        /// Text of the note
        text: Vec<String>,

        /// Skip opening the editor when no text is given
        #[arg(long)]
        no_editor: bool,
    },

    /// Dictate a note from a transcriber piped into stdin
    ///
    /// Each line is a transcript segment; lines starting with "~ " are
    /// interim hypotheses replaced by the next line.
    #[command(alias = "rec")]
    Dictate {
        /// Recognition locale for this session (overrides config)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Show a note in full
    #[command(alias = "v")]
    View {
        /// Position in the list (e.g. 1) or note id / id prefix
        selector: String,
    },

    /// Replace a note's text (opens $EDITOR when no text is given)
    #[command(alias = "e")]
    Edit {
        /// Position in the list (e.g. 1) or note id / id prefix
        selector: String,

        /// New text; an empty string deletes the note
        text: Vec<String>,

        /// Do not ask before deleting a note whose text was cleared
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete one or more notes
    #[command(alias = "rm")]
    Delete {
        /// Positions or ids (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (locale, confirm-delete)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
