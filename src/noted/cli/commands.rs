//! Context setup and per-command handlers.
//!
//! Handlers call the editors and the API, then hand the returned `CmdResult`
//! to `print`. Business rules stay in the library.

use super::print::{
    end_live_transcript, print_full_note, print_live_transcript, print_messages, print_notes,
    print_warning, time_formatter,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use noted::api::NotesApi;
use noted::commands::{CmdMessage, CmdResult};
use noted::config::NotesConfig;
use noted::editor::create::NewNoteEditor;
use noted::editor::external::{edit_text, normalize_buffer};
use noted::editor::note::{NoteEditor, NoteEditorState};
use noted::error::{NotesError, Result};
use noted::index::NoteSelector;
use noted::speech::line::LineRecognizer;
use noted::store::fs::FileStore;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

const HOME_ENV: &str = "NOTED_HOME";
const DICTATION_POLL: Duration = Duration::from_millis(50);

struct AppContext {
    api: NotesApi<FileStore>,
    config: NotesConfig,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::List { query }) => handle_list(&mut ctx, query.join(" ")),
        Some(Commands::Search { term }) => handle_list(&mut ctx, term.join(" ")),
        Some(Commands::Create { text, no_editor }) => handle_create(&mut ctx, text, no_editor),
        Some(Commands::Dictate { locale }) => handle_dictate(&mut ctx, locale),
        Some(Commands::View { selector }) => handle_view(&ctx, &selector),
        Some(Commands::Edit {
            selector,
            text,
            yes,
        }) => handle_edit(&mut ctx, &selector, text, yes),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, &selectors),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, String::new()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "noted=debug" } else { "noted=error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    ProjectDirs::from("com", "noted", "noted")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NotesError::Store("Could not determine data directory".to_string()))
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = NotesConfig::load(&data_dir).unwrap_or_else(|e| {
        print_warning(&format!("Ignoring unreadable config: {}", e));
        NotesConfig::default()
    });

    let api = NotesApi::load(FileStore::new(data_dir.clone()));
    if let Some(warning) = api.load_warning() {
        print_warning(warning);
    }

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

fn resolve(ctx: &AppContext, selector: &str) -> Result<Uuid> {
    let selector: NoteSelector = selector.parse()?;
    ctx.api.resolve(&selector)
}

fn position_of(ctx: &AppContext, id: &Uuid) -> usize {
    ctx.api.notes().position(id).map_or(0, |p| p + 1)
}

fn handle_list(ctx: &mut AppContext, query: String) -> Result<()> {
    ctx.api.set_search_query(query);
    let result = ctx.api.list_notes();
    let rows: Vec<_> = result
        .listed_notes
        .iter()
        .map(|note| (position_of(ctx, &note.id), note))
        .collect();
    print_notes(&rows, &time_formatter(&ctx.config.locale));
    print_messages(&result.messages);
    Ok(())
}

fn handle_create(ctx: &mut AppContext, text: Vec<String>, no_editor: bool) -> Result<()> {
    let content = if !text.is_empty() {
        text.join(" ")
    } else if !io::stdin().is_terminal() {
        read_piped_stdin()?
    } else if no_editor {
        String::new()
    } else {
        edit_text("")?
    };

    let mut editor = NewNoteEditor::new(ctx.config.recognition());
    editor.start_editing();
    editor.set_text(content);
    let result = editor.save(&mut ctx.api)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_dictate(ctx: &mut AppContext, locale: Option<String>) -> Result<()> {
    let mut recognition = ctx.config.recognition();
    if let Some(locale) = locale {
        recognition = recognition.with_locale(locale);
    }

    let mut editor = NewNoteEditor::new(recognition);
    let mut recognizer = LineRecognizer::stdin();
    editor.start_recording(&mut recognizer)?;

    let mut shown = String::new();
    loop {
        let live = match editor.pump() {
            Ok(live) => live,
            Err(e) => {
                end_live_transcript();
                print_warning(&e.to_string());
                false
            }
        };
        if editor.text() != shown {
            shown = editor.text().to_string();
            print_live_transcript(&shown);
        }
        if !live {
            break;
        }
        thread::sleep(DICTATION_POLL);
    }
    if !shown.is_empty() {
        end_live_transcript();
    }

    let result = editor.save(&mut ctx.api)?;
    if result.affected_notes.is_empty() {
        print_messages(&[CmdMessage::info("Nothing was dictated.")]);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, selector: &str) -> Result<()> {
    let id = resolve(ctx, selector)?;
    let note = ctx.api.get_note(&id).ok_or(NotesError::NoteNotFound(id))?;
    print_full_note(
        position_of(ctx, &id),
        note,
        &time_formatter(&ctx.config.locale),
    );
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, selector: &str, text: Vec<String>, yes: bool) -> Result<()> {
    let id = resolve(ctx, selector)?;
    let note = ctx
        .api
        .get_note(&id)
        .cloned()
        .ok_or(NotesError::NoteNotFound(id))?;

    let new_text = if text.is_empty() {
        edit_text(&note.content)?
    } else {
        text.join(" ")
    };

    let mut editor = NoteEditor::new(&note, ctx.config.clear_policy());
    let result = editor.set_text(new_text, &mut ctx.api)?;

    let result = match editor.state() {
        NoteEditorState::Closed => result,
        NoteEditorState::PendingDelete => {
            if yes || confirm("The note is now empty. Delete it?")? {
                editor.confirm_delete(&mut ctx.api)?
            } else {
                editor.cancel_delete();
                let mut kept = CmdResult::default();
                kept.add_message(CmdMessage::info("Note kept unchanged."));
                kept
            }
        }
        NoteEditorState::Editing if editor.is_dirty() => editor.save(&mut ctx.api)?,
        NoteEditorState::Editing => {
            let mut unchanged = result;
            unchanged.add_message(CmdMessage::info("No changes."));
            unchanged
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: &[String]) -> Result<()> {
    // Resolve everything first: positions shift as notes are removed
    let ids = selectors
        .iter()
        .map(|s| resolve(ctx, s))
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    for id in ids {
        result.merge(ctx.api.delete_note(id)?);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            println!("locale = {}", ctx.config.locale);
            println!("confirm-delete = {}", ctx.config.confirm_delete_on_clear);
        }
        (Some(key), None) => println!("{} = {}", key, ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            print_messages(&[CmdMessage::success(format!(
                "{} set to {}",
                key,
                ctx.config.get(&key)?
            ))]);
        }
    }
    Ok(())
}

/// Reads all of piped stdin. Empty input yields an empty note text.
fn read_piped_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().lock().read_to_string(&mut buffer)?;
    Ok(normalize_buffer(&buffer))
}

/// Asks a yes/no question on the terminal. Without a terminal the answer is no.
fn confirm(question: &str) -> Result<bool> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(false);
    }
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
