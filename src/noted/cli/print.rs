use chrono::{DateTime, Utc};
use colored::Colorize;
use noted::commands::{CmdMessage, MessageLevel};
use noted::model::Note;
use timeago::languages::{
    boxup, english::English, french::French, german::German, italian::Italian,
    portuguese::Portuguese, spanish::Spanish,
};
use timeago::{BoxedLanguage, Formatter};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const INDEX_WIDTH: usize = 5;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_warning(text: &str) {
    eprintln!("{}", text.yellow());
}

/// Relative-date formatter speaking the language of `locale` (e.g. "pt-BR").
/// Unknown languages fall back to English.
pub(super) fn time_formatter(locale: &str) -> Formatter<BoxedLanguage> {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let lang = match language.as_str() {
        "pt" => boxup(Portuguese),
        "es" => boxup(Spanish),
        "fr" => boxup(French),
        "de" => boxup(German),
        "it" => boxup(Italian),
        _ => boxup(English),
    };
    Formatter::with_language(lang)
}

/// Prints one line per note. `position` is the note's place in the full
/// collection, which is what selectors refer to.
pub(super) fn print_notes(notes: &[(usize, &Note)], times: &Formatter<BoxedLanguage>) {
    for (position, note) in notes {
        let idx_str = format!("{:>width$}. ", position, width = INDEX_WIDTH - 2);
        let available = LINE_WIDTH.saturating_sub(idx_str.width() + TIME_WIDTH);

        let preview = truncate_to_width(&single_line(&note.content), available);
        let padding = available.saturating_sub(preview.width());

        println!(
            "{}{}{}{}",
            idx_str.yellow(),
            preview,
            " ".repeat(padding),
            format_time_ago(note.date, times).dimmed()
        );
    }
}

pub(super) fn print_full_note(position: usize, note: &Note, times: &Formatter<BoxedLanguage>) {
    println!(
        "{} {}  {}",
        position.to_string().yellow(),
        note.id.to_string().dimmed(),
        format_time_ago(note.date, times).trim_start().dimmed()
    );
    println!("--------------------------------");
    println!("{}", note.content);
}

pub(super) fn print_live_transcript(text: &str) {
    let preview = truncate_to_width(&single_line(text), LINE_WIDTH);
    eprint!("\r\x1b[2K{} {}", "●".red(), preview);
}

pub(super) fn end_live_transcript() {
    eprintln!();
}

fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>, formatter: &Formatter<BoxedLanguage>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
