//! A recognizer fed by a line-oriented transcript stream.
//!
//! Terminal users dictate by piping an external speech-to-text tool into
//! `noted dictate`. Each input line is a segment:
//!
//! - `~ text` is an interim hypothesis for the segment in progress; a later
//!   interim or final line replaces it
//! - any other non-blank line is a final segment
//!
//! A reader thread forwards lines over a channel; the session turns them into
//! cumulative [`RecognitionEvent`]s. End of input ends the session.

use super::{
    RecognitionConfig, RecognitionEvent, RecognitionResult, RecognitionSession, SessionPoll,
    SpeechRecognizer,
};
use crate::error::{NotesError, Result};
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

const INTERIM_PREFIX: &str = "~ ";

enum SourceMsg {
    Line(String),
    Failed(String),
}

pub struct LineRecognizer {
    source: Option<Box<dyn BufRead + Send>>,
    available: bool,
}

impl LineRecognizer {
    pub fn new<R: BufRead + Send + 'static>(source: R) -> Self {
        Self {
            source: Some(Box::new(source)),
            available: true,
        }
    }

    /// Reads from stdin. Only available when stdin is piped; an interactive
    /// terminal is not a transcriber.
    pub fn stdin() -> Self {
        let stdin = io::stdin();
        let available = !stdin.is_terminal();
        Self {
            source: Some(Box::new(BufReader::new(stdin))),
            available,
        }
    }
}

impl SpeechRecognizer for LineRecognizer {
    fn is_available(&self) -> bool {
        self.available && self.source.is_some()
    }

    fn start(&mut self, config: &RecognitionConfig) -> Result<Box<dyn RecognitionSession>> {
        let source = self
            .source
            .take()
            .ok_or_else(|| NotesError::Speech("transcript source already consumed".into()))?;

        let (tx, rx) = mpsc::channel();
        let stopped = Arc::new(AtomicBool::new(false));
        let reader_stopped = Arc::clone(&stopped);

        // The reader may be parked in a blocking read when the session stops;
        // it exits on its next line or at end of input.
        thread::spawn(move || {
            for line in source.lines() {
                if reader_stopped.load(Ordering::Relaxed) {
                    break;
                }
                let msg = match line {
                    Ok(text) => SourceMsg::Line(text),
                    Err(e) => SourceMsg::Failed(e.to_string()),
                };
                let failed = matches!(msg, SourceMsg::Failed(_));
                if tx.send(msg).is_err() || failed {
                    break;
                }
            }
        });

        debug!(locale = %config.locale, interim = config.interim_results, "line recognizer started");
        Ok(Box::new(LineSession {
            rx,
            stopped,
            results: Vec::new(),
            interim_results: config.interim_results,
        }))
    }
}

struct LineSession {
    rx: Receiver<SourceMsg>,
    stopped: Arc<AtomicBool>,
    results: Vec<RecognitionResult>,
    interim_results: bool,
}

impl LineSession {
    /// Folds a line into the segment list. Returns false for lines that
    /// produce no event.
    fn apply(&mut self, line: &str) -> bool {
        let line = line.trim_end();
        let (text, is_final) = match line.strip_prefix(INTERIM_PREFIX) {
            Some(rest) => (rest.trim(), false),
            None => (line.trim(), true),
        };
        if text.is_empty() || (!is_final && !self.interim_results) {
            return false;
        }

        let in_progress = self.results.last().is_some_and(|r| !r.is_final);
        if in_progress {
            self.results.pop();
        }
        let transcript = if self.results.is_empty() {
            text.to_string()
        } else {
            format!(" {}", text)
        };
        self.results.push(if is_final {
            RecognitionResult::final_result(transcript)
        } else {
            RecognitionResult::interim(transcript)
        });
        true
    }
}

impl RecognitionSession for LineSession {
    fn poll(&mut self) -> SessionPoll {
        if self.stopped.load(Ordering::Relaxed) {
            return SessionPoll::Ended(None);
        }
        loop {
            match self.rx.try_recv() {
                Ok(SourceMsg::Line(line)) => {
                    if self.apply(&line) {
                        return SessionPoll::Event(RecognitionEvent {
                            results: self.results.clone(),
                        });
                    }
                }
                Ok(SourceMsg::Failed(e)) => {
                    warn!(error = %e, "transcript source failed");
                    return SessionPoll::Ended(Some(e));
                }
                Err(TryRecvError::Empty) => return SessionPoll::Pending,
                Err(TryRecvError::Disconnected) => return SessionPoll::Ended(None),
            }
        }
    }

    fn stop(&mut self) {
        self.stopped.store(true, Ordering::Relaxed);
    }
}
