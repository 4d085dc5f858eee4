//! # Speech Capture
//!
//! Dictation is abstracted behind two traits:
//!
//! - [`SpeechRecognizer`]: a platform capability that may or may not be present,
//!   and that opens sessions.
//! - [`RecognitionSession`]: one live, continuous recognition session. It is
//!   polled for events; each event carries **every** result segment observed
//!   so far, so consumers replace their whole buffer with
//!   [`RecognitionEvent::transcript`] rather than appending. Interim segments
//!   that get corrected later are therefore reflected correctly.
//!
//! Sessions are never held bare. [`CaptureSession`] owns one and stops it on
//! [`CaptureSession::stop`] and on drop, so a session cannot outlive the editor
//! that started it. Stopping twice is a no-op.
//!
//! ## Backends
//!
//! - [`line::LineRecognizer`]: reads transcript lines from a piped source
//! - [`Unavailable`]: the host has no recognizer

use crate::error::{NotesError, Result};
use tracing::debug;

pub mod line;

const DEFAULT_LOCALE: &str = "pt-BR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    pub locale: String,
    /// Keep listening after the first final result.
    pub continuous: bool,
    /// Deliver hypotheses before they are final.
    pub interim_results: bool,
    pub max_alternatives: u8,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            continuous: true,
            interim_results: true,
            max_alternatives: 1,
        }
    }
}

impl RecognitionConfig {
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionAlternative {
    pub transcript: String,
    pub confidence: f32,
}

/// One recognized segment, with its alternatives ordered best first.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub alternatives: Vec<RecognitionAlternative>,
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self::single(transcript.into(), false)
    }

    pub fn final_result(transcript: impl Into<String>) -> Self {
        Self::single(transcript.into(), true)
    }

    fn single(transcript: String, is_final: bool) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative {
                transcript,
                confidence: 1.0,
            }],
            is_final,
        }
    }

    pub fn best(&self) -> Option<&RecognitionAlternative> {
        self.alternatives.first()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecognitionEvent {
    pub results: Vec<RecognitionResult>,
}

impl RecognitionEvent {
    /// Concatenation of the best alternative of every segment, in order.
    pub fn transcript(&self) -> String {
        self.results
            .iter()
            .filter_map(|r| r.best())
            .map(|alt| alt.transcript.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionPoll {
    Event(RecognitionEvent),
    /// Nothing new yet; the session is still live.
    Pending,
    /// The session finished on its own, with an error message if it failed.
    Ended(Option<String>),
}

pub trait RecognitionSession {
    /// Returns the next pending event without blocking.
    fn poll(&mut self) -> SessionPoll;

    /// Halts recognition and releases the underlying resources.
    fn stop(&mut self);
}

pub trait SpeechRecognizer {
    fn is_available(&self) -> bool;

    fn start(&mut self, config: &RecognitionConfig) -> Result<Box<dyn RecognitionSession>>;
}

/// Owned handle on a live recognition session.
pub struct CaptureSession {
    inner: Option<Box<dyn RecognitionSession>>,
}

impl CaptureSession {
    /// Opens a session, or fails with [`NotesError::SpeechUnavailable`] when the
    /// recognizer is missing.
    pub fn start<R>(recognizer: &mut R, config: &RecognitionConfig) -> Result<Self>
    where
        R: SpeechRecognizer + ?Sized,
    {
        if !recognizer.is_available() {
            return Err(NotesError::SpeechUnavailable);
        }
        let inner = recognizer.start(config)?;
        debug!(locale = %config.locale, "capture session started");
        Ok(Self { inner: Some(inner) })
    }

    pub fn poll(&mut self) -> SessionPoll {
        match self.inner.as_mut() {
            Some(session) => session.poll(),
            None => SessionPoll::Ended(None),
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(mut session) = self.inner.take() {
            session.stop();
            debug!("capture session stopped");
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Recognizer for hosts without speech support.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unavailable;

impl SpeechRecognizer for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self, _config: &RecognitionConfig) -> Result<Box<dyn RecognitionSession>> {
        Err(NotesError::SpeechUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedRecognizer;

    #[test]
    fn default_config_matches_dictation_needs() {
        let config = RecognitionConfig::default();
        assert_eq!(config.locale, "pt-BR");
        assert!(config.continuous);
        assert!(config.interim_results);
        assert_eq!(config.max_alternatives, 1);
    }

    #[test]
    fn transcript_concatenates_best_alternatives() {
        let mut first = RecognitionResult::final_result("hello");
        first.alternatives.push(RecognitionAlternative {
            transcript: "yellow".into(),
            confidence: 0.2,
        });
        let event = RecognitionEvent {
            results: vec![first, RecognitionResult::interim(" world")],
        };
        assert_eq!(event.transcript(), "hello world");
    }

    #[test]
    fn unavailable_recognizer_refuses_to_start() {
        let err = CaptureSession::start(&mut Unavailable, &RecognitionConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, NotesError::SpeechUnavailable));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut recognizer = ScriptedRecognizer::new(vec![]);
        let mut capture =
            CaptureSession::start(&mut recognizer, &RecognitionConfig::default()).unwrap();

        capture.stop();
        capture.stop();

        assert!(!capture.is_active());
        assert_eq!(recognizer.stop_count(), 1);
        assert_eq!(capture.poll(), SessionPoll::Ended(None));
    }

    #[test]
    fn drop_releases_session() {
        let mut recognizer = ScriptedRecognizer::new(vec![]);
        {
            let _capture =
                CaptureSession::start(&mut recognizer, &RecognitionConfig::default()).unwrap();
            assert_eq!(recognizer.active_sessions(), 1);
        }
        assert_eq!(recognizer.active_sessions(), 0);
    }

    #[test]
    fn passes_config_to_recognizer() {
        let mut recognizer = ScriptedRecognizer::new(vec![]);
        let config = RecognitionConfig::default().with_locale("en-US");
        let _capture = CaptureSession::start(&mut recognizer, &config).unwrap();
        assert_eq!(recognizer.last_config().unwrap().locale, "en-US");
    }
}
