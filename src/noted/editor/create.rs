use crate::api::NotesApi;
use crate::commands::CmdResult;
use crate::error::{NotesError, Result};
use crate::speech::{CaptureSession, RecognitionConfig, SessionPoll, SpeechRecognizer};
use crate::store::KeyValueStore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateState {
    /// Nothing entered yet; the user picks typing or dictation.
    Onboarding,
    EditingText,
    Recording,
}

/// Composes a new note from typed or dictated text.
///
/// The editor owns at most one capture session. It is released on
/// [`stop_recording`](Self::stop_recording), on [`save`](Self::save), when the
/// session ends on its own, and when the editor is dropped.
///
/// Saving does not close the editor: it returns to onboarding, ready for the
/// next note.
pub struct NewNoteEditor {
    state: CreateState,
    buffer: String,
    capture: Option<CaptureSession>,
    recognition: RecognitionConfig,
}

impl NewNoteEditor {
    pub fn new(recognition: RecognitionConfig) -> Self {
        Self {
            state: CreateState::Onboarding,
            buffer: String::new(),
            capture: None,
            recognition,
        }
    }

    pub fn state(&self) -> CreateState {
        self.state
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_recording(&self) -> bool {
        self.capture.is_some()
    }

    pub fn start_editing(&mut self) {
        if self.state == CreateState::Onboarding {
            self.state = CreateState::EditingText;
        }
    }

    /// Starts dictation. Fails with `SpeechUnavailable` and leaves the editor
    /// untouched when the recognizer is missing. Does nothing while a session
    /// is already live.
    pub fn start_recording<R>(&mut self, recognizer: &mut R) -> Result<()>
    where
        R: SpeechRecognizer + ?Sized,
    {
        if self.capture.is_some() {
            debug!("already recording, ignoring start");
            return Ok(());
        }
        let capture = CaptureSession::start(recognizer, &self.recognition)?;
        self.capture = Some(capture);
        self.state = CreateState::Recording;
        Ok(())
    }

    /// Applies every pending recognition event to the buffer.
    ///
    /// Returns whether dictation is still live. When the session ended with an
    /// error it is released and the error is returned; the text captured so far
    /// is kept.
    pub fn pump(&mut self) -> Result<bool> {
        let Some(capture) = self.capture.as_mut() else {
            return Ok(false);
        };
        loop {
            match capture.poll() {
                SessionPoll::Event(event) => self.buffer = event.transcript(),
                SessionPoll::Pending => return Ok(true),
                SessionPoll::Ended(err) => {
                    self.release();
                    return match err {
                        Some(message) => Err(NotesError::Speech(message)),
                        None => Ok(false),
                    };
                }
            }
        }
    }

    /// Stops dictation, keeping the buffered text. Safe to call at any time.
    pub fn stop_recording(&mut self) {
        if self.capture.is_some() {
            self.release();
        }
    }

    /// Manual text change. Clearing the text returns to onboarding.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        if self.is_recording() {
            return;
        }
        self.state = if self.buffer.is_empty() {
            CreateState::Onboarding
        } else {
            CreateState::EditingText
        };
    }

    /// Creates a note from the buffer. An empty buffer is a silent no-op.
    pub fn save<S: KeyValueStore>(&mut self, api: &mut NotesApi<S>) -> Result<CmdResult> {
        if self.is_recording() {
            if let Err(e) = self.pump() {
                warn!(error = %e, "dictation ended with an error before save");
            }
            self.stop_recording();
        }
        if self.buffer.is_empty() {
            return Ok(CmdResult::default());
        }

        let result = api.create_note(self.buffer.clone())?;
        self.buffer.clear();
        self.state = CreateState::Onboarding;
        Ok(result)
    }

    fn release(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            capture.stop();
        }
        self.state = if self.buffer.is_empty() {
            CreateState::Onboarding
        } else {
            CreateState::EditingText
        };
    }
}
