//! Test doubles shared by unit tests (and downstream crates via the
//! `test_utils` feature).

use crate::error::{NotesError, Result};
use crate::speech::{
    RecognitionConfig, RecognitionEvent, RecognitionResult, RecognitionSession, SessionPoll,
    SpeechRecognizer,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Default)]
struct Shared {
    queue: VecDeque<SessionPoll>,
    active: usize,
    stops: usize,
    last_config: Option<RecognitionConfig>,
}

/// A recognizer whose sessions replay queued polls. Once the queue is empty a
/// session reports `Pending` until stopped.
pub struct ScriptedRecognizer {
    available: bool,
    shared: Rc<RefCell<Shared>>,
}

impl ScriptedRecognizer {
    pub fn new(script: Vec<SessionPoll>) -> Self {
        let shared = Shared {
            queue: script.into(),
            ..Shared::default()
        };
        Self {
            available: true,
            shared: Rc::new(RefCell::new(shared)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(vec![])
        }
    }

    /// Queues a poll result for the live session, as if the platform had just
    /// delivered it.
    pub fn push(&self, poll: SessionPoll) {
        self.shared.borrow_mut().queue.push_back(poll);
    }

    pub fn active_sessions(&self) -> usize {
        self.shared.borrow().active
    }

    pub fn stop_count(&self) -> usize {
        self.shared.borrow().stops
    }

    pub fn last_config(&self) -> Option<RecognitionConfig> {
        self.shared.borrow().last_config.clone()
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn start(&mut self, config: &RecognitionConfig) -> Result<Box<dyn RecognitionSession>> {
        if !self.available {
            return Err(NotesError::SpeechUnavailable);
        }
        let mut shared = self.shared.borrow_mut();
        shared.active += 1;
        shared.last_config = Some(config.clone());
        Ok(Box::new(ScriptedSession {
            shared: Rc::clone(&self.shared),
            stopped: false,
        }))
    }
}

struct ScriptedSession {
    shared: Rc<RefCell<Shared>>,
    stopped: bool,
}

impl RecognitionSession for ScriptedSession {
    fn poll(&mut self) -> SessionPoll {
        if self.stopped {
            return SessionPoll::Ended(None);
        }
        self.shared
            .borrow_mut()
            .queue
            .pop_front()
            .unwrap_or(SessionPoll::Pending)
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            let mut shared = self.shared.borrow_mut();
            shared.active -= 1;
            shared.stops += 1;
        }
    }
}

/// An event whose segments are all interim hypotheses.
pub fn interim_event(segments: &[&str]) -> SessionPoll {
    SessionPoll::Event(RecognitionEvent {
        results: segments
            .iter()
            .map(|s| RecognitionResult::interim(*s))
            .collect(),
    })
}
