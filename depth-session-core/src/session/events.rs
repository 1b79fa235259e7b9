use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::models::recording_result::RecordingResult;
use crate::models::state::SessionState;
use crate::traits::session_delegate::SessionDelegate;

/// A notification raised by the session controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(SessionState),
    Alert(String),
    AlertAndExit(String),
    RecordingFinished(RecordingResult),
}

/// Delegate that queues events for the host's event loop to drain.
///
/// Share it with the controller through an `Arc` and call `drain` from the
/// loop that renders dialogs.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Mutex<VecDeque<SessionEvent>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all queued events, oldest first.
    pub fn drain(&self) -> Vec<SessionEvent> {
        self.events.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    fn push(&self, event: SessionEvent) {
        self.events.lock().push_back(event);
    }
}

impl SessionDelegate for EventQueue {
    fn on_state_changed(&self, state: &SessionState) {
        self.push(SessionEvent::StateChanged(state.clone()));
    }

    fn on_alert(&self, message: &str) {
        self.push(SessionEvent::Alert(message.to_string()));
    }

    fn on_alert_and_exit(&self, message: &str) {
        self.push(SessionEvent::AlertAndExit(message.to_string()));
    }

    fn on_recording_finished(&self, result: &RecordingResult) {
        self.push(SessionEvent::RecordingFinished(result.clone()));
    }
}
