use crate::models::recording_result::RecordingResult;
use crate::models::state::SessionState;

/// Event delegate for session notifications.
///
/// Called synchronously from whichever thread drives the controller.
pub trait SessionDelegate: Send + Sync {
    /// Called when the controller state changes.
    fn on_state_changed(&self, state: &SessionState);

    /// A user-facing message. The session carries on.
    fn on_alert(&self, message: &str);

    /// A user-facing message after which the host surface should exit.
    fn on_alert_and_exit(&self, message: &str);

    /// Called when a recording is stopped and its file finalized.
    fn on_recording_finished(&self, result: &RecordingResult);
}
