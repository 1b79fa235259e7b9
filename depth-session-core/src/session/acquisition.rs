use crate::models::error::SessionError;
use crate::models::state::AcquisitionState;

/// Tracks the single in-flight device open request.
///
/// The permission prompt that precedes opening a device pauses and resumes
/// the host, so the same "resume" trigger can arrive while a request is
/// still outstanding. The gate refuses to issue a second request in that
/// window, and ignores completions that do not answer a pending request.
#[derive(Debug, Default)]
pub struct AcquisitionGate {
    state: AcquisitionState,
    uri: Option<String>,
}

impl AcquisitionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    /// Uri of the pending, failed or acquired request.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Issue an open request for `uri` through `open`.
    ///
    /// Returns `Ok(false)` without calling `open` when a request is already
    /// pending. If `open` fails the gate moves to `Failed`.
    pub fn request_acquire<F>(&mut self, uri: &str, open: F) -> Result<bool, SessionError>
    where
        F: FnOnce(&str) -> Result<(), SessionError>,
    {
        if self.state.is_pending() {
            log::debug!(
                "Open request for {} suppressed, {} still pending",
                uri,
                self.uri.as_deref().unwrap_or_default()
            );
            return Ok(false);
        }

        self.uri = Some(uri.to_string());
        self.state = AcquisitionState::Pending;

        if let Err(e) = open(uri) {
            self.state = AcquisitionState::Failed;
            return Err(e);
        }
        Ok(true)
    }

    /// Complete the pending request successfully.
    ///
    /// Returns `false` if nothing was pending.
    pub fn on_acquired(&mut self, uri: &str) -> bool {
        if !self.complete(uri) {
            return false;
        }
        self.state = AcquisitionState::Acquired;
        true
    }

    /// Complete the pending request with a failure.
    ///
    /// Returns `false` if nothing was pending.
    pub fn on_failed(&mut self, uri: &str) -> bool {
        if !self.complete(uri) {
            return false;
        }
        self.state = AcquisitionState::Failed;
        true
    }

    /// Return to `Idle` after the device is released. Has no effect while
    /// a request is pending.
    pub fn release(&mut self) {
        if self.state.is_pending() {
            log::debug!("Release ignored while open request is pending");
            return;
        }
        self.state = AcquisitionState::Idle;
        self.uri = None;
    }

    fn complete(&self, uri: &str) -> bool {
        if !self.state.is_pending() {
            log::warn!(
                "Open completion for {} with no pending request (state: {:?})",
                uri,
                self.state
            );
            return false;
        }
        if self.uri.as_deref() != Some(uri) {
            // Playback files and USB devices may report a normalized uri.
            log::debug!(
                "Open completion uri {} differs from requested {}",
                uri,
                self.uri.as_deref().unwrap_or_default()
            );
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_moves_to_pending() {
        let mut gate = AcquisitionGate::new();
        let mut opened = Vec::new();

        let issued = gate
            .request_acquire("usb://1", |uri| {
                opened.push(uri.to_string());
                Ok(())
            })
            .unwrap();

        assert!(issued);
        assert_eq!(gate.state(), AcquisitionState::Pending);
        assert_eq!(gate.uri(), Some("usb://1"));
        assert_eq!(opened, vec!["usb://1"]);
    }

    #[test]
    fn duplicate_request_while_pending_is_suppressed() {
        let mut gate = AcquisitionGate::new();
        let mut calls = 0;

        gate.request_acquire("usb://1", |_| {
            calls += 1;
            Ok(())
        })
        .unwrap();
        let issued = gate
            .request_acquire("usb://2", |_| {
                calls += 1;
                Ok(())
            })
            .unwrap();

        assert!(!issued);
        assert_eq!(calls, 1);
        assert_eq!(gate.uri(), Some("usb://1"));
    }

    #[test]
    fn failed_open_call_moves_to_failed() {
        let mut gate = AcquisitionGate::new();
        let result = gate.request_acquire("usb://1", |_| Err(SessionError::Backend("boom".into())));

        assert!(result.is_err());
        assert_eq!(gate.state(), AcquisitionState::Failed);
    }

    #[test]
    fn completions_only_apply_to_pending_request() {
        let mut gate = AcquisitionGate::new();
        assert!(!gate.on_acquired("usb://1"));
        assert_eq!(gate.state(), AcquisitionState::Idle);

        gate.request_acquire("usb://1", |_| Ok(())).unwrap();
        assert!(gate.on_acquired("usb://1"));
        assert_eq!(gate.state(), AcquisitionState::Acquired);

        // A second completion for the same request is stale.
        assert!(!gate.on_failed("usb://1"));
        assert_eq!(gate.state(), AcquisitionState::Acquired);
    }

    #[test]
    fn failure_completion() {
        let mut gate = AcquisitionGate::new();
        gate.request_acquire("usb://1", |_| Ok(())).unwrap();

        assert!(gate.on_failed("usb://1"));
        assert_eq!(gate.state(), AcquisitionState::Failed);

        // A failed attempt may be retried.
        assert!(gate.request_acquire("usb://1", |_| Ok(())).unwrap());
    }

    #[test]
    fn release_keeps_pending_request() {
        let mut gate = AcquisitionGate::new();
        gate.request_acquire("usb://1", |_| Ok(())).unwrap();
        gate.release();
        assert_eq!(gate.state(), AcquisitionState::Pending);

        gate.on_acquired("usb://1");
        gate.release();
        assert_eq!(gate.state(), AcquisitionState::Idle);
        assert_eq!(gate.uri(), None);
    }
}
