use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;

use crate::models::config::SessionConfiguration;
use crate::models::error::SessionError;
use crate::models::recording_result::RecordingResult;
use crate::models::state::{AcquisitionState, RecordingState, SessionState};
use crate::session::acquisition::AcquisitionGate;
use crate::session::recording::{RecordingSession, RecordingTarget};
use crate::session::registry::StreamRegistry;
use crate::storage::naming;
use crate::traits::device_provider::{DeviceHandle, DeviceProvider};
use crate::traits::session_delegate::SessionDelegate;
use crate::traits::stream_consumer::StreamConsumer;

/// Outcome of `SessionController::toggle_recording`.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingToggle {
    Started(PathBuf),
    Stopped(RecordingResult),
}

/// Drives one device session from host lifecycle triggers.
///
/// Owns the open device, the stream consumers and the recording session.
/// The host forwards its resume/pause callbacks, menu actions and the
/// provider's open completions; user-facing messages come back through the
/// `SessionDelegate`.
///
/// ```text
/// [resume] → enumerate → [AcquisitionGate] ⇢ open completion
///                                               ↓
///                 [StreamRegistry] ← bind ← device
///                        ↓ snapshot
///                 [RecordingSession] → recorder → file
/// ```
///
/// The provider is initialized on construction and shut down on drop.
pub struct SessionController<P: DeviceProvider> {
    provider: P,
    config: SessionConfiguration,
    state: SessionState,
    gate: AcquisitionGate,
    registry: StreamRegistry<P::Consumer>,
    device: Option<P::Device>,
    recording: RecordingSession<P::Recorder>,
    delegate: Option<Arc<dyn SessionDelegate>>,
}

impl<P: DeviceProvider> SessionController<P> {
    pub fn new(mut provider: P, config: SessionConfiguration) -> Result<Self, SessionError> {
        config.validate().map_err(SessionError::ConfigurationFailed)?;
        provider.initialize(config.middleware_log_level)?;
        log::debug!(
            "Sensor provider initialized (middleware log level {})",
            config.middleware_log_level
        );

        let recording =
            RecordingSession::new(config.allow_lossy_compression, config.write_metadata);

        Ok(Self {
            provider,
            config,
            state: SessionState::Idle,
            gate: AcquisitionGate::new(),
            registry: StreamRegistry::new(),
            device: None,
            recording,
            delegate: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn acquisition_state(&self) -> AcquisitionState {
        self.gate.state()
    }

    pub fn recording_state(&self) -> RecordingState {
        self.recording.state()
    }

    pub fn stream_count(&self) -> usize {
        self.registry.len()
    }

    /// Uri of the open device, if any.
    pub fn device_uri(&self) -> Option<&str> {
        self.device.as_ref().map(|d| d.uri())
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Host became visible. From idle, pick a device and request to open it.
    ///
    /// The configured playback uri wins over live devices; otherwise the
    /// first enumerated device is used. Does nothing while a request is
    /// outstanding, since the permission prompt itself triggers a resume.
    pub fn on_resume(&mut self) -> Result<(), SessionError> {
        match &self.state {
            SessionState::Idle => {}
            SessionState::Acquiring { uri } => {
                log::debug!("Resume while opening {}, not requesting again", uri);
                return Ok(());
            }
            SessionState::Active { .. } | SessionState::Terminated => return Ok(()),
        }

        let uri = match self.target_uri() {
            Ok(uri) => uri,
            Err(e) => {
                self.terminate(&e);
                return Err(e);
            }
        };

        let provider = &mut self.provider;
        match self.gate.request_acquire(&uri, |u| provider.request_open(u)) {
            Ok(true) => {
                log::info!("Requested device {}", uri);
                self.set_state(SessionState::Acquiring { uri });
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => {
                log::error!("Open request for {} failed: {}", uri, e);
                let e = SessionError::DeviceOpenFailed(uri);
                self.terminate(&e);
                Err(e)
            }
        }
    }

    /// The provider opened the requested device.
    ///
    /// Binds every existing stream to it and adds the default stream. A
    /// completion that answers no pending request is closed and ignored.
    pub fn on_device_opened(&mut self, mut device: P::Device) {
        if !self.state.is_acquiring() || !self.gate.on_acquired(device.uri()) {
            log::warn!("Closing unexpected device {}", device.uri());
            device.close();
            return;
        }

        let uri = device.uri().to_string();
        log::info!(
            "Permission granted for device {} (requested {})",
            uri,
            self.gate.uri().unwrap_or_default()
        );

        let bound = self.registry.bind_all(&device);
        log::debug!("Bound {} existing stream(s) to {}", bound, uri);
        self.device = Some(device);
        self.set_state(SessionState::Active { uri });

        if self.config.add_default_stream {
            if let Err(e) = self.add_stream() {
                log::warn!("Failed to add default stream: {}", e);
            }
        }
    }

    /// The provider could not open the requested device. Ends the session.
    ///
    /// Returns `Ok(())` if the completion answered no pending request.
    pub fn on_device_open_failed(&mut self, uri: &str) -> Result<(), SessionError> {
        if !self.state.is_acquiring() || !self.gate.on_failed(uri) {
            return Ok(());
        }

        log::error!("Failed to open device {}", uri);
        let e = SessionError::DeviceOpenFailed(uri.to_string());
        self.terminate(&e);
        Err(e)
    }

    /// Add a stream consumer, bound to the open device if there is one.
    ///
    /// Streams added before the device opens are bound when it does.
    pub fn add_stream(&mut self) -> Result<(), SessionError> {
        if self.state.is_terminated() {
            return Ok(());
        }

        let mut consumer = self.provider.create_consumer();
        if let Some(device) = &self.device {
            if let Err(e) = consumer.bind(device) {
                consumer.stop();
                return Err(e);
            }
        }

        let label = self.registry.add(consumer).label();
        log::debug!("Added stream {} ({} total)", label, self.registry.len());
        Ok(())
    }

    /// Start recording every current stream to a new timestamped file.
    ///
    /// Recorder failures are reported to the delegate and leave the session
    /// running without a recording.
    pub fn start_recording(&mut self) -> Result<PathBuf, SessionError> {
        match self.try_start_recording() {
            Ok(path) => Ok(path),
            Err(e @ SessionError::RecordingStartFailed(_)) => {
                log::error!("{}", e);
                if let Some(ref delegate) = self.delegate {
                    delegate.on_alert(&format!("Failed to start recording: {}", start_message(&e)));
                }
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Stop the active recording, if any, and announce where it was saved.
    pub fn stop_recording(&mut self) -> Option<RecordingResult> {
        let result = self.recording.stop()?;

        if let Some(ref delegate) = self.delegate {
            delegate.on_alert(&format!("Recording saved to: {}", result.file_path.display()));
            delegate.on_recording_finished(&result);
        }
        Some(result)
    }

    pub fn toggle_recording(&mut self) -> Result<RecordingToggle, SessionError> {
        match self.stop_recording() {
            Some(result) => Ok(RecordingToggle::Stopped(result)),
            None => self.start_recording().map(RecordingToggle::Started),
        }
    }

    /// Host went to the background. Releases the recording, the streams and
    /// the device and returns to idle.
    ///
    /// Ignored while an open request is outstanding: the permission prompt
    /// pauses the host too.
    pub fn on_pause(&mut self) {
        match &self.state {
            SessionState::Acquiring { uri } => {
                log::debug!("Pause while opening {}, keeping session", uri);
                return;
            }
            SessionState::Terminated => return,
            _ => {}
        }

        self.release_resources();
        self.gate.release();
        if !self.state.is_idle() {
            self.set_state(SessionState::Idle);
        }
    }

    // --- Internal helpers ---

    fn target_uri(&self) -> Result<String, SessionError> {
        if let Some(uri) = &self.config.playback_uri {
            log::debug!("Opening recording {}", uri);
            return Ok(uri.clone());
        }

        let devices = self.provider.enumerate()?;
        match devices.into_iter().next() {
            Some(info) => {
                match info.usb_id() {
                    Some(usb_id) => log::debug!(
                        "Found {} ({}, usb {}) at {}",
                        info.name,
                        info.vendor,
                        usb_id,
                        info.uri
                    ),
                    None => log::debug!("Found {} ({}) at {}", info.name, info.vendor, info.uri),
                }
                Ok(info.uri)
            }
            None => Err(SessionError::NoDeviceFound),
        }
    }

    fn try_start_recording(&mut self) -> Result<PathBuf, SessionError> {
        let device_uri = match &self.state {
            SessionState::Active { uri } => uri.clone(),
            SessionState::Terminated => {
                return Err(SessionError::InvalidState("session has ended".into()))
            }
            _ => return Err(SessionError::InvalidState("no device is open".into())),
        };
        if self.recording.is_active() {
            return Err(SessionError::InvalidState("a recording is already active".into()));
        }

        let streams = self.registry.snapshot()?;

        let directory = &self.config.output_directory;
        fs::create_dir_all(directory).map_err(|e| {
            SessionError::RecordingStartFailed(format!(
                "cannot create {}: {}",
                directory.display(),
                e
            ))
        })?;

        let started_at = Local::now();
        let path = naming::recording_path(directory, &started_at, &self.config.file_extension);
        let target = RecordingTarget {
            path: path.clone(),
            device_uri,
            started_at,
        };

        let provider = &mut self.provider;
        self.recording
            .start(target, streams, |p| provider.create_recorder(p))?;
        Ok(path)
    }

    /// Stop recording, stop all streams and close the device. Safe to call
    /// when none of them is active.
    fn release_resources(&mut self) {
        self.stop_recording();
        self.registry.stop_all();
        if let Some(mut device) = self.device.take() {
            log::info!("Closing device {}", device.uri());
            device.close();
        }
    }

    fn terminate(&mut self, error: &SessionError) {
        log::error!("Session ended: {}", error);
        self.release_resources();
        self.set_state(SessionState::Terminated);
        if let Some(ref delegate) = self.delegate {
            delegate.on_alert_and_exit(&exit_message(error));
        }
    }

    fn set_state(&mut self, new_state: SessionState) {
        log::debug!("Session state: {:?} -> {:?}", self.state, new_state);
        self.state = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&self.state);
        }
    }
}

impl<P: DeviceProvider> Drop for SessionController<P> {
    fn drop(&mut self) {
        self.release_resources();
        self.provider.shutdown();
        log::debug!("Sensor provider shut down");
    }
}

fn exit_message(error: &SessionError) -> String {
    match error {
        SessionError::NoDeviceFound => "No compliant sensor device found.".into(),
        SessionError::DeviceOpenFailed(_) => "Failed to open device".into(),
        other => other.to_string(),
    }
}

fn start_message(error: &SessionError) -> String {
    match error {
        SessionError::RecordingStartFailed(msg) => msg.clone(),
        other => other.to_string(),
    }
}
