//! In-memory sensor backend used by the unit tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::LevelFilter;
use parking_lot::Mutex;

use crate::models::device::DeviceInfo;
use crate::models::error::SessionError;
use crate::traits::device_provider::{DeviceHandle, DeviceProvider};
use crate::traits::recorder::Recorder;
use crate::traits::stream_consumer::StreamConsumer;

/// Everything the mock backend was asked to do.
#[derive(Debug, Default)]
pub struct MockLog {
    /// Middleware log level passed to `initialize`, once called.
    pub initialized_with: Option<LevelFilter>,
    pub shut_down: bool,
    pub open_requests: Vec<String>,
    /// `(consumer id, device uri)` for every successful bind.
    pub binds: Vec<(usize, String)>,
    pub stopped_consumers: Vec<usize>,
    pub closed_devices: Vec<String>,
    /// `(file, consumer ids)` for every recorder that was started and stopped.
    pub recordings: Vec<(PathBuf, Vec<usize>)>,
    pub destroyed_recorders: usize,
}

pub type SharedLog = Arc<Mutex<MockLog>>;

pub struct MockDevice {
    uri: String,
    log: SharedLog,
}

impl MockDevice {
    pub fn new(uri: &str, log: &SharedLog) -> Self {
        Self {
            uri: uri.to_string(),
            log: Arc::clone(log),
        }
    }
}

impl DeviceHandle for MockDevice {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn close(&mut self) {
        self.log.lock().closed_devices.push(self.uri.clone());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockStream {
    pub consumer: usize,
}

pub struct MockConsumer {
    id: usize,
    bound: Option<String>,
    fail_bind: bool,
    log: SharedLog,
}

impl StreamConsumer for MockConsumer {
    type Device = MockDevice;
    type Stream = MockStream;

    fn bind(&mut self, device: &MockDevice) -> Result<(), SessionError> {
        if self.fail_bind {
            return Err(SessionError::Backend(format!("stream {} has no sensor", self.id)));
        }
        self.bound = Some(device.uri.clone());
        self.log.lock().binds.push((self.id, device.uri.clone()));
        Ok(())
    }

    fn stop(&mut self) {
        self.bound = None;
        self.log.lock().stopped_consumers.push(self.id);
    }

    fn stream(&self) -> Option<MockStream> {
        self.bound.as_ref().map(|_| MockStream { consumer: self.id })
    }

    fn label(&self) -> String {
        format!("stream-{}", self.id)
    }
}

pub struct MockRecorder {
    path: PathBuf,
    streams: Vec<usize>,
    fail_start: bool,
    log: SharedLog,
}

impl Recorder for MockRecorder {
    type Stream = MockStream;

    fn add_stream(&mut self, stream: &MockStream, _allow_lossy: bool) -> Result<(), SessionError> {
        self.streams.push(stream.consumer);
        Ok(())
    }

    fn start(&mut self) -> Result<(), SessionError> {
        if self.fail_start {
            return Err(SessionError::Backend("recorder refused to start".into()));
        }
        Ok(())
    }

    fn stop(&mut self) {
        let body: Vec<String> = self.streams.iter().map(|id| id.to_string()).collect();
        if let Err(e) = fs::write(&self.path, body.join(",")) {
            log::debug!("mock recorder could not write {}: {}", self.path.display(), e);
        }
        self.log
            .lock()
            .recordings
            .push((self.path.clone(), self.streams.clone()));
    }

    fn destroy(self) {
        self.log.lock().destroyed_recorders += 1;
    }
}

/// Scriptable provider. Open requests are only recorded; tests deliver
/// completions by calling the controller directly.
pub struct MockProvider {
    pub devices: Vec<DeviceInfo>,
    pub fail_request: bool,
    /// Consumer ids whose `bind` always fails.
    pub fail_bind_ids: Vec<usize>,
    pub fail_create_recorder: bool,
    pub fail_recorder_start: bool,
    pub log: SharedLog,
    next_consumer: usize,
}

impl MockProvider {
    pub fn with_devices(uris: &[&str]) -> Self {
        Self {
            devices: uris
                .iter()
                .map(|uri| DeviceInfo::new(*uri, "Mock Sensor", "Mock").with_usb_ids(0x1d27, 0x0601))
                .collect(),
            fail_request: false,
            fail_bind_ids: Vec::new(),
            fail_create_recorder: false,
            fail_recorder_start: false,
            log: SharedLog::default(),
            next_consumer: 0,
        }
    }

    pub fn device(&self, uri: &str) -> MockDevice {
        MockDevice::new(uri, &self.log)
    }
}

impl DeviceProvider for MockProvider {
    type Device = MockDevice;
    type Consumer = MockConsumer;
    type Recorder = MockRecorder;

    fn initialize(&mut self, log_level: LevelFilter) -> Result<(), SessionError> {
        self.log.lock().initialized_with = Some(log_level);
        Ok(())
    }

    fn shutdown(&mut self) {
        self.log.lock().shut_down = true;
    }

    fn enumerate(&self) -> Result<Vec<DeviceInfo>, SessionError> {
        Ok(self.devices.clone())
    }

    fn request_open(&mut self, uri: &str) -> Result<(), SessionError> {
        if self.fail_request {
            return Err(SessionError::Backend("usb service unavailable".into()));
        }
        self.log.lock().open_requests.push(uri.to_string());
        Ok(())
    }

    fn create_consumer(&mut self) -> MockConsumer {
        let id = self.next_consumer;
        self.next_consumer += 1;
        MockConsumer {
            id,
            bound: None,
            fail_bind: self.fail_bind_ids.contains(&id),
            log: Arc::clone(&self.log),
        }
    }

    fn create_recorder(&mut self, path: &Path) -> Result<MockRecorder, SessionError> {
        if self.fail_create_recorder {
            return Err(SessionError::Backend("cannot create recorder".into()));
        }
        Ok(MockRecorder {
            path: path.to_path_buf(),
            streams: Vec::new(),
            fail_start: self.fail_recorder_start,
            log: Arc::clone(&self.log),
        })
    }
}

/// Fresh, empty directory under the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("depth_session_test_{}", name));
    fs::remove_dir_all(&dir).ok();
    fs::create_dir_all(&dir).unwrap();
    dir
}
