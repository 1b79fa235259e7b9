use thiserror::Error;

/// Errors that can occur while driving a device session.
///
/// `NoDeviceFound` and `DeviceOpenFailed` end the session. Recording
/// failures are recovered locally and leave the device session running.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no compliant sensor device found")]
    NoDeviceFound,

    #[error("failed to open device {0}")]
    DeviceOpenFailed(String),

    #[error("failed to start recording: {0}")]
    RecordingStartFailed(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("backend error: {0}")]
    Backend(String),
}
