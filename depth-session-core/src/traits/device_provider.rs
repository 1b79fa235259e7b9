use std::path::Path;

use log::LevelFilter;

use crate::models::device::DeviceInfo;
use crate::models::error::SessionError;
use crate::traits::recorder::Recorder;
use crate::traits::stream_consumer::StreamConsumer;

/// An open sensor device.
///
/// Owned by the session controller; at most one is open at a time.
pub trait DeviceHandle {
    /// Uri the device was opened from.
    fn uri(&self) -> &str;

    /// Close the device and release its connection.
    fn close(&mut self);
}

/// Interface to the sensor middleware: enumeration, permission-gated
/// opening, and construction of stream consumers and recorders.
///
/// Opening is asynchronous. `request_open` only issues the request; the
/// host's event loop later reports the outcome through
/// `SessionController::on_device_opened` or
/// `SessionController::on_device_open_failed`, exactly once per request.
pub trait DeviceProvider {
    type Device: DeviceHandle;
    type Consumer: StreamConsumer<Device = Self::Device>;
    type Recorder: Recorder<Stream = <Self::Consumer as StreamConsumer>::Stream>;

    /// Process-wide library initialization. Called once when the
    /// controller is constructed, with the minimum severity the
    /// middleware's own logger should emit.
    fn initialize(&mut self, _log_level: LevelFilter) -> Result<(), SessionError> {
        Ok(())
    }

    /// Library teardown. Called once when the controller is dropped.
    fn shutdown(&mut self) {}

    /// List the devices currently attached, in preference order.
    fn enumerate(&self) -> Result<Vec<DeviceInfo>, SessionError>;

    /// Ask for permission to open `uri`.
    ///
    /// An error here means the request was never issued and no completion
    /// will follow.
    fn request_open(&mut self, uri: &str) -> Result<(), SessionError>;

    /// Create a new, unbound stream consumer.
    fn create_consumer(&mut self) -> Self::Consumer;

    /// Create a recorder writing to `path`.
    fn create_recorder(&mut self, path: &Path) -> Result<Self::Recorder, SessionError>;
}
