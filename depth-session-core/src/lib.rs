//! # depth-session-core
//!
//! Host-agnostic session core for depth sensor viewers.
//!
//! Coordinates permission-gated device opening, fan-out of the open device
//! to stream consumers, and recording of a snapshot of those streams. The
//! sensor middleware plugs in through the `DeviceProvider` trait; the host
//! (UI shell, service, test harness) forwards its lifecycle callbacks to a
//! `SessionController` and receives user-facing messages through a
//! `SessionDelegate`.
//!
//! ## Architecture
//!
//! ```text
//! depth-session-core (this crate)
//! ├── traits/       ← DeviceProvider, DeviceHandle, StreamConsumer, Recorder, SessionDelegate
//! ├── models/       ← SessionError, SessionState, SessionConfiguration, DeviceInfo, RecordingResult
//! ├── session/      ← AcquisitionGate, StreamRegistry, RecordingSession, SessionController
//! └── storage/      ← recording naming, metadata sidecar
//! ```
//!
//! ## Usage
//! ```ignore
//! let mut controller = SessionController::new(provider, SessionConfiguration::default())?;
//! controller.set_delegate(Arc::new(EventQueue::new()));
//!
//! controller.on_resume()?;                 // host resumed
//! controller.on_device_opened(device);     // provider completion
//! controller.toggle_recording()?;          // menu action
//! controller.on_pause();                   // host paused
//! ```

pub mod models;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_support;

// Re-export key types at crate root for convenience.
pub use models::config::SessionConfiguration;
pub use models::device::DeviceInfo;
pub use models::error::SessionError;
pub use models::recording_result::{RecordingMetadata, RecordingResult};
pub use models::state::{AcquisitionState, RecordingState, SessionState};
pub use session::acquisition::AcquisitionGate;
pub use session::controller::{RecordingToggle, SessionController};
pub use session::events::{EventQueue, SessionEvent};
pub use session::recording::{RecordingSession, RecordingTarget};
pub use session::registry::StreamRegistry;
pub use traits::device_provider::{DeviceHandle, DeviceProvider};
pub use traits::recorder::Recorder;
pub use traits::session_delegate::SessionDelegate;
pub use traits::stream_consumer::StreamConsumer;
