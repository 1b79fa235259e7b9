use std::path::PathBuf;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Configuration for a device session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfiguration {
    /// Directory where recording files are written.
    pub output_directory: PathBuf,

    /// Pre-selected recording to play back instead of a live device.
    /// When set, device enumeration is skipped.
    pub playback_uri: Option<String>,

    /// Extension for recording files, without the leading dot (default: "oni").
    pub file_extension: String,

    /// Let the recorder store streams with lossy compression (default: true).
    pub allow_lossy_compression: bool,

    /// Add one stream consumer as soon as the device opens (default: true).
    pub add_default_stream: bool,

    /// Write a `.metadata.json` sidecar next to each recording (default: true).
    pub write_metadata: bool,

    /// Minimum severity of the sensor middleware's own log output, passed to
    /// `DeviceProvider::initialize` (default: trace, everything).
    pub middleware_log_level: LevelFilter,
}

impl SessionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.file_extension.is_empty() {
            return Err("file extension must not be empty".into());
        }
        if self.file_extension.starts_with('.') || self.file_extension.contains('/') {
            return Err(format!("invalid file extension: {}", self.file_extension));
        }
        if let Some(uri) = &self.playback_uri {
            if uri.trim().is_empty() {
                return Err("playback uri must not be blank".into());
            }
        }
        Ok(())
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            playback_uri: None,
            file_extension: "oni".into(),
            allow_lossy_compression: true,
            add_default_stream: true,
            write_metadata: true,
            middleware_log_level: LevelFilter::Trace,
        }
    }
}
