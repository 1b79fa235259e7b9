use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Result returned when a recording session is stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingResult {
    pub file_path: PathBuf,
    pub device_uri: String,
    /// Labels of the streams captured when recording started, in registry order.
    pub streams: Vec<String>,
    pub started_at: DateTime<Local>,
    pub duration_secs: f64,
    /// SHA-256 of the recording file, when the recorder left one on disk.
    pub checksum: Option<String>,
    pub metadata: RecordingMetadata,
}

impl RecordingResult {
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }
}

/// Metadata stored alongside a recording.
///
/// Serializable for the JSON sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub id: String,
    pub file_path: String,
    pub device_uri: String,
    pub streams: Vec<String>,
    pub created_at: String,
    pub duration_secs: f64,
    pub checksum: Option<String>,
    pub lossy_compression: bool,
}

impl RecordingMetadata {
    pub fn new(
        file_path: &str,
        device_uri: &str,
        streams: &[String],
        started_at: &DateTime<Local>,
        duration_secs: f64,
        checksum: Option<String>,
        lossy_compression: bool,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_path: file_path.to_string(),
            device_uri: device_uri.to_string(),
            streams: streams.to_vec(),
            created_at: started_at.to_rfc3339(),
            duration_secs,
            checksum,
            lossy_compression,
        }
    }
}
