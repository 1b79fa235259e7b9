use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::models::error::SessionError;
use crate::models::recording_result::RecordingMetadata;

/// Write recording metadata as a JSON sidecar file.
///
/// Creates `{recording_path}.metadata.json` alongside the recording.
pub fn write_metadata(metadata: &RecordingMetadata, recording_path: &Path) -> Result<(), SessionError> {
    let metadata_path = sidecar_path(recording_path);
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| SessionError::StorageError(format!("failed to serialize metadata: {}", e)))?;
    fs::write(&metadata_path, json)
        .map_err(|e| SessionError::StorageError(format!("failed to write metadata: {}", e)))?;
    Ok(())
}

/// Read recording metadata from a JSON sidecar file.
pub fn read_metadata(recording_path: &Path) -> Result<RecordingMetadata, SessionError> {
    let metadata_path = sidecar_path(recording_path);
    let json = fs::read_to_string(&metadata_path)
        .map_err(|e| SessionError::StorageError(format!("failed to read metadata: {}", e)))?;
    let metadata: RecordingMetadata = serde_json::from_str(&json)
        .map_err(|e| SessionError::StorageError(format!("failed to parse metadata: {}", e)))?;
    Ok(metadata)
}

/// SHA-256 hex digest of a recording file, or `None` if it was not written.
///
/// The file is streamed through the hasher; recordings can be gigabytes.
pub fn file_checksum(path: &Path) -> Option<String> {
    match sha256_file(path) {
        Ok(digest) => Some(digest),
        Err(e) => {
            log::debug!("No checksum for {}: {}", path.display(), e);
            None
        }
    }
}

fn sha256_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex_encode(&hasher.finalize()))
}

/// `X.oni` → `X.oni.metadata.json`.
fn sidecar_path(recording_path: &Path) -> PathBuf {
    let mut name = recording_path.as_os_str().to_os_string();
    name.push(".metadata.json");
    PathBuf::from(name)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
