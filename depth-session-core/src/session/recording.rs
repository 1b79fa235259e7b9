use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};

use crate::models::error::SessionError;
use crate::models::recording_result::{RecordingMetadata, RecordingResult};
use crate::models::state::RecordingState;
use crate::storage::metadata;
use crate::traits::recorder::Recorder;

/// Where and for which device a recording is made.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingTarget {
    pub path: PathBuf,
    pub device_uri: String,
    pub started_at: DateTime<Local>,
}

struct ActiveRecording<R> {
    recorder: R,
    target: RecordingTarget,
    streams: Vec<String>,
    started: Instant,
}

/// At most one live recorder, bound to a snapshot of streams taken at start.
///
/// ```text
/// absent ──start──→ active
///    ↑                │
///    └──────stop──────┘
/// ```
pub struct RecordingSession<R: Recorder> {
    active: Option<ActiveRecording<R>>,
    allow_lossy: bool,
    write_metadata: bool,
}

impl<R: Recorder> RecordingSession<R> {
    pub fn new(allow_lossy: bool, write_metadata: bool) -> Self {
        Self {
            active: None,
            allow_lossy,
            write_metadata,
        }
    }

    pub fn state(&self) -> RecordingState {
        match &self.active {
            Some(active) => RecordingState::Active {
                path: active.target.path.clone(),
            },
            None => RecordingState::Absent,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Path of the recording in progress.
    pub fn path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.target.path.as_path())
    }

    /// Create a recorder with `create`, attach every stream and start it.
    ///
    /// Streams added to the host after this call are not part of the
    /// recording. On any failure the partially built recorder is destroyed
    /// and the session stays absent.
    pub fn start<F>(
        &mut self,
        target: RecordingTarget,
        streams: Vec<(String, R::Stream)>,
        create: F,
    ) -> Result<(), SessionError>
    where
        F: FnOnce(&Path) -> Result<R, SessionError>,
    {
        if self.active.is_some() {
            return Err(SessionError::InvalidState("a recording is already active".into()));
        }

        let mut recorder = create(&target.path).map_err(start_failed)?;

        let mut labels = Vec::with_capacity(streams.len());
        for (label, stream) in &streams {
            if let Err(e) = recorder.add_stream(stream, self.allow_lossy) {
                log::error!("Failed to add stream {} to recorder: {}", label, e);
                recorder.destroy();
                return Err(start_failed(e));
            }
            labels.push(label.clone());
        }

        if let Err(e) = recorder.start() {
            recorder.destroy();
            return Err(start_failed(e));
        }

        log::info!(
            "Recording {} stream(s) to {}",
            labels.len(),
            target.path.display()
        );

        self.active = Some(ActiveRecording {
            recorder,
            target,
            streams: labels,
            started: Instant::now(),
        });
        Ok(())
    }

    /// Stop and finalize the active recording.
    ///
    /// Returns `None` when nothing is recording.
    pub fn stop(&mut self) -> Option<RecordingResult> {
        let ActiveRecording {
            mut recorder,
            target,
            streams,
            started,
        } = self.active.take()?;

        recorder.stop();
        recorder.destroy();

        let duration_secs = started.elapsed().as_secs_f64();
        let checksum = metadata::file_checksum(&target.path);
        let sidecar = RecordingMetadata::new(
            &target.path.to_string_lossy(),
            &target.device_uri,
            &streams,
            &target.started_at,
            duration_secs,
            checksum.clone(),
            self.allow_lossy,
        );

        if self.write_metadata {
            if let Err(e) = metadata::write_metadata(&sidecar, &target.path) {
                log::warn!("Recording saved without metadata: {}", e);
            }
        }

        log::info!(
            "Recording saved to {} ({:.1}s)",
            target.path.display(),
            duration_secs
        );

        Some(RecordingResult {
            file_path: target.path,
            device_uri: target.device_uri,
            streams,
            started_at: target.started_at,
            duration_secs,
            checksum,
            metadata: sidecar,
        })
    }
}

fn start_failed(e: SessionError) -> SessionError {
    match e {
        SessionError::RecordingStartFailed(_) => e,
        other => SessionError::RecordingStartFailed(other.to_string()),
    }
}
