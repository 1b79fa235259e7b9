use std::path::PathBuf;

/// Device acquisition gate state.
///
/// ```text
/// idle → pending → acquired
///           ↓
///         failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionState {
    #[default]
    Idle,
    Pending,
    Failed,
    Acquired,
}

impl AcquisitionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Session controller state machine.
///
/// State transitions:
/// ```text
/// idle → acquiring → active
///  ↑  ↘      ↓         │
///  │   terminated ←    │ (open failed / no device)
///  └───────────────────┘ (pause)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Acquiring { uri: String },
    Active { uri: String },
    Terminated,
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_acquiring(&self) -> bool {
        matches!(self, Self::Acquiring { .. })
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// The device uri being acquired or in use.
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Acquiring { uri } | Self::Active { uri } => Some(uri),
            _ => None,
        }
    }
}

/// Recording session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordingState {
    #[default]
    Absent,
    Active { path: PathBuf },
}

impl RecordingState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}
