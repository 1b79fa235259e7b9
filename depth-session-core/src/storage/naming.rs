//! Recording file naming.
//!
//! Recordings are named after their local start time at one-second
//! resolution (`yyyyMMddHHmmss.<ext>`). Two recordings started within the
//! same second get a numeric suffix instead of overwriting each other.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// File name for a recording started at `started_at`, without collision handling.
pub fn recording_file_name(started_at: &DateTime<Local>, extension: &str) -> String {
    format!("{}.{}", started_at.format(TIMESTAMP_FORMAT), extension)
}

/// Pick a path in `directory` for a recording started at `started_at`.
///
/// Returns `<stamp>.<ext>`, or `<stamp>-N.<ext>` for the first free `N` when
/// that file already exists.
pub fn recording_path(directory: &Path, started_at: &DateTime<Local>, extension: &str) -> PathBuf {
    let candidate = directory.join(recording_file_name(started_at, extension));
    if !candidate.exists() {
        return candidate;
    }

    let stamp = started_at.format(TIMESTAMP_FORMAT);
    let mut n = 1u32;
    loop {
        let candidate = directory.join(format!("{}-{}.{}", stamp, n, extension));
        if !candidate.exists() {
            log::warn!(
                "Recording name for {} already taken, using {}",
                stamp,
                candidate.display()
            );
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("depth_session_naming_{}", name));
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn name_uses_second_resolution_stamp() {
        assert_eq!(recording_file_name(&fixed_time(), "oni"), "20240309070501.oni");
    }

    #[test]
    fn free_name_is_used_as_is() {
        let dir = temp_dir("free");
        let path = recording_path(&dir, &fixed_time(), "oni");
        assert_eq!(path, dir.join("20240309070501.oni"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn same_second_collision_gets_suffix() {
        let dir = temp_dir("collision");
        fs::write(dir.join("20240309070501.oni"), b"x").unwrap();
        fs::write(dir.join("20240309070501-1.oni"), b"x").unwrap();

        let path = recording_path(&dir, &fixed_time(), "oni");
        assert_eq!(path, dir.join("20240309070501-2.oni"));
        fs::remove_dir_all(&dir).ok();
    }
}
