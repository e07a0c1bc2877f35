//! Write-in-progress marker files
//!
//! A marker is an empty `<file>.lock` created right before its output file
//! is opened and removed when the write attempt ends. It is a signal for
//! anyone inspecting the output directory, not a lock: nothing ever checks
//! whether a marker already exists.

use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Extension appended to an output file's name to form its marker
pub const MARKER_SUFFIX: &str = ".lock";

/// Returns the marker path for `path` (`download/3.txt` -> `download/3.txt.lock`)
pub fn marker_path(path: &Path) -> PathBuf {
    let mut marker: OsString = path.as_os_str().to_owned();
    marker.push(MARKER_SUFFIX);
    PathBuf::from(marker)
}

/// Scoped marker file, removed when dropped
#[derive(Debug)]
pub struct WriteMarker {
    path: PathBuf,
}

impl WriteMarker {
    /// Creates (or truncates) the marker for `target`
    pub fn acquire(target: &Path) -> io::Result<Self> {
        let path = marker_path(target);
        File::create(&path)?;
        tracing::trace!("Created marker {}", path.display());
        Ok(Self { path })
    }

    /// Path of the marker file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WriteMarker {
    fn drop(&mut self) {
        // Removal errors are ignored; a stale marker is the only consequence
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::debug!("Could not remove marker {}: {}", self.path.display(), e);
            }
        }
    }
}
