//! Per-page output files
//!
//! Each listing page `n` is persisted as `{dir}/{n}.txt`, one title per
//! line. Every write truncates the file first, so a rerun fully replaces
//! the previous content.

use crate::storage::marker::WriteMarker;
use crate::WriteError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes page titles into an output directory
#[derive(Debug, Clone)]
pub struct PageWriter {
    dir: PathBuf,
}

impl PageWriter {
    /// Creates a writer for the given output directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the output directory (and parents) if it does not exist
    pub fn ensure_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    /// Output path for listing page `page`
    pub fn page_path(&self, page: u32) -> PathBuf {
        self.dir.join(format!("{}.txt", page))
    }

    /// Writes `titles` for listing page `page`
    pub fn write_page(&self, page: u32, titles: &[String]) -> Result<PathBuf, WriteError> {
        let path = self.page_path(page);
        write_titles(titles, &path)?;
        Ok(path)
    }
}

/// Writes `titles` to `path`, one per line, under a write marker
///
/// # Steps
///
/// 1. Create the empty marker `path.lock`. On failure nothing else happens.
/// 2. Truncate `path` and write every title followed by `\n`, in order.
/// 3. Remove the marker, whether step 2 succeeded or not.
///
/// # Returns
///
/// * `Ok(())` - The file now holds exactly `titles`
/// * `Err(WriteError::Marker)` - The marker could not be created
/// * `Err(WriteError::Output)` - The output file could not be written
pub fn write_titles(titles: &[String], path: &Path) -> Result<(), WriteError> {
    let _marker = WriteMarker::acquire(path).map_err(|source| WriteError::Marker {
        path: path.to_path_buf(),
        source,
    })?;

    write_lines(titles, path).map_err(|source| WriteError::Output {
        path: path.to_path_buf(),
        source,
    })
}

fn write_lines(titles: &[String], path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for title in titles {
        out.write_all(title.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()
}
