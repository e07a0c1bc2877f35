//! Batch extraction of downloaded archives
//!
//! Every archive below the source directory is unpacked into its own
//! subdirectory of the destination, named after the archive's file stem.
//! An archive that fails part-way is abandoned (files already written stay
//! in place) and the walk moves on to the next one.

use crate::archive::filename::{decode_member_name, member_path};
use crate::config::ArchiveConfig;
use crate::output::ExtractionSummary;
use crate::{ConfigError, ExtractionError};
use encoding_rs::Encoding;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

/// How archives are recognized and how member names are repaired
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// File extension identifying archives (without the dot)
    pub extension: String,

    /// Legacy codepage used to repair member names
    pub encoding: &'static Encoding,
}

impl ExtractOptions {
    /// Builds options from the archive configuration
    pub fn from_config(config: &ArchiveConfig) -> Result<Self, ConfigError> {
        let encoding = Encoding::for_label(config.filename_encoding.as_bytes()).ok_or_else(|| {
            ConfigError::Validation(format!(
                "Unknown filename_encoding: '{}'",
                config.filename_encoding
            ))
        })?;

        Ok(Self {
            extension: config.extension.clone(),
            encoding,
        })
    }

    /// Returns true if `path` names an archive
    pub fn is_archive(&self, path: &Path) -> bool {
        path.extension()
            .map_or(false, |ext| ext == self.extension.as_str())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            extension: "zip".to_string(),
            encoding: encoding_rs::GBK,
        }
    }
}

/// Extracts every archive found below `source_dir` into `dest_dir`
///
/// # Arguments
///
/// * `source_dir` - Directory tree scanned (recursively) for archives
/// * `dest_dir` - Directory receiving one subdirectory per archive
/// * `options` - Archive extension and name encoding
///
/// # Returns
///
/// * `Ok(ExtractionSummary)` - Counts of extracted and abandoned archives
/// * `Err(ExtractionError)` - `source_dir` itself could not be read
pub fn extract_all(
    source_dir: &Path,
    dest_dir: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionSummary, ExtractionError> {
    let mut summary = ExtractionSummary::default();

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !options.is_archive(entry.path()) {
            continue;
        }

        summary.archives_found += 1;
        let archive_path = entry.path();
        let target = archive_output_dir(dest_dir, archive_path);

        match extract_archive(archive_path, &target, options) {
            Ok(files) => {
                tracing::info!(
                    "Extracted {} files from {} into {}",
                    files,
                    archive_path.display(),
                    target.display()
                );
                summary.archives_extracted += 1;
                summary.files_written += files;
            }
            Err(e) => {
                tracing::warn!("Skipping archive {}: {}", archive_path.display(), e);
                summary.archives_failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Output directory for an archive: `dest_dir/<archive file stem>`
pub fn archive_output_dir(dest_dir: &Path, archive_path: &Path) -> PathBuf {
    match archive_path.file_stem() {
        Some(stem) => dest_dir.join(stem),
        None => dest_dir.to_path_buf(),
    }
}

/// Extracts a single archive into `target`
///
/// Returns the number of files written.
pub fn extract_archive(
    archive_path: &Path,
    target: &Path,
    options: &ExtractOptions,
) -> Result<usize, ExtractionError> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let mut written = 0;

    for index in 0..archive.len() {
        let mut member = archive.by_index(index)?;
        let name = decode_member_name(member.name_raw(), member.name(), options.encoding);
        let out_path = target.join(member_path(&name)?);

        if member.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&out_path)?;
        io::copy(&mut member, &mut out)?;
        tracing::debug!("Wrote {}", out_path.display());
        written += 1;
    }

    Ok(written)
}
