//! Archive module for unpacking downloaded zip files
//!
//! This module handles:
//! - Recursively finding archives under a download directory
//! - Repairing member names stored in a legacy regional codepage
//! - Extracting each archive into its own directory, one archive at a time

mod extractor;
mod filename;

pub use extractor::{archive_output_dir, extract_all, extract_archive, ExtractOptions};
pub use filename::{decode_member_name, member_path};
