//! Storage module for persisting crawl results
//!
//! This module handles everything the crawler writes to disk:
//! - One text file per listing page
//! - The `.lock` marker signalling a write in progress

mod marker;
mod writer;

pub use marker::{marker_path, WriteMarker, MARKER_SUFFIX};
pub use writer::{write_titles, PageWriter};
