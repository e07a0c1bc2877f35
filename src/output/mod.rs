//! Output module for end-of-run reports
//!
//! This module handles:
//! - Tallying per-page and per-archive outcomes
//! - Printing the final summary of a run

pub mod stats;

pub use stats::{print_crawl_summary, print_extraction_summary, CrawlSummary, ExtractionSummary};
