//! Listing-Crawler: a polite paginated listing harvester
//!
//! This crate discovers how many pages a novel catalog listing has, fetches
//! every page in order, and writes the titles found on each page to its own
//! text file. A companion extractor unpacks downloaded zip archives whose
//! member names were written in a legacy regional charset.

pub mod archive;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for crawl runs
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single page request that did not produce a usable body
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// The URL the failed request was sent to
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. } | Self::Status { url, .. } => url,
        }
    }
}

/// Failure to determine the last listing page
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("No last-page link found on {url}")]
    MissingAnchor { url: String },

    #[error("Last-page link has no page number: {href}")]
    InvalidPageNumber { href: String },
}

/// Failure while persisting one page of titles
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create marker {}: {source}", .path.display())]
    Marker {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error writing to file {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failure while extracting one archive
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Archive member escapes the extraction directory: {name}")]
    UnsafePath { name: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{CrawlSummary, ExtractionSummary};
pub use state::{CrawlPhase, PageOutcome};
