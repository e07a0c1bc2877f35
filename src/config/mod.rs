//! Configuration module for Listing-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every value has a built-in default, so a configuration file is optional.
//!
//! # Example
//!
//! ```no_run
//! use listing_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Pages come from: {}", config.crawler.page_url_template);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ArchiveConfig, Config, CrawlerConfig, OutputConfig, RequestConfig, PAGE_PLACEHOLDER,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
