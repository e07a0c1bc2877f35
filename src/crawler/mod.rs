//! Crawler module for listing page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with the fixed request header set
//! - Title extraction from listing pages
//! - Last-page discovery from the pagination control
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod pagination;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page};
pub use pagination::{discover_last_page, extract_last_page, page_number_from_href};
pub use parser::parse_titles;

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::CrawlerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Discover the last listing page
/// 3. Fetch, parse, and write every page in order
/// 4. Return a summary of per-page outcomes
pub async fn crawl(config: Config) -> Result<CrawlSummary, CrawlerError> {
    run_crawl(config).await
}
