//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: where a run is (discovering, crawling page n, done, aborted)
//! - `PageOutcome`: how a single listing page ended

mod crawl_phase;
mod page_outcome;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use page_outcome::PageOutcome;
