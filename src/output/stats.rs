//! Run summaries
//!
//! Every page and every archive produces an explicit outcome; these
//! structures tally them so that a run ends with a report instead of
//! silently dropped failures.

use crate::state::PageOutcome;
use chrono::{DateTime, Utc};

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Last listing page discovered at the start of the run
    pub last_page: u32,

    /// Outcome of every attempted page, in page order
    pub outcomes: Vec<(u32, PageOutcome)>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlSummary {
    /// Creates an empty summary for a run that starts now
    pub fn new(last_page: u32) -> Self {
        Self {
            last_page,
            outcomes: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records the outcome of a page
    pub fn record(&mut self, page: u32, outcome: PageOutcome) {
        self.outcomes.push((page, outcome));
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of pages whose output file was written
    pub fn pages_written(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    /// Number of pages skipped because their fetch failed
    pub fn pages_fetch_failed(&self) -> usize {
        self.count(PageOutcome::FetchFailed)
    }

    /// Number of pages fetched but not persisted
    pub fn pages_write_failed(&self) -> usize {
        self.count(PageOutcome::WriteFailed)
    }

    /// Total titles written across all pages
    pub fn titles_written(&self) -> usize {
        self.outcomes
            .iter()
            .map(|(_, o)| match o {
                PageOutcome::Written { titles } => *titles,
                _ => 0,
            })
            .sum()
    }

    /// Page numbers that did not end up written
    pub fn failed_pages(&self) -> Vec<u32> {
        self.outcomes
            .iter()
            .filter(|(_, o)| !o.is_success())
            .map(|(page, _)| *page)
            .collect()
    }

    /// Run duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    fn count(&self, outcome: PageOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Summary of one archive extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Archives found under the source directory
    pub archives_found: usize,

    /// Archives extracted without error
    pub archives_extracted: usize,

    /// Archives abandoned after an error
    pub archives_failed: usize,

    /// Files written by archives that extracted cleanly
    pub files_written: usize,
}

/// Prints a crawl summary to stdout
pub fn print_crawl_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");

    println!("  Last page: {}", summary.last_page);
    println!("  Pages attempted: {}", summary.outcomes.len());
    println!("  Pages written: {}", summary.pages_written());
    println!("  Fetch failures: {}", summary.pages_fetch_failed());
    println!("  Write failures: {}", summary.pages_write_failed());
    println!("  Titles written: {}", summary.titles_written());

    let failed = summary.failed_pages();
    if !failed.is_empty() {
        let pages: Vec<String> = failed.iter().map(|p| p.to_string()).collect();
        println!("  Failed pages: {}", pages.join(", "));
    }

    if let Some(duration) = summary.duration_seconds() {
        println!(
            "  Duration: {} seconds ({:.2} minutes)",
            duration,
            duration as f64 / 60.0
        );
    }
}

/// Prints an extraction summary to stdout
pub fn print_extraction_summary(summary: &ExtractionSummary) {
    println!("=== Extraction Summary ===\n");

    println!("  Archives found: {}", summary.archives_found);
    println!("  Archives extracted: {}", summary.archives_extracted);
    println!("  Archives failed: {}", summary.archives_failed);
    println!("  Files written: {}", summary.files_written);
}
