//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop:
//! - Preparing the output directory
//! - Discovering the last listing page
//! - Fetching, parsing, and persisting every page in order
//! - Sleeping a random politeness delay between pages
//!
//! A failure on one page is logged and recorded; only a failed discovery
//! ends the run early.

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::pagination::discover_last_page;
use crate::crawler::parser::parse_titles;
use crate::output::CrawlSummary;
use crate::state::{CrawlPhase, PageOutcome};
use crate::storage::PageWriter;
use crate::{ConfigError, CrawlerError};
use rand::Rng;
use reqwest::Client;
use scraper::Selector;
use std::time::Duration;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    title_selector: Selector,
    last_page_selector: Selector,
    writer: PageWriter,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run, in the `Discovering` phase
    /// * `Err(CrawlerError)` - The configuration is invalid or the HTTP
    ///   client could not be built
    pub fn new(config: Config) -> Result<Self, CrawlerError> {
        validate(&config)?;

        let title_selector = parse_selector(&config.crawler.title_selector)?;
        let last_page_selector = parse_selector(&config.crawler.last_page_selector)?;
        let client = build_http_client(&config.request)?;
        let writer = PageWriter::new(config.output.download_dir.clone());

        Ok(Self {
            config,
            client,
            title_selector,
            last_page_selector,
            writer,
            phase: CrawlPhase::Discovering,
        })
    }

    /// Current phase of the run
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to completion
    ///
    /// 1. Create the output directory
    /// 2. Discover the last page from the first listing page
    /// 3. For every page from 1 to the last, in order:
    ///    a. Fetch it (on failure: log, skip the delay, move on)
    ///    b. Parse its titles
    ///    c. Write them to the page's output file (on failure: log)
    ///    d. Sleep a random whole number of seconds
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSummary)` - Every page was attempted
    /// * `Err(CrawlerError::Discovery)` - The last page could not be
    ///   determined; no listing page was processed
    pub async fn run(&mut self) -> Result<CrawlSummary, CrawlerError> {
        if self.phase != CrawlPhase::Discovering {
            return Err(CrawlerError::InvalidTransition {
                from: self.phase,
                to: CrawlPhase::Discovering,
            });
        }

        self.writer.ensure_dir()?;

        let start_url = self.config.crawler.start_url();
        tracing::info!("Discovering last page from {}", start_url);

        let discovered =
            discover_last_page(&self.client, &start_url, &self.last_page_selector).await;
        let last_page = match discovered {
            Ok(page) => page,
            Err(e) => {
                self.transition(CrawlPhase::Aborted)?;
                return Err(e.into());
            }
        };
        tracing::info!("Listing has {} pages", last_page);

        let mut summary = CrawlSummary::new(last_page);

        for page in 1..=last_page {
            self.transition(CrawlPhase::Crawling(page))?;

            let outcome = self.process_page(page).await;
            tracing::debug!("Page {}: {}", page, outcome);
            summary.record(page, outcome);

            if outcome.sleeps_after() {
                let delay = self.politeness_delay();
                tracing::info!("Sleeping for {} seconds...", delay.as_secs());
                tokio::time::sleep(delay).await;
            }
        }

        self.transition(CrawlPhase::Done)?;
        summary.finish();

        tracing::info!(
            "Crawl completed: {} of {} pages written",
            summary.pages_written(),
            last_page
        );

        Ok(summary)
    }

    /// Fetches, parses, and persists a single listing page
    async fn process_page(&self, page: u32) -> PageOutcome {
        let url = self.config.crawler.page_url(page);

        let html = match fetch_page(&self.client, &url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Error fetching page {}: {}", page, e);
                return PageOutcome::FetchFailed;
            }
        };

        let titles = parse_titles(&html, &self.title_selector);
        if titles.is_empty() {
            tracing::warn!("No titles found on {}", url);
        }

        match self.writer.write_page(page, &titles) {
            Ok(path) => {
                tracing::info!("Wrote {} titles to {}", titles.len(), path.display());
                PageOutcome::Written {
                    titles: titles.len(),
                }
            }
            Err(e) => {
                tracing::error!("{}", e);
                PageOutcome::WriteFailed
            }
        }
    }

    /// Picks a uniformly random delay within the configured bounds
    fn politeness_delay(&self) -> Duration {
        let crawler = &self.config.crawler;
        let secs = rand::rng().random_range(crawler.min_delay_secs..=crawler.max_delay_secs);
        Duration::from_secs(secs)
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), CrawlerError> {
        if !self.phase.can_transition_to(&next) {
            return Err(CrawlerError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::trace!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| {
        ConfigError::Validation(format!("Invalid selector '{}': {:?}", selector, e))
    })
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use listing_crawler::config::Config;
/// use listing_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(Config::default()).await?;
/// println!("{} pages written", summary.pages_written());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlSummary, CrawlerError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
