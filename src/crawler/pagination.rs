//! Last-page discovery from the listing's pagination control
//!
//! The first listing page carries a "last page" link such as
//! `<div class="pages"><a class="end" href="/kehuan/list_update_42.html">`.
//! The page count is the number between the final `_` and the extension of
//! that link's file name.

use crate::crawler::fetcher::fetch_page;
use crate::DiscoveryError;
use reqwest::Client;
use scraper::{Html, Selector};

/// Fetches `start_url` and returns the number of its last listing page
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `start_url` - URL of the first listing page
/// * `selector` - Selector matching the "last page" link
///
/// # Returns
///
/// * `Ok(u32)` - The last page number
/// * `Err(DiscoveryError)` - The page could not be fetched, has no last-page
///   link, or the link carries no page number
pub async fn discover_last_page(
    client: &Client,
    start_url: &str,
    selector: &Selector,
) -> Result<u32, DiscoveryError> {
    let html = fetch_page(client, start_url).await?;
    extract_last_page(&html, selector, start_url)
}

/// Extracts the last page number from already-fetched HTML
///
/// `source_url` is only used in the error reported when no link matches.
pub fn extract_last_page(
    html: &str,
    selector: &Selector,
    source_url: &str,
) -> Result<u32, DiscoveryError> {
    let document = Html::parse_document(html);

    let href = document
        .select(selector)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .ok_or_else(|| DiscoveryError::MissingAnchor {
            url: source_url.to_string(),
        })?;

    page_number_from_href(href).ok_or_else(|| DiscoveryError::InvalidPageNumber {
        href: href.to_string(),
    })
}

/// Parses the trailing page number out of a pagination link
///
/// `/kehuan/list_update_42.html` -> `Some(42)`. The last path segment is
/// split on `_` and the final piece is cut at its first `.`; whatever
/// remains must be a base-10 integer.
pub fn page_number_from_href(href: &str) -> Option<u32> {
    let path = href.split(&['?', '#'][..]).next().unwrap_or(href);
    let file_name = path.rsplit('/').next()?;
    let tail = file_name.rsplit('_').next()?;
    let number = tail.split('.').next()?;

    number.trim().parse::<u32>().ok()
}
