//! HTML parser for extracting novel titles
//!
//! Listing pages mark every novel with a styled link (`<a class="green">` on
//! the default site). The visible text of each such link is one title.

use scraper::{Html, Selector};

/// Extracts the titles of all elements matching `selector`, in document order
///
/// Text is taken verbatim (not trimmed). Malformed markup never fails: the
/// HTML parser recovers, and a page with no matching element yields an
/// empty list.
///
/// # Arguments
///
/// * `html` - The HTML content
/// * `selector` - Selector matching one element per title
///
/// # Example
///
/// ```
/// use listing_crawler::crawler::parse_titles;
/// use scraper::Selector;
///
/// let html = r#"<a class="green" href="/1.html">Three Body</a>"#;
/// let selector = Selector::parse("a.green").unwrap();
/// assert_eq!(parse_titles(html, &selector), vec!["Three Body".to_string()]);
/// ```
pub fn parse_titles(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(selector)
        .map(|element| element.text().collect::<String>())
        .collect()
}
