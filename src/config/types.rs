use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Placeholder substituted with the page number in `page-url-template`
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Main configuration structure for a crawl or extraction run
///
/// Every section has defaults, so an empty TOML file (or no file at all)
/// reproduces the built-in crawl of the science-fiction listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub request: RequestConfig,
    pub output: OutputConfig,
    pub archive: ArchiveConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Listing URL with a `{page}` placeholder for the page number
    #[serde(rename = "page-url-template")]
    pub page_url_template: String,

    /// CSS selector matching one title link per novel
    #[serde(rename = "title-selector")]
    pub title_selector: String,

    /// CSS selector matching the "last page" pagination link
    #[serde(rename = "last-page-selector")]
    pub last_page_selector: String,

    /// Lower bound of the politeness delay between pages (seconds)
    #[serde(rename = "min-delay-secs")]
    pub min_delay_secs: u64,

    /// Upper bound of the politeness delay between pages (seconds, inclusive)
    #[serde(rename = "max-delay-secs")]
    pub max_delay_secs: u64,
}

impl CrawlerConfig {
    /// Builds the URL of listing page `page`
    pub fn page_url(&self, page: u32) -> String {
        self.page_url_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    /// The page discovery starts from
    pub fn start_url(&self) -> String {
        self.page_url(1)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_url_template: "http://www.shuyy8.cc/kehuan/list_update_{page}.html".to_string(),
            title_selector: "a.green".to_string(),
            last_page_selector: ".pages a.end".to_string(),
            min_delay_secs: 1,
            max_delay_secs: 5,
        }
    }
}

/// HTTP request configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Headers sent identically on every request
    pub headers: BTreeMap<String, String>,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        let headers = [
            ("Connection", "keep-alive"),
            ("Cache-Control", "max-age=0"),
            (
                "User-Agent",
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
            ),
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
            ),
            ("Accept-Encoding", "gzip, deflate"),
            ("Accept-Language", "zh-CN,zh;q=0.9"),
            ("Cookie", "client_key=F1F17934834AE26140BBADBE6AC6AA5D"),
            ("If-Modified-Since", "Thu, 30 May 2024 15:39:00 GMT"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

        Self {
            headers,
            timeout_secs: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving one `{page}.txt` file per listing page
    #[serde(rename = "download-dir")]
    pub download_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("download"),
        }
    }
}

/// Archive extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory tree scanned for archives
    #[serde(rename = "source-dir")]
    pub source_dir: PathBuf,

    /// Directory receiving one subdirectory per archive
    #[serde(rename = "extract-dir")]
    pub extract_dir: PathBuf,

    /// File extension identifying archives (without the dot)
    pub extension: String,

    /// Encoding label used to repair member names (any WHATWG label)
    #[serde(rename = "filename-encoding")]
    pub filename_encoding: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("download"),
            extract_dir: PathBuf::from("extracted_files"),
            extension: "zip".to_string(),
            filename_encoding: "gbk".to_string(),
        }
    }
}
