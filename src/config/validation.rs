use crate::config::types::{
    ArchiveConfig, Config, CrawlerConfig, OutputConfig, RequestConfig, PAGE_PLACEHOLDER,
};
use crate::ConfigError;
use reqwest::header::{HeaderName, HeaderValue};
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_request_config(&config.request)?;
    validate_output_config(&config.output)?;
    validate_archive_config(&config.archive)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if !config.page_url_template.contains(PAGE_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "page_url_template must contain '{}', got '{}'",
            PAGE_PLACEHOLDER, config.page_url_template
        )));
    }

    let start_url = config.start_url();
    let url = Url::parse(&start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid page URL '{}': {}", start_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Page URL '{}' must use HTTP or HTTPS",
            start_url
        )));
    }

    validate_selector("title_selector", &config.title_selector)?;
    validate_selector("last_page_selector", &config.last_page_selector)?;

    if config.min_delay_secs > config.max_delay_secs {
        return Err(ConfigError::Validation(format!(
            "min_delay_secs ({}) must not exceed max_delay_secs ({})",
            config.min_delay_secs, config.max_delay_secs
        )));
    }

    Ok(())
}

/// Validates that a CSS selector parses
fn validate_selector(field: &str, selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector).map_err(|e| {
        ConfigError::Validation(format!("{} '{}' is not a valid selector: {:?}", field, selector, e))
    })?;
    Ok(())
}

/// Validates request configuration
fn validate_request_config(config: &RequestConfig) -> Result<(), ConfigError> {
    for (name, value) in &config.headers {
        HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ConfigError::Validation(format!("Invalid header name: '{}'", name))
        })?;
        HeaderValue::from_str(value).map_err(|_| {
            ConfigError::Validation(format!("Invalid value for header '{}'", name))
        })?;
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.download_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "download_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates archive configuration
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    if config.source_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "source_dir cannot be empty".to_string(),
        ));
    }

    if config.extract_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "extract_dir cannot be empty".to_string(),
        ));
    }

    if config.extension.is_empty() || config.extension.starts_with('.') {
        return Err(ConfigError::Validation(format!(
            "extension must be non-empty and given without a leading dot, got '{}'",
            config.extension
        )));
    }

    if encoding_rs::Encoding::for_label(config.filename_encoding.as_bytes()).is_none() {
        return Err(ConfigError::Validation(format!(
            "Unknown filename_encoding: '{}'",
            config.filename_encoding
        )));
    }

    Ok(())
}
