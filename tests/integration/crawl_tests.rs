//! Integration tests for the crawler
//!
//! These tests use wiremock to serve listing pages and run the full
//! discover-fetch-parse-write cycle end-to-end.

use listing_crawler::config::Config;
use listing_crawler::crawler::Coordinator;
use listing_crawler::state::{CrawlPhase, PageOutcome};
use listing_crawler::{CrawlerError, DiscoveryError, FetchError};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, download_dir: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.page_url_template = format!("{}/kehuan/list_update_{{page}}.html", base_url);
    config.crawler.min_delay_secs = 0;
    config.crawler.max_delay_secs = 0;
    config.output.download_dir = download_dir.to_path_buf();
    config
}

/// Renders a listing page with the given titles and optional last-page link
fn listing_page(titles: &[&str], last_href: Option<&str>) -> String {
    let items: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                r#"<li><a class="green" href="/book/{}.html">{}</a> <a href="/author/{}.html">author</a></li>"#,
                i, title, i
            )
        })
        .collect();

    let pages = match last_href {
        Some(href) => format!(
            r#"<div class="pages"><a href="list_update_1.html">1</a><a class="end" href="{}">末页</a></div>"#,
            href
        ),
        None => String::new(),
    };

    format!(
        r#"<html><head><title>科幻小说</title></head><body><ul>{}</ul>{}</body></html>"#,
        items, pages
    )
}

async fn mount_page(server: &MockServer, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/kehuan/list_update_{}.html", page)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

fn lock_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .expect("download dir exists")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".lock"))
        .collect()
}

#[tokio::test]
async fn test_full_crawl_with_failed_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        1,
        listing_page(&["三体", "球状闪电"], Some("/kehuan/list_update_3.html")),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/kehuan/list_update_2.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        3,
        listing_page(&["流浪地球"], Some("/kehuan/list_update_3.html")),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let download = temp.path().join("download");

    // Output of an earlier run for page 2 must survive the failed fetch
    std::fs::create_dir_all(&download).unwrap();
    std::fs::write(download.join("2.txt"), "from a previous run\n").unwrap();

    let config = create_test_config(&base_url, &download);
    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = coordinator.run().await.expect("Crawl failed");

    assert_eq!(coordinator.phase(), CrawlPhase::Done);
    assert_eq!(summary.last_page, 3);
    assert_eq!(
        summary.outcomes,
        vec![
            (1, PageOutcome::Written { titles: 2 }),
            (2, PageOutcome::FetchFailed),
            (3, PageOutcome::Written { titles: 1 }),
        ]
    );
    assert_eq!(summary.pages_written(), 2);
    assert_eq!(summary.pages_fetch_failed(), 1);
    assert_eq!(summary.titles_written(), 3);

    assert_eq!(
        std::fs::read_to_string(download.join("1.txt")).unwrap(),
        "三体\n球状闪电\n"
    );
    assert_eq!(
        std::fs::read_to_string(download.join("2.txt")).unwrap(),
        "from a previous run\n"
    );
    assert_eq!(
        std::fs::read_to_string(download.join("3.txt")).unwrap(),
        "流浪地球\n"
    );
    assert!(lock_files(&download).is_empty());

    // Discovery fetch, then pages strictly in order
    assert_eq!(
        requested_paths(&mock_server).await,
        vec![
            "/kehuan/list_update_1.html",
            "/kehuan/list_update_1.html",
            "/kehuan/list_update_2.html",
            "/kehuan/list_update_3.html",
        ]
    );
}

#[tokio::test]
async fn test_failed_page_creates_no_file() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        listing_page(&["Solaris"], Some("list_update_2.html")),
    )
    .await;
    // Page 2 is not mounted: wiremock answers 404

    let temp = TempDir::new().unwrap();
    let download = temp.path().join("download");
    let config = create_test_config(&mock_server.uri(), &download);

    let summary = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.failed_pages(), vec![2]);
    assert!(download.join("1.txt").exists());
    assert!(!download.join("2.txt").exists());
    assert!(lock_files(&download).is_empty());
}

#[tokio::test]
async fn test_missing_last_page_link_aborts() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, 1, listing_page(&["Dune"], None)).await;
    mount_page(&mock_server, 2, listing_page(&["Ubik"], None)).await;

    let temp = TempDir::new().unwrap();
    let download = temp.path().join("download");
    let config = create_test_config(&mock_server.uri(), &download);

    let mut coordinator = Coordinator::new(config).unwrap();
    let result = coordinator.run().await;

    assert!(matches!(
        result,
        Err(CrawlerError::Discovery(DiscoveryError::MissingAnchor { .. }))
    ));
    assert_eq!(coordinator.phase(), CrawlPhase::Aborted);
    assert_eq!(requested_paths(&mock_server).await.len(), 1);
    assert!(!download.join("1.txt").exists());
}

#[tokio::test]
async fn test_unparsable_last_page_aborts() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        listing_page(&["Dune"], Some("/kehuan/list_update_last.html")),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &temp.path().join("download"));

    let result = Coordinator::new(config).unwrap().run().await;

    match result {
        Err(CrawlerError::Discovery(DiscoveryError::InvalidPageNumber { href })) => {
            assert_eq!(href, "/kehuan/list_update_last.html")
        }
        other => panic!("expected InvalidPageNumber, got {:?}", other.map(|_| ())),
    }
    assert_eq!(requested_paths(&mock_server).await.len(), 1);
}

#[tokio::test]
async fn test_discovery_fetch_failure_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/kehuan/list_update_1.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &temp.path().join("download"));

    let result = Coordinator::new(config).unwrap().run().await;

    assert!(matches!(
        result,
        Err(CrawlerError::Discovery(DiscoveryError::Fetch(
            FetchError::Status { status: 503, .. }
        )))
    ));
}

#[tokio::test]
async fn test_configured_headers_are_sent() {
    let mock_server = MockServer::start().await;

    // Only requests carrying the session cookie get a listing page
    Mock::given(method("GET"))
        .and(path("/kehuan/list_update_1.html"))
        .and(header("cookie", "client_key=F1F17934834AE26140BBADBE6AC6AA5D"))
        .and(header("cache-control", "max-age=0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&["Hyperion"], Some("list_update_1.html"))),
        )
        .mount(&mock_server)
        .await;

    let temp = TempDir::new().unwrap();
    let download = temp.path().join("download");
    let config = create_test_config(&mock_server.uri(), &download);

    let summary = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.pages_written(), 1);
    assert_eq!(
        std::fs::read_to_string(download.join("1.txt")).unwrap(),
        "Hyperion\n"
    );
}

#[tokio::test]
async fn test_page_without_titles_writes_empty_file() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, 1, listing_page(&[], Some("list_update_1.html"))).await;

    let temp = TempDir::new().unwrap();
    let download = temp.path().join("download");
    std::fs::create_dir_all(&download).unwrap();
    std::fs::write(download.join("1.txt"), "stale\n").unwrap();

    let config = create_test_config(&mock_server.uri(), &download);
    let summary = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.outcomes, vec![(1, PageOutcome::Written { titles: 0 })]);
    assert_eq!(std::fs::read_to_string(download.join("1.txt")).unwrap(), "");
}

#[tokio::test]
async fn test_rerun_produces_identical_output() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        listing_page(&["Foundation", "Foundation"], Some("list_update_1.html")),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let download = temp.path().join("download");

    let config = create_test_config(&mock_server.uri(), &download);
    Coordinator::new(config.clone()).unwrap().run().await.unwrap();
    let first = std::fs::read(download.join("1.txt")).unwrap();

    Coordinator::new(config).unwrap().run().await.unwrap();
    let second = std::fs::read(download.join("1.txt")).unwrap();

    assert_eq!(first, b"Foundation\nFoundation\n");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_zero_pages_crawls_nothing() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        listing_page(&["Dune"], Some("list_update_0.html")),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let download = temp.path().join("download");
    let config = create_test_config(&mock_server.uri(), &download);

    let mut coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run().await.unwrap();

    assert_eq!(coordinator.phase(), CrawlPhase::Done);
    assert!(summary.outcomes.is_empty());
    assert_eq!(requested_paths(&mock_server).await.len(), 1);
    assert!(download.is_dir());
}

#[tokio::test]
async fn test_coordinator_runs_once() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, 1, listing_page(&["Dune"], Some("list_update_1.html"))).await;

    let temp = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &temp.path().join("download"));

    let mut coordinator = Coordinator::new(config).unwrap();
    coordinator.run().await.unwrap();

    assert!(matches!(
        coordinator.run().await,
        Err(CrawlerError::InvalidTransition {
            from: CrawlPhase::Done,
            to: CrawlPhase::Discovering
        })
    ));
}

#[tokio::test]
async fn test_delay_follows_fetched_pages_only() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        1,
        listing_page(&["Dune"], Some("list_update_3.html")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/kehuan/list_update_2.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 3, listing_page(&[], Some("list_update_3.html"))).await;

    let temp = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), &temp.path().join("download"));
    config.crawler.min_delay_secs = 1;
    config.crawler.max_delay_secs = 1;

    let started = std::time::Instant::now();
    let summary = Coordinator::new(config).unwrap().run().await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(
        summary.outcomes,
        vec![
            (1, PageOutcome::Written { titles: 1 }),
            (2, PageOutcome::FetchFailed),
            (3, PageOutcome::Written { titles: 0 }),
        ]
    );

    // One second after page 1 and after the empty page 3, none after page 2
    assert!(
        elapsed >= std::time::Duration::from_secs(2),
        "crawl took {:?}",
        elapsed
    );
    assert!(
        elapsed < std::time::Duration::from_secs(3),
        "crawl took {:?}",
        elapsed
    );
}
