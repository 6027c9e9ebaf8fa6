//! End-to-end searches over HTTP against a mock wiki

use link_racer::config::{FetcherConfig, LinksConfig, UserAgentConfig};
use link_racer::search::{Coordinator, HtmlLinkExtractor, HttpFetcher, SearchOptions};
use link_racer::SearchError;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wiki_links() -> LinksConfig {
    LinksConfig {
        allowed_domains: vec!["127.0.0.1".to_string()],
        path_prefix: Some("/wiki/".to_string()),
        skip_namespaced: true,
        ..LinksConfig::default()
    }
}

fn coordinator(workers: usize) -> Coordinator {
    let fetcher_config = FetcherConfig {
        max_retries: 0,
        ..FetcherConfig::default()
    };
    let fetcher = HttpFetcher::new(&UserAgentConfig::default(), &fetcher_config).unwrap();
    Coordinator::new(
        Arc::new(fetcher),
        Arc::new(HtmlLinkExtractor::new(wiki_links())),
        workers,
        SearchOptions::default(),
    )
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!("<html><head><title>{}</title></head><body>{}</body></html>", page, body),
            "text/html; charset=utf-8",
        ))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_finds_path_over_http() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/wiki/Start",
        r##"
        <a href="/wiki/Special:Random">Random</a>
        <a href="/wiki/Start#top">Top</a>
        <a href="https://elsewhere.test/wiki/Target">Decoy</a>
        <a href="/wiki/Dead_End">Dead end</a>
        <a href="/wiki/Middle?utm_source=nav">Middle</a>
        "##,
    )
    .await;
    mount_page(&server, "/wiki/Dead_End", "<p>Nothing here</p>").await;
    mount_page(&server, "/wiki/Middle", r#"<a href="Target">Target</a>"#).await;

    // The target itself is never fetched
    Mock::given(method("GET"))
        .and(path("/wiki/Target"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let start = format!("{}/wiki/Start", base);
    let target = format!("{}/wiki/Target", base);
    let report = coordinator(3).search(&start, &target).await.unwrap();

    assert_eq!(
        report.path.urls(),
        &[start, format!("{}/wiki/Middle", base), target]
    );
    assert_eq!(report.stats.fetch_failures, 0);
}

#[tokio::test]
async fn test_broken_pages_are_routed_around() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/wiki/Start",
        r#"<a href="/wiki/Missing">Missing</a><a href="/wiki/Image">Image</a><a href="/wiki/Detour">Detour</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8; 16], "image/png"))
        .mount(&server)
        .await;
    mount_page(&server, "/wiki/Detour", r#"<a href="/wiki/Target">Target</a>"#).await;

    let start = format!("{}/wiki/Start", base);
    let target = format!("{}/wiki/Target", base);
    let report = coordinator(1).search(&start, &target).await.unwrap();

    assert_eq!(report.path.hops(), 2);
    assert_eq!(report.stats.fetch_failures, 2);
    assert_eq!(report.stats.pages_fetched, 2);
}

#[tokio::test]
async fn test_no_path_over_http() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/wiki/Start", r#"<a href="/wiki/Loop">Loop</a>"#).await;
    mount_page(&server, "/wiki/Loop", r#"<a href="/wiki/Start">Back</a>"#).await;

    let result = coordinator(4)
        .search(&format!("{}/wiki/Start", base), &format!("{}/wiki/Target", base))
        .await;

    assert!(matches!(
        result,
        Err(SearchError::PathNotFound { claimed: 2, .. })
    ));
}
