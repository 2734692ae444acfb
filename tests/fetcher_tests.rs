//! Integration tests for the HTTP fetcher
//!
//! These tests use wiremock to exercise the production fetcher against a
//! mock HTTP server: status handling, content-type rejection, and redirect
//! resolution.

use seine::crawler::{FetchError, Fetcher, HttpFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_fetch_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response("<html><title>Home</title></html>"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new("seine-test/1.0").unwrap();
    let page = fetcher.fetch(&server.uri()).await.unwrap();

    assert!(page.body.contains("<title>Home</title>"));
    assert!(page.final_url.starts_with(&server.uri()));
}

#[tokio::test]
async fn test_fetch_404_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new("seine-test/1.0").unwrap();
    let err = fetcher
        .fetch(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(404)));
}

#[tokio::test]
async fn test_fetch_server_error_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new("seine-test/1.0").unwrap();
    let err = fetcher
        .fetch(&format!("{}/broken", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(503)));
}

#[tokio::test]
async fn test_fetch_non_html_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new("seine-test/1.0").unwrap();
    let err = fetcher
        .fetch(&format!("{}/data.json", server.uri()))
        .await
        .unwrap_err();

    match err {
        FetchError::NotHtml(content_type) => assert!(content_type.contains("application/json")),
        other => panic!("expected NotHtml, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_follows_redirect_to_final_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html_response("<html><title>New</title></html>"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new("seine-test/1.0").unwrap();
    let page = fetcher.fetch(&format!("{}/old", server.uri())).await.unwrap();

    assert_eq!(page.final_url, format!("{}/new", server.uri()));
    assert!(page.body.contains("New"));
}

#[tokio::test]
async fn test_fetch_unreachable_host_is_network_error() {
    // Port 1 on localhost should refuse the connection immediately.
    let fetcher = HttpFetcher::new("seine-test/1.0").unwrap();
    let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();

    assert!(matches!(
        err,
        FetchError::Network(_) | FetchError::Timeout
    ));
}
