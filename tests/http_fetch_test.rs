//! HTTP page source against a mock server

use nodescrape::config::{LibrarySpec, ManualConfig};
use nodescrape::crawl_engine::{NoOpProgress, convert_manual};
use nodescrape::link_index::NodeId;
use nodescrape::page_fetcher::{FetchError, HttpPageSource, PageSource};
use mockito::Server;

mod common;

fn config_for(server: &Server, output_root: &std::path::Path, max_retries: u8) -> ManualConfig {
    ManualConfig::builder()
        .output_root(output_root)
        .target_library("Hardware")
        .library(LibrarySpec::new("Hardware", "0011"))
        .page_url_template(format!("{}/guide/node{{id}}.html", server.url()))
        .max_retries(max_retries)
        .retry_base_delay_ms(1)
        .crawl_rate_rps(None)
        .build()
        .expect("valid config")
}

#[tokio::test]
async fn test_fetch_decodes_legacy_code_page() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/guide/node0100.html")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(b"caf\xe9 \x93quoted\x94".as_slice())
        .expect(1)
        .create_async()
        .await;
    let temp_dir = common::create_test_dir();
    let source = HttpPageSource::from_config(&config_for(&server, temp_dir.path(), 3)).unwrap();

    let body = source.fetch(&NodeId::from("0100")).await.unwrap();

    assert_eq!(body, "café \u{201c}quoted\u{201d}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/guide/node0404.html")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let temp_dir = common::create_test_dir();
    let source = HttpPageSource::from_config(&config_for(&server, temp_dir.path(), 3)).unwrap();

    let err = source.fetch(&NodeId::from("0404")).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert!(!err.is_transient());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_retried_until_exhausted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/guide/node0500.html")
        .with_status(503)
        .expect(3)
        .create_async()
        .await;
    let temp_dir = common::create_test_dir();
    let source = HttpPageSource::from_config(&config_for(&server, temp_dir.path(), 2)).unwrap();

    let err = source.fetch(&NodeId::from("0500")).await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 503, .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_zero_retries_makes_single_attempt() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/guide/node0429.html")
        .with_status(429)
        .expect(1)
        .create_async()
        .await;
    let temp_dir = common::create_test_dir();
    let source = HttpPageSource::from_config(&config_for(&server, temp_dir.path(), 0)).unwrap();

    let err = source.fetch(&NodeId::from("0429")).await.unwrap_err();

    assert!(err.is_transient());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_conversion_over_http() {
    let mut server = Server::new_async().await;
    let index = server
        .mock("GET", "/guide/node0011.html")
        .with_status(200)
        .with_body(common::create_index_page(&[("0100", "Foo Bar")]))
        .expect(1)
        .create_async()
        .await;
    let page = server
        .mock("GET", "/guide/node0100.html")
        .with_status(200)
        .with_body(common::create_body_page(&[
            "SYNOPSIS",
            "    a &#060; b",
            &common::node_link("0200", "Baz"),
        ]))
        .expect(1)
        .create_async()
        .await;
    let linked = server
        .mock("GET", "/guide/node0200.html")
        .with_status(200)
        .with_body(common::create_body_page(&["Baz"]))
        .expect(1)
        .create_async()
        .await;
    let temp_dir = common::create_test_dir();
    let config = config_for(&server, temp_dir.path(), 0);
    let source = HttpPageSource::from_config(&config).unwrap();

    let summary = convert_manual(&config, &source, &NoOpProgress).await.unwrap();

    assert_eq!(summary.pages_rendered(), 2);
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("Hardware").join("FooBar.md")).unwrap(),
        "**SYNOPSIS**\n\n```c\n    a < b\nBaz\n```\nLinks: [Baz](_0200.md) \n\n"
    );
    index.assert_async().await;
    page.assert_async().await;
    linked.assert_async().await;
}
