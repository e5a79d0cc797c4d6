//! Tests for the type-safe configuration builder and JSON loading

use nodescrape::config::{LibrarySpec, ManualConfig, SlugCollisionPolicy};
use nodescrape::crawl_engine::CrawlError;
use nodescrape::link_index::NodeId;
use std::time::Duration;

mod common;

#[test]
fn test_builder_defaults() {
    let temp_dir = common::create_test_dir();
    let config = ManualConfig::builder()
        .output_root(temp_dir.path())
        .target_library("REGISTER SUMMARY ALPHABETICAL ORDER")
        .build()
        .unwrap();

    assert_eq!(config.output_root(), temp_dir.path());
    assert_eq!(config.libraries().len(), 1);
    assert_eq!(config.libraries()[0].seed, NodeId::from("0011"));
    assert_eq!(config.max_depth(), Some(2));
    assert_eq!(config.max_retries(), 3);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.crawl_rate_rps(), Some(2.0));
    assert_eq!(config.source_encoding(), "windows-1252");
    assert_eq!(config.slug_collision_policy(), SlugCollisionPolicy::Overwrite);
    assert_eq!(
        config.target_dir(),
        temp_dir.path().join("REGISTERSUMMARYALPHABETICALORDER")
    );
}

#[test]
fn test_numeric_seeds_are_zero_padded() {
    let temp_dir = common::create_test_dir();
    let config = ManualConfig::builder()
        .output_root(temp_dir.path())
        .target_library("graphics")
        .library(LibrarySpec::new("graphics", "43"))
        .library(LibrarySpec::new("exec", "node_x"))
        .build()
        .unwrap();

    assert_eq!(config.libraries()[0].seed, NodeId::from("0043"));
    assert_eq!(config.libraries()[1].seed, NodeId::from("node_x"));
}

#[test]
fn test_page_url_expands_placeholder() {
    let config = ManualConfig::builder()
        .output_root("out")
        .target_library("REGISTER SUMMARY ALPHABETICAL ORDER")
        .page_url_template("https://docs.example.org/guide/node{id}.html")
        .build()
        .unwrap();

    assert_eq!(
        config.page_url(&NodeId::from("0100")),
        "https://docs.example.org/guide/node0100.html"
    );
}

#[test]
fn test_rejects_unknown_target_library() {
    let result = ManualConfig::builder()
        .output_root("out")
        .target_library("no such library")
        .build();

    assert!(matches!(result, Err(CrawlError::UnknownLibrary(name)) if name == "no such library"));
}

#[test]
fn test_rejects_invalid_settings() {
    let base = || {
        ManualConfig::builder()
            .output_root("out")
            .target_library("REGISTER SUMMARY ALPHABETICAL ORDER")
    };

    assert!(matches!(
        base().page_url_template("http://host/page.html").build(),
        Err(CrawlError::Config(_))
    ));
    assert!(matches!(
        base().page_url_template("ftp://host/node{id}.html").build(),
        Err(CrawlError::Config(_))
    ));
    assert!(matches!(
        base().source_encoding("not-a-codepage").build(),
        Err(CrawlError::Config(_))
    ));
    assert!(matches!(
        base().crawl_rate_rps(Some(0.0)).build(),
        Err(CrawlError::Config(_))
    ));
    assert!(matches!(
        base().max_depth(Some(0)).build(),
        Err(CrawlError::Config(_))
    ));
}

#[test]
fn test_rejects_duplicate_library_names() {
    let result = ManualConfig::builder()
        .output_root("out")
        .target_library("graphics")
        .library(LibrarySpec::new("graphics", "0001"))
        .library(LibrarySpec::new("graphics", "0002"))
        .build();

    assert!(matches!(result, Err(CrawlError::Config(_))));
}

#[test]
fn test_into_builder_allows_overrides() {
    let config = ManualConfig::default()
        .into_builder()
        .replace_output_root("elsewhere")
        .max_depth(None)
        .build()
        .unwrap();

    assert_eq!(config.output_root().to_str(), Some("elsewhere"));
    assert_eq!(config.max_depth(), None);
}

#[test]
fn test_load_from_json_file() {
    let temp_dir = common::create_test_dir();
    let path = temp_dir.path().join("manual.json");
    std::fs::write(
        &path,
        r#"{
            "output_root": "md",
            "libraries": [
                {"name": "graphics library", "seed": "120"},
                {"name": "exec", "seed": "0200", "directory": "exec_lib"}
            ],
            "target_library": "exec",
            "max_depth": null,
            "slug_collision_policy": "suffix_node_id"
        }"#,
    )
    .unwrap();

    let config = ManualConfig::from_json_file(&path).unwrap();

    assert_eq!(config.target_library(), "exec");
    assert_eq!(config.max_depth(), None);
    assert_eq!(config.libraries()[0].seed, NodeId::from("0120"));
    assert_eq!(config.libraries()[0].directory(), "graphicslibrary");
    assert_eq!(config.target_dir(), std::path::Path::new("md").join("exec_lib"));
    assert_eq!(
        config.slug_collision_policy(),
        SlugCollisionPolicy::SuffixNodeId
    );
    // Unspecified fields keep their defaults
    assert_eq!(config.max_retries(), 3);
}

#[test]
fn test_load_from_invalid_json_file() {
    let temp_dir = common::create_test_dir();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        ManualConfig::from_json_file(&path),
        Err(CrawlError::Config(_))
    ));
    assert!(matches!(
        ManualConfig::from_json_file(&temp_dir.path().join("missing.json")),
        Err(CrawlError::Io { .. })
    ));
}
