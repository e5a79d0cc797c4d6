//! Test utilities and helper functions for the nodescrape test suite

use nodescrape::config::{LibrarySpec, ManualConfig};
use nodescrape::page_fetcher::StaticPageSource;
use std::path::Path;
use tempfile::TempDir;

/// Creates a temporary directory for test output
#[allow(dead_code)]
pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

/// Creates an index page listing `(id, name)` entries after navigation links
#[allow(dead_code)]
pub fn create_index_page(entries: &[(&str, &str)]) -> String {
    let mut html = String::from(
        "<html><head><title>Index</title></head><body>\n\
         <a href=\"../Hardware_Manual_guide/node0000.html\">Contents</a>\n\
         <pre>\n",
    );
    for (id, name) in entries {
        html.push_str(&format!(
            "   <a href=\"../Hardware_Manual_guide/node{id}.html\">{name}</a>\n"
        ));
    }
    html.push_str("</pre>\n</body></html>\n");
    html
}

/// Wraps body lines in the page chrome and body markers of a manual page
#[allow(dead_code)]
pub fn create_body_page(lines: &[&str]) -> String {
    let mut html = String::from(
        "<html><head><title>Page</title></head><body>\n\
         <a href=\"../Hardware_Manual_guide/node0000.html\">Contents</a>\n\
         <pre>\n<!-- AG2HTML: BODY=START -->\n",
    );
    for line in lines {
        html.push_str(line);
        html.push('\n');
    }
    html.push_str("<!-- AG2HTML: BODY=END -->\n</pre>\n</body></html>\n");
    html
}

/// Anchor to a node page as the manual writes it
#[allow(dead_code)]
pub fn node_link(id: &str, text: &str) -> String {
    format!("<a href=\"../Hardware_Manual_guide/node{id}.html\">{text}</a>")
}

/// Config writing below `output_root` with pacing disabled; the first
/// library is the target
#[allow(dead_code)]
pub fn create_test_config(
    output_root: &Path,
    libraries: Vec<LibrarySpec>,
    max_depth: Option<u8>,
) -> ManualConfig {
    let target = libraries
        .first()
        .map(|library| library.name.clone())
        .expect("at least one library");
    ManualConfig::builder()
        .output_root(output_root)
        .target_library(target)
        .libraries(libraries)
        .max_depth(max_depth)
        .crawl_rate_rps(None)
        .build()
        .expect("valid test config")
}

/// One library with one entry, "Foo Bar", linking to an unlisted page
#[allow(dead_code)]
pub fn create_foo_bar_manual() -> StaticPageSource {
    StaticPageSource::new()
        .with_page("0011", create_index_page(&[("0100", "Foo Bar")]))
        .with_page(
            "0100",
            create_body_page(&["NAME", "  Foo Bar -- test entry", &node_link("0200", "Baz")]),
        )
        .with_page("0200", create_body_page(&["Baz details"]))
}
