//! Shared configuration constants for nodescrape
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default fetch rate: 2 requests per second
///
/// The source host is a single small archive server. Every page of a run
/// goes to the same host, so this is effectively the whole crawl's pace.
pub const DEFAULT_CRAWL_RATE_RPS: f64 = 2.0;

/// Default maximum crawl depth: 2 levels
///
/// Depth 1 renders every entry of the target library's index, depth 2 renders
/// the pages those entries link to. Links found at depth 2 are left dangling.
pub const DEFAULT_MAX_DEPTH: u8 = 2;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of retries after the first failed fetch attempt
pub const DEFAULT_MAX_RETRIES: u8 = 3;

/// Delay before the first retry; doubles on every further attempt
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;

/// Width node ids are zero-padded to when given as bare numbers
pub const DEFAULT_NODE_ID_WIDTH: usize = 4;

/// Code page the manual pages are served in
pub const DEFAULT_SOURCE_ENCODING: &str = "windows-1252";

/// URL template of the Hardware Manual guide; `{id}` is the node id
pub const DEFAULT_PAGE_URL_TEMPLATE: &str =
    "http://amigadev.elowar.com/read/ADCD_2.1/Hardware_Manual_guide/node{id}.html";

/// Placeholder substituted by the node id in page URL templates
pub const NODE_ID_PLACEHOLDER: &str = "{id}";

/// Library rendered when no configuration file is given
pub const DEFAULT_LIBRARY_NAME: &str = "REGISTER SUMMARY ALPHABETICAL ORDER";

/// Index page of [`DEFAULT_LIBRARY_NAME`]
pub const DEFAULT_LIBRARY_SEED: &str = "0011";

/// Output root used when none is configured
pub const DEFAULT_OUTPUT_ROOT: &str = "docs";

/// User agent sent with every page request
pub const USER_AGENT: &str = concat!("nodescrape/", env!("CARGO_PKG_VERSION"));
