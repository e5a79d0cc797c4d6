//! Name normalization shared by file naming and link resolution.

/// Map a display name to the slug used as file stem and resolver identity.
///
/// Removes every space and `?` and nothing else, so the function is
/// idempotent:
///
/// ```
/// # use nodescrape::utils::normalize_name;
/// assert_eq!(normalize_name("Foo Bar?"), "FooBar");
/// assert_eq!(normalize_name(&normalize_name("Foo Bar?")), "FooBar");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.chars().filter(|c| !matches!(c, ' ' | '?')).collect()
}

/// Fallback slug for a page that is not tied to a named entry.
#[must_use]
pub fn fallback_slug(raw_id: &str) -> String {
    format!("_{}", normalize_name(raw_id))
}
