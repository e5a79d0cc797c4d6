pub mod constants;
pub mod slug;

pub use constants::*;
pub use slug::{fallback_slug, normalize_name};
