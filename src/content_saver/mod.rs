//! Markdown rendering and saving of manual pages

// Module declarations
pub mod markdown_converter;
mod markdown_saver;

// Re-export public API from markdown_saver module
pub use markdown_saver::{MarkdownWriter, WriteOutcome};
