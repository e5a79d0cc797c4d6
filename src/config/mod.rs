//! Configuration module for manual conversion
//!
//! This module provides the `ManualConfig` struct and its type-safe builder
//! for configuring conversion runs with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{Complete, ManualConfigBuilder, WithOutputRoot};
pub use types::{LibrarySpec, ManualConfig, SlugCollisionPolicy, default_libraries};
