//! Shared types, errors, and utilities for Coursebook.
//!
//! This crate provides the foundational types used across all Coursebook
//! crates. It has no internal Coursebook dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: Lesson, code snippet, and chapter records
//! - [`registry`]: The chapter registry manifest
//! - [`config`]: TOML configuration with environment overrides
//! - [`util`]: Slug and constant-name utilities

pub mod config;
pub mod error;
pub mod registry;
pub mod types;
pub mod util;

// Re-export key types at crate root for convenience
pub use config::{ContentConfig, CourseConfig, LoaderConfig};
pub use error::{Error, Result};
pub use registry::ChapterRegistry;
pub use types::{Chapter, CodeSnippet, ExternalLink, Lesson, LessonType};

// Convenience re-exports from util
pub use util::ids::{FALLBACK_CONSTANT, constant_name, slugify};
