//! Run-time chapter loading for Coursebook.
//!
//! In live-content mode chapters are fetched as markdown and parsed with
//! the same pipeline the build-time generator uses, so the lessons a
//! learner sees match the generated modules exactly.
//!
//! - [`fetch`]: the [`MarkdownFetcher`] seam and its HTTP implementation
//! - [`cache`]: parsed chapters keyed by id
//! - [`source`]: [`ChapterSource`], static/markdown mode switching
//! - [`tutor`]: tutor prompt context for the lesson on screen
//!
//! # Example
//!
//! ```rust,no_run
//! use coursebook_core::{ChapterRegistry, CourseConfig};
//! use coursebook_loader::{ChapterSource, HttpFetcher};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CourseConfig::load(None)?;
//! let registry = ChapterRegistry::load(&config.content.registry)?;
//!
//! let mut source = ChapterSource::new(HttpFetcher::new()?, &config.loader);
//! let chapters = source.resolve_all(registry.chapters()).await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod fetch;
pub mod source;
pub mod tutor;

pub use cache::LessonCache;
pub use error::{Error, Result};
pub use fetch::{HttpFetcher, MarkdownFetcher, MemoryFetcher, resolve_url};
pub use source::{ChapterSource, Liveness, LoadMode};
pub use tutor::{ChatMessage, Role, TutorBackend, ask_tutor, lesson_context_prompt};
