//! Build-time generation of static lesson modules.
//!
//! Chapter markdown is parsed with [`coursebook_content`] and emitted as
//! TypeScript (or JSON) modules that the site bundles directly, so the
//! static build and live loading see the same lessons.
//!
//! # Modules
//!
//! - [`emit`]: module text rendering
//! - [`generate`]: one file to one module
//! - [`discover`]: finding chapter sources
//! - [`batch`]: directory-wide generation
//! - [`scaffold`]: new chapter stubs
//!
//! # Example
//!
//! ```rust,no_run
//! use coursebook_codegen::ChapterGenerator;
//!
//! let stats = ChapterGenerator::new("public/data", "data")
//!     .with_exclude_prefix("test")
//!     .run()?;
//! println!("{} chapter(s), {} lesson(s)", stats.written.len(), stats.lesson_count());
//! # Ok::<(), coursebook_core::Error>(())
//! ```

pub mod batch;
pub mod discover;
pub mod emit;
pub mod generate;
pub mod scaffold;

pub use batch::{BatchStats, ChapterGenerator, WrittenModule};
pub use discover::discover_sources;
pub use emit::{OutputFormat, render_lesson, render_lessons};
pub use generate::{GeneratedModule, generate_chapter, generate_lesson, output_path_for};
pub use scaffold::{CreatedChapter, chapter_template, create_chapter};
