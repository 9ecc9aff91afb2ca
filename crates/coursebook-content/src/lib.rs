//! Lesson markdown parsing for Coursebook.
//!
//! Turns authored markdown into [`Lesson`](coursebook_core::Lesson) records.
//! The build-time generator and the run-time loader both go through this
//! crate, so the same source text always yields the same lessons.
//!
//! # Modules
//!
//! - [`markdown`]: frontmatter, hidden snippets, section splitting
//! - [`lesson`]: one document to one lesson
//! - [`chapter`]: one chapter document to a list of lessons
//!
//! # Example
//!
//! ```rust
//! use coursebook_content::convert_markdown_to_lesson;
//!
//! let lesson = convert_markdown_to_lesson(
//!     "---\ntitle: SELECT Basics\n---\nQuery it.\n```sql:Show Me\nSELECT * FROM world;\n```\n",
//! );
//! assert_eq!(lesson.id, "select-basics");
//! assert_eq!(lesson.content, "Query it.\n");
//! assert_eq!(lesson.snippets()[0].summary.as_deref(), Some("Show Me"));
//! ```

pub mod chapter;
pub mod lesson;
pub mod markdown;

// Re-export commonly used types
pub use chapter::{
    ChapterContext, ChapterMeta, ParsedChapter, duplicate_ids, extract_chapter_meta,
    parse_chapter_document, parse_chapter_sections,
};
pub use lesson::{DEFAULT_TITLE, convert_body_to_lesson, convert_markdown_to_lesson};
pub use markdown::{
    FrontmatterResult, SnippetExtraction, SplitDocument, extract_frontmatter,
    extract_hidden_snippets, prefix_asset_links, split_into_sections, strip_frontmatter,
};
