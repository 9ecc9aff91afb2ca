//! Chapter documents: one markdown file, many lessons.
//!
//! A chapter document carries chapter-scoped frontmatter (`id` is the
//! chapter id, `title` the chapter title, `type` the default lesson type)
//! followed by `## Heading` sections. Each section becomes one [`Lesson`]
//! whose id is prefixed with the chapter id and whose title is the heading.
//!
//! [`parse_chapter_document`] is the single entry point shared by the
//! build-time generator and the run-time loader.

use std::collections::HashSet;

use coursebook_core::{Lesson, LessonType, slugify};

use crate::lesson::{convert_body_to_lesson, convert_markdown_to_lesson};
use crate::markdown::{SplitDocument, find_field, level2_heading, prefix_asset_links, split_into_sections};

/// Chapter-level metadata read from the shared frontmatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterMeta {
    /// Chapter id from the `id` key.
    pub chapter_id: Option<String>,
    /// Chapter title from the `title` key.
    pub title: Option<String>,
    /// Type given to sections whose title implies none.
    pub default_type: LessonType,
}

impl ChapterMeta {
    /// Build the section-parsing context, preferring the frontmatter id.
    pub fn context(&self, fallback_id: Option<&str>) -> Option<ChapterContext> {
        let chapter_id = self.chapter_id.as_deref().or(fallback_id)?;
        Some(ChapterContext {
            chapter_id: chapter_id.to_string(),
            default_type: self.default_type,
        })
    }
}

/// Read chapter metadata from a frontmatter block.
///
/// A missing `type` means `exercise`; a present but unknown one means
/// `reading`.
///
/// ```rust
/// use coursebook_content::extract_chapter_meta;
/// use coursebook_core::LessonType;
///
/// let meta = extract_chapter_meta("---\nid: sql-intro\ntitle: SQL Intro\n---\n");
/// assert_eq!(meta.chapter_id.as_deref(), Some("sql-intro"));
/// assert_eq!(meta.default_type, LessonType::Exercise);
/// ```
pub fn extract_chapter_meta(frontmatter: &str) -> ChapterMeta {
    ChapterMeta {
        chapter_id: find_field(frontmatter, "id").map(str::to_string),
        title: find_field(frontmatter, "title").map(str::to_string),
        default_type: find_field(frontmatter, "type")
            .map_or(LessonType::Exercise, LessonType::parse_or_default),
    }
}

/// What every section of one chapter shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterContext {
    /// Prefix for lesson ids.
    pub chapter_id: String,
    /// Type used when the section title implies none.
    pub default_type: LessonType,
}

/// Turn split sections into lessons, index-aligned with `split.sections`.
///
/// For each section the leading `##` heading gives the title (or
/// `Lesson {n}`, 1-indexed, without one) and is removed from the body. The
/// shared frontmatter is put back in front of the body before conversion;
/// without one the body is converted as is, so a `---` rule inside a
/// section is never read as metadata. Then the id, title and type are
/// overridden:
///
/// - id: `{chapter_id}-{slug(title)}`, or `{chapter_id}-lesson-{n}` when
///   the title has no sluggable characters
/// - type: `challenge` when the title contains "challenge", `reading` when
///   it contains "understanding" (both case-insensitive), otherwise the
///   chapter default
///
/// Duplicate ids are kept and logged at warn level.
pub fn parse_chapter_sections(split: &SplitDocument, context: &ChapterContext) -> Vec<Lesson> {
    let lessons: Vec<Lesson> = split
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| parse_section(section, index, &split.frontmatter, context))
        .collect();

    for id in duplicate_ids(&lessons) {
        log::warn!("Chapter {} has more than one lesson with id {id}", context.chapter_id);
    }
    lessons
}

/// Ids that occur more than once, in first-repeat order.
pub fn duplicate_ids(lessons: &[Lesson]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    for lesson in lessons {
        let id = lesson.id.as_str();
        if !seen.insert(id) && !repeated.contains(&id) {
            repeated.push(id);
        }
    }
    repeated
}

fn parse_section(section: &str, index: usize, frontmatter: &str, context: &ChapterContext) -> Lesson {
    let (heading, rest) = split_heading(section);
    let title = match heading {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("Lesson {}", index + 1),
    };

    let body = rest.trim();
    let lesson = if frontmatter.is_empty() {
        convert_body_to_lesson(body)
    } else {
        convert_markdown_to_lesson(&format!("{frontmatter}\n{body}"))
    };

    let lesson_type = infer_type(&title, context.default_type);
    let mut slug = slugify(&title);
    if slug.is_empty() {
        slug = format!("lesson-{}", index + 1);
    }
    Lesson {
        id: format!("{}-{slug}", context.chapter_id),
        title,
        lesson_type,
        ..lesson
    }
}

/// Split off the first line when it is a level-2 heading.
fn split_heading(section: &str) -> (Option<&str>, &str) {
    let (first, rest) = section.split_once('\n').unwrap_or((section, ""));
    match level2_heading(first) {
        Some(text) => (Some(text), rest),
        None => (None, section),
    }
}

fn infer_type(title: &str, default_type: LessonType) -> LessonType {
    let lower = title.to_lowercase();
    if lower.contains("challenge") {
        LessonType::Challenge
    } else if lower.contains("understanding") {
        LessonType::Reading
    } else {
        default_type
    }
}

/// A parsed chapter document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChapter {
    /// Metadata from the shared frontmatter.
    pub meta: ChapterMeta,
    /// Lessons in section order; empty when no chapter id was available.
    pub lessons: Vec<Lesson>,
}

/// Parse a whole chapter document.
///
/// Asset links are prefixed with `asset_base`, the document is split,
/// chapter metadata is read, and the sections are parsed. The frontmatter
/// `id` is the chapter id; `fallback_id` is used when it is missing. With
/// neither, no lessons are produced.
///
/// ```rust
/// use coursebook_content::parse_chapter_document;
/// use coursebook_core::LessonType;
///
/// let doc = "---\nid: c\ntype: reading\n---\n## Hello World\nHi.\n## Challenge: Do X\nGo.\n";
/// let parsed = parse_chapter_document(doc, "/", None);
///
/// let ids: Vec<_> = parsed.lessons.iter().map(|l| l.id.as_str()).collect();
/// assert_eq!(ids, vec!["c-hello-world", "c-challenge-do-x"]);
/// assert_eq!(parsed.lessons[1].lesson_type, LessonType::Challenge);
/// ```
pub fn parse_chapter_document(markdown: &str, asset_base: &str, fallback_id: Option<&str>) -> ParsedChapter {
    let prefixed = prefix_asset_links(markdown, asset_base);
    let split = split_into_sections(&prefixed);
    let meta = extract_chapter_meta(&split.frontmatter);

    let lessons = match meta.context(fallback_id) {
        Some(context) => parse_chapter_sections(&split, &context),
        None => Vec::new(),
    };

    ParsedChapter { meta, lessons }
}
