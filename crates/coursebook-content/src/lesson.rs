//! Markdown document to [`Lesson`] conversion.

use coursebook_core::{Lesson, LessonType, slugify};

use crate::markdown::{extract_frontmatter, extract_hidden_snippets};

/// Title used when neither frontmatter nor a heading supplies one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Convert one markdown document into a lesson.
///
/// Frontmatter keys `id`, `title`, `description`, and `type` fill the
/// record; missing ones default to a slug of the title, `"Untitled"`, an
/// empty string, and `reading`. An unrecognised `type` is `reading` too.
/// The body is trimmed when frontmatter was present. Hidden snippets are
/// pulled out of the body and attached, and `code_snippets` stays `None`
/// when there were none.
///
/// Total over all strings: malformed frontmatter or unterminated fences
/// simply stay in the content.
///
/// ```rust
/// use coursebook_content::convert_markdown_to_lesson;
/// use coursebook_core::LessonType;
///
/// let lesson = convert_markdown_to_lesson(
///     "---\ntitle: Hello World! Lesson 1\ntype: exercise\n---\nContent",
/// );
/// assert_eq!(lesson.id, "hello-world-lesson-1");
/// assert_eq!(lesson.lesson_type, LessonType::Exercise);
/// assert_eq!(lesson.content, "Content");
/// ```
pub fn convert_markdown_to_lesson(raw: &str) -> Lesson {
    let fm = extract_frontmatter(raw);

    let title = fm.get_field("title").unwrap_or(DEFAULT_TITLE).to_string();
    let description = fm.get_field("description").unwrap_or_default().to_string();
    let id = slugify(fm.get_field("id").unwrap_or(&title));
    let lesson_type = fm
        .get_field("type")
        .map(LessonType::parse_or_default)
        .unwrap_or_default();

    let body = if fm.has_frontmatter() {
        fm.body().trim()
    } else {
        fm.body()
    };
    let (content, code_snippets) = extract_hidden_snippets(body).into_parts();

    Lesson {
        id,
        title,
        description,
        lesson_type,
        content,
        code_snippets,
        challenges: None,
        external_link: None,
    }
}

/// Convert a body that is known to carry no frontmatter.
///
/// Nothing is read as metadata, so a leading `---` rule stays in the
/// content. Fields take the same defaults as a document without
/// frontmatter.
pub fn convert_body_to_lesson(body: &str) -> Lesson {
    let (content, code_snippets) = extract_hidden_snippets(body).into_parts();

    Lesson {
        id: slugify(DEFAULT_TITLE),
        title: DEFAULT_TITLE.to_string(),
        content,
        code_snippets,
        ..Lesson::default()
    }
}
