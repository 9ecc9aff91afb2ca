//! Splitting chapter documents on level-2 headings.
//!
//! A chapter document is one file holding many lessons: shared frontmatter
//! followed by `## Heading` sections, one per lesson.
//!
//! ```rust
//! use coursebook_content::markdown::split_into_sections;
//!
//! let doc = "---\nid: sql-intro\n---\n## SELECT\nPick columns.\n### Tip\nUse aliases.\n## WHERE\nFilter rows.\n";
//! let split = split_into_sections(doc);
//!
//! assert_eq!(split.frontmatter, "---\nid: sql-intro\n---\n");
//! assert_eq!(split.sections.len(), 2);
//! assert_eq!(split.sections[0], "## SELECT\nPick columns.\n### Tip\nUse aliases.");
//! assert_eq!(split.sections[1], "## WHERE\nFilter rows.");
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::frontmatter::extract_frontmatter;

static ASSET_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(/(data|assets)/").expect("Invalid asset link regex"));

/// A chapter document separated into shared frontmatter and sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitDocument {
    /// The raw frontmatter block including delimiters, or empty.
    pub frontmatter: String,
    /// Section texts in document order.
    pub sections: Vec<String>,
}

/// If `line` is a level-2 heading, return its text.
///
/// A level-2 heading is a line starting with `## ` whose next character is
/// not another `#`. The returned text is trimmed and may be empty.
///
/// ```rust
/// use coursebook_content::markdown::sections::level2_heading;
///
/// assert_eq!(level2_heading("## Hello World"), Some("Hello World"));
/// assert_eq!(level2_heading("### Deeper"), None);
/// assert_eq!(level2_heading("## #tag"), None);
/// assert_eq!(level2_heading("##NoSpace"), None);
/// ```
pub fn level2_heading(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("## ")?;
    if rest.starts_with('#') {
        return None;
    }
    Some(rest.trim())
}

/// Split a chapter document into frontmatter and `##` sections.
///
/// - Frontmatter is detected exactly as [`extract_frontmatter`] does and
///   returned separately, never copied into a section.
/// - With no level-2 headings, the whole body is a single section, as is.
/// - Otherwise each section runs from one heading line to the next (or the
///   end) and is trimmed. Text before the first heading belongs to no
///   section.
pub fn split_into_sections(markdown: &str) -> SplitDocument {
    let fm = extract_frontmatter(markdown);
    let frontmatter = fm.block().unwrap_or_default().to_string();
    let body = fm.body();

    let mut starts = Vec::new();
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if level2_heading(line).is_some() {
            starts.push(offset);
        }
        offset += line.len();
    }

    if starts.is_empty() {
        return SplitDocument {
            frontmatter,
            sections: vec![body.to_string()],
        };
    }

    let preamble = body[..starts[0]].trim();
    if !preamble.is_empty() {
        log::debug!(
            "Dropping {} bytes before the first section heading",
            preamble.len()
        );
    }

    let sections = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(body.len());
            body[start..end].trim().to_string()
        })
        .collect();

    SplitDocument {
        frontmatter,
        sections,
    }
}

/// Point root-relative `/data/` and `/assets/` link targets at `asset_base`.
///
/// Used when the site is served from a sub-path. With the default base `/`
/// the input is returned unchanged.
///
/// ```rust
/// use coursebook_content::markdown::prefix_asset_links;
///
/// let md = "![schema](/assets/schema.png) and [data](/data/world.csv)";
/// assert_eq!(
///     prefix_asset_links(md, "/course/"),
///     "![schema](/course/assets/schema.png) and [data](/course/data/world.csv)"
/// );
/// assert_eq!(prefix_asset_links(md, "/"), md);
/// ```
pub fn prefix_asset_links<'a>(markdown: &'a str, asset_base: &str) -> Cow<'a, str> {
    if asset_base == "/" {
        return Cow::Borrowed(markdown);
    }
    ASSET_LINK_RE.replace_all(markdown, |caps: &Captures<'_>| {
        format!("]({asset_base}{}/", &caps[1])
    })
}
