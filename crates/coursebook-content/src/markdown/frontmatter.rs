//! Frontmatter extraction from lesson markdown.
//!
//! Frontmatter is a `key: value` block at the very start of a document,
//! delimited by lines that are exactly `---`:
//!
//! ```markdown
//! ---
//! id: select-basics
//! title: SELECT Basics
//! description: Learn how to retrieve data.
//! type: exercise
//! ---
//!
//! # Lesson body
//! ```
//!
//! Values are plain text, not YAML: everything after the first colon on the
//! line, trimmed. Text that only looks like frontmatter further down the
//! document is body, and so is an opening `---` with no closing line.
//!
//! # Usage
//!
//! ```rust
//! use coursebook_content::markdown::extract_frontmatter;
//!
//! let content = "---\ntitle: Phase 1: The Beginning\n---\nBody";
//! let result = extract_frontmatter(content);
//!
//! assert!(result.has_frontmatter());
//! assert_eq!(result.get_field("title"), Some("Phase 1: The Beginning"));
//! assert_eq!(result.body(), "Body");
//! ```

/// Result of frontmatter extraction.
///
/// Borrows from the input: the full delimited block, the lines between the
/// delimiters, and the body after the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterResult<'a> {
    /// The block from the opening `---` through the closing line's newline.
    block: Option<&'a str>,
    /// Lines between the delimiters.
    fields: &'a str,
    /// Everything after the block.
    body: &'a str,
}

impl<'a> FrontmatterResult<'a> {
    fn without_frontmatter(body: &'a str) -> Self {
        Self {
            block: None,
            fields: "",
            body,
        }
    }

    /// Check if a frontmatter block was found at the start of the input.
    pub fn has_frontmatter(&self) -> bool {
        self.block.is_some()
    }

    /// The raw block including both delimiter lines, if present.
    pub fn block(&self) -> Option<&'a str> {
        self.block
    }

    /// The raw lines between the delimiters (empty without frontmatter).
    pub fn fields(&self) -> &'a str {
        self.fields
    }

    /// The body content (everything after frontmatter).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Look up a field value.
    ///
    /// See [`find_field`]; always `None` without frontmatter.
    pub fn get_field(&self, key: &str) -> Option<&'a str> {
        find_field(self.fields, key)
    }
}

/// Find the trimmed value of the first `key:` line in a block of fields.
///
/// The key must start the line and be followed directly by a colon; only
/// that first colon separates key from value. An empty value counts as
/// missing.
///
/// ```rust
/// use coursebook_content::markdown::frontmatter::find_field;
///
/// let fields = "title:   Spaced Out   \nsubtitle: ignored\ndescription:\n";
/// assert_eq!(find_field(fields, "title"), Some("Spaced Out"));
/// assert_eq!(find_field(fields, "description"), None);
/// assert_eq!(find_field(fields, "type"), None);
/// ```
pub fn find_field<'a>(fields: &'a str, key: &str) -> Option<&'a str> {
    fields
        .lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix(':'))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Extract frontmatter from the start of a document.
///
/// # Behavior
///
/// - First line not exactly `---`: no frontmatter, whole input is body
/// - Opening `---` without a closing `---` line: no frontmatter, whole
///   input is body
/// - Otherwise: the block is split off and the body starts after the
///   closing delimiter's newline
///
/// A trailing `\r` on delimiter lines is tolerated.
///
/// ```rust
/// use coursebook_content::markdown::extract_frontmatter;
///
/// // Must start at offset 0
/// let result = extract_frontmatter("\n---\ntitle: I am content\n---\n");
/// assert!(!result.has_frontmatter());
///
/// // Unterminated
/// let result = extract_frontmatter("---\ntitle: Forever Open\nContent");
/// assert!(!result.has_frontmatter());
/// assert!(result.body().contains("title: Forever Open"));
/// ```
pub fn extract_frontmatter(content: &str) -> FrontmatterResult<'_> {
    let mut lines = content.split_inclusive('\n');

    // Opening delimiter must be a complete first line
    let fields_start = match lines.next() {
        Some(first) if first.ends_with('\n') && is_delimiter(first) => first.len(),
        _ => return FrontmatterResult::without_frontmatter(content),
    };
    let mut offset = fields_start;

    for line in lines {
        if is_delimiter(line) {
            let end = offset + line.len();
            return FrontmatterResult {
                block: Some(&content[..end]),
                fields: &content[fields_start..offset],
                body: &content[end..],
            };
        }
        offset += line.len();
    }

    log::debug!("Frontmatter opening delimiter found but no closing delimiter");
    FrontmatterResult::without_frontmatter(content)
}

/// Strip frontmatter from content, returning only the body.
///
/// ```rust
/// use coursebook_content::markdown::strip_frontmatter;
///
/// assert_eq!(strip_frontmatter("---\ntitle: Test\n---\n# Heading"), "# Heading");
/// assert_eq!(strip_frontmatter("# Just content"), "# Just content");
/// ```
pub fn strip_frontmatter(content: &str) -> &str {
    extract_frontmatter(content).body()
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == "---"
}

// ============================================================================
// Tests
// ============================================================================
