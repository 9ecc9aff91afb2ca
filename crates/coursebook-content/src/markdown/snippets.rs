//! Hidden-snippet extraction.
//!
//! A hidden snippet is a fenced code block whose info string is
//! `language:summary`:
//!
//! ````markdown
//! ```sql:Show Me the Query
//! SELECT name FROM world;
//! ```
//! ````
//!
//! Each one is lifted out of the visible content into a [`CodeSnippet`] whose
//! summary labels the disclosure control. Plain fences (no colon in the info
//! string) stay in the content untouched.
//!
//! The body runs up to the first following line that is exactly a
//! triple-backtick fence, so backticks inside the code do not end it. The
//! language never contains a colon; the first colon always separates
//! language from summary.

use std::sync::LazyLock;

use coursebook_core::CodeSnippet;
use regex::Regex;

/// Opening fence `lang:summary` at a line start, lazily captured body,
/// closing fence line.
static HIDDEN_SNIPPET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^```[ \t]*([A-Za-z0-9_]+)[ \t]*:[ \t]*([^\n]*[^\s])[ \t\r]*\n(?s:(.*?))^```[ \t\r]*$",
    )
    .expect("Invalid hidden snippet regex")
});

/// Output of [`extract_hidden_snippets`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetExtraction {
    /// Input with every hidden block removed.
    pub content: String,
    /// Extracted snippets in order of appearance.
    pub snippets: Vec<CodeSnippet>,
}

impl SnippetExtraction {
    /// Snippets as an `Option`, `None` when nothing was extracted.
    pub fn into_parts(self) -> (String, Option<Vec<CodeSnippet>>) {
        let snippets = (!self.snippets.is_empty()).then_some(self.snippets);
        (self.content, snippets)
    }
}

/// Extract hidden snippets from a markdown body.
///
/// Each matched block, from its opening fence to its closing fence, is
/// replaced by nothing. An unterminated hidden fence does not match and
/// stays in the content.
///
/// ```rust
/// use coursebook_content::markdown::extract_hidden_snippets;
///
/// let body = "Intro\n```ts:Solution Code\nconst a = 1;\n```\nOutro";
/// let result = extract_hidden_snippets(body);
///
/// assert_eq!(result.snippets.len(), 1);
/// assert_eq!(result.snippets[0].code, "const a = 1;");
/// assert_eq!(result.content, "Intro\n\nOutro");
/// ```
pub fn extract_hidden_snippets(body: &str) -> SnippetExtraction {
    let mut content = String::with_capacity(body.len());
    let mut snippets = Vec::new();
    let mut last = 0;

    for caps in HIDDEN_SNIPPET_RE.captures_iter(body) {
        let (Some(whole), Some(language), Some(summary)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let code = caps.get(3).map_or("", |m| m.as_str());

        content.push_str(&body[last..whole.start()]);
        last = whole.end();

        snippets.push(CodeSnippet::hidden(
            language.as_str().trim(),
            summary.as_str().trim(),
            code.trim(),
        ));
    }
    content.push_str(&body[last..]);

    SnippetExtraction { content, snippets }
}
