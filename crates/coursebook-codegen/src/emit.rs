//! Source-module emission for parsed lessons.
//!
//! Two renderings of the same [`Lesson`] values:
//!
//! - TypeScript: `export const NAME: Lesson[] = [...]` importing the
//!   `Lesson` type from `../types`. Plain strings are JSON string literals;
//!   `content` and snippet `code` are template literals.
//! - JSON: `serde_json` pretty output of the records.
//!
//! Template literals are escaped so that evaluating them yields exactly the
//! parsed string, with no extra leading or trailing newline.

use coursebook_core::{CodeSnippet, Lesson, Result};

/// Import line at the top of every TypeScript module.
pub const TS_IMPORT: &str = "import { Lesson } from '../types';";

/// Generated module flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// TypeScript module exporting a named constant.
    #[default]
    TypeScript,
    /// Bare JSON document.
    Json,
}

impl OutputFormat {
    /// File extension for generated modules, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::Json => "json",
        }
    }
}

/// Render one lesson as a module exporting `constant`.
pub fn render_lesson(lesson: &Lesson, constant: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::TypeScript => Ok(lesson_module(lesson, constant)),
        OutputFormat::Json => json_document(lesson),
    }
}

/// Render a chapter's lessons as a module exporting `constant`.
pub fn render_lessons(lessons: &[Lesson], constant: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::TypeScript => Ok(lessons_module(lessons, constant)),
        OutputFormat::Json => json_document(lessons),
    }
}

fn json_document<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// `export const NAME: Lesson = {...};`
pub fn lesson_module(lesson: &Lesson, constant: &str) -> String {
    let mut out = ModuleWriter::new();
    out.line(0, &format!("export const {constant}: Lesson = {{"));
    out.lesson_fields(lesson, 1);
    out.line(0, "};");
    out.finish()
}

/// `export const NAME: Lesson[] = [...];`
pub fn lessons_module(lessons: &[Lesson], constant: &str) -> String {
    let mut out = ModuleWriter::new();
    out.line(0, &format!("export const {constant}: Lesson[] = ["));
    for (i, lesson) in lessons.iter().enumerate() {
        out.line(1, "{");
        out.lesson_fields(lesson, 2);
        out.line(1, if i + 1 < lessons.len() { "}," } else { "}" });
    }
    out.line(0, "];");
    out.finish()
}

/// Escape text for the body of a JavaScript template literal.
///
/// Backslash, backtick, and `$` are escaped, and so is `\r` (a raw carriage
/// return would be normalised to `\n` when the literal is evaluated).
///
/// ```rust
/// use coursebook_codegen::emit::escape_template_literal;
///
/// assert_eq!(escape_template_literal("say `${name}`"), "say \\`\\${name}\\`");
/// assert_eq!(escape_template_literal("C:\\path"), "C:\\\\path");
/// ```
pub fn escape_template_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '`' => escaped.push_str("\\`"),
            '$' => escaped.push_str("\\$"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A JSON string literal, which is also a valid TypeScript string literal.
pub fn string_literal(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}

fn template_literal(text: &str) -> String {
    format!("`{}`", escape_template_literal(text))
}

/// Line-oriented builder for one TypeScript module.
struct ModuleWriter {
    out: String,
}

impl ModuleWriter {
    fn new() -> Self {
        let mut out = String::new();
        out.push_str(TS_IMPORT);
        out.push_str("\n\n");
        Self { out }
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Object properties; the caller writes the braces.
    fn lesson_fields(&mut self, lesson: &Lesson, depth: usize) {
        let mut fields = vec![
            format!("id: {}", string_literal(&lesson.id)),
            format!("title: {}", string_literal(&lesson.title)),
            format!("description: {}", string_literal(&lesson.description)),
            format!("type: {}", string_literal(lesson.lesson_type.as_str())),
            format!("content: {}", template_literal(&lesson.content)),
        ];
        if let Some(challenges) = lesson.challenges.as_ref().filter(|c| !c.is_empty()) {
            let items: Vec<_> = challenges.iter().map(|c| string_literal(c)).collect();
            fields.push(format!("challenges: [{}]", items.join(", ")));
        }
        if let Some(link) = &lesson.external_link {
            fields.push(format!(
                "externalLink: {{ url: {}, label: {} }}",
                string_literal(&link.url),
                string_literal(&link.label)
            ));
        }

        let snippets = lesson.snippets();
        let last = fields.len() - 1;
        for (i, field) in fields.iter().enumerate() {
            let comma = if i < last || !snippets.is_empty() { "," } else { "" };
            self.line(depth, &format!("{field}{comma}"));
        }

        if !snippets.is_empty() {
            self.line(depth, "codeSnippets: [");
            for (i, snippet) in snippets.iter().enumerate() {
                self.line(depth + 1, "{");
                self.snippet_fields(snippet, depth + 2);
                self.line(depth + 1, if i + 1 < snippets.len() { "}," } else { "}" });
            }
            self.line(depth, "]");
        }
    }

    fn snippet_fields(&mut self, snippet: &CodeSnippet, depth: usize) {
        let mut fields = vec![format!("language: {}", string_literal(&snippet.language))];
        if let Some(summary) = &snippet.summary {
            fields.push(format!("summary: {}", string_literal(summary)));
        }
        fields.push(format!("code: {}", template_literal(&snippet.code)));
        if let Some(description) = &snippet.description {
            fields.push(format!("description: {}", string_literal(description)));
        }

        let last = fields.len() - 1;
        for (i, field) in fields.iter().enumerate() {
            let comma = if i < last { "," } else { "" };
            self.line(depth, &format!("{field}{comma}"));
        }
    }

    fn finish(self) -> String {
        self.out
    }
}
