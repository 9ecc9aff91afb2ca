//! Lesson, code snippet, and chapter records.
//!
//! These are immutable value objects: a parse produces fresh values and
//! nothing downstream mutates them in place. Field names serialise in
//! camelCase so the JSON form matches what the presentation layer reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// LessonType
// ============================================================================

/// Kind of lesson, driving iconography and behaviour downstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LessonType {
    /// Plain reading material.
    #[default]
    Reading,
    /// Hands-on exercise.
    Exercise,
    /// Open-ended challenge.
    Challenge,
    /// Environment or tooling setup.
    Setup,
}

impl LessonType {
    /// All lesson types, in declaration order.
    pub const ALL: [LessonType; 4] = [
        LessonType::Reading,
        LessonType::Exercise,
        LessonType::Challenge,
        LessonType::Setup,
    ];

    /// Parse a frontmatter value, collapsing anything unrecognised to
    /// [`LessonType::Reading`].
    ///
    /// Matching is exact: no trimming or case folding happens here.
    ///
    /// ```
    /// use coursebook_core::LessonType;
    ///
    /// assert_eq!(LessonType::parse_or_default("challenge"), LessonType::Challenge);
    /// assert_eq!(LessonType::parse_or_default("Challenge"), LessonType::Reading);
    /// assert_eq!(LessonType::parse_or_default("quiz"), LessonType::Reading);
    /// ```
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    /// The wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Reading => "reading",
            LessonType::Exercise => "exercise",
            LessonType::Challenge => "challenge",
            LessonType::Setup => "setup",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no lesson type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLessonType(pub String);

impl fmt::Display for UnknownLessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown lesson type: {}", self.0)
    }
}

impl std::error::Error for UnknownLessonType {}

impl FromStr for LessonType {
    type Err = UnknownLessonType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LessonType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownLessonType(s.to_string()))
    }
}

impl From<String> for LessonType {
    fn from(raw: String) -> Self {
        LessonType::parse_or_default(&raw)
    }
}

// ============================================================================
// Records
// ============================================================================

/// One fenced code example attached to a lesson.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    /// Fence language tag, trimmed.
    pub language: String,
    /// Fence body, trimmed. May be empty.
    pub code: String,
    /// Disclosure label. When present the snippet starts hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// `"Snippet for: {summary}"` for extracted snippets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CodeSnippet {
    /// Build a hidden snippet, deriving the description from the summary.
    pub fn hidden(
        language: impl Into<String>,
        summary: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        let summary = summary.into();
        Self {
            language: language.into(),
            code: code.into(),
            description: Some(format!("Snippet for: {summary}")),
            summary: Some(summary),
        }
    }
}

/// Outbound link shown alongside a lesson.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    /// Target URL.
    pub url: String,
    /// Button label.
    pub label: String,
}

/// One teachable unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Slug, unique within its chapter.
    pub id: String,
    /// Display name.
    pub title: String,
    /// One-line summary.
    #[serde(default)]
    pub description: String,
    /// Lesson kind.
    #[serde(rename = "type", default)]
    pub lesson_type: LessonType,
    /// Markdown body with frontmatter and hidden snippets removed.
    #[serde(default)]
    pub content: String,
    /// Extracted snippets in source order; `None` when there were none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippets: Option<Vec<CodeSnippet>>,
    /// Hand-authored challenge prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<String>>,
    /// Hand-authored outbound link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<ExternalLink>,
}

impl Lesson {
    /// Snippets as a slice, empty when absent.
    pub fn snippets(&self) -> &[CodeSnippet] {
        self.code_snippets.as_deref().unwrap_or_default()
    }
}

/// An ordered grouping of lessons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Chapter identifier; cache key for the run-time loader.
    pub id: String,
    /// URL slug. By convention equal to the markdown file stem.
    pub slug: String,
    /// Display name.
    pub title: String,
    /// One-line summary.
    #[serde(default)]
    pub description: String,
    /// Pre-generated lessons, or empty pending a dynamic load.
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    /// Markdown source to fetch in live-content mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_path: Option<String>,
}

impl Chapter {
    /// Copy of this chapter with its lessons replaced.
    pub fn with_lessons(&self, lessons: Vec<Lesson>) -> Self {
        Self {
            lessons,
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // LessonType
    // ------------------------------------------------------------------------

    #[test]
    fn test_lesson_type_parse_known() {
        for t in LessonType::ALL {
            assert_eq!(LessonType::parse_or_default(t.as_str()), t);
        }
    }

    #[test]
    fn test_lesson_type_parse_unknown_falls_back() {
        assert_eq!(
            LessonType::parse_or_default("invalid-type-name"),
            LessonType::Reading
        );
        assert_eq!(LessonType::parse_or_default(""), LessonType::Reading);
        assert_eq!(LessonType::parse_or_default(" setup"), LessonType::Reading);
    }

    #[test]
    fn test_lesson_type_from_str_rejects_unknown() {
        let err = "quiz".parse::<LessonType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown lesson type: quiz");
    }

    #[test]
    fn test_lesson_type_deserialize_invalid_collapses() {
        let t: LessonType = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(t, LessonType::Reading);
        let t: LessonType = serde_json::from_str("\"setup\"").unwrap();
        assert_eq!(t, LessonType::Setup);
    }

    // ------------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------------

    #[test]
    fn test_lesson_serializes_camel_case_and_omits_absent() {
        let lesson = Lesson {
            id: "c-intro".to_string(),
            title: "Intro".to_string(),
            description: String::new(),
            lesson_type: LessonType::Exercise,
            content: "Body".to_string(),
            code_snippets: Some(vec![CodeSnippet::hidden("ts", "Solution", "let a = 1;")]),
            challenges: None,
            external_link: None,
        };

        let json = serde_json::to_value(&lesson).unwrap();
        assert_eq!(json["type"], "exercise");
        assert_eq!(json["codeSnippets"][0]["description"], "Snippet for: Solution");
        assert!(json.get("challenges").is_none());
        assert!(json.get("externalLink").is_none());
    }

    #[test]
    fn test_chapter_deserializes_with_defaults() {
        let json = r#"{"id":"sql-intro","slug":"sql-intro","title":"SQL Intro",
            "markdownPath":"/data/sql-intro.md"}"#;
        let chapter: Chapter = serde_json::from_str(json).unwrap();
        assert!(chapter.lessons.is_empty());
        assert_eq!(chapter.description, "");
        assert_eq!(chapter.markdown_path.as_deref(), Some("/data/sql-intro.md"));
    }

    #[test]
    fn test_snippets_empty_when_absent() {
        let lesson: Lesson =
            serde_json::from_str(r#"{"id":"a","title":"A","type":"reading"}"#).unwrap();
        assert!(lesson.snippets().is_empty());
    }
}
