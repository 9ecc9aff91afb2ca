//! Slug and identifier utilities.
//!
//! Every id derived from free text (lesson ids, chapter file names) goes
//! through [`slugify`]; generated module constants go through
//! [`constant_name`].

use std::path::Path;

/// Convert free text into a lowercase, hyphen-separated slug.
///
/// Performs the following transformations:
/// 1. Converts to lowercase
/// 2. Replaces every run of characters outside `[a-z0-9]` with one hyphen
/// 3. Strips leading and trailing hyphens
///
/// The result always matches `^[a-z0-9-]*$` and may be empty when the input
/// has no ASCII letters or digits. Applying it twice gives the same result
/// as applying it once.
///
/// # Examples
///
/// ```
/// use coursebook_core::util::ids::slugify;
///
/// assert_eq!(slugify("Hello World! Lesson 1"), "hello-world-lesson-1");
/// assert_eq!(slugify("I ❤️ React & TypeScript! (v2.0)"), "i-react-typescript-v2-0");
/// assert_eq!(slugify("snake_case_name"), "snake-case-name");
/// assert_eq!(slugify("??? !!!"), "");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Name used when an id has no characters to build a constant from.
pub const FALLBACK_CONSTANT: &str = "LESSON";

/// Convert an id into an upper-snake constant name.
///
/// The result is always a valid identifier: a leading digit gets a `_`
/// prefix, and an empty result becomes [`FALLBACK_CONSTANT`].
///
/// ```
/// use coursebook_core::util::ids::constant_name;
///
/// assert_eq!(constant_name("sql-intro_LESSONS"), "SQL_INTRO_LESSONS");
/// assert_eq!(constant_name("deploy with v2.0"), "DEPLOY_WITH_V2_0");
/// assert_eq!(constant_name("101-intro"), "_101_INTRO");
/// ```
pub fn constant_name(id: &str) -> String {
    let upper = id.to_uppercase();
    let mut name = String::with_capacity(upper.len());
    let mut in_run = false;

    for c in upper.chars() {
        if c.is_ascii_uppercase() || c.is_ascii_digit() {
            name.push(c);
            in_run = false;
        } else if !in_run {
            name.push('_');
            in_run = true;
        }
    }

    if name.is_empty() {
        return FALLBACK_CONSTANT.to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// The file stem of a path, if it has a UTF-8 one.
///
/// ```
/// use std::path::Path;
/// use coursebook_core::util::ids::file_stem;
///
/// assert_eq!(file_stem(Path::new("public/data/sql-intro.md")), Some("sql-intro"));
/// assert_eq!(file_stem(Path::new("/")), None);
/// ```
pub fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}
