//! Parsed-chapter cache keyed by chapter id.

use std::collections::HashMap;

use coursebook_core::Chapter;

/// Chapters loaded from markdown, keyed by chapter id.
///
/// Entries are replaced whole and only ever invalidated all at once.
#[derive(Debug, Clone, Default)]
pub struct LessonCache {
    chapters: HashMap<String, Chapter>,
}

impl LessonCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached chapter for `chapter_id`.
    pub fn get(&self, chapter_id: &str) -> Option<&Chapter> {
        self.chapters.get(chapter_id)
    }

    /// Store `chapter` under its id, replacing any previous entry.
    pub fn insert(&mut self, chapter: Chapter) {
        self.chapters.insert(chapter.id.clone(), chapter);
    }

    /// Whether `chapter_id` is cached.
    pub fn contains(&self, chapter_id: &str) -> bool {
        self.chapters.contains_key(chapter_id)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.chapters.clear();
    }

    /// Number of cached chapters.
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn chapter(id: &str, title: &str) -> Chapter {
        Chapter {
            id: id.to_string(),
            slug: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            lessons: Vec::new(),
            markdown_path: None,
        }
    }

    #[test]
    fn test_insert_replaces_whole_entry() {
        let mut cache = LessonCache::new();
        cache.insert(chapter("sql", "First"));
        cache.insert(chapter("sql", "Second"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("sql").unwrap().title, "Second");
    }

    #[test]
    fn test_clear() {
        let mut cache = LessonCache::new();
        cache.insert(chapter("a", "A"));
        cache.insert(chapter("b", "B"));
        assert!(cache.contains("a"));

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
    }
}
