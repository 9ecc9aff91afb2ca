//! The chapter registry manifest.
//!
//! The registry is the ordered list of chapters the presentation layer
//! consumes. On disk it is a JSON array of [`Chapter`] records; each entry
//! either carries pre-generated lessons or a `markdownPath` for live loading.

use std::path::Path;

use crate::types::Chapter;
use crate::{Error, Result};

/// Ordered, read-only-after-load list of chapters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterRegistry {
    chapters: Vec<Chapter>,
}

impl ChapterRegistry {
    /// Create a registry from chapters in display order.
    pub fn new(chapters: Vec<Chapter>) -> Self {
        Self { chapters }
    }

    /// Load a registry manifest.
    ///
    /// A missing file is an empty registry, so the first `create-chapter`
    /// in a fresh project can create it.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let chapters: Vec<Chapter> = serde_json::from_str(&content)
            .map_err(|e| Error::parse(format!("Invalid registry {}: {e}", path.display())))?;

        Ok(Self { chapters })
    }

    /// Write the manifest, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
        }

        let mut content = serde_json::to_string_pretty(&self.chapters)?;
        content.push('\n');
        std::fs::write(path, content).map_err(|e| Error::io_with_path(e, path))?;

        Ok(())
    }

    /// All chapters in display order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Look up a chapter by id.
    pub fn get(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Look up a chapter by slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.slug == slug)
    }

    /// Append a chapter. Ids must be unique.
    pub fn register(&mut self, chapter: Chapter) -> Result<()> {
        if self.get(&chapter.id).is_some() {
            return Err(Error::DuplicateChapter {
                path: chapter.id.into(),
            });
        }
        self.chapters.push(chapter);
        Ok(())
    }

    /// Number of chapters.
    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Whether the registry has no chapters.
    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

impl From<Vec<Chapter>> for ChapterRegistry {
    fn from(chapters: Vec<Chapter>) -> Self {
        Self::new(chapters)
    }
}
