//! New chapter scaffolding.
//!
//! `create-chapter "Deploy with Render"` writes
//! `<source_dir>/deploy-with-render.md` from a template and registers a
//! chapter pointing at `/data/deploy-with-render.md` in the registry
//! manifest.

use std::path::{Path, PathBuf};

use coursebook_core::{Chapter, ChapterRegistry, Error, Result, slugify};

/// Description placed in new chapters until the author writes one.
pub const PLACEHOLDER_DESCRIPTION: &str = "TODO: Add a description for this chapter";

/// Result of scaffolding a chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedChapter {
    /// Markdown stub written.
    pub markdown_file: PathBuf,
    /// Registry manifest updated.
    pub registry: PathBuf,
    /// The registered entry.
    pub chapter: Chapter,
}

/// Render the markdown stub for a new chapter.
pub fn chapter_template(name: &str, slug: &str) -> String {
    format!(
        r#"---
id: {slug}
title: {name}
type: exercise
description: {PLACEHOLDER_DESCRIPTION}
---

# {name}

TODO: Add an introduction to this chapter.

## Section 1

TODO: Add content for this section.

### Instructions

1. TODO: Add step 1
2. TODO: Add step 2
3. TODO: Add step 3

## Section 2

TODO: Add content for the next section.

## Challenge: Apply Your Knowledge

**Goal:** TODO: Define the challenge goal.

### The Task

TODO: Describe what the learner needs to accomplish.

### Instructions

1. TODO: Add instruction 1
2. TODO: Add instruction 2

## Lesson Complete! 🎉

**Congratulations!** You have completed this lesson.

### Summary

You learned the following skills:

- TODO: Add skill 1
- TODO: Add skill 2
- TODO: Add skill 3

### Next Steps

TODO: Suggest what to explore next.
"#
    )
}

/// Create a chapter stub and register it.
///
/// `name` is the display title; its slug names the file and the chapter.
/// Nothing is written if the file or the registry entry already exists.
pub fn create_chapter(name: &str, source_dir: &Path, registry_path: &Path) -> Result<CreatedChapter> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::MissingArgument("chapter name"));
    }
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(Error::parse(format!(
            "Chapter name {name:?} has no letters or digits to build an id from"
        )));
    }

    let filename = format!("{slug}.md");
    let markdown_file = source_dir.join(&filename);
    if markdown_file.exists() {
        return Err(Error::DuplicateChapter { path: markdown_file });
    }

    let chapter = Chapter {
        id: slug.clone(),
        slug: slug.clone(),
        title: name.to_string(),
        description: PLACEHOLDER_DESCRIPTION.to_string(),
        lessons: Vec::new(),
        markdown_path: Some(format!("/data/{filename}")),
    };
    let mut registry = ChapterRegistry::load(registry_path)?;
    registry.register(chapter.clone())?;

    std::fs::create_dir_all(source_dir).map_err(|e| Error::io_with_path(e, source_dir))?;
    std::fs::write(&markdown_file, chapter_template(name, &slug))
        .map_err(|e| Error::io_with_path(e, &markdown_file))?;
    log::info!("Created chapter stub: {}", markdown_file.display());

    registry.save(registry_path)?;
    log::info!("Added chapter {slug} to {}", registry_path.display());

    Ok(CreatedChapter {
        markdown_file,
        registry: registry_path.to_path_buf(),
        chapter,
    })
}
