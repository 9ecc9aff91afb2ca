//! Single-document generation.
//!
//! [`generate_lesson`] treats a file as one lesson; [`generate_chapter`]
//! splits it into a lesson array. Both return the rendered module for the
//! caller to print or write.

use std::path::{Path, PathBuf};

use coursebook_content::{convert_markdown_to_lesson, parse_chapter_document};
use coursebook_core::util::ids::file_stem;
use coursebook_core::{Error, Lesson, Result, constant_name};

use crate::emit::{OutputFormat, render_lesson, render_lessons};

/// A rendered module and what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Exported constant name.
    pub constant: String,
    /// Lesson id (single lesson) or chapter id (chapter).
    pub id: String,
    /// Lessons rendered into the module.
    pub lessons: Vec<Lesson>,
    /// Module text.
    pub text: String,
}

impl GeneratedModule {
    /// Write the module, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_module(path, &self.text)
    }
}

/// Generate a single-lesson module from one markdown file.
///
/// The constant is derived from the lesson id.
pub fn generate_lesson(input: &Path, format: OutputFormat) -> Result<GeneratedModule> {
    let markdown = read_source(input)?;
    let lesson = convert_markdown_to_lesson(&markdown);
    let constant = constant_name(&lesson.id);
    let text = render_lesson(&lesson, &constant, format)?;

    Ok(GeneratedModule {
        constant,
        id: lesson.id.clone(),
        lessons: vec![lesson],
        text,
    })
}

/// Generate a lesson-array module from one chapter file.
///
/// The chapter id comes from the frontmatter, or the file stem when the
/// frontmatter has none; the constant is `{CHAPTER_ID}_LESSONS`.
pub fn generate_chapter(input: &Path, format: OutputFormat, asset_base: &str) -> Result<GeneratedModule> {
    let markdown = read_source(input)?;
    let stem = file_stem(input)
        .ok_or_else(|| Error::parse(format!("Source has no file name: {}", input.display())))?;

    let parsed = parse_chapter_document(&markdown, asset_base, Some(stem));
    let id = parsed.meta.chapter_id.unwrap_or_else(|| stem.to_string());
    let constant = constant_name(&format!("{id}_LESSONS"));
    let text = render_lessons(&parsed.lessons, &constant, format)?;

    Ok(GeneratedModule {
        constant,
        id,
        lessons: parsed.lessons,
        text,
    })
}

/// `<output_dir>/<stem>-lessons.<ext>` for a chapter source.
pub fn output_path_for(source: &Path, output_dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    let stem = file_stem(source)
        .ok_or_else(|| Error::parse(format!("Source has no file name: {}", source.display())))?;
    Ok(output_dir.join(format!("{stem}-lessons.{}", format.extension())))
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))
}

pub(crate) fn write_module(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    std::fs::write(path, text).map_err(|e| Error::io_with_path(e, path))
}
