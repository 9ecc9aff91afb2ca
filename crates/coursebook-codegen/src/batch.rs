//! Batch generation over a directory of chapter sources.
//!
//! The generator:
//!
//! 1. Discovers `*.md` sources (or takes an explicit list)
//! 2. Plans one output module per source, rejecting duplicate outputs
//! 3. Parses each source and writes `<stem>-lessons.<ext>`
//!
//! A source without a chapter `id` is skipped with a warning. Filesystem
//! failures and duplicate outputs abort the run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use coursebook_content::parse_chapter_document;
use coursebook_core::util::ids::file_stem;
use coursebook_core::{ContentConfig, Error, Result, constant_name};

use crate::discover::discover_sources;
use crate::emit::{OutputFormat, render_lessons};
use crate::generate::{output_path_for, read_source, write_module};

/// One module written by a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenModule {
    /// Chapter source file.
    pub source: PathBuf,
    /// Generated module file.
    pub output: PathBuf,
    /// Chapter id from the source frontmatter.
    pub chapter_id: String,
    /// Exported constant name.
    pub constant: String,
    /// Lesson ids in section order.
    pub lesson_ids: Vec<String>,
}

/// Statistics from a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Sources found.
    pub files_found: usize,
    /// Modules written.
    pub written: Vec<WrittenModule>,
    /// Sources skipped for lacking a chapter id.
    pub skipped: Vec<PathBuf>,
}

impl BatchStats {
    /// Total lessons across written modules.
    pub fn lesson_count(&self) -> usize {
        self.written.iter().map(|m| m.lesson_ids.len()).sum()
    }
}

/// Builder for a batch generation run.
#[derive(Debug, Clone)]
pub struct ChapterGenerator {
    source_dir: PathBuf,
    output_dir: PathBuf,
    sources: Option<Vec<PathBuf>>,
    exclude_prefix: String,
    format: OutputFormat,
    asset_base: String,
}

impl ChapterGenerator {
    /// Generator reading `source_dir` and writing into `output_dir`.
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            sources: None,
            exclude_prefix: String::new(),
            format: OutputFormat::default(),
            asset_base: "/".to_string(),
        }
    }

    /// Generator configured from the `[content]` table.
    pub fn from_config(content: &ContentConfig) -> Self {
        Self::new(&content.source_dir, &content.output_dir).with_exclude_prefix(&content.exclude_prefix)
    }

    /// Skip sources whose file name starts with `prefix`.
    pub fn with_exclude_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.exclude_prefix = prefix.into();
        self
    }

    /// Process exactly these files instead of discovering.
    pub fn with_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the prefix for `/data/` and `/assets/` links.
    pub fn with_asset_base(mut self, asset_base: impl Into<String>) -> Self {
        self.asset_base = asset_base.into();
        self
    }

    /// Directory scanned when no explicit sources were given.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Run the batch.
    pub fn run(&self) -> Result<BatchStats> {
        let files = match &self.sources {
            Some(sources) => sources.clone(),
            None => discover_sources(&self.source_dir, &self.exclude_prefix)?,
        };

        let mut stats = BatchStats {
            files_found: files.len(),
            ..BatchStats::default()
        };
        if files.is_empty() {
            log::info!("No markdown files found in {}", self.source_dir.display());
            return Ok(stats);
        }

        let plan = self.plan(&files)?;
        log::info!("Parsing {} markdown file(s)", plan.len());

        for (source, output) in plan {
            match self.process_file(&source, &output)? {
                Some(module) => stats.written.push(module),
                None => stats.skipped.push(source),
            }
        }

        Ok(stats)
    }

    /// Pair each source with its output path; two sources may not share one.
    fn plan(&self, files: &[PathBuf]) -> Result<Vec<(PathBuf, PathBuf)>> {
        let mut seen = HashSet::new();
        let mut plan = Vec::with_capacity(files.len());
        for source in files {
            let output = output_path_for(source, &self.output_dir, self.format)?;
            if !seen.insert(output.clone()) {
                return Err(Error::DuplicateOutput { path: output });
            }
            plan.push((source.clone(), output));
        }
        Ok(plan)
    }

    fn process_file(&self, source: &Path, output: &Path) -> Result<Option<WrittenModule>> {
        let markdown = read_source(source)?;
        let parsed = parse_chapter_document(&markdown, &self.asset_base, None);

        let Some(chapter_id) = parsed.meta.chapter_id else {
            log::warn!("No chapter ID found in {}, skipping", source.display());
            return Ok(None);
        };

        log::info!(
            "Processing {}: {}",
            source.display(),
            parsed.meta.title.as_deref().unwrap_or(&chapter_id)
        );
        for lesson in &parsed.lessons {
            log::info!("  {}: {}", lesson.id, lesson.title);
        }

        let stem = file_stem(source).unwrap_or(&chapter_id);
        let constant = constant_name(&format!("{stem}_LESSONS"));
        let text = render_lessons(&parsed.lessons, &constant, self.format)?;
        write_module(output, &text)?;

        log::info!("Wrote {} lesson(s) to {}", parsed.lessons.len(), output.display());

        Ok(Some(WrittenModule {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            chapter_id,
            constant,
            lesson_ids: parsed.lessons.into_iter().map(|l| l.id).collect(),
        }))
    }
}
