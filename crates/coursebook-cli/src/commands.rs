//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use coursebook_codegen::{
    BatchStats, ChapterGenerator, GeneratedModule, OutputFormat, generate_chapter, generate_lesson,
};
use coursebook_core::{Chapter, ChapterRegistry, CourseConfig};
use coursebook_loader::{ChapterSource, HttpFetcher, LoadMode, lesson_context_prompt};

/// `parse-lesson`: one document, one lesson.
pub fn parse_lesson(input: &Path, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let module = generate_lesson(input, format)?;
    emit(&module, output)?;
    tracing::info!("Lesson {} exported as {}", module.id, module.constant);
    Ok(())
}

/// `parse-chapter`: one chapter document, one lesson array.
pub fn parse_chapter(config: &CourseConfig, input: &Path, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let module = generate_chapter(input, format, &config.loader.asset_base)?;
    for lesson in &module.lessons {
        tracing::info!("  {}: {} ({})", lesson.id, lesson.title, lesson.lesson_type.as_str());
    }
    emit(&module, output)?;
    tracing::info!(
        "Chapter {} exported {} lesson(s) as {}",
        module.id,
        module.lessons.len(),
        module.constant
    );
    Ok(())
}

fn emit(module: &GeneratedModule, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            module.write_to(path)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", module.text),
    }
    Ok(())
}

/// `parse-all`: batch generation.
pub fn parse_all(
    config: &CourseConfig,
    files: Vec<PathBuf>,
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    format: OutputFormat,
) -> Result<BatchStats> {
    let mut content = config.content.clone();
    if let Some(dir) = source_dir {
        content.source_dir = dir;
    }
    if let Some(dir) = output_dir {
        content.output_dir = dir;
    }

    let mut generator = ChapterGenerator::from_config(&content)
        .with_format(format)
        .with_asset_base(&config.loader.asset_base);
    if !files.is_empty() {
        generator = generator.with_sources(files);
    }

    Ok(generator.run()?)
}

/// Print the outcome of a batch run.
pub fn print_batch_summary(stats: &BatchStats) {
    if stats.files_found == 0 {
        println!("No chapter sources found.");
        return;
    }
    for module in &stats.written {
        println!("{} -> {} ({} lessons)", module.source.display(), module.output.display(), module.lesson_ids.len());
    }
    for skipped in &stats.skipped {
        println!("{} skipped: no chapter id", skipped.display());
    }
    println!(
        "Generated {} module(s) with {} lesson(s); {} skipped",
        stats.written.len(),
        stats.lesson_count(),
        stats.skipped.len()
    );
}

/// `create-chapter`: scaffold and register.
pub fn create_chapter(config: &CourseConfig, name: &str) -> Result<()> {
    let created = coursebook_codegen::create_chapter(name, &config.content.source_dir, &config.content.registry)?;

    println!("Created {}", created.markdown_file.display());
    println!("Registered chapter '{}' in {}", created.chapter.id, created.registry.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to add your content", created.markdown_file.display());
    println!("  2. Run `coursebook parse-all` to generate the lesson module");
    Ok(())
}

/// `load`: resolve registry chapters with the run-time loader.
pub async fn load_chapters(config: &CourseConfig, chapter_ids: &[String], markdown: bool) -> Result<Vec<Chapter>> {
    let registry = ChapterRegistry::load(&config.content.registry)?;
    let selected = select_chapters(&registry, chapter_ids)?;

    let mut source = ChapterSource::new(HttpFetcher::new()?, &config.loader);
    if markdown {
        source.set_mode(LoadMode::Markdown);
    }
    Ok(source.resolve_all(&selected).await)
}

fn select_chapters(registry: &ChapterRegistry, chapter_ids: &[String]) -> Result<Vec<Chapter>> {
    if chapter_ids.is_empty() {
        return Ok(registry.chapters().to_vec());
    }
    chapter_ids
        .iter()
        .map(|id| {
            registry
                .get(id)
                .cloned()
                .with_context(|| format!("Chapter '{id}' is not registered"))
        })
        .collect()
}

/// `prompt`: tutor context for one lesson.
pub async fn tutor_prompt(
    config: &CourseConfig,
    chapter_id: &str,
    lesson_id: &str,
    question: Option<&str>,
    markdown: bool,
) -> Result<String> {
    let chapters = load_chapters(config, &[chapter_id.to_string()], markdown).await?;
    let Some(chapter) = chapters.first() else {
        bail!("Chapter '{chapter_id}' is not registered");
    };
    let Some(lesson) = chapter.lessons.iter().find(|l| l.id == lesson_id) else {
        bail!("Lesson '{lesson_id}' not found in chapter '{chapter_id}'");
    };
    Ok(lesson_context_prompt(lesson, &[], question))
}
