//! Coursebook CLI - chapter authoring and lesson generation.

mod commands;
mod config_handlers;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use coursebook_codegen::OutputFormat;
use coursebook_core::CourseConfig;

#[derive(Parser)]
#[command(name = "coursebook")]
#[command(about = "Turn markdown chapters into lesson modules")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Generated module format
    #[arg(long, value_enum, global = true, default_value_t = Format::Ts)]
    format: Format,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// TypeScript module exporting a typed constant
    Ts,
    /// Plain JSON
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Ts => OutputFormat::TypeScript,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one markdown document into a single-lesson module
    ParseLesson {
        /// Markdown source
        input: PathBuf,

        /// Output file (prints to stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Convert one chapter document into a lesson-array module
    ParseChapter {
        /// Chapter markdown source
        input: PathBuf,

        /// Output file (prints to stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Generate modules for every chapter in the source directory
    ParseAll {
        /// Process only these files
        files: Vec<PathBuf>,

        /// Directory to scan for chapter sources
        #[arg(long)]
        source_dir: Option<PathBuf>,

        /// Directory generated modules are written to
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Scaffold a new chapter and register it
    CreateChapter {
        /// Chapter name, e.g. "Deploy with Render"
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Resolve registry chapters and print them as JSON
    Load {
        /// Chapter ids (all registered chapters when omitted)
        chapter_ids: Vec<String>,

        /// Load from markdown regardless of configuration
        #[arg(long)]
        markdown: bool,
    },

    /// Print the tutor prompt for a lesson
    Prompt {
        /// Chapter id
        chapter_id: String,

        /// Lesson id within the chapter
        lesson_id: String,

        /// Learner question
        question: Option<String>,

        /// Load from markdown regardless of configuration
        #[arg(long)]
        markdown: bool,
    },

    /// Inspect or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the config file that would be read
    Path,

    /// Print the resolved configuration
    Show,

    /// Print a value by dotted key
    Get {
        /// Dotted key, e.g. loader.base_url
        key: String,
    },

    /// Set a value by dotted key
    Set {
        /// Dotted key, e.g. loader.base_url
        key: String,

        /// New value
        value: String,
    },

    /// Write a default config file
    Init {
        /// Target file (defaults to ./coursebook.toml)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    let format = OutputFormat::from(cli.format);

    match cli.command {
        Commands::Config { action } => {
            config_handlers::handle_config_command(config_path, action)?;
        }

        Commands::ParseLesson { input, output } => {
            commands::parse_lesson(&input, output.as_deref(), format)?;
        }

        Commands::ParseChapter { input, output } => {
            let config = CourseConfig::load(config_path)?;
            commands::parse_chapter(&config, &input, output.as_deref(), format)?;
        }

        Commands::ParseAll {
            files,
            source_dir,
            output_dir,
        } => {
            let config = CourseConfig::load(config_path)?;
            let stats = commands::parse_all(&config, files, source_dir, output_dir, format)?;
            commands::print_batch_summary(&stats);
        }

        Commands::CreateChapter { name } => {
            let config = CourseConfig::load(config_path)?;
            commands::create_chapter(&config, &name.join(" "))?;
        }

        Commands::Load { chapter_ids, markdown } => {
            let config = CourseConfig::load(config_path)?;
            let chapters = commands::load_chapters(&config, &chapter_ids, markdown).await?;
            println!("{}", serde_json::to_string_pretty(&chapters)?);
        }

        Commands::Prompt {
            chapter_id,
            lesson_id,
            question,
            markdown,
        } => {
            let config = CourseConfig::load(config_path)?;
            let prompt =
                commands::tutor_prompt(&config, &chapter_id, &lesson_id, question.as_deref(), markdown).await?;
            println!("{prompt}");
        }
    }

    Ok(())
}
