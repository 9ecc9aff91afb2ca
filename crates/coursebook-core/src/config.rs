//! TOML configuration with environment overrides.
//!
//! ```toml
//! [content]
//! source_dir = "public/data"
//! output_dir = "data"
//! registry = "data/chapters.json"
//! exclude_prefix = "test"
//!
//! [loader]
//! base_url = "http://localhost:5173/"
//! asset_base = "/"
//! markdown_mode = false
//! ```
//!
//! Every field has a default, so an empty or absent file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "coursebook.toml";

/// Environment variable toggling live markdown mode.
pub const ENV_USE_MARKDOWN: &str = "COURSEBOOK_USE_MARKDOWN";

/// Environment variable overriding the loader base URL.
pub const ENV_BASE_URL: &str = "COURSEBOOK_BASE_URL";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    /// Authoring and generation paths.
    pub content: ContentConfig,
    /// Run-time loader settings.
    pub loader: LoaderConfig,
}

/// Where chapter sources live and where generated output goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory scanned for `*.md` chapter sources.
    pub source_dir: PathBuf,
    /// Directory receiving generated `<stem>-lessons.ts` modules.
    pub output_dir: PathBuf,
    /// Chapter registry manifest.
    pub registry: PathBuf,
    /// Source files whose name starts with this are skipped.
    pub exclude_prefix: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("public/data"),
            output_dir: PathBuf::from("data"),
            registry: PathBuf::from("data/chapters.json"),
            exclude_prefix: "test".to_string(),
        }
    }
}

/// Settings for fetching markdown at run time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Base URL that `markdownPath` values are resolved against.
    pub base_url: String,
    /// Prefix substituted into `](/data/` and `](/assets/` links.
    pub asset_base: String,
    /// Whether chapters are loaded from markdown instead of static lessons.
    pub markdown_mode: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173/".to_string(),
            asset_base: "/".to_string(),
            markdown_mode: false,
        }
    }
}

impl CourseConfig {
    /// Load configuration and apply environment overrides.
    ///
    /// An explicit path must exist. Without one, `./coursebook.toml` is used
    /// when present, otherwise defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(config_path) {
            Some(path) => Self::load_from_path(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// The file [`CourseConfig::load`] would read, if any.
    pub fn resolve_config_path(config_path: Option<&str>) -> Option<PathBuf> {
        match config_path {
            Some(p) => Some(PathBuf::from(p)),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        }
    }

    /// Parse a config file without environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_USE_MARKDOWN) {
            let enabled = parse_flag(&raw);
            log::debug!(
                "{ENV_USE_MARKDOWN} = {:?} -> {}",
                raw.trim(),
                if enabled { "markdown" } else { "static" }
            );
            self.loader.markdown_mode = enabled;
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.loader.base_url = url.trim().to_string();
        }
    }
}

/// `true`, `1`, and `yes` (any case, surrounding whitespace ignored) enable
/// a flag; everything else disables it.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
