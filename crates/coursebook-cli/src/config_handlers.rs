//! Handlers for the `config` subcommands (`path`, `show`, `get`, `set`, `init`).
//!
//! Keys are dotted TOML paths into [`CourseConfig`], e.g. `loader.base_url`.

use std::path::PathBuf;

use coursebook_core::config::DEFAULT_CONFIG_FILE;
use coursebook_core::{CourseConfig, Error, Result};

use crate::ConfigAction;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => {
            let config = CourseConfig::load(config_path)?;
            cmd_config_show(&config)
        }
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref().or(config_path), force),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the config file that would be read.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match CourseConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist; run `coursebook config init` to create it)");
            }
        }
        None => {
            println!("{DEFAULT_CONFIG_FILE}");
            eprintln!("(not found; built-in defaults are in use)");
        }
    }
    Ok(())
}

/// Print the resolved configuration, environment overrides included.
pub fn cmd_config_show(config: &CourseConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Print one configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = CourseConfig::load(config_path)?;
    println!("{}", config_value(&config, key)?);
    Ok(())
}

/// Look up a dotted key in `config`, formatted for display.
pub fn config_value(config: &CourseConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Set a value by dotted key in the config file.
///
/// The edited file must still parse as a [`CourseConfig`]; otherwise
/// nothing is written.
pub fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = PathBuf::from(config_path.unwrap_or(DEFAULT_CONFIG_FILE));
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `coursebook config init` first.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let table: toml::Table = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
    let mut doc = toml::Value::Table(table);

    set_nested_value(&mut doc, key, parse_value(value))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    CourseConfig::from_toml_str(&toml_str)
        .map_err(|e| Error::config(format!("Invalid value for {key}: {e}")))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

/// Write a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = PathBuf::from(file.unwrap_or(DEFAULT_CONFIG_FILE));

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = CourseConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for part in key.split('.') {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part)
            .or_insert(toml::Value::Table(toml::Table::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?;
    table.insert(leaf.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool → integer → float → string.
pub fn parse_value(s: &str) -> toml::Value {
    if s == "true" {
        return toml::Value::Boolean(true);
    }
    if s == "false" {
        return toml::Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_default(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("coursebook.toml");
        std::fs::write(&path, CourseConfig::default().to_toml_string().unwrap()).unwrap();
        path
    }

    // ------------------------------------------------------------------------
    // get
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_value_nested_key() {
        let config = CourseConfig::default();
        assert_eq!(config_value(&config, "content.source_dir").unwrap(), "public/data");
        assert_eq!(config_value(&config, "loader.markdown_mode").unwrap(), "false");
    }

    #[test]
    fn test_config_value_missing_key() {
        let err = config_value(&CourseConfig::default(), "loader.nonexistent").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_cmd_config_get_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        assert!(cmd_config_get(Some(path.to_str().unwrap()), "content.registry").is_ok());
    }

    // ------------------------------------------------------------------------
    // set
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_set_nested_key() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);

        cmd_config_set(Some(path.to_str().unwrap()), "loader.asset_base", "/course/").unwrap();

        let config = CourseConfig::load_from_path(&path).unwrap();
        assert_eq!(config.loader.asset_base, "/course/");
    }

    #[test]
    fn test_cmd_config_set_bool() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);

        cmd_config_set(Some(path.to_str().unwrap()), "loader.markdown_mode", "true").unwrap();

        assert!(CourseConfig::load_from_path(&path).unwrap().loader.markdown_mode);
    }

    #[test]
    fn test_cmd_config_set_wrong_type_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_default(&dir);
        let before = std::fs::read_to_string(&path).unwrap();

        let result = cmd_config_set(Some(path.to_str().unwrap()), "loader.markdown_mode", "sometimes");
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_cmd_config_set_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let result = cmd_config_set(Some(path.to_str().unwrap()), "loader.base_url", "x");
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    // ------------------------------------------------------------------------
    // init
    // ------------------------------------------------------------------------

    #[test]
    fn test_cmd_config_init_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("coursebook.toml");

        cmd_config_init(Some(path.to_str().unwrap()), false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[content]"));
        assert!(content.contains("[loader]"));
    }

    #[test]
    fn test_cmd_config_init_no_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coursebook.toml");
        std::fs::write(&path, "existing").unwrap();

        let result = cmd_config_init(Some(path.to_str().unwrap()), false);
        assert!(result.unwrap_err().to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn test_cmd_config_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coursebook.toml");
        std::fs::write(&path, "old content").unwrap();

        cmd_config_init(Some(path.to_str().unwrap()), true).unwrap();
        assert!(CourseConfig::load_from_path(&path).is_ok());
    }

    #[test]
    fn test_cmd_config_path_explicit() {
        assert!(cmd_config_path(Some("/explicit/coursebook.toml")).is_ok());
    }

    // ------------------------------------------------------------------------
    // Dotted-key helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_get_nested_value() {
        let val: toml::Value = toml::Value::Table(toml::from_str("[loader]\nbase_url = \"x\"").unwrap());
        assert_eq!(
            get_nested_value(&val, "loader.base_url"),
            Some(&toml::Value::String("x".to_string()))
        );
        assert!(get_nested_value(&val, "loader.nonexistent").is_none());
        assert!(get_nested_value(&val, "loader.base_url.deeper").is_none());
    }

    #[test]
    fn test_set_nested_value_creates_section() {
        let mut val = toml::Value::Table(toml::Table::new());
        set_nested_value(&mut val, "content.exclude_prefix", toml::Value::String("draft".into())).unwrap();
        assert_eq!(
            get_nested_value(&val, "content.exclude_prefix"),
            Some(&toml::Value::String("draft".into()))
        );
    }

    #[test]
    fn test_set_nested_value_through_scalar_fails() {
        let mut val = toml::Value::Table(toml::from_str("loader = 1").unwrap());
        assert!(set_nested_value(&mut val, "loader.base_url", toml::Value::Integer(2)).is_err());
    }

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_value("42"), toml::Value::Integer(42));
        assert_eq!(parse_value("2.5"), toml::Value::Float(2.5));
        assert_eq!(parse_value("/course/"), toml::Value::String("/course/".to_string()));
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value(&toml::Value::String("hello".into())), "hello");
        assert_eq!(format_toml_value(&toml::Value::Boolean(true)), "true");
    }
}
