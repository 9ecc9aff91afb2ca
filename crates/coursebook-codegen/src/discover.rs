//! Chapter source discovery.

use std::path::{Path, PathBuf};

use coursebook_core::{Error, Result};

/// Find `*.md` files directly inside `source_dir`.
///
/// Files whose name starts with `exclude_prefix` are skipped (an empty
/// prefix skips nothing). Results are sorted so generation order is stable.
pub fn discover_sources(source_dir: &Path, exclude_prefix: &str) -> Result<Vec<PathBuf>> {
    let dir = source_dir
        .to_str()
        .ok_or_else(|| Error::parse(format!("Non UTF-8 source directory: {}", source_dir.display())))?;
    let pattern = format!("{}/*.md", glob::Pattern::escape(dir.trim_end_matches('/')));

    let entries =
        glob::glob(&pattern).map_err(|e| Error::parse(format!("Invalid glob pattern {pattern}: {e}")))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::io_with_path(e.into_error(), path)
        })?;
        if !path.is_file() || is_excluded(&path, exclude_prefix) {
            continue;
        }
        files.push(path);
    }
    files.sort();

    log::debug!("Discovered {} chapter source(s) in {}", files.len(), source_dir.display());
    Ok(files)
}

fn is_excluded(path: &Path, exclude_prefix: &str) -> bool {
    if exclude_prefix.is_empty() {
        return false;
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(exclude_prefix))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "---\nid: x\n---\n").unwrap();
    }

    #[test]
    fn test_discovers_markdown_only() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b-chapter.md");
        touch(dir.path(), "a-chapter.md");
        touch(dir.path(), "notes.txt");

        let files = discover_sources(dir.path(), "test").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a-chapter.md", "b-chapter.md"]);
    }

    #[test]
    fn test_excludes_prefix() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "test-fixture.md");
        touch(dir.path(), "testing.md");
        touch(dir.path(), "sql-intro.md");

        let files = discover_sources(dir.path(), "test").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("sql-intro.md"));
    }

    #[test]
    fn test_empty_prefix_keeps_everything() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "test-fixture.md");
        assert_eq!(discover_sources(dir.path(), "").unwrap().len(), 1);
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("drafts");
        std::fs::create_dir(&nested).unwrap();
        touch(&nested, "draft.md");

        assert!(discover_sources(dir.path(), "test").unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = discover_sources(&dir.path().join("nope"), "test").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_glob_metacharacters_in_dir() {
        let dir = TempDir::new().unwrap();
        let odd = dir.path().join("data [v2]");
        std::fs::create_dir(&odd).unwrap();
        touch(&odd, "chapter.md");

        assert_eq!(discover_sources(&odd, "test").unwrap().len(), 1);
    }
}
