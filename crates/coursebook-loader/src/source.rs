//! Chapter resolution in static or markdown mode.
//!
//! In [`LoadMode::Static`] a chapter is returned exactly as the registry
//! provides it. In [`LoadMode::Markdown`] the chapter's `markdown_path` is
//! fetched, parsed with the same pipeline the build-time generator uses,
//! and cached by chapter id.
//!
//! Resolution never fails: a fetch error is logged and the chapter comes
//! back with its static lessons. Failed loads are not cached.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use coursebook_content::parse_chapter_document;
use coursebook_core::{Chapter, LoaderConfig};
use futures::future::join_all;

use crate::Result;
use crate::cache::LessonCache;
use crate::fetch::{MarkdownFetcher, resolve_url};

/// Where chapter lessons come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMode {
    /// Lessons generated at build time.
    #[default]
    Static,
    /// Lessons parsed from markdown fetched at run time.
    Markdown,
}

impl LoadMode {
    /// Mode for a `markdown_mode` flag.
    pub fn from_flag(markdown_mode: bool) -> Self {
        if markdown_mode { Self::Markdown } else { Self::Static }
    }
}

/// Shared "still mounted" flag for an in-flight resolution.
///
/// Clones share state; [`unmount`](Self::unmount) on any clone makes
/// every clone report not alive.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    /// A live guard.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Whether the consumer still wants the result.
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Mark the consumer gone.
    pub fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

enum Plan<'a> {
    Ready(Chapter),
    Fetch(&'a str),
}

/// Resolves registry chapters into chapters with lessons.
pub struct ChapterSource<F> {
    fetcher: F,
    base_url: String,
    asset_base: String,
    mode: LoadMode,
    cache: LessonCache,
}

impl<F: MarkdownFetcher> ChapterSource<F> {
    /// Create a source from the `[loader]` table.
    pub fn new(fetcher: F, config: &LoaderConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            asset_base: config.asset_base.clone(),
            mode: LoadMode::from_flag(config.markdown_mode),
            cache: LessonCache::new(),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// Switch modes. Turning markdown mode on drops every cached chapter.
    pub fn set_mode(&mut self, mode: LoadMode) {
        if self.mode == LoadMode::Static && mode == LoadMode::Markdown {
            log::debug!("Markdown mode enabled, clearing {} cached chapter(s)", self.cache.len());
            self.cache.clear();
        }
        self.mode = mode;
    }

    /// The chapter cache.
    pub fn cache(&self) -> &LessonCache {
        &self.cache
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resolve one chapter.
    pub async fn resolve(&mut self, chapter: &Chapter) -> Chapter {
        let path = match self.plan(chapter) {
            Plan::Ready(resolved) => return resolved,
            Plan::Fetch(path) => path,
        };

        match self.load(chapter, path).await {
            Ok(loaded) => {
                self.cache.insert(loaded.clone());
                loaded
            }
            Err(e) => {
                log::warn!("Falling back to static lessons for {}: {e}", chapter.id);
                chapter.clone()
            }
        }
    }

    /// Resolve one chapter unless `guard` is unmounted first.
    ///
    /// Returns `None` without touching the cache when the guard is no
    /// longer alive once the fetch completes.
    pub async fn resolve_guarded(&mut self, chapter: &Chapter, guard: &Liveness) -> Option<Chapter> {
        let path = match self.plan(chapter) {
            Plan::Ready(resolved) => return guard.is_alive().then_some(resolved),
            Plan::Fetch(path) => path,
        };

        let result = self.load(chapter, path).await;
        if !guard.is_alive() {
            log::debug!("Discarding load of {}: consumer unmounted", chapter.id);
            return None;
        }

        Some(match result {
            Ok(loaded) => {
                self.cache.insert(loaded.clone());
                loaded
            }
            Err(e) => {
                log::warn!("Falling back to static lessons for {}: {e}", chapter.id);
                chapter.clone()
            }
        })
    }

    /// Resolve several chapters, fetching distinct uncached ones concurrently.
    ///
    /// The output is index-aligned with `chapters`.
    pub async fn resolve_all(&mut self, chapters: &[Chapter]) -> Vec<Chapter> {
        let mut seen = HashSet::new();
        let mut pending = Vec::new();
        for chapter in chapters {
            if let Plan::Fetch(path) = self.plan(chapter)
                && seen.insert(chapter.id.as_str())
            {
                pending.push((chapter, path));
            }
        }

        if !pending.is_empty() {
            log::debug!("Fetching {} chapter(s) concurrently", pending.len());
            let results = join_all(pending.iter().map(|(chapter, path)| self.load(chapter, path))).await;
            for ((chapter, _), result) in pending.iter().zip(results) {
                match result {
                    Ok(loaded) => self.cache.insert(loaded),
                    Err(e) => log::warn!("Falling back to static lessons for {}: {e}", chapter.id),
                }
            }
        }

        chapters
            .iter()
            .map(|chapter| match self.plan(chapter) {
                Plan::Ready(resolved) => resolved,
                Plan::Fetch(_) => chapter.clone(),
            })
            .collect()
    }

    fn plan<'a>(&self, chapter: &'a Chapter) -> Plan<'a> {
        if self.mode == LoadMode::Static {
            return Plan::Ready(chapter.clone());
        }
        let Some(path) = chapter.markdown_path.as_deref() else {
            return Plan::Ready(chapter.clone());
        };
        match self.cache.get(&chapter.id) {
            Some(cached) => Plan::Ready(cached.clone()),
            None => Plan::Fetch(path),
        }
    }

    async fn load(&self, chapter: &Chapter, markdown_path: &str) -> Result<Chapter> {
        let url = resolve_url(&self.base_url, markdown_path);
        log::debug!("Loading chapter {} from {url} via {}", chapter.id, self.fetcher.name());

        let markdown = self.fetcher.fetch(&url).await?;
        let parsed = parse_chapter_document(&markdown, &self.asset_base, Some(&chapter.id));
        log::info!("Loaded {} lesson(s) for chapter {}", parsed.lessons.len(), chapter.id);

        Ok(chapter.with_lessons(parsed.lessons))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use async_trait::async_trait;
    use coursebook_core::Lesson;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Barrier;

    const BASE: &str = "mem://course/";

    fn config(markdown_mode: bool) -> LoaderConfig {
        LoaderConfig {
            base_url: BASE.to_string(),
            asset_base: "/".to_string(),
            markdown_mode,
        }
    }

    fn static_lesson() -> Lesson {
        Lesson {
            id: "static".to_string(),
            title: "Static".to_string(),
            ..Lesson::default()
        }
    }

    fn chapter(id: &str, markdown_path: Option<&str>) -> Chapter {
        Chapter {
            id: id.to_string(),
            slug: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            lessons: vec![static_lesson()],
            markdown_path: markdown_path.map(str::to_string),
        }
    }

    /// Counts fetches made through the wrapped fetcher.
    struct Counting {
        inner: MemoryFetcher,
        calls: AtomicUsize,
    }

    impl Counting {
        fn new(inner: MemoryFetcher) -> Self {
            Self {
                inner,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MarkdownFetcher for Counting {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(url).await
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn documents() -> MemoryFetcher {
        MemoryFetcher::new()
            .with_document("mem://course/data/sql.md", "---\nid: sql\n---\n## Select\nA\n## Where\nB\n")
            .with_document("mem://course/data/git.md", "## Commit\nC\n")
    }

    // ------------------------------------------------------------------------
    // Modes
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_static_mode_returns_input() {
        let mut source = ChapterSource::new(Counting::new(documents()), &config(false));
        let input = chapter("sql", Some("/data/sql.md"));

        assert_eq!(source.resolve(&input).await, input);
        assert_eq!(source.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_no_markdown_path_returns_input() {
        let mut source = ChapterSource::new(Counting::new(documents()), &config(true));
        let input = chapter("sql", None);

        assert_eq!(source.resolve(&input).await, input);
        assert_eq!(source.fetcher().calls(), 0);
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(LoadMode::from_flag(true), LoadMode::Markdown);
        assert_eq!(LoadMode::from_flag(false), LoadMode::Static);
    }

    // ------------------------------------------------------------------------
    // Markdown loading and caching
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_markdown_mode_parses_and_caches() {
        let mut source = ChapterSource::new(Counting::new(documents()), &config(true));
        let input = chapter("sql", Some("/data/sql.md"));

        let first = source.resolve(&input).await;
        let ids: Vec<_> = first.lessons.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["sql-select", "sql-where"]);
        assert_eq!(first.title, input.title);

        let second = source.resolve(&input).await;
        assert_eq!(second, first);
        assert_eq!(source.fetcher().calls(), 1);
        assert_eq!(source.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_registry_id_is_fallback_chapter_context() {
        let mut source = ChapterSource::new(Counting::new(documents()), &config(true));
        let resolved = source.resolve(&chapter("git", Some("/data/git.md"))).await;
        assert_eq!(resolved.lessons[0].id, "git-commit");
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_and_is_not_cached() {
        let mut source = ChapterSource::new(Counting::new(documents()), &config(true));
        let input = chapter("missing", Some("/data/missing.md"));

        assert_eq!(source.resolve(&input).await, input);
        assert!(source.cache().is_empty());

        source.resolve(&input).await;
        assert_eq!(source.fetcher().calls(), 2);
    }

    #[tokio::test]
    async fn test_flip_to_markdown_clears_cache() {
        let mut source = ChapterSource::new(Counting::new(documents()), &config(true));
        let input = chapter("sql", Some("/data/sql.md"));
        source.resolve(&input).await;
        assert_eq!(source.cache().len(), 1);

        source.set_mode(LoadMode::Markdown);
        assert_eq!(source.cache().len(), 1);

        source.set_mode(LoadMode::Static);
        assert_eq!(source.cache().len(), 1);

        source.set_mode(LoadMode::Markdown);
        assert!(source.cache().is_empty());
    }

    // ------------------------------------------------------------------------
    // resolve_all
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_resolve_all_is_index_aligned_and_deduplicated() {
        let mut source = ChapterSource::new(Counting::new(documents()), &config(true));
        let chapters = vec![
            chapter("sql", Some("/data/sql.md")),
            chapter("plain", None),
            chapter("missing", Some("/data/missing.md")),
            chapter("sql", Some("/data/sql.md")),
            chapter("git", Some("/data/git.md")),
        ];

        let resolved = source.resolve_all(&chapters).await;

        assert_eq!(resolved.len(), chapters.len());
        assert_eq!(resolved[0].lessons.len(), 2);
        assert_eq!(resolved[1], chapters[1]);
        assert_eq!(resolved[2], chapters[2]);
        assert_eq!(resolved[3], resolved[0]);
        assert_eq!(resolved[4].lessons[0].id, "git-commit");
        assert_eq!(source.fetcher().calls(), 3);
        assert_eq!(source.cache().len(), 2);
    }

    /// Blocks every fetch until `parties` fetches are in flight at once.
    struct Rendezvous {
        inner: MemoryFetcher,
        barrier: Barrier,
    }

    #[async_trait]
    impl MarkdownFetcher for Rendezvous {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.barrier.wait().await;
            self.inner.fetch(url).await
        }

        fn name(&self) -> &str {
            "rendezvous"
        }
    }

    #[tokio::test]
    async fn test_resolve_all_fetches_concurrently() {
        let fetcher = Rendezvous {
            inner: documents(),
            barrier: Barrier::new(2),
        };
        let mut source = ChapterSource::new(fetcher, &config(true));
        let chapters = vec![chapter("sql", Some("/data/sql.md")), chapter("git", Some("/data/git.md"))];

        let resolved = tokio::time::timeout(std::time::Duration::from_secs(5), source.resolve_all(&chapters))
            .await
            .unwrap();
        assert_eq!(resolved[0].lessons.len(), 2);
        assert_eq!(resolved[1].lessons.len(), 1);
    }

    // ------------------------------------------------------------------------
    // Liveness
    // ------------------------------------------------------------------------

    /// Unmounts the guard while the fetch is in flight.
    struct Unmounting {
        inner: MemoryFetcher,
        guard: Liveness,
    }

    #[async_trait]
    impl MarkdownFetcher for Unmounting {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.guard.unmount();
            self.inner.fetch(url).await
        }

        fn name(&self) -> &str {
            "unmounting"
        }
    }

    #[tokio::test]
    async fn test_unmounted_guard_discards_result() {
        let guard = Liveness::new();
        let fetcher = Unmounting {
            inner: documents(),
            guard: guard.clone(),
        };
        let mut source = ChapterSource::new(fetcher, &config(true));

        let result = source.resolve_guarded(&chapter("sql", Some("/data/sql.md")), &guard).await;
        assert!(result.is_none());
        assert!(source.cache().is_empty());
    }

    #[tokio::test]
    async fn test_live_guard_applies_result() {
        let guard = Liveness::new();
        let mut source = ChapterSource::new(Counting::new(documents()), &config(true));

        let resolved = source
            .resolve_guarded(&chapter("sql", Some("/data/sql.md")), &guard)
            .await
            .unwrap();
        assert_eq!(resolved.lessons.len(), 2);
        assert!(guard.is_alive());
        assert_eq!(source.cache().len(), 1);
    }
}
