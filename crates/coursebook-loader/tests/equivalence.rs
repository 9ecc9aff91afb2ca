//! Build-time and run-time pipelines must yield identical lessons.

use coursebook_codegen::{OutputFormat, generate_chapter};
use coursebook_core::{Chapter, LoaderConfig};
use coursebook_loader::{ChapterSource, HttpFetcher};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHAPTER: &str = r#"---
id: sql-intro
title: Introduction to SQL
type: exercise
description: Querying a table
---

# Introduction to SQL

Welcome.

## Understanding Tables

A table has rows. See ![diagram](/assets/table.png).

## Your First Query

Run this:

```sql:Show the query
SELECT * FROM users;
```

Template `literal` with ${braces}.

## Challenge: Filter Rows

Download [the data](/data/users.csv) and filter it.
"#;

fn registry_chapter() -> Chapter {
    Chapter {
        id: "sql-intro".to_string(),
        slug: "sql-intro".to_string(),
        title: "Introduction to SQL".to_string(),
        description: "Querying a table".to_string(),
        lessons: Vec::new(),
        markdown_path: Some("/data/sql-intro.md".to_string()),
    }
}

async fn serve(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/sql-intro.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

fn loader_config(server: &MockServer, asset_base: &str) -> LoaderConfig {
    LoaderConfig {
        base_url: format!("{}/", server.uri()),
        asset_base: asset_base.to_string(),
        markdown_mode: true,
    }
}

#[tokio::test]
async fn test_static_and_dynamic_lessons_are_identical() {
    for asset_base in ["/", "/course/"] {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("sql-intro.md");
        std::fs::write(&input, CHAPTER).unwrap();
        let generated = generate_chapter(&input, OutputFormat::TypeScript, asset_base).unwrap();

        let server = serve(CHAPTER).await;
        let mut source = ChapterSource::new(HttpFetcher::new().unwrap(), &loader_config(&server, asset_base));
        let loaded = source.resolve(&registry_chapter()).await;

        assert_eq!(loaded.lessons, generated.lessons);
        assert_eq!(loaded.lessons.len(), 3);
    }
}

#[tokio::test]
async fn test_json_module_matches_loaded_lessons() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sql-intro.md");
    std::fs::write(&input, CHAPTER).unwrap();
    let generated = generate_chapter(&input, OutputFormat::Json, "/").unwrap();
    let from_module: Vec<coursebook_core::Lesson> = serde_json::from_str(&generated.text).unwrap();

    let server = serve(CHAPTER).await;
    let mut source = ChapterSource::new(HttpFetcher::new().unwrap(), &loader_config(&server, "/"));
    let loaded = source.resolve(&registry_chapter()).await;

    assert_eq!(loaded.lessons, from_module);
}

#[tokio::test]
async fn test_loaded_lessons_have_expected_shape() {
    let server = serve(CHAPTER).await;
    let mut source = ChapterSource::new(HttpFetcher::new().unwrap(), &loader_config(&server, "/course/"));
    let loaded = source.resolve(&registry_chapter()).await;

    let ids: Vec<_> = loaded.lessons.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["sql-intro-understanding-tables", "sql-intro-your-first-query", "sql-intro-challenge-filter-rows"]
    );

    let query = &loaded.lessons[1];
    assert_eq!(query.snippets().len(), 1);
    assert_eq!(query.snippets()[0].code, "SELECT * FROM users;");
    assert_eq!(query.snippets()[0].summary.as_deref(), Some("Show the query"));
    assert!(!query.content.contains("```sql"));
    assert!(loaded.lessons[0].content.contains("](/course/assets/table.png)"));
    assert!(loaded.lessons[2].content.contains("](/course/data/users.csv)"));
}

#[tokio::test]
async fn test_server_error_returns_chapter_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut source = ChapterSource::new(HttpFetcher::new().unwrap(), &loader_config(&server, "/"));
    let chapter = registry_chapter();

    assert_eq!(source.resolve(&chapter).await, chapter);
    assert!(source.cache().is_empty());
}
