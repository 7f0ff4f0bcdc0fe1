use doc_link_guardian::{collect_links, run, CheckKind, Config, FailureReason, Outcome, Scope};
use httpmock::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Lays out a small book:
//
//   README.md
//   src/intro.md
//   src/chapter.md
//   src/example_projects/hello/build.sbt
//   src/example_projects/hello/index.html
fn book(dir: &Path, external: &[String]) -> Config {
    let src = dir.join("src");
    fs::create_dir_all(src.join("example_projects/hello")).unwrap();
    fs::write(src.join("example_projects/hello/build.sbt"), "name := \"hello\"").unwrap();
    fs::write(src.join("example_projects/hello/index.html"), "<html></html>").unwrap();

    fs::write(
        dir.join("README.md"),
        "# Book\n\nStart at [intro](intro.html).\n",
    )
    .unwrap();

    let mut intro = String::from(
        "# Intro\n\n\
         Next: [chapter](chapter.html), footnote[^1].\n\n\
         Project: [build](example_projects/hello/build.sbt) and \
         [page](example_projects/hello/index.html).\n\n\
         Broken: [missing](missing.html), [outside](../README.md).\n\n\
         Code-ish: [Option[A]](Option[A]) ![diagram](diagram.png)\n\n\
         [^1]: a note\n",
    );
    for url in external {
        intro.push_str(&format!("\n* <{url}>\n"));
    }
    fs::write(src.join("intro.md"), intro).unwrap();
    fs::write(src.join("chapter.md"), "# Chapter\n\nBack to [intro](intro.md#top)\n").unwrap();

    Config {
        source_root: src,
        extra_documents: vec![dir.join("README.md")],
        denied_hosts: Vec::new(),
        pacing_delay_ms: 0,
        ..Config::default()
    }
}

fn target_names(report: &doc_link_guardian::Report, check: CheckKind) -> Vec<PathBuf> {
    report
        .results
        .iter()
        .filter(|r| r.check == check)
        .map(|r| PathBuf::from(&r.target))
        .collect()
}

#[test]
fn test_collect_links_classifies_book() {
    let dir = TempDir::new().unwrap();
    let config = book(
        dir.path(),
        &[
            "https://www.scala-lang.org/".to_string(),
            "https://www.scala-lang.org/".to_string(),
        ],
    );

    let set = collect_links(&config).unwrap();
    let src = dir.path().join("src");

    // duplicates collapse
    assert_eq!(set.external, vec!["https://www.scala-lang.org/".to_string()]);

    let local: Vec<_> = set.local.iter().map(|l| l.path.clone()).collect();
    assert_eq!(
        local,
        vec![
            // README first
            src.join("intro.md"),
            src.join("chapter.md"),
            src.join("example_projects/hello/build.sbt"),
            src.join("example_projects/hello/index.html"),
            src.join("missing.md"),
        ]
    );
    assert_eq!(set.escaped.len(), 1);
    assert_eq!(set.escaped[0].target, "../README.md");
}

#[tokio::test]
async fn test_local_scope_reports_missing_and_escaping() {
    let dir = TempDir::new().unwrap();
    let config = book(dir.path(), &[]);

    let report = run(&config, Scope::Local).await.unwrap();
    assert!(!report.passed());
    assert_eq!(report.failure_count(), 2);

    let missing = report
        .results
        .iter()
        .find(|r| r.target.ends_with("missing.md"))
        .unwrap();
    assert!(matches!(
        missing.outcome,
        Outcome::Fail(FailureReason::LocalNotFound { .. })
    ));

    assert_eq!(target_names(&report, CheckKind::Containment).len(), 1);
    assert_eq!(target_names(&report, CheckKind::Existence).len(), 5);
    assert_eq!(report.count(CheckKind::Remote), 0);
}

#[tokio::test]
async fn test_full_run_with_remote_links() {
    let server = MockServer::start_async().await;
    let ok = server
        .mock_async(|when, then| {
            when.method(GET).path("/docs");
            then.status(200);
        })
        .await;
    let gone = server
        .mock_async(|when, then| {
            when.method(GET).path("/gone");
            then.status(404);
        })
        .await;

    let dir = TempDir::new().unwrap();
    let config = book(dir.path(), &[server.url("/docs"), server.url("/gone")]);

    let report = run(&config, Scope::All).await.unwrap();
    ok.assert_async().await;
    gone.assert_async().await;

    assert_eq!(report.count(CheckKind::Remote), 2);
    // missing.md, ../README.md and /gone
    assert_eq!(report.failure_count(), 3);
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn test_remote_scope_passes_when_all_urls_answer() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/docs");
            then.status(200);
        })
        .await;

    let dir = TempDir::new().unwrap();
    let config = book(dir.path(), &[server.url("/docs")]);

    // local breakage is ignored in remote scope
    let report = run(&config, Scope::Remote).await.unwrap();
    assert!(report.passed());
    assert_eq!(report.results.len(), 1);
}

#[tokio::test]
async fn test_missing_source_root_aborts() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        source_root: dir.path().join("nope"),
        extra_documents: Vec::new(),
        ..Config::default()
    };
    assert!(run(&config, Scope::Local).await.is_err());
}

#[tokio::test]
async fn test_non_ascii_and_spaced_file_names_resolve() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("型クラス.md"), "# 型クラス\n").unwrap();
    fs::write(src.join("my page.md"), "# My page\n").unwrap();
    fs::write(
        src.join("index.md"),
        "# Index\n\n[tc](型クラス.html) and [sp](<my page.html>)\n",
    )
    .unwrap();

    let config = Config {
        source_root: src.clone(),
        extra_documents: Vec::new(),
        ..Config::default()
    };
    let report = run(&config, Scope::Local).await.unwrap();

    assert!(report.passed(), "unexpected failures: {:?}", report.failures().collect::<Vec<_>>());
    let mut checked = target_names(&report, CheckKind::Existence);
    checked.sort();
    assert_eq!(checked, vec![src.join("my page.md"), src.join("型クラス.md")]);
}
