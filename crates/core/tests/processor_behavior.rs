mod common;

use common::*;
use std::sync::Arc;
use varscope_api::models::{RefactorOptions, Toggle};
use varscope_core::{AnalysisCache, FixMode, Refactorer, Scanner, VarscopeError};

#[test]
fn fix_rewrites_eligible_declarations_on_disk() {
    let dir = project(&[("src/Orders.java", ELIGIBLE)]);
    let path = path_in(&dir, "src/Orders.java");

    let report = Refactorer::new(RefactorOptions::default())
        .fix_file(&path, false)
        .unwrap();
    assert!(report.changed);
    assert!(report.written);
    assert_eq!(report.eligible_count(), 3);

    let text = read(&path);
    assert!(text.contains("var label = \"orders\";"));
    assert!(text.contains("var names = new ArrayList<String>();"));
    assert!(text.contains("var count = 0;"));
}

#[test]
fn dry_run_leaves_the_file_alone() {
    let dir = project(&[("Orders.java", ELIGIBLE)]);
    let path = path_in(&dir, "Orders.java");

    let report = Refactorer::new(RefactorOptions::default())
        .fix_file(&path, true)
        .unwrap();
    assert!(report.changed);
    assert!(!report.written);
    assert_eq!(read(&path), ELIGIBLE);
}

#[test]
fn options_flow_into_the_analysis() {
    let dir = project(&[("Orders.java", ELIGIBLE)]);
    let path = path_in(&dir, "Orders.java");
    let options = RefactorOptions::default().with_primitive_declarations(Toggle::Disabled);

    let report = Refactorer::new(options).analyze_file(&path).unwrap();
    assert_eq!(report.eligible_count(), 2);
    let count = report.outcomes.iter().find(|o| o.name == "count").unwrap();
    assert!(!count.verdict.is_eligible());
}

#[test]
fn parse_errors_are_reported_not_raised() {
    let dir = project(&[("Broken.java", BROKEN)]);
    let path = path_in(&dir, "Broken.java");

    let report = Refactorer::new(RefactorOptions::default())
        .fix_file(&path, false)
        .unwrap();
    assert!(report.outcomes.is_empty());
    assert_eq!(report.parse_error.as_ref().map(|e| e.line), Some(3));
    assert!(!report.written);
    assert_eq!(read(&path), BROKEN);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = project(&[]);
    let result = Refactorer::new(RefactorOptions::default())
        .analyze_file(&path_in(&dir, "Nope.java"));
    assert!(matches!(result, Err(VarscopeError::Io(_))));
}

#[test]
fn unchanged_files_are_not_rewritten() {
    let dir = project(&[("Done.java", NOTHING_TO_DO)]);
    let path = path_in(&dir, "Done.java");
    let report = Refactorer::new(RefactorOptions::default())
        .fix_file(&path, false)
        .unwrap();
    assert_eq!(report.eligible_count(), 0);
    assert!(!report.changed);
    assert!(!report.written);
}

#[test]
fn batch_preserves_order_and_passes_broken_sources_through() {
    let sources = vec![
        ELIGIBLE.to_string(),
        BROKEN.to_string(),
        NOTHING_TO_DO.to_string(),
    ];
    let out = Refactorer::new(RefactorOptions::default()).refactor_batch(&sources);
    assert_eq!(out.len(), 3);
    assert!(out[0].contains("var names"));
    assert_eq!(out[1], BROKEN);
    assert_eq!(out[2], NOTHING_TO_DO);
}

#[test]
fn refactoring_twice_changes_nothing_more() {
    let refactorer = Refactorer::new(RefactorOptions::default());
    let once = refactorer.refactor_source(ELIGIBLE).unwrap();
    let twice = refactorer.refactor_source(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn shared_cache_serves_repeated_sources() {
    let cache = Arc::new(AnalysisCache::new());
    let refactorer = Refactorer::new(RefactorOptions::default()).with_cache(Arc::clone(&cache));

    let sources = vec![ELIGIBLE.to_string(); 4];
    let out = refactorer.refactor_batch(&sources);
    assert!(out.iter().all(|s| s == &out[0]));

    let stats = cache.stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.hits + stats.misses, 4);
}

#[test]
fn process_files_walks_a_tree_in_order() {
    let dir = project(&[
        ("b/Orders.java", ELIGIBLE),
        ("a/Done.java", NOTHING_TO_DO),
        ("a/readme.md", "# not java"),
    ]);
    let files = Scanner::collect_java_files(&[dir.path().to_path_buf()]);
    assert_eq!(files.len(), 2);

    let results = Refactorer::new(RefactorOptions::default()).process_files(&files, FixMode::Check);
    let names: Vec<_> = results
        .iter()
        .map(|(p, _)| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Done.java", "Orders.java"]);
    assert!(results.iter().all(|(_, r)| r.is_ok()));
}
