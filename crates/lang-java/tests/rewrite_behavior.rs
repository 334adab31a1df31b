mod common;

use varscope_api::models::RefactorOptions;
use varscope_java::analyze_source;

const FILE: &str = r#"package demo;

import java.util.*;

class Inventory {
    private final Map<String, Integer> stock = new HashMap<>();

    int restock(List<String> items) {
        // counts per item
        HashMap<String, Integer>   counts = new HashMap<>();
        @SuppressWarnings("unused") final StringBuilder log = new StringBuilder();
        int total = 0, skipped = 0;
        for (String item : items) {
            Integer current = counts.get(item);
            counts.put(item, current == null ? 1 : current + 1);
        }
        String summary = "restocked " + counts.size();
        return counts.size();
    }
}
"#;

#[test]
fn rewrites_eligible_declarations_and_nothing_else() {
    let analysis = analyze_source(FILE, &RefactorOptions::default()).unwrap();
    let out = analysis.rewrite(FILE).unwrap();

    assert!(out.contains("        var   counts = new HashMap<String, Integer>();"));
    assert!(out.contains("@SuppressWarnings(\"unused\") final var log = new StringBuilder();"));
    assert!(out.contains("int total = 0, skipped = 0;"));
    assert!(out.contains("for (var item : items)"));
    assert!(out.contains("var current = counts.get(item);"));
    assert!(out.contains("var summary = \"restocked \" + counts.size();"));
    // Fields and parameters are never touched.
    assert!(out.contains("private final Map<String, Integer> stock = new HashMap<>();"));
    assert!(out.contains("int restock(List<String> items)"));
    assert!(out.contains("// counts per item"));
}

#[test]
fn second_pass_finds_nothing_new() {
    let options = RefactorOptions::default();
    let first = analyze_source(FILE, &options).unwrap();
    let once = first.rewrite(FILE).unwrap();

    let second = analyze_source(&once, &options).unwrap();
    assert!(second.edits().is_empty());
    assert_eq!(second.rewrite(&once).unwrap(), once);
}

#[test]
fn malformed_files_produce_no_suggestions() {
    let broken = "class A { void m() { String s = ; } }";
    let err = analyze_source(broken, &RefactorOptions::default()).unwrap_err();
    assert_eq!(err.line, 1);
}
