#![allow(dead_code)]

use varscope_api::models::{DeclarationOutcome, RefactorOptions, Safety};
use varscope_java::{UnitAnalysis, analyze_source};

/// Wrap statements in a method body of a class that imports `java.util.*`.
pub fn wrap(body: &str) -> String {
    format!(
        "package demo;\n\nimport java.util.*;\n\nclass Sample {{\n    void run(boolean flag) throws Exception {{\n{body}\n    }}\n}}\n"
    )
}

pub fn analyze(body: &str, options: &RefactorOptions) -> (String, UnitAnalysis) {
    let source = wrap(body);
    let analysis = analyze_source(&source, options).expect("sample parses");
    (source, analysis)
}

pub fn outcome<'a>(analysis: &'a UnitAnalysis, name: &str) -> &'a DeclarationOutcome {
    analysis
        .outcomes
        .iter()
        .find(|o| o.name == name)
        .unwrap_or_else(|| panic!("no declaration named {name}"))
}

pub fn permissive() -> RefactorOptions {
    RefactorOptions::default()
        .with_widening_safety(Safety::Permissive)
        .with_numeric_safety(Safety::Permissive)
}
