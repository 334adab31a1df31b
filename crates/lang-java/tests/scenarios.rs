mod common;

use common::{analyze, outcome, permissive};
use varscope_api::models::{ReasonCode, RefactorOptions, Safety, Toggle};

#[test]
fn final_string_keeps_its_modifier() {
    let (source, analysis) = analyze("final String s = \"x\";", &RefactorOptions::default());
    let s = outcome(&analysis, "s");
    assert!(s.verdict.is_eligible());
    assert_eq!(s.edits.len(), 1);
    assert_eq!(&source[s.edits[0].span.start..s.edits[0].span.end], "String");

    let rewritten = analysis.rewrite(&source).unwrap();
    assert!(rewritten.contains("final var s = \"x\";"));
}

#[test]
fn multi_variable_statement_is_rejected_for_every_name() {
    let (_, analysis) = analyze("int x = 5, y = 10;", &RefactorOptions::default());
    for name in ["x", "y"] {
        assert_eq!(
            outcome(&analysis, name).verdict.reason(),
            Some(ReasonCode::MultiVariableDeclaration)
        );
        assert!(outcome(&analysis, name).edits.is_empty());
    }
}

#[test]
fn explicit_constructor_arguments_under_permissive_widening() {
    let options = RefactorOptions::default().with_widening_safety(Safety::Permissive);
    let (source, analysis) = analyze("List<String> l = new ArrayList<String>();", &options);
    let l = outcome(&analysis, "l");
    assert!(l.verdict.is_eligible());

    let rewritten = analysis.rewrite(&source).unwrap();
    assert!(rewritten.contains("var l = new ArrayList<String>();"));
}

#[test]
fn diamond_constructor_gets_its_arguments_spelled_out() {
    let (source, analysis) = analyze(
        "ArrayList<String> names = new ArrayList<>();",
        &RefactorOptions::default(),
    );
    let rewritten = analysis.rewrite(&source).unwrap();
    assert!(rewritten.contains("var names = new ArrayList<String>();"));
    assert_eq!(outcome(&analysis, "names").edits.len(), 2);
}

#[test]
fn diamond_with_interface_declaration_is_widening_when_strict() {
    let (_, strict) = analyze("List<String> l = new ArrayList<>();", &RefactorOptions::default());
    assert_eq!(
        outcome(&strict, "l").verdict.reason(),
        Some(ReasonCode::WideningTypeChange)
    );

    let (source, loose) = analyze("List<String> l = new ArrayList<>();", &permissive());
    assert!(outcome(&loose, "l").verdict.is_eligible());
    assert!(loose.rewrite(&source).unwrap().contains("var l = new ArrayList<String>();"));

    let off = permissive().with_diamond_rewrite(Toggle::Disabled);
    let (_, disabled) = analyze("List<String> l = new ArrayList<>();", &off);
    assert_eq!(
        outcome(&disabled, "l").verdict.reason(),
        Some(ReasonCode::DiamondOperatorDisabled)
    );
}

#[test]
fn widened_numeric_literal_is_rejected_when_strict() {
    let (_, analysis) = analyze("long total = 100;", &RefactorOptions::default());
    assert_eq!(
        outcome(&analysis, "total").verdict.reason(),
        Some(ReasonCode::NumericInferenceMismatch)
    );
}

#[test]
fn lambda_needs_a_target_under_any_configuration() {
    for options in [RefactorOptions::default(), permissive()] {
        let options = options
            .with_lambda_bearing_declarations(Toggle::Enabled)
            .with_anonymous_classes(Toggle::Enabled);
        let (_, analysis) = analyze("Runnable r = () -> {};", &options);
        assert_eq!(
            outcome(&analysis, "r").verdict.reason(),
            Some(ReasonCode::TargetTypeRequired)
        );
    }
}

#[test]
fn array_initializer_shorthand_keeps_its_type() {
    let (_, analysis) = analyze("int[] arr = {1, 2, 3};", &RefactorOptions::default());
    assert_eq!(
        outcome(&analysis, "arr").verdict.reason(),
        Some(ReasonCode::ArrayLiteralRequiresType)
    );

    let (_, created) = analyze("int[] arr = new int[] {1, 2, 3};", &RefactorOptions::default());
    assert!(outcome(&created, "arr").verdict.is_eligible());
}

#[test]
fn loops_and_resources() {
    let body = "List<String> names = new ArrayList<String>();\n\
                for (String name : names) {}\n\
                for (int i = 0; i < 3; i++) {}\n\
                try (java.io.StringReader reader = new java.io.StringReader(\"\")) {}";
    let (_, analysis) = analyze(body, &RefactorOptions::default());
    assert!(outcome(&analysis, "name").verdict.is_eligible());
    assert!(outcome(&analysis, "i").verdict.is_eligible());
    assert!(outcome(&analysis, "reader").verdict.is_eligible());

    let off = RefactorOptions::default().with_loop_variables(Toggle::Disabled);
    let (_, analysis) = analyze(body, &off);
    assert_eq!(
        outcome(&analysis, "name").verdict.reason(),
        Some(ReasonCode::LoopVariableDisabled)
    );
    assert!(outcome(&analysis, "reader").verdict.is_eligible());
}

#[test]
fn old_language_levels_get_nothing() {
    let options = RefactorOptions::default().with_java_version(varscope_api::models::JavaVersion(8));
    let (_, analysis) = analyze("String s = \"x\";", &options);
    assert_eq!(
        outcome(&analysis, "s").verdict.reason(),
        Some(ReasonCode::LanguageLevelUnsupported)
    );
}
