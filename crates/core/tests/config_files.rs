mod common;

use common::*;
use varscope_api::models::{JavaVersion, Safety};
use varscope_core::{ConfigError, ConfigIssue, load_options_file};

#[test]
fn loads_options_from_a_file() {
    let dir = project(&[(
        "varscope.json",
        r#"{"wideningTypeChangeSafety": "permissive", "javaVersion": 17}"#,
    )]);
    let loaded = load_options_file(&path_in(&dir, "varscope.json")).unwrap();
    assert_eq!(loaded.options.widening_type_change_safety, Safety::Permissive);
    assert_eq!(loaded.options.java_version, JavaVersion(17));
    assert!(loaded.issues.is_empty());
}

#[test]
fn unknown_keys_are_issues() {
    let dir = project(&[("cfg.json", r#"{"refactorEverything": true}"#)]);
    let loaded = load_options_file(&path_in(&dir, "cfg.json")).unwrap();
    assert_eq!(
        loaded.issues,
        vec![ConfigIssue::UnknownOption {
            key: "refactorEverything".to_string()
        }]
    );
}

#[test]
fn unreadable_and_malformed_files_are_errors() {
    let dir = project(&[("bad.json", "{ nope")]);
    assert!(matches!(
        load_options_file(&path_in(&dir, "missing.json")),
        Err(ConfigError::Read { .. })
    ));
    assert!(matches!(
        load_options_file(&path_in(&dir, "bad.json")),
        Err(ConfigError::Malformed(_))
    ));
}
