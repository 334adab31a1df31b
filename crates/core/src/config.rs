//! Loading [`RefactorOptions`] from JSON.
//!
//! Absent keys take their defaults. Unknown keys and invalid values are not
//! fatal: each one is reported as a [`ConfigIssue`] and the affected option
//! falls back to its safest value. Only input that is not a JSON object at
//! all is an error.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use varscope_api::models::{ArrayPolicy, JavaVersion, RefactorOptions, Safety, Toggle};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("configuration must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// A recoverable problem with one configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ConfigIssue {
    UnknownOption { key: String },
    InvalidValue { key: String, value: String, fallback: String },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::UnknownOption { key } => write!(f, "unknown option `{key}` ignored"),
            ConfigIssue::InvalidValue {
                key,
                value,
                fallback,
            } => write!(f, "invalid value {value} for `{key}`, using `{fallback}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedConfig {
    pub options: RefactorOptions,
    pub issues: Vec<ConfigIssue>,
}

pub fn load_options(json: &str) -> Result<LoadedConfig, ConfigError> {
    let value: Value = serde_json::from_str(json)?;
    options_from_value(&value)
}

pub fn load_options_file(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    load_options(&text)
}

pub fn options_from_value(value: &Value) -> Result<LoadedConfig, ConfigError> {
    let Value::Object(map) = value else {
        return Err(ConfigError::NotAnObject(json_kind(value)));
    };

    let safest = RefactorOptions::safest();
    let mut options = RefactorOptions::default();
    let mut issues = Vec::new();

    for (key, value) in map {
        let mut invalid = |fallback: String| {
            issues.push(ConfigIssue::InvalidValue {
                key: key.clone(),
                value: value.to_string(),
                fallback,
            })
        };
        match key.as_str() {
            "diamondOperatorRewrite" => {
                options.diamond_operator_rewrite =
                    toggle(value).unwrap_or_else(|| fallback(safest.diamond_operator_rewrite, &mut invalid));
            }
            "numericInferenceSafety" => {
                options.numeric_inference_safety =
                    safety(value).unwrap_or_else(|| fallback(safest.numeric_inference_safety, &mut invalid));
            }
            "wideningTypeChangeSafety" => {
                options.widening_type_change_safety = safety(value)
                    .unwrap_or_else(|| fallback(safest.widening_type_change_safety, &mut invalid));
            }
            "arrayDeclarations" => {
                if value.as_str() != Some("never-eligible") {
                    invalid("never-eligible".to_string());
                }
                options.array_declarations = ArrayPolicy::NeverEligible;
            }
            "primitiveDeclarations" => {
                options.primitive_declarations =
                    toggle(value).unwrap_or_else(|| fallback(safest.primitive_declarations, &mut invalid));
            }
            "loopVariables" => {
                options.loop_variables =
                    toggle(value).unwrap_or_else(|| fallback(safest.loop_variables, &mut invalid));
            }
            "anonymousClasses" => {
                options.anonymous_classes =
                    toggle(value).unwrap_or_else(|| fallback(safest.anonymous_classes, &mut invalid));
            }
            "lambdaBearingDeclarations" => {
                options.lambda_bearing_declarations = toggle(value)
                    .unwrap_or_else(|| fallback(safest.lambda_bearing_declarations, &mut invalid));
            }
            "javaVersion" => {
                options.java_version =
                    java_version(value).unwrap_or_else(|| fallback(safest.java_version, &mut invalid));
            }
            _ => issues.push(ConfigIssue::UnknownOption { key: key.clone() }),
        }
    }

    for issue in &issues {
        tracing::warn!("{issue}");
    }
    Ok(LoadedConfig { options, issues })
}

fn fallback<T: Serialize + Copy>(safest: T, invalid: &mut impl FnMut(String)) -> T {
    let shown = serde_json::to_value(safest)
        .map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .unwrap_or_default();
    invalid(shown);
    safest
}

fn toggle(value: &Value) -> Option<Toggle> {
    value.as_str().and_then(Toggle::parse)
}

fn safety(value: &Value) -> Option<Safety> {
    value.as_str().and_then(Safety::parse)
}

fn java_version(value: &Value) -> Option<JavaVersion> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).map(JavaVersion),
        Value::String(s) => JavaVersion::parse(s),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// JSON schema of the configuration surface.
pub fn options_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(RefactorOptions)).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_take_defaults() {
        let loaded = load_options("{}").unwrap();
        assert_eq!(loaded.options, RefactorOptions::default());
        assert!(loaded.issues.is_empty());
    }

    #[test]
    fn reads_every_key() {
        let loaded = load_options(
            r#"{
                "diamondOperatorRewrite": "disabled",
                "numericInferenceSafety": "permissive",
                "wideningTypeChangeSafety": "permissive",
                "arrayDeclarations": "never-eligible",
                "primitiveDeclarations": "disabled",
                "loopVariables": "disabled",
                "anonymousClasses": "enabled",
                "lambdaBearingDeclarations": "enabled",
                "javaVersion": "1.8"
            }"#,
        )
        .unwrap();
        let o = loaded.options;
        assert_eq!(o.diamond_operator_rewrite, Toggle::Disabled);
        assert_eq!(o.numeric_inference_safety, Safety::Permissive);
        assert_eq!(o.widening_type_change_safety, Safety::Permissive);
        assert_eq!(o.primitive_declarations, Toggle::Disabled);
        assert_eq!(o.loop_variables, Toggle::Disabled);
        assert_eq!(o.anonymous_classes, Toggle::Enabled);
        assert_eq!(o.lambda_bearing_declarations, Toggle::Enabled);
        assert_eq!(o.java_version, JavaVersion(8));
        assert!(loaded.issues.is_empty());
    }

    #[test]
    fn invalid_values_fall_back_to_the_safest_setting() {
        let loaded = load_options(
            r#"{"diamondOperatorRewrite": "sometimes", "javaVersion": "eleven", "colour": 1}"#,
        )
        .unwrap();
        assert_eq!(loaded.options.diamond_operator_rewrite, Toggle::Disabled);
        assert_eq!(loaded.options.java_version, JavaVersion::UNKNOWN);
        assert_eq!(loaded.issues.len(), 3);
        assert!(loaded.issues.contains(&ConfigIssue::UnknownOption {
            key: "colour".into()
        }));
        assert!(loaded.issues.iter().any(|i| matches!(
            i,
            ConfigIssue::InvalidValue { key, fallback, .. }
                if key == "diamondOperatorRewrite" && fallback == "disabled"
        )));
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(matches!(load_options("{"), Err(ConfigError::Malformed(_))));
        assert!(matches!(load_options("[1]"), Err(ConfigError::NotAnObject(_))));
    }

    #[test]
    fn schema_lists_the_option_keys() {
        let schema = options_schema();
        assert!(schema["properties"]["wideningTypeChangeSafety"].is_object());
    }
}
