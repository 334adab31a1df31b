use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Enabled,
    Disabled,
}

impl Toggle {
    pub fn is_enabled(self) -> bool {
        self == Toggle::Enabled
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "enabled" => Some(Toggle::Enabled),
            "disabled" => Some(Toggle::Disabled),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Safety {
    Strict,
    Permissive,
}

impl Safety {
    pub fn is_strict(self) -> bool {
        self == Safety::Strict
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "strict" => Some(Safety::Strict),
            "permissive" => Some(Safety::Permissive),
            _ => None,
        }
    }
}

/// Array-literal declarations are a fixed policy; the option exists only to be read back.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema, Default)]
pub enum ArrayPolicy {
    #[default]
    #[serde(rename = "never-eligible")]
    NeverEligible,
}

/// Source language level. `var` exists from Java 10 on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema)]
#[serde(transparent)]
pub struct JavaVersion(pub u32);

impl JavaVersion {
    /// Marker for a version string that could not be understood.
    pub const UNKNOWN: JavaVersion = JavaVersion(0);
    pub const FIRST_WITH_VAR: JavaVersion = JavaVersion(10);

    /// Accepts `11`, `17.0.2` and the legacy `1.8` spelling.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let mut parts = text.split('.');
        let major: u32 = parts.next()?.parse().ok()?;
        if major == 1 {
            let minor: u32 = parts.next()?.parse().ok()?;
            return Some(JavaVersion(minor));
        }
        Some(JavaVersion(major))
    }

    pub fn supports_var(self) -> bool {
        self >= Self::FIRST_WITH_VAR
    }
}

impl Default for JavaVersion {
    fn default() -> Self {
        JavaVersion(11)
    }
}

impl fmt::Display for JavaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::UNKNOWN {
            f.write_str("unknown")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Read-only switches for the eligibility rules.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefactorOptions {
    pub diamond_operator_rewrite: Toggle,
    pub numeric_inference_safety: Safety,
    pub widening_type_change_safety: Safety,
    pub array_declarations: ArrayPolicy,
    pub primitive_declarations: Toggle,
    pub loop_variables: Toggle,
    pub anonymous_classes: Toggle,
    pub lambda_bearing_declarations: Toggle,
    pub java_version: JavaVersion,
}

impl Default for RefactorOptions {
    fn default() -> Self {
        Self {
            diamond_operator_rewrite: Toggle::Enabled,
            numeric_inference_safety: Safety::Strict,
            widening_type_change_safety: Safety::Strict,
            array_declarations: ArrayPolicy::NeverEligible,
            primitive_declarations: Toggle::Enabled,
            loop_variables: Toggle::Enabled,
            anonymous_classes: Toggle::Disabled,
            lambda_bearing_declarations: Toggle::Disabled,
            java_version: JavaVersion::default(),
        }
    }
}

impl RefactorOptions {
    /// The most conservative value of every option.
    pub fn safest() -> Self {
        Self {
            diamond_operator_rewrite: Toggle::Disabled,
            numeric_inference_safety: Safety::Strict,
            widening_type_change_safety: Safety::Strict,
            array_declarations: ArrayPolicy::NeverEligible,
            primitive_declarations: Toggle::Disabled,
            loop_variables: Toggle::Disabled,
            anonymous_classes: Toggle::Disabled,
            lambda_bearing_declarations: Toggle::Disabled,
            java_version: JavaVersion::UNKNOWN,
        }
    }

    pub fn with_diamond_rewrite(mut self, toggle: Toggle) -> Self {
        self.diamond_operator_rewrite = toggle;
        self
    }

    pub fn with_numeric_safety(mut self, safety: Safety) -> Self {
        self.numeric_inference_safety = safety;
        self
    }

    pub fn with_widening_safety(mut self, safety: Safety) -> Self {
        self.widening_type_change_safety = safety;
        self
    }

    pub fn with_primitive_declarations(mut self, toggle: Toggle) -> Self {
        self.primitive_declarations = toggle;
        self
    }

    pub fn with_loop_variables(mut self, toggle: Toggle) -> Self {
        self.loop_variables = toggle;
        self
    }

    pub fn with_anonymous_classes(mut self, toggle: Toggle) -> Self {
        self.anonymous_classes = toggle;
        self
    }

    pub fn with_lambda_bearing_declarations(mut self, toggle: Toggle) -> Self {
        self.lambda_bearing_declarations = toggle;
        self
    }

    pub fn with_java_version(mut self, version: JavaVersion) -> Self {
        self.java_version = version;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn java_version_parsing() {
        assert_eq!(JavaVersion::parse("11"), Some(JavaVersion(11)));
        assert_eq!(JavaVersion::parse("1.8"), Some(JavaVersion(8)));
        assert_eq!(JavaVersion::parse(" 17.0.2 "), Some(JavaVersion(17)));
        assert_eq!(JavaVersion::parse("eleven"), None);
        assert!(!JavaVersion(8).supports_var());
        assert!(JavaVersion(10).supports_var());
        assert!(!JavaVersion::UNKNOWN.supports_var());
    }

    #[test]
    fn options_serialize_with_config_keys() {
        let json = serde_json::to_value(RefactorOptions::default()).unwrap();
        assert_eq!(json["diamondOperatorRewrite"], "enabled");
        assert_eq!(json["numericInferenceSafety"], "strict");
        assert_eq!(json["arrayDeclarations"], "never-eligible");
        assert_eq!(json["javaVersion"], 11);
    }
}
