use super::edit::RewriteEdit;
use super::span::{SourceLocation, TextSpan};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a declaration keeps its explicit type.
///
/// The set is closed; every ineligible verdict carries exactly one code.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    LanguageLevelUnsupported,
    AlreadyInferred,
    NoInitializer,
    MultiVariableDeclaration,
    ArrayDimensionsOnName,
    ArrayLiteralRequiresType,
    NullInitializer,
    TargetTypeRequired,
    LambdaBearingInitializer,
    PrimitiveTypeDisabled,
    LoopVariableDisabled,
    UnresolvedType,
    WideningTypeChange,
    NumericInferenceMismatch,
    DiamondOperatorDisabled,
}

impl ReasonCode {
    pub const ALL: &'static [ReasonCode] = &[
        ReasonCode::LanguageLevelUnsupported,
        ReasonCode::AlreadyInferred,
        ReasonCode::NoInitializer,
        ReasonCode::MultiVariableDeclaration,
        ReasonCode::ArrayDimensionsOnName,
        ReasonCode::ArrayLiteralRequiresType,
        ReasonCode::NullInitializer,
        ReasonCode::TargetTypeRequired,
        ReasonCode::LambdaBearingInitializer,
        ReasonCode::PrimitiveTypeDisabled,
        ReasonCode::LoopVariableDisabled,
        ReasonCode::UnresolvedType,
        ReasonCode::WideningTypeChange,
        ReasonCode::NumericInferenceMismatch,
        ReasonCode::DiamondOperatorDisabled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::LanguageLevelUnsupported => "LANGUAGE_LEVEL_UNSUPPORTED",
            ReasonCode::AlreadyInferred => "ALREADY_INFERRED",
            ReasonCode::NoInitializer => "NO_INITIALIZER",
            ReasonCode::MultiVariableDeclaration => "MULTI_VARIABLE_DECLARATION",
            ReasonCode::ArrayDimensionsOnName => "ARRAY_DIMENSIONS_ON_NAME",
            ReasonCode::ArrayLiteralRequiresType => "ARRAY_LITERAL_REQUIRES_TYPE",
            ReasonCode::NullInitializer => "NULL_INITIALIZER",
            ReasonCode::TargetTypeRequired => "TARGET_TYPE_REQUIRED",
            ReasonCode::LambdaBearingInitializer => "LAMBDA_BEARING_INITIALIZER",
            ReasonCode::PrimitiveTypeDisabled => "PRIMITIVE_TYPE_DISABLED",
            ReasonCode::LoopVariableDisabled => "LOOP_VARIABLE_DISABLED",
            ReasonCode::UnresolvedType => "UNRESOLVED_TYPE",
            ReasonCode::WideningTypeChange => "WIDENING_TYPE_CHANGE",
            ReasonCode::NumericInferenceMismatch => "NUMERIC_INFERENCE_MISMATCH",
            ReasonCode::DiamondOperatorDisabled => "DIAMOND_OPERATOR_DISABLED",
        }
    }

    /// One-line description of the code, independent of any declaration.
    pub fn summary(&self) -> &'static str {
        match self {
            ReasonCode::LanguageLevelUnsupported => "`var` requires Java 10 or newer",
            ReasonCode::AlreadyInferred => "declaration already uses `var`",
            ReasonCode::NoInitializer => "`var` needs an initializer to infer from",
            ReasonCode::MultiVariableDeclaration => {
                "`var` cannot declare several variables in one statement"
            }
            ReasonCode::ArrayDimensionsOnName => "`var` cannot carry array brackets on the name",
            ReasonCode::ArrayLiteralRequiresType => {
                "array initializer shorthand needs an explicit array type"
            }
            ReasonCode::NullInitializer => "`null` has no type to infer",
            ReasonCode::TargetTypeRequired => "initializer needs the declared type as its target",
            ReasonCode::LambdaBearingInitializer => {
                "initializer contains a lambda or method reference"
            }
            ReasonCode::PrimitiveTypeDisabled => "primitive declarations are excluded",
            ReasonCode::LoopVariableDisabled => "loop variables are excluded",
            ReasonCode::UnresolvedType => "initializer type could not be resolved",
            ReasonCode::WideningTypeChange => "declared type is broader than the inferred type",
            ReasonCode::NumericInferenceMismatch => {
                "inferred primitive differs from the declared one"
            }
            ReasonCode::DiamondOperatorDisabled => "diamond rewriting is disabled",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit type arguments to put in place of a `<>` on the initializer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct TypeArgumentFill {
    /// Span of the empty `<>` on the constructor call
    pub span: TextSpan,
    /// Replacement text including the angle brackets, e.g. `<String, Integer>`
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct RewriteHint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_type_arguments: Option<TypeArgumentFill>,
    /// Permissive-policy notes about accepted type changes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum EligibilityVerdict {
    Eligible { hint: RewriteHint },
    Ineligible { reason: ReasonCode, message: String },
}

impl EligibilityVerdict {
    pub fn ineligible(reason: ReasonCode, message: impl Into<String>) -> Self {
        EligibilityVerdict::Ineligible {
            reason,
            message: message.into(),
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityVerdict::Eligible { .. })
    }

    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            EligibilityVerdict::Ineligible { reason, .. } => Some(*reason),
            EligibilityVerdict::Eligible { .. } => None,
        }
    }

    pub fn hint(&self) -> Option<&RewriteHint> {
        match self {
            EligibilityVerdict::Eligible { hint } => Some(hint),
            EligibilityVerdict::Ineligible { .. } => None,
        }
    }
}

/// One result row of an analysis pass: location, verdict and optional edits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct DeclarationOutcome {
    pub name: String,
    /// Declared type exactly as written
    pub declared_type: String,
    pub location: SourceLocation,
    pub verdict: EligibilityVerdict,
    /// Empty unless the verdict is eligible
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<RewriteEdit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_serialize_screaming_snake_case() {
        for code in ReasonCode::ALL {
            let json = serde_json::to_string(code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn verdict_is_internally_tagged() {
        let verdict = EligibilityVerdict::ineligible(ReasonCode::NoInitializer, "no value");
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["verdict"], "ineligible");
        assert_eq!(json["reason"], "NO_INITIALIZER");
        assert_eq!(verdict.reason(), Some(ReasonCode::NoInitializer));
        assert!(verdict.hint().is_none());
    }
}
