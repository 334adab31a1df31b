//! Rules decided by the shape of the declaration and its initializer.

use super::{RuleInput, RuleOutcome};
use crate::inference::InitializerShape;
use crate::scope::AssignmentOp;
use varscope_api::models::ReasonCode;

pub fn language_level(input: &RuleInput) -> RuleOutcome {
    let version = input.options.java_version;
    if version.supports_var() {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::LanguageLevelUnsupported,
        format!("Java {version} has no `var`; it needs Java 10 or newer"),
    )
}

pub fn already_inferred(input: &RuleInput) -> RuleOutcome {
    if input.decl.is_already_inferred() {
        RuleOutcome::Exclude(
            ReasonCode::AlreadyInferred,
            format!("`{}` is already declared with `var`", input.decl.name),
        )
    } else {
        RuleOutcome::Pass
    }
}

pub fn no_initializer(input: &RuleInput) -> RuleOutcome {
    if input.decl.initializer.is_some() {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::NoInitializer,
        format!("`{}` has no initializer", input.decl.name),
    )
}

pub fn multi_variable(input: &RuleInput) -> RuleOutcome {
    if !input.decl.declares_multiple() {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::MultiVariableDeclaration,
        format!(
            "`{}` is declared together with {}",
            input.decl.name,
            input.decl.siblings.join(", ")
        ),
    )
}

pub fn array_dimensions_on_name(input: &RuleInput) -> RuleOutcome {
    if !input.decl.has_name_dimensions {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::ArrayDimensionsOnName,
        format!("`{}` carries its array brackets on the name", input.decl.name),
    )
}

/// `{...}` initializers are never eligible; `arrayDeclarations` has no other value.
pub fn array_literal(input: &RuleInput) -> RuleOutcome {
    if input.inferred.shape != InitializerShape::ArrayLiteral {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::ArrayLiteralRequiresType,
        format!(
            "array initializer needs the explicit type `{}`",
            input.decl.declared_type_text
        ),
    )
}

pub fn null_initializer(input: &RuleInput) -> RuleOutcome {
    if input.inferred.shape != InitializerShape::NullLiteral {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::NullInitializer,
        format!("`{}` is initialized with `null`", input.decl.name),
    )
}

pub fn target_type_required(input: &RuleInput) -> RuleOutcome {
    let exclude = |what: &str| {
        RuleOutcome::Exclude(
            ReasonCode::TargetTypeRequired,
            format!("{what} needs `{}` as its target type", input.decl.declared_type_text),
        )
    };

    match input.inferred.shape {
        InitializerShape::Lambda => exclude("lambda expression"),
        InitializerShape::MethodReference => exclude("method reference"),
        InitializerShape::AnonymousClass { diamond: true } => {
            exclude("anonymous class with `<>`")
        }
        InitializerShape::AnonymousClass { diamond: false } => {
            if !input.options.anonymous_classes.is_enabled() {
                return exclude("anonymous class");
            }
            // No value but the initializer has the anonymous class type.
            let reassigned = input
                .oracle
                .scopes()
                .binding_of(input.decl)
                .and_then(|b| b.assignments.iter().find(|a| a.operator == AssignmentOp::Simple));
            match reassigned {
                Some(_) => RuleOutcome::Exclude(
                    ReasonCode::TargetTypeRequired,
                    format!(
                        "`{}` is reassigned, so it needs `{}` rather than the anonymous class type",
                        input.decl.name, input.decl.declared_type_text
                    ),
                ),
                None => RuleOutcome::Note(format!(
                    "`{}` gets the anonymous class type instead of `{}`",
                    input.decl.name, input.decl.declared_type_text
                )),
            }
        }
        InitializerShape::DiamondConstructor if input.inferred.diamond.is_none() => {
            exclude("`<>` constructor")
        }
        _ => RuleOutcome::Pass,
    }
}

pub fn lambda_bearing(input: &RuleInput) -> RuleOutcome {
    if !input.inferred.lambda_bearing || input.options.lambda_bearing_declarations.is_enabled() {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::LambdaBearingInitializer,
        format!(
            "initializer of `{}` contains a lambda or method reference",
            input.decl.name
        ),
    )
}
