//! Rules that compare the declared type with the inferred one.

use super::{RuleInput, RuleOutcome};
use crate::inference::{Divergence, InitializerShape};
use crate::parser::utils::span_of;
use varscope_api::models::{ReasonCode, Safety};

pub fn primitive_disabled(input: &RuleInput) -> RuleOutcome {
    if !input.declared.is_primitive() || input.options.primitive_declarations.is_enabled() {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::PrimitiveTypeDisabled,
        format!("`{}` has primitive type {}", input.decl.name, input.declared),
    )
}

pub fn loop_disabled(input: &RuleInput) -> RuleOutcome {
    if !input.decl.site.is_loop() || input.options.loop_variables.is_enabled() {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::LoopVariableDisabled,
        format!("`{}` is a loop variable", input.decl.name),
    )
}

/// The safety policy that governs this declaration's type change.
fn policy(input: &RuleInput) -> Safety {
    if input.declared.is_primitive() {
        input.options.numeric_inference_safety
    } else {
        input.options.widening_type_change_safety
    }
}

pub fn unresolved(input: &RuleInput) -> RuleOutcome {
    let symbol = input.decl.initializer.and_then(|init| {
        let span = span_of(&init);
        input
            .oracle
            .unresolved()
            .iter()
            .find(|u| span.start <= u.location.span.start && u.location.span.end <= span.end)
    });

    let detail = match (&input.divergence, symbol) {
        (_, Some(symbol)) => format!("`{}` could not be resolved", symbol.name),
        (Divergence::Unresolved, None) => format!(
            "type of the initializer of `{}` could not be determined",
            input.decl.name
        ),
        _ => return RuleOutcome::Pass,
    };

    match policy(input) {
        Safety::Strict => RuleOutcome::Exclude(ReasonCode::UnresolvedType, detail),
        Safety::Permissive if input.divergence == Divergence::Unresolved => {
            RuleOutcome::Exclude(ReasonCode::UnresolvedType, detail)
        }
        Safety::Permissive => RuleOutcome::Note(detail),
    }
}

pub fn widening(input: &RuleInput) -> RuleOutcome {
    match &input.divergence {
        Divergence::Broader { declared, inferred } => {
            let message = format!("declared {declared} is broader than inferred {inferred}");
            match input.options.widening_type_change_safety {
                Safety::Strict => RuleOutcome::Exclude(ReasonCode::WideningTypeChange, message),
                Safety::Permissive => {
                    match input.oracle.first_incompatible_assignment(input.decl, inferred) {
                        Some(write) => RuleOutcome::Exclude(
                            ReasonCode::WideningTypeChange,
                            format!("{message}; {write}"),
                        ),
                        None => RuleOutcome::Note(format!(
                            "type of `{}` narrows from {declared} to {inferred}",
                            input.decl.name
                        )),
                    }
                }
            }
        }
        // Only reachable when the modeled hierarchy is incomplete.
        Divergence::Unrelated { declared, inferred } => RuleOutcome::Exclude(
            ReasonCode::WideningTypeChange,
            format!("inferred {inferred} is not known to be a {declared}"),
        ),
        _ => RuleOutcome::Pass,
    }
}

pub fn numeric(input: &RuleInput) -> RuleOutcome {
    let Divergence::Primitive { declared, inferred } = &input.divergence else {
        return RuleOutcome::Pass;
    };
    let message = format!("`var` would infer {inferred} instead of {declared}");
    match input.options.numeric_inference_safety {
        Safety::Strict => RuleOutcome::Exclude(ReasonCode::NumericInferenceMismatch, message),
        Safety::Permissive => match input.oracle.first_incompatible_assignment(input.decl, inferred)
        {
            Some(write) => RuleOutcome::Exclude(
                ReasonCode::NumericInferenceMismatch,
                format!("{message}; {write}"),
            ),
            None => RuleOutcome::Note(format!(
                "type of `{}` changes from {declared} to {inferred}",
                input.decl.name
            )),
        },
    }
}

pub fn diamond(input: &RuleInput) -> RuleOutcome {
    if input.inferred.shape != InitializerShape::DiamondConstructor
        || input.options.diamond_operator_rewrite.is_enabled()
    {
        return RuleOutcome::Pass;
    }
    RuleOutcome::Exclude(
        ReasonCode::DiamondOperatorDisabled,
        format!(
            "`{}` would need explicit type arguments on its `<>` constructor",
            input.decl.name
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{reason, run};
    use super::*;
    use varscope_api::models::{RefactorOptions, Toggle};

    fn permissive() -> RefactorOptions {
        RefactorOptions::default()
            .with_widening_safety(Safety::Permissive)
            .with_numeric_safety(Safety::Permissive)
    }

    #[test]
    fn primitive_and_loop_toggles() {
        let off = RefactorOptions::default()
            .with_primitive_declarations(Toggle::Disabled)
            .with_loop_variables(Toggle::Disabled);
        let out = run(primitive_disabled, "int n = 1;", "n", &off);
        assert_eq!(reason(&out), Some(ReasonCode::PrimitiveTypeDisabled));
        let out = run(primitive_disabled, "Integer n = 1;", "n", &off);
        assert_eq!(out, RuleOutcome::Pass);

        let out = run(loop_disabled, "for (int i = 0; i < 3; i++) {}", "i", &off);
        assert_eq!(reason(&out), Some(ReasonCode::LoopVariableDisabled));
        let out = run(
            loop_disabled,
            "for (String s : new ArrayList<String>()) {}",
            "s",
            &off,
        );
        assert_eq!(reason(&out), Some(ReasonCode::LoopVariableDisabled));
    }

    #[test]
    fn unresolved_initializers_are_excluded_when_strict() {
        let strict = RefactorOptions::default();
        let out = run(unresolved, "String s = helper.describe();", "s", &strict);
        assert_eq!(reason(&out), Some(ReasonCode::UnresolvedType));

        let out = run(unresolved, "String s = \"x\".trim();", "s", &strict);
        assert_eq!(out, RuleOutcome::Pass);
    }

    #[test]
    fn strict_widening_excludes_interface_declarations() {
        let body = "List<String> l = new ArrayList<String>();";
        let out = run(widening, body, "l", &RefactorOptions::default());
        assert_eq!(reason(&out), Some(ReasonCode::WideningTypeChange));
    }

    #[test]
    fn permissive_widening_checks_later_assignments() {
        let body = "List<String> l = new ArrayList<String>();";
        assert!(matches!(run(widening, body, "l", &permissive()), RuleOutcome::Note(_)));

        let body = "List<String> l = new ArrayList<String>();\nl = new LinkedList<String>();";
        let out = run(widening, body, "l", &permissive());
        assert_eq!(reason(&out), Some(ReasonCode::WideningTypeChange));

        let body = "List<String> l = new ArrayList<String>();\nl = new ArrayList<String>();";
        assert!(matches!(run(widening, body, "l", &permissive()), RuleOutcome::Note(_)));
    }

    #[test]
    fn strict_numeric_excludes_literal_width_changes() {
        let out = run(numeric, "long total = 100;", "total", &RefactorOptions::default());
        assert_eq!(reason(&out), Some(ReasonCode::NumericInferenceMismatch));
        let out = run(numeric, "Integer boxed = 100;", "boxed", &RefactorOptions::default());
        assert_eq!(reason(&out), Some(ReasonCode::NumericInferenceMismatch));
        let out = run(numeric, "long total = 100L;", "total", &RefactorOptions::default());
        assert_eq!(out, RuleOutcome::Pass);
    }

    #[test]
    fn permissive_numeric_checks_later_writes() {
        let out = run(numeric, "long total = 100;", "total", &permissive());
        assert!(matches!(out, RuleOutcome::Note(_)));

        let body = "long total = 100;\ntotal = 5_000_000_000L;";
        let out = run(numeric, body, "total", &permissive());
        assert_eq!(reason(&out), Some(ReasonCode::NumericInferenceMismatch));

        let body = "long total = 100;\ntotal += 2L;";
        let out = run(numeric, body, "total", &permissive());
        assert_eq!(reason(&out), Some(ReasonCode::NumericInferenceMismatch));
    }

    #[test]
    fn diamond_rewrite_toggle() {
        let body = "ArrayList<String> l = new ArrayList<>();";
        let off = RefactorOptions::default().with_diamond_rewrite(Toggle::Disabled);
        assert_eq!(
            reason(&run(diamond, body, "l", &off)),
            Some(ReasonCode::DiamondOperatorDisabled)
        );
        assert_eq!(run(diamond, body, "l", &RefactorOptions::default()), RuleOutcome::Pass);
    }
}
