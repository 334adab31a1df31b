//! Eligibility rules.
//!
//! Every rule is a plain function over a [`RuleInput`]. Rules run in the
//! order of [`RULES`]; the first exclusion decides the verdict, notes from
//! passing rules are collected on the eligible hint.

mod shape;
mod types;

pub use shape::{
    already_inferred, array_dimensions_on_name, array_literal, language_level, lambda_bearing,
    multi_variable, no_initializer, null_initializer, target_type_required,
};
pub use types::{diamond, loop_disabled, numeric, primitive_disabled, unresolved, widening};

use crate::inference::{Divergence, InferredType, InitializerShape, TypeOracle};
use crate::parser::LocalDeclaration;
use varscope_api::models::{
    EligibilityVerdict, ReasonCode, RefactorOptions, RewriteHint, TypeRef,
};

/// Everything a rule may look at for one declaration.
pub struct RuleInput<'r, 'a> {
    pub decl: &'r LocalDeclaration<'a>,
    pub oracle: &'r TypeOracle<'a>,
    pub declared: TypeRef,
    pub inferred: InferredType,
    pub divergence: Divergence,
    pub options: &'r RefactorOptions,
}

impl<'r, 'a> RuleInput<'r, 'a> {
    pub fn new(
        decl: &'r LocalDeclaration<'a>,
        oracle: &'r TypeOracle<'a>,
        options: &'r RefactorOptions,
    ) -> Self {
        let declared = oracle.as_written_type(decl);
        let inferred = oracle.would_infer_type(decl);
        let divergence = oracle.divergence(&declared, inferred.effective());
        Self {
            decl,
            oracle,
            declared,
            inferred,
            divergence,
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass,
    /// Eligible, but worth telling the user about
    Note(String),
    Exclude(ReasonCode, String),
}

pub type Rule = fn(&RuleInput) -> RuleOutcome;

/// Evaluation order.
pub const RULES: &[(&str, Rule)] = &[
    ("language-level", language_level),
    ("already-inferred", already_inferred),
    ("no-initializer", no_initializer),
    ("multi-variable", multi_variable),
    ("array-dimensions-on-name", array_dimensions_on_name),
    ("array-literal", array_literal),
    ("null-initializer", null_initializer),
    ("target-type-required", target_type_required),
    ("lambda-bearing", lambda_bearing),
    ("primitive-disabled", primitive_disabled),
    ("loop-disabled", loop_disabled),
    ("unresolved", unresolved),
    ("widening", widening),
    ("numeric", numeric),
    ("diamond", diamond),
];

/// Run every rule in order against one prepared input.
pub fn evaluate(input: &RuleInput) -> EligibilityVerdict {
    let mut notes = Vec::new();
    for (name, rule) in RULES {
        match rule(input) {
            RuleOutcome::Pass => {}
            RuleOutcome::Note(note) => notes.push(note),
            RuleOutcome::Exclude(reason, message) => {
                tracing::trace!(rule = name, %reason, "excluded");
                return EligibilityVerdict::ineligible(reason, message);
            }
        }
    }

    let explicit_type_arguments = match input.inferred.shape {
        InitializerShape::DiamondConstructor => {
            input.inferred.diamond.as_ref().map(|d| d.fill.clone())
        }
        _ => None,
    };
    EligibilityVerdict::Eligible {
        hint: RewriteHint {
            explicit_type_arguments,
            notes,
        },
    }
}

/// Verdict for a single declaration.
pub fn evaluate_declaration(
    decl: &LocalDeclaration,
    oracle: &TypeOracle,
    options: &RefactorOptions,
) -> EligibilityVerdict {
    evaluate(&RuleInput::new(decl, oracle, options))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::parser::JavaParser;
    use crate::scope::ScopeTree;

    /// Run one rule against the declaration `name` in `body`.
    pub fn run(rule: Rule, body: &str, name: &str, options: &RefactorOptions) -> RuleOutcome {
        let src = format!(
            "import java.util.*;\nclass T {{\nvoid m(boolean flag) throws Exception {{\n{body}\n}}\n}}\n"
        );
        let unit = JavaParser::new().parse(&src).expect("test source parses");
        let scopes = ScopeTree::build(&unit);
        let oracle = TypeOracle::new(&unit, &scopes);
        let decls = unit.declarations();
        let decl = decls
            .iter()
            .find(|d| d.name == name)
            .expect("declaration exists");
        rule(&RuleInput::new(decl, &oracle, options))
    }

    pub fn reason(outcome: &RuleOutcome) -> Option<ReasonCode> {
        match outcome {
            RuleOutcome::Exclude(reason, _) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;
    use crate::scope::ScopeTree;

    fn verdict(body: &str, options: &RefactorOptions) -> EligibilityVerdict {
        let src = format!("import java.util.*;\nclass T {{\nvoid m() {{\n{body}\n}}\n}}\n");
        let unit = JavaParser::new().parse(&src).unwrap();
        let scopes = ScopeTree::build(&unit);
        let oracle = TypeOracle::new(&unit, &scopes);
        let decls = unit.declarations();
        evaluate_declaration(&decls[0], &oracle, options)
    }

    #[test]
    fn first_exclusion_wins() {
        // Both multi-variable and primitive-disabled apply; multi-variable runs first.
        let options = RefactorOptions::default().with_primitive_declarations(
            varscope_api::models::Toggle::Disabled,
        );
        let v = verdict("int x = 5, y = 10;", &options);
        assert_eq!(v.reason(), Some(ReasonCode::MultiVariableDeclaration));
    }

    #[test]
    fn eligible_verdict_carries_the_diamond_fill() {
        let v = verdict(
            "HashMap<String, Integer> m = new HashMap<>();",
            &RefactorOptions::default(),
        );
        let fill = v.hint().unwrap().explicit_type_arguments.clone().unwrap();
        assert_eq!(fill.text, "<String, Integer>");
    }

    #[test]
    fn notes_accumulate_under_permissive_policies() {
        let options = RefactorOptions::default()
            .with_widening_safety(varscope_api::models::Safety::Permissive);
        let v = verdict("List<String> l = new ArrayList<String>();", &options);
        assert!(v.is_eligible());
        assert_eq!(v.hint().unwrap().notes.len(), 1);
        assert!(v.hint().unwrap().explicit_type_arguments.is_none());
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<&str> = RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.first(), Some(&"language-level"));
        assert_eq!(names.last(), Some(&"diamond"));
        assert_eq!(names.len(), ReasonCode::ALL.len());
    }
}
