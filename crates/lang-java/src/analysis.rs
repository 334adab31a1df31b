//! Per-unit driver: parse, scope, infer, judge and rewrite.

use crate::inference::TypeOracle;
use crate::parser::{CompilationUnit, JavaParser, ParseError};
use crate::rewrite::build_edits;
use crate::rules::{RuleInput, evaluate};
use crate::scope::{ScopeTree, UnresolvedSymbol};
use serde::Serialize;
use varscope_api::EditResult;
use varscope_api::models::{DeclarationOutcome, RefactorOptions, RewriteEdit, apply_edits};

/// Everything one analysis pass found in a unit, in source order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitAnalysis {
    pub outcomes: Vec<DeclarationOutcome>,
    pub unresolved: Vec<UnresolvedSymbol>,
}

impl UnitAnalysis {
    /// All edits of the pass. Disjoint by construction.
    pub fn edits(&self) -> Vec<RewriteEdit> {
        self.outcomes
            .iter()
            .flat_map(|o| o.edits.iter().cloned())
            .collect()
    }

    pub fn eligible(&self) -> impl Iterator<Item = &DeclarationOutcome> {
        self.outcomes.iter().filter(|o| o.verdict.is_eligible())
    }

    /// Apply every edit to `source`, which must be the analyzed text.
    pub fn rewrite(&self, source: &str) -> EditResult<String> {
        apply_edits(source, &self.edits())
    }
}

/// Analyze every local declaration of an already parsed unit.
pub fn analyze_unit(unit: &CompilationUnit, options: &RefactorOptions) -> UnitAnalysis {
    let scopes = ScopeTree::build(unit);
    let oracle = TypeOracle::new(unit, &scopes);

    let outcomes = unit
        .declarations()
        .iter()
        .map(|decl| {
            let verdict = evaluate(&RuleInput::new(decl, &oracle, options));
            tracing::debug!(
                name = %decl.name,
                line = decl.location.range.start_line + 1,
                eligible = verdict.is_eligible(),
                reason = verdict.reason().map(|r| r.as_str()).unwrap_or("-"),
                "declaration verdict"
            );
            let edits = build_edits(decl, &verdict);
            DeclarationOutcome {
                name: decl.name.clone(),
                declared_type: decl.declared_type_text.clone(),
                location: decl.location,
                verdict,
                edits,
            }
        })
        .collect();

    UnitAnalysis {
        outcomes,
        unresolved: scopes.unresolved().to_vec(),
    }
}

/// Parse and analyze. A syntax error yields no outcomes at all.
pub fn analyze_source(source: &str, options: &RefactorOptions) -> Result<UnitAnalysis, ParseError> {
    let unit = JavaParser::new().parse(source)?;
    Ok(analyze_unit(&unit, options))
}
