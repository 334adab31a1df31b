//! Java `var` eligibility analysis.
//!
//! [`analyze_source`] runs the whole pipeline for one file: parse, build
//! scopes, infer what `var` would make of each initializer, judge every
//! local declaration against [`RefactorOptions`](varscope_api::models::RefactorOptions)
//! and compute the edits for the eligible ones.

pub mod analysis;
pub mod inference;
pub mod parser;
pub mod rewrite;
pub mod rules;
pub mod scope;

pub use analysis::{UnitAnalysis, analyze_source, analyze_unit};
pub use parser::{CompilationUnit, DeclarationSite, JavaParser, LocalDeclaration, ParseError};
pub use rules::{RuleOutcome, evaluate_declaration};
