//! Scope & symbol resolution over one compilation unit.
//!
//! [`ScopeTree::build`] walks the unit once and records Java block scoping:
//! locals are visible from their declarator to the end of the enclosing
//! block, fields throughout their class body and parameters throughout their
//! method, lambda or catch clause.

mod builder;
mod tree;

pub use builder::ScopeBuilder;
pub use tree::{
    Assignment, AssignmentOp, Binding, BindingId, BindingKind, Scope, ScopeId, ScopeKind,
    ScopeTree, UnresolvedSymbol,
};

use crate::inference::adapters::{LayeredTypeSystem, LocalTypeIndex};
use crate::parser::CompilationUnit;

impl<'a> ScopeTree<'a> {
    /// Index the unit's own types, then build every scope against them.
    pub fn build(unit: &'a CompilationUnit) -> Self {
        let types = LocalTypeIndex::build(unit);
        let mut tree = {
            let ts = LayeredTypeSystem::new(&types);
            ScopeBuilder::new(unit, &ts, &types).build()
        };
        tree.types = types;
        tracing::debug!(
            scopes = tree.scopes.len(),
            bindings = tree.bindings.len(),
            unresolved = tree.unresolved.len(),
            "built scope tree"
        );
        tree
    }
}
