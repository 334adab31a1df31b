//! Context for type inference.
//!
//! Holds the state passed through the inference strategy chain.

use crate::inference::core::normalization::parse_type_node;
use crate::inference::core::type_system::JavaTypeSystem;
use crate::inference::core::types::TypeResolutionContext;
use crate::parser::utils::{enclosing_type_parameters, node_text};
use crate::scope::ScopeTree;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Nested `var` initializers and receiver chains are followed this deep.
pub const MAX_INFERENCE_DEPTH: usize = 16;

/// Context for type inference
///
/// This is passed through the inference chain. It is immutable;
/// updates create new contexts.
#[derive(Clone)]
pub struct InferContext<'a> {
    /// Source code being analyzed
    pub source: &'a str,
    /// Type system for lookups
    pub ts: &'a dyn JavaTypeSystem,
    /// Package, imports and types declared in the unit
    pub resolution: &'a TypeResolutionContext,
    /// Scopes of the unit, for identifier lookup
    pub scopes: Option<&'a ScopeTree<'a>>,
    pub depth: usize,
}

impl<'a> InferContext<'a> {
    pub fn new(
        source: &'a str,
        ts: &'a dyn JavaTypeSystem,
        resolution: &'a TypeResolutionContext,
    ) -> Self {
        Self {
            source,
            ts,
            resolution,
            scopes: None,
            depth: 0,
        }
    }

    /// Set scope tree
    pub fn with_scopes(mut self, scopes: &'a ScopeTree<'a>) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// A context one level deeper, or `None` once the depth guard trips.
    pub fn deeper(&self) -> Option<Self> {
        if self.depth >= MAX_INFERENCE_DEPTH {
            tracing::trace!(depth = self.depth, "inference depth exhausted");
            return None;
        }
        let mut next = self.clone();
        next.depth += 1;
        Some(next)
    }

    pub fn text(&self, node: &Node) -> &'a str {
        node_text(node, self.source)
    }

    /// Resolution context with the type parameters in scope at `node`.
    pub fn resolution_at(&self, node: &Node) -> TypeResolutionContext {
        let params = enclosing_type_parameters(node, self.source);
        self.resolution.with_type_parameters(&params)
    }

    /// Parse a type node as seen from its position in the tree.
    pub fn parse_type(&self, type_node: &Node) -> TypeRef {
        parse_type_node(type_node, self.source, self.ts, &self.resolution_at(type_node))
    }

    /// Type of `this` at `node`: the enclosing class, generic over its own
    /// parameters, or the instantiated type inside an anonymous class body.
    pub fn this_type(&self, node: &Node) -> Option<TypeRef> {
        let scopes = self.scopes?;
        let mut current = node.parent();
        while let Some(n) = current {
            if n.kind() == "class_body"
                && n.parent()
                    .is_some_and(|p| p.kind() == "object_creation_expression")
            {
                let created = n.parent()?.child_by_field_name("type")?;
                return Some(self.parse_type(&created));
            }
            if let Some(fqn) = scopes.types().fqn_of(&n) {
                return Some(scopes.types().this_type(fqn));
            }
            current = n.parent();
        }
        None
    }
}
