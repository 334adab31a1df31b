//! Scope arena for one compilation unit.

use crate::inference::adapters::LocalTypeIndex;
use crate::parser::LocalDeclaration;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tree_sitter::Node;
use varscope_api::models::{SourceLocation, TextSpan, TypeRef};

/// Index into [`ScopeTree::scopes`].
pub type ScopeId = usize;
/// Index into [`ScopeTree::bindings`].
pub type BindingId = usize;

/// Kind of scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    /// The whole file
    Unit,
    /// Class-like body; carries the FQN (or the instantiated type for anonymous classes)
    Class(String),
    Method,
    Block,
    Lambda,
    Loop,
    Catch,
    Resources,
    Switch,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    /// Non-owning back-reference; `None` only for the unit scope.
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub span: TextSpan,
    /// Bindings in declaration order
    pub bindings: Vec<BindingId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingKind {
    Local,
    Parameter,
    LambdaParameter,
    CatchParameter,
    LoopVariable,
    Resource,
    Field,
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOp {
    /// `x = value`
    Simple,
    /// `x += value` and friends; carries the operator text
    Compound(String),
    /// `x++`, `--x`
    Increment,
}

/// A later write to a binding.
#[derive(Debug, Clone)]
pub struct Assignment<'a> {
    pub span: TextSpan,
    pub operator: AssignmentOp,
    pub value: Option<Node<'a>>,
}

/// A name introduced into a scope.
#[derive(Debug, Clone)]
pub struct Binding<'a> {
    pub id: BindingId,
    pub name: String,
    pub kind: BindingKind,
    /// `Unknown` for `var` and untyped lambda parameters
    pub declared_type: TypeRef,
    pub declared_type_text: String,
    pub is_var: bool,
    /// Declared `final`, or implicitly final like a resource
    pub is_final: bool,
    /// Byte offset from which the name can be referenced
    pub visible_from: usize,
    /// Span of the name token
    pub span: TextSpan,
    pub scope: ScopeId,
    pub initializer: Option<Node<'a>>,
    /// The binding takes the element type of `initializer` (enhanced `for`)
    pub element_of_initializer: bool,
    pub assignments: Vec<Assignment<'a>>,
}

/// An identifier used as a value that no binding, inherited field or
/// static import accounts for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedSymbol {
    pub name: String,
    pub location: SourceLocation,
}

/// Nested lexical scopes of a unit plus everything bound in them.
pub struct ScopeTree<'a> {
    pub(super) scopes: Vec<Scope>,
    pub(super) bindings: Vec<Binding<'a>>,
    /// Scope-creating node id → scope
    pub(super) node_to_scope: HashMap<usize, ScopeId>,
    /// Declarator name node id → binding
    pub(super) by_name_node: HashMap<usize, BindingId>,
    pub(super) unresolved: Vec<UnresolvedSymbol>,
    pub(super) types: LocalTypeIndex,
}

impl std::fmt::Debug for ScopeTree<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeTree")
            .field("scopes", &self.scopes.len())
            .field("bindings", &self.bindings.len())
            .field("unresolved", &self.unresolved)
            .finish()
    }
}

impl<'a> ScopeTree<'a> {
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    pub fn bindings(&self) -> &[Binding<'a>] {
        &self.bindings
    }

    pub fn binding(&self, id: BindingId) -> Option<&Binding<'a>> {
        self.bindings.get(id)
    }

    /// Types declared in the unit.
    pub fn types(&self) -> &LocalTypeIndex {
        &self.types
    }

    pub fn unresolved(&self) -> &[UnresolvedSymbol] {
        &self.unresolved
    }

    /// Innermost scope containing `node`.
    pub fn scope_at(&self, node: &Node) -> ScopeId {
        let mut current = Some(*node);
        while let Some(n) = current {
            if let Some(&id) = self.node_to_scope.get(&n.id()) {
                return id;
            }
            current = n.parent();
        }
        0
    }

    /// Walk from `scope` to the unit scope.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = &Scope> + '_ {
        std::iter::successors(self.scopes.get(scope), move |s| {
            s.parent.and_then(|p| self.scopes.get(p))
        })
    }

    /// Resolve `name` as referenced at byte `offset` from inside `scope`.
    pub fn resolve(&self, name: &str, offset: usize, scope: ScopeId) -> Option<&Binding<'a>> {
        for s in self.ancestors(scope) {
            let found = s
                .bindings
                .iter()
                .rev()
                .filter_map(|&id| self.bindings.get(id))
                .find(|b| b.name == name && b.visible_from <= offset);
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// The binding a declaration introduced.
    pub fn binding_of(&self, decl: &LocalDeclaration) -> Option<&Binding<'a>> {
        self.by_name_node
            .get(&decl.name_node.id())
            .and_then(|&id| self.bindings.get(id))
    }

    /// Names visible where `decl` is declared, innermost scope first.
    /// Shadowed outer names are omitted; the declared name itself is not yet visible.
    pub fn bindings_in_scope(&self, decl: &LocalDeclaration) -> Vec<&str> {
        let offset = decl.name_node.start_byte();
        let scope = self.scope_at(&decl.name_node);
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for s in self.ancestors(scope) {
            for &id in &s.bindings {
                let Some(b) = self.bindings.get(id) else {
                    continue;
                };
                if b.visible_from <= offset && seen.insert(b.name.as_str()) {
                    names.push(b.name.as_str());
                }
            }
        }
        names
    }

    /// FQN of the nearest class-like scope around `scope`.
    pub fn enclosing_class(&self, scope: ScopeId) -> Option<&str> {
        self.ancestors(scope).find_map(|s| match &s.kind {
            ScopeKind::Class(fqn) => Some(fqn.as_str()),
            _ => None,
        })
    }
}
