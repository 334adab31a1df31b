//! Scope Builder implementation.
//!
//! Walks the whole unit once, registering scopes, bindings, later writes to
//! those bindings, and value references nothing in the file accounts for.

use super::tree::{
    Assignment, AssignmentOp, Binding, BindingId, BindingKind, Scope, ScopeId, ScopeKind,
    ScopeTree, UnresolvedSymbol,
};
use crate::inference::JavaTypeSystem;
use crate::inference::adapters::LocalTypeIndex;
use crate::inference::core::normalization::parse_type_node;
use crate::parser::CompilationUnit;
use crate::parser::utils::{
    count_dimensions, enclosing_type_parameters, has_final, location_of, named_child_of_kind,
    node_text, span_of,
};
use std::collections::HashMap;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Parents under which a bare identifier is read as a value.
const VALUE_CONTEXTS: &[&str] = &[
    "binary_expression",
    "unary_expression",
    "update_expression",
    "assignment_expression",
    "ternary_expression",
    "parenthesized_expression",
    "argument_list",
    "array_access",
    "array_initializer",
    "return_statement",
    "yield_statement",
    "throw_statement",
    "expression_statement",
];

/// Builds the [`ScopeTree`] for one unit.
pub struct ScopeBuilder<'a, 't> {
    unit: &'a CompilationUnit,
    ts: &'t dyn JavaTypeSystem,
    types: &'t LocalTypeIndex,
    /// Last segment of single static imports
    static_names: Vec<String>,
    /// Owner types of static on-demand imports
    static_owners: Vec<String>,
    scopes: Vec<Scope>,
    bindings: Vec<Binding<'a>>,
    node_to_scope: HashMap<usize, ScopeId>,
    by_name_node: HashMap<usize, BindingId>,
    unresolved: Vec<UnresolvedSymbol>,
}

impl<'a, 't> ScopeBuilder<'a, 't> {
    pub fn new(
        unit: &'a CompilationUnit,
        ts: &'t dyn JavaTypeSystem,
        types: &'t LocalTypeIndex,
    ) -> Self {
        let mut static_names = Vec::new();
        let mut static_owners = Vec::new();
        for import in unit.imports().iter().filter(|i| i.is_static) {
            if import.is_wildcard {
                static_owners.push(import.path.clone());
            } else if let Some((_, name)) = import.path.rsplit_once('.') {
                static_names.push(name.to_string());
            }
        }

        Self {
            unit,
            ts,
            types,
            static_names,
            static_owners,
            scopes: Vec::new(),
            bindings: Vec::new(),
            node_to_scope: HashMap::new(),
            by_name_node: HashMap::new(),
            unresolved: Vec::new(),
        }
    }

    /// Walk the unit. The returned tree carries an empty type index; the
    /// caller moves the real one in once the builder's borrow ends.
    pub fn build(mut self) -> ScopeTree<'a> {
        let root = self.unit.root();
        let unit_scope = self.push_scope(root, None, ScopeKind::Unit);
        self.visit(root, unit_scope);

        ScopeTree {
            scopes: self.scopes,
            bindings: self.bindings,
            node_to_scope: self.node_to_scope,
            by_name_node: self.by_name_node,
            unresolved: self.unresolved,
            types: LocalTypeIndex::default(),
        }
    }

    fn source(&self) -> &'a str {
        self.unit.source()
    }

    fn visit(&mut self, node: Node<'a>, scope: ScopeId) {
        let mut current = scope;
        if node.id() != self.unit.root().id() {
            if let Some(kind) = self.scope_kind(&node) {
                current = self.push_scope(node, Some(scope), kind);
                self.declare_header(node, current);
            }
        }

        match node.kind() {
            "local_variable_declaration" => self.declare_locals(node, current),
            "resource" => self.declare_resource(node, current),
            "instanceof_expression" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let ty = node
                        .child_by_field_name("right")
                        .map(|t| self.parse_type(&t))
                        .unwrap_or_default();
                    self.declare_simple(name, ty, BindingKind::Pattern, name.end_byte(), current);
                }
            }
            "type_pattern" => {
                let mut cursor = node.walk();
                let children: Vec<Node<'a>> = node.named_children(&mut cursor).collect();
                if let (Some(ty), Some(name)) = (children.first(), children.last()) {
                    if name.kind() == "identifier" && ty.id() != name.id() {
                        let ty = self.parse_type(ty);
                        self.declare_simple(*name, ty, BindingKind::Pattern, name.end_byte(), current);
                    }
                }
            }
            "assignment_expression" => self.record_assignment(node, current),
            "update_expression" => self.record_update(node, current),
            "identifier" => self.check_reference(node, current),
            _ => {}
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node.children(&mut cursor).collect();
        for child in children {
            self.visit(child, current);
        }
    }

    fn scope_kind(&self, node: &Node) -> Option<ScopeKind> {
        let kind = node.kind();
        if TYPE_DECLARATIONS.contains(&kind) {
            let fqn = self
                .types
                .fqn_of(node)
                .map(str::to_string)
                .or_else(|| {
                    node.child_by_field_name("name")
                        .map(|n| node_text(&n, self.source()).to_string())
                })
                .unwrap_or_default();
            return Some(ScopeKind::Class(fqn));
        }
        match kind {
            "class_body"
                if node
                    .parent()
                    .is_some_and(|p| p.kind() == "object_creation_expression") =>
            {
                let created = node
                    .parent()
                    .and_then(|p| p.child_by_field_name("type"))
                    .map(|t| self.parse_type(&t))
                    .and_then(|t| t.erasure().map(str::to_string))
                    .unwrap_or_default();
                Some(ScopeKind::Class(created))
            }
            "method_declaration" | "constructor_declaration" | "compact_constructor_declaration" => {
                Some(ScopeKind::Method)
            }
            "block" | "constructor_body" => Some(ScopeKind::Block),
            "lambda_expression" => Some(ScopeKind::Lambda),
            "for_statement" | "enhanced_for_statement" => Some(ScopeKind::Loop),
            "catch_clause" => Some(ScopeKind::Catch),
            "try_with_resources_statement" => Some(ScopeKind::Resources),
            "switch_block" => Some(ScopeKind::Switch),
            _ => None,
        }
    }

    fn push_scope(&mut self, node: Node<'a>, parent: Option<ScopeId>, kind: ScopeKind) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope {
            id,
            parent,
            kind,
            span: span_of(&node),
            bindings: Vec::new(),
        });
        self.node_to_scope.insert(node.id(), id);
        id
    }

    fn parse_type(&self, type_node: &Node) -> TypeRef {
        let params = enclosing_type_parameters(type_node, self.source());
        let ctx = self.types.resolution_context().with_type_parameters(&params);
        parse_type_node(type_node, self.source(), self.ts, &ctx)
    }

    fn add_binding(&mut self, binding: Binding<'a>, name_node: &Node) -> BindingId {
        let id = self.bindings.len();
        let scope = binding.scope;
        self.bindings.push(Binding { id, ..binding });
        if let Some(s) = self.scopes.get_mut(scope) {
            s.bindings.push(id);
        }
        self.by_name_node.insert(name_node.id(), id);
        id
    }

    fn declare_simple(
        &mut self,
        name: Node<'a>,
        declared_type: TypeRef,
        kind: BindingKind,
        visible_from: usize,
        scope: ScopeId,
    ) {
        let binding = Binding {
            id: 0,
            name: node_text(&name, self.source()).to_string(),
            kind,
            declared_type,
            declared_type_text: String::new(),
            is_var: false,
            is_final: false,
            visible_from,
            span: span_of(&name),
            scope,
            initializer: None,
            element_of_initializer: false,
            assignments: Vec::new(),
        };
        self.add_binding(binding, &name);
    }

    fn declare_header(&mut self, node: Node<'a>, scope: ScopeId) {
        let start = node.start_byte();
        match node.kind() {
            k if TYPE_DECLARATIONS.contains(&k) => {
                if let Some(params) = node.child_by_field_name("parameters") {
                    // Record components
                    self.declare_parameters(params, BindingKind::Field, start, scope);
                }
                if let Some(body) = node.child_by_field_name("body") {
                    self.declare_fields(body, start, scope);
                }
            }
            "class_body" => self.declare_fields(node, start, scope),
            "method_declaration" | "constructor_declaration" => {
                if let Some(params) = node.child_by_field_name("parameters") {
                    self.declare_parameters(params, BindingKind::Parameter, start, scope);
                }
            }
            "lambda_expression" => {
                let Some(params) = node.child_by_field_name("parameters") else {
                    return;
                };
                match params.kind() {
                    "identifier" => self.declare_simple(
                        params,
                        TypeRef::Unknown,
                        BindingKind::LambdaParameter,
                        start,
                        scope,
                    ),
                    "formal_parameters" => {
                        self.declare_parameters(params, BindingKind::LambdaParameter, start, scope)
                    }
                    _ => {
                        let mut cursor = params.walk();
                        let names: Vec<Node<'a>> = params
                            .named_children(&mut cursor)
                            .filter(|c| c.kind() == "identifier")
                            .collect();
                        for name in names {
                            self.declare_simple(
                                name,
                                TypeRef::Unknown,
                                BindingKind::LambdaParameter,
                                start,
                                scope,
                            );
                        }
                    }
                }
            }
            "catch_clause" => {
                let Some(param) = named_child_of_kind(&node, "catch_formal_parameter") else {
                    return;
                };
                let Some(name) = param.child_by_field_name("name") else {
                    return;
                };
                let ty = named_child_of_kind(&param, "catch_type")
                    .map(|ct| {
                        let mut cursor = ct.walk();
                        let mut alternatives: Vec<TypeRef> = ct
                            .named_children(&mut cursor)
                            .map(|t| self.parse_type(&t))
                            .collect();
                        if alternatives.len() == 1 {
                            alternatives.remove(0)
                        } else {
                            TypeRef::Lub(alternatives)
                        }
                    })
                    .unwrap_or_default();
                self.declare_simple(name, ty, BindingKind::CatchParameter, start, scope);
            }
            "enhanced_for_statement" => self.declare_enhanced_for(node, scope),
            _ => {}
        }
    }

    fn declare_fields(&mut self, body: Node<'a>, visible_from: usize, scope: ScopeId) {
        let mut cursor = body.walk();
        let members: Vec<Node<'a>> = body.named_children(&mut cursor).collect();
        for member in members {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    self.declare_declarators(member, BindingKind::Field, visible_from, scope);
                }
                "enum_constant" => {
                    if let Some(name) = member.child_by_field_name("name") {
                        let owner = match &self.scopes[scope].kind {
                            ScopeKind::Class(fqn) => TypeRef::id(fqn.clone()),
                            _ => TypeRef::Unknown,
                        };
                        self.declare_simple(name, owner, BindingKind::Field, visible_from, scope);
                    }
                }
                "enum_body_declarations" => self.declare_fields(member, visible_from, scope),
                _ => {}
            }
        }
    }

    fn declare_parameters(
        &mut self,
        params: Node<'a>,
        kind: BindingKind,
        visible_from: usize,
        scope: ScopeId,
    ) {
        let mut cursor = params.walk();
        let list: Vec<Node<'a>> = params.named_children(&mut cursor).collect();
        for param in list {
            match param.kind() {
                "formal_parameter" => {
                    let (Some(type_node), Some(name)) = (
                        param.child_by_field_name("type"),
                        param.child_by_field_name("name"),
                    ) else {
                        continue;
                    };
                    let ty = self.parse_type(&type_node);
                    let ty = match param.child_by_field_name("dimensions") {
                        Some(dims) if !ty.is_unknown() => {
                            TypeRef::array_of(ty, count_dimensions(&dims))
                        }
                        _ => ty,
                    };
                    self.declare_simple(name, ty, kind, visible_from, scope);
                }
                "spread_parameter" => {
                    let mut pc = param.walk();
                    let children: Vec<Node<'a>> = param.named_children(&mut pc).collect();
                    let type_node = children.iter().find(|c| {
                        !matches!(
                            c.kind(),
                            "modifiers" | "variable_declarator" | "annotation" | "marker_annotation"
                        )
                    });
                    let name = children
                        .iter()
                        .find(|c| c.kind() == "variable_declarator")
                        .and_then(|d| d.child_by_field_name("name"));
                    if let (Some(type_node), Some(name)) = (type_node, name) {
                        let ty = TypeRef::array_of(self.parse_type(type_node), 1);
                        self.declare_simple(name, ty, kind, visible_from, scope);
                    }
                }
                _ => {}
            }
        }
    }

    /// Each `declarator` of a field or local declaration.
    fn declare_declarators(
        &mut self,
        node: Node<'a>,
        kind: BindingKind,
        visible_from: usize,
        scope: ScopeId,
    ) {
        let Some(type_node) = node.child_by_field_name("type") else {
            return;
        };
        let type_text = node_text(&type_node, self.source()).to_string();
        let is_var = type_text == "var";
        let is_final = named_child_of_kind(&node, "modifiers").is_some_and(|m| has_final(&m));
        let base = self.parse_type(&type_node);

        let mut cursor = node.walk();
        let declarators: Vec<Node<'a>> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        for declarator in declarators {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            let declared_type = match declarator.child_by_field_name("dimensions") {
                Some(dims) if !base.is_unknown() => {
                    TypeRef::array_of(base.clone(), count_dimensions(&dims))
                }
                _ => base.clone(),
            };
            let binding = Binding {
                id: 0,
                name: node_text(&name, self.source()).to_string(),
                kind,
                declared_type,
                declared_type_text: type_text.clone(),
                is_var,
                is_final,
                visible_from: if kind == BindingKind::Field {
                    visible_from
                } else {
                    name.end_byte()
                },
                span: span_of(&name),
                scope,
                initializer: declarator.child_by_field_name("value"),
                element_of_initializer: false,
                assignments: Vec::new(),
            };
            self.add_binding(binding, &name);
        }
    }

    fn declare_locals(&mut self, node: Node<'a>, scope: ScopeId) {
        let in_for_init = node
            .parent()
            .is_some_and(|p| p.kind() == "for_statement");
        let kind = if in_for_init {
            BindingKind::LoopVariable
        } else {
            BindingKind::Local
        };
        self.declare_declarators(node, kind, 0, scope);
    }

    fn declare_resource(&mut self, node: Node<'a>, scope: ScopeId) {
        let (Some(type_node), Some(name)) = (
            node.child_by_field_name("type"),
            node.child_by_field_name("name"),
        ) else {
            return;
        };
        let type_text = node_text(&type_node, self.source()).to_string();
        let binding = Binding {
            id: 0,
            name: node_text(&name, self.source()).to_string(),
            kind: BindingKind::Resource,
            declared_type: self.parse_type(&type_node),
            is_var: type_text == "var",
            declared_type_text: type_text,
            is_final: true,
            visible_from: name.end_byte(),
            span: span_of(&name),
            scope,
            initializer: node.child_by_field_name("value"),
            element_of_initializer: false,
            assignments: Vec::new(),
        };
        self.add_binding(binding, &name);
    }

    fn declare_enhanced_for(&mut self, node: Node<'a>, scope: ScopeId) {
        let (Some(type_node), Some(name)) = (
            node.child_by_field_name("type"),
            node.child_by_field_name("name"),
        ) else {
            return;
        };
        let value = node.child_by_field_name("value");
        let type_text = node_text(&type_node, self.source()).to_string();
        let binding = Binding {
            id: 0,
            name: node_text(&name, self.source()).to_string(),
            kind: BindingKind::LoopVariable,
            declared_type: self.parse_type(&type_node),
            is_var: type_text == "var",
            declared_type_text: type_text,
            is_final: named_child_of_kind(&node, "modifiers").is_some_and(|m| has_final(&m)),
            visible_from: value.map(|v| v.end_byte()).unwrap_or(name.end_byte()),
            span: span_of(&name),
            scope,
            initializer: value,
            element_of_initializer: true,
            assignments: Vec::new(),
        };
        self.add_binding(binding, &name);
    }

    fn lookup(&self, name: &str, offset: usize, scope: ScopeId) -> Option<BindingId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.scopes.get(id)?;
            let found = s.bindings.iter().rev().copied().find(|&b| {
                self.bindings
                    .get(b)
                    .is_some_and(|b| b.name == name && b.visible_from <= offset)
            });
            if found.is_some() {
                return found;
            }
            current = s.parent;
        }
        None
    }

    /// Binding named by an assignment target: `x` or `this.x`.
    fn target_binding(&self, target: &Node, scope: ScopeId) -> Option<BindingId> {
        match target.kind() {
            "identifier" => self.lookup(node_text(target, self.source()), target.start_byte(), scope),
            "field_access" => {
                let object = target.child_by_field_name("object")?;
                if object.kind() != "this" {
                    return None;
                }
                let field = target.child_by_field_name("field")?;
                let name = node_text(&field, self.source());
                let mut current = Some(scope);
                while let Some(id) = current {
                    let s = self.scopes.get(id)?;
                    if matches!(s.kind, ScopeKind::Class(_)) {
                        return s.bindings.iter().copied().find(|&b| {
                            self.bindings.get(b).is_some_and(|b| {
                                b.name == name && b.kind == BindingKind::Field
                            })
                        });
                    }
                    current = s.parent;
                }
                None
            }
            _ => None,
        }
    }

    fn record_assignment(&mut self, node: Node<'a>, scope: ScopeId) {
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        let Some(id) = self.target_binding(&left, scope) else {
            return;
        };
        let operator = node
            .child_by_field_name("operator")
            .map(|op| node_text(&op, self.source()))
            .unwrap_or("=");
        let operator = if operator == "=" {
            AssignmentOp::Simple
        } else {
            AssignmentOp::Compound(operator.to_string())
        };
        let assignment = Assignment {
            span: span_of(&node),
            operator,
            value: node.child_by_field_name("right"),
        };
        if let Some(binding) = self.bindings.get_mut(id) {
            binding.assignments.push(assignment);
        }
    }

    fn record_update(&mut self, node: Node<'a>, scope: ScopeId) {
        let mut cursor = node.walk();
        let Some(target) = node.named_children(&mut cursor).next() else {
            return;
        };
        let Some(id) = self.target_binding(&target, scope) else {
            return;
        };
        if let Some(binding) = self.bindings.get_mut(id) {
            binding.assignments.push(Assignment {
                span: span_of(&node),
                operator: AssignmentOp::Increment,
                value: None,
            });
        }
    }

    fn is_value_position(node: &Node) -> bool {
        let Some(parent) = node.parent() else {
            return false;
        };
        let field_is = |field: &str| parent.child_by_field_name(field) == Some(*node);
        match parent.kind() {
            "variable_declarator" => field_is("value"),
            "cast_expression" => field_is("value"),
            "lambda_expression" => field_is("body"),
            "enhanced_for_statement" => field_is("value"),
            "instanceof_expression" => field_is("left"),
            kind => VALUE_CONTEXTS.contains(&kind),
        }
    }

    fn check_reference(&mut self, node: Node<'a>, scope: ScopeId) {
        if !Self::is_value_position(&node) {
            return;
        }
        let name = node_text(&node, self.source());
        if self.lookup(name, node.start_byte(), scope).is_some() {
            return;
        }
        if self.static_names.iter().any(|n| n == name) {
            return;
        }

        let mut current = Some(scope);
        while let Some(id) = current {
            let Some(s) = self.scopes.get(id) else {
                break;
            };
            if let ScopeKind::Class(fqn) = &s.kind {
                if !self.ts.find_member_in_hierarchy(fqn, name).is_empty() {
                    return;
                }
            }
            current = s.parent;
        }
        if self
            .static_owners
            .iter()
            .any(|owner| !self.ts.get_members(owner, name).is_empty())
        {
            return;
        }

        tracing::trace!(name, "unresolved reference");
        self.unresolved.push(UnresolvedSymbol {
            name: name.to_string(),
            location: location_of(&node),
        });
    }
}
