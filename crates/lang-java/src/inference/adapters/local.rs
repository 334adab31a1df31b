//! Types declared inside the compilation unit being analyzed.

use super::heuristic::HeuristicAdapter;
use crate::inference::core::normalization::parse_type_node;
use crate::inference::{
    InheritanceProvider, MemberInfo, MemberKind, MemberProvider, ParameterInfo, TypeInfo,
    TypeKind, TypeParameter, TypeProvider, TypeResolutionContext,
};
use crate::parser::CompilationUnit;
use crate::parser::utils::{count_dimensions, named_child_of_kind, node_text};
use std::collections::HashMap;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

const OBJECT: &str = "java.lang.Object";

/// Index of the classes, interfaces, enums and records declared in one unit.
///
/// Built in two passes: the first collects every FQN so that the second can
/// resolve supertypes and member signatures that mention types declared later
/// in the file.
#[derive(Debug, Default)]
pub struct LocalTypeIndex {
    types: HashMap<String, TypeInfo>,
    supertypes: HashMap<String, (Option<TypeRef>, Vec<TypeRef>)>,
    members: HashMap<String, Vec<MemberInfo>>,
    by_node: HashMap<usize, String>,
    order: Vec<String>,
    resolution: TypeResolutionContext,
}

impl LocalTypeIndex {
    pub fn build(unit: &CompilationUnit) -> Self {
        let mut index = Self {
            resolution: base_resolution(unit),
            ..Self::default()
        };

        let mut found = Vec::new();
        collect_type_declarations(unit.root(), unit.package(), None, unit.source(), &mut found);
        for (node, fqn) in &found {
            index.by_node.insert(node.id(), fqn.clone());
            index.order.push(fqn.clone());
        }
        index.resolution.known_fqns = index.order.clone();

        for (node, fqn) in &found {
            index.index_type(node, fqn, unit.source());
        }

        tracing::trace!(types = index.order.len(), "indexed local types");
        index
    }

    /// FQN of a class-like declaration node.
    pub fn fqn_of(&self, node: &Node) -> Option<&str> {
        self.by_node.get(&node.id()).map(String::as_str)
    }

    /// All declared FQNs in source order.
    pub fn fqns(&self) -> &[String] {
        &self.order
    }

    /// Package, imports and declared types of the unit.
    pub fn resolution_context(&self) -> &TypeResolutionContext {
        &self.resolution
    }

    /// The type of `this` inside `fqn`: generic over its own parameters.
    pub fn this_type(&self, fqn: &str) -> TypeRef {
        match self.types.get(fqn) {
            Some(info) if !info.type_parameters.is_empty() => TypeRef::generic(
                fqn,
                info.type_parameters
                    .iter()
                    .map(|p| TypeRef::id(p.name.clone()))
                    .collect(),
            ),
            _ => TypeRef::id(fqn),
        }
    }

    fn index_type(&mut self, node: &Node, fqn: &str, source: &str) {
        let kind = match node.kind() {
            "interface_declaration" => TypeKind::Interface,
            "enum_declaration" => TypeKind::Enum,
            "record_declaration" => TypeKind::Record,
            "annotation_type_declaration" => TypeKind::Annotation,
            _ => TypeKind::Class,
        };

        let type_parameters = node
            .child_by_field_name("type_parameters")
            .map(|tp| type_parameters_of(&tp, source))
            .unwrap_or_default();
        let param_names: Vec<String> = type_parameters.iter().map(|p| p.name.clone()).collect();
        let ctx = self.resolution.with_type_parameters(&param_names);

        let resolve = |n: &Node| parse_type_node(n, source, &HeuristicAdapter, &ctx);

        let superclass = match kind {
            TypeKind::Interface | TypeKind::Annotation => None,
            TypeKind::Enum => Some(TypeRef::generic("java.lang.Enum", vec![TypeRef::id(fqn)])),
            TypeKind::Record => Some(TypeRef::id(OBJECT)),
            TypeKind::Class => Some(
                node.child_by_field_name("superclass")
                    .and_then(|sc| first_type_child(&sc))
                    .map(|t| resolve(&t))
                    .unwrap_or_else(|| TypeRef::id(OBJECT)),
            ),
        };

        let interface_list = match kind {
            TypeKind::Interface => named_child_of_kind(node, "extends_interfaces"),
            _ => node.child_by_field_name("interfaces"),
        };
        let interfaces = interface_list
            .and_then(|n| named_child_of_kind(&n, "type_list"))
            .map(|list| {
                let mut cursor = list.walk();
                list.named_children(&mut cursor)
                    .map(|t| resolve(&t))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let modifiers = named_child_of_kind(node, "modifiers")
            .map(|m| modifier_keywords(&m, source))
            .unwrap_or_default();

        let mut members = Vec::new();
        if kind == TypeKind::Record {
            if let Some(params) = node.child_by_field_name("parameters") {
                for (name, ty) in formal_parameters(&params, source, &ctx) {
                    members.push(field(fqn, &name, ty.clone(), vec!["private".into(), "final".into()]));
                    members.push(method(fqn, &name, ty, Vec::new(), vec!["public".into()], Vec::new()));
                }
            }
        }
        if kind == TypeKind::Enum {
            let this = TypeRef::id(fqn);
            members.push(method(
                fqn,
                "values",
                TypeRef::array_of(this.clone(), 1),
                Vec::new(),
                vec!["public".into(), "static".into()],
                Vec::new(),
            ));
            members.push(method(
                fqn,
                "valueOf",
                this,
                vec![ParameterInfo {
                    name: "name".into(),
                    type_ref: TypeRef::id("java.lang.String"),
                    is_varargs: false,
                }],
                vec!["public".into(), "static".into()],
                Vec::new(),
            ));
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.collect_members(&body, fqn, kind, source, &ctx, &mut members);
        }

        self.types.insert(
            fqn.to_string(),
            TypeInfo {
                fqn: fqn.to_string(),
                kind,
                modifiers,
                type_parameters,
            },
        );
        self.supertypes.insert(fqn.to_string(), (superclass, interfaces));
        self.members.insert(fqn.to_string(), members);
    }

    fn collect_members(
        &self,
        body: &Node,
        owner: &str,
        kind: TypeKind,
        source: &str,
        ctx: &TypeResolutionContext,
        out: &mut Vec<MemberInfo>,
    ) {
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match child.kind() {
                "field_declaration" | "constant_declaration" => {
                    let mut modifiers = named_child_of_kind(&child, "modifiers")
                        .map(|m| modifier_keywords(&m, source))
                        .unwrap_or_default();
                    if kind == TypeKind::Interface || child.kind() == "constant_declaration" {
                        modifiers.push("static".into());
                    }
                    let Some(type_node) = child.child_by_field_name("type") else {
                        continue;
                    };
                    let base = parse_type_node(&type_node, source, &HeuristicAdapter, ctx);
                    let mut decl_cursor = child.walk();
                    for declarator in child.children_by_field_name("declarator", &mut decl_cursor) {
                        let Some(name) = declarator.child_by_field_name("name") else {
                            continue;
                        };
                        let ty = with_extra_dimensions(base.clone(), &declarator);
                        out.push(field(owner, node_text(&name, source), ty, modifiers.clone()));
                    }
                }
                "method_declaration" => {
                    let Some(name) = child.child_by_field_name("name") else {
                        continue;
                    };
                    let method_params: Vec<String> = child
                        .child_by_field_name("type_parameters")
                        .map(|tp| {
                            type_parameters_of(&tp, source)
                                .into_iter()
                                .map(|p| p.name)
                                .collect()
                        })
                        .unwrap_or_default();
                    let method_ctx = ctx.with_type_parameters(&method_params);
                    let ret = child
                        .child_by_field_name("type")
                        .map(|t| parse_type_node(&t, source, &HeuristicAdapter, &method_ctx))
                        .unwrap_or_default();
                    let ret = match child.child_by_field_name("dimensions") {
                        Some(dims) => TypeRef::array_of(ret, count_dimensions(&dims)),
                        None => ret,
                    };
                    let parameters = child
                        .child_by_field_name("parameters")
                        .map(|p| parameter_infos(&p, source, &method_ctx))
                        .unwrap_or_default();
                    let mut modifiers = named_child_of_kind(&child, "modifiers")
                        .map(|m| modifier_keywords(&m, source))
                        .unwrap_or_default();
                    if kind == TypeKind::Interface && !modifiers.iter().any(|m| m == "private") {
                        modifiers.push("public".into());
                    }
                    out.push(method(
                        owner,
                        node_text(&name, source),
                        ret,
                        parameters,
                        modifiers,
                        method_params,
                    ));
                }
                "enum_body_declarations" => {
                    self.collect_members(&child, owner, kind, source, ctx, out);
                }
                "enum_constant" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        out.push(field(
                            owner,
                            node_text(&name, source),
                            TypeRef::id(owner),
                            vec!["public".into(), "static".into(), "final".into()],
                        ));
                    }
                }
                _ => {}
            }
        }
    }
}

fn base_resolution(unit: &CompilationUnit) -> TypeResolutionContext {
    let mut ctx = TypeResolutionContext {
        package: unit.package().map(str::to_string),
        ..TypeResolutionContext::default()
    };
    for import in unit.imports().iter().filter(|i| !i.is_static) {
        if import.is_wildcard {
            ctx.on_demand.push(import.path.clone());
        } else {
            ctx.imports.push(import.path.clone());
        }
    }
    ctx
}

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

fn collect_type_declarations<'a>(
    node: Node<'a>,
    package: Option<&str>,
    outer: Option<&str>,
    source: &str,
    out: &mut Vec<(Node<'a>, String)>,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if TYPE_DECLARATIONS.contains(&child.kind()) {
            let Some(name) = child.child_by_field_name("name") else {
                continue;
            };
            let name = node_text(&name, source);
            let fqn = match (outer, package) {
                (Some(outer), _) => format!("{outer}.{name}"),
                (None, Some(pkg)) => format!("{pkg}.{name}"),
                (None, None) => name.to_string(),
            };
            out.push((child, fqn.clone()));
            collect_type_declarations(child, package, Some(&fqn), source, out);
        } else {
            collect_type_declarations(child, package, outer, source, out);
        }
    }
}

fn first_type_child<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| !matches!(c.kind(), "annotation" | "marker_annotation"))
}

fn type_parameters_of(node: &Node, source: &str) -> Vec<TypeParameter> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() == "type_parameter")
        .filter_map(|tp| {
            let name = named_child_of_kind(&tp, "type_identifier")
                .or_else(|| named_child_of_kind(&tp, "identifier"))?;
            let bounds = named_child_of_kind(&tp, "type_bound")
                .map(|b| {
                    let mut bc = b.walk();
                    b.named_children(&mut bc)
                        .map(|t| node_text(&t, source).to_string())
                        .collect()
                })
                .unwrap_or_default();
            Some(TypeParameter {
                name: node_text(&name, source).to_string(),
                bounds,
            })
        })
        .collect()
}

fn modifier_keywords(modifiers: &Node, source: &str) -> Vec<String> {
    let mut cursor = modifiers.walk();
    modifiers
        .children(&mut cursor)
        .filter(|c| !matches!(c.kind(), "annotation" | "marker_annotation"))
        .map(|c| node_text(&c, source).to_string())
        .collect()
}

fn with_extra_dimensions(ty: TypeRef, declarator: &Node) -> TypeRef {
    match declarator.child_by_field_name("dimensions") {
        Some(dims) if !ty.is_unknown() => TypeRef::array_of(ty, count_dimensions(&dims)),
        _ => ty,
    }
}

/// `(name, type)` for each `formal_parameter` / `spread_parameter`.
fn formal_parameters(
    params: &Node,
    source: &str,
    ctx: &TypeResolutionContext,
) -> Vec<(String, TypeRef)> {
    parameter_infos(params, source, ctx)
        .into_iter()
        .map(|p| (p.name, p.type_ref))
        .collect()
}

fn parameter_infos(params: &Node, source: &str, ctx: &TypeResolutionContext) -> Vec<ParameterInfo> {
    let mut cursor = params.walk();
    let mut out = Vec::new();
    for param in params.named_children(&mut cursor) {
        match param.kind() {
            "formal_parameter" => {
                let (Some(type_node), Some(name)) = (
                    param.child_by_field_name("type"),
                    param.child_by_field_name("name"),
                ) else {
                    continue;
                };
                let ty = parse_type_node(&type_node, source, &HeuristicAdapter, ctx);
                out.push(ParameterInfo {
                    name: node_text(&name, source).to_string(),
                    type_ref: with_extra_dimensions(ty, &param),
                    is_varargs: false,
                });
            }
            "spread_parameter" => {
                let mut pc = param.walk();
                let children: Vec<Node> = param.named_children(&mut pc).collect();
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
                let (Some(type_node), Some(name)) = (type_node, name) else {
                    continue;
                };
                let element = parse_type_node(type_node, source, &HeuristicAdapter, ctx);
                out.push(ParameterInfo {
                    name: node_text(&name, source).to_string(),
                    type_ref: TypeRef::array_of(element, 1),
                    is_varargs: true,
                });
            }
            _ => {}
        }
    }
    out
}

fn field(owner: &str, name: &str, ty: TypeRef, modifiers: Vec<String>) -> MemberInfo {
    MemberInfo {
        name: name.to_string(),
        fqn: format!("{owner}#{name}"),
        kind: MemberKind::Field,
        declaring_type: owner.to_string(),
        type_ref: ty,
        parameters: None,
        modifiers,
        type_parameters: Vec::new(),
    }
}

fn method(
    owner: &str,
    name: &str,
    ret: TypeRef,
    parameters: Vec<ParameterInfo>,
    modifiers: Vec<String>,
    type_parameters: Vec<String>,
) -> MemberInfo {
    MemberInfo {
        name: name.to_string(),
        fqn: format!("{owner}#{name}"),
        kind: MemberKind::Method,
        declaring_type: owner.to_string(),
        type_ref: ret,
        parameters: Some(parameters),
        modifiers,
        type_parameters,
    }
}

impl TypeProvider for LocalTypeIndex {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.types.get(fqn).cloned()
    }

    fn resolve_type_name(&self, type_name: &str, ctx: &TypeResolutionContext) -> Option<String> {
        HeuristicAdapter.resolve_type_name(type_name, ctx)
    }
}

impl InheritanceProvider for LocalTypeIndex {
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef> {
        self.supertypes.get(fqn).and_then(|(sup, _)| sup.clone())
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef> {
        self.supertypes
            .get(fqn)
            .map(|(_, ifaces)| ifaces.clone())
            .unwrap_or_default()
    }
}

impl MemberProvider for LocalTypeIndex {
    fn get_members(&self, type_fqn: &str, member_name: &str) -> Vec<MemberInfo> {
        self.members
            .get(type_fqn)
            .map(|ms| ms.iter().filter(|m| m.name == member_name).cloned().collect())
            .unwrap_or_default()
    }

    fn get_all_members(&self, type_fqn: &str) -> Vec<MemberInfo> {
        self.members.get(type_fqn).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::JavaParser;

    const SRC: &str = r#"
package com.acme;

import java.util.List;

public class Repo<T> extends Base implements Iterable<T> {
    private List<T> items;
    static final int LIMIT = 10, NAMES[] = {};

    public T first() { return items.get(0); }
    <R> R map(java.util.function.Function<T, R> f, String... tags) { return null; }

    enum Mode { FAST, SLOW }
}

class Base {}

interface Shape extends Comparable<Shape> { double area(); }

record Point(int x, int y) {}
"#;

    fn index() -> LocalTypeIndex {
        let unit = JavaParser::new().parse(SRC).unwrap();
        LocalTypeIndex::build(&unit)
    }

    #[test]
    fn collects_nested_and_top_level_types() {
        let index = index();
        assert_eq!(
            index.fqns(),
            &[
                "com.acme.Repo".to_string(),
                "com.acme.Repo.Mode".to_string(),
                "com.acme.Base".to_string(),
                "com.acme.Shape".to_string(),
                "com.acme.Point".to_string(),
            ]
        );
    }

    #[test]
    fn resolves_supertypes_against_declared_types() {
        let index = index();
        assert_eq!(
            index.get_superclass("com.acme.Repo"),
            Some(TypeRef::id("com.acme.Base"))
        );
        assert_eq!(
            index.get_interfaces("com.acme.Repo"),
            vec![TypeRef::generic("java.lang.Iterable", vec![TypeRef::id("T")])]
        );
        assert_eq!(index.get_superclass("com.acme.Shape"), None);
        assert_eq!(
            index.this_type("com.acme.Repo"),
            TypeRef::generic("com.acme.Repo", vec![TypeRef::id("T")])
        );
    }

    #[test]
    fn records_fields_methods_and_constants() {
        let index = index();
        let items = index.get_members("com.acme.Repo", "items");
        assert_eq!(
            items[0].type_ref,
            TypeRef::generic("java.util.List", vec![TypeRef::id("T")])
        );
        let names = index.get_members("com.acme.Repo", "NAMES");
        assert!(names[0].is_static());
        assert_eq!(names[0].type_ref.to_string(), "int[]");

        let map = &index.get_members("com.acme.Repo", "map")[0];
        assert_eq!(map.type_parameters, vec!["R".to_string()]);
        assert_eq!(map.type_ref, TypeRef::id("R"));
        let params = map.parameters.as_ref().unwrap();
        assert!(params[1].is_varargs);

        let fast = index.get_members("com.acme.Repo.Mode", "FAST");
        assert_eq!(fast[0].type_ref, TypeRef::id("com.acme.Repo.Mode"));

        let x = index.get_members("com.acme.Point", "x");
        assert_eq!(x.len(), 2);
    }
}
