//! Type normalization logic.
//!
//! Converts type syntax nodes into structured, fully-qualified TypeRefs.

use super::type_system::TypeProvider;
use super::types::TypeResolutionContext;
use crate::parser::utils::{count_dimensions, node_text};
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Parse a type node into a resolved TypeRef.
///
/// `var` yields `TypeRef::Unknown`; it names no type.
pub fn parse_type_node<T: TypeProvider + ?Sized>(
    node: &Node,
    source: &str,
    ts: &T,
    ctx: &TypeResolutionContext,
) -> TypeRef {
    match node.kind() {
        "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {
            TypeRef::raw(node_text(node, source))
        }
        "type_identifier" => {
            let name = node_text(node, source);
            if name == "var" {
                TypeRef::Unknown
            } else {
                resolve_name(name, ts, ctx)
            }
        }
        "scoped_type_identifier" => {
            // Annotations may sit between segments; keep identifiers only.
            let mut segments = Vec::new();
            collect_identifiers(node, source, &mut segments);
            resolve_name(&segments.join("."), ts, ctx)
        }
        "generic_type" => {
            let mut cursor = node.walk();
            let mut base = None;
            let mut args = Vec::new();
            for child in node.named_children(&mut cursor) {
                if child.kind() == "type_arguments" {
                    args = parse_type_arguments(&child, source, ts, ctx);
                } else if base.is_none() {
                    base = Some(parse_type_node(&child, source, ts, ctx));
                }
            }
            match base {
                Some(base) if args.is_empty() => base,
                Some(base) => TypeRef::Generic {
                    base: Box::new(base),
                    args,
                },
                None => TypeRef::Unknown,
            }
        }
        "array_type" => {
            let Some(element) = node.child_by_field_name("element") else {
                return TypeRef::Unknown;
            };
            let dims = node
                .child_by_field_name("dimensions")
                .map(|d| count_dimensions(&d))
                .unwrap_or(1);
            let element = parse_type_node(&element, source, ts, ctx);
            if element.is_unknown() {
                return TypeRef::Unknown;
            }
            TypeRef::array_of(element, dims.max(1))
        }
        "wildcard" => {
            let mut cursor = node.walk();
            let mut is_upper_bound = true;
            let mut bound = None;
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "super" => is_upper_bound = false,
                    "annotation" | "marker_annotation" => {}
                    _ if child.is_named() => {
                        bound = Some(Box::new(parse_type_node(&child, source, ts, ctx)))
                    }
                    _ => {}
                }
            }
            TypeRef::Wildcard {
                bound,
                is_upper_bound,
            }
        }
        "annotated_type" => {
            let mut cursor = node.walk();
            let last = node
                .named_children(&mut cursor)
                .filter(|c| !matches!(c.kind(), "annotation" | "marker_annotation"))
                .last();
            match last {
                Some(inner) => parse_type_node(&inner, source, ts, ctx),
                None => TypeRef::Unknown,
            }
        }
        _ => TypeRef::Unknown,
    }
}

/// Arguments of a `type_arguments` node; empty for a diamond.
pub fn parse_type_arguments<T: TypeProvider + ?Sized>(
    node: &Node,
    source: &str,
    ts: &T,
    ctx: &TypeResolutionContext,
) -> Vec<TypeRef> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !matches!(c.kind(), "annotation" | "marker_annotation"))
        .map(|arg| parse_type_node(&arg, source, ts, ctx))
        .collect()
}

fn resolve_name<T: TypeProvider + ?Sized>(
    name: &str,
    ts: &T,
    ctx: &TypeResolutionContext,
) -> TypeRef {
    if ctx.type_parameters.iter().any(|p| p == name) {
        return TypeRef::id(name);
    }
    match ts.resolve_type_name(name, ctx) {
        Some(fqn) => TypeRef::Id(fqn),
        None => TypeRef::raw(name),
    }
}

fn collect_identifiers(node: &Node, source: &str, out: &mut Vec<String>) {
    match node.kind() {
        "type_identifier" | "identifier" => out.push(node_text(node, source).to_string()),
        "scoped_type_identifier" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                collect_identifiers(&child, source, out);
            }
        }
        _ => {}
    }
}
