//! `new` expression inference.

use super::InferStrategy;
use crate::inference::InferContext;
use tree_sitter::Node;
use varscope_api::models::TypeRef;

/// Infer type of `new Type()` expression.
///
/// A diamond with nothing to infer from reads each type argument as
/// `Object`, which is what `var` would make of it.
pub struct NewExprInfer;

impl InferStrategy for NewExprInfer {
    fn infer(&self, node: &Node, ctx: &InferContext) -> Option<TypeRef> {
        if node.kind() != "object_creation_expression" {
            return None;
        }

        // Get the type being constructed
        let type_node = node.child_by_field_name("type")?;
        let created = ctx.parse_type(&type_node);
        if created.is_unknown() {
            return None;
        }

        if diamond_arguments(&type_node).is_none() {
            return Some(created);
        }

        let fqn = created.erasure()?;
        let arity = ctx
            .ts
            .get_type_info(fqn)
            .map(|info| info.type_parameters.len())
            .unwrap_or(0);
        if arity == 0 {
            return Some(TypeRef::id(fqn));
        }
        Some(TypeRef::generic(
            fqn,
            vec![TypeRef::id("java.lang.Object"); arity],
        ))
    }
}

/// The empty `type_arguments` node of `Foo<>`, if `type_node` is a diamond.
pub fn diamond_arguments<'a>(type_node: &Node<'a>) -> Option<Node<'a>> {
    if type_node.kind() != "generic_type" {
        return None;
    }
    let mut cursor = type_node.walk();
    let args = type_node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "type_arguments")?;
    (args.named_child_count() == 0).then_some(args)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::infer_local;
    use crate::parser::JavaParser;

    fn shown(body: &str) -> Option<String> {
        infer_local("", body, "x").map(|t| t.to_string())
    }

    #[test]
    fn explicit_type_arguments_are_kept() {
        assert_eq!(
            shown("Object x = new HashMap<String, List<Integer>>();"),
            Some("HashMap<String, List<Integer>>".into())
        );
        assert_eq!(shown("Object x = new StringBuilder();"), Some("StringBuilder".into()));
    }

    #[test]
    fn bare_diamond_infers_object_arguments() {
        assert_eq!(
            shown("Object x = new ArrayList<>();"),
            Some("ArrayList<Object>".into())
        );
    }

    #[test]
    fn finds_the_diamond_node() {
        let src = "class A { void m() { Object a = new ArrayList<>(); Object b = new ArrayList<String>(); } }";
        let unit = JavaParser::new().parse(src).unwrap();
        let decls = unit.declarations();
        let created: Vec<_> = decls
            .iter()
            .map(|d| d.initializer.unwrap().child_by_field_name("type").unwrap())
            .collect();
        let diamond = super::diamond_arguments(&created[0]).unwrap();
        assert_eq!(unit.node_text(&diamond), "<>");
        assert!(super::diamond_arguments(&created[1]).is_none());
    }
}
