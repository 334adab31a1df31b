//! The oracle over a hand-built type system instead of the JDK table.

use std::collections::HashMap;
use varscope_api::models::TypeRef;
use varscope_java::JavaParser;
use varscope_java::inference::{
    Divergence, InheritanceProvider, MemberInfo, MemberKind, MemberProvider, TypeInfo, TypeKind,
    TypeOracle, TypeParameter, TypeProvider, TypeResolutionContext,
};
use varscope_java::scope::ScopeTree;

/// A mock type system for testing.
///
/// Can be built using a fluent API.
#[derive(Default)]
pub struct MockTypeSystem {
    types: HashMap<String, TypeInfo>,
    inheritance: HashMap<String, (Option<String>, Vec<String>)>, // (superclass, interfaces)
    members: HashMap<String, Vec<MemberInfo>>,
}

impl MockTypeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(self, fqn: &str, super_class: Option<&str>) -> Self {
        self.add_type(fqn, TypeKind::Class, super_class, vec![], vec![])
    }

    pub fn add_interface(self, fqn: &str) -> Self {
        self.add_type(fqn, TypeKind::Interface, None, vec![], vec![])
    }

    pub fn add_type(
        mut self,
        fqn: &str,
        kind: TypeKind,
        super_class: Option<&str>,
        interfaces: Vec<&str>,
        type_parameters: Vec<&str>,
    ) -> Self {
        self.types.insert(
            fqn.to_string(),
            TypeInfo {
                fqn: fqn.to_string(),
                kind,
                modifiers: vec![],
                type_parameters: type_parameters
                    .into_iter()
                    .map(TypeParameter::unbounded)
                    .collect(),
            },
        );
        self.inheritance.insert(
            fqn.to_string(),
            (
                super_class.map(|s| s.to_string()),
                interfaces.into_iter().map(|s| s.to_string()).collect(),
            ),
        );
        self
    }

    /// Add a no-argument method.
    pub fn add_method(mut self, owner: &str, name: &str, returns: TypeRef) -> Self {
        self.members.entry(owner.to_string()).or_default().push(MemberInfo {
            name: name.to_string(),
            fqn: format!("{owner}#{name}"),
            kind: MemberKind::Method,
            declaring_type: owner.to_string(),
            type_ref: returns,
            parameters: Some(vec![]),
            modifiers: vec!["public".to_string()],
            type_parameters: vec![],
        });
        self
    }
}

impl TypeProvider for MockTypeSystem {
    fn get_type_info(&self, fqn: &str) -> Option<TypeInfo> {
        self.types.get(fqn).cloned()
    }

    fn resolve_type_name(
        &self,
        simple_name: &str,
        context: &TypeResolutionContext,
    ) -> Option<String> {
        if self.types.contains_key(simple_name) {
            return Some(simple_name.to_string());
        }
        let in_package = match &context.package {
            Some(pkg) => format!("{pkg}.{simple_name}"),
            None => simple_name.to_string(),
        };
        self.types.contains_key(&in_package).then_some(in_package)
    }
}

impl InheritanceProvider for MockTypeSystem {
    fn get_superclass(&self, fqn: &str) -> Option<TypeRef> {
        self.inheritance
            .get(fqn)
            .and_then(|(sup, _)| sup.as_ref())
            .map(TypeRef::id)
    }

    fn get_interfaces(&self, fqn: &str) -> Vec<TypeRef> {
        self.inheritance
            .get(fqn)
            .map(|(_, ifaces)| ifaces.iter().map(TypeRef::id).collect())
            .unwrap_or_default()
    }
}

impl MemberProvider for MockTypeSystem {
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

fn widgets() -> MockTypeSystem {
    MockTypeSystem::new()
        .add_interface("com.acme.Widget")
        .add_type(
            "com.acme.Gadget",
            TypeKind::Class,
            None,
            vec!["com.acme.Widget"],
            vec![],
        )
        .add_class("com.acme.Factory", None)
        .add_method("com.acme.Factory", "make", TypeRef::id("com.acme.Gadget"))
        .add_method("com.acme.Factory", "name", TypeRef::id("com.acme.Label"))
}

const SOURCE: &str = "package com.acme;\n\
    class Client {\n\
      void run(Factory factory) {\n\
        Widget w = factory.make();\n\
        Gadget g = factory.make();\n\
        Widget mystery = factory.unknown();\n\
      }\n\
    }\n";

#[test]
fn inferred_types_come_from_the_supplied_type_system() {
    let unit = JavaParser::new().parse(SOURCE).unwrap();
    let scopes = ScopeTree::build(&unit);
    let oracle = TypeOracle::with_type_system(&unit, &scopes, Box::new(widgets()));
    let decls = unit.declarations();

    let w = oracle.would_infer_type(&decls[0]);
    assert_eq!(w.ty, TypeRef::id("com.acme.Gadget"));
    assert_eq!(oracle.as_written_type(&decls[0]), TypeRef::id("com.acme.Widget"));
}

#[test]
fn divergence_follows_the_mock_hierarchy() {
    let unit = JavaParser::new().parse(SOURCE).unwrap();
    let scopes = ScopeTree::build(&unit);
    let oracle = TypeOracle::with_type_system(&unit, &scopes, Box::new(widgets()));
    let decls = unit.declarations();

    assert!(matches!(oracle.compare(&decls[0]), Divergence::Broader { .. }));
    assert_eq!(oracle.compare(&decls[1]), Divergence::Identical);
    assert_eq!(oracle.compare(&decls[2]), Divergence::Unresolved);
}
