mod common;

use common::wrap;
use varscope_java::JavaParser;
use varscope_java::scope::{AssignmentOp, BindingKind, ScopeKind, ScopeTree};

#[test]
fn visible_names_are_innermost_first_without_shadowed_duplicates() {
    let src = "class A {\n\
               int count;\n\
               String label;\n\
               void m(int limit) {\n\
                 int total = 0;\n\
                 for (int i = 0; i < limit; i++) {\n\
                   String label = \"inner\";\n\
                   long probe = 1L;\n\
                 }\n\
               }\n\
             }";
    let unit = JavaParser::new().parse(src).unwrap();
    let scopes = ScopeTree::build(&unit);
    let decls = unit.declarations();
    let probe = decls.iter().find(|d| d.name == "probe").unwrap();

    let names = scopes.bindings_in_scope(probe);
    assert_eq!(names, vec!["label", "i", "total", "limit", "count"]);
    assert!(!names.contains(&"probe"));
}

#[test]
fn locals_are_visible_only_after_their_declarator() {
    let src = wrap("int a = 1;\nint b = a + 1;\n{ int c = 2; }\nint d = 3;");
    let unit = JavaParser::new().parse(&src).unwrap();
    let scopes = ScopeTree::build(&unit);
    let decls = unit.declarations();

    let b = decls.iter().find(|d| d.name == "b").unwrap();
    let names = scopes.bindings_in_scope(b);
    assert!(names.contains(&"a"));
    assert!(!names.contains(&"d"));

    let d = decls.iter().find(|d| d.name == "d").unwrap();
    assert!(!scopes.bindings_in_scope(d).contains(&"c"));
}

#[test]
fn records_assignments_to_locals() {
    let src = wrap("long total = 0;\ntotal = 5;\ntotal += 2;\ntotal++;");
    let unit = JavaParser::new().parse(&src).unwrap();
    let scopes = ScopeTree::build(&unit);
    let decls = unit.declarations();
    let binding = scopes.binding_of(&decls[0]).unwrap();

    assert_eq!(binding.kind, BindingKind::Local);
    let ops: Vec<_> = binding.assignments.iter().map(|a| a.operator.clone()).collect();
    assert_eq!(
        ops,
        vec![
            AssignmentOp::Simple,
            AssignmentOp::Compound("+=".into()),
            AssignmentOp::Increment,
        ]
    );
}

#[test]
fn lambda_catch_and_pattern_bindings_get_their_own_kinds() {
    let src = wrap(
        "Object o = \"x\";\n\
         if (o instanceof String s) { int n = s.length(); }\n\
         try { } catch (IllegalStateException | IllegalArgumentException e) { }\n\
         java.util.function.Function<String, Integer> f = str -> str.length();",
    );
    let unit = JavaParser::new().parse(&src).unwrap();
    let scopes = ScopeTree::build(&unit);

    let kind_of = |name: &str| {
        scopes
            .bindings()
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.kind)
    };
    assert_eq!(kind_of("s"), Some(BindingKind::Pattern));
    assert_eq!(kind_of("e"), Some(BindingKind::CatchParameter));
    assert_eq!(kind_of("str"), Some(BindingKind::LambdaParameter));
    assert_eq!(kind_of("flag"), Some(BindingKind::Parameter));
    assert!(scopes.scopes().iter().any(|s| s.kind == ScopeKind::Lambda));
    assert!(scopes.scopes().iter().any(|s| s.kind == ScopeKind::Catch));
}

#[test]
fn unknown_identifiers_are_recorded_not_fatal() {
    let src = wrap("int n = missing + 1;");
    let unit = JavaParser::new().parse(&src).unwrap();
    let scopes = ScopeTree::build(&unit);
    let names: Vec<_> = scopes.unresolved().iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["missing"]);
}

#[test]
fn scope_parents_form_a_chain_to_the_unit() {
    let src = wrap("{ { int deep = 1; } }");
    let unit = JavaParser::new().parse(&src).unwrap();
    let scopes = ScopeTree::build(&unit);
    let decls = unit.declarations();
    let scope = scopes.scope_at(&decls[0].name_node);
    let kinds: Vec<_> = scopes.ancestors(scope).map(|s| s.kind.clone()).collect();
    assert_eq!(kinds.last(), Some(&ScopeKind::Unit));
    assert!(kinds.contains(&ScopeKind::Class("demo.Sample".into())));
    assert!(kinds.contains(&ScopeKind::Method));
}
