use super::utils::{has_final, location_between, location_of, named_child_of_kind, node_text};
use serde::Serialize;
use tree_sitter::Node;
use varscope_api::models::{SourceLocation, TextSpan};

/// Where a local variable is introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationSite {
    /// `Type name = value;` inside a block
    Statement,
    /// Init clause of a basic `for`
    ForInit,
    /// Header of an enhanced `for`; the initializer is the iterated expression
    EnhancedFor,
    /// try-with-resources resource
    Resource,
}

impl DeclarationSite {
    pub fn is_loop(self) -> bool {
        matches!(self, DeclarationSite::ForInit | DeclarationSite::EnhancedFor)
    }
}

/// One variable introduced by a local declaration. Several of these share a
/// statement when it declares more than one name.
#[derive(Debug, Clone)]
pub struct LocalDeclaration<'a> {
    pub site: DeclarationSite,
    /// `local_variable_declaration`, `enhanced_for_statement` or `resource`
    pub statement: Node<'a>,
    pub type_node: Node<'a>,
    pub name_node: Node<'a>,
    pub name: String,
    pub declared_type_text: String,
    pub initializer: Option<Node<'a>>,
    pub is_final: bool,
    pub annotations: Vec<String>,
    /// Other names declared by the same statement
    pub siblings: Vec<String>,
    /// C-style `int a[] = ...`
    pub has_name_dimensions: bool,
    pub location: SourceLocation,
}

impl<'a> LocalDeclaration<'a> {
    /// Stable identity within a unit: the id of the name node.
    pub fn key(&self) -> usize {
        self.name_node.id()
    }

    pub fn type_span(&self) -> TextSpan {
        TextSpan::new(self.type_node.start_byte(), self.type_node.end_byte())
    }

    pub fn is_already_inferred(&self) -> bool {
        self.declared_type_text == "var"
    }

    pub fn declares_multiple(&self) -> bool {
        !self.siblings.is_empty()
    }
}

pub(super) fn collect<'a>(root: Node<'a>, source: &str) -> Vec<LocalDeclaration<'a>> {
    let mut out = Vec::new();
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        match node.kind() {
            "local_variable_declaration" => {
                let site = match node.parent() {
                    Some(parent)
                        if parent.kind() == "for_statement"
                            && parent.child_by_field_name("init") == Some(node) =>
                    {
                        DeclarationSite::ForInit
                    }
                    _ => DeclarationSite::Statement,
                };
                collect_statement(node, site, source, &mut out);
            }
            "enhanced_for_statement" => {
                if let Some(decl) = enhanced_for(node, source) {
                    out.push(decl);
                }
            }
            "resource" => {
                if let Some(decl) = resource(node, source) {
                    out.push(decl);
                }
            }
            _ => {}
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return out;
            }
        }
    }
}

fn modifiers_of(node: &Node, source: &str) -> (bool, Vec<String>) {
    let Some(modifiers) = named_child_of_kind(node, "modifiers") else {
        return (false, Vec::new());
    };
    let mut cursor = modifiers.walk();
    let annotations = modifiers
        .named_children(&mut cursor)
        .filter(|c| matches!(c.kind(), "annotation" | "marker_annotation"))
        .map(|c| node_text(&c, source).to_string())
        .collect();
    (has_final(&modifiers), annotations)
}

fn collect_statement<'a>(
    node: Node<'a>,
    site: DeclarationSite,
    source: &str,
    out: &mut Vec<LocalDeclaration<'a>>,
) {
    let Some(type_node) = node.child_by_field_name("type") else {
        return;
    };
    let (is_final, annotations) = modifiers_of(&node, source);

    let mut cursor = node.walk();
    let declarators: Vec<Node<'a>> = node
        .children_by_field_name("declarator", &mut cursor)
        .collect();
    let names: Vec<String> = declarators
        .iter()
        .filter_map(|d| d.child_by_field_name("name"))
        .map(|n| node_text(&n, source).to_string())
        .collect();

    for declarator in &declarators {
        let Some(name_node) = declarator.child_by_field_name("name") else {
            continue;
        };
        let name = node_text(&name_node, source).to_string();
        let siblings = names.iter().filter(|n| **n != name).cloned().collect();
        let location = if declarators.len() == 1 {
            location_between(&type_node, declarator)
        } else {
            location_of(declarator)
        };

        out.push(LocalDeclaration {
            site,
            statement: node,
            type_node,
            name_node,
            name,
            declared_type_text: node_text(&type_node, source).to_string(),
            initializer: declarator.child_by_field_name("value"),
            is_final,
            annotations: annotations.clone(),
            siblings,
            has_name_dimensions: declarator.child_by_field_name("dimensions").is_some(),
            location,
        });
    }
}

fn enhanced_for<'a>(node: Node<'a>, source: &str) -> Option<LocalDeclaration<'a>> {
    let type_node = node.child_by_field_name("type")?;
    let name_node = node.child_by_field_name("name")?;
    let dimensions = node.child_by_field_name("dimensions");
    let (is_final, annotations) = modifiers_of(&node, source);
    let last = dimensions.unwrap_or(name_node);

    Some(LocalDeclaration {
        site: DeclarationSite::EnhancedFor,
        statement: node,
        type_node,
        name_node,
        name: node_text(&name_node, source).to_string(),
        declared_type_text: node_text(&type_node, source).to_string(),
        initializer: node.child_by_field_name("value"),
        is_final,
        annotations,
        siblings: Vec::new(),
        has_name_dimensions: dimensions.is_some(),
        location: location_between(&type_node, &last),
    })
}

fn resource<'a>(node: Node<'a>, source: &str) -> Option<LocalDeclaration<'a>> {
    // `try (existing)` reuses a variable and declares nothing.
    let type_node = node.child_by_field_name("type")?;
    let name_node = node.child_by_field_name("name")?;
    let (is_final, annotations) = modifiers_of(&node, source);

    Some(LocalDeclaration {
        site: DeclarationSite::Resource,
        statement: node,
        type_node,
        name_node,
        name: node_text(&name_node, source).to_string(),
        declared_type_text: node_text(&type_node, source).to_string(),
        initializer: node.child_by_field_name("value"),
        is_final,
        annotations,
        siblings: Vec::new(),
        has_name_dimensions: node.child_by_field_name("dimensions").is_some(),
        location: location_of(&node),
    })
}

#[cfg(test)]
mod tests {
    use crate::parser::{DeclarationSite, JavaParser};

    fn parse(body: &str) -> crate::parser::CompilationUnit {
        let src = format!("class T {{\n  void m() throws Exception {{\n{body}\n  }}\n}}\n");
        JavaParser::new().parse(&src).unwrap()
    }

    #[test]
    fn one_declaration_per_declarator() {
        let unit = parse("int x = 5, y = 10;");
        let decls = unit.declarations();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, "x");
        assert_eq!(decls[0].siblings, vec!["y".to_string()]);
        assert_eq!(decls[1].name, "y");
        assert!(decls[1].declares_multiple());
    }

    #[test]
    fn classifies_declaration_sites() {
        let unit = parse(
            "for (int i = 0; i < 3; i++) {}\n\
             for (String s : new String[0]) {}\n\
             try (java.io.StringReader r = new java.io.StringReader(\"\")) {}\n\
             final long total = 1L;",
        );
        let sites: Vec<_> = unit.declarations().iter().map(|d| d.site).collect();
        assert_eq!(
            sites,
            vec![
                DeclarationSite::ForInit,
                DeclarationSite::EnhancedFor,
                DeclarationSite::Resource,
                DeclarationSite::Statement,
            ]
        );
        let decls = unit.declarations();
        assert!(decls[3].is_final);
        assert_eq!(decls[1].declared_type_text, "String");
    }

    #[test]
    fn fields_and_parameters_are_not_local_declarations() {
        let src = "class T { int f = 1; void m(int p) { try {} catch (Exception e) {} } }";
        let unit = JavaParser::new().parse(src).unwrap();
        assert!(unit.declarations().is_empty());
    }

    #[test]
    fn records_c_style_dimensions_and_missing_initializer() {
        let unit = parse("int a[] = {1};\nString s;");
        let decls = unit.declarations();
        assert!(decls[0].has_name_dimensions);
        assert!(decls[1].initializer.is_none());
    }
}
