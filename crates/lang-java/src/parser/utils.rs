use tree_sitter::Node;
use varscope_api::models::{Range, SourceLocation, TextSpan};

pub fn range_from_ts(range: tree_sitter::Range) -> Range {
    Range {
        start_line: range.start_point.row,
        start_col: range.start_point.column,
        end_line: range.end_point.row,
        end_col: range.end_point.column,
    }
}

pub fn span_of(node: &Node) -> TextSpan {
    TextSpan::new(node.start_byte(), node.end_byte())
}

pub fn location_of(node: &Node) -> SourceLocation {
    SourceLocation {
        span: span_of(node),
        range: range_from_ts(node.range()),
    }
}

/// Location covering `first` through `last` inclusive.
pub fn location_between(first: &Node, last: &Node) -> SourceLocation {
    let start = first.range();
    let end = last.range();
    SourceLocation {
        span: TextSpan::new(first.start_byte(), last.end_byte()),
        range: Range {
            start_line: start.start_point.row,
            start_col: start.start_point.column,
            end_line: end.end_point.row,
            end_col: end.end_point.column,
        },
    }
}

pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Number of `[]` pairs in a `dimensions` node.
pub fn count_dimensions(node: &Node) -> usize {
    let mut cursor = node.walk();
    node.children(&mut cursor).filter(|c| c.kind() == "[").count()
}

/// Strip any number of enclosing parentheses.
pub fn unparenthesize<'a>(node: Node<'a>) -> Node<'a> {
    let mut current = node;
    while current.kind() == "parenthesized_expression" {
        let mut cursor = current.walk();
        let inner = current.named_children(&mut cursor).next();
        match inner {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

/// First named child of the given kind.
pub fn named_child_of_kind<'a>(node: &Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() == kind)
}

/// Whether a `modifiers` node carries the `final` keyword.
pub fn has_final(modifiers: &Node) -> bool {
    let mut cursor = modifiers.walk();
    modifiers.children(&mut cursor).any(|c| c.kind() == "final")
}

/// Depth-first search for any descendant (including `node`) matching `pred`.
pub fn any_descendant(node: &Node, pred: &dyn Fn(&Node) -> bool) -> bool {
    let mut cursor = node.walk();
    loop {
        if pred(&cursor.node()) {
            return true;
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.node().id() == node.id() {
                return false;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return false;
            }
        }
    }
}

const GENERIC_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "record_declaration",
    "method_declaration",
    "constructor_declaration",
];

/// Names of the type parameters declared by generic classes and methods
/// enclosing `node`, innermost first.
pub fn enclosing_type_parameters(node: &Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = node.parent();
    while let Some(n) = current {
        if GENERIC_DECLARATIONS.contains(&n.kind()) {
            if let Some(params) = n.child_by_field_name("type_parameters") {
                let mut cursor = params.walk();
                for param in params.named_children(&mut cursor) {
                    if param.kind() != "type_parameter" {
                        continue;
                    }
                    let mut pc = param.walk();
                    let name = param
                        .named_children(&mut pc)
                        .find(|c| matches!(c.kind(), "type_identifier" | "identifier"));
                    if let Some(name) = name {
                        names.push(node_text(&name, source).to_string());
                    }
                }
            }
        }
        current = n.parent();
    }
    names
}
