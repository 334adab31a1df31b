//! Parser adapter: turns Java source text into an immutable [`CompilationUnit`].
//!
//! Parsing is strict. Any `ERROR` or `MISSING` node in the tree rejects the
//! whole file with a [`ParseError`]; there is no partial analysis.

mod declarations;
pub mod utils;

pub use declarations::{DeclarationSite, LocalDeclaration};

use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;
use tree_sitter::{Node, Parser, Query, QueryCursor, StreamingIterator, Tree};

static HEADER_QUERY: Lazy<Query> = Lazy::new(|| {
    let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();
    Query::new(&language, include_str!("queries/java_header.scm"))
        .expect("Failed to load Java header query - this is a fatal error")
});

/// Syntax error reported at the first offending node (1-based position).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// One `import` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    /// Dotted path without the trailing `.*`
    pub path: String,
    pub is_static: bool,
    pub is_wildcard: bool,
}

#[derive(Clone)]
pub struct JavaParser {
    pub language: tree_sitter::Language,
}

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }

    /// Parse a whole compilation unit. A fresh tree-sitter parser is created
    /// per call so one `JavaParser` can be shared across threads.
    pub fn parse(&self, source: &str) -> Result<CompilationUnit, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language).map_err(|e| ParseError {
            line: 0,
            column: 0,
            message: format!("grammar rejected: {e}"),
        })?;

        let tree = parser.parse(source, None).ok_or_else(|| ParseError {
            line: 0,
            column: 0,
            message: "parser produced no tree".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(first_syntax_error(root, source));
        }

        let (package, imports) = extract_header(&tree, source);

        Ok(CompilationUnit {
            source: source.to_string(),
            tree,
            package,
            imports,
        })
    }
}

fn first_syntax_error(root: Node, source: &str) -> ParseError {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            let message = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                let text = node.utf8_text(source.as_bytes()).unwrap_or("");
                let snippet: String = text.chars().take(24).collect();
                format!("unexpected `{}`", snippet.trim())
            };
            return ParseError {
                line: pos.row + 1,
                column: pos.column + 1,
                message,
            };
        }

        // Only descend into subtrees that actually contain the error.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                let pos = root.start_position();
                return ParseError {
                    line: pos.row + 1,
                    column: pos.column + 1,
                    message: "syntax error".to_string(),
                };
            }
        }
    }
}

fn extract_header(tree: &Tree, source: &str) -> (Option<String>, Vec<Import>) {
    let query: &Query = &HEADER_QUERY;
    let package_idx = query.capture_index_for_name("package");
    let import_idx = query.capture_index_for_name("import");

    let mut package = None;
    let mut imports = Vec::new();

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, tree.root_node(), source.as_bytes());
    while let Some(mat) = matches.next() {
        for cap in mat.captures {
            if Some(cap.index) == package_idx {
                package = cap
                    .node
                    .utf8_text(source.as_bytes())
                    .ok()
                    .map(|s| s.split_whitespace().collect::<String>());
            } else if Some(cap.index) == import_idx {
                if let Some(import) = read_import(cap.node, source) {
                    imports.push(import);
                }
            }
        }
    }

    (package, imports)
}

fn read_import(node: Node, source: &str) -> Option<Import> {
    let mut is_static = false;
    let mut is_wildcard = false;
    let mut path = None;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "static" => is_static = true,
            "asterisk" => is_wildcard = true,
            "identifier" | "scoped_identifier" => {
                let text = child.utf8_text(source.as_bytes()).ok()?;
                path = Some(text.split_whitespace().collect::<String>());
            }
            _ => {}
        }
    }

    Some(Import {
        path: path?,
        is_static,
        is_wildcard,
    })
}

/// A parsed, syntactically valid Java file. Immutable once built.
pub struct CompilationUnit {
    source: String,
    tree: Tree,
    package: Option<String>,
    imports: Vec<Import>,
}

impl std::fmt::Debug for CompilationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilationUnit")
            .field("package", &self.package)
            .field("imports", &self.imports)
            .field("len", &self.source.len())
            .finish()
    }
}

impl CompilationUnit {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Exact source text covered by `node`.
    pub fn node_text<'a>(&'a self, node: &Node) -> &'a str {
        utils::node_text(node, &self.source)
    }

    /// Every local variable declaration in source order.
    pub fn declarations(&self) -> Vec<LocalDeclaration<'_>> {
        declarations::collect(self.root(), &self.source)
    }
}
