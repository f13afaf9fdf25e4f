//! JavaScript syntax access over tree-sitter
//!
//! Rules never probe untyped node properties: the grammar kinds they care
//! about are captured in the closed [`NodeKind`] union, everything else maps
//! to [`NodeKind::Other`] and falls through as "not a match".

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree, TreeCursor};

use crate::span::Span;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("incompatible JavaScript grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no tree")]
    NoTree,
}

/// Parse JavaScript source into a syntax tree.
///
/// The parse is error-tolerant: malformed regions become error nodes that no
/// rule shape matches, so a single unusual construct never aborts a file.
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;
    parser.parse(source, None).ok_or(ParseError::NoTree)
}

/// The grammar kinds the rule set dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    ImportStatement,
    ImportClause,
    NamedImports,
    ImportSpecifier,
    ExpressionStatement,
    LexicalDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    ObjectPattern,
    PairPattern,
    ShorthandPropertyIdentifierPattern,
    MemberExpression,
    SubscriptExpression,
    CallExpression,
    NewExpression,
    AssignmentExpression,
    ArrowFunction,
    StatementBlock,
    ReturnStatement,
    FormalParameters,
    Arguments,
    Identifier,
    PropertyIdentifier,
    String,
    StringFragment,
    Comment,
    Other,
}

impl NodeKind {
    pub fn of(node: &Node<'_>) -> Self {
        match node.kind() {
            "program" => NodeKind::Program,
            "import_statement" => NodeKind::ImportStatement,
            "import_clause" => NodeKind::ImportClause,
            "named_imports" => NodeKind::NamedImports,
            "import_specifier" => NodeKind::ImportSpecifier,
            "expression_statement" => NodeKind::ExpressionStatement,
            "lexical_declaration" => NodeKind::LexicalDeclaration,
            "variable_declaration" => NodeKind::VariableDeclaration,
            "variable_declarator" => NodeKind::VariableDeclarator,
            "object_pattern" => NodeKind::ObjectPattern,
            "pair_pattern" => NodeKind::PairPattern,
            "shorthand_property_identifier_pattern" => {
                NodeKind::ShorthandPropertyIdentifierPattern
            }
            "member_expression" => NodeKind::MemberExpression,
            "subscript_expression" => NodeKind::SubscriptExpression,
            "call_expression" => NodeKind::CallExpression,
            "new_expression" => NodeKind::NewExpression,
            "assignment_expression" => NodeKind::AssignmentExpression,
            "arrow_function" => NodeKind::ArrowFunction,
            "statement_block" => NodeKind::StatementBlock,
            "return_statement" => NodeKind::ReturnStatement,
            "formal_parameters" => NodeKind::FormalParameters,
            "arguments" => NodeKind::Arguments,
            "identifier" => NodeKind::Identifier,
            "property_identifier" => NodeKind::PropertyIdentifier,
            "string" => NodeKind::String,
            "string_fragment" => NodeKind::StringFragment,
            "comment" => NodeKind::Comment,
            _ => NodeKind::Other,
        }
    }
}

/// Depth-first preorder traversal over every node of a subtree.
///
/// The traversal never leaves the subtree: the depth counter keeps the
/// cursor from stepping to a sibling of the root during ascent.
pub fn walk<'t>(root: Node<'t>) -> Preorder<'t> {
    Preorder {
        cursor: root.walk(),
        depth: 0,
        done: false,
    }
}

pub struct Preorder<'t> {
    cursor: TreeCursor<'t>,
    depth: usize,
    done: bool,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();

        if self.cursor.goto_first_child() {
            self.depth += 1;
        } else {
            loop {
                if self.depth == 0 {
                    self.done = true;
                    break;
                }
                if self.cursor.goto_next_sibling() {
                    break;
                }
                if self.cursor.goto_parent() {
                    self.depth -= 1;
                } else {
                    self.done = true;
                    break;
                }
            }
        }

        Some(node)
    }
}

/// Source text covered by a node.
pub fn text<'a>(node: &Node<'_>, source: &'a str) -> &'a str {
    source
        .get(node.start_byte()..node.end_byte())
        .unwrap_or("")
}

/// The unquoted value of a plain string literal node.
pub fn string_value<'a>(node: &Node<'_>, source: &'a str) -> Option<&'a str> {
    if NodeKind::of(node) != NodeKind::String {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if NodeKind::of(&child) == NodeKind::StringFragment {
            return Some(text(&child, source));
        }
    }

    // A string with no fragment child is the empty literal.
    Some("")
}

/// The module path of an `import ... from '...'` statement.
pub fn import_source<'a>(node: &Node<'_>, source: &'a str) -> Option<&'a str> {
    if NodeKind::of(node) != NodeKind::ImportStatement {
        return None;
    }
    let source_node = node.child_by_field_name("source")?;
    string_value(&source_node, source)
}

/// The local name bound by a default import, if the statement has one.
pub fn default_import_name<'a>(node: &Node<'_>, source: &'a str) -> Option<&'a str> {
    if NodeKind::of(node) != NodeKind::ImportStatement {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if NodeKind::of(&child) == NodeKind::ImportClause {
            let mut clause_cursor = child.walk();
            for clause_child in child.named_children(&mut clause_cursor) {
                if NodeKind::of(&clause_child) == NodeKind::Identifier {
                    return Some(text(&clause_child, source));
                }
            }
        }
    }

    None
}

/// Argument nodes of a call or `new` expression, comments excluded.
pub fn call_arguments<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let Some(arguments) = node.child_by_field_name("arguments") else {
        return Vec::new();
    };

    let mut cursor = arguments.walk();
    arguments
        .named_children(&mut cursor)
        .filter(|child| NodeKind::of(child) != NodeKind::Comment)
        .collect()
}

/// Whether an identifier is a plain value reference rather than a binding
/// site (declarator, destructuring pattern, import clause, parameter).
pub fn is_reference(node: &Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };

    !matches!(
        NodeKind::of(&parent),
        NodeKind::VariableDeclarator
            | NodeKind::PairPattern
            | NodeKind::ObjectPattern
            | NodeKind::ImportClause
            | NodeKind::ImportSpecifier
            | NodeKind::NamedImports
            | NodeKind::FormalParameters
            | NodeKind::ArrowFunction
    )
}

/// Span of a statement extended over trailing blanks and one newline, so
/// removing it does not leave an empty line behind.
pub fn removal_span(node: &Node<'_>, source: &str) -> Span {
    let bytes = source.as_bytes();
    let mut end = node.end_byte();

    while end < bytes.len() && (bytes[end] == b' ' || bytes[end] == b'\t') {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'\r' {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'\n' {
        end += 1;
    }

    Span::new(node.start_byte(), end)
}
