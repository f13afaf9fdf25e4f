//! Rule: Transform the legacy storefront HttpClient to the fetch API
//!
//! Example:
//! ```js
//! // Before
//! this._httpClient.get('/foo', cb => { doThing(cb); });
//!
//! // After
//! fetch('/foo')
//!     .then(response => response.text())
//!     .then(cb => {
//!         doThing(cb);
//!     });
//! ```
//!
//! The import and the `this._httpClient = new HttpClient(...)` assignment
//! are removed outright. Call rewrites copy the original argument and
//! callback body text verbatim; a call whose callback is not an arrow
//! function is not the migration pattern and produces no diagnostic, while
//! a callback the rewrite cannot represent (destructured parameter, or a
//! body that uses `return`) is reported without a fix.

use swlint_core::syntax::{self, NodeKind};
use swlint_core::{Diagnostic, Edit, EditGroup, Span};
use tree_sitter::{Node, Tree};

use crate::registry::{Environment, Rule};

const NAME: &str = "no-http-client";

const IMPORT_PATH: &str = "src/service/http-client.service";
const IMPORT_MESSAGE: &str = "Remove the HttpClient import, fetch is used instead.";
const ASSIGN_MESSAGE: &str = "Remove the HttpClient assignment, fetch is used instead.";
const GET_MESSAGE: &str = "Use the fetch API instead of '_httpClient.get'.";
const POST_MESSAGE: &str = "Use the fetch API instead of '_httpClient.post'.";

/// Check a parsed file for legacy HttpClient usage
pub fn check_http_client(tree: &Tree, source: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for node in syntax::walk(tree.root_node()) {
        match NodeKind::of(&node) {
            NodeKind::ImportStatement => check_import(&node, source, &mut diagnostics),
            NodeKind::AssignmentExpression => check_assignment(&node, source, &mut diagnostics),
            NodeKind::CallExpression => check_call(&node, source, &mut diagnostics),
            _ => {}
        }
    }

    diagnostics
}

fn check_import(node: &Node<'_>, source: &str, diagnostics: &mut Vec<Diagnostic>) {
    if syntax::import_source(node, source) != Some(IMPORT_PATH) {
        return;
    }

    diagnostics.push(
        Diagnostic::new(NAME, Span::of(node), IMPORT_MESSAGE).with_fix(EditGroup::single(
            Edit::remove(syntax::removal_span(node, source)),
        )),
    );
}

fn check_assignment(node: &Node<'_>, source: &str, diagnostics: &mut Vec<Diagnostic>) {
    let Some(left) = node.child_by_field_name("left") else {
        return;
    };
    if NodeKind::of(&left) != NodeKind::MemberExpression {
        return;
    }
    let Some(property) = left.child_by_field_name("property") else {
        return;
    };
    if NodeKind::of(&property) != NodeKind::PropertyIdentifier
        || syntax::text(&property, source) != "_httpClient"
    {
        return;
    }

    let Some(right) = node.child_by_field_name("right") else {
        return;
    };
    if NodeKind::of(&right) != NodeKind::NewExpression {
        return;
    }
    let Some(constructor) = right.child_by_field_name("constructor") else {
        return;
    };
    if NodeKind::of(&constructor) != NodeKind::Identifier
        || syntax::text(&constructor, source) != "HttpClient"
    {
        return;
    }

    let mut diagnostic = Diagnostic::new(NAME, Span::of(node), ASSIGN_MESSAGE);

    // Remove the enclosing statement when the assignment stands alone.
    if let Some(parent) = node.parent() {
        if NodeKind::of(&parent) == NodeKind::ExpressionStatement {
            diagnostic = diagnostic.with_fix(EditGroup::single(Edit::remove(
                syntax::removal_span(&parent, source),
            )));
        }
    }

    diagnostics.push(diagnostic);
}

fn check_call(node: &Node<'_>, source: &str, diagnostics: &mut Vec<Diagnostic>) {
    let Some(callee) = node.child_by_field_name("function") else {
        return;
    };
    if NodeKind::of(&callee) != NodeKind::MemberExpression {
        return;
    }
    let Some(receiver) = callee.child_by_field_name("object") else {
        return;
    };
    if NodeKind::of(&receiver) != NodeKind::MemberExpression {
        return;
    }
    let Some(receiver_property) = receiver.child_by_field_name("property") else {
        return;
    };
    if NodeKind::of(&receiver_property) != NodeKind::PropertyIdentifier
        || syntax::text(&receiver_property, source) != "_httpClient"
    {
        return;
    }
    let Some(method) = callee.child_by_field_name("property") else {
        return;
    };
    if NodeKind::of(&method) != NodeKind::PropertyIdentifier {
        return;
    }

    match syntax::text(&method, source) {
        "get" => rewrite_get(node, source, diagnostics),
        "post" => rewrite_post(node, source, diagnostics),
        _ => {}
    }
}

fn rewrite_get(node: &Node<'_>, source: &str, diagnostics: &mut Vec<Diagnostic>) {
    let args = syntax::call_arguments(node);
    if args.len() != 2 {
        return;
    }
    let url = &args[0];
    let callback = &args[1];
    if NodeKind::of(callback) != NodeKind::ArrowFunction {
        return;
    }

    let diagnostic = Diagnostic::new(NAME, Span::of(node), GET_MESSAGE);

    match callback_parts(callback, source) {
        Some(parts) => {
            let fetch_code = format!(
                "fetch({url})\n    \
                 .then(response => response.text())\n    \
                 .then({param} => {{\n        {body}\n    }})",
                url = syntax::text(url, source),
                param = parts.param,
                body = parts.body,
            );
            diagnostics.push(
                diagnostic
                    .with_fix(EditGroup::single(Edit::replace(Span::of(node), fetch_code))),
            );
        }
        None => diagnostics.push(diagnostic),
    }
}

fn rewrite_post(node: &Node<'_>, source: &str, diagnostics: &mut Vec<Diagnostic>) {
    let args = syntax::call_arguments(node);
    if args.len() != 3 && args.len() != 4 {
        return;
    }
    let url = &args[0];
    let data = &args[1];
    let callback = &args[2];
    if NodeKind::of(callback) != NodeKind::ArrowFunction {
        return;
    }

    let content_type = args
        .get(3)
        .map(|node| syntax::text(node, source))
        .unwrap_or("'application/json'");

    let diagnostic = Diagnostic::new(NAME, Span::of(node), POST_MESSAGE);

    match callback_parts(callback, source) {
        Some(parts) => {
            let fetch_code = format!(
                "fetch({url}, {{\n    \
                 method: 'POST',\n    \
                 headers: {{\n        \
                 'Content-Type': {content_type}\n    \
                 }},\n    \
                 body: {data}\n\
                 }})\n    \
                 .then(response => response.text())\n    \
                 .then({param} => {{\n        {body}\n    }})",
                url = syntax::text(url, source),
                content_type = content_type,
                data = syntax::text(data, source),
                param = parts.param,
                body = parts.body,
            );
            diagnostics.push(
                diagnostic
                    .with_fix(EditGroup::single(Edit::replace(Span::of(node), fetch_code))),
            );
        }
        None => diagnostics.push(diagnostic),
    }
}

struct CallbackParts<'a> {
    param: &'a str,
    body: String,
}

/// Extract the pieces of an arrow callback the rewrite can represent.
///
/// Requires a single plain identifier parameter and a body without
/// `return`: the `.then` body has different return semantics, so such
/// callbacks are reported without a fix rather than guessed at.
fn callback_parts<'a>(callback: &Node<'_>, source: &'a str) -> Option<CallbackParts<'a>> {
    let param = arrow_parameter(callback, source)?;
    let body = callback.child_by_field_name("body")?;

    if syntax::walk(body).any(|n| NodeKind::of(&n) == NodeKind::ReturnStatement) {
        return None;
    }

    let raw = syntax::text(&body, source);
    let body_text = match NodeKind::of(&body) {
        NodeKind::StatementBlock => raw
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .unwrap_or(raw)
            .trim()
            .to_string(),
        _ => raw.trim().to_string(),
    };

    Some(CallbackParts {
        param,
        body: body_text,
    })
}

fn arrow_parameter<'a>(callback: &Node<'_>, source: &'a str) -> Option<&'a str> {
    if let Some(param) = callback.child_by_field_name("parameter") {
        return (NodeKind::of(&param) == NodeKind::Identifier)
            .then(|| syntax::text(&param, source));
    }

    let params = callback.child_by_field_name("parameters")?;
    let mut cursor = params.walk();
    let named: Vec<Node<'_>> = params
        .named_children(&mut cursor)
        .filter(|n| NodeKind::of(n) != NodeKind::Comment)
        .collect();

    match named.as_slice() {
        [single] if NodeKind::of(single) == NodeKind::Identifier => {
            Some(syntax::text(single, source))
        }
        _ => None,
    }
}

pub struct HttpClientRule;

impl Rule for HttpClientRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Transform the legacy HttpClient service to the fetch API"
    }

    fn environment(&self) -> Environment {
        Environment::Storefront
    }

    fn fixable(&self) -> bool {
        true
    }

    fn check(&self, tree: &Tree, source: &str) -> Vec<Diagnostic> {
        check_http_client(tree, source)
    }
}
