//! Python syntax tree access via tree-sitter.
//!
//! Knows the node shapes of `tree-sitter-python`:
//! - `function_definition` → name, `parameters`, `body` (a `block`)
//! - parameter kinds → which names count as regular arguments
//! - `expression_statement` holding a plain string → docstring

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use std::sync::LazyLock;
use tree_sitter::{Node, Parser, Point, Tree};

/// A string literal qualifies as a docstring only with no prefix or an
/// `r`/`u` prefix. f-strings and bytes literals do not.
static RE_DOCSTRING_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[rRuU]?["']"#).unwrap());

/// Parse Python source, rejecting any tree that contains an error node
/// or a construct the grammar accepts but Python 3 does not.
pub fn parse(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| anyhow!("failed to load Python grammar: {}", e))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| anyhow!("parser returned no syntax tree"))?;

    if let Some(pos) = first_error(tree.root_node()) {
        bail!(
            "syntax error at line {}, column {}",
            pos.row + 1,
            pos.column + 1
        );
    }
    if let Some((pos, what)) = first_rejected_construct(tree.root_node()) {
        bail!(
            "syntax error at line {}, column {}: {}",
            pos.row + 1,
            pos.column + 1,
            what
        );
    }
    Ok(tree)
}

/// Position of the first `ERROR` or `MISSING` node in document order.
fn first_error(root: Node) -> Option<Point> {
    if !root.has_error() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position());
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node
            .children(&mut cursor)
            .filter(|c| c.has_error() || c.is_missing())
            .collect();
        stack.extend(children.into_iter().rev());
    }
    // has_error() was set but no node claims it; report the root
    Some(root.start_position())
}

/// The grammar is lenient: it parses Python 2 statements and does not
/// check parameter ordering.
fn first_rejected_construct(root: Node) -> Option<(Point, &'static str)> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "print_statement" => return Some((node.start_position(), "Python 2 print statement")),
            "exec_statement" => return Some((node.start_position(), "Python 2 exec statement")),
            "parameters" | "lambda_parameters" => {
                if let Some(pos) = non_default_after_default(node) {
                    return Some((pos, "non-default argument follows default argument"));
                }
            }
            _ => {}
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

/// Position of a plain parameter following a defaulted one, before any
/// `*`, `*args` or `**kwargs` (after which defaults are optional).
fn non_default_after_default(params: Node) -> Option<Point> {
    let mut seen_default = false;
    let mut cursor = params.walk();
    let named: Vec<Node> = params.named_children(&mut cursor).collect();
    for param in named {
        match param.kind() {
            "default_parameter" | "typed_default_parameter" => seen_default = true,
            "identifier" if seen_default => return Some(param.start_position()),
            "typed_parameter" => match param.named_child(0) {
                Some(name) if name.kind() == "identifier" => {
                    if seen_default {
                        return Some(param.start_position());
                    }
                }
                _ => return None,
            },
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                return None
            }
            _ => {}
        }
    }
    None
}

/// Every `function_definition` under `root`, pre-order depth-first.
pub fn function_definitions(root: Node<'_>) -> Vec<Node<'_>> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.kind() == "function_definition" {
            found.push(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    found
}

pub fn function_name(func: Node, source: &str) -> Result<String> {
    let name = func
        .child_by_field_name("name")
        .context("function definition has no name")?;
    text(name, source)
}

/// Names of the regular positional-or-keyword parameters.
///
/// Positional-only names (before `/`), `*args`, keyword-only names (after
/// `*` or `*args`) and `**kwargs` are left out.
pub fn parameter_names(func: Node, source: &str) -> Result<Vec<String>> {
    let Some(params) = func.child_by_field_name("parameters") else {
        return Ok(Vec::new());
    };

    let mut names = Vec::new();
    let mut cursor = params.walk();
    for param in params.named_children(&mut cursor) {
        match param.kind() {
            "identifier" => names.push(text(param, source)?),
            "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = param.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        names.push(text(name, source)?);
                    }
                }
            }
            "typed_parameter" => match param.named_child(0) {
                Some(name) if name.kind() == "identifier" => names.push(text(name, source)?),
                // `*args: T` / `**kwargs: T`
                _ => break,
            },
            "positional_separator" => names.clear(),
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => break,
            _ => {}
        }
    }
    Ok(names)
}

/// First statement of the function body, skipping comments.
pub fn first_body_statement(func: Node<'_>) -> Option<Node<'_>> {
    let body = func.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    first
}

/// Whether the first body statement shares a logical line with the header,
/// either directly (`def f(): return 1`) or through a trailing `\`.
pub fn body_on_header_line(func: Node, stmt: Node, source: &str) -> bool {
    let mut cursor = func.walk();
    let colon = func.children(&mut cursor).find(|c| c.kind() == ":");
    let Some(colon) = colon else {
        return false;
    };
    let gap = source
        .get(colon.end_byte()..stmt.start_byte())
        .unwrap_or_default();

    // Only whitespace, comments and continuations sit between `:` and the
    // statement; a newline not escaped by `\` ends the header.
    let segments: Vec<&str> = gap.split('\n').collect();
    let (ended, _) = segments.split_at(segments.len() - 1);
    !ended.iter().any(|segment| {
        let code = segment.split('#').next().unwrap_or_default();
        !code.trim_end().ends_with('\\')
    })
}

/// Whether `stmt` is a string-literal-only expression statement.
pub fn is_docstring(stmt: Node, source: &str) -> bool {
    if stmt.kind() != "expression_statement" || stmt.named_child_count() != 1 {
        return false;
    }
    stmt.named_child(0)
        .is_some_and(|expr| is_plain_string(expr, source))
}

fn is_plain_string(expr: Node, source: &str) -> bool {
    match expr.kind() {
        "string" => expr
            .utf8_text(source.as_bytes())
            .is_ok_and(|t| RE_DOCSTRING_PREFIX.is_match(t)),
        "concatenated_string" => {
            let mut cursor = expr.walk();
            let all_plain = expr
                .named_children(&mut cursor)
                .filter(|part| part.kind() != "comment")
                .all(|part| is_plain_string(part, source));
            all_plain
        }
        "parenthesized_expression" => {
            expr.named_child_count() == 1
                && expr
                    .named_child(0)
                    .is_some_and(|inner| is_plain_string(inner, source))
        }
        _ => false,
    }
}

fn text(node: Node, source: &str) -> Result<String> {
    Ok(node
        .utf8_text(source.as_bytes())
        .context("node text is not valid UTF-8")?
        .to_string())
}
