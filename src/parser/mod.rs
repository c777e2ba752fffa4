//! Parser module: locate undocumented functions in Python source.

pub mod python;

use crate::model::{FunctionSite, SourceBuffer};
use anyhow::Result;

/// Parse `source` and return every function whose body lacks a docstring,
/// sorted by the line of its first body statement.
///
/// Functions whose body shares a logical line with the header
/// (`def f(): return 1`, or a header continued with `\`) are skipped with a
/// warning; there is no line to insert above.
pub fn find_undocumented(source: &str) -> Result<Vec<FunctionSite>> {
    let tree = python::parse(source)?;
    let buffer = SourceBuffer::parse_lines(source);
    let lines = buffer.lines();
    let mut sites = Vec::new();

    for func in python::function_definitions(tree.root_node()) {
        let Some(stmt) = python::first_body_statement(func) else {
            continue;
        };
        if python::is_docstring(stmt, source) {
            continue;
        }

        let name = python::function_name(func, source)?;
        let pos = stmt.start_position();
        let anchor = lines.get(pos.row).map(String::as_str).unwrap_or_default();
        let indent = anchor.get(..pos.column).unwrap_or_default();
        if python::body_on_header_line(func, stmt, source)
            || !indent.chars().all(char::is_whitespace)
        {
            eprintln!(
                "warning: skipping {} at line {}: body is on the same logical line as its header",
                name,
                pos.row + 1
            );
            continue;
        }

        sites.push(FunctionSite {
            name,
            parameters: python::parameter_names(func, source)?,
            indent: indent.to_string(),
            body_start_line: pos.row + 1,
            anchor: anchor.to_string(),
        });
    }

    // Splicing relies on ascending body lines, not on traversal order
    sites.sort_by_key(|site| site.body_start_line);
    Ok(sites)
}
