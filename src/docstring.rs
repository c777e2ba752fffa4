//! Placeholder docstring synthesis.
//!
//! Produces a Google-style skeleton from a function's name and parameters:
//! signature line, one `Args:` entry per parameter, and a `Returns:` stub.

use crate::model::{DocBlock, FunctionSite};

const DELIMITER: &str = "\"\"\"";
const PLACEHOLDER: &str = "Description.";

/// Build the documentation block for `site`, indented to its body.
pub fn synthesize(site: &FunctionSite) -> DocBlock {
    let mut body = vec![
        DELIMITER.to_string(),
        format!("{}({})", site.name, site.parameters.join(", ")),
        String::new(),
        "Args:".to_string(),
    ];
    body.extend(
        site.parameters
            .iter()
            .map(|param| format!("    {}: {}", param, PLACEHOLDER)),
    );
    body.extend([
        String::new(),
        "Returns:".to_string(),
        format!("    {}", PLACEHOLDER),
        DELIMITER.to_string(),
    ]);

    DocBlock {
        lines: body
            .into_iter()
            .map(|line| format!("{}{}", site.indent, line))
            .collect(),
    }
}
