//! Splice documentation blocks into the line buffer.
//!
//! Insertions are a left fold over `(buffer, offset)`: each block lands at
//! `body_start_line - 1 + offset`, where `offset` is the number of lines
//! inserted by earlier blocks. Line numbers always come from the original
//! parse and are never recomputed mid-run.

use crate::docstring;
use crate::model::{DocBlock, FunctionSite, SourceBuffer};
use anyhow::{bail, Result};

/// A function site paired with the block to insert above its body.
#[derive(Debug)]
pub struct Insertion {
    pub site: FunctionSite,
    pub block: DocBlock,
}

/// Pair each site with its synthesized docstring, preserving order.
pub fn plan(sites: Vec<FunctionSite>) -> Vec<Insertion> {
    sites
        .into_iter()
        .map(|site| {
            let block = docstring::synthesize(&site);
            Insertion { site, block }
        })
        .collect()
}

/// Apply `insertions` to `buffer` in order.
///
/// Fails without touching the output if the insertions are not strictly
/// ascending by body line, or if the line at an insertion point no longer
/// holds the statement the parser saw there.
pub fn splice(buffer: SourceBuffer, insertions: &[Insertion]) -> Result<SourceBuffer> {
    let (buffer, _offset) = insertions
        .iter()
        .enumerate()
        .try_fold((buffer, 0usize), |(buffer, offset), (i, ins)| {
            if i > 0 && insertions[i - 1].site.body_start_line >= ins.site.body_start_line {
                bail!(
                    "insertions out of order: {} (line {}) follows line {}",
                    ins.site.name,
                    ins.site.body_start_line,
                    insertions[i - 1].site.body_start_line
                );
            }
            apply(buffer, offset, ins)
        })?;
    Ok(buffer)
}

/// One fold step: `(buffer, offset) -> (buffer', offset + len(block))`.
fn apply(
    mut buffer: SourceBuffer,
    offset: usize,
    ins: &Insertion,
) -> Result<(SourceBuffer, usize)> {
    let Some(line) = ins.site.body_start_line.checked_sub(1) else {
        bail!("{} has no body line", ins.site.name);
    };
    let at = line + offset;

    match buffer.lines().get(at) {
        Some(current) if *current == ins.site.anchor => {}
        Some(current) => bail!(
            "line {} no longer matches the body of {}: expected {:?}, found {:?}",
            ins.site.body_start_line,
            ins.site.name,
            ins.site.anchor,
            current
        ),
        None => bail!(
            "line {} for {} is past the end of the buffer ({} lines)",
            ins.site.body_start_line,
            ins.site.name,
            buffer.lines().len()
        ),
    }

    buffer.insert_lines(at, &ins.block.lines);
    Ok((buffer, offset + ins.block.lines.len()))
}
