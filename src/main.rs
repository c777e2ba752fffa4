//! docstub: insert placeholder docstrings into undocumented Python functions.
//!
//! Rewrites one file in place through three stages:
//!
//! 1. **Parse**: tree-sitter-python; locate functions without a docstring
//! 2. **Synthesize**: build an `Args:`/`Returns:` skeleton per function
//! 3. **Splice**: insert each block above its function's first statement
//!
//! Usage: `docstub path/to/module.py`

mod docstring;
mod model;
mod parser;
mod splice;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use model::SourceBuffer;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "Usage: docstub <python_file>";

#[derive(Parser)]
#[command(
    name = "docstub",
    version,
    about = "Insert placeholder docstrings into undocumented Python functions"
)]
struct Cli {
    /// Python source file to rewrite in place
    file: PathBuf,
}

/// Result of one docstring pass over a source string.
#[derive(Debug)]
struct Outcome {
    source: String,
    inserted: usize,
}

/// Core pipeline, independent of the filesystem.
fn insert_docstrings(source: &str) -> Result<Outcome> {
    let sites = parser::find_undocumented(source)?;
    let insertions = splice::plan(sites);
    let buffer = splice::splice(SourceBuffer::parse_lines(source), &insertions)?;
    Ok(Outcome {
        source: buffer.into_source(),
        inserted: insertions.len(),
    })
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            println!("{}", USAGE);
            std::process::exit(1); // coverage:off - exit() kills process before coverage flush
        }
    };

    let path = cli.file;
    if !path.is_file() {
        println!("File not found: {}", path.display());
        std::process::exit(1); // coverage:off - exit() kills process before coverage flush
    }

    let source =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let outcome = insert_docstrings(&source)
        .with_context(|| format!("failed to process {}", path.display()))?;
    fs::write(&path, &outcome.source)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if outcome.inserted == 0 {
        eprintln!("warning: no undocumented functions in {}", path.display());
    }
    println!("Docstrings added to {}", path.display());
    Ok(())
}
