//! Data model for the docstring pass: the line buffer, located functions,
//! and synthesized documentation blocks.

/// Mutable, line-addressable view of one source file.
///
/// Each line keeps its own terminator (`"\r\n"`, `"\n"`, or none for an
/// unterminated last line), so text outside inserted regions comes back
/// byte-identical from [`into_source`], even in mixed-ending files.
///
/// [`into_source`]: SourceBuffer::into_source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    /// Line content without its terminator
    lines: Vec<String>,
    /// Terminator of each line, parallel to `lines`
    endings: Vec<&'static str>,
}

impl SourceBuffer {
    /// Split source text into lines, remembering each line's terminator.
    pub fn parse_lines(source: &str) -> Self {
        let mut lines = Vec::new();
        let mut endings = Vec::new();
        for piece in source.split_inclusive('\n') {
            let (line, ending) = if let Some(line) = piece.strip_suffix("\r\n") {
                (line, "\r\n")
            } else if let Some(line) = piece.strip_suffix('\n') {
                (line, "\n")
            } else {
                (piece, "")
            };
            lines.push(line.to_string());
            endings.push(ending);
        }
        Self { lines, endings }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Insert `new_lines` so the first of them lands at index `at`.
    /// Existing lines at or after `at` shift down by `new_lines.len()`.
    ///
    /// Inserted lines take the terminator of the line they are placed
    /// above, falling back to the line before it when that one is the
    /// unterminated last line.
    pub fn insert_lines(&mut self, at: usize, new_lines: &[String]) {
        let ending = self.ending_for_insert(at);
        self.lines.splice(at..at, new_lines.iter().cloned());
        self.endings
            .splice(at..at, std::iter::repeat(ending).take(new_lines.len()));
    }

    fn ending_for_insert(&self, at: usize) -> &'static str {
        let below = self.endings.get(at).copied().filter(|e| !e.is_empty());
        let above = at
            .checked_sub(1)
            .and_then(|i| self.endings.get(i).copied())
            .filter(|e| !e.is_empty());
        below.or(above).unwrap_or("\n")
    }

    /// Join the buffer back into text.
    pub fn into_source(self) -> String {
        self.lines
            .iter()
            .zip(&self.endings)
            .fold(String::new(), |mut out, (line, ending)| {
                out.push_str(line);
                out.push_str(ending);
                out
            })
    }
}

/// A function definition located in the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSite {
    pub name: String,
    /// Regular positional-or-keyword parameters, in declaration order
    pub parameters: Vec<String>,
    /// Leading whitespace of the body's first statement
    pub indent: String,
    /// 1-based line of the first body statement in the original source
    pub body_start_line: usize,
    /// Original text of `body_start_line`
    pub anchor: String,
}

/// One synthesized docstring, every line already indented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    pub lines: Vec<String>,
}
