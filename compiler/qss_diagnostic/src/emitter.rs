//! Plain-text diagnostic rendering with source context.
//!
//! ```text
//! error[E2001]: undefined variable `$gap`
//!  --> theme.qss:3:13
//!   |
//! 3 |     margin: $gap;
//!   |             ^^^^ not found in this scope
//! ```

use std::fmt::Write;

use crate::span_utils::LineOffsetTable;
use crate::Diagnostic;

/// Renders diagnostics against one source text.
pub struct TextEmitter<'a> {
    path: &'a str,
    source: &'a str,
    lines: LineOffsetTable,
}

impl<'a> TextEmitter<'a> {
    pub fn new(path: &'a str, source: &'a str) -> Self {
        TextEmitter {
            path,
            source,
            lines: LineOffsetTable::build(source),
        }
    }

    pub fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "error[{}]: {}", diag.code, diag.message);

        if let Some(label) = diag.labels.first() {
            let (line, col) = self.lines.offset_to_line_col(self.source, label.span.start);
            let gutter = " ".repeat(line.to_string().len());
            let _ = writeln!(out, "{gutter}--> {}:{line}:{col}", self.path);

            if let Some(text) = self.lines.line_text(self.source, line) {
                let width = self
                    .source
                    .get(label.span.to_range())
                    .map_or(1, |s| s.chars().count().max(1));
                let _ = writeln!(out, "{gutter} |");
                let _ = writeln!(out, "{line} | {text}");
                let _ = write!(
                    out,
                    "{gutter} | {}{}",
                    " ".repeat(col as usize - 1),
                    "^".repeat(width)
                );
                if label.message.is_empty() {
                    out.push('\n');
                } else {
                    let _ = writeln!(out, " {}", label.message);
                }
            }
        } else {
            let _ = writeln!(out, " --> {}", self.path);
        }

        for note in &diag.notes {
            let _ = writeln!(out, "  = note: {note}");
        }

        out
    }
}
