//! Indentation-tracking output writer.
//!
//! Wraps the external sink and owns the cursor state for one publish run:
//! nesting depth, whether the current line's indentation has been written,
//! and whether any output has been produced yet (a blank line is suppressed
//! before the very first line of the document).

use std::io::{self, Write};

/// One indentation unit.
const INDENT: &str = "    ";

pub struct Emitter<W: Write> {
    sink: W,
    depth: usize,
    indent_written: bool,
    first_line: bool,
    comments: bool,
}

impl<W: Write> Emitter<W> {
    pub fn new(sink: W, comments: bool) -> Self {
        Self {
            sink,
            depth: 0,
            indent_written: false,
            first_line: true,
            comments,
        }
    }

    /// Append a fragment, writing the pending indentation exactly once per
    /// line before the first fragment of that line.
    pub fn write(&mut self, fragment: &str) -> io::Result<()> {
        if !self.indent_written {
            for _ in 0..self.depth {
                self.sink.write_all(INDENT.as_bytes())?;
            }
            self.indent_written = true;
        }
        self.sink.write_all(fragment.as_bytes())?;
        self.first_line = false;
        Ok(())
    }

    /// Append a fragment and terminate the line. An empty fragment emits a
    /// lone newline unless nothing has been written yet.
    pub fn writeln(&mut self, fragment: &str) -> io::Result<()> {
        if !fragment.is_empty() {
            self.write(fragment)?;
            self.sink.write_all(b"\n")?;
        } else if !self.first_line {
            self.sink.write_all(b"\n")?;
        }
        self.indent_written = false;
        Ok(())
    }

    pub fn blank(&mut self) -> io::Result<()> {
        self.writeln("")
    }

    /// Reformat and emit a documentation comment: lines are trimmed,
    /// continuation markers are re-aligned, empty lines are dropped, and the
    /// first emitted line is preceded by one blank line. When nothing is
    /// emitted (absent comment, blank comment, or comments suppressed), a
    /// single blank line is written only if `fallback_blank` is set.
    pub fn comment(&mut self, text: Option<&str>, fallback_blank: bool) -> io::Result<()> {
        let mut wrote = false;
        if self.comments {
            if let Some(text) = text {
                for raw in text.lines() {
                    let line = raw.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if !wrote {
                        self.blank()?;
                        wrote = true;
                    }
                    if line.starts_with('*') {
                        self.writeln(&format!(" {}", line))?;
                    } else {
                        self.writeln(line)?;
                    }
                }
            }
        }
        if !wrote && fallback_blank {
            self.blank()?;
        }
        Ok(())
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth -= 1;
    }
}
