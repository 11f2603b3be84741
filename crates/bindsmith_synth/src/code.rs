/// Line-oriented C++ text builder with two-space indentation.
#[derive(Debug, Default)]
pub struct CodeWriter {
    output: String,
    indent: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.write_indent();
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Writes every line of `text` at the current indentation.
    pub fn lines(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line.trim_end());
        }
    }

    /// Writes `opener` and indents until the matching [`close`](Self::close).
    pub fn open(&mut self, opener: impl AsRef<str>) {
        self.line(opener);
        self.indent += 1;
    }

    pub fn close(&mut self, closer: impl AsRef<str>) {
        self.indent = self.indent.saturating_sub(1);
        self.line(closer);
    }

    /// Closes one block and opens the next on the same line (`} else {`).
    pub fn reopen(&mut self, text: impl AsRef<str>) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
        self.indent += 1;
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Quotes `text` as a C string literal.
pub fn c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Escapes the end of a C comment inside `text`.
pub fn comment_safe(text: &str) -> String {
    text.replace("*/", "* /")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_blocks() {
        let mut code = CodeWriter::new();
        code.open("if (a) {");
        code.line("x();");
        code.reopen("} else {");
        code.lines("y();\nz();");
        code.close("}");
        assert_eq!(code.finish(), "if (a) {\n  x();\n} else {\n  y();\n  z();\n}\n");
    }

    #[test]
    fn test_c_string() {
        assert_eq!(c_string("cv.Mat"), "\"cv.Mat\"");
        assert_eq!(c_string("a\"b"), "\"a\\\"b\"");
    }
}
