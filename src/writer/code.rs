//! Indentation-aware text buffer for generated source.

const TAB: &str = "    ";

/// Line-oriented writer that tracks scope depth.
///
/// Scopes are opened either with a brace (`open`/`close`) or bare
/// (`indent`/`dedent`, used for nested `let` chains). `finish` refuses
/// to hand back a buffer whose scopes do not balance.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn line(&mut self, code: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.buf.push_str(TAB);
        }
        self.buf.push_str(code.as_ref());
        self.buf.push('\n');
    }

    pub fn lines<I, S>(&mut self, code: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for l in code {
            self.line(l);
        }
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Copy a pre-formatted block without re-indenting it.
    pub fn raw(&mut self, block: &str) {
        self.buf.push_str(block);
        if !block.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        assert!(self.depth > 0, "code writer: dedent below column zero");
        self.depth -= 1;
    }

    /// Writes `head {` and enters the block.
    pub fn open(&mut self, head: impl AsRef<str>) {
        self.line(format!("{} {{", head.as_ref()));
        self.indent();
    }

    /// Leaves the block and writes `}`.
    pub fn close(&mut self) {
        self.dedent();
        self.line("}");
    }

    /// Hand back the text. An open scope here is a bug in the emitter,
    /// never a property of the input.
    pub fn finish(self) -> String {
        assert_eq!(self.depth, 0, "code writer: unbalanced scope at end of output");
        self.buf
    }
}
