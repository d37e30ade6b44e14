//! Code generation context and state.
//!
//! The `CodegenContext` holds all state of one generation run: the output
//! buffer, the indentation level, the fresh-name counters and the stack of
//! places a failing match jumps to.

/// Code generation context.
///
/// Owned by a single run; nothing is shared between runs, so generating
/// the same grammar twice yields identical text.
pub struct CodegenContext {
    /// Spaces per indentation level.
    indent_width: usize,
    /// Current indentation level.
    indent: usize,
    /// Generated code output.
    output: String,
    /// Counter for generating unique temporary names.
    temp_counter: u32,
    /// Counter for generating unique block labels.
    label_counter: u32,
    /// Where a failure goes: `None` returns from the rule routine, a label
    /// breaks out of that block with the error.
    fail_targets: Vec<Option<String>>,
}

impl CodegenContext {
    /// Create a new codegen context.
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width,
            indent: 0,
            output: String::with_capacity(4096),
            temp_counter: 0,
            label_counter: 0,
            fail_targets: Vec::new(),
        }
    }

    /// Generate a unique temporary variable name.
    pub fn fresh_temp(&mut self) -> String {
        let n = self.temp_counter;
        self.temp_counter += 1;
        format!("_tmp{n}")
    }

    /// Generate a unique label, `'{prefix}{n}`.
    pub fn fresh_label(&mut self, prefix: &str) -> String {
        let n = self.label_counter;
        self.label_counter += 1;
        format!("'{prefix}{n}")
    }

    /// Restart temporary and label numbering, for a new routine.
    pub fn reset_names(&mut self) {
        self.temp_counter = 0;
        self.label_counter = 0;
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write indentation to output.
    fn write_indent(&mut self) {
        for _ in 0..self.indent * self.indent_width {
            self.output.push(' ');
        }
    }

    /// Write a line to output (with indentation and newline).
    ///
    /// Empty lines get no indentation.
    pub fn writeln(&mut self, s: &str) {
        if !s.is_empty() {
            self.write_indent();
            self.output.push_str(s);
        }
        self.output.push('\n');
    }

    /// Write each line of `text` at the current indentation.
    ///
    /// Leading four-space groups in `text` become indentation levels.
    pub fn write_lines(&mut self, text: &str) {
        for line in text.lines() {
            let trimmed = line.trim_start_matches(' ');
            let levels = (line.len() - trimmed.len()) / 4;
            self.indent += levels;
            self.writeln(trimmed);
            self.indent -= levels;
        }
    }

    /// Write a newline.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Write `open`, run `body` one level deeper, then write `close`.
    pub fn block<T>(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self) -> T) -> T {
        self.writeln(open);
        self.indent();
        let result = body(self);
        self.dedent();
        self.writeln(close);
        result
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Route failures inside `body` to `target`.
    ///
    /// `None` makes them return from the enclosing routine.
    pub fn with_fail_target<T>(
        &mut self,
        target: Option<String>,
        body: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.fail_targets.push(target);
        let result = body(self);
        self.fail_targets.pop();
        result
    }

    /// A statement that fails with the error `error`.
    pub fn fail_stmt(&self, error: &str) -> String {
        match self.fail_targets.last() {
            Some(Some(label)) => format!("break {label} Err({error});"),
            Some(None) | None => format!("return Err({error});"),
        }
    }

    /// Bind the value of the fallible `call` to `name`, failing on error.
    pub fn bind(&mut self, name: &str, call: &str) {
        match self.fail_targets.last() {
            Some(Some(label)) => {
                let line =
                    format!("let {name} = match {call} {{ Ok(v) => v, Err(e) => break {label} Err(e) }};");
                self.writeln(&line);
            }
            Some(None) | None => self.writeln(&format!("let {name} = {call}?;")),
        }
    }
}

#[cfg(test)]
mod tests;
