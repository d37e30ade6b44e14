//! The structured error report every phase produces.

use std::fmt;

use crate::ErrorCode;

/// One reportable problem in a grammar or in the code generated from it.
///
/// Grammar syntax errors carry a byte offset into the grammar source.
/// Problems found later, in the IR or during generation, have none.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub offset: Option<usize>,
    /// Context lines, rendered as `= note:`.
    pub notes: Vec<String>,
    /// Fixes to try, rendered as `= help:`.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// An error with code `code` and an empty message.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            offset: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Point the diagnostic at a byte offset in the grammar source.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// The `error[CODE]: message` header line.
    pub fn header(&self) -> String {
        format!("error[{}]: {}", self.code, self.message)
    }
}

/// Plain rendering without source context. The terminal emitter adds the
/// highlighted line when the source is at hand.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header())?;
        if let Some(offset) = self.offset {
            write!(f, "\n  --> offset {offset}")?;
        }
        let trailers = self
            .notes
            .iter()
            .map(|note| ("note", note))
            .chain(self.suggestions.iter().map(|help| ("help", help)));
        for (label, text) in trailers {
            write!(f, "\n  = {label}: {text}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
