// csssan-core/src/diagnostic.rs
//! Content diagnostics: `(code, line, column)` records describing what was rejected and where.

use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::objects::{CssObject, Position};

/// One rejection, located at the start of the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub line: i64,
    pub column: i64,
}

impl Diagnostic {
    pub fn new(code: impl Into<String>, line: i64, column: i64) -> Self {
        Self { code: code.into(), line, column }
    }

    pub fn at(code: impl Into<String>, position: Position) -> Self {
        Self::new(code, position.line, position.column)
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl From<(&str, i64, i64)> for Diagnostic {
    fn from((code, line, column): (&str, i64, i64)) -> Self {
        Self::new(code, line, column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.code, self.line, self.column)
    }
}

/// An append-only, clearable list of diagnostics owned by one sanitizer or parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    entries: Vec<Diagnostic>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `code` at the position of `node`.
    pub fn record(&mut self, code: &str, node: &dyn CssObject) {
        let position = node.position();
        trace!("Recording '{}' at {}", code, position);
        self.entries.push(Diagnostic::at(code, position));
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.entries.extend(diagnostics);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn to_vec(&self) -> Vec<Diagnostic> {
        self.entries.clone()
    }
}
