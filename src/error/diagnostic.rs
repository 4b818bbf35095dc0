use thiserror::Error;
use tracing::{error, warn};

use crate::error::{LexError, ParseError, RuntimeError, SemanticError};

/// How serious a diagnostic is.
///
/// Neither level stops the pipeline; the split only decides how the
/// diagnostic is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Something was skipped, overwritten or made inert.
    Warning,
    /// A reference could not be bound.
    Error,
}

/// A single report from any phase of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Reported by the tokenizer.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Reported by the parser.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Reported by the declaration or resolution pass.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    /// Reported by the interpreter.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Diagnostic {
    /// Returns the severity of this diagnostic.
    ///
    /// Unresolved references are errors; everything else is a warning.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Semantic(SemanticError::UnresolvedVariable { .. }
                           | SemanticError::UnresolvedFunction { .. }) => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// Collects diagnostics in the order they are reported.
///
/// Reporting also logs the diagnostic through `tracing`, so a subscriber sees
/// the same stream while the collected list stays available to callers.
///
/// # Example
/// ```
/// use playscript::error::{Diagnostics, RuntimeError, Severity};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.report(RuntimeError::UnknownVariable { name: "x".to_string(),
///                                                    line: 3, });
///
/// assert_eq!(diagnostics.len(), 1);
/// assert!(!diagnostics.has_errors());
/// assert_eq!(diagnostics.iter().next().unwrap().severity(), Severity::Warning);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Logs and records a diagnostic.
    pub fn report(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();
        match diagnostic.severity() {
            Severity::Warning => warn!("{diagnostic}"),
            Severity::Error => error!("{diagnostic}"),
        }
        self.entries.push(diagnostic);
    }

    /// Iterates over the diagnostics in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Number of diagnostics reported so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reports whether any diagnostic has [`Severity::Error`].
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity() == Severity::Error)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type IntoIter = std::slice::Iter<'a, Diagnostic>;
    type Item = &'a Diagnostic;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
