use thiserror::Error;

/// Represents the advisories raised during evaluation.
///
/// Each one makes only the failing operation inert; the statement yields
/// `undefined` and execution continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The left operand of an assignment is not a variable reference.
    #[error("Error on line {line}: Assignment needs a left value, while we got {found}.")]
    AssignmentToNonVariable {
        /// Display form of the value found on the left.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to use a variable that no scope on the chain holds.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name on the scope chain refers to a function, not a variable.
    #[error("Error on line {line}: '{name}' is a function, not a variable.")]
    NotAVariable {
        /// The name that was looked up.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The operator parses but has no runtime meaning.
    #[error("Error on line {line}: Unsupported binary operation: {operator}.")]
    UnsupportedOperator {
        /// Source form of the operator.
        operator: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Nested calls went deeper than the interpreter allows.
    #[error("Error on line {line}: Call to '{name}' exceeds the maximum call depth of {limit}.")]
    CallDepthExceeded {
        /// The function being called.
        name:  String,
        /// The configured depth limit.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}
