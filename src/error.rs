/// Lexical errors.
///
/// Raised by the tokenizer when it meets a character or pattern it cannot
/// classify. The offending input is skipped and tokenization continues.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree:
/// missing punctuation, malformed declarations and unrecognised expressions.
/// A parse error abandons the current construct only.
pub mod parse_error;
/// Name binding errors.
///
/// Reported by the declaration and resolution passes: duplicate declarations
/// in one scope and references that no scope on the chain declares.
pub mod semantic_error;
/// Runtime errors.
///
/// Contains the advisories raised while interpreting: invalid assignment
/// targets, unknown variables and unsupported operators. None of them stops
/// execution.
pub mod runtime_error;
/// Unrecoverable host failures.
///
/// The only errors that unwind the pipeline; they come from the environment
/// (for example a closed output stream), never from the script.
pub mod host_error;
/// The diagnostic stream.
///
/// Wraps the per-phase errors into one type, assigns a severity and collects
/// them in report order while logging each one.
pub mod diagnostic;

pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use host_error::HostError;
pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use semantic_error::SemanticError;
