use thiserror::Error;

/// Represents all errors that can occur while parsing.
///
/// A parse error abandons the construct being parsed. The statement loop
/// reports it and resumes with the next statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A specific token was required but something else was found.
    #[error("Error on line {line}: Expecting {expected} in {construct}, while we got '{found}'.")]
    Expected {
        /// Description of the missing token, such as `';'`.
        expected:  &'static str,
        /// The construct being parsed when the error occurred.
        construct: &'static str,
        /// Text of the token actually found.
        found:     String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// No statement form starts with the current token.
    #[error("Error on line {line}: Cannot recognize a statement starting with '{found}'.")]
    UnrecognizedStatement {
        /// Text of the offending token.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// No primary expression starts with the current token.
    #[error("Error on line {line}: Cannot recognize a primary expression starting with '{found}'.")]
    UnrecognizedExpression {
        /// Text of the offending token.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A closing brace appeared outside any block.
    #[error("Error on line {line}: Unexpected '}}' outside of a block.")]
    UnbalancedBrace {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer literal too large to be represented.
    #[error("Error on line {line}: Literal {literal} is too large.")]
    LiteralTooLarge {
        /// The literal text.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Expressions or blocks nested past what the tree walks can handle,
    /// counting every operator of a flat chain as one level.
    #[error("Error on line {line}: Nesting is deeper than {limit} levels.")]
    NestingTooDeep {
        /// The deepest nesting accepted.
        limit: usize,
        /// The source line where the limit was crossed.
        line:  usize,
    },
}
