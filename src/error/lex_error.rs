use thiserror::Error;

/// Represents all problems the tokenizer can report.
///
/// Lexical errors never stop tokenization: the offending characters are
/// discarded and the next real token is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no known token.
    #[error("Error on line {line}: Unrecognized character '{character}' at column {column}.")]
    UnrecognizedCharacter {
        /// The skipped character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
        /// The column of the skipped character.
        column:    usize,
    },
    /// Two dots where either one or three were expected.
    #[error("Error on line {line}: Unrecognized pattern '..' at column {column}, missed a '.'?")]
    IncompleteSpread {
        /// The source line where the error occurred.
        line:   usize,
        /// The column of the first dot.
        column: usize,
    },
}
