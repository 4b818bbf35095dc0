use thiserror::Error;

/// Represents the advisories raised while binding names.
///
/// Duplicates overwrite the earlier symbol; unresolved references keep an
/// empty binding. Neither stops the passes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A name declared twice in the same scope.
    #[error("Error on line {line}: Duplicate symbol '{name}', previously declared on line {previous}.")]
    DuplicateSymbol {
        /// The declared name.
        name:     String,
        /// Line of the earlier declaration.
        previous: usize,
        /// The source line of the new declaration.
        line:     usize,
    },
    /// A user function shadowing the built-in print operation.
    #[error("Error on line {line}: Cannot redefine built-in function '{name}'.")]
    BuiltinRedefinition {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A variable reference that no enclosing scope declares.
    #[error("Error on line {line}: Cannot find declaration of variable '{name}'.")]
    UnresolvedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call whose name no enclosing scope declares as a function.
    #[error("Error on line {line}: Cannot find declaration of function '{name}'.")]
    UnresolvedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}
