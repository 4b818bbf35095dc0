/// Parser state, token helpers and the statement loops.
///
/// Holds the token stream and the diagnostics, and implements the program
/// and block loops that report a failed statement and carry on.
pub mod core;

/// Statement parsing.
///
/// Function declarations, variable declarations and expression statements.
pub mod statement;

/// Binary expression parsing.
///
/// Precedence climbing over the operator table.
pub mod binary;

/// Primary expression parsing.
///
/// Literals, variable references, calls and parenthesised expressions.
pub mod primary;
