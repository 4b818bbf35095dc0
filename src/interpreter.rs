/// Character-level reader over the source text.
///
/// Tracks the position, line and column of the next character and offers the
/// lookahead the tokenizer needs for multi-character operators and comments.
pub mod cursor;
/// The lexer module tokenizes source code for further parsing.
///
/// The tokenizer reads characters from a cursor and produces tokens on
/// demand: keywords, identifiers, literals, operators and separators, each
/// with its source position. Unrecognised input is recorded and skipped.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind and position.
/// - Matches multi-character operators by longest match.
/// - Skips whitespace and comments.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with precedence climbing for binary operators.
/// A malformed statement is reported and skipped; the parse always reaches
/// the end of input.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Reports syntax errors with their line.
/// - Numbers every declaration for the semantic passes.
pub mod parser;
/// Scopes, declarations and name resolution.
///
/// Two passes over the tree: the first enters every declaration into a scope,
/// the second binds every reference. Splitting them lets code refer to
/// functions declared further down.
pub mod semantic;
/// The evaluator module executes a resolved AST.
///
/// A direct tree walk. Variable references evaluate to left values so that
/// assignment can store into the variable instead of a copy.
///
/// # Responsibilities
/// - Evaluates statements and expressions in source order.
/// - Reads and writes variables through the scope chain.
/// - Runs user functions and the `println` built-in.
pub mod evaluator;
/// The value module defines the runtime data types for evaluation.
pub mod value;
