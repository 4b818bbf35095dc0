/// Evaluation context and the statement and expression walk.
///
/// Holds the symbol table the semantic passes filled, the output sink and the
/// call depth. Variable reads and writes go through scope-chain lookup from
/// the scope that is current at the point of use.
pub mod core;

/// Binary operator semantics.
///
/// Arithmetic, comparison, equality and logical operators over dynamically
/// typed values, plus assignment through left values.
pub mod binary;

/// Function calls.
///
/// The `println` built-in and calls to user functions resolved by the
/// semantic passes.
pub mod function;
