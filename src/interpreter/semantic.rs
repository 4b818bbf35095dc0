/// Scope chain and symbol arena.
///
/// Every scope and symbol of a compilation unit lives in one
/// `SymbolTable`, addressed by index. Scopes know their parent; lookup walks
/// the chain innermost first.
pub mod scope;

/// The declaration pass.
///
/// Creates the scopes and enters every `let` and `function` declaration
/// before any reference is looked at.
pub mod enter;

/// The resolution pass.
///
/// Binds variable references and calls to the symbols the declaration pass
/// registered.
pub mod resolver;
