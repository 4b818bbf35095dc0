use std::collections::HashMap;

use crate::{ast::DeclId, interpreter::value::core::Value};

/// Index of a scope in a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Index of a symbol in a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(usize);

/// What a name in a scope stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A `let` declaration and its runtime slot.
    Variable {
        /// Declared name.
        name:  String,
        /// The declaring node.
        decl:  DeclId,
        /// Line of the declaration.
        line:  usize,
        /// Current value. `undefined` until the declaration runs or the
        /// variable is assigned.
        value: Value,
    },
    /// A `function` declaration.
    Function {
        /// Declared name.
        name: String,
        /// The declaring node.
        decl: DeclId,
        /// Line of the declaration.
        line: usize,
    },
}

impl Symbol {
    /// Creates a variable symbol with an undefined value.
    #[must_use]
    pub fn variable(name: &str, decl: DeclId, line: usize) -> Self {
        Self::Variable { name: name.to_string(),
                         decl,
                         line,
                         value: Value::Undefined }
    }

    /// Creates a function symbol.
    #[must_use]
    pub fn function(name: &str, decl: DeclId, line: usize) -> Self {
        Self::Function { name: name.to_string(),
                         decl,
                         line }
    }

    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable { name, .. } | Self::Function { name, .. } => name,
        }
    }

    /// Line of the declaration.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Variable { line, .. } | Self::Function { line, .. } => *line,
        }
    }

    /// Current value of a variable; `None` for a function.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Variable { value, .. } => Some(value),
            Self::Function { .. } => None,
        }
    }
}

/// One environment: the names declared directly in a program or function
/// body, plus a link to the enclosing environment.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    parent:  Option<ScopeId>,
    records: HashMap<String, SymbolId>,
}

/// Arena holding every scope and symbol of a compilation unit.
///
/// Scopes refer to their parent by index, so the chain is a tree rooted at
/// the program scope. Lookups walk that chain innermost first and never
/// modify an ancestor.
///
/// # Example
/// ```
/// use playscript::{
///     ast::DeclId,
///     interpreter::semantic::scope::{Symbol, SymbolTable},
/// };
///
/// let mut table = SymbolTable::new();
/// let global = table.new_scope(None);
/// let inner = table.new_scope(Some(global));
///
/// let (x, _) = table.declare(global, Symbol::variable("x", DeclId(0), 1));
/// assert_eq!(table.lookup(inner, "x"), Some(x));
/// assert_eq!(table.lookup_local(inner, "x"), None);
/// assert_eq!(table.lookup(global, "missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    scopes:  Vec<Scope>,
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { scopes:  Vec::new(),
               symbols: Vec::new(), }
    }

    /// Creates a scope nested in `parent`, or a root scope for `None`.
    pub fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope { parent,
                                 records: HashMap::new() });
        ScopeId(self.scopes.len() - 1)
    }

    /// The enclosing scope, `None` for a root.
    #[must_use]
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0].parent
    }

    /// Enters `symbol` into `scope` under its name.
    ///
    /// An existing entry with the same name is replaced and its id returned
    /// alongside the new one, so the caller can report the conflict.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol) -> (SymbolId, Option<SymbolId>) {
        let name = symbol.name().to_string();
        self.symbols.push(symbol);
        let id = SymbolId(self.symbols.len() - 1);
        let previous = self.scopes[scope.0].records.insert(name, id);
        (id, previous)
    }

    /// Looks `name` up in `scope` only.
    #[must_use]
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scopes[scope.0].records.get(name).copied()
    }

    /// Looks `name` up along the scope chain, starting at `scope`.
    #[must_use]
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(symbol) = self.lookup_local(id, name) {
                return Some(symbol);
            }
            current = self.parent(id);
        }
        None
    }

    /// The symbol stored under `id`.
    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    /// Overwrites the value of a variable symbol.
    ///
    /// Returns `false`, leaving the table untouched, when `id` names a
    /// function.
    pub fn set_value(&mut self, id: SymbolId, new_value: Value) -> bool {
        match &mut self.symbols[id.0] {
            Symbol::Variable { value, .. } => {
                *value = new_value;
                true
            },
            Symbol::Function { .. } => false,
        }
    }

    /// Number of scopes created so far.
    #[must_use]
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}
