use tracing::debug;

use crate::{
    ast::{FunctionDecl, Program, Statement, VariableDecl},
    error::{Diagnostics, SemanticError},
    interpreter::{
        evaluator::function::PRINT_BUILTIN,
        semantic::scope::{ScopeId, Symbol, SymbolTable},
    },
};

/// The declaration pass.
///
/// Walks the tree once, creating the program's root scope and one scope per
/// function, and enters every declaration into the scope that is current at
/// its position. The current scope is threaded through the walk as an
/// argument. Running the pass to completion before any reference is resolved
/// is what makes forward references work.
pub struct Enter<'a> {
    symbols:     &'a mut SymbolTable,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Enter<'a> {
    /// Creates the pass over an empty or partially filled table.
    pub const fn new(symbols: &'a mut SymbolTable, diagnostics: &'a mut Diagnostics) -> Self {
        Self { symbols, diagnostics }
    }

    /// Declares everything in `program`, attaching scopes to the program and
    /// to each function and variable declaration.
    pub fn visit_program(&mut self, program: &mut Program) {
        let root = self.symbols.new_scope(None);
        program.scope = Some(root);

        for statement in &mut program.statements {
            self.visit_statement(statement, root);
        }

        debug!(scopes = self.symbols.scope_count(), "declaration pass finished");
    }

    fn visit_statement(&mut self, statement: &mut Statement, scope: ScopeId) {
        match statement {
            Statement::FunctionDecl(function) => self.visit_function_decl(function, scope),
            Statement::VariableDecl(decl) => self.visit_variable_decl(decl, scope),
            Statement::Expression { .. } => {},
        }
    }

    /// Registers the function in the enclosing scope, then declares its body
    /// in a fresh scope nested inside it.
    fn visit_function_decl(&mut self, function: &mut FunctionDecl, enclosing: ScopeId) {
        let own = self.symbols.new_scope(Some(enclosing));
        function.scope = Some(own);

        if function.name == PRINT_BUILTIN {
            self.diagnostics.report(SemanticError::BuiltinRedefinition { name: function.name
                                                                                   .clone(),
                                                                         line: function.line, });
        }
        self.declare(enclosing,
                     Symbol::function(&function.name, function.id, function.line));

        for statement in &mut function.body.statements {
            self.visit_statement(statement, own);
        }
    }

    fn visit_variable_decl(&mut self, decl: &mut VariableDecl, scope: ScopeId) {
        decl.scope = Some(scope);
        self.declare(scope, Symbol::variable(&decl.name, decl.id, decl.line));
    }

    fn declare(&mut self, scope: ScopeId, symbol: Symbol) {
        let name = symbol.name().to_string();
        let line = symbol.line();
        let (_, previous) = self.symbols.declare(scope, symbol);
        if let Some(previous) = previous {
            self.diagnostics.report(SemanticError::DuplicateSymbol { name,
                                                                     previous: self.symbols
                                                                                   .symbol(previous)
                                                                                   .line(),
                                                                     line });
        }
    }
}
