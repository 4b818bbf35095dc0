use tracing::debug;

use crate::{
    ast::{Expr, FunctionCall, Program, Statement, Variable},
    error::{Diagnostics, SemanticError},
    interpreter::{
        evaluator::function::PRINT_BUILTIN,
        semantic::scope::{ScopeId, Symbol, SymbolTable},
    },
};

/// The resolution pass.
///
/// Walks the tree a second time and binds every variable reference and
/// function call to the symbol found by scope-chain lookup from its position.
/// Scopes come from the declaration pass; a program or function that was
/// never entered is skipped. Misses are reported and leave the binding empty.
pub struct RefResolver<'a> {
    symbols:     &'a SymbolTable,
    diagnostics: &'a mut Diagnostics,
    resolved:    usize,
}

impl<'a> RefResolver<'a> {
    /// Creates the pass over a table filled by [`super::enter::Enter`].
    pub const fn new(symbols: &'a SymbolTable, diagnostics: &'a mut Diagnostics) -> Self {
        Self { symbols,
               diagnostics,
               resolved: 0 }
    }

    /// Resolves every reference in `program`.
    pub fn visit_program(&mut self, program: &mut Program) {
        let Some(root) = program.scope else {
            return;
        };

        for statement in &mut program.statements {
            self.visit_statement(statement, root);
        }

        debug!(resolved = self.resolved, "resolution pass finished");
    }

    fn visit_statement(&mut self, statement: &mut Statement, scope: ScopeId) {
        match statement {
            Statement::FunctionDecl(function) => {
                if let Some(own) = function.scope {
                    for statement in &mut function.body.statements {
                        self.visit_statement(statement, own);
                    }
                }
            },
            Statement::VariableDecl(decl) => {
                if let Some(init) = &mut decl.initializer {
                    self.visit_expr(init, scope);
                }
            },
            Statement::Expression { expr, .. } => self.visit_expr(expr, scope),
        }
    }

    fn visit_expr(&mut self, expr: &mut Expr, scope: ScopeId) {
        match expr {
            Expr::Literal { .. } => {},
            Expr::Variable(variable) => self.visit_variable(variable, scope),
            Expr::FunctionCall(call) => {
                for argument in &mut call.arguments {
                    self.visit_expr(argument, scope);
                }
                self.visit_function_call(call, scope);
            },
            Expr::Binary { left, right, .. } => {
                self.visit_expr(left, scope);
                self.visit_expr(right, scope);
            },
        }
    }

    fn visit_variable(&mut self, variable: &mut Variable, scope: ScopeId) {
        let found = self.symbols.lookup(scope, &variable.name);
        match found {
            Some(id) if matches!(self.symbols.symbol(id), Symbol::Variable { .. }) => {
                variable.declaration.bind(id);
                self.resolved += 1;
            },
            _ if variable.name == PRINT_BUILTIN => {},
            _ => {
                self.diagnostics.report(SemanticError::UnresolvedVariable { name: variable.name
                                                                                      .clone(),
                                                                            line: variable.line, })
            },
        }
    }

    fn visit_function_call(&mut self, call: &mut FunctionCall, scope: ScopeId) {
        let found = self.symbols.lookup(scope, &call.name);
        match found {
            Some(id) if matches!(self.symbols.symbol(id), Symbol::Function { .. }) => {
                call.definition.bind(id);
                self.resolved += 1;
            },
            _ if call.name == PRINT_BUILTIN => {},
            _ => {
                self.diagnostics.report(SemanticError::UnresolvedFunction { name: call.name
                                                                                  .clone(),
                                                                            line: call.line, })
            },
        }
    }
}
