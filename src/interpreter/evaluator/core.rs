use std::{collections::HashMap, io::Write};

use tracing::debug;

use crate::{
    ast::{DeclId, Expr, FunctionDecl, Program, Statement, Variable, VariableDecl},
    error::{Diagnostics, HostError, RuntimeError},
    interpreter::{
        semantic::scope::{ScopeId, Symbol, SymbolId, SymbolTable},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// Script mistakes never fail evaluation; they are reported and the failing
/// operation yields `undefined`. Only a broken output sink is an error.
pub type EvalResult<T> = Result<T, HostError>;

/// Deepest chain of nested user function calls before a call is refused.
pub const MAX_CALL_DEPTH: usize = 128;

/// The result of evaluating an expression.
///
/// A variable reference evaluates to a left value: the reference itself, not
/// yet read. Assignment stores through it; every other consumer dereferences
/// it with [`Context::deref`] at the point of use.
#[derive(Debug, Clone)]
pub enum Operand<'a> {
    /// A computed value.
    Value(Value),
    /// An unread variable reference.
    LeftValue(&'a Variable),
}

/// Stores the runtime evaluation context.
///
/// Borrows the symbol table filled by the semantic passes; variable values
/// live in its symbols. Functions are found through the declaration id their
/// symbol carries.
pub struct Context<'a> {
    pub(super) symbols:     &'a mut SymbolTable,
    pub(super) diagnostics: &'a mut Diagnostics,
    pub(super) functions:   HashMap<DeclId, &'a FunctionDecl>,
    pub(super) out:         &'a mut dyn Write,
    pub(super) depth:       usize,
}

impl<'a> Context<'a> {
    /// Creates a context for `program`, which must have been analyzed into
    /// `symbols`.
    #[must_use]
    pub fn new(program: &'a Program,
               symbols: &'a mut SymbolTable,
               diagnostics: &'a mut Diagnostics,
               out: &'a mut dyn Write)
               -> Self {
        let functions = program.functions()
                               .into_iter()
                               .map(|function| (function.id, function))
                               .collect();

        Self { symbols,
               diagnostics,
               functions,
               out,
               depth: 0 }
    }

    /// Runs every top-level statement in order, starting in the program's
    /// root scope.
    ///
    /// A program the declaration pass never saw has no scope and runs
    /// nothing.
    ///
    /// # Errors
    /// Returns a [`HostError`] if writing program output fails.
    pub fn eval_program(&mut self, program: &'a Program) -> EvalResult<()> {
        let Some(root) = program.scope else {
            debug!("program has no scope, nothing to run");
            return Ok(());
        };

        self.eval_statements(&program.statements, root)?;
        self.out.flush()?;

        debug!("interpretation finished");
        Ok(())
    }

    /// Evaluates statements in order and returns the value of the last one,
    /// or `undefined` for an empty list.
    pub fn eval_statements(&mut self,
                           statements: &'a [Statement],
                           scope: ScopeId)
                           -> EvalResult<Value> {
        let mut last = Value::Undefined;
        for statement in statements {
            last = self.eval_statement(statement, scope)?;
        }
        Ok(last)
    }

    /// Evaluates a single statement.
    ///
    /// # Returns
    /// The value of an expression statement or of a variable initializer;
    /// `undefined` for function declarations, which do nothing at runtime.
    pub fn eval_statement(&mut self, statement: &'a Statement, scope: ScopeId) -> EvalResult<Value> {
        match statement {
            Statement::FunctionDecl(_) => Ok(Value::Undefined),
            Statement::VariableDecl(decl) => self.eval_variable_decl(decl, scope),
            Statement::Expression { expr, .. } => {
                let operand = self.eval(expr, scope)?;
                Ok(self.deref(operand, scope))
            },
        }
    }

    /// Stores the initializer's value in the variable the name finds from
    /// `scope`. A declaration without initializer leaves the slot as it is.
    fn eval_variable_decl(&mut self, decl: &'a VariableDecl, scope: ScopeId) -> EvalResult<Value> {
        let Some(init) = &decl.initializer else {
            return Ok(Value::Undefined);
        };

        let operand = self.eval(init, scope)?;
        let value = self.deref(operand, scope);
        self.store(&decl.name, value.clone(), decl.line, scope);
        Ok(value)
    }

    /// Evaluates an expression.
    ///
    /// Variable references come back as [`Operand::LeftValue`]; everything
    /// else is computed.
    pub fn eval(&mut self, expr: &'a Expr, scope: ScopeId) -> EvalResult<Operand<'a>> {
        match expr {
            Expr::Literal { value, .. } => Ok(Operand::Value(Value::from(value))),
            Expr::Variable(variable) => Ok(Operand::LeftValue(variable)),
            Expr::FunctionCall(call) => self.eval_function_call(call, scope).map(Operand::Value),
            Expr::Binary { op,
                           left,
                           right,
                           line, } => self.eval_binary_expr(*op, left, right, *line, scope)
                                          .map(Operand::Value),
        }
    }

    /// Turns an operand into a value, reading a left value's variable from
    /// `scope`.
    pub fn deref(&mut self, operand: Operand<'_>, scope: ScopeId) -> Value {
        match operand {
            Operand::Value(value) => value,
            Operand::LeftValue(variable) => self.read(&variable.name, variable.line, scope),
        }
    }

    /// Reads the variable `name` visible from `scope`.
    ///
    /// Reports a missing name or a name that refers to a function, and yields
    /// `undefined` in both cases.
    pub(super) fn read(&mut self, name: &str, line: usize, scope: ScopeId) -> Value {
        self.variable_slot(name, line, scope)
            .and_then(|id| self.symbols.symbol(id).value().cloned())
            .unwrap_or_default()
    }

    /// Writes `value` into the variable `name` visible from `scope`.
    ///
    /// Reports the same failures as [`Context::read`]; the write is dropped.
    pub(super) fn store(&mut self, name: &str, value: Value, line: usize, scope: ScopeId) {
        if let Some(id) = self.variable_slot(name, line, scope) {
            self.symbols.set_value(id, value);
        }
    }

    fn variable_slot(&mut self, name: &str, line: usize, scope: ScopeId) -> Option<SymbolId> {
        let Some(id) = self.symbols.lookup(scope, name) else {
            self.diagnostics.report(RuntimeError::UnknownVariable { name: name.to_string(),
                                                                    line });
            return None;
        };

        if let Symbol::Function { .. } = self.symbols.symbol(id) {
            self.diagnostics.report(RuntimeError::NotAVariable { name: name.to_string(),
                                                                 line });
            return None;
        }
        Some(id)
    }
}
