use tracing::debug;

use crate::{
    ast::{FunctionCall, FunctionDecl},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, MAX_CALL_DEPTH},
        semantic::scope::{ScopeId, Symbol},
        value::core::Value,
    },
};

/// Name of the built-in print function.
///
/// Calls to it are never resolved against declarations; it wins over a user
/// function of the same name.
pub const PRINT_BUILTIN: &str = "println";

impl<'a> Context<'a> {
    /// Evaluates a function call.
    ///
    /// - `println` evaluates its arguments left to right and prints them.
    /// - A call resolved to a user function runs the function's body in the
    ///   function's own scope and returns the body's last value.
    /// - Anything else does nothing and yields `undefined`.
    ///
    /// # Errors
    /// Returns a [`crate::error::HostError`] if printing fails.
    pub fn eval_function_call(&mut self, call: &'a FunctionCall, scope: ScopeId) -> EvalResult<Value> {
        if call.name == PRINT_BUILTIN {
            let mut values = Vec::with_capacity(call.arguments.len());
            for argument in &call.arguments {
                let operand = self.eval(argument, scope)?;
                values.push(self.deref(operand, scope));
            }
            self.print(&values)?;
            return Ok(Value::Undefined);
        }

        let Some(function) = self.callee(call) else {
            debug!(name = %call.name, line = call.line, "call to unresolved function ignored");
            return Ok(Value::Undefined);
        };
        let Some(own) = function.scope else {
            return Ok(Value::Undefined);
        };

        if self.depth >= MAX_CALL_DEPTH {
            self.diagnostics
                .report(RuntimeError::CallDepthExceeded { name:  call.name.clone(),
                                                          limit: MAX_CALL_DEPTH,
                                                          line:  call.line, });
            return Ok(Value::Undefined);
        }

        self.depth += 1;
        let result = self.eval_statements(&function.body.statements, own);
        self.depth -= 1;
        result
    }

    /// The declaration a call was resolved to by the semantic passes.
    fn callee(&self, call: &FunctionCall) -> Option<&'a FunctionDecl> {
        let symbol = self.symbols.symbol(call.definition.symbol()?);
        match symbol {
            Symbol::Function { decl, .. } => self.functions.get(decl).copied(),
            Symbol::Variable { .. } => None,
        }
    }

    /// Writes `values` separated by single spaces, then a newline.
    ///
    /// # Errors
    /// Returns a [`crate::error::HostError`] if the output sink fails.
    pub fn print(&mut self, values: &[Value]) -> EvalResult<()> {
        let line = values.iter()
                         .map(ToString::to_string)
                         .collect::<Vec<_>>()
                         .join(" ");
        writeln!(self.out, "{line}")?;
        Ok(())
    }
}
