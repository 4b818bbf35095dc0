use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Operand},
        semantic::scope::ScopeId,
        value::core::Value,
    },
    util::num::i64_to_f64,
};

impl<'a> Context<'a> {
    /// Evaluates `left op right`.
    ///
    /// Both operands are evaluated, left first. Assignments store through the
    /// left operand, which must be a variable reference; every other operator
    /// works on the dereferenced values.
    ///
    /// # Returns
    /// The operator's result. Plain `=` yields `undefined`; a compound
    /// assignment yields the stored value.
    pub fn eval_binary_expr(&mut self,
                            op: BinaryOperator,
                            left: &'a Expr,
                            right: &'a Expr,
                            line: usize,
                            scope: ScopeId)
                            -> EvalResult<Value> {
        let left = self.eval(left, scope)?;
        let right = self.eval(right, scope)?;
        let right = self.deref(right, scope);

        if op.is_assignment() {
            return Ok(self.eval_assignment(op, left, right, line, scope));
        }

        let left = self.deref(left, scope);
        Ok(self.eval_binary(op, &left, &right, line))
    }

    /// Applies a non-assigning operator to two values.
    ///
    /// Operators without runtime meaning (bitwise and shift operators) are
    /// reported and yield `undefined`.
    ///
    /// # Example
    /// ```
    /// use playscript::{ast::BinaryOperator, interpreter::value::core::Value};
    ///
    /// let mut compilation = playscript::compile("");
    /// let mut out = Vec::new();
    /// let mut context = compilation.context(&mut out);
    /// let sum = context.eval_binary(BinaryOperator::Add, &Value::Integer(3), &Value::Integer(4), 1);
    /// assert_eq!(sum, Value::Integer(7));
    /// ```
    pub fn eval_binary(&mut self, op: BinaryOperator, left: &Value, right: &Value, line: usize) -> Value {
        apply(op, left, right).unwrap_or_else(|| {
                                  self.diagnostics
                                      .report(RuntimeError::UnsupportedOperator { operator: op.symbol(),
                                                                                  line });
                                  Value::Undefined
                              })
    }

    fn eval_assignment(&mut self,
                       op: BinaryOperator,
                       target: Operand<'a>,
                       value: Value,
                       line: usize,
                       scope: ScopeId)
                       -> Value {
        let variable = match target {
            Operand::LeftValue(variable) => variable,
            Operand::Value(found) => {
                self.diagnostics
                    .report(RuntimeError::AssignmentToNonVariable { found: found.to_string(),
                                                                    line });
                return Value::Undefined;
            },
        };

        let Some(base) = op.compound_base() else {
            self.store(&variable.name, value, variable.line, scope);
            return Value::Undefined;
        };

        let current = self.read(&variable.name, variable.line, scope);
        let Some(result) = apply(base, &current, &value) else {
            self.diagnostics
                .report(RuntimeError::UnsupportedOperator { operator: op.symbol(),
                                                            line });
            return Value::Undefined;
        };
        self.store(&variable.name, result.clone(), variable.line, scope);
        result
    }
}

/// Applies a non-assigning operator, or returns `None` if the operator has no
/// runtime meaning.
///
/// `&&` and `||` return one of their operands, chosen by the left one's
/// truthiness. Both operands have already been evaluated.
#[must_use]
pub fn apply(op: BinaryOperator, left: &Value, right: &Value) -> Option<Value> {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
        StrictEqual, StrictNotEqual, Sub,
    };

    let value = match op {
        Add => add(left, right),
        Sub => arithmetic(left, right, i64::checked_sub, |a, b| a - b),
        Mul => arithmetic(left, right, i64::checked_mul, |a, b| a * b),
        Div => divide(left, right),
        Mod => arithmetic(left, right, i64::checked_rem, |a, b| a % b),
        Greater => Value::Bool(compare(left, right) == Some(Ordering::Greater)),
        Less => Value::Bool(compare(left, right) == Some(Ordering::Less)),
        GreaterEqual => Value::Bool(matches!(compare(left, right),
                                             Some(Ordering::Greater | Ordering::Equal))),
        LessEqual => Value::Bool(matches!(compare(left, right),
                                          Some(Ordering::Less | Ordering::Equal))),
        Equal => Value::Bool(loose_equals(left, right)),
        NotEqual => Value::Bool(!loose_equals(left, right)),
        StrictEqual => Value::Bool(strict_equals(left, right)),
        StrictNotEqual => Value::Bool(!strict_equals(left, right)),
        And => if left.is_truthy() { right.clone() } else { left.clone() },
        Or => if left.is_truthy() { left.clone() } else { right.clone() },
        _ => return None,
    };
    Some(value)
}

/// `+`: concatenation when either side is a string, numeric addition
/// otherwise.
fn add(left: &Value, right: &Value) -> Value {
    if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
        return Value::String(format!("{left}{right}"));
    }
    arithmetic(left, right, i64::checked_add, |a, b| a + b)
}

/// Integer arithmetic while both sides are integers and the result is exact,
/// floating point otherwise.
fn arithmetic(left: &Value,
              right: &Value,
              int_op: fn(i64, i64) -> Option<i64>,
              real_op: fn(f64, f64) -> f64)
              -> Value {
    if let (Value::Integer(a), Value::Integer(b)) = (left, right)
       && let Some(result) = int_op(*a, *b)
    {
        return Value::Integer(result);
    }
    Value::Real(real_op(left.to_number(), right.to_number()))
}

/// `/`: stays integral only when the division is exact.
fn divide(left: &Value, right: &Value) -> Value {
    if let (Value::Integer(a), Value::Integer(b)) = (left, right)
       && a.checked_rem(*b) == Some(0)
       && let Some(quotient) = a.checked_div(*b)
    {
        return Value::Integer(quotient);
    }
    Value::Real(left.to_number() / right.to_number())
}

/// Ordering used by the relational operators.
///
/// Two strings compare lexicographically; anything else compares as numbers.
/// `None` when either side is `NaN`, which makes every relation false.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => left.to_number().partial_cmp(&right.to_number()),
    }
}

/// `==`: `null` and `undefined` equal each other and nothing else; two
/// strings compare as text; other pairs compare as numbers.
fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        _ => left.to_number() == right.to_number(),
    }
}

/// `===`: equal dynamic types and equal values. An integer and a real holding
/// the same number are equal.
fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Real(b)) | (Value::Real(b), Value::Integer(a)) => {
            i64_to_f64(*a) == *b
        },
        (Value::Real(a), Value::Real(b)) => a == b,
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::apply;
    use crate::{ast::BinaryOperator, interpreter::value::core::Value};

    fn eval(op: &str, left: Value, right: Value) -> Value {
        let op = BinaryOperator::from_symbol(op).unwrap();
        apply(op, &left, &right).unwrap()
    }

    fn int(n: i64) -> Value {
        Value::Integer(n)
    }

    fn real(r: f64) -> Value {
        Value::Real(r)
    }

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn integer_arithmetic_stays_integral() {
        assert_eq!(eval("+", int(2), int(3)), int(5));
        assert_eq!(eval("*", int(-4), int(3)), int(-12));
        assert_eq!(eval("/", int(6), int(3)), int(2));
        assert_eq!(eval("%", int(7), int(3)), int(1));
    }

    #[test]
    fn inexact_or_overflowing_results_become_real() {
        assert_eq!(eval("/", int(7), int(2)), real(3.5));
        assert_eq!(eval("/", int(1), int(0)), real(f64::INFINITY));
        assert!(matches!(eval("+", int(i64::MAX), int(1)), Value::Real(_)));
        assert!(matches!(eval("%", int(1), int(0)), Value::Real(r) if r.is_nan()));
    }

    #[test]
    fn plus_concatenates_strings() {
        assert_eq!(eval("+", text("a"), int(1)), text("a1"));
        assert_eq!(eval("+", real(1.5), text("b")), text("1.5b"));
        assert_eq!(eval("+", Value::Undefined, text("!")), text("undefined!"));
    }

    #[test]
    fn mixed_operands_are_coerced_to_numbers() {
        assert_eq!(eval("-", text("10"), int(4)), real(6.0));
        assert_eq!(eval("*", Value::Bool(true), int(3)), real(3.0));
        assert!(matches!(eval("-", text("x"), int(1)), Value::Real(r) if r.is_nan()));
    }

    #[test]
    fn comparisons() {
        assert_eq!(eval(">", int(3), int(2)), Value::Bool(true));
        assert_eq!(eval("<=", int(2), real(2.5)), Value::Bool(true));
        assert_eq!(eval("<", text("apple"), text("banana")), Value::Bool(true));
        assert_eq!(eval(">=", real(f64::NAN), int(1)), Value::Bool(false));
    }

    #[test]
    fn loose_and_strict_equality() {
        assert_eq!(eval("==", text("1"), int(1)), Value::Bool(true));
        assert_eq!(eval("===", text("1"), int(1)), Value::Bool(false));
        assert_eq!(eval("===", int(1), real(1.0)), Value::Bool(true));
        assert_eq!(eval("==", Value::Null, Value::Undefined), Value::Bool(true));
        assert_eq!(eval("!==", Value::Null, Value::Undefined), Value::Bool(true));
        assert_eq!(eval("==", Value::Null, int(0)), Value::Bool(false));
    }

    #[test]
    fn logical_operators_return_an_operand() {
        assert_eq!(eval("&&", int(0), text("x")), int(0));
        assert_eq!(eval("&&", int(1), text("x")), text("x"));
        assert_eq!(eval("||", text(""), int(5)), int(5));
        assert_eq!(eval("||", text("a"), int(5)), text("a"));
    }

    #[test]
    fn bitwise_operators_have_no_runtime_meaning() {
        assert_eq!(apply(BinaryOperator::BitAnd, &int(1), &int(1)), None);
        assert_eq!(apply(BinaryOperator::Shl, &int(1), &int(1)), None);
    }
}
