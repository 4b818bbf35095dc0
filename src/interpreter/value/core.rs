use std::fmt;

use crate::{ast::LiteralValue, util::num::i64_to_f64};

/// Represents a runtime value in the interpreter.
///
/// There is no static typing: any value may meet any operator, and mixed
/// operands are coerced the way a dynamic host language would coerce them.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The value of a declared but never assigned variable, and of
    /// expressions that produce nothing.
    #[default]
    Undefined,
    /// `null`
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A 64-bit integer. Arithmetic stays integral while the result is exact.
    Integer(i64),
    /// A double precision number.
    Real(f64),
    /// A string.
    String(String),
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Decimal(r) => Self::Real(*r),
            LiteralValue::String(s) => Self::String(s.clone()),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Null => Self::Null,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl Value {
    /// Converts the value to a number.
    ///
    /// `undefined` and unparsable strings become `NaN`; `null`, `false` and
    /// the empty string become `0`.
    ///
    /// # Example
    /// ```
    /// use playscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(" 12 ").to_number(), 12.0);
    /// assert_eq!(Value::Bool(true).to_number(), 1.0);
    /// assert!(Value::Undefined.to_number().is_nan());
    /// ```
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Integer(n) => i64_to_f64(*n),
            Self::Real(r) => *r,
            Self::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            },
        }
    }

    /// Truthiness, as used by `&&` and `||`.
    ///
    /// `undefined`, `null`, `false`, zero, `NaN` and the empty string are
    /// falsy; everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0 && !r.is_nan(),
            Self::String(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) if r.is_nan() => write!(f, "NaN"),
            Self::Real(r) if r.is_infinite() => {
                write!(f, "{}Infinity", if r.is_sign_negative() { "-" } else { "" })
            },
            Self::Real(r) => write!(f, "{r}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}
