//! Native values produced by conversion.

use std::fmt;

use rust_decimal::Decimal;

/// An exact decimal, extended with the non-finite values a float can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExactDecimal {
    Finite(Decimal),
    Infinity,
    NegInfinity,
    NaN,
}

impl ExactDecimal {
    pub fn is_nan(&self) -> bool {
        matches!(self, ExactDecimal::NaN)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, ExactDecimal::Infinity | ExactDecimal::NegInfinity)
    }

    /// The finite value, if any.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            ExactDecimal::Finite(d) => Some(*d),
            _ => None,
        }
    }

    pub(crate) fn negate(self) -> Self {
        match self {
            ExactDecimal::Finite(d) => ExactDecimal::Finite(-d),
            ExactDecimal::Infinity => ExactDecimal::NegInfinity,
            ExactDecimal::NegInfinity => ExactDecimal::Infinity,
            ExactDecimal::NaN => ExactDecimal::NaN,
        }
    }
}

impl From<Decimal> for ExactDecimal {
    fn from(d: Decimal) -> Self {
        ExactDecimal::Finite(d)
    }
}

impl fmt::Display for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExactDecimal::Finite(d) => fmt::Display::fmt(d, f),
            ExactDecimal::Infinity => f.write_str("Infinity"),
            ExactDecimal::NegInfinity => f.write_str("-Infinity"),
            ExactDecimal::NaN => f.write_str("NaN"),
        }
    }
}

/// A converted cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(ExactDecimal),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as a float; decimals are rounded to the nearest double.
    pub fn as_f64(&self) -> Option<f64> {
        use rust_decimal::prelude::ToPrimitive;

        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            Value::Decimal(ExactDecimal::Finite(d)) => d.to_f64(),
            Value::Decimal(ExactDecimal::Infinity) => Some(f64::INFINITY),
            Value::Decimal(ExactDecimal::NegInfinity) => Some(f64::NEG_INFINITY),
            Value::Decimal(ExactDecimal::NaN) => Some(f64::NAN),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<ExactDecimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => fmt::Display::fmt(b, f),
            Value::Int(i) => fmt::Display::fmt(i, f),
            Value::Decimal(d) => fmt::Display::fmt(d, f),
            Value::Float(x) => fmt::Display::fmt(x, f),
            Value::String(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
        }
    }
}
