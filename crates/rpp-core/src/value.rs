//! Typed parameter values.
//!
//! Every token after the tag on a project-file line becomes a [`Value`].
//! The variant is decided once, from the lexical shape of the token, when the
//! line is tokenized; nothing downstream re-interprets it.

use std::fmt;

/// A single parameter of a node.
///
/// Integers and floats are kept apart so that integer-valued fields (flags,
/// indices, colors) round-trip exactly, but they compare as one number type:
/// `Value::Int(1) == Value::Float(1.0)`. A string never equals a number,
/// even when its text looks numeric.
#[derive(Debug, Clone)]
pub enum Value {
    /// A token matching `-?\d+`.
    Int(i64),
    /// A token matching `-?\d*\.\d+`, or an integer token too large for `i64`.
    Float(f64),
    /// Anything else, with surrounding quotes removed.
    Str(String),
}

impl Value {
    /// Returns the string content, or `None` for numbers.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Int(_) | Value::Float(_) => None,
        }
    }

    /// Returns the value as a float, or `None` for strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(_) => None,
        }
    }

    /// Returns the value as an integer.
    ///
    /// Floats are only accepted when they carry no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Value::Float(_) | Value::Str(_) => None,
        }
    }

    /// Returns `true` for [`Value::Int`] and [`Value::Float`].
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(_), _) | (_, Value::Str(_)) => false,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_numbers_compare_across_variants() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::Float(12.5), Value::Float(12.5));
        assert_ne!(Value::Int(1), Value::Float(1.5));
    }

    #[test]
    fn test_strings_never_equal_numbers() {
        assert_ne!(Value::from("1"), Value::Int(1));
        assert_ne!(Value::Float(12.5), Value::from("12.5"));
        assert_eq!(Value::from("Kewlio"), Value::Str("Kewlio".to_string()));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::Int(3).as_str(), None);
        assert!(approx_eq!(f64, Value::Int(-3).as_f64().unwrap(), -3.0));
        assert_eq!(Value::Float(4.0).as_i64(), Some(4));
        assert_eq!(Value::Float(4.5).as_i64(), None);
        assert!(Value::Float(0.1).is_number());
        assert!(!Value::from("").is_number());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(12.5).to_string(), "12.5");
        assert_eq!(Value::from("hi there").to_string(), "hi there");
    }
}
