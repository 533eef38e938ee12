//! The closed primitive value domain shared across the IR
//!
//! Attribute values, column defaults, and `to_value` conversion results all
//! draw from this domain, which keeps every IR value comparable, hashable,
//! and totally ordered.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A primitive SQL-adjacent value: null, boolean, integer, float, or text.
///
/// Floats compare and hash by bit pattern (`f64::to_bits`), so `NaN == NaN`
/// and `0.0 != -0.0` here. That trade keeps the type usable as a set and
/// map member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Whether this is the null value
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Ordering rank of the variant, used for cross-variant comparison
    fn rank(&self) -> u8 {
        match self {
            SqlValue::Null => 0,
            SqlValue::Boolean(_) => 1,
            SqlValue::Integer(_) => 2,
            SqlValue::Float(_) => 3,
            SqlValue::Text(_) => 4,
        }
    }
}

impl PartialEq for SqlValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SqlValue::Null, SqlValue::Null) => true,
            (SqlValue::Boolean(a), SqlValue::Boolean(b)) => a == b,
            (SqlValue::Integer(a), SqlValue::Integer(b)) => a == b,
            (SqlValue::Float(a), SqlValue::Float(b)) => a.to_bits() == b.to_bits(),
            (SqlValue::Text(a), SqlValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for SqlValue {}

impl Hash for SqlValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            SqlValue::Null => {}
            SqlValue::Boolean(b) => b.hash(state),
            SqlValue::Integer(i) => i.hash(state),
            SqlValue::Float(f) => f.to_bits().hash(state),
            SqlValue::Text(s) => s.hash(state),
        }
    }
}

impl PartialOrd for SqlValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SqlValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SqlValue::Boolean(a), SqlValue::Boolean(b)) => a.cmp(b),
            (SqlValue::Integer(a), SqlValue::Integer(b)) => a.cmp(b),
            (SqlValue::Float(a), SqlValue::Float(b)) => a.total_cmp(b),
            (SqlValue::Text(a), SqlValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "null"),
            SqlValue::Boolean(b) => write!(f, "{}", b),
            SqlValue::Integer(i) => write!(f, "{}", i),
            SqlValue::Float(x) => write!(f, "{}", x),
            SqlValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Boolean(b)
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        SqlValue::Integer(i)
    }
}

impl From<i32> for SqlValue {
    fn from(i: i32) -> Self {
        SqlValue::Integer(i64::from(i))
    }
}

impl From<f64> for SqlValue {
    fn from(x: f64) -> Self {
        SqlValue::Float(x)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_equality_by_bits() {
        assert_eq!(SqlValue::Float(1.5), SqlValue::Float(1.5));
        assert_eq!(SqlValue::Float(f64::NAN), SqlValue::Float(f64::NAN));
        assert_ne!(SqlValue::Float(0.0), SqlValue::Float(-0.0));
    }

    #[test]
    fn test_cross_variant_inequality() {
        assert_ne!(SqlValue::Integer(1), SqlValue::Float(1.0));
        assert_ne!(SqlValue::Null, SqlValue::Text("null".to_string()));
        assert_ne!(SqlValue::Boolean(true), SqlValue::Integer(1));
    }

    #[test]
    fn test_ordering_is_total() {
        let mut values = vec![
            SqlValue::Text("b".into()),
            SqlValue::Integer(3),
            SqlValue::Null,
            SqlValue::Text("a".into()),
            SqlValue::Boolean(false),
        ];
        values.sort();
        assert_eq!(values[0], SqlValue::Null);
        assert_eq!(values[4], SqlValue::Text("b".into()));
    }

    #[test]
    fn test_json_round_trip() {
        let values = vec![
            SqlValue::Null,
            SqlValue::Boolean(true),
            SqlValue::Integer(-7),
            SqlValue::Float(2.5),
            SqlValue::Text("latin1".into()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        let back: Vec<SqlValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(values, back);
    }
}
