//! Fingerprints for fast schema comparison
//!
//! A fingerprint is the SHA256 of a schema value's canonical JSON form.
//! Matching fingerprints let the diff tooling short-circuit before walking
//! two table graphs; the canonical form is deterministic because every map
//! in the IR iterates in sorted key order.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::Result;

/// SHA256 fingerprint of a schema value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute the fingerprint of any serializable schema value
    pub fn of<T: Serialize>(value: &T) -> Result<Self> {
        let canonical = serde_json::to_string(value)?;
        Ok(Self::from_bytes(canonical.as_bytes()))
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that a schema value matches this fingerprint
    pub fn verify<T: Serialize>(&self, value: &T) -> Result<bool> {
        Ok(*self == Self::of(value)?)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Fingerprint {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::data_type::{ColumnDataType, SqlTypeKind};
    use crate::table::Table;

    fn users_table() -> Table {
        Table::new(
            "users",
            vec![Column::new("id", ColumnDataType::new(SqlTypeKind::Int)).not_null()],
        )
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = Fingerprint::of(&users_table()).unwrap();
        let b = Fingerprint::of(&users_table()).unwrap();
        assert_eq!(a, b);
        assert!(a.verify(&users_table()).unwrap());
    }

    #[test]
    fn test_fingerprint_detects_change() {
        let base = Fingerprint::of(&users_table()).unwrap();
        let mut changed = users_table();
        changed.columns[0].is_nullable = true;
        assert!(!base.verify(&changed).unwrap());
    }
}
