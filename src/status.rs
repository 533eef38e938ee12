//! Lifecycle status of a registered schema
//!
//! The record store that persists translated schemas tags each one with a
//! status; the IR only defines the value so producers and consumers agree
//! on its wire spelling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema status: read-write, read-only, or disabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaStatus {
    #[default]
    #[serde(rename = "RW")]
    ReadWrite,
    #[serde(rename = "R")]
    ReadOnly,
    Disabled,
}

impl SchemaStatus {
    /// The wire spelling of this status
    pub const fn as_str(&self) -> &'static str {
        match self {
            SchemaStatus::ReadWrite => "RW",
            SchemaStatus::ReadOnly => "R",
            SchemaStatus::Disabled => "Disabled",
        }
    }

    /// Parse a status from its wire spelling
    pub fn parse(s: &str) -> Option<SchemaStatus> {
        match s {
            "RW" => Some(SchemaStatus::ReadWrite),
            "R" => Some(SchemaStatus::ReadOnly),
            "Disabled" => Some(SchemaStatus::Disabled),
            _ => None,
        }
    }

    /// Whether consumers may read under this status
    pub fn is_readable(&self) -> bool {
        matches!(self, SchemaStatus::ReadWrite | SchemaStatus::ReadOnly)
    }

    /// Whether producers may write under this status
    pub fn is_writable(&self) -> bool {
        matches!(self, SchemaStatus::ReadWrite)
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spelling_round_trips() {
        for status in [
            SchemaStatus::ReadWrite,
            SchemaStatus::ReadOnly,
            SchemaStatus::Disabled,
        ] {
            assert_eq!(SchemaStatus::parse(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            let back: SchemaStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(status, back);
        }
        assert_eq!(SchemaStatus::parse("rw"), None);
    }

    #[test]
    fn test_permissions() {
        assert!(SchemaStatus::ReadWrite.is_writable());
        assert!(SchemaStatus::ReadOnly.is_readable());
        assert!(!SchemaStatus::ReadOnly.is_writable());
        assert!(!SchemaStatus::Disabled.is_readable());
    }
}
