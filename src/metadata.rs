//! Free-form table/column metadata and the recognized-key contract
//!
//! Metadata is an open string-keyed map the producing parser can stash
//! annotations in. Downstream consumers are only entitled to interpret the
//! keys in [`MetadataKey`]; everything else is opaque passthrough.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::value::SqlValue;

/// The closed set of metadata keys downstream logic may interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataKey {
    /// Target namespace of the schema
    Namespace,
    /// Source aliases for the table or column
    Aliases,
    /// Permission grants attached to the object
    Permission,
}

impl MetadataKey {
    /// All recognized keys
    pub const ALL: [MetadataKey; 3] = [
        MetadataKey::Namespace,
        MetadataKey::Aliases,
        MetadataKey::Permission,
    ];

    /// The canonical string spelling of this key
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Namespace => "namespace",
            MetadataKey::Aliases => "aliases",
            MetadataKey::Permission => "permission",
        }
    }

    /// Parse a recognized key from its string spelling
    pub fn parse(key: &str) -> Option<MetadataKey> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Whether a raw map key is one downstream code may interpret
    pub fn is_recognized(key: &str) -> bool {
        Self::parse(key).is_some()
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A grant of a permission level to a user or group over a named object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Name of the database object the grant applies to
    pub object_name: String,
    /// User or group the permission is granted to
    pub subject_name: String,
    /// Granted permission level (e.g., "select", "all")
    pub permission_level: String,
    /// Whether `subject_name` names a group rather than an individual
    pub for_group: bool,
}

impl PermissionGrant {
    /// Grant to an individual user
    pub fn for_user(
        object_name: impl Into<String>,
        subject_name: impl Into<String>,
        permission_level: impl Into<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            subject_name: subject_name.into(),
            permission_level: permission_level.into(),
            for_group: false,
        }
    }

    /// Grant to a group
    pub fn for_group(
        object_name: impl Into<String>,
        subject_name: impl Into<String>,
        permission_level: impl Into<String>,
    ) -> Self {
        Self {
            object_name: object_name.into(),
            subject_name: subject_name.into(),
            permission_level: permission_level.into(),
            for_group: true,
        }
    }
}

/// A metadata value: the primitive value domain plus nested collections and
/// a typed variant for permission grants.
///
/// Deserialization order matters for the untagged representation: grant
/// arrays must be tried before generic lists so `metadata["permission"]`
/// round-trips as [`MetadataValue::Grants`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Grants(Vec<PermissionGrant>),
    List(Vec<MetadataValue>),
    Map(BTreeMap<String, MetadataValue>),
}

impl PartialEq for MetadataValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MetadataValue::Null, MetadataValue::Null) => true,
            (MetadataValue::Boolean(a), MetadataValue::Boolean(b)) => a == b,
            (MetadataValue::Integer(a), MetadataValue::Integer(b)) => a == b,
            (MetadataValue::Float(a), MetadataValue::Float(b)) => a.to_bits() == b.to_bits(),
            (MetadataValue::Text(a), MetadataValue::Text(b)) => a == b,
            (MetadataValue::Grants(a), MetadataValue::Grants(b)) => a == b,
            (MetadataValue::List(a), MetadataValue::List(b)) => a == b,
            (MetadataValue::Map(a), MetadataValue::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for MetadataValue {}

impl From<SqlValue> for MetadataValue {
    fn from(value: SqlValue) -> Self {
        match value {
            SqlValue::Null => MetadataValue::Null,
            SqlValue::Boolean(b) => MetadataValue::Boolean(b),
            SqlValue::Integer(i) => MetadataValue::Integer(i),
            SqlValue::Float(x) => MetadataValue::Float(x),
            SqlValue::Text(s) => MetadataValue::Text(s),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::Text(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::Text(s)
    }
}

impl From<i64> for MetadataValue {
    fn from(i: i64) -> Self {
        MetadataValue::Integer(i)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        MetadataValue::Boolean(b)
    }
}

impl From<Vec<String>> for MetadataValue {
    fn from(items: Vec<String>) -> Self {
        MetadataValue::List(items.into_iter().map(MetadataValue::Text).collect())
    }
}

impl From<Vec<PermissionGrant>> for MetadataValue {
    fn from(grants: Vec<PermissionGrant>) -> Self {
        MetadataValue::Grants(grants)
    }
}

/// String-keyed metadata map with deterministic iteration order.
///
/// Backed by a `BTreeMap` so diffing and serialization never depend on
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetadataValue>);

impl Metadata {
    /// Create an empty metadata map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up an entry by raw key
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    /// Whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetadataValue)> {
        self.0.iter()
    }

    /// The target namespace, if set
    pub fn namespace(&self) -> Option<&str> {
        match self.get(MetadataKey::Namespace.as_str()) {
            Some(MetadataValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Source aliases, if set
    pub fn aliases(&self) -> Option<Vec<&str>> {
        match self.get(MetadataKey::Aliases.as_str()) {
            Some(MetadataValue::List(items)) => Some(
                items
                    .iter()
                    .filter_map(|item| match item {
                        MetadataValue::Text(s) => Some(s.as_str()),
                        _ => None,
                    })
                    .collect(),
            ),
            Some(MetadataValue::Text(s)) => Some(vec![s.as_str()]),
            _ => None,
        }
    }

    /// Permission grants, if set
    pub fn permissions(&self) -> Option<&[PermissionGrant]> {
        match self.get(MetadataKey::Permission.as_str()) {
            Some(MetadataValue::Grants(grants)) => Some(grants),
            _ => None,
        }
    }

    /// Keys that are neither recognized nor namespaced (contain no `.`).
    ///
    /// Producers are expected to restrict themselves to [`MetadataKey`]
    /// entries plus clearly-namespaced private keys; the lint layer reports
    /// anything else.
    pub fn unrecognized_keys(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|key| !MetadataKey::is_recognized(key) && !key.contains('.'))
            .collect()
    }
}

impl FromIterator<(String, MetadataValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, MetadataValue)>>(iter: I) -> Self {
        Metadata(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_keys() {
        assert!(MetadataKey::is_recognized("namespace"));
        assert!(MetadataKey::is_recognized("aliases"));
        assert!(MetadataKey::is_recognized("permission"));
        assert!(!MetadataKey::is_recognized("owner"));
        assert_eq!(MetadataKey::parse("aliases"), Some(MetadataKey::Aliases));
    }

    #[test]
    fn test_typed_accessors() {
        let mut meta = Metadata::new();
        meta.insert(MetadataKey::Namespace.as_str(), "warehouse.core");
        meta.insert(
            MetadataKey::Aliases.as_str(),
            MetadataValue::from(vec!["legacy_users".to_string()]),
        );
        meta.insert(
            MetadataKey::Permission.as_str(),
            vec![PermissionGrant::for_group("users", "analytics", "select")],
        );

        assert_eq!(meta.namespace(), Some("warehouse.core"));
        assert_eq!(meta.aliases(), Some(vec!["legacy_users"]));
        assert_eq!(meta.permissions().unwrap().len(), 1);
        assert!(meta.permissions().unwrap()[0].for_group);
    }

    #[test]
    fn test_unrecognized_keys_skip_namespaced() {
        let mut meta = Metadata::new();
        meta.insert("namespace", "ns");
        meta.insert("parser.source_line", 12i64);
        meta.insert("owner", "etl");
        assert_eq!(meta.unrecognized_keys(), vec!["owner"]);
    }

    #[test]
    fn test_grant_equality_is_structural() {
        let a = PermissionGrant::for_user("users", "alice", "select");
        let b = PermissionGrant::for_user("users", "alice", "select");
        assert_eq!(a, b);
        let c = PermissionGrant::for_group("users", "alice", "select");
        assert_ne!(a, c);
    }

    #[test]
    fn test_permission_round_trips_as_grants() {
        let mut meta = Metadata::new();
        meta.insert(
            "permission",
            vec![
                PermissionGrant::for_user("users", "alice", "select"),
                PermissionGrant::for_group("users", "analysts", "all"),
            ],
        );
        let json = serde_json::to_string(&meta).unwrap();
        let back: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, back);
        assert_eq!(back.permissions().unwrap().len(), 2);
    }
}
