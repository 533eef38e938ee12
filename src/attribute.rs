//! Named, optionally-valued properties attached to columns and data types
//!
//! An attribute is something like a character set, a collation, or an
//! `unsigned` flag: a name that may or may not carry a value. `has_value`
//! distinguishes a bare flag from an attribute whose value is legitimately
//! null, so `DEFAULT NULL` and a plain `DEFAULT` marker stay distinct.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::value::SqlValue;

/// A single named attribute with an optional value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name (e.g., "character set", "unsigned")
    pub name: String,
    /// The attribute value; `Null` when the attribute is a bare flag
    #[serde(default = "null_value")]
    pub value: SqlValue,
    /// Whether a value was supplied at all
    #[serde(default)]
    pub has_value: bool,
}

fn null_value() -> SqlValue {
    SqlValue::Null
}

impl Attribute {
    /// Create a bare flag attribute with no value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: SqlValue::Null,
            has_value: false,
        }
    }

    /// Create an attribute carrying a value
    pub fn with_value(name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            has_value: true,
        }
    }
}

/// A set of attributes, deduplicated by full value-identity, with an O(1)
/// name index.
///
/// Two members may share a name as long as their values differ; the name
/// index is then last-write-wins in insertion order. `duplicate_names`
/// surfaces that situation instead of resolving it silently, and the lint
/// layer reports it. Equality and hashing are order-insensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct AttributeSet {
    attrs: Vec<Attribute>,
    by_name: HashMap<String, usize>,
}

impl AttributeSet {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute.
    ///
    /// An attribute equal to an existing member is not stored twice, but it
    /// still claims the name index (last-write-wins).
    pub fn insert(&mut self, attr: Attribute) {
        let name = attr.name.clone();
        let idx = match self.attrs.iter().position(|existing| *existing == attr) {
            Some(idx) => idx,
            None => {
                self.attrs.push(attr);
                self.attrs.len() - 1
            }
        };
        self.by_name.insert(name, idx);
    }

    /// Whether an attribute with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Look up an attribute by name.
    ///
    /// If several members share the name, the most recently inserted one is
    /// returned.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.by_name.get(name).map(|&idx| &self.attrs[idx])
    }

    /// Number of attributes in the set
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate over attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    /// Attributes sorted by name (then by value), the canonical order used
    /// for pairwise comparison
    pub fn sorted(&self) -> Vec<&Attribute> {
        let mut sorted: Vec<&Attribute> = self.attrs.iter().collect();
        sorted.sort();
        sorted
    }

    /// Names carried by more than one member of the set
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for attr in &self.attrs {
            *counts.entry(attr.name.as_str()).or_insert(0) += 1;
        }
        let mut dupes: Vec<&str> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();
        dupes.sort_unstable();
        dupes
    }
}

impl PartialEq for AttributeSet {
    fn eq(&self, other: &Self) -> bool {
        self.attrs.len() == other.attrs.len() && self.sorted() == other.sorted()
    }
}

impl Eq for AttributeSet {}

impl Hash for AttributeSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for attr in self.sorted() {
            attr.hash(state);
        }
    }
}

impl From<Vec<Attribute>> for AttributeSet {
    fn from(attrs: Vec<Attribute>) -> Self {
        attrs.into_iter().collect()
    }
}

impl From<AttributeSet> for Vec<Attribute> {
    fn from(set: AttributeSet) -> Self {
        set.attrs
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for attr in iter {
            set.insert(attr);
        }
        set
    }
}
