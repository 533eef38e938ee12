//! Table definitions
//!
//! The root of the IR graph: an ordered sequence of columns plus table-level
//! metadata. Column order is semantically meaningful (downstream target
//! formats are positional), so equality compares columns pairwise by
//! position, never by name.

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::metadata::Metadata;

/// A dialect-neutral table definition.
///
/// Structural equality covers name, columns (in order), and metadata; `doc`
/// is documentation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<Column>,
    /// Documentation; excluded from equality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Table-level metadata (namespace, aliases, permission grants, ...)
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Table {
    /// Create a table from its columns in declaration order
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            doc: None,
            metadata: Metadata::new(),
        }
    }

    /// Attach documentation
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }

    /// The composite primary key: columns with a `primary_key_order`,
    /// ascending by that order.
    ///
    /// Duplicate positions are a producer defect and yield an unspecified
    /// relative order.
    pub fn primary_keys(&self) -> Vec<&Column> {
        let mut keys: Vec<&Column> = self
            .columns
            .iter()
            .filter(|col| col.primary_key_order.is_some())
            .collect();
        keys.sort_by_key(|col| col.primary_key_order);
        keys
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        // doc is intentionally not compared; columns compare by position
        self.name == other.name
            && self.columns == other.columns
            && self.metadata == other.metadata
    }
}

impl Eq for Table {}
