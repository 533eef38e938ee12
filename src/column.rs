//! Column definitions
//!
//! A column couples a name with an owned [`ColumnDataType`], nullability,
//! an optional default, an optional composite-primary-key position, its own
//! attribute set, and free-form metadata. Values are immutable once the
//! producing parser hands them off; evolution means building a new value.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::attribute::{Attribute, AttributeSet};
use crate::data_type::ColumnDataType;
use crate::metadata::Metadata;
use crate::value::SqlValue;

/// A single column of a table.
///
/// Structural equality covers every field except `doc`, which is
/// documentation only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// The column's storage type
    pub data_type: ColumnDataType,
    /// 1-based position within the table's composite primary key, if the
    /// column participates in it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key_order: Option<NonZeroU32>,
    /// Whether the column accepts NULL
    #[serde(default = "default_true")]
    pub is_nullable: bool,
    /// Default value as interpreted by the producing parser
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<SqlValue>,
    /// Documentation; excluded from equality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Column-level attributes beyond nullability and default
    #[serde(default, skip_serializing_if = "AttributeSet::is_empty")]
    pub attributes: AttributeSet,
    /// Parser-specific annotations (e.g., source aliases)
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

fn default_true() -> bool {
    true
}

impl Column {
    /// Create a nullable column with no default, attributes, or metadata
    pub fn new(name: impl Into<String>, data_type: ColumnDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            primary_key_order: None,
            is_nullable: true,
            default_value: None,
            doc: None,
            attributes: AttributeSet::new(),
            metadata: Metadata::new(),
        }
    }

    /// Set the 1-based composite-primary-key position
    pub fn with_primary_key_order(mut self, order: NonZeroU32) -> Self {
        self.primary_key_order = Some(order);
        self
    }

    /// Mark the column NOT NULL
    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<SqlValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Attach documentation
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attach column-level attributes
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes = attributes.into_iter().collect();
        self
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Look up a column-level attribute by name (last-write-wins on
    /// duplicate names)
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Whether the column participates in the composite primary key
    pub fn is_primary_key(&self) -> bool {
        self.primary_key_order.is_some()
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        // doc is intentionally not compared
        self.name == other.name
            && self.data_type == other.data_type
            && self.primary_key_order == other.primary_key_order
            && self.is_nullable == other.is_nullable
            && self.default_value == other.default_value
            && self.attributes == other.attributes
            && self.metadata == other.metadata
    }
}

impl Eq for Column {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_type::SqlTypeKind;

    fn id_column() -> Column {
        Column::new("id", ColumnDataType::new(SqlTypeKind::Int))
            .with_primary_key_order(NonZeroU32::new(1).unwrap())
            .not_null()
    }

    #[test]
    fn test_defaults() {
        let col = Column::new("name", ColumnDataType::new(SqlTypeKind::VarChar));
        assert!(col.is_nullable);
        assert!(col.default_value.is_none());
        assert!(!col.is_primary_key());
    }

    #[test]
    fn test_doc_excluded_from_equality() {
        let a = id_column().with_doc("the surrogate key");
        let b = id_column();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nullability_part_of_equality() {
        let a = Column::new("name", ColumnDataType::new(SqlTypeKind::VarChar));
        let b = Column::new("name", ColumnDataType::new(SqlTypeKind::VarChar)).not_null();
        assert_ne!(a, b);
    }

    #[test]
    fn test_attribute_lookup() {
        let col = Column::new("name", ColumnDataType::new(SqlTypeKind::VarChar))
            .with_attributes(vec![Attribute::with_value("collate", "utf8_general_ci")]);
        assert_eq!(
            col.get_attribute("collate").unwrap().value,
            SqlValue::from("utf8_general_ci")
        );
        assert!(col.get_attribute("charset").is_none());
    }

    #[test]
    fn test_default_value_part_of_equality() {
        let a = id_column().with_default(0);
        let b = id_column();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_round_trip() {
        let col = id_column()
            .with_doc("primary key")
            .with_attributes(vec![Attribute::new("unsigned")]);
        let json = serde_json::to_string(&col).unwrap();
        let back: Column = serde_json::from_str(&json).unwrap();
        assert_eq!(col, back);
        assert_eq!(back.doc.as_deref(), Some("primary key"));
    }
}
