//! Column data types and dialect-agnostic value conversion
//!
//! Every concrete SQL type is a variant of [`SqlTypeKind`], and each variant
//! knows how to interpret the raw textual form a DDL parser hands over
//! (default values, enum literals, and so on). A [`ColumnDataType`] pairs a
//! kind with its type-specific attributes, e.g. a varchar's character set or
//! an integer's `unsigned` flag.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attribute::{Attribute, AttributeSet};
use crate::error::{Result, SchemaError};
use crate::value::SqlValue;

/// The concrete SQL type of a column.
///
/// `Other` carries a dialect-specific type name the IR has no conversion
/// rule for; asking it to convert a value is a contract violation, not a
/// data error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlTypeKind {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Decimal,
    Numeric,
    Float,
    Double,
    Bit,
    Boolean,
    Char,
    VarChar,
    TinyText,
    Text,
    MediumText,
    LongText,
    Binary,
    VarBinary,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,
    Enum,
    Set,
    Other(String),
}

impl SqlTypeKind {
    /// The lowercase SQL spelling of this type
    pub fn name(&self) -> &str {
        match self {
            SqlTypeKind::TinyInt => "tinyint",
            SqlTypeKind::SmallInt => "smallint",
            SqlTypeKind::MediumInt => "mediumint",
            SqlTypeKind::Int => "int",
            SqlTypeKind::BigInt => "bigint",
            SqlTypeKind::Decimal => "decimal",
            SqlTypeKind::Numeric => "numeric",
            SqlTypeKind::Float => "float",
            SqlTypeKind::Double => "double",
            SqlTypeKind::Bit => "bit",
            SqlTypeKind::Boolean => "boolean",
            SqlTypeKind::Char => "char",
            SqlTypeKind::VarChar => "varchar",
            SqlTypeKind::TinyText => "tinytext",
            SqlTypeKind::Text => "text",
            SqlTypeKind::MediumText => "mediumtext",
            SqlTypeKind::LongText => "longtext",
            SqlTypeKind::Binary => "binary",
            SqlTypeKind::VarBinary => "varbinary",
            SqlTypeKind::TinyBlob => "tinyblob",
            SqlTypeKind::Blob => "blob",
            SqlTypeKind::MediumBlob => "mediumblob",
            SqlTypeKind::LongBlob => "longblob",
            SqlTypeKind::Date => "date",
            SqlTypeKind::DateTime => "datetime",
            SqlTypeKind::Timestamp => "timestamp",
            SqlTypeKind::Time => "time",
            SqlTypeKind::Year => "year",
            SqlTypeKind::Enum => "enum",
            SqlTypeKind::Set => "set",
            SqlTypeKind::Other(name) => name,
        }
    }

    /// Convert a non-null raw string into this type's native value domain.
    ///
    /// Integer kinds parse to [`SqlValue::Integer`], decimal and float kinds
    /// to [`SqlValue::Float`], booleans accept `1`/`0`/`true`/`false`, and
    /// textual, temporal, and binary kinds pass the raw string through
    /// unchanged as [`SqlValue::Text`].
    pub fn convert(&self, raw: &str) -> Result<SqlValue> {
        match self {
            SqlTypeKind::TinyInt
            | SqlTypeKind::SmallInt
            | SqlTypeKind::MediumInt
            | SqlTypeKind::Int
            | SqlTypeKind::BigInt
            | SqlTypeKind::Bit
            | SqlTypeKind::Year => raw
                .trim()
                .parse::<i64>()
                .map(SqlValue::Integer)
                .map_err(|_| self.invalid_value(raw)),

            SqlTypeKind::Decimal
            | SqlTypeKind::Numeric
            | SqlTypeKind::Float
            | SqlTypeKind::Double => raw
                .trim()
                .parse::<f64>()
                .map(SqlValue::Float)
                .map_err(|_| self.invalid_value(raw)),

            SqlTypeKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => Ok(SqlValue::Boolean(true)),
                "0" | "false" => Ok(SqlValue::Boolean(false)),
                _ => Err(self.invalid_value(raw)),
            },

            SqlTypeKind::Char
            | SqlTypeKind::VarChar
            | SqlTypeKind::TinyText
            | SqlTypeKind::Text
            | SqlTypeKind::MediumText
            | SqlTypeKind::LongText
            | SqlTypeKind::Binary
            | SqlTypeKind::VarBinary
            | SqlTypeKind::TinyBlob
            | SqlTypeKind::Blob
            | SqlTypeKind::MediumBlob
            | SqlTypeKind::LongBlob
            | SqlTypeKind::Date
            | SqlTypeKind::DateTime
            | SqlTypeKind::Timestamp
            | SqlTypeKind::Time
            | SqlTypeKind::Enum
            | SqlTypeKind::Set => Ok(SqlValue::Text(raw.to_string())),

            SqlTypeKind::Other(name) => Err(SchemaError::UnsupportedConversion {
                type_name: name.clone(),
            }),
        }
    }

    fn invalid_value(&self, raw: &str) -> SchemaError {
        SchemaError::InvalidValue {
            type_name: self.name().to_string(),
            raw: raw.to_string(),
        }
    }
}

impl fmt::Display for SqlTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A column's storage type: a concrete [`SqlTypeKind`] plus its
/// type-specific attributes.
///
/// Two data types are equal iff they are the same concrete kind *and* their
/// attribute sets match; identical attributes on different kinds never
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDataType {
    /// The concrete SQL type
    pub kind: SqlTypeKind,
    /// Type-specific attributes (length, charset, unsigned, ...)
    #[serde(default, skip_serializing_if = "AttributeSet::is_empty")]
    pub attributes: AttributeSet,
}

impl ColumnDataType {
    /// Create a data type with no attributes
    pub fn new(kind: SqlTypeKind) -> Self {
        Self {
            kind,
            attributes: AttributeSet::new(),
        }
    }

    /// Create a data type with attributes
    pub fn with_attributes(
        kind: SqlTypeKind,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Self {
        Self {
            kind,
            attributes: attributes.into_iter().collect(),
        }
    }

    /// Whether an attribute with this name is present
    pub fn attribute_exists(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    /// Look up an attribute by name (last-write-wins on duplicate names)
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Interpret a raw textual value in this type's value domain.
    ///
    /// An absent string, or one that case-insensitively equals `"null"`, is
    /// normal data and yields [`SqlValue::Null`]; anything else is handed to
    /// [`SqlTypeKind::convert`].
    pub fn to_value(&self, raw: Option<&str>) -> Result<SqlValue> {
        match raw {
            Some(s) if !s.eq_ignore_ascii_case("null") => self.kind.convert(s),
            _ => Ok(SqlValue::Null),
        }
    }
}
