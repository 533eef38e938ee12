//! Producer-obligation linting
//!
//! The IR is a faithful passive representation: constructors never reject
//! what a parser hands them. The obligations the producer carries anyway
//! (1-based unique primary-key positions, unique attribute names,
//! recognized or namespaced metadata keys) are checked here, as
//! diagnostics a pipeline can run between parse and translate.
//!
//! ## Lints
//! 1. **DUP_PK_ORDER**: two columns claim the same primary-key position
//! 2. **PK_ORDER_GAP**: positions are not contiguous from 1
//! 3. **DUP_ATTR_NAME**: an attribute set carries one name twice
//! 4. **UNKNOWN_METADATA_KEY**: a key that is neither recognized nor namespaced

use std::collections::HashMap;
use std::num::NonZeroU32;

use tracing::debug;

use crate::attribute::AttributeSet;
use crate::metadata::Metadata;
use crate::table::Table;

/// A single lint finding
#[derive(Debug)]
pub struct LintIssue {
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

/// Result of linting a table
#[derive(Debug, Default)]
pub struct LintReport {
    pub table: String,
    pub errors: Vec<LintIssue>,
    pub warnings: Vec<LintIssue>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// The producer-obligation linter
#[derive(Debug, Default)]
pub struct Linter {
    /// Strict mode promotes warnings to errors
    strict: bool,
}

impl Linter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict mode
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Check a table against the documented producer obligations
    pub fn check_table(&self, table: &Table) -> LintReport {
        let mut report = LintReport {
            table: table.name.clone(),
            ..LintReport::default()
        };

        self.check_primary_key_orders(table, &mut report);
        for (idx, column) in table.columns.iter().enumerate() {
            let prefix = format!("columns[{}]", idx);
            self.check_attribute_names(
                &column.data_type.attributes,
                &format!("{}.data_type.attributes", prefix),
                &mut report,
            );
            self.check_attribute_names(
                &column.attributes,
                &format!("{}.attributes", prefix),
                &mut report,
            );
            self.check_metadata_keys(&column.metadata, &format!("{}.metadata", prefix), &mut report);
        }
        self.check_metadata_keys(&table.metadata, "metadata", &mut report);

        debug!(
            table = %table.name,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "linted table"
        );
        report
    }

    fn check_primary_key_orders(&self, table: &Table, report: &mut LintReport) {
        let mut by_order: HashMap<NonZeroU32, Vec<&str>> = HashMap::new();
        for column in &table.columns {
            if let Some(order) = column.primary_key_order {
                by_order.entry(order).or_default().push(&column.name);
            }
        }

        for (order, columns) in &by_order {
            if columns.len() > 1 {
                report.errors.push(LintIssue {
                    code: "DUP_PK_ORDER",
                    message: format!(
                        "primary key position {} claimed by columns {}",
                        order,
                        columns.join(", ")
                    ),
                    path: "columns".to_string(),
                });
            }
        }

        let mut orders: Vec<u32> = by_order.keys().map(|o| o.get()).collect();
        orders.sort_unstable();
        let contiguous = orders.iter().enumerate().all(|(idx, &o)| o == idx as u32 + 1);
        if !contiguous {
            self.push(
                report,
                LintIssue {
                    code: "PK_ORDER_GAP",
                    message: format!("primary key positions {:?} are not contiguous from 1", orders),
                    path: "columns".to_string(),
                },
            );
        }
    }

    fn check_attribute_names(&self, attrs: &AttributeSet, path: &str, report: &mut LintReport) {
        for name in attrs.duplicate_names() {
            self.push(
                report,
                LintIssue {
                    code: "DUP_ATTR_NAME",
                    message: format!(
                        "attribute name '{}' appears more than once; lookups are last-write-wins",
                        name
                    ),
                    path: path.to_string(),
                },
            );
        }
    }

    fn check_metadata_keys(&self, metadata: &Metadata, path: &str, report: &mut LintReport) {
        for key in metadata.unrecognized_keys() {
            self.push(
                report,
                LintIssue {
                    code: "UNKNOWN_METADATA_KEY",
                    message: format!(
                        "metadata key '{}' is neither recognized nor namespaced",
                        key
                    ),
                    path: format!("{}.{}", path, key),
                },
            );
        }
    }

    fn push(&self, report: &mut LintReport, issue: LintIssue) {
        if self.strict {
            report.errors.push(issue);
        } else {
            report.warnings.push(issue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::column::Column;
    use crate::data_type::{ColumnDataType, SqlTypeKind};

    fn pk(order: u32) -> NonZeroU32 {
        NonZeroU32::new(order).unwrap()
    }

    #[test]
    fn test_clean_table() {
        let table = Table::new(
            "users",
            vec![
                Column::new("id", ColumnDataType::new(SqlTypeKind::Int))
                    .with_primary_key_order(pk(1)),
                Column::new("name", ColumnDataType::new(SqlTypeKind::VarChar)),
            ],
        );
        let report = Linter::new().check_table(&table);
        assert!(report.is_clean());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_duplicate_pk_order_is_error() {
        let table = Table::new(
            "users",
            vec![
                Column::new("id", ColumnDataType::new(SqlTypeKind::Int))
                    .with_primary_key_order(pk(1)),
                Column::new("shard", ColumnDataType::new(SqlTypeKind::Int))
                    .with_primary_key_order(pk(1)),
            ],
        );
        let report = Linter::new().check_table(&table);
        assert!(!report.is_clean());
        assert_eq!(report.errors[0].code, "DUP_PK_ORDER");
    }

    #[test]
    fn test_pk_gap_is_warning() {
        let table = Table::new(
            "users",
            vec![
                Column::new("id", ColumnDataType::new(SqlTypeKind::Int))
                    .with_primary_key_order(pk(2)),
            ],
        );
        let report = Linter::new().check_table(&table);
        assert!(report.is_clean());
        assert_eq!(report.warnings[0].code, "PK_ORDER_GAP");
    }

    #[test]
    fn test_duplicate_attribute_name_reported() {
        let table = Table::new(
            "users",
            vec![Column::new(
                "name",
                ColumnDataType::with_attributes(
                    SqlTypeKind::VarChar,
                    vec![
                        Attribute::with_value("charset", "utf8"),
                        Attribute::with_value("charset", "latin1"),
                    ],
                ),
            )],
        );
        let report = Linter::new().check_table(&table);
        assert_eq!(report.warnings[0].code, "DUP_ATTR_NAME");
    }

    #[test]
    fn test_strict_mode_promotes_warnings() {
        let mut metadata = Metadata::new();
        metadata.insert("owner", "etl");
        let table = Table::new("users", vec![]).with_metadata(metadata);

        let relaxed = Linter::new().check_table(&table);
        assert!(relaxed.is_clean());
        assert_eq!(relaxed.warnings[0].code, "UNKNOWN_METADATA_KEY");

        let strict = Linter::new().strict().check_table(&table);
        assert!(!strict.is_clean());
    }
}
