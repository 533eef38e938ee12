//! Structural diffing of tables and columns
//!
//! Equality tells a consumer *that* two schemas drifted; the diff tells it
//! *where*. Comparison order is fixed and documented: name first, then
//! columns pairwise by position, then metadata as a full map. Attribute
//! sets are compared pairwise after sorting by name, so the result never
//! depends on set-iteration order.
//!
//! Diffing never fails; the assertion-style helpers turn the first mismatch
//! into a descriptive error for test diagnostics.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};
use std::collections::BTreeSet;

use crate::attribute::{Attribute, AttributeSet};
use crate::column::Column;
use crate::error::{Result, SchemaError};
use crate::metadata::{Metadata, MetadataValue};
use crate::table::Table;

/// A single structural mismatch between two schemas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mismatch {
    /// Path to the differing element (e.g., "columns[2].attributes[0]")
    pub path: String,
    /// Expected-side rendering, absent when the element is missing there
    pub expected: Option<String>,
    /// Actual-side rendering, absent when the element is missing there
    pub actual: Option<String>,
    /// Human-readable description
    pub description: String,
}

/// Result of diffing two tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffReport {
    /// Whether the schemas matched
    pub is_match: bool,
    /// Every mismatch found, in comparison order
    pub mismatches: Vec<Mismatch>,
    /// Summary of the comparison
    pub summary: String,
}

impl DiffReport {
    fn from_mismatches(mismatches: Vec<Mismatch>) -> Self {
        let summary = if mismatches.is_empty() {
            "schemas match".to_string()
        } else {
            format!("{} mismatches detected", mismatches.len())
        };
        Self {
            is_match: mismatches.is_empty(),
            mismatches,
            summary,
        }
    }

    /// The first mismatch in comparison order, if any
    pub fn first(&self) -> Option<&Mismatch> {
        self.mismatches.first()
    }
}

/// Diff two tables field by field.
///
/// Columns are compared pairwise by position; two tables holding the same
/// columns in a different order do not match.
pub fn diff_tables(expected: &Table, actual: &Table) -> DiffReport {
    let mut mismatches = Vec::new();

    if expected.name != actual.name {
        mismatches.push(Mismatch {
            path: "name".to_string(),
            expected: Some(expected.name.clone()),
            actual: Some(actual.name.clone()),
            description: "table name differs".to_string(),
        });
    }

    for (idx, (exp_col, act_col)) in expected.columns.iter().zip(&actual.columns).enumerate() {
        diff_columns_at(&format!("columns[{}].", idx), exp_col, act_col, &mut mismatches);
    }

    if expected.columns.len() != actual.columns.len() {
        mismatches.push(Mismatch {
            path: "columns".to_string(),
            expected: Some(expected.columns.len().to_string()),
            actual: Some(actual.columns.len().to_string()),
            description: "column count differs".to_string(),
        });
    }

    diff_metadata("metadata", &expected.metadata, &actual.metadata, &mut mismatches);

    DiffReport::from_mismatches(mismatches)
}

/// Diff two columns field by field
pub fn diff_columns(expected: &Column, actual: &Column) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    diff_columns_at("", expected, actual, &mut mismatches);
    mismatches
}

/// Fail with a descriptive error on the first table mismatch
pub fn assert_tables_match(expected: &Table, actual: &Table) -> Result<()> {
    fail_on_first(diff_tables(expected, actual).mismatches)
}

/// Fail with a descriptive error on the first column mismatch
pub fn assert_columns_match(expected: &Column, actual: &Column) -> Result<()> {
    fail_on_first(diff_columns(expected, actual))
}

/// Render a line-oriented text diff of the canonical JSON forms, for
/// human-facing output
pub fn render_text_diff(expected: &Table, actual: &Table) -> Result<String> {
    let expected_text = serde_json::to_string_pretty(expected)?;
    let actual_text = serde_json::to_string_pretty(actual)?;

    let diff = TextDiff::from_lines(&expected_text, &actual_text);
    let mut rendered = String::new();
    for change in diff.iter_all_changes() {
        let prefix = match change.tag() {
            ChangeTag::Delete => "- ",
            ChangeTag::Insert => "+ ",
            ChangeTag::Equal => continue,
        };
        rendered.push_str(prefix);
        rendered.push_str(change.value().trim_end_matches('\n'));
        rendered.push('\n');
    }
    Ok(rendered)
}

fn fail_on_first(mismatches: Vec<Mismatch>) -> Result<()> {
    match mismatches.into_iter().next() {
        None => Ok(()),
        Some(m) => Err(SchemaError::Mismatch {
            path: m.path,
            expected: m.expected.unwrap_or_else(|| "<absent>".to_string()),
            actual: m.actual.unwrap_or_else(|| "<absent>".to_string()),
        }),
    }
}

fn diff_columns_at(prefix: &str, expected: &Column, actual: &Column, out: &mut Vec<Mismatch>) {
    if expected.name != actual.name {
        out.push(Mismatch {
            path: format!("{}name", prefix),
            expected: Some(expected.name.clone()),
            actual: Some(actual.name.clone()),
            description: "column name differs".to_string(),
        });
    }

    if expected.data_type.kind != actual.data_type.kind {
        out.push(Mismatch {
            path: format!("{}data_type.kind", prefix),
            expected: Some(expected.data_type.kind.name().to_string()),
            actual: Some(actual.data_type.kind.name().to_string()),
            description: "data type differs".to_string(),
        });
    }
    diff_attribute_sets(
        &format!("{}data_type.attributes", prefix),
        &expected.data_type.attributes,
        &actual.data_type.attributes,
        out,
    );

    if expected.primary_key_order != actual.primary_key_order {
        out.push(Mismatch {
            path: format!("{}primary_key_order", prefix),
            expected: Some(render_pk_order(expected)),
            actual: Some(render_pk_order(actual)),
            description: "primary key position differs".to_string(),
        });
    }

    if expected.is_nullable != actual.is_nullable {
        out.push(Mismatch {
            path: format!("{}is_nullable", prefix),
            expected: Some(expected.is_nullable.to_string()),
            actual: Some(actual.is_nullable.to_string()),
            description: "nullability differs".to_string(),
        });
    }

    if expected.default_value != actual.default_value {
        out.push(Mismatch {
            path: format!("{}default_value", prefix),
            expected: expected.default_value.as_ref().map(|v| v.to_string()),
            actual: actual.default_value.as_ref().map(|v| v.to_string()),
            description: "default value differs".to_string(),
        });
    }

    diff_attribute_sets(
        &format!("{}attributes", prefix),
        &expected.attributes,
        &actual.attributes,
        out,
    );

    diff_metadata(
        &format!("{}metadata", prefix),
        &expected.metadata,
        &actual.metadata,
        out,
    );
}

// Pairwise over the name-sorted members, so a mismatch always names the
// first attribute that differs under a deterministic order.
fn diff_attribute_sets(
    prefix: &str,
    expected: &AttributeSet,
    actual: &AttributeSet,
    out: &mut Vec<Mismatch>,
) {
    let exp_sorted = expected.sorted();
    let act_sorted = actual.sorted();

    for (idx, (exp, act)) in exp_sorted.iter().zip(act_sorted.iter()).enumerate() {
        if exp != act {
            out.push(Mismatch {
                path: format!("{}[{}]", prefix, idx),
                expected: Some(render_attribute(exp)),
                actual: Some(render_attribute(act)),
                description: format!("attribute '{}' differs", exp.name),
            });
        }
    }

    if exp_sorted.len() != act_sorted.len() {
        out.push(Mismatch {
            path: prefix.to_string(),
            expected: Some(exp_sorted.len().to_string()),
            actual: Some(act_sorted.len().to_string()),
            description: "attribute count differs".to_string(),
        });
    }
}

fn diff_metadata(prefix: &str, expected: &Metadata, actual: &Metadata, out: &mut Vec<Mismatch>) {
    let keys: BTreeSet<&str> = expected
        .iter()
        .map(|(k, _)| k.as_str())
        .chain(actual.iter().map(|(k, _)| k.as_str()))
        .collect();

    for key in keys {
        let path = format!("{}.{}", prefix, key);
        match (expected.get(key), actual.get(key)) {
            (Some(exp), Some(act)) if exp != act => out.push(Mismatch {
                path,
                expected: Some(render_metadata_value(exp)),
                actual: Some(render_metadata_value(act)),
                description: format!("metadata key '{}' differs", key),
            }),
            (Some(exp), None) => out.push(Mismatch {
                path,
                expected: Some(render_metadata_value(exp)),
                actual: None,
                description: format!("metadata key '{}' missing", key),
            }),
            (None, Some(act)) => out.push(Mismatch {
                path,
                expected: None,
                actual: Some(render_metadata_value(act)),
                description: format!("metadata key '{}' unexpected", key),
            }),
            _ => {}
        }
    }
}

fn render_attribute(attr: &Attribute) -> String {
    if attr.has_value {
        format!("{}={}", attr.name, attr.value)
    } else {
        attr.name.clone()
    }
}

fn render_metadata_value(value: &MetadataValue) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}

fn render_pk_order(column: &Column) -> String {
    match column.primary_key_order {
        Some(order) => order.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::data_type::{ColumnDataType, SqlTypeKind};

    fn varchar_column(charset: &str) -> Column {
        Column::new(
            "name",
            ColumnDataType::with_attributes(
                SqlTypeKind::VarChar,
                vec![
                    Attribute::with_value("length", 255),
                    Attribute::with_value("character set", charset),
                ],
            ),
        )
    }

    #[test]
    fn test_matching_tables_produce_empty_report() {
        let a = Table::new("users", vec![varchar_column("utf8")]);
        let b = Table::new("users", vec![varchar_column("utf8")]);
        let report = diff_tables(&a, &b);
        assert!(report.is_match);
        assert!(report.mismatches.is_empty());
        assert!(assert_tables_match(&a, &b).is_ok());
    }

    #[test]
    fn test_first_mismatch_names_the_attribute() {
        let a = Table::new("users", vec![varchar_column("utf8")]);
        let b = Table::new("users", vec![varchar_column("latin1")]);
        let report = diff_tables(&a, &b);
        assert!(!report.is_match);
        let first = report.first().unwrap();
        assert!(first.path.starts_with("columns[0].data_type.attributes"));
        assert!(first.description.contains("character set"));
    }

    #[test]
    fn test_assert_error_is_descriptive() {
        let a = Table::new("users", vec![varchar_column("utf8")]);
        let b = Table::new("accounts", vec![varchar_column("utf8")]);
        let err = assert_tables_match(&a, &b).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("name"));
        assert!(message.contains("users"));
        assert!(message.contains("accounts"));
    }

    #[test]
    fn test_assert_columns_match_reports_first_field() {
        let a = varchar_column("utf8");
        let b = varchar_column("utf8").not_null();
        let err = assert_columns_match(&a, &b).unwrap_err();
        assert!(err.to_string().contains("is_nullable"));
    }

    #[test]
    fn test_column_count_mismatch_reported_after_pairwise() {
        let a = Table::new(
            "users",
            vec![varchar_column("utf8"), varchar_column("utf8")],
        );
        let b = Table::new("users", vec![varchar_column("utf8")]);
        let report = diff_tables(&a, &b);
        assert_eq!(report.mismatches.len(), 1);
        assert_eq!(report.mismatches[0].path, "columns");
    }

    #[test]
    fn test_metadata_key_mismatches() {
        let mut meta_a = Metadata::new();
        meta_a.insert("namespace", "warehouse");
        let mut meta_b = Metadata::new();
        meta_b.insert("namespace", "staging");
        meta_b.insert("owner", "etl");

        let a = Table::new("users", vec![]).with_metadata(meta_a);
        let b = Table::new("users", vec![]).with_metadata(meta_b);
        let report = diff_tables(&a, &b);
        let paths: Vec<&str> = report.mismatches.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["metadata.namespace", "metadata.owner"]);
    }

    #[test]
    fn test_text_diff_marks_changed_lines() {
        let a = Table::new("users", vec![varchar_column("utf8")]);
        let b = Table::new("users", vec![varchar_column("latin1")]);
        let rendered = render_text_diff(&a, &b).unwrap();
        assert!(rendered.contains("- "));
        assert!(rendered.contains("+ "));
        assert!(rendered.contains("latin1"));
    }
}
