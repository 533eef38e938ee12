//! Error types for the schema IR

use thiserror::Error;

/// Result type for schema IR operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema IR errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("no conversion defined for data type '{type_name}'")]
    UnsupportedConversion { type_name: String },

    #[error("cannot interpret {raw:?} as a {type_name} value")]
    InvalidValue { type_name: String, raw: String },

    #[error("schema mismatch at {path}: expected {expected}, got {actual}")]
    Mismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
