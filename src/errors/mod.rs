//! Error types for the codec core.
//!
//! Maps decode, fixture, and validation failures to semantic error types.
//! Malformed input is a caller/contract bug, not a transient condition, so
//! nothing here carries retry semantics.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Root error type for the codec core
#[derive(Error, Debug)]
pub enum CodecError {
    /// Decoding error
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Fixture corpus error
    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CodecError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "CODEC_DECODE",
            Self::Fixture(_) => "CODEC_FIXTURE",
            Self::Validation(_) => "CODEC_VALIDATION",
        }
    }
}

/// Decoding errors
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Wire value does not match the declared field type
    #[error("Type mismatch at `{field}`: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Path of the offending field
        field: String,
        /// Declared type
        expected: &'static str,
        /// Wire value description
        actual: String,
    },

    /// Discriminator value selects no variant and the union has no fallback
    #[error("Unknown variant `{value}` for discriminator `{discriminator}` at `{field}`")]
    UnknownVariant {
        /// Path of the union field
        field: String,
        /// Discriminator wire name
        discriminator: String,
        /// Unrecognized discriminator value
        value: String,
    },

    /// Schema name not present in the registry
    #[error("Unknown schema `{0}`")]
    UnknownSchema(String),

    /// Operation has no registered response schema
    #[error("Unknown operation `{0}`")]
    UnknownOperation(String),

    /// Field name not declared by the schema
    #[error("Schema `{schema}` has no field `{field}`")]
    UnknownField {
        /// Schema name
        schema: String,
        /// Offending field name
        field: String,
    },

    /// Document root is not a JSON object
    #[error("Document for schema `{schema}` must be a JSON object, got {actual}")]
    InvalidDocument {
        /// Target schema name
        schema: String,
        /// Wire value description
        actual: String,
    },

    /// JSON parse error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixture corpus errors
#[derive(Error, Debug)]
pub enum FixtureError {
    /// No fixture captured for the operation
    #[error("No fixture for `{operation}` at {}", .path.display())]
    NotFound {
        /// Operation name
        operation: String,
        /// Resolved fixture path
        path: PathBuf,
    },

    /// Fixture file could not be read
    #[error("Failed to read fixture at {}: {source}", .path.display())]
    Io {
        /// Resolved fixture path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// One or more non-excluded fields were unset
    #[error("{} unset field(s): {}", .paths.len(), .paths.join(", "))]
    UnsetFields {
        /// Paths of every unset field, in traversal order
        paths: Vec<String>,
    },

    /// Exclusion pattern failed to compile
    #[error("Invalid exclusion pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The rejected pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
}
