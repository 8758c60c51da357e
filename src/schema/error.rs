//! Error types for schema tables and schema loading.

use thiserror::Error;

use crate::language::SyntaxKind;

/// Errors raised when a schema or grammar table is inconsistent.
///
/// These signal a programming or packaging problem. Bad user input
/// (offsets outside the document, expressions that cannot be evaluated,
/// missing directories) is never reported through this type.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A value-kind tag that is not in the value-kind table.
    #[error("Unknown value kind: {0}")]
    UnknownValueKind(String),

    /// A syntax-kind tag that is not in the grammar table.
    #[error("Unknown syntax kind: {0}")]
    UnknownSyntaxKind(String),

    /// The grammar marks a child abstract but no schema category backs it.
    #[error("Syntax kind {kind:?} has no abstract enumeration")]
    NotAbstract { kind: SyntaxKind },

    /// JSON parsing error in a schema file.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error while reading a schema file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally invalid schema document.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },
}

impl SchemaError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create an invalid-structure error.
    pub fn invalid(kind: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            kind,
            message: message.into(),
        }
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
