//! Error types for Avro schema generation.
//!
//! Every error aborts generation of the whole record schema. Nothing in
//! this crate attempts local recovery or returns partial schemas, so each
//! variant carries enough context (column, token, precision) to identify
//! the failing input on its own.

use thiserror::Error;

/// Main error type for dbavro operations.
#[derive(Debug, Error)]
pub enum DbAvroError {
    /// Column metadata could not be retrieved from the metadata source
    #[error("Column metadata unavailable: {context}")]
    MetadataUnavailable {
        /// What was being looked up
        context: String,
        /// Failure reported by the metadata source, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A user type override names a type outside the supported vocabulary
    #[error(
        "Cannot convert column '{column}' to Avro type '{token}' \
         (expected one of INTEGER, LONG, BOOLEAN, FLOAT, DOUBLE, STRING, BYTES)"
    )]
    InvalidTypeOverride {
        /// Column the override was given for
        column: String,
        /// Rejected type token
        token: String,
    },

    /// Decimal precision/scale rejected by the logical-type constructor
    #[error("Invalid decimal(precision={precision}, scale={scale}): {reason}")]
    InvalidDecimal {
        /// Requested precision
        precision: i64,
        /// Requested scale
        scale: i64,
        /// Which bound was violated
        reason: String,
    },

    /// Record name or namespace is not a legal Avro name
    #[error("Illegal Avro name '{name}': {reason}")]
    InvalidName {
        /// Rejected name
        name: String,
        /// Why it is illegal
        reason: String,
    },

    /// Two columns sanitize to the same field name
    #[error("Duplicate field '{field}' produced by column '{column}'")]
    DuplicateField {
        /// Sanitized field name
        field: String,
        /// Column whose field collided with an earlier one
        column: String,
    },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the problem
        message: String,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        /// Operation and path that failed
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        /// What was being parsed or written
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with DbAvroError
pub type Result<T> = std::result::Result<T, DbAvroError>;

impl DbAvroError {
    /// Creates a metadata error without an underlying cause
    pub fn metadata_unavailable(context: impl Into<String>) -> Self {
        Self::MetadataUnavailable {
            context: context.into(),
            source: None,
        }
    }

    /// Creates a metadata error wrapping the collaborator's failure
    pub fn metadata_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::MetadataUnavailable {
            context: context.into(),
            source: Some(Box::new(error)),
        }
    }

    /// Creates an invalid type override error
    pub fn invalid_override(column: impl Into<String>, token: impl Into<String>) -> Self {
        Self::InvalidTypeOverride {
            column: column.into(),
            token: token.into(),
        }
    }

    /// Creates an invalid decimal error
    pub fn invalid_decimal(precision: i64, scale: i64, reason: impl Into<String>) -> Self {
        Self::InvalidDecimal {
            precision,
            scale,
            reason: reason.into(),
        }
    }

    /// Creates an illegal name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a serialization error with context
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}
