//! JSON Schema validation for generated Avro record schemas.
//!
//! Generated `.avsc` documents are checked against an embedded JSON
//! Schema describing the subset of Avro this crate emits, followed by
//! checks the JSON Schema cannot express: every field is a nullable union,
//! decimal scale never exceeds precision, and field names are unique.
//!
//! # Example
//! ```rust
//! use dbavro_core::validation::{initialize_schema_validator, validate_avro_schema_output};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! initialize_schema_validator()?;
//!
//! let schema = json!({
//!     "type": "record",
//!     "name": "ORDERS",
//!     "doc": "Import of ORDERS",
//!     "fields": [{"name": "ID", "type": ["null", "int"], "default": null}],
//!     "tableName": "ORDERS"
//! });
//!
//! validate_avro_schema_output(&schema)?;
//! # Ok(())
//! # }
//! ```

use jsonschema::Validator;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// JSON Schema validation errors with field-level reporting
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Schema compilation failed during initialization
    #[error("JSON Schema compilation failed: {message}")]
    SchemaCompilation { message: String },

    /// Validation failed with specific field errors
    #[error("Schema validation failed with {error_count} errors: {errors:?}")]
    ValidationFailed {
        error_count: usize,
        errors: Vec<String>,
    },

    /// A field is not the union `[null, T]`
    #[error("Field '{field}' is not nullable: {reason}")]
    NotNullable { field: String, reason: String },

    /// JSON parsing error
    #[error("JSON parsing failed: {source}")]
    JsonParsing {
        #[from]
        source: serde_json::Error,
    },
}

/// Embedded JSON Schema for generated Avro records
const AVRO_RECORD_SCHEMA: &str = r##"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Generated Avro record schema",
  "type": "object",
  "required": ["type", "name", "doc", "fields"],
  "properties": {
    "type": { "const": "record" },
    "name": { "$ref": "#/$defs/name" },
    "namespace": {
      "type": "string",
      "pattern": "^[A-Za-z_][A-Za-z0-9_]*(\\.[A-Za-z_][A-Za-z0-9_]*)*$"
    },
    "doc": { "type": "string" },
    "tableName": { "type": "string", "minLength": 1 },
    "fields": {
      "type": "array",
      "items": {
        "type": "object",
        "required": ["name", "type"],
        "properties": {
          "name": { "$ref": "#/$defs/name" },
          "type": { "$ref": "#/$defs/fieldType" },
          "default": { "type": "null" },
          "columnName": { "type": "string" },
          "sqlType": { "type": "string", "pattern": "^-?[0-9]+$" }
        }
      }
    }
  },
  "$defs": {
    "name": { "type": "string", "pattern": "^[A-Za-z_][A-Za-z0-9_]*$" },
    "primitive": {
      "enum": ["null", "boolean", "int", "long", "float", "double", "bytes", "string"]
    },
    "decimal": {
      "type": "object",
      "required": ["type", "logicalType", "precision", "scale"],
      "properties": {
        "type": { "const": "bytes" },
        "logicalType": { "const": "decimal" },
        "precision": { "type": "integer", "minimum": 1, "maximum": 38 },
        "scale": { "type": "integer", "minimum": 0, "maximum": 38 }
      }
    },
    "fieldType": {
      "type": "array",
      "minItems": 2,
      "maxItems": 2,
      "items": {
        "oneOf": [
          { "$ref": "#/$defs/primitive" },
          { "$ref": "#/$defs/decimal" }
        ]
      }
    }
  }
}"##;

/// Compiled JSON Schema instance (initialized once)
static COMPILED_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Initialize and compile the JSON Schema for validation
///
/// Safe to call more than once; later calls keep the first compiled schema.
///
/// # Errors
/// Returns `ValidationError::SchemaCompilation` if the embedded schema is invalid.
pub fn initialize_schema_validator() -> Result<(), ValidationError> {
    let schema_json = get_schema_definition()?;

    let compiled = jsonschema::validator_for(&schema_json).map_err(|e| {
        ValidationError::SchemaCompilation {
            message: format!("Schema compilation error: {}", e),
        }
    })?;

    let _ = COMPILED_SCHEMA.set(compiled);

    Ok(())
}

/// Validate a generated Avro record schema
///
/// # Errors
/// - `SchemaCompilation` if [`initialize_schema_validator`] was not called
/// - `ValidationFailed` for structural violations or duplicate field names
/// - `NotNullable` when a field type is not `[null, T]`
pub fn validate_avro_schema_output(json_value: &Value) -> Result<(), ValidationError> {
    let schema = COMPILED_SCHEMA
        .get()
        .ok_or_else(|| ValidationError::SchemaCompilation {
            message: "Schema validator not initialized. Call initialize_schema_validator() first."
                .to_string(),
        })?;

    let errors: Vec<String> = schema
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !errors.is_empty() {
        return Err(ValidationError::ValidationFailed {
            error_count: errors.len(),
            errors,
        });
    }

    validate_field_constraints(json_value)
}

/// Parses JSON text and validates it as a generated Avro record schema
///
/// # Errors
/// Returns `JsonParsing` for malformed JSON, otherwise as
/// [`validate_avro_schema_output`].
pub fn validate_avro_schema_str(json_str: &str) -> Result<Value, ValidationError> {
    let json_value: Value = serde_json::from_str(json_str)?;
    validate_avro_schema_output(&json_value)?;
    Ok(json_value)
}

/// Checks the JSON Schema cannot express
fn validate_field_constraints(json_value: &Value) -> Result<(), ValidationError> {
    let Some(fields) = json_value.get("fields").and_then(Value::as_array) else {
        return Ok(());
    };

    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        let name = field.get("name").and_then(Value::as_str).unwrap_or_default();
        if !seen.insert(name) {
            return Err(ValidationError::ValidationFailed {
                error_count: 1,
                errors: vec![format!("Duplicate field name '{}'", name)],
            });
        }

        let branches = field
            .get("type")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        match branches {
            [Value::String(first), value] if first == "null" => {
                if value.as_str() == Some("null") {
                    return Err(ValidationError::NotNullable {
                        field: name.to_string(),
                        reason: "both union branches are null".to_string(),
                    });
                }
                validate_decimal(name, value)?;
            }
            _ => {
                return Err(ValidationError::NotNullable {
                    field: name.to_string(),
                    reason: "first union branch must be null".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn validate_decimal(field: &str, value: &Value) -> Result<(), ValidationError> {
    let precision = value.get("precision").and_then(Value::as_u64);
    let scale = value.get("scale").and_then(Value::as_u64);
    if let (Some(precision), Some(scale)) = (precision, scale) {
        if scale > precision {
            return Err(ValidationError::ValidationFailed {
                error_count: 1,
                errors: vec![format!(
                    "Field '{}' has decimal scale {} greater than precision {}",
                    field, scale, precision
                )],
            });
        }
    }
    Ok(())
}

/// Get the embedded JSON Schema as a parsed Value for external use
///
/// # Errors
/// Returns `SchemaCompilation` if the embedded schema is not valid JSON
pub fn get_schema_definition() -> Result<Value, ValidationError> {
    serde_json::from_str(AVRO_RECORD_SCHEMA).map_err(|e| ValidationError::SchemaCompilation {
        message: format!("Failed to parse embedded schema: {}", e),
    })
}

#[cfg(test)]
mod tests;
