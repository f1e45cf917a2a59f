//! Schema generation configuration.
//!
//! `GeneratorConfig` carries the option flags the generator reads. Raw
//! type overrides are kept as strings so configuration files round-trip,
//! and are parsed into [`TypeOverrides`] by [`GeneratorConfig::type_overrides`].

use crate::avro::MAX_PRECISION;
use crate::error::{DbAvroError, Result};
use crate::models::DatabaseType;
use crate::type_mapping::TypeOverrides;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration for Avro schema generation.
///
/// # Example
/// ```rust
/// use dbavro_core::config::GeneratorConfig;
///
/// let config = GeneratorConfig::new()
///     .with_decimal_logical_type(true)
///     .with_column_override("PRICE", "double");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Map DECIMAL/NUMERIC columns to the Avro `decimal` logical type
    pub enable_decimal_logical_type: bool,
    /// Column name to override token (INTEGER, LONG, BOOLEAN, FLOAT, DOUBLE, STRING, BYTES)
    pub map_column_java: BTreeMap<String, String>,
    /// Precision for decimal columns reporting none (defaults to 38)
    pub decimal_default_precision: Option<u32>,
    /// Scale for decimal columns reporting none (defaults to 0)
    pub decimal_default_scale: Option<u32>,
    /// Fully qualified record name; its package part becomes the namespace
    pub class_name: Option<String>,
    /// Namespace used when `class_name` has no package part
    pub package_name: Option<String>,
    /// Vendor whose type quirks apply
    pub database_type: DatabaseType,
}

impl GeneratorConfig {
    /// Creates a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a configuration from JSON text
    ///
    /// # Errors
    /// Returns `Serialization` for malformed JSON and `Configuration` /
    /// `InvalidTypeOverride` when the parsed values fail validation
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config = Self::parse_json_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a configuration file
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str)
    pub fn from_path(path: &Path) -> Result<Self> {
        let config = Self::read_path(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses JSON text without validating it.
    ///
    /// Callers layering further settings on top call [`validate`](Self::validate)
    /// once the result is complete.
    ///
    /// # Errors
    /// Returns `Serialization` for malformed JSON
    pub fn parse_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DbAvroError::serialization("Failed to parse generator config", e))
    }

    /// Reads a configuration file without validating it.
    ///
    /// # Arguments
    /// * `path` - JSON configuration file
    ///
    /// # Returns
    /// The parsed configuration, which may still fail [`validate`](Self::validate)
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read and `Serialization` for
    /// malformed JSON
    pub fn read_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| DbAvroError::Io {
            context: format!("Failed to read generator config {}", path.display()),
            source: e,
        })?;
        Self::parse_json_str(&json)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// - `InvalidTypeOverride` for an unknown override token
    /// - `Configuration` for out-of-range decimal defaults
    pub fn validate(&self) -> Result<()> {
        self.type_overrides()?;

        if let Some(precision) = self.decimal_default_precision {
            if precision == 0 || precision > MAX_PRECISION {
                return Err(DbAvroError::configuration(format!(
                    "decimal_default_precision must be between 1 and {}, got {}",
                    MAX_PRECISION, precision
                )));
            }
        }

        if let Some(scale) = self.decimal_default_scale {
            let precision = self.decimal_default_precision.unwrap_or(MAX_PRECISION);
            if scale > precision {
                return Err(DbAvroError::configuration(format!(
                    "decimal_default_scale {} exceeds default precision {}",
                    scale, precision
                )));
            }
        }

        if self.class_name.as_deref().is_some_and(str::is_empty) {
            return Err(DbAvroError::configuration("class_name must not be empty"));
        }

        Ok(())
    }

    /// Parses the raw override table.
    ///
    /// # Errors
    /// Returns `InvalidTypeOverride` for the first unknown token
    pub fn type_overrides(&self) -> Result<TypeOverrides> {
        TypeOverrides::parse(&self.map_column_java)
    }

    /// Builder method to enable/disable the decimal logical type.
    pub const fn with_decimal_logical_type(mut self, enabled: bool) -> Self {
        self.enable_decimal_logical_type = enabled;
        self
    }

    /// Builder method to add a column type override.
    pub fn with_column_override(
        mut self,
        column: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.map_column_java.insert(column.into(), token.into());
        self
    }

    /// Builder method to set decimal defaults.
    pub const fn with_decimal_defaults(mut self, precision: Option<u32>, scale: Option<u32>) -> Self {
        self.decimal_default_precision = precision;
        self.decimal_default_scale = scale;
        self
    }

    /// Builder method to set the record class name.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Builder method to set the package (namespace).
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Builder method to set the database vendor.
    pub const fn with_database_type(mut self, database_type: DatabaseType) -> Self {
        self.database_type = database_type;
        self
    }
}

/// Parses `column=Type` assignments, as accepted on the command line.
///
/// # Errors
/// Returns `Configuration` for an assignment without `=` or with an empty
/// column name.
pub fn parse_column_assignments(assignments: &[String]) -> Result<BTreeMap<String, String>> {
    let mut parsed = BTreeMap::new();
    for assignment in assignments {
        let (column, token) = assignment.split_once('=').ok_or_else(|| {
            DbAvroError::configuration(format!(
                "Malformed column mapping '{}', expected column=Type",
                assignment
            ))
        })?;
        let column = column.trim();
        if column.is_empty() {
            return Err(DbAvroError::configuration(format!(
                "Malformed column mapping '{}', column name is empty",
                assignment
            )));
        }
        parsed.insert(column.to_string(), token.trim().to_string());
    }
    Ok(parsed)
}
