//! Standard JDBC type mapping.
//!
//! Vendor mappings start from [`standard_primitive`] and only override the
//! codes where their driver reports something unusual.

use crate::Result;
use crate::avro::{AvroSchema, DecimalLogicalType, MAX_PRECISION};
use crate::config::GeneratorConfig;
use crate::models::{DatabaseType, SqlType};

use super::SqlTypeMapping;

/// Maps a standard JDBC type code to its Avro primitive.
///
/// Date and time values are carried as `long` epoch milliseconds, and
/// DECIMAL/NUMERIC fall back to `string` so no precision is lost when the
/// decimal logical type is disabled.
///
/// Returns `None` for codes without a standard mapping.
pub fn standard_primitive(sql_type: SqlType) -> Option<AvroSchema> {
    let avro = match sql_type {
        SqlType::TINYINT | SqlType::SMALLINT | SqlType::INTEGER => AvroSchema::Int,
        SqlType::BIGINT => AvroSchema::Long,
        SqlType::BIT | SqlType::BOOLEAN => AvroSchema::Boolean,
        SqlType::REAL => AvroSchema::Float,
        SqlType::FLOAT | SqlType::DOUBLE => AvroSchema::Double,
        SqlType::NUMERIC | SqlType::DECIMAL => AvroSchema::String,
        SqlType::CHAR
        | SqlType::VARCHAR
        | SqlType::LONGVARCHAR
        | SqlType::NCHAR
        | SqlType::NVARCHAR
        | SqlType::LONGNVARCHAR
        | SqlType::CLOB
        | SqlType::NCLOB
        | SqlType::SQLXML => AvroSchema::String,
        SqlType::DATE
        | SqlType::TIME
        | SqlType::TIMESTAMP
        | SqlType::TIME_WITH_TIMEZONE
        | SqlType::TIMESTAMP_WITH_TIMEZONE => AvroSchema::Long,
        SqlType::BINARY | SqlType::VARBINARY | SqlType::LONGVARBINARY | SqlType::BLOB => {
            AvroSchema::Bytes
        }
        _ => return None,
    };
    Some(avro)
}

/// Fallback for codes no mapping recognizes
pub(crate) fn fallback_primitive(
    database_type: DatabaseType,
    column_name: Option<&str>,
    sql_type: SqlType,
) -> AvroSchema {
    tracing::warn!(
        "Unknown {} SQL type {} ({}) for column {:?}, mapping to string",
        database_type,
        sql_type,
        sql_type.name().unwrap_or("vendor-specific"),
        column_name
    );
    AvroSchema::String
}

/// Precision and scale applied when a column reports none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecimalDefaults {
    /// Precision used when the column reports none or a non-positive value
    pub precision: Option<u32>,
    /// Scale used when the column reports none
    pub scale: Option<u32>,
}

impl DecimalDefaults {
    /// Reads the decimal defaults from the generator configuration
    pub const fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            precision: config.decimal_default_precision,
            scale: config.decimal_default_scale,
        }
    }

    /// Precision used for columns with unknown precision
    pub fn default_precision(&self) -> i64 {
        i64::from(self.precision.unwrap_or(MAX_PRECISION))
    }

    /// Scale used for columns with unknown scale
    pub fn default_scale(&self) -> i64 {
        i64::from(self.scale.unwrap_or(0))
    }

    /// Builds a decimal logical type from reported precision and scale.
    ///
    /// Unknown or non-positive precision takes the default; precision
    /// above 38 is capped. Unknown scale takes the default.
    ///
    /// # Errors
    /// Returns `InvalidDecimal` if the resolved pair is invalid, for
    /// instance a scale larger than the (capped) precision.
    pub fn resolve(&self, precision: Option<i32>, scale: Option<i32>) -> Result<DecimalLogicalType> {
        let precision = match precision {
            Some(p) if p > 0 => i64::from(p).min(i64::from(MAX_PRECISION)),
            _ => self.default_precision(),
        };
        let scale = scale.map_or_else(|| self.default_scale(), i64::from);
        DecimalLogicalType::new(precision, scale)
    }
}

/// Vendor-neutral JDBC type mapping
#[derive(Debug, Clone, Default)]
pub struct GenericTypeMapping {
    defaults: DecimalDefaults,
}

impl GenericTypeMapping {
    /// Creates a generic mapping with the given decimal defaults
    pub const fn new(defaults: DecimalDefaults) -> Self {
        Self { defaults }
    }
}

impl SqlTypeMapping for GenericTypeMapping {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Generic
    }

    fn default_primitive(
        &self,
        _table_name: Option<&str>,
        column_name: Option<&str>,
        sql_type: SqlType,
    ) -> AvroSchema {
        standard_primitive(sql_type)
            .unwrap_or_else(|| fallback_primitive(self.database_type(), column_name, sql_type))
    }

    fn default_decimal_logical_type(
        &self,
        _table_name: Option<&str>,
        _column_name: Option<&str>,
        _sql_type: SqlType,
        precision: Option<i32>,
        scale: Option<i32>,
    ) -> Result<DecimalLogicalType> {
        self.defaults.resolve(precision, scale)
    }
}
