//! Oracle type quirks.
//!
//! Oracle reports `NUMBER` without precision as NUMERIC with precision 0
//! and scale -127, and uses vendor codes for binary floating point and
//! time-zone aware timestamps.

use crate::Result;
use crate::avro::{AvroSchema, DecimalLogicalType};
use crate::models::{DatabaseType, SqlType};

use super::SqlTypeMapping;
use super::generic::{DecimalDefaults, fallback_primitive, standard_primitive};

/// `oracle.jdbc.OracleTypes` codes
#[allow(missing_docs)]
pub mod codes {
    use crate::models::SqlType;

    pub const BINARY_FLOAT: SqlType = SqlType(100);
    pub const BINARY_DOUBLE: SqlType = SqlType(101);
    pub const TIMESTAMPTZ: SqlType = SqlType(-101);
    pub const TIMESTAMPLTZ: SqlType = SqlType(-102);
    pub const INTERVALYM: SqlType = SqlType(-103);
    pub const INTERVALDS: SqlType = SqlType(-104);
}

/// Oracle-specific type mapping
#[derive(Debug, Clone, Default)]
pub struct OracleTypeMapping {
    defaults: DecimalDefaults,
}

impl OracleTypeMapping {
    /// Creates an Oracle mapping with the given decimal defaults
    pub const fn new(defaults: DecimalDefaults) -> Self {
        Self { defaults }
    }
}

impl SqlTypeMapping for OracleTypeMapping {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Oracle
    }

    fn default_primitive(
        &self,
        _table_name: Option<&str>,
        column_name: Option<&str>,
        sql_type: SqlType,
    ) -> AvroSchema {
        match sql_type {
            codes::BINARY_FLOAT => AvroSchema::Float,
            codes::BINARY_DOUBLE => AvroSchema::Double,
            codes::TIMESTAMPTZ | codes::TIMESTAMPLTZ => AvroSchema::Long,
            codes::INTERVALYM | codes::INTERVALDS | SqlType::ROWID => AvroSchema::String,
            other => standard_primitive(other)
                .unwrap_or_else(|| fallback_primitive(self.database_type(), column_name, other)),
        }
    }

    fn default_decimal_logical_type(
        &self,
        _table_name: Option<&str>,
        column_name: Option<&str>,
        _sql_type: SqlType,
        precision: Option<i32>,
        scale: Option<i32>,
    ) -> Result<DecimalLogicalType> {
        // NUMBER(p, -s) rounds to the left of the point; Avro has no
        // negative scale, so such columns take the default scale.
        let scale = match scale {
            Some(s) if s < 0 => {
                tracing::debug!(
                    "Column {:?} has negative scale {}, using default scale",
                    column_name,
                    s
                );
                None
            }
            other => other,
        };
        self.defaults.resolve(precision, scale)
    }
}
