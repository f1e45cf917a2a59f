//! SQL Server type quirks.
//!
//! The Microsoft JDBC driver reports several native types with
//! `microsoft.sql.Types` codes instead of standard JDBC codes.

use crate::Result;
use crate::avro::{AvroSchema, DecimalLogicalType};
use crate::models::{DatabaseType, SqlType};

use super::SqlTypeMapping;
use super::generic::{DecimalDefaults, fallback_primitive, standard_primitive};

/// `microsoft.sql.Types` codes
#[allow(missing_docs)]
pub mod codes {
    use crate::models::SqlType;

    pub const GUID: SqlType = SqlType(-145);
    pub const SMALLMONEY: SqlType = SqlType(-146);
    pub const MONEY: SqlType = SqlType(-148);
    pub const SMALLDATETIME: SqlType = SqlType(-150);
    pub const DATETIME: SqlType = SqlType(-151);
    pub const DATETIMEOFFSET: SqlType = SqlType(-155);
    pub const SQL_VARIANT: SqlType = SqlType(-156);
    pub const GEOMETRY: SqlType = SqlType(-157);
    pub const GEOGRAPHY: SqlType = SqlType(-158);
}

/// SQL Server-specific type mapping
#[derive(Debug, Clone, Default)]
pub struct SqlServerTypeMapping {
    defaults: DecimalDefaults,
}

impl SqlServerTypeMapping {
    /// Creates a SQL Server mapping with the given decimal defaults
    pub const fn new(defaults: DecimalDefaults) -> Self {
        Self { defaults }
    }
}

impl SqlTypeMapping for SqlServerTypeMapping {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::SqlServer
    }

    fn default_primitive(
        &self,
        _table_name: Option<&str>,
        column_name: Option<&str>,
        sql_type: SqlType,
    ) -> AvroSchema {
        match sql_type {
            codes::SMALLDATETIME | codes::DATETIME => AvroSchema::Long,
            // keep the offset and exact currency digits as text
            codes::DATETIMEOFFSET | codes::MONEY | codes::SMALLMONEY => AvroSchema::String,
            codes::GUID | codes::SQL_VARIANT => AvroSchema::String,
            codes::GEOMETRY | codes::GEOGRAPHY => AvroSchema::Bytes,
            other => standard_primitive(other)
                .unwrap_or_else(|| fallback_primitive(self.database_type(), column_name, other)),
        }
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
