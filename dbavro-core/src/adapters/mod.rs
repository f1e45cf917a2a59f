//! Collaborator traits and vendor type mappings.
//!
//! The schema generator never talks to a database. It depends on two
//! capabilities defined here:
//! - [`ColumnMetadataSource`] supplies ordered column names and SQL type info
//! - [`SqlTypeMapping`] supplies vendor-specific default Avro types
//!
//! # Module Structure
//! - `generic`: Standard JDBC mapping shared by every vendor
//! - `postgres`, `mysql`, `oracle`, `sqlserver`: Vendor quirks
//! - `snapshot`: In-memory metadata source loaded from JSON

use crate::Result;
use crate::avro::{AvroSchema, DecimalLogicalType};
use crate::config::GeneratorConfig;
use crate::models::{ColumnSqlInfo, DatabaseType, SqlType, TypeNameHints};
use std::collections::HashMap;

pub mod generic;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod snapshot;
pub mod sqlserver;

pub use generic::{DecimalDefaults, GenericTypeMapping};
pub use mysql::MySqlTypeMapping;
pub use oracle::OracleTypeMapping;
pub use postgres::PostgresTypeMapping;
pub use snapshot::SnapshotMetadataSource;
pub use sqlserver::SqlServerTypeMapping;

/// Source of column metadata for a table or free-form query.
///
/// A `None` table name denotes a query-based import.
pub trait ColumnMetadataSource: Send + Sync {
    /// Column names in ordinal order
    ///
    /// # Errors
    /// Returns `MetadataUnavailable` if the columns cannot be read
    fn column_names_ordered(&self, table_name: Option<&str>) -> Result<Vec<String>>;

    /// SQL type, precision and scale per column name
    ///
    /// # Errors
    /// Returns `MetadataUnavailable` if the columns cannot be read
    fn column_sql_info(&self, table_name: Option<&str>) -> Result<HashMap<String, ColumnSqlInfo>>;
}

/// Vendor-specific default mapping from SQL types to Avro types.
///
/// Implementations must be total: every SQL type code resolves to some
/// Avro type, falling back to `string` for codes they do not know.
pub trait SqlTypeMapping: Send + Sync {
    /// Vendor this mapping implements
    fn database_type(&self) -> DatabaseType;

    /// Default primitive Avro type for a column
    fn default_primitive(
        &self,
        table_name: Option<&str>,
        column_name: Option<&str>,
        sql_type: SqlType,
    ) -> AvroSchema;

    /// Decimal logical type for a DECIMAL/NUMERIC column
    ///
    /// # Errors
    /// Returns `InvalidDecimal` when the resolved precision/scale pair is
    /// not a valid Avro decimal
    fn default_decimal_logical_type(
        &self,
        table_name: Option<&str>,
        column_name: Option<&str>,
        sql_type: SqlType,
        precision: Option<i32>,
        scale: Option<i32>,
    ) -> Result<DecimalLogicalType>;
}

/// Creates the type mapping for a database vendor.
///
/// # Example
/// ```rust
/// use dbavro_core::adapters::create_type_mapping;
/// use dbavro_core::config::GeneratorConfig;
/// use dbavro_core::models::{DatabaseType, SqlType, TypeNameHints};
/// use dbavro_core::avro::AvroSchema;
///
/// let config = GeneratorConfig::new();
/// let mapping = create_type_mapping(DatabaseType::Generic, &config, TypeNameHints::new());
/// assert_eq!(mapping.default_primitive(None, None, SqlType::BIGINT), AvroSchema::Long);
/// ```
pub fn create_type_mapping(
    database_type: DatabaseType,
    config: &GeneratorConfig,
    hints: TypeNameHints,
) -> Box<dyn SqlTypeMapping> {
    let defaults = DecimalDefaults::from_config(config);
    match database_type {
        DatabaseType::Generic => Box::new(GenericTypeMapping::new(defaults)),
        DatabaseType::PostgreSQL => Box::new(PostgresTypeMapping::new(defaults).with_hints(hints)),
        DatabaseType::MySQL => Box::new(MySqlTypeMapping::new(defaults).with_hints(hints)),
        DatabaseType::Oracle => Box::new(OracleTypeMapping::new(defaults)),
        DatabaseType::SqlServer => Box::new(SqlServerTypeMapping::new(defaults)),
    }
}
