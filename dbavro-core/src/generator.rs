//! Avro record schema generation for a table or free-form query.

use crate::adapters::{ColumnMetadataSource, SqlTypeMapping};
use crate::avro::{AvroSchema, RecordField, RecordSchema};
use crate::config::GeneratorConfig;
use crate::error::{DbAvroError, Result};
use crate::models::SqlType;
use crate::naming::{AvroIdentifierSanitizer, IdentifierSanitizer, NamingPolicy, TableClassName};
use crate::type_mapping::{TypeMapper, TypeOverrides};
use tracing::{debug, info};

/// Record name used for free-form query imports
pub const DEFAULT_SCHEMA_NAME: &str = "AutoGeneratedSchema";

/// Effective table name of a free-form query import
pub const QUERY_RESULT: &str = "QueryResult";

/// Field property holding the original column name
pub const COLUMN_NAME_PROP: &str = "columnName";

/// Field property holding the JDBC type code
pub const SQL_TYPE_PROP: &str = "sqlType";

/// Record property holding the source table name
pub const TABLE_NAME_PROP: &str = "tableName";

/// Builds Avro record schemas from column metadata.
///
/// The generator holds no per-call state: each [`generate`](Self::generate)
/// reads the metadata source afresh and returns a new schema. Generators
/// can be shared across threads when the collaborators allow it.
///
/// # Example
/// ```rust
/// use dbavro_core::adapters::{GenericTypeMapping, SnapshotMetadataSource};
/// use dbavro_core::config::GeneratorConfig;
/// use dbavro_core::generator::SchemaGenerator;
/// use dbavro_core::models::{ColumnDescriptor, SqlType};
///
/// # fn example() -> dbavro_core::Result<()> {
/// let metadata = SnapshotMetadataSource::new().with_table(
///     "ORDERS",
///     vec![ColumnDescriptor::new("ID", SqlType::INTEGER)],
/// );
/// let mapping = GenericTypeMapping::default();
/// let config = GeneratorConfig::new();
///
/// let generator = SchemaGenerator::new(&config, &metadata, &mapping)?;
/// let schema = generator.generate(Some("ORDERS"), None)?;
/// assert_eq!(schema.name(), "ORDERS");
/// assert_eq!(schema.doc(), "Import of ORDERS");
/// # Ok(())
/// # }
/// ```
pub struct SchemaGenerator<'a> {
    metadata: &'a dyn ColumnMetadataSource,
    type_mapping: &'a dyn SqlTypeMapping,
    naming: Box<dyn NamingPolicy + 'a>,
    sanitizer: Box<dyn IdentifierSanitizer + 'a>,
    overrides: TypeOverrides,
    decimal_logical_type: bool,
}

impl<'a> SchemaGenerator<'a> {
    /// Creates a generator using the default naming policy and sanitizer.
    ///
    /// # Errors
    /// Returns `InvalidTypeOverride` if the configured overrides name an
    /// unsupported type.
    pub fn new(
        config: &GeneratorConfig,
        metadata: &'a dyn ColumnMetadataSource,
        type_mapping: &'a dyn SqlTypeMapping,
    ) -> Result<Self> {
        Ok(Self {
            metadata,
            type_mapping,
            naming: Box::new(TableClassName::from_config(config)),
            sanitizer: Box::new(AvroIdentifierSanitizer),
            overrides: config.type_overrides()?,
            decimal_logical_type: config.enable_decimal_logical_type,
        })
    }

    /// Builder method to replace the naming policy
    pub fn with_naming(mut self, naming: impl NamingPolicy + 'a) -> Self {
        self.naming = Box::new(naming);
        self
    }

    /// Builder method to replace the column name sanitizer
    pub fn with_sanitizer(mut self, sanitizer: impl IdentifierSanitizer + 'a) -> Self {
        self.sanitizer = Box::new(sanitizer);
        self
    }

    /// Type mapper bound to a table (or `None` for a query import)
    pub fn type_mapper<'t>(&'t self, table_name: Option<&'t str>) -> TypeMapper<'t> {
        TypeMapper::new(self.type_mapping, &self.overrides, self.decimal_logical_type)
            .for_table(table_name)
    }

    /// Maps a single column to its nullable Avro type
    ///
    /// # Errors
    /// Returns `InvalidDecimal` if the decimal logical type cannot be built
    pub fn map_column(
        &self,
        table_name: Option<&str>,
        sql_type: SqlType,
        column_name: Option<&str>,
        precision: Option<i32>,
        scale: Option<i32>,
    ) -> Result<AvroSchema> {
        self.type_mapper(table_name)
            .map_column(sql_type, column_name, precision, scale)
    }

    /// Generates the record schema for a table, or for a free-form query
    /// when `table_name` is `None`.
    ///
    /// The record is named `schema_name_override` when given, otherwise by
    /// the naming policy, otherwise after the table. Query imports are
    /// named `AutoGeneratedSchema` and documented as `QueryResult`.
    ///
    /// # Errors
    /// - `MetadataUnavailable` when columns cannot be read or a listed
    ///   column has no SQL type info
    /// - `InvalidDecimal`, `InvalidName` or `DuplicateField` when the
    ///   resulting schema would be invalid
    pub fn generate(
        &self,
        table_name: Option<&str>,
        schema_name_override: Option<&str>,
    ) -> Result<RecordSchema> {
        let column_names = self.metadata.column_names_ordered(table_name)?;
        let column_info = self.metadata.column_sql_info(table_name)?;
        let mapper = self.type_mapper(table_name);

        let mut fields = Vec::with_capacity(column_names.len());
        for column_name in &column_names {
            let info = column_info.get(column_name).ok_or_else(|| {
                DbAvroError::metadata_unavailable(format!(
                    "No SQL type reported for column '{}'",
                    column_name
                ))
            })?;

            let field_name = self.sanitizer.sanitize(column_name);
            let schema =
                mapper.map_column(info.sql_type, Some(column_name), info.precision, info.scale)?;
            debug!("Column {} -> field {}", column_name, field_name);

            fields.push(
                RecordField::new(field_name, schema)
                    .with_property(COLUMN_NAME_PROP, column_name.as_str())
                    .with_property(SQL_TYPE_PROP, info.sql_type.to_string()),
            );
        }

        let effective_table = table_name.unwrap_or(QUERY_RESULT);
        let short_name = match table_name {
            Some(table) => self.naming.short_record_name(table),
            None => Some(DEFAULT_SCHEMA_NAME.to_string()),
        };
        let record_name = schema_name_override
            .map(str::to_string)
            .or(short_name)
            .unwrap_or_else(|| effective_table.to_string());
        let namespace = self.naming.namespace_for_table();
        let doc = format!("Import of {}", effective_table);

        let schema = RecordSchema::new(record_name, namespace, doc, fields)?
            .with_property(TABLE_NAME_PROP, effective_table);

        info!(
            "Generated Avro schema {} with {} fields for {}",
            schema.full_name(),
            schema.fields().len(),
            effective_table
        );

        Ok(schema)
    }
}
