//! Avro schema generation from SQL column metadata.
//!
//! This crate turns the column list of a table (or free-form query result)
//! into an Avro record schema with one nullable field per column. It never
//! connects to a database: column metadata and vendor type quirks are
//! supplied through the collaborator traits in [`adapters`].
//!
//! # Architecture
//! - [`generator::SchemaGenerator`] assembles the record
//! - [`type_mapping::TypeMapper`] resolves each column to `[null, T]`
//! - [`adapters`] holds the metadata and vendor mapping traits plus their
//!   reference implementations
//! - [`naming`] sanitizes field names and picks record names
//!
//! # Example
//! ```rust
//! use dbavro_core::adapters::{SnapshotMetadataSource, create_type_mapping};
//! use dbavro_core::{GeneratorConfig, SchemaGenerator};
//!
//! # fn example() -> dbavro_core::Result<()> {
//! let metadata = SnapshotMetadataSource::from_json_str(
//!     r#"{"tables": {"ORDERS": [{"name": "ID", "sql_type": 4}]}}"#,
//! )?;
//! let config = GeneratorConfig::new();
//! let mapping = create_type_mapping(config.database_type, &config, metadata.type_name_hints());
//!
//! let generator = SchemaGenerator::new(&config, &metadata, mapping.as_ref())?;
//! let schema = generator.generate(Some("ORDERS"), None)?;
//! println!("{}", schema.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod avro;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod models;
pub mod naming;
pub mod type_mapping;
pub mod validation;

// Re-export commonly used types
pub use adapters::{ColumnMetadataSource, SnapshotMetadataSource, SqlTypeMapping, create_type_mapping};
pub use avro::{AvroSchema, DecimalLogicalType, RecordField, RecordSchema};
pub use config::GeneratorConfig;
pub use error::{DbAvroError, Result};
pub use generator::SchemaGenerator;
pub use logging::init_logging;
pub use models::{ColumnDescriptor, ColumnSqlInfo, DatabaseType, SqlType, TypeNameHints};
pub use naming::{AvroIdentifierSanitizer, IdentifierSanitizer, NamingPolicy, TableClassName};
pub use type_mapping::{OverrideType, TypeMapper, TypeOverrides};

pub use validation::{
    ValidationError, initialize_schema_validator, validate_avro_schema_output,
    validate_avro_schema_str,
};
