//! MySQL type quirks.
//!
//! The JDBC code alone hides unsigned integers and `YEAR` columns, so this
//! mapping consults declared type names (`INT UNSIGNED`, `YEAR`) when they
//! are known.

use crate::Result;
use crate::avro::{AvroSchema, DecimalLogicalType};
use crate::models::{DatabaseType, SqlType, TypeNameHints};

use super::SqlTypeMapping;
use super::generic::{DecimalDefaults, fallback_primitive, standard_primitive};

/// MySQL-specific type mapping
#[derive(Debug, Clone, Default)]
pub struct MySqlTypeMapping {
    defaults: DecimalDefaults,
    hints: TypeNameHints,
}

impl MySqlTypeMapping {
    /// Creates a MySQL mapping with the given decimal defaults
    pub fn new(defaults: DecimalDefaults) -> Self {
        Self {
            defaults,
            hints: TypeNameHints::new(),
        }
    }

    /// Builder method to set declared column type names
    pub fn with_hints(mut self, hints: TypeNameHints) -> Self {
        self.hints = hints;
        self
    }
}

/// Widens unsigned integers so every value fits the Avro type
fn unsigned_primitive(base_type: &str) -> Option<AvroSchema> {
    match base_type {
        "tinyint" | "smallint" | "mediumint" => Some(AvroSchema::Int),
        "int" | "integer" => Some(AvroSchema::Long),
        // BIGINT UNSIGNED exceeds i64
        "bigint" => Some(AvroSchema::String),
        _ => None,
    }
}

impl SqlTypeMapping for MySqlTypeMapping {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::MySQL
    }

    fn default_primitive(
        &self,
        table_name: Option<&str>,
        column_name: Option<&str>,
        sql_type: SqlType,
    ) -> AvroSchema {
        let declared = column_name
            .and_then(|column| self.hints.get(table_name, column))
            .map(str::to_lowercase);

        if let Some(declared) = declared.as_deref() {
            // Strip display width: "int(10) unsigned" -> "int unsigned"
            let base_type = declared
                .split(|c: char| c == '(' || c.is_whitespace())
                .next()
                .unwrap_or(declared);

            if declared.contains("unsigned") {
                if let Some(avro) = unsigned_primitive(base_type) {
                    return avro;
                }
            }
            if base_type == "year" {
                return AvroSchema::Int;
            }
        }

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
        // DECIMAL(65, s) is legal in MySQL; resolve() caps it to 38
        self.defaults.resolve(precision, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping_with(column: &str, type_name: &str) -> MySqlTypeMapping {
        let mut hints = TypeNameHints::new();
        hints.insert(Some("orders"), column, type_name);
        MySqlTypeMapping::default().with_hints(hints)
    }

    #[test]
    fn test_unsigned_integers_are_widened() {
        let mapping = mapping_with("qty", "INT(10) UNSIGNED");
        assert_eq!(
            mapping.default_primitive(Some("orders"), Some("qty"), SqlType::INTEGER),
            AvroSchema::Long
        );

        let mapping = mapping_with("id", "bigint unsigned");
        assert_eq!(
            mapping.default_primitive(Some("orders"), Some("id"), SqlType::BIGINT),
            AvroSchema::String
        );

        let mapping = mapping_with("flags", "smallint unsigned");
        assert_eq!(
            mapping.default_primitive(Some("orders"), Some("flags"), SqlType::SMALLINT),
            AvroSchema::Int
        );
    }

    #[test]
    fn test_signed_integers_use_standard_mapping() {
        let mapping = mapping_with("qty", "int(11)");
        assert_eq!(
            mapping.default_primitive(Some("orders"), Some("qty"), SqlType::INTEGER),
            AvroSchema::Int
        );
        // hints are keyed by table
        let mapping = mapping_with("qty", "int unsigned");
        assert_eq!(
            mapping.default_primitive(Some("items"), Some("qty"), SqlType::INTEGER),
            AvroSchema::Int
        );
    }

    #[test]
    fn test_year_maps_to_int() {
        let mapping = mapping_with("fiscal_year", "year(4)");
        assert_eq!(
            mapping.default_primitive(Some("orders"), Some("fiscal_year"), SqlType::DATE),
            AvroSchema::Int
        );
    }

    #[test]
    fn test_wide_decimal_is_capped() {
        let mapping = MySqlTypeMapping::default();
        let decimal = mapping
            .default_decimal_logical_type(
                Some("orders"),
                Some("total"),
                SqlType::DECIMAL,
                Some(65),
                Some(10),
            )
            .unwrap();
        assert_eq!((decimal.precision(), decimal.scale()), (38, 10));
    }
}
