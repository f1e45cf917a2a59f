//! PostgreSQL type quirks.
//!
//! The PostgreSQL JDBC driver reports many native types (`uuid`, `json`,
//! `jsonb`, `inet`, `interval`, enums) as `OTHER`, and unconstrained
//! `numeric` columns with a precision of 0 or 131089.

use crate::Result;
use crate::avro::{AvroSchema, DecimalLogicalType};
use crate::models::{DatabaseType, SqlType, TypeNameHints};

use super::SqlTypeMapping;
use super::generic::{DecimalDefaults, fallback_primitive, standard_primitive};

/// Precision the driver reports for `numeric` without a type modifier
const UNBOUNDED_NUMERIC_PRECISION: i32 = 131_089;

/// PostgreSQL-specific type mapping
#[derive(Debug, Clone, Default)]
pub struct PostgresTypeMapping {
    defaults: DecimalDefaults,
    hints: TypeNameHints,
}

impl PostgresTypeMapping {
    /// Creates a PostgreSQL mapping with the given decimal defaults
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

    fn declared_type(&self, table_name: Option<&str>, column_name: Option<&str>) -> Option<String> {
        column_name
            .and_then(|column| self.hints.get(table_name, column))
            .map(str::to_lowercase)
    }
}

impl SqlTypeMapping for PostgresTypeMapping {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::PostgreSQL
    }

    fn default_primitive(
        &self,
        table_name: Option<&str>,
        column_name: Option<&str>,
        sql_type: SqlType,
    ) -> AvroSchema {
        match sql_type {
            // bit(n) with n > 1 and bit varying are bit strings, not flags
            SqlType::BIT => match self.declared_type(table_name, column_name).as_deref() {
                Some(t) if t.starts_with("varbit") || t.starts_with("bit varying") => {
                    AvroSchema::String
                }
                Some(t) if t.starts_with("bit(") && t != "bit(1)" => AvroSchema::String,
                _ => AvroSchema::Boolean,
            },
            // uuid, json, jsonb, inet, interval, enums, ...
            SqlType::OTHER | SqlType::ARRAY | SqlType::DISTINCT | SqlType::STRUCT => {
                AvroSchema::String
            }
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
        if precision == Some(UNBOUNDED_NUMERIC_PRECISION) || precision == Some(0) {
            // numeric without modifiers reports a meaningless scale as well
            return self.defaults.resolve(None, None);
        }
        self.defaults.resolve(precision, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_maps_to_string() {
        let mapping = PostgresTypeMapping::default();
        assert_eq!(
            mapping.default_primitive(Some("users"), Some("id"), SqlType::OTHER),
            AvroSchema::String
        );
        assert_eq!(
            mapping.default_primitive(Some("users"), Some("tags"), SqlType::ARRAY),
            AvroSchema::String
        );
    }

    #[test]
    fn test_bit_strings_are_not_booleans() {
        let mut hints = TypeNameHints::new();
        hints.insert(Some("flags"), "active", "bit(1)");
        hints.insert(Some("flags"), "mask", "bit(8)");
        hints.insert(Some("flags"), "bits", "varbit");
        let mapping = PostgresTypeMapping::default().with_hints(hints);

        assert_eq!(
            mapping.default_primitive(Some("flags"), Some("active"), SqlType::BIT),
            AvroSchema::Boolean
        );
        assert_eq!(
            mapping.default_primitive(Some("flags"), Some("mask"), SqlType::BIT),
            AvroSchema::String
        );
        assert_eq!(
            mapping.default_primitive(Some("flags"), Some("bits"), SqlType::BIT),
            AvroSchema::String
        );
        assert_eq!(
            mapping.default_primitive(Some("flags"), None, SqlType::BIT),
            AvroSchema::Boolean
        );
    }

    #[test]
    fn test_unbounded_numeric_uses_defaults() {
        let mapping = PostgresTypeMapping::new(DecimalDefaults {
            precision: Some(30),
            scale: Some(6),
        });
        let decimal = mapping
            .default_decimal_logical_type(
                Some("ledger"),
                Some("amount"),
                SqlType::NUMERIC,
                Some(131_089),
                Some(0),
            )
            .unwrap();
        assert_eq!((decimal.precision(), decimal.scale()), (30, 6));

        let decimal = mapping
            .default_decimal_logical_type(
                Some("ledger"),
                Some("amount"),
                SqlType::NUMERIC,
                Some(10),
                Some(2),
            )
            .unwrap();
        assert_eq!((decimal.precision(), decimal.scale()), (10, 2));
    }
}
