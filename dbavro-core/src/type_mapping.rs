//! SQL column type to Avro type resolution.
//!
//! Every column becomes the union `[null, T]`. `T` is resolved in order:
//! 1. a user override for the column name,
//! 2. the `decimal` logical type for DECIMAL/NUMERIC when enabled,
//! 3. the vendor's default primitive mapping.

use crate::adapters::SqlTypeMapping;
use crate::avro::{AvroSchema, MAX_PRECISION};
use crate::error::{DbAvroError, Result};
use crate::models::SqlType;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Bytes needed to hold an unscaled decimal of precision `index + 1`.
///
/// `ceil((log2(10^p - 1) + 1) / 8)`, the same sizing Hive uses for
/// fixed-length Parquet decimals.
pub static PRECISION_TO_BYTE_COUNT: LazyLock<[usize; MAX_PRECISION as usize]> =
    LazyLock::new(|| {
        let mut table = [0_usize; MAX_PRECISION as usize];
        for (precision, slot) in (1_i32..).zip(table.iter_mut()) {
            *slot = estimated_byte_count(precision);
        }
        table
    });

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn estimated_byte_count(precision: i32) -> usize {
    let max_unscaled = 10_f64.powi(precision) - 1.0;
    ((max_unscaled.log2() + 1.0) / 8.0).ceil() as usize
}

/// Looks up the byte count for a precision in `1..=38`
pub fn byte_count_for_precision(precision: u32) -> Option<usize> {
    let index = usize::try_from(precision).ok()?.checked_sub(1)?;
    PRECISION_TO_BYTE_COUNT.get(index).copied()
}

/// Target types a user may force onto a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideType {
    /// `INTEGER`, Avro `int`
    Integer,
    /// `LONG`, Avro `long`
    Long,
    /// `BOOLEAN`, Avro `boolean`
    Boolean,
    /// `FLOAT`, Avro `float`
    Float,
    /// `DOUBLE`, Avro `double`
    Double,
    /// `STRING`, Avro `string`
    String,
    /// `BYTES`, Avro `bytes`
    Bytes,
}

impl OverrideType {
    /// Parses an override token, ignoring case.
    ///
    /// Surrounding whitespace is not stripped; `" integer "` is rejected.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_uppercase().as_str() {
            "INTEGER" => Some(Self::Integer),
            "LONG" => Some(Self::Long),
            "BOOLEAN" => Some(Self::Boolean),
            "FLOAT" => Some(Self::Float),
            "DOUBLE" => Some(Self::Double),
            "STRING" => Some(Self::String),
            "BYTES" => Some(Self::Bytes),
            _ => None,
        }
    }

    /// Avro type the override stands for
    pub const fn to_avro(self) -> AvroSchema {
        match self {
            Self::Integer => AvroSchema::Int,
            Self::Long => AvroSchema::Long,
            Self::Boolean => AvroSchema::Boolean,
            Self::Float => AvroSchema::Float,
            Self::Double => AvroSchema::Double,
            Self::String => AvroSchema::String,
            Self::Bytes => AvroSchema::Bytes,
        }
    }
}

impl std::fmt::Display for OverrideType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Self::Integer => "INTEGER",
            Self::Long => "LONG",
            Self::Boolean => "BOOLEAN",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Bytes => "BYTES",
        };
        f.write_str(token)
    }
}

/// Per-column type overrides, keyed by the original column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeOverrides {
    by_column: HashMap<String, OverrideType>,
}

impl TypeOverrides {
    /// Creates an empty override table
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses raw `column -> token` overrides.
    ///
    /// # Errors
    /// Returns `InvalidTypeOverride` for the first token outside the
    /// supported vocabulary.
    pub fn parse(raw: &BTreeMap<String, String>) -> Result<Self> {
        let mut by_column = HashMap::with_capacity(raw.len());
        for (column, token) in raw {
            let override_type = OverrideType::from_token(token)
                .ok_or_else(|| DbAvroError::invalid_override(column, token))?;
            by_column.insert(column.clone(), override_type);
        }
        Ok(Self { by_column })
    }

    /// Builder method to add an override
    pub fn with_override(mut self, column: impl Into<String>, override_type: OverrideType) -> Self {
        self.by_column.insert(column.into(), override_type);
        self
    }

    /// Override for a column, if any
    pub fn get(&self, column: &str) -> Option<OverrideType> {
        self.by_column.get(column).copied()
    }
}

/// Resolves column types to nullable Avro unions for one table.
pub struct TypeMapper<'a> {
    vendor: &'a dyn SqlTypeMapping,
    overrides: &'a TypeOverrides,
    decimal_logical_type: bool,
    table_name: Option<&'a str>,
}

impl<'a> TypeMapper<'a> {
    /// Creates a mapper for a free-form query (no table name)
    pub fn new(
        vendor: &'a dyn SqlTypeMapping,
        overrides: &'a TypeOverrides,
        decimal_logical_type: bool,
    ) -> Self {
        Self {
            vendor,
            overrides,
            decimal_logical_type,
            table_name: None,
        }
    }

    /// Builder method to set the table passed to vendor mappings
    pub const fn for_table(mut self, table_name: Option<&'a str>) -> Self {
        self.table_name = table_name;
        self
    }

    /// Maps one column to `[null, T]`.
    ///
    /// # Errors
    /// Propagates `InvalidDecimal` from the vendor's decimal mapping.
    pub fn map_column(
        &self,
        sql_type: SqlType,
        column_name: Option<&str>,
        precision: Option<i32>,
        scale: Option<i32>,
    ) -> Result<AvroSchema> {
        let value = self.resolve_value_type(sql_type, column_name, precision, scale)?;
        Ok(AvroSchema::nullable(value))
    }

    /// Maps a bare SQL type with no column context.
    ///
    /// Overrides are keyed by column name, so they never apply here.
    ///
    /// # Errors
    /// Propagates `InvalidDecimal` from the vendor's decimal mapping.
    pub fn map_sql_type(&self, sql_type: SqlType) -> Result<AvroSchema> {
        self.map_column(sql_type, None, None, None)
    }

    fn resolve_value_type(
        &self,
        sql_type: SqlType,
        column_name: Option<&str>,
        precision: Option<i32>,
        scale: Option<i32>,
    ) -> Result<AvroSchema> {
        if let Some(column) = column_name {
            if let Some(override_type) = self.overrides.get(column) {
                info!("Overriding type of column {} to {}", column, override_type);
                return Ok(override_type.to_avro());
            }
        }

        if self.decimal_logical_type && sql_type.is_decimal() {
            let decimal = self.vendor.default_decimal_logical_type(
                self.table_name,
                column_name,
                sql_type,
                precision,
                scale,
            )?;
            debug!(
                "Column {:?} mapped to decimal({}, {}) ({} bytes)",
                column_name,
                decimal.precision(),
                decimal.scale(),
                decimal.byte_count()
            );
            return Ok(AvroSchema::Decimal(decimal));
        }

        let primitive = self
            .vendor
            .default_primitive(self.table_name, column_name, sql_type);
        debug!(
            "Column {:?} (SQL type {}) mapped to {}",
            column_name,
            sql_type,
            primitive.type_name()
        );
        Ok(primitive)
    }
}
