//! Avro schema model produced by the generator.
//!
//! Only the subset of Avro needed to describe an imported table is
//! modelled: primitive types, the `decimal` logical type over `bytes`,
//! unions, and a single top-level record. Serialization follows the Avro
//! JSON schema grammar so the output can be written directly as `.avsc`.

use crate::error::{DbAvroError, Result};
use crate::type_mapping::byte_count_for_precision;
use regex::Regex;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

/// Largest decimal precision supported by the logical type
pub const MAX_PRECISION: u32 = 38;

/// Avro name grammar: `[A-Za-z_][A-Za-z0-9_]*`
static AVRO_NAME: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid Avro name pattern")
});

/// Returns true when `name` is a legal Avro (unqualified) name
pub fn is_valid_name(name: &str) -> bool {
    AVRO_NAME.is_match(name)
}

/// The Avro `decimal` logical type.
///
/// Construction enforces `1 <= precision <= 38` and
/// `0 <= scale <= precision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalLogicalType {
    precision: u32,
    scale: u32,
}

impl DecimalLogicalType {
    /// Creates a decimal logical type, validating precision and scale
    ///
    /// # Errors
    /// Returns `InvalidDecimal` when precision is outside `1..=38`, scale is
    /// negative, or scale exceeds precision.
    pub fn new(precision: i64, scale: i64) -> Result<Self> {
        if precision <= 0 {
            return Err(DbAvroError::invalid_decimal(
                precision,
                scale,
                "precision must be positive",
            ));
        }
        if precision > i64::from(MAX_PRECISION) {
            return Err(DbAvroError::invalid_decimal(
                precision,
                scale,
                format!("precision exceeds maximum of {}", MAX_PRECISION),
            ));
        }
        if scale < 0 {
            return Err(DbAvroError::invalid_decimal(
                precision,
                scale,
                "scale must not be negative",
            ));
        }
        if scale > precision {
            return Err(DbAvroError::invalid_decimal(
                precision,
                scale,
                "scale must be less than or equal to precision",
            ));
        }

        let precision = u32::try_from(precision)
            .map_err(|e| DbAvroError::invalid_decimal(precision, scale, e.to_string()))?;
        let scale = u32::try_from(scale)
            .map_err(|e| DbAvroError::invalid_decimal(i64::from(precision), scale, e.to_string()))?;

        Ok(Self { precision, scale })
    }

    /// Total number of significant digits
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Digits after the decimal point
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Minimum number of bytes holding any unscaled value of this precision
    pub fn byte_count(&self) -> usize {
        // precision is validated into 1..=MAX_PRECISION on construction
        byte_count_for_precision(self.precision).unwrap_or(0)
    }
}

/// An Avro schema used for a record field type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvroSchema {
    /// `null`
    Null,
    /// `boolean`
    Boolean,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `bytes`
    Bytes,
    /// `string`
    String,
    /// `bytes` annotated with the `decimal` logical type
    Decimal(DecimalLogicalType),
    /// Union of branch schemas, in declaration order
    Union(Vec<AvroSchema>),
}

impl AvroSchema {
    /// Wraps `value` in the union `[null, value]`
    pub fn nullable(value: AvroSchema) -> Self {
        Self::Union(vec![Self::Null, value])
    }

    /// Physical Avro type name
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes | Self::Decimal(_) => "bytes",
            Self::String => "string",
            Self::Union(_) => "union",
        }
    }

    /// Returns true for a two-branch union whose first branch is `null`
    pub fn is_nullable_union(&self) -> bool {
        matches!(self, Self::Union(branches) if branches.len() == 2 && branches[0] == Self::Null)
    }

    /// The non-null branch of a nullable union
    pub fn value_branch(&self) -> Option<&AvroSchema> {
        match self {
            Self::Union(branches) if self.is_nullable_union() => branches.get(1),
            _ => None,
        }
    }

    /// Converts the schema into its Avro JSON form
    pub fn to_json_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| DbAvroError::serialization("Avro type schema", e))
    }
}

impl Serialize for AvroSchema {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Decimal(decimal) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", "bytes")?;
                map.serialize_entry("logicalType", "decimal")?;
                map.serialize_entry("precision", &decimal.precision)?;
                map.serialize_entry("scale", &decimal.scale)?;
                map.end()
            }
            Self::Union(branches) => {
                let mut seq = serializer.serialize_seq(Some(branches.len()))?;
                for branch in branches {
                    seq.serialize_element(branch)?;
                }
                seq.end()
            }
            primitive => serializer.serialize_str(primitive.type_name()),
        }
    }
}

/// A field of the generated record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    name: String,
    schema: AvroSchema,
    properties: BTreeMap<String, String>,
}

impl RecordField {
    /// Creates a field whose default value is `null`
    pub fn new(name: impl Into<String>, schema: AvroSchema) -> Self {
        Self {
            name: name.into(),
            schema,
            properties: BTreeMap::new(),
        }
    }

    /// Builder method to attach a custom property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field type
    pub const fn schema(&self) -> &AvroSchema {
        &self.schema
    }

    /// Looks up a custom property
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// All custom properties, ordered by key
    pub const fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

impl Serialize for RecordField {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.properties.len().saturating_add(3)))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.schema)?;
        map.serialize_entry("default", &Value::Null)?;
        for (key, value) in &self.properties {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A named Avro record describing one imported table or query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    name: String,
    namespace: Option<String>,
    doc: String,
    fields: Vec<RecordField>,
    properties: BTreeMap<String, String>,
}

impl RecordSchema {
    /// Creates a record schema.
    ///
    /// # Errors
    /// - `InvalidName` if the name or a namespace segment violates the Avro
    ///   name grammar
    /// - `DuplicateField` if two fields share a name
    pub fn new(
        name: impl Into<String>,
        namespace: Option<String>,
        doc: impl Into<String>,
        fields: Vec<RecordField>,
    ) -> Result<Self> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(DbAvroError::invalid_name(
                name,
                "record names must match [A-Za-z_][A-Za-z0-9_]*",
            ));
        }

        // An empty namespace means the null namespace
        let namespace = namespace.filter(|ns| !ns.is_empty());
        if let Some(ns) = &namespace {
            if !ns.split('.').all(is_valid_name) {
                return Err(DbAvroError::invalid_name(
                    ns.clone(),
                    "namespace segments must match [A-Za-z_][A-Za-z0-9_]*",
                ));
            }
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(DbAvroError::DuplicateField {
                    field: field.name.clone(),
                    column: field
                        .property(crate::generator::COLUMN_NAME_PROP)
                        .unwrap_or(&field.name)
                        .to_string(),
                });
            }
        }

        Ok(Self {
            name,
            namespace,
            doc: doc.into(),
            fields,
            properties: BTreeMap::new(),
        })
    }

    /// Builder method to attach a custom property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Record name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record namespace, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Namespace-qualified record name
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// Documentation string
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a custom property
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Converts the record into its Avro JSON form
    pub fn to_json_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| DbAvroError::serialization("Avro record schema", e))
    }

    /// Renders the record as pretty-printed Avro schema JSON (`.avsc`)
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DbAvroError::serialization("Avro record schema", e))
    }
}

impl Serialize for RecordSchema {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "record")?;
        map.serialize_entry("name", &self.name)?;
        if let Some(ns) = &self.namespace {
            map.serialize_entry("namespace", ns)?;
        }
        map.serialize_entry("doc", &self.doc)?;
        map.serialize_entry("fields", &self.fields)?;
        for (key, value) in &self.properties {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
