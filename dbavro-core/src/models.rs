//! Column metadata models consumed by the schema generator.
//!
//! These types describe what a metadata source reports about a table:
//! ordered column names, JDBC type codes, and fixed-point precision/scale.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Database vendors with dedicated type-mapping quirks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// Standard JDBC type semantics, no vendor quirks
    #[default]
    Generic,
    /// PostgreSQL
    PostgreSQL,
    /// MySQL and MariaDB
    MySQL,
    /// Oracle Database
    Oracle,
    /// Microsoft SQL Server
    SqlServer,
}

impl DatabaseType {
    /// All supported database types, in display order
    pub const ALL: [Self; 5] = [
        Self::Generic,
        Self::PostgreSQL,
        Self::MySQL,
        Self::Oracle,
        Self::SqlServer,
    ];
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseType::Generic => write!(f, "generic"),
            DatabaseType::PostgreSQL => write!(f, "postgresql"),
            DatabaseType::MySQL => write!(f, "mysql"),
            DatabaseType::Oracle => write!(f, "oracle"),
            DatabaseType::SqlServer => write!(f, "sqlserver"),
        }
    }
}

impl std::str::FromStr for DatabaseType {
    type Err = crate::DbAvroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generic" | "jdbc" => Ok(Self::Generic),
            "postgresql" | "postgres" => Ok(Self::PostgreSQL),
            "mysql" | "mariadb" => Ok(Self::MySQL),
            "oracle" => Ok(Self::Oracle),
            "sqlserver" | "mssql" => Ok(Self::SqlServer),
            other => Err(crate::DbAvroError::configuration(format!(
                "Unsupported database type '{}'",
                other
            ))),
        }
    }
}

/// JDBC SQL type code.
///
/// Codes outside the named constants stay representable; vendors report
/// their own codes (Oracle's `BINARY_FLOAT` is 100, for instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqlType(pub i32);

#[allow(missing_docs)]
impl SqlType {
    pub const BIT: Self = Self(-7);
    pub const TINYINT: Self = Self(-6);
    pub const SMALLINT: Self = Self(5);
    pub const INTEGER: Self = Self(4);
    pub const BIGINT: Self = Self(-5);
    pub const FLOAT: Self = Self(6);
    pub const REAL: Self = Self(7);
    pub const DOUBLE: Self = Self(8);
    pub const NUMERIC: Self = Self(2);
    pub const DECIMAL: Self = Self(3);
    pub const CHAR: Self = Self(1);
    pub const VARCHAR: Self = Self(12);
    pub const LONGVARCHAR: Self = Self(-1);
    pub const DATE: Self = Self(91);
    pub const TIME: Self = Self(92);
    pub const TIMESTAMP: Self = Self(93);
    pub const BINARY: Self = Self(-2);
    pub const VARBINARY: Self = Self(-3);
    pub const LONGVARBINARY: Self = Self(-4);
    pub const NULL: Self = Self(0);
    pub const OTHER: Self = Self(1111);
    pub const JAVA_OBJECT: Self = Self(2000);
    pub const DISTINCT: Self = Self(2001);
    pub const STRUCT: Self = Self(2002);
    pub const ARRAY: Self = Self(2003);
    pub const BLOB: Self = Self(2004);
    pub const CLOB: Self = Self(2005);
    pub const REF: Self = Self(2006);
    pub const DATALINK: Self = Self(70);
    pub const BOOLEAN: Self = Self(16);
    pub const ROWID: Self = Self(-8);
    pub const NCHAR: Self = Self(-15);
    pub const NVARCHAR: Self = Self(-9);
    pub const LONGNVARCHAR: Self = Self(-16);
    pub const NCLOB: Self = Self(2011);
    pub const SQLXML: Self = Self(2009);
    pub const REF_CURSOR: Self = Self(2012);
    pub const TIME_WITH_TIMEZONE: Self = Self(2013);
    pub const TIMESTAMP_WITH_TIMEZONE: Self = Self(2014);
}

impl SqlType {
    /// Returns the integer code
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Fixed-point types eligible for the decimal logical type
    pub const fn is_decimal(self) -> bool {
        matches!(self, Self::DECIMAL | Self::NUMERIC)
    }

    /// Standard JDBC name for the code, if it is one of the named constants
    pub const fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::BIT => "BIT",
            Self::TINYINT => "TINYINT",
            Self::SMALLINT => "SMALLINT",
            Self::INTEGER => "INTEGER",
            Self::BIGINT => "BIGINT",
            Self::FLOAT => "FLOAT",
            Self::REAL => "REAL",
            Self::DOUBLE => "DOUBLE",
            Self::NUMERIC => "NUMERIC",
            Self::DECIMAL => "DECIMAL",
            Self::CHAR => "CHAR",
            Self::VARCHAR => "VARCHAR",
            Self::LONGVARCHAR => "LONGVARCHAR",
            Self::DATE => "DATE",
            Self::TIME => "TIME",
            Self::TIMESTAMP => "TIMESTAMP",
            Self::BINARY => "BINARY",
            Self::VARBINARY => "VARBINARY",
            Self::LONGVARBINARY => "LONGVARBINARY",
            Self::NULL => "NULL",
            Self::OTHER => "OTHER",
            Self::JAVA_OBJECT => "JAVA_OBJECT",
            Self::DISTINCT => "DISTINCT",
            Self::STRUCT => "STRUCT",
            Self::ARRAY => "ARRAY",
            Self::BLOB => "BLOB",
            Self::CLOB => "CLOB",
            Self::REF => "REF",
            Self::DATALINK => "DATALINK",
            Self::BOOLEAN => "BOOLEAN",
            Self::ROWID => "ROWID",
            Self::NCHAR => "NCHAR",
            Self::NVARCHAR => "NVARCHAR",
            Self::LONGNVARCHAR => "LONGNVARCHAR",
            Self::NCLOB => "NCLOB",
            Self::SQLXML => "SQLXML",
            Self::REF_CURSOR => "REF_CURSOR",
            Self::TIME_WITH_TIMEZONE => "TIME_WITH_TIMEZONE",
            Self::TIMESTAMP_WITH_TIMEZONE => "TIMESTAMP_WITH_TIMEZONE",
            _ => return None,
        };
        Some(name)
    }

    /// Every named JDBC code
    pub const STANDARD: [Self; 39] = [
        Self::BIT,
        Self::TINYINT,
        Self::SMALLINT,
        Self::INTEGER,
        Self::BIGINT,
        Self::FLOAT,
        Self::REAL,
        Self::DOUBLE,
        Self::NUMERIC,
        Self::DECIMAL,
        Self::CHAR,
        Self::VARCHAR,
        Self::LONGVARCHAR,
        Self::DATE,
        Self::TIME,
        Self::TIMESTAMP,
        Self::BINARY,
        Self::VARBINARY,
        Self::LONGVARBINARY,
        Self::NULL,
        Self::OTHER,
        Self::JAVA_OBJECT,
        Self::DISTINCT,
        Self::STRUCT,
        Self::ARRAY,
        Self::BLOB,
        Self::CLOB,
        Self::REF,
        Self::DATALINK,
        Self::BOOLEAN,
        Self::ROWID,
        Self::NCHAR,
        Self::NVARCHAR,
        Self::LONGNVARCHAR,
        Self::NCLOB,
        Self::SQLXML,
        Self::REF_CURSOR,
        Self::TIME_WITH_TIMEZONE,
        Self::TIMESTAMP_WITH_TIMEZONE,
    ];
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type information reported for a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSqlInfo {
    /// JDBC type code
    pub sql_type: SqlType,
    /// Declared precision, if the column reports one
    pub precision: Option<i32>,
    /// Declared scale, if the column reports one
    pub scale: Option<i32>,
}

impl ColumnSqlInfo {
    /// Creates type info without precision or scale
    pub const fn new(sql_type: SqlType) -> Self {
        Self {
            sql_type,
            precision: None,
            scale: None,
        }
    }

    /// Creates type info for a fixed-point column
    pub const fn fixed_point(sql_type: SqlType, precision: i32, scale: i32) -> Self {
        Self {
            sql_type,
            precision: Some(precision),
            scale: Some(scale),
        }
    }
}

/// One table column as reported by a metadata source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name as reported by the database
    pub name: String,
    /// JDBC type code
    pub sql_type: SqlType,
    /// Declared precision
    #[serde(default)]
    pub precision: Option<i32>,
    /// Declared scale
    #[serde(default)]
    pub scale: Option<i32>,
    /// Vendor type name as declared in the database (e.g. `INT UNSIGNED`)
    #[serde(default)]
    pub type_name: Option<String>,
}

impl ColumnDescriptor {
    /// Creates a column descriptor without precision, scale or type name
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            precision: None,
            scale: None,
            type_name: None,
        }
    }

    /// Builder method to set precision and scale
    pub const fn with_precision_scale(mut self, precision: i32, scale: i32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Builder method to set the declared vendor type name
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Returns the SQL type information for this column
    pub const fn sql_info(&self) -> ColumnSqlInfo {
        ColumnSqlInfo {
            sql_type: self.sql_type,
            precision: self.precision,
            scale: self.scale,
        }
    }
}

/// Declared vendor type names keyed by table and column.
///
/// Vendor mappings consult these to recover quirks that the JDBC code
/// alone hides, such as MySQL `UNSIGNED` integers. A `None` table key
/// applies to free-form query imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNameHints {
    hints: HashMap<(Option<String>, String), String>,
}

impl TypeNameHints {
    /// Creates an empty hint set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the declared type name of a column
    pub fn insert(
        &mut self,
        table: Option<&str>,
        column: impl Into<String>,
        type_name: impl Into<String>,
    ) {
        self.hints.insert(
            (table.map(str::to_string), column.into()),
            type_name.into(),
        );
    }

    /// Looks up the declared type name of a column
    pub fn get(&self, table: Option<&str>, column: &str) -> Option<&str> {
        self.hints
            .get(&(table.map(str::to_string), column.to_string()))
            .map(String::as_str)
    }
}
