//! In-memory column metadata loaded from a JSON snapshot.
//!
//! A snapshot captures what a driver reported for one or more tables (and
//! optionally one free-form query) so schemas can be generated offline:
//!
//! ```json
//! {
//!   "tables": {
//!     "ORDERS": [
//!       {"name": "ID", "sql_type": 4},
//!       {"name": "TOTAL", "sql_type": 3, "precision": 12, "scale": 2}
//!     ]
//!   },
//!   "query": [{"name": "N", "sql_type": -5}]
//! }
//! ```

use crate::error::{DbAvroError, Result};
use crate::models::{ColumnDescriptor, ColumnSqlInfo, TypeNameHints};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::ColumnMetadataSource;

/// Column metadata snapshot for tables and a free-form query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadataSource {
    /// Columns per table, in ordinal order
    #[serde(default)]
    pub tables: BTreeMap<String, Vec<ColumnDescriptor>>,
    /// Columns of the free-form query result, in ordinal order
    #[serde(default)]
    pub query: Option<Vec<ColumnDescriptor>>,
}

impl SnapshotMetadataSource {
    /// Creates an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from JSON text
    ///
    /// # Errors
    /// Returns `Serialization` if the text is not a valid snapshot
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DbAvroError::serialization("Failed to parse metadata snapshot", e))
    }

    /// Reads a snapshot from a JSON file
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read and `Serialization` if it is
    /// not a valid snapshot
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| DbAvroError::Io {
            context: format!("Failed to read metadata snapshot {}", path.display()),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    /// Builder method to add a table
    pub fn with_table(mut self, table: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        self.tables.insert(table.into(), columns);
        self
    }

    /// Builder method to set the free-form query columns
    pub fn with_query(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.query = Some(columns);
        self
    }

    /// Declared type names of every column that reports one
    pub fn type_name_hints(&self) -> TypeNameHints {
        let mut hints = TypeNameHints::new();
        for (table, columns) in &self.tables {
            for column in columns {
                if let Some(type_name) = &column.type_name {
                    hints.insert(Some(table.as_str()), column.name.clone(), type_name.clone());
                }
            }
        }
        for column in self.query.iter().flatten() {
            if let Some(type_name) = &column.type_name {
                hints.insert(None, column.name.clone(), type_name.clone());
            }
        }
        hints
    }

    fn columns(&self, table_name: Option<&str>) -> Result<&[ColumnDescriptor]> {
        match table_name {
            Some(table) => self.tables.get(table).map(Vec::as_slice).ok_or_else(|| {
                DbAvroError::metadata_unavailable(format!(
                    "No column metadata for table '{}'",
                    table
                ))
            }),
            None => self.query.as_deref().ok_or_else(|| {
                DbAvroError::metadata_unavailable("No column metadata for free-form query")
            }),
        }
    }
}

impl ColumnMetadataSource for SnapshotMetadataSource {
    fn column_names_ordered(&self, table_name: Option<&str>) -> Result<Vec<String>> {
        Ok(self
            .columns(table_name)?
            .iter()
            .map(|c| c.name.clone())
            .collect())
    }

    fn column_sql_info(&self, table_name: Option<&str>) -> Result<HashMap<String, ColumnSqlInfo>> {
        Ok(self
            .columns(table_name)?
            .iter()
            .map(|c| (c.name.clone(), c.sql_info()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SqlType;

    const SNAPSHOT: &str = r#"{
        "tables": {
            "ORDERS": [
                {"name": "ID", "sql_type": 4},
                {"name": "TOTAL", "sql_type": 3, "precision": 12, "scale": 2},
                {"name": "QTY", "sql_type": 4, "type_name": "INT UNSIGNED"}
            ]
        },
        "query": [{"name": "N", "sql_type": -5}]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = SnapshotMetadataSource::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(
            snapshot.column_names_ordered(Some("ORDERS")).unwrap(),
            vec!["ID", "TOTAL", "QTY"]
        );

        let info = snapshot.column_sql_info(Some("ORDERS")).unwrap();
        assert_eq!(info["TOTAL"], ColumnSqlInfo::fixed_point(SqlType::DECIMAL, 12, 2));
        assert_eq!(info["ID"], ColumnSqlInfo::new(SqlType::INTEGER));

        assert_eq!(snapshot.column_names_ordered(None).unwrap(), vec!["N"]);
    }

    #[test]
    fn test_missing_table_is_metadata_error() {
        let snapshot = SnapshotMetadataSource::from_json_str(SNAPSHOT).unwrap();
        let error = snapshot.column_names_ordered(Some("ITEMS")).unwrap_err();
        assert!(matches!(error, DbAvroError::MetadataUnavailable { .. }));
        assert!(error.to_string().contains("ITEMS"));

        let error = SnapshotMetadataSource::new().column_sql_info(None).unwrap_err();
        assert!(matches!(error, DbAvroError::MetadataUnavailable { .. }));
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let error = SnapshotMetadataSource::from_json_str("{\"tables\": 3}").unwrap_err();
        assert!(matches!(error, DbAvroError::Serialization { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = SnapshotMetadataSource::from_path(Path::new("/nonexistent/snapshot.json"))
            .unwrap_err();
        assert!(matches!(error, DbAvroError::Io { .. }));
        assert!(error.to_string().contains("snapshot.json"));
    }

    #[test]
    fn test_type_name_hints() {
        let snapshot = SnapshotMetadataSource::from_json_str(SNAPSHOT).unwrap();
        let hints = snapshot.type_name_hints();
        assert_eq!(hints.get(Some("ORDERS"), "QTY"), Some("INT UNSIGNED"));
        assert_eq!(hints.get(Some("ORDERS"), "ID"), None);
        assert_eq!(hints.get(None, "N"), None);
    }
}
