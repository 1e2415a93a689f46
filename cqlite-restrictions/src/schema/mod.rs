//! Table key schema for restriction evaluation
//!
//! This module describes the primary key of a Cassandra table: its ordered
//! partition key columns and its clustering columns with their declared
//! clustering order. Schemas are loaded from JSON and resolved into
//! [`ColumnMetadata`] for key comparison.

pub mod column;
pub mod comparator;

pub use column::{ClusteringOrder, ColumnKind, ColumnMetadata};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Table schema definition loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    /// Keyspace name
    pub keyspace: String,

    /// Table name
    pub table: String,

    /// Partition key columns (ordered)
    pub partition_keys: Vec<KeyColumn>,

    /// Clustering key columns (ordered)
    #[serde(default)]
    pub clustering_keys: Vec<ClusteringColumn>,

    /// All columns in the table
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// Partition key column definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyColumn {
    /// Column name
    pub name: String,

    /// CQL data type
    #[serde(rename = "type")]
    pub data_type: String,

    /// Position in composite key (0-based)
    pub position: usize,
}

/// Clustering key column with ordering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringColumn {
    /// Column name
    pub name: String,

    /// CQL data type
    #[serde(rename = "type")]
    pub data_type: String,

    /// Position in clustering key (0-based)
    pub position: usize,

    /// Sort order (ASC or DESC)
    #[serde(default = "default_order")]
    pub order: String,
}

/// Column definition
///
/// Used to cross-check the key columns; other columns are not interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// CQL data type (e.g., "text", "bigint", "list<int>")
    #[serde(rename = "type")]
    pub data_type: String,
}

/// CQL types that can be used as primary key components
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CqlType {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Text,
    Ascii,
    Blob,
    Timestamp,
    Date,
    Time,
    Uuid,
    TimeUuid,
    Inet,

    /// Unknown type compared as raw bytes
    Custom(String),
}

impl TableSchema {
    /// Load schema from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::schema(format!("Failed to read schema file: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parse schema from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: TableSchema = serde_json::from_str(json)
            .map_err(|e| Error::schema(format!("Invalid JSON schema: {}", e)))?;

        schema.validate()?;
        Ok(schema)
    }

    /// Validate schema consistency
    pub fn validate(&self) -> Result<()> {
        if self.keyspace.is_empty() {
            return Err(Error::schema("Keyspace name cannot be empty".to_string()));
        }

        if self.table.is_empty() {
            return Err(Error::schema("Table name cannot be empty".to_string()));
        }

        if self.partition_keys.is_empty() {
            return Err(Error::schema(
                "Table must have at least one partition key".to_string(),
            ));
        }

        let positions: Vec<_> = self.partition_keys.iter().map(|k| k.position).collect();
        check_contiguous("Partition", positions)?;

        let positions: Vec<_> = self.clustering_keys.iter().map(|k| k.position).collect();
        check_contiguous("Clustering", positions)?;

        for key in &self.partition_keys {
            CqlType::parse(&key.data_type).map_err(|e| {
                Error::schema(format!(
                    "Invalid data type '{}' for partition key '{}': {}",
                    key.data_type, key.name, e
                ))
            })?;
        }

        for key in &self.clustering_keys {
            CqlType::parse(&key.data_type).map_err(|e| {
                Error::schema(format!(
                    "Invalid data type '{}' for clustering key '{}': {}",
                    key.data_type, key.name, e
                ))
            })?;
            key.order.parse::<ClusteringOrder>()?;
        }

        // An empty column list means the schema only describes the key
        if !self.columns.is_empty() {
            let key_columns = self
                .partition_keys
                .iter()
                .map(|k| (&k.name, &k.data_type, "Partition key"))
                .chain(
                    self.clustering_keys
                        .iter()
                        .map(|k| (&k.name, &k.data_type, "Clustering key")),
                );
            for (name, data_type, label) in key_columns {
                let column = self.columns.iter().find(|c| &c.name == name).ok_or_else(|| {
                    Error::schema(format!("{} '{}' not found in columns list", label, name))
                })?;

                if CqlType::parse(&column.data_type).ok() != CqlType::parse(data_type).ok() {
                    return Err(Error::schema(format!(
                        "{} '{}' has type '{}' but the columns list declares '{}'",
                        label, name, data_type, column.data_type
                    )));
                }
            }
        }

        Ok(())
    }

    /// Check if column is a partition key
    pub fn is_partition_key(&self, name: &str) -> bool {
        self.partition_keys.iter().any(|k| k.name == name)
    }

    /// Check if column is a clustering key
    pub fn is_clustering_key(&self, name: &str) -> bool {
        self.clustering_keys.iter().any(|k| k.name == name)
    }

    /// Get partition key columns in order
    pub fn ordered_partition_keys(&self) -> Vec<&KeyColumn> {
        let mut keys = self.partition_keys.iter().collect::<Vec<_>>();
        keys.sort_by_key(|k| k.position);
        keys
    }

    /// Get clustering key columns in order
    pub fn ordered_clustering_keys(&self) -> Vec<&ClusteringColumn> {
        let mut keys = self.clustering_keys.iter().collect::<Vec<_>>();
        keys.sort_by_key(|k| k.position);
        keys
    }

    /// Resolve the partition key columns into comparable metadata
    pub fn partition_key_metadata(&self) -> Result<Vec<Arc<ColumnMetadata>>> {
        self.ordered_partition_keys()
            .into_iter()
            .map(|k| {
                Ok(Arc::new(ColumnMetadata::partition_key_column(
                    &self.keyspace,
                    &self.table,
                    &k.name,
                    CqlType::parse(&k.data_type)?,
                    k.position,
                )))
            })
            .collect()
    }

    /// Resolve the clustering columns into comparable metadata
    pub fn clustering_metadata(&self) -> Result<Vec<Arc<ColumnMetadata>>> {
        self.ordered_clustering_keys()
            .into_iter()
            .map(|k| {
                Ok(Arc::new(ColumnMetadata::clustering_column(
                    &self.keyspace,
                    &self.table,
                    &k.name,
                    CqlType::parse(&k.data_type)?,
                    k.order.parse()?,
                    k.position,
                )))
            })
            .collect()
    }
}

fn check_contiguous(label: &str, mut positions: Vec<usize>) -> Result<()> {
    positions.sort_unstable();
    for (i, &pos) in positions.iter().enumerate() {
        if pos != i {
            return Err(Error::schema(format!(
                "{} key positions must be contiguous starting from 0, found gap at position {}",
                label, i
            )));
        }
    }
    Ok(())
}

impl CqlType {
    /// Parse CQL type string into a key component type
    pub fn parse(type_str: &str) -> Result<Self> {
        let type_str = type_str.trim();

        if type_str.contains('<') {
            return Err(Error::schema(format!(
                "Type '{}' cannot be used as a key component",
                type_str
            )));
        }

        match type_str.to_lowercase().as_str() {
            "boolean" | "bool" => Ok(CqlType::Boolean),
            "tinyint" => Ok(CqlType::TinyInt),
            "smallint" => Ok(CqlType::SmallInt),
            "int" | "integer" => Ok(CqlType::Int),
            "bigint" | "long" => Ok(CqlType::BigInt),
            "float" => Ok(CqlType::Float),
            "double" => Ok(CqlType::Double),
            "text" | "varchar" => Ok(CqlType::Text),
            "ascii" => Ok(CqlType::Ascii),
            "blob" => Ok(CqlType::Blob),
            "timestamp" => Ok(CqlType::Timestamp),
            "date" => Ok(CqlType::Date),
            "time" => Ok(CqlType::Time),
            "uuid" => Ok(CqlType::Uuid),
            "timeuuid" => Ok(CqlType::TimeUuid),
            "inet" => Ok(CqlType::Inet),
            "" => Err(Error::schema("Empty type name".to_string())),
            _ => Ok(CqlType::Custom(type_str.to_string())),
        }
    }

    /// Get the expected byte size for fixed-size types
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            CqlType::Boolean => Some(1),
            CqlType::TinyInt => Some(1),
            CqlType::SmallInt => Some(2),
            CqlType::Int => Some(4),
            CqlType::BigInt => Some(8),
            CqlType::Float => Some(4),
            CqlType::Double => Some(8),
            CqlType::Timestamp => Some(8),
            CqlType::Date => Some(4),
            CqlType::Time => Some(8),
            CqlType::Uuid | CqlType::TimeUuid => Some(16),
            // Inet is 4 or 16 bytes
            CqlType::Inet
            | CqlType::Text
            | CqlType::Ascii
            | CqlType::Blob
            | CqlType::Custom(_) => None,
        }
    }
}

impl fmt::Display for CqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CqlType::Boolean => "boolean",
            CqlType::TinyInt => "tinyint",
            CqlType::SmallInt => "smallint",
            CqlType::Int => "int",
            CqlType::BigInt => "bigint",
            CqlType::Float => "float",
            CqlType::Double => "double",
            CqlType::Text => "text",
            CqlType::Ascii => "ascii",
            CqlType::Blob => "blob",
            CqlType::Timestamp => "timestamp",
            CqlType::Date => "date",
            CqlType::Time => "time",
            CqlType::Uuid => "uuid",
            CqlType::TimeUuid => "timeuuid",
            CqlType::Inet => "inet",
            CqlType::Custom(name) => name,
        };
        write!(f, "{}", name)
    }
}

// Default functions for serde
fn default_order() -> String {
    "ASC".to_string()
}
