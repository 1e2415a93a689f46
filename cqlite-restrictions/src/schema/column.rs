//! Key column metadata
//!
//! A [`ColumnMetadata`] identifies one position of a partition or clustering
//! key together with the type used to compare its serialized values and, for
//! clustering columns, the declared `CLUSTERING ORDER`.

use super::CqlType;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The key a column belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Partition key component
    PartitionKey,
    /// Clustering key component
    Clustering,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::PartitionKey => write!(f, "partition key"),
            ColumnKind::Clustering => write!(f, "clustering"),
        }
    }
}

/// Sort direction of a clustering column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum ClusteringOrder {
    /// Natural order of the column type
    #[default]
    Asc,
    /// Reversed order of the column type
    Desc,
}

impl ClusteringOrder {
    /// Apply this direction to a comparison made in natural type order
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            ClusteringOrder::Asc => ordering,
            ClusteringOrder::Desc => ordering.reverse(),
        }
    }

    pub fn is_reversed(self) -> bool {
        self == ClusteringOrder::Desc
    }
}

impl FromStr for ClusteringOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(ClusteringOrder::Asc),
            "DESC" => Ok(ClusteringOrder::Desc),
            other => Err(Error::schema(format!("Invalid clustering order: {}", other))),
        }
    }
}

impl fmt::Display for ClusteringOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusteringOrder::Asc => write!(f, "ASC"),
            ClusteringOrder::Desc => write!(f, "DESC"),
        }
    }
}

/// Metadata of a single key column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnMetadata {
    /// Keyspace name
    pub keyspace: String,
    /// Table name
    pub table: String,
    /// Column name
    pub name: String,
    /// Key the column belongs to
    pub kind: ColumnKind,
    /// Position within its key (0-based)
    pub position: usize,
    /// Type used to compare serialized values
    pub cql_type: CqlType,
    /// Declared sort direction (always ASC for partition key columns)
    pub order: ClusteringOrder,
}

impl ColumnMetadata {
    /// Create a partition key column
    pub fn partition_key_column(
        keyspace: impl Into<String>,
        table: impl Into<String>,
        name: impl Into<String>,
        cql_type: CqlType,
        position: usize,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            table: table.into(),
            name: name.into(),
            kind: ColumnKind::PartitionKey,
            position,
            cql_type,
            order: ClusteringOrder::Asc,
        }
    }

    /// Create a clustering column
    pub fn clustering_column(
        keyspace: impl Into<String>,
        table: impl Into<String>,
        name: impl Into<String>,
        cql_type: CqlType,
        order: ClusteringOrder,
        position: usize,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            table: table.into(),
            name: name.into(),
            kind: ColumnKind::Clustering,
            position,
            cql_type,
            order,
        }
    }

    /// Compare two serialized values in clustering order
    pub fn compare(&self, left: &[u8], right: &[u8]) -> Ordering {
        self.order.apply(self.cql_type.compare(left, right))
    }

    /// Order of two columns as key components: by key, then position
    ///
    /// Only identical metadata compares equal.
    pub fn cmp_identity(&self, other: &ColumnMetadata) -> Ordering {
        (self.kind, self.position)
            .cmp(&(other.kind, other.position))
            .then_with(|| {
                (&self.keyspace, &self.table, &self.name).cmp(&(&other.keyspace, &other.table, &other.name))
            })
            .then_with(|| self.cql_type.cmp(&other.cql_type))
            .then_with(|| self.order.cmp(&other.order))
    }

    /// Whether `next` is the column immediately following this one in the same key
    pub fn is_followed_by(&self, next: &ColumnMetadata) -> bool {
        self.kind == next.kind && self.position + 1 == next.position
    }
}

impl fmt::Display for ColumnMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
