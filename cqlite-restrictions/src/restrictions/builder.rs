//! Construction of key elements from a table schema

use super::elements::{BoundMarker, ClusteringElements};
use crate::config::{Config, KeyConfig};
use crate::error::{Error, Result};
use crate::schema::{ColumnMetadata, TableSchema};
use crate::types::Value;
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

/// Builds [`ClusteringElements`] for the key columns of one table
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    partition_key: Vec<Arc<ColumnMetadata>>,
    clustering: Vec<Arc<ColumnMetadata>>,
    config: KeyConfig,
}

impl KeyBuilder {
    /// Resolve the key columns of `schema`
    pub fn new(schema: &TableSchema, config: &Config) -> Result<Self> {
        schema.validate()?;
        config.validate()?;

        Ok(Self {
            partition_key: schema.partition_key_metadata()?,
            clustering: schema.clustering_metadata()?,
            config: config.keys.clone(),
        })
    }

    pub fn partition_key_columns(&self) -> &[Arc<ColumnMetadata>] {
        &self.partition_key
    }

    pub fn clustering_columns(&self) -> &[Arc<ColumnMetadata>] {
        &self.clustering
    }

    /// Look up a clustering column by name
    pub fn clustering_column(&self, name: &str) -> Option<&Arc<ColumnMetadata>> {
        self.clustering.iter().find(|c| c.name == name)
    }

    /// Elements for the leading clustering columns, one value per column
    pub fn clustering_prefix(&self, values: &[Value]) -> Result<ClusteringElements> {
        self.clustering_slice(0, values)
    }

    /// Elements for the clustering columns starting at position `start`
    pub fn clustering_slice(&self, start: usize, values: &[Value]) -> Result<ClusteringElements> {
        let columns = self.clustering_range(start, values.len())?;
        let encoded = columns
            .iter()
            .zip(values)
            .map(|(column, value)| {
                value.to_key_bytes(&column.cql_type).map_err(|e| {
                    debug!(column = %column.name, error = %e, "rejected key value");
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.build(columns, encoded)
    }

    /// The `bound` sentinel of a clustering prefix
    ///
    /// `Regular` returns the prefix itself.
    pub fn clustering_bound(&self, values: &[Value], bound: BoundMarker) -> Result<ClusteringElements> {
        let prefix = self.clustering_prefix(values)?;
        Ok(match bound {
            BoundMarker::Bottom => prefix.bottom(),
            BoundMarker::Regular => prefix,
            BoundMarker::Top => prefix.top(),
        })
    }

    /// Elements for clustering columns from already serialized values, as
    /// received for bound statement parameters
    pub fn clustering_slice_serialized(
        &self,
        start: usize,
        values: Vec<Bytes>,
    ) -> Result<ClusteringElements> {
        let columns = self.clustering_range(start, values.len())?;
        self.build(columns, values)
    }

    /// Elements for the complete partition key
    pub fn partition_key(&self, values: &[Value]) -> Result<ClusteringElements> {
        if values.len() != self.partition_key.len() {
            return Err(Error::invalid_elements(format!(
                "Partition key requires {} values, got {}",
                self.partition_key.len(),
                values.len()
            )));
        }

        let encoded = self
            .partition_key
            .iter()
            .zip(values)
            .map(|(column, value)| value.to_key_bytes(&column.cql_type))
            .collect::<Result<Vec<_>>>()?;

        self.build(&self.partition_key, encoded)
    }

    fn clustering_range(&self, start: usize, len: usize) -> Result<&[Arc<ColumnMetadata>]> {
        let end = start.checked_add(len).filter(|end| *end <= self.clustering.len());
        match end {
            Some(end) => Ok(&self.clustering[start..end]),
            None => Err(Error::invalid_elements(format!(
                "{} values starting at clustering position {} exceed the {} clustering columns",
                len,
                start,
                self.clustering.len()
            ))),
        }
    }

    fn build(&self, columns: &[Arc<ColumnMetadata>], values: Vec<Bytes>) -> Result<ClusteringElements> {
        for (column, value) in columns.iter().zip(&values) {
            self.check_value(column, value)?;
        }
        ClusteringElements::of(columns.to_vec(), values)
    }

    fn check_value(&self, column: &ColumnMetadata, value: &[u8]) -> Result<()> {
        if !self.config.validate_values {
            return Ok(());
        }

        if value.is_empty() && column.cql_type.fixed_size().is_some() {
            if self.config.allow_empty_values {
                return Ok(());
            }
            debug!(column = %column.name, "rejected empty key value");
            return Err(Error::type_conversion(format!(
                "Empty value is not allowed for {} column {}",
                column.cql_type, column.name
            )));
        }

        column.cql_type.validate(value).map_err(|e| {
            Error::type_conversion(format!("Invalid value for column {}: {}", column.name, e))
        })
    }
}
