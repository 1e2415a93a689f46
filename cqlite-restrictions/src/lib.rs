//! CQLite Restrictions
//!
//! Ordering and range construction for partition and clustering keys,
//! used to evaluate CQL restrictions such as `(c1, c2) >= (1, 3)` against
//! keys whose columns mix ascending and descending clustering order.
//!
//! ```rust
//! use cqlite_restrictions::{at_most, Config, KeyBuilder, TableSchema, Value};
//!
//! let schema = TableSchema::from_json(r#"{
//!     "keyspace": "ks",
//!     "table": "events",
//!     "partition_keys": [{"name": "id", "type": "int", "position": 0}],
//!     "clustering_keys": [
//!         {"name": "day", "type": "int", "position": 0, "order": "DESC"},
//!         {"name": "seq", "type": "int", "position": 1}
//!     ]
//! }"#)?;
//! let keys = KeyBuilder::new(&schema, &Config::default())?;
//!
//! let pivot = keys.clustering_prefix(&[Value::Integer(1), Value::Integer(3)])?;
//! let ranges = at_most(&pivot);
//!
//! let row = keys.clustering_prefix(&[Value::Integer(0), Value::Integer(9)])?;
//! assert!(ranges.contains(&row));
//! # Ok::<(), cqlite_restrictions::Error>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod restrictions;
pub mod schema;
pub mod types;

// Re-export main types for convenience
pub use crate::{
    config::{Config, KeyConfig},
    error::{Error, ErrorCategory, Result},
    restrictions::{
        at_least, at_most, equal_to, greater_than, less_than, not_equal_to, BoundMarker,
        ClusteringElements, KeyBuilder, Range, RangeSet,
    },
    schema::{ClusteringOrder, ColumnKind, ColumnMetadata, CqlType, TableSchema},
    types::Value,
};
