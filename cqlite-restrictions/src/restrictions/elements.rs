//! Composite key values used as restriction bounds
//!
//! [`ClusteringElements`] is an immutable sequence of `(column, serialized
//! value)` pairs covering a contiguous run of partition key or clustering
//! columns, optionally turned into the bottom or top of all the keys sharing
//! those columns. Elements are totally ordered in clustering order, which
//! makes them usable as endpoints of a [`RangeSet`](super::RangeSet).
//!
//! Elements are compared pairwise: first the columns, so values only compare
//! against values of the same column, then the values in clustering order.
//! Ordering treats every value as its elements followed by a terminator:
//! `Bottom` sorts below any value of the next column, `Regular` sorts below
//! any value of the next column but above `Bottom`, and `Top` sorts above
//! everything. A bare prefix is therefore smaller than all its extensions and
//! `prefix.bottom() < extensions < prefix.top()`.

use crate::error::{Error, Result};
use crate::schema::{ColumnKind, ColumnMetadata};
use bytes::Bytes;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

/// Marks a value as a regular key or as one of the two range sentinels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BoundMarker {
    /// Smaller than every key sharing the fixed columns
    Bottom,
    /// A plain (possibly partial) key
    Regular,
    /// Greater than every key sharing the fixed columns
    Top,
}

impl BoundMarker {
    /// Ordering of a value with this marker against a strict extension of it
    fn against_extension(self) -> Ordering {
        match self {
            BoundMarker::Bottom | BoundMarker::Regular => Ordering::Less,
            BoundMarker::Top => Ordering::Greater,
        }
    }
}

/// Values of a contiguous run of key columns
#[derive(Debug, Clone)]
pub struct ClusteringElements {
    columns: Vec<Arc<ColumnMetadata>>,
    values: Vec<Bytes>,
    bound: BoundMarker,
}

impl ClusteringElements {
    /// Elements with no column: the whole key domain of any kind
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            values: Vec::new(),
            bound: BoundMarker::Regular,
        }
    }

    /// Elements of a single column
    pub fn of_column(column: Arc<ColumnMetadata>, value: impl Into<Bytes>) -> Self {
        Self {
            columns: vec![column],
            values: vec![value.into()],
            bound: BoundMarker::Regular,
        }
    }

    /// Elements from matching lists of columns and serialized values
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidElements`] if the lists have different
    /// lengths, mix key kinds, or list columns out of position order.
    pub fn of(columns: Vec<Arc<ColumnMetadata>>, values: Vec<Bytes>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(Error::invalid_elements(format!(
                "{} columns but {} values",
                columns.len(),
                values.len()
            )));
        }

        for pair in columns.windows(2) {
            if pair[0].kind != pair[1].kind {
                return Err(Error::invalid_elements(format!(
                    "column {} is a {} column but {} is a {} column",
                    pair[0], pair[0].kind, pair[1], pair[1].kind
                )));
            }
            if pair[0].position >= pair[1].position {
                return Err(Error::invalid_elements(format!(
                    "column {} (position {}) listed before column {} (position {})",
                    pair[0], pair[0].position, pair[1], pair[1].position
                )));
            }
        }

        Ok(Self {
            columns,
            values,
            bound: BoundMarker::Regular,
        })
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> &[Arc<ColumnMetadata>] {
        &self.columns
    }

    pub fn values(&self) -> &[Bytes] {
        &self.values
    }

    pub fn bound(&self) -> BoundMarker {
        self.bound
    }

    /// Key kind of the columns, `None` for empty elements
    pub fn kind(&self) -> Option<ColumnKind> {
        self.columns.first().map(|c| c.kind)
    }

    pub fn last_column(&self) -> Option<&Arc<ColumnMetadata>> {
        self.columns.last()
    }

    pub fn is_bottom(&self) -> bool {
        self.bound == BoundMarker::Bottom
    }

    pub fn is_top(&self) -> bool {
        self.bound == BoundMarker::Top
    }

    /// Whether these elements are a bottom or top sentinel
    pub fn is_range_endpoint(&self) -> bool {
        self.bound != BoundMarker::Regular
    }

    /// The smallest value among all keys sharing these elements
    pub fn bottom(&self) -> Self {
        self.with_bound(BoundMarker::Bottom)
    }

    /// The greatest value among all keys sharing these elements
    pub fn top(&self) -> Self {
        self.with_bound(BoundMarker::Top)
    }

    /// Regular elements made of the first `len` elements, or of all of them
    /// if there are fewer
    pub fn prefix(&self, len: usize) -> Self {
        let len = len.min(self.len());
        Self {
            columns: self.columns[..len].to_vec(),
            values: self.values[..len].to_vec(),
            bound: BoundMarker::Regular,
        }
    }

    fn with_bound(&self, bound: BoundMarker) -> Self {
        Self {
            columns: self.columns.clone(),
            values: self.values.clone(),
            bound,
        }
    }

    /// Append `other` to these elements
    ///
    /// The result keeps the bound marker of `other`, so extending with a
    /// sentinel produces the sentinel of the combined columns.
    ///
    /// # Errors
    ///
    /// - [`Error::RangeEndpointExtension`] if `self` is a bottom or top value
    /// - [`Error::DifferentKind`] if the two sides belong to different keys
    /// - [`Error::NonConsecutiveElements`] if `other` does not start at the
    ///   column right after the last column of `self`
    pub fn extend(&self, other: &ClusteringElements) -> Result<Self> {
        if self.is_range_endpoint() {
            debug!(elements = %self, "rejected extension of a range endpoint");
            return Err(Error::RangeEndpointExtension);
        }

        let (last, first) = match (self.columns.last(), other.columns.first()) {
            (Some(last), Some(first)) => (last, first),
            (None, _) => return Ok(other.clone()),
            (_, None) => return Ok(self.with_bound(other.bound)),
        };

        if last.kind != first.kind {
            debug!(elements = %self, other = %other, "rejected extension across key kinds");
            return Err(Error::DifferentKind);
        }

        if !last.is_followed_by(first) {
            debug!(
                last = last.position,
                first = first.position,
                "rejected extension with non consecutive columns"
            );
            return Err(Error::NonConsecutiveElements);
        }

        let mut columns = Vec::with_capacity(self.len() + other.len());
        columns.extend(self.columns.iter().cloned());
        columns.extend(other.columns.iter().cloned());

        let mut values = Vec::with_capacity(self.len() + other.len());
        values.extend(self.values.iter().cloned());
        values.extend(other.values.iter().cloned());

        Ok(Self {
            columns,
            values,
            bound: other.bound,
        })
    }
}

impl Default for ClusteringElements {
    fn default() -> Self {
        Self::empty()
    }
}

impl Ord for ClusteringElements {
    fn cmp(&self, other: &Self) -> Ordering {
        // Different kinds are never compared by callers; order them by kind to stay total
        if let (Some(left), Some(right)) = (self.kind(), other.kind()) {
            if left != right {
                return left.cmp(&right);
            }
        }

        let left = self.columns.iter().zip(&self.values);
        let right = other.columns.iter().zip(&other.values);
        for ((column, left), (other_column, right)) in left.zip(right) {
            let ordering = if Arc::ptr_eq(column, other_column) {
                column.compare(left, right)
            } else {
                column
                    .cmp_identity(other_column)
                    .then_with(|| column.compare(left, right))
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        match self.len().cmp(&other.len()) {
            Ordering::Equal => self.bound.cmp(&other.bound),
            Ordering::Less => self.bound.against_extension(),
            Ordering::Greater => other.bound.against_extension().reverse(),
        }
    }
}

impl PartialOrd for ClusteringElements {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ClusteringElements {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ClusteringElements {}

impl Hash for ClusteringElements {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.bound.hash(state);
        for column in &self.columns {
            column.position.hash(state);
        }
        // comparators only report equality for identical bytes
        self.values.hash(state);
    }
}

impl fmt::Display for ClusteringElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (column, value)) in self.columns.iter().zip(&self.values).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", column.cql_type.format_value(value))?;
        }
        write!(f, ")")?;

        match self.bound {
            BoundMarker::Regular => Ok(()),
            BoundMarker::Bottom => write!(f, " BOTTOM"),
            BoundMarker::Top => write!(f, " TOP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ClusteringOrder, CqlType};

    fn column(order: ClusteringOrder, position: usize) -> Arc<ColumnMetadata> {
        Arc::new(ColumnMetadata::clustering_column(
            "ks",
            "tbl",
            format!("c{}", position),
            CqlType::Int,
            order,
            position,
        ))
    }

    fn int(value: i32) -> Bytes {
        Bytes::copy_from_slice(&value.to_be_bytes())
    }

    #[test]
    fn test_of_rejects_count_mismatch() {
        let columns = vec![column(ClusteringOrder::Asc, 0), column(ClusteringOrder::Asc, 1)];
        let err = ClusteringElements::of(columns, vec![int(1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidElements(_)));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_of_rejects_unordered_columns() {
        let columns = vec![column(ClusteringOrder::Asc, 1), column(ClusteringOrder::Asc, 0)];
        assert!(ClusteringElements::of(columns, vec![int(1), int(2)]).is_err());
    }

    #[test]
    fn test_of_rejects_mixed_kinds() {
        let pk = Arc::new(ColumnMetadata::partition_key_column("ks", "tbl", "pk", CqlType::Int, 0));
        let columns = vec![pk, column(ClusteringOrder::Asc, 1)];
        assert!(ClusteringElements::of(columns, vec![int(1), int(2)]).is_err());
    }

    #[test]
    fn test_accessors() {
        let columns = vec![column(ClusteringOrder::Asc, 0), column(ClusteringOrder::Desc, 1)];
        let elements = ClusteringElements::of(columns, vec![int(1), int(3)]).unwrap();

        assert_eq!(elements.len(), 2);
        assert!(!elements.is_empty());
        assert_eq!(elements.kind(), Some(ColumnKind::Clustering));
        assert_eq!(elements.last_column().unwrap().position, 1);
        assert_eq!(elements.values()[1], int(3));
        assert_eq!(elements.bound(), BoundMarker::Regular);
        assert!(ClusteringElements::empty().kind().is_none());
    }

    #[test]
    fn test_sentinel_derivation_is_idempotent() {
        let one = ClusteringElements::of_column(column(ClusteringOrder::Asc, 0), int(1));

        assert_eq!(one.bottom().bottom(), one.bottom());
        assert_eq!(one.top().top(), one.top());
        assert_eq!(one.top().bottom(), one.bottom());
        assert!(one.bottom().is_bottom());
        assert!(one.top().is_range_endpoint());
        assert_eq!(one.bottom().values(), one.values());
    }

    #[test]
    fn test_prefix_brackets_extensions() {
        let columns = vec![column(ClusteringOrder::Asc, 0), column(ClusteringOrder::Desc, 1)];
        let one = ClusteringElements::of_column(columns[0].clone(), int(1));
        let one_three = ClusteringElements::of(columns, vec![int(1), int(3)]).unwrap();

        assert!(one.bottom() < one);
        assert!(one < one_three);
        assert!(one_three < one.top());
        assert!(one_three.bottom() < one_three);
        assert!(one_three.top() < one.top());
        assert!(one.bottom() < one_three.bottom());
        assert_eq!(one_three.prefix(1), one);
    }

    #[test]
    fn test_empty_sentinels_are_global_bounds() {
        let one = ClusteringElements::of_column(column(ClusteringOrder::Desc, 0), int(1));
        let empty = ClusteringElements::empty();

        assert!(empty.bottom() < one.bottom());
        assert!(empty.bottom() < empty);
        assert!(empty < one);
        assert!(one.top() < empty.top());
    }

    #[test]
    fn test_extend_with_empty() {
        let one = ClusteringElements::of_column(column(ClusteringOrder::Asc, 0), int(1));
        let empty = ClusteringElements::empty();

        assert_eq!(empty.extend(&one).unwrap(), one);
        assert_eq!(one.extend(&empty).unwrap(), one);
        assert_eq!(one.extend(&empty.top()).unwrap(), one.top());
        assert!(matches!(empty.top().extend(&one), Err(Error::RangeEndpointExtension)));
    }

    #[test]
    fn test_hash_matches_equality() {
        use std::collections::HashSet;

        let columns = vec![column(ClusteringOrder::Asc, 0), column(ClusteringOrder::Asc, 1)];
        let built = ClusteringElements::of(columns.clone(), vec![int(0), int(1)]).unwrap();
        let extended = ClusteringElements::of_column(columns[0].clone(), int(0))
            .extend(&ClusteringElements::of_column(columns[1].clone(), int(1)))
            .unwrap();

        let mut set = HashSet::new();
        set.insert(built.clone());
        assert!(set.contains(&extended));
        assert!(!set.contains(&built.top()));
    }

    #[test]
    fn test_same_values_of_different_columns_differ() {
        let c0 = column(ClusteringOrder::Asc, 0);
        let c1 = column(ClusteringOrder::Asc, 1);
        let first = ClusteringElements::of_column(c0, int(1));
        let second = ClusteringElements::of_column(c1, int(1));

        assert_ne!(first, second);
        assert!(first < second);

        let mut set = std::collections::HashSet::new();
        set.insert(first.clone());
        assert!(!set.contains(&second));
    }

    #[test]
    fn test_columns_with_opposite_directions_stay_antisymmetric() {
        use crate::restrictions::at_most;

        let asc = ClusteringElements::of_column(column(ClusteringOrder::Asc, 0), int(1));
        let desc = ClusteringElements::of_column(column(ClusteringOrder::Desc, 1), int(2));

        assert_eq!(asc.cmp(&desc), Ordering::Less);
        assert_eq!(desc.cmp(&asc), Ordering::Greater);
        assert!(!at_most(&asc).contains(&desc));
    }

    #[test]
    fn test_column_compared_before_value() {
        // same position and value, different direction
        let asc = ClusteringElements::of_column(column(ClusteringOrder::Asc, 0), int(3));
        let desc = ClusteringElements::of_column(column(ClusteringOrder::Desc, 0), int(3));

        assert_ne!(asc, desc);
        assert_eq!(asc.cmp(&desc), desc.cmp(&asc).reverse());
    }

    #[test]
    fn test_prefix_longer_than_elements() {
        let one = ClusteringElements::of_column(column(ClusteringOrder::Asc, 0), int(1));
        assert_eq!(one.prefix(5), one);
        assert_eq!(one.top().prefix(1), one);
        assert!(one.prefix(0).is_empty());
    }

    #[test]
    fn test_display() {
        let columns = vec![column(ClusteringOrder::Asc, 0), column(ClusteringOrder::Desc, 1)];
        let elements = ClusteringElements::of(columns, vec![int(1), int(-3)]).unwrap();

        assert_eq!(elements.to_string(), "(1, -3)");
        assert_eq!(elements.bottom().to_string(), "(1, -3) BOTTOM");
        assert_eq!(ClusteringElements::empty().top().to_string(), "() TOP");
    }
}
