//! Properties of the clustering order and of the ranges built on it
//!
//! Random keys over up to three columns with random directions check that the
//! order is antisymmetric and transitive, that sentinels bracket every
//! extension of their prefix, and that every range builder selects exactly
//! the keys a natural-order tuple comparison against the pivot selects.

use std::cmp::Ordering;
use std::sync::Arc;

use bytes::Bytes;
use cqlite_restrictions::{
    at_least, at_most, equal_to, greater_than, less_than, not_equal_to, BoundMarker,
    ClusteringElements, ClusteringOrder, ColumnMetadata, CqlType,
};
use proptest::prelude::*;

const COLUMNS: usize = 3;

fn columns(orders: &[ClusteringOrder]) -> Vec<Arc<ColumnMetadata>> {
    orders
        .iter()
        .enumerate()
        .map(|(position, order)| {
            Arc::new(ColumnMetadata::clustering_column(
                "ks",
                "tbl",
                format!("c{}", position),
                CqlType::Int,
                *order,
                position,
            ))
        })
        .collect()
}

fn elements(columns: &[Arc<ColumnMetadata>], values: &[i32], bound: BoundMarker) -> ClusteringElements {
    let bytes = values
        .iter()
        .map(|v| Bytes::copy_from_slice(&v.to_be_bytes()))
        .collect();
    let regular = ClusteringElements::of(columns[..values.len()].to_vec(), bytes).unwrap();
    match bound {
        BoundMarker::Bottom => regular.bottom(),
        BoundMarker::Regular => regular,
        BoundMarker::Top => regular.top(),
    }
}

/// Elements over the columns starting at `start`, values truncated to fit
fn slice(columns: &[Arc<ColumnMetadata>], start: usize, values: &[i32]) -> ClusteringElements {
    let values = &values[..values.len().min(columns.len() - start)];
    let bytes = values
        .iter()
        .map(|v| Bytes::copy_from_slice(&v.to_be_bytes()))
        .collect();
    ClusteringElements::of(columns[start..start + values.len()].to_vec(), bytes).unwrap()
}

fn orders() -> impl Strategy<Value = Vec<ClusteringOrder>> {
    prop::collection::vec(
        prop_oneof![Just(ClusteringOrder::Asc), Just(ClusteringOrder::Desc)],
        COLUMNS,
    )
}

// A small value domain so that prefixes are frequently shared
fn values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-3i32..3, 0..=COLUMNS)
}

fn bound() -> impl Strategy<Value = BoundMarker> {
    prop_oneof![
        Just(BoundMarker::Bottom),
        Just(BoundMarker::Regular),
        Just(BoundMarker::Top)
    ]
}

fn element() -> impl Strategy<Value = (Vec<i32>, BoundMarker)> {
    (values(), bound())
}

proptest! {
    #[test]
    fn ordering_is_antisymmetric(orders in orders(), (a, a_bound) in element(), (b, b_bound) in element()) {
        let cols = columns(&orders);
        let left = elements(&cols, &a, a_bound);
        let right = elements(&cols, &b, b_bound);

        prop_assert_eq!(left.cmp(&right), right.cmp(&left).reverse());
        prop_assert_eq!(left == right, a == b && a_bound == b_bound);
    }

    #[test]
    fn slices_of_different_columns_stay_antisymmetric(
        orders in orders(),
        (left_start, right_start) in (0..COLUMNS, 0..COLUMNS),
        a in values(),
        b in values(),
    ) {
        let cols = columns(&orders);
        let left = slice(&cols, left_start, &a);
        let right = slice(&cols, right_start, &b);

        prop_assert_eq!(left.cmp(&right), right.cmp(&left).reverse());
        let same_columns = (left.is_empty() && right.is_empty())
            || (left_start == right_start && left.len() == right.len());
        prop_assert_eq!(left == right, same_columns && left.values() == right.values());
    }

    #[test]
    fn ordering_is_transitive(orders in orders(), items in prop::collection::vec(element(), 3..8)) {
        let cols = columns(&orders);
        let mut sorted: Vec<_> = items
            .iter()
            .map(|(values, bound)| elements(&cols, values, *bound))
            .collect();
        sorted.sort();

        for (i, smaller) in sorted.iter().enumerate() {
            for greater in &sorted[i + 1..] {
                prop_assert_ne!(smaller.cmp(greater), Ordering::Greater, "{} > {}", smaller, greater);
            }
        }
    }

    #[test]
    fn sentinels_bracket_every_extension(orders in orders(), key in values(), len in 0..=COLUMNS) {
        let cols = columns(&orders);
        let key = elements(&cols, &key, BoundMarker::Regular);
        let prefix = key.prefix(len.min(key.len()));

        prop_assert!(prefix.bottom() < prefix);
        prop_assert!(prefix.bottom() <= key);
        prop_assert!(key < prefix.top());
        prop_assert_eq!(prefix.bottom().bottom(), prefix.bottom());
        prop_assert_eq!(prefix.top().bottom(), prefix.bottom());
    }

    #[test]
    fn ranges_follow_natural_tuple_order(
        orders in orders(),
        pivot in prop::collection::vec(-3i32..3, 1..=COLUMNS),
        key in prop::collection::vec(-3i32..3, COLUMNS),
    ) {
        let cols = columns(&orders);
        let candidate = elements(&cols, &key, BoundMarker::Regular);
        let pivot_elements = elements(&cols, &pivot, BoundMarker::Regular);
        let natural = key[..pivot.len()].cmp(&pivot[..]);

        prop_assert_eq!(at_most(&pivot_elements).contains(&candidate), natural != Ordering::Greater);
        prop_assert_eq!(less_than(&pivot_elements).contains(&candidate), natural == Ordering::Less);
        prop_assert_eq!(at_least(&pivot_elements).contains(&candidate), natural != Ordering::Less);
        prop_assert_eq!(greater_than(&pivot_elements).contains(&candidate), natural == Ordering::Greater);
        prop_assert_eq!(equal_to(&pivot_elements).contains(&candidate), natural == Ordering::Equal);
        prop_assert_eq!(not_equal_to(&pivot_elements).contains(&candidate), natural != Ordering::Equal);
    }

    #[test]
    fn complementary_ranges_partition_keys(
        orders in orders(),
        pivot in prop::collection::vec(-3i32..3, 1..=COLUMNS),
        key in prop::collection::vec(-3i32..3, COLUMNS),
    ) {
        let cols = columns(&orders);
        let candidate = elements(&cols, &key, BoundMarker::Regular);
        let pivot = elements(&cols, &pivot, BoundMarker::Regular);

        prop_assert_ne!(at_most(&pivot).contains(&candidate), greater_than(&pivot).contains(&candidate));
        prop_assert_ne!(less_than(&pivot).contains(&candidate), at_least(&pivot).contains(&candidate));
        prop_assert!(at_most(&pivot).intersection(&greater_than(&pivot)).is_empty());
    }
}
