//! Key elements and the range sets built from them
//!
//! Restrictions on primary key columns are evaluated by turning each pivot
//! value into a [`RangeSet`] of [`ClusteringElements`] and testing row keys
//! for membership. The relational operator chosen by the caller picks one
//! of [`at_most`], [`less_than`], [`at_least`], [`greater_than`],
//! [`equal_to`] or [`not_equal_to`]; several restrictions on the same key
//! combine with [`RangeSet::intersection`].

pub mod builder;
pub mod elements;
pub mod range_set;
pub mod ranges;

pub use builder::KeyBuilder;
pub use elements::{BoundMarker, ClusteringElements};
pub use range_set::{Range, RangeSet};
pub use ranges::{at_least, at_most, equal_to, greater_than, less_than, not_equal_to};
