//! Range sets matching a multi-column comparison against a pivot
//!
//! A restriction such as `(c1, c2) <= (1, 3)` compares tuples in the natural
//! order of the column types, while keys are stored in clustering order where
//! DESC columns are reversed. The natural-order half-line is built one column
//! level at a time: at level `i` the keys sharing the pivot's first `i` values
//! and lying strictly below (or above) its `i`-th value form one clustering
//! interval, bounded by sentinels of the two prefixes. Depending on the
//! column direction that interval sits at the bottom or at the top of the
//! `i`-prefix block. The pivot's own block `[p.bottom(), p.top()]` is added
//! for inclusive comparisons, so keys extending the pivot share its fate.
//!
//! A sentinel pivot stands for a point just below (bottom) or just above
//! (top) its block: `at_most(p.bottom())` equals `less_than(p)` and
//! `at_most(p.top())` equals `at_most(p)`, and so on.

use super::elements::ClusteringElements;
use super::range_set::{Range, RangeSet};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Below,
    Above,
}

/// Keys whose values are at most those of `pivot`
pub fn at_most(pivot: &ClusteringElements) -> RangeSet<ClusteringElements> {
    natural_ranges(pivot, Side::Below, !pivot.is_bottom())
}

/// Keys whose values are strictly less than those of `pivot`
///
/// Keys extending the pivot are excluded along with the pivot itself.
pub fn less_than(pivot: &ClusteringElements) -> RangeSet<ClusteringElements> {
    natural_ranges(pivot, Side::Below, pivot.is_top())
}

/// Keys whose values are at least those of `pivot`
pub fn at_least(pivot: &ClusteringElements) -> RangeSet<ClusteringElements> {
    natural_ranges(pivot, Side::Above, !pivot.is_top())
}

/// Keys whose values are strictly greater than those of `pivot`
pub fn greater_than(pivot: &ClusteringElements) -> RangeSet<ClusteringElements> {
    natural_ranges(pivot, Side::Above, pivot.is_bottom())
}

/// Keys starting with the values of `pivot`
///
/// Nothing equals a sentinel, so a bottom or top pivot yields an empty set.
pub fn equal_to(pivot: &ClusteringElements) -> RangeSet<ClusteringElements> {
    if pivot.is_range_endpoint() {
        return RangeSet::empty();
    }
    RangeSet::of(Range::closed(pivot.bottom(), pivot.top()))
}

/// Keys not starting with the values of `pivot`
pub fn not_equal_to(pivot: &ClusteringElements) -> RangeSet<ClusteringElements> {
    if pivot.is_range_endpoint() {
        return RangeSet::all();
    }
    less_than(pivot).union(&greater_than(pivot))
}

fn natural_ranges(
    pivot: &ClusteringElements,
    side: Side,
    include_pivot: bool,
) -> RangeSet<ClusteringElements> {
    let mut set = RangeSet::empty();

    for (level, column) in pivot.columns().iter().enumerate() {
        let outer = pivot.prefix(level);
        let inner = pivot.prefix(level + 1);

        // Natural "below" lies at the bottom of the block unless the column is reversed
        let at_block_bottom = (side == Side::Below) != column.order.is_reversed();
        let range = if at_block_bottom {
            Range::closed_open(outer.bottom(), inner.bottom())
        } else {
            Range::open_closed(inner.top(), outer.top())
        };
        set.add(range);
    }

    if include_pivot {
        let block = pivot.prefix(pivot.len());
        set.add(Range::closed(block.bottom(), block.top()));
    }

    trace!(
        pivot = %pivot,
        ?side,
        include_pivot,
        ranges = set.len(),
        "built restriction ranges"
    );
    set
}
