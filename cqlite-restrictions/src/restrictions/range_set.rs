//! Ranges and unions of ranges over any totally ordered type
//!
//! A [`RangeSet`] keeps its ranges sorted, disjoint and coalesced: two ranges
//! that overlap or touch (`[a, b)` and `[b, c]`) are stored as one.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Bound::{self, Excluded, Included, Unbounded};

/// A contiguous interval with independently open, closed or unbounded ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range<T> {
    lower: Bound<T>,
    upper: Bound<T>,
}

impl<T: Ord> Range<T> {
    pub fn new(lower: Bound<T>, upper: Bound<T>) -> Self {
        Self { lower, upper }
    }

    /// `(-∞, +∞)`
    pub fn all() -> Self {
        Self::new(Unbounded, Unbounded)
    }

    /// `[lower, upper]`
    pub fn closed(lower: T, upper: T) -> Self {
        Self::new(Included(lower), Included(upper))
    }

    /// `[lower, upper)`
    pub fn closed_open(lower: T, upper: T) -> Self {
        Self::new(Included(lower), Excluded(upper))
    }

    /// `(lower, upper]`
    pub fn open_closed(lower: T, upper: T) -> Self {
        Self::new(Excluded(lower), Included(upper))
    }

    /// `(lower, upper)`
    pub fn open(lower: T, upper: T) -> Self {
        Self::new(Excluded(lower), Excluded(upper))
    }

    /// `(-∞, upper]`
    pub fn at_most(upper: T) -> Self {
        Self::new(Unbounded, Included(upper))
    }

    /// `(-∞, upper)`
    pub fn less_than(upper: T) -> Self {
        Self::new(Unbounded, Excluded(upper))
    }

    /// `[lower, +∞)`
    pub fn at_least(lower: T) -> Self {
        Self::new(Included(lower), Unbounded)
    }

    /// `(lower, +∞)`
    pub fn greater_than(lower: T) -> Self {
        Self::new(Excluded(lower), Unbounded)
    }

    pub fn lower(&self) -> Bound<&T> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Bound<&T> {
        self.upper.as_ref()
    }

    pub fn contains(&self, value: &T) -> bool {
        let above_lower = match &self.lower {
            Unbounded => true,
            Included(lower) => value >= lower,
            Excluded(lower) => value > lower,
        };
        let below_upper = match &self.upper {
            Unbounded => true,
            Included(upper) => value <= upper,
            Excluded(upper) => value < upper,
        };
        above_lower && below_upper
    }

    /// Whether no value can fall inside this range
    pub fn is_empty(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Unbounded, _) | (_, Unbounded) => false,
            (Included(lower), Included(upper)) => lower > upper,
            (Included(lower), Excluded(upper))
            | (Excluded(lower), Included(upper))
            | (Excluded(lower), Excluded(upper)) => lower >= upper,
        }
    }
}

impl<T: Ord + Clone> Range<T> {
    /// The values shared by both ranges, `None` if there are none
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let lower = if compare_lower(self.lower(), other.lower()) == Ordering::Less {
            other.lower.clone()
        } else {
            self.lower.clone()
        };
        let upper = if compare_upper(self.upper(), other.upper()) == Ordering::Greater {
            other.upper.clone()
        } else {
            self.upper.clone()
        };

        let range = Self::new(lower, upper);
        (!range.is_empty()).then_some(range)
    }
}

/// Order of two lower bounds: the one admitting more values is smaller
fn compare_lower<T: Ord>(left: Bound<&T>, right: Bound<&T>) -> Ordering {
    match (left, right) {
        (Unbounded, Unbounded) => Ordering::Equal,
        (Unbounded, _) => Ordering::Less,
        (_, Unbounded) => Ordering::Greater,
        (Included(l), Included(r)) | (Excluded(l), Excluded(r)) => l.cmp(r),
        (Included(l), Excluded(r)) => l.cmp(r).then(Ordering::Less),
        (Excluded(l), Included(r)) => l.cmp(r).then(Ordering::Greater),
    }
}

/// Order of two upper bounds: the one admitting more values is greater
fn compare_upper<T: Ord>(left: Bound<&T>, right: Bound<&T>) -> Ordering {
    match (left, right) {
        (Unbounded, Unbounded) => Ordering::Equal,
        (Unbounded, _) => Ordering::Greater,
        (_, Unbounded) => Ordering::Less,
        (Included(l), Included(r)) | (Excluded(l), Excluded(r)) => l.cmp(r),
        (Included(l), Excluded(r)) => l.cmp(r).then(Ordering::Greater),
        (Excluded(l), Included(r)) => l.cmp(r).then(Ordering::Less),
    }
}

/// Whether a range ending at `upper` overlaps or touches one starting at `lower`
fn connects<T: Ord>(upper: Bound<&T>, lower: Bound<&T>) -> bool {
    match (upper, lower) {
        (Unbounded, _) | (_, Unbounded) => true,
        (Excluded(u), Excluded(l)) => u > l,
        (Included(u), Included(l)) | (Included(u), Excluded(l)) | (Excluded(u), Included(l)) => {
            u >= l
        }
    }
}

/// A union of disjoint ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSet<T> {
    ranges: Vec<Range<T>>,
}

impl<T: Ord> RangeSet<T> {
    pub fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    pub fn all() -> Self {
        Self::of(Range::all())
    }

    pub fn of(range: Range<T>) -> Self {
        let mut set = Self::empty();
        set.add(range);
        set
    }

    /// Add a range, merging it with every range it overlaps or touches
    pub fn add(&mut self, range: Range<T>) {
        if range.is_empty() {
            return;
        }
        self.ranges.push(range);
        self.normalize();
    }

    pub fn contains(&self, value: &T) -> bool {
        self.ranges.iter().any(|range| range.contains(value))
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of disjoint ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// The disjoint ranges in ascending order
    pub fn ranges(&self) -> &[Range<T>] {
        &self.ranges
    }

    fn normalize(&mut self) {
        let mut ranges = std::mem::take(&mut self.ranges);
        ranges.sort_by(|a, b| compare_lower(a.lower(), b.lower()));

        let mut merged: Vec<Range<T>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            if let Some(last) = merged.last_mut() {
                if connects(last.upper(), range.lower()) {
                    if compare_upper(range.upper(), last.upper()) == Ordering::Greater {
                        last.upper = range.upper;
                    }
                    continue;
                }
            }
            merged.push(range);
        }
        self.ranges = merged;
    }
}

impl<T: Ord + Clone> RangeSet<T> {
    /// Values contained in either set
    pub fn union(&self, other: &Self) -> Self {
        let mut set = self.clone();
        set.ranges.extend(other.ranges.iter().cloned());
        set.normalize();
        set
    }

    /// Values contained in both sets
    pub fn intersection(&self, other: &Self) -> Self {
        let mut set = Self::empty();
        for left in &self.ranges {
            set.ranges
                .extend(other.ranges.iter().filter_map(|right| left.intersection(right)));
        }
        set.normalize();
        set
    }
}

impl<T: Ord> Default for RangeSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lower {
            Unbounded => write!(f, "(-∞")?,
            Included(lower) => write!(f, "[{}", lower)?,
            Excluded(lower) => write!(f, "({}", lower)?,
        }
        write!(f, "..")?;
        match &self.upper {
            Unbounded => write!(f, "+∞)"),
            Included(upper) => write!(f, "{}]", upper),
            Excluded(upper) => write!(f, "{})", upper),
        }
    }
}

impl<T: fmt::Display> fmt::Display for RangeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", range)?;
        }
        write!(f, "}}")
    }
}
