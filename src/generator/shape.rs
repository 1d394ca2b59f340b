//! Shape signatures and shape buckets.
//!
//! A shape signature is the sorted, de-duplicated set of bucketed
//! `(weekday, slot)` cells a combination occupies. Two combinations with the
//! same signature have the same weekly footprint, possibly with different
//! courses, sections, or instructors.

use std::collections::BTreeMap;
use std::fmt;

use super::probability::shape_probability;
use crate::models::{Combination, Weekday};

/// Canonical occupied-cell fingerprint of a combination.
///
/// Renders as `Monday|1,Monday|2,Wednesday|1,...`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeSignature(Vec<(Weekday, i32)>);

impl ShapeSignature {
    /// Builds a signature from any collection of cells.
    pub fn from_cells(cells: impl IntoIterator<Item = (Weekday, i32)>) -> Self {
        let mut cells: Vec<_> = cells.into_iter().collect();
        cells.sort_unstable();
        cells.dedup();
        Self(cells)
    }

    /// Signature of a combination.
    pub fn of(combination: &Combination<'_>) -> Self {
        Self::from_cells(combination.occupied_slots())
    }

    /// Occupied cells, sorted by weekday then slot.
    pub fn cells(&self) -> &[(Weekday, i32)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ShapeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (day, slot)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}|{}", day, slot)?;
        }
        Ok(())
    }
}

/// Combinations sharing one shape.
#[derive(Debug, Clone, Default)]
pub struct ShapeBucket<'a> {
    /// Stored combinations (at most the per-shape cap).
    pub combinations: Vec<Combination<'a>>,
    /// Accepted combinations with this shape, stored or not.
    pub total: usize,
}

impl ShapeBucket<'_> {
    /// Probability of getting into some section of every course with this
    /// shape. See [`shape_probability`].
    pub fn probability(&self) -> f64 {
        shape_probability(&self.combinations)
    }

    /// Whether some same-shape combinations were not stored.
    pub fn is_truncated(&self) -> bool {
        self.total > self.combinations.len()
    }
}

/// Shape signature → bucket map with a per-bucket storage cap.
#[derive(Debug, Clone)]
pub struct ShapeBuckets<'a> {
    buckets: BTreeMap<ShapeSignature, ShapeBucket<'a>>,
    per_bucket: usize,
}

impl<'a> ShapeBuckets<'a> {
    /// Creates an empty map storing at most `per_bucket` combinations per shape.
    pub fn new(per_bucket: usize) -> Self {
        Self {
            buckets: BTreeMap::new(),
            per_bucket,
        }
    }

    /// Records a combination under its signature.
    ///
    /// Returns `true` if it was stored, `false` if the bucket was full.
    pub fn record(&mut self, signature: ShapeSignature, combination: &Combination<'a>) -> bool {
        let bucket = self.buckets.entry(signature).or_default();
        bucket.total += 1;
        if bucket.combinations.len() < self.per_bucket {
            bucket.combinations.push(combination.clone());
            true
        } else {
            false
        }
    }

    pub fn get(&self, signature: &ShapeSignature) -> Option<&ShapeBucket<'a>> {
        self.buckets.get(signature)
    }

    /// Buckets in signature order.
    pub fn iter(&self) -> impl Iterator<Item = (&ShapeSignature, &ShapeBucket<'a>)> {
        self.buckets.iter()
    }

    /// Number of distinct shapes.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sorts every bucket by descending combined probability (stable).
    pub(crate) fn rank(&mut self) {
        for bucket in self.buckets.values_mut() {
            bucket
                .combinations
                .sort_by(|a, b| b.probability().total_cmp(&a.probability()));
        }
    }
}
