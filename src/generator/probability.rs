//! Admission-probability aggregation.
//!
//! Two distinct questions, two functions:
//!
//! | Function | Question |
//! |----------|----------|
//! | [`combined_probability`] | chance of getting into *this* combination |
//! | [`shape_probability`] | chance of getting into *some* section of every course with this time shape |
//!
//! # Unknown Probabilities
//!
//! Meetings without a probability are left out of every product: they
//! neither raise nor lower a score. A combination whose meetings all lack a
//! probability scores 1.0.

use std::collections::HashMap;

use crate::models::{Combination, Meeting};

/// Product of clamped per-meeting factors (`max(0, p) / 100`).
///
/// The closed sentinel (-100) yields a zero factor.
pub fn combined_probability<'m>(meetings: impl IntoIterator<Item = &'m Meeting>) -> f64 {
    meetings
        .into_iter()
        .filter_map(Meeting::probability_factor)
        .product()
}

/// Course-level probability for combinations sharing one time shape.
///
/// For each course, takes the distinct sections observed in `combinations`
/// that have a known probability `p_i` and computes `1 - Π(1 - p_i)`, the
/// chance at least one of them admits. Multiplies the per-course values.
/// Courses with no known section probability are skipped.
pub fn shape_probability(combinations: &[Combination<'_>]) -> f64 {
    let mut per_course: HashMap<&str, HashMap<&str, f64>> = HashMap::new();
    for combo in combinations {
        for pick in combo.picks() {
            if let Some(p) = pick.section.probability() {
                per_course
                    .entry(pick.course.name.as_str())
                    .or_default()
                    .insert(pick.section.name.as_str(), p);
            }
        }
    }

    per_course
        .values()
        .map(|sections| 1.0 - sections.values().map(|p| 1.0 - p).product::<f64>())
        .product()
}
