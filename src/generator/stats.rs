//! Search statistics.
//!
//! Counters collected during one generation call.
//!
//! | Counter | Meaning |
//! |---------|---------|
//! | `leaves_reached` | complete conflict-free assignments visited |
//! | `accepted` | leaves that passed the instructor filter and were kept |
//! | `rejected_by_instructor` | leaves dropped by the instructor filter |
//! | `pruned_forbidden` | sections excluded by forbidden slots |
//! | `pruned_conflict` | section candidates cut by time conflicts |
//! | `shapes` | distinct shape signatures among accepted leaves |
//! | `capped` | search stopped early at the combination cap |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters for one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Complete conflict-free assignments visited.
    pub leaves_reached: u64,
    /// Leaves kept in the output.
    pub accepted: u64,
    /// Leaves dropped by the instructor filter.
    pub rejected_by_instructor: u64,
    /// Sections excluded up front because they touch a forbidden cell.
    pub pruned_forbidden: u64,
    /// Section candidates cut during search by a time conflict.
    pub pruned_conflict: u64,
    /// Distinct shape signatures among accepted leaves.
    pub shapes: usize,
    /// `true` when unexplored branches remained at the cap.
    pub capped: bool,
}

impl GenerationStats {
    /// Whether every branch of the search space was explored.
    pub fn is_complete(&self) -> bool {
        !self.capped
    }

    /// Fraction of reached leaves that were accepted (0.0..1.0).
    ///
    /// Returns 1.0 when no leaf was reached.
    pub fn acceptance_rate(&self) -> f64 {
        if self.leaves_reached == 0 {
            1.0
        } else {
            self.accepted as f64 / self.leaves_reached as f64
        }
    }

    /// Total section candidates cut before recursing.
    pub fn pruned(&self) -> u64 {
        self.pruned_forbidden + self.pruned_conflict
    }
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} accepted / {} leaves, {} shapes, pruned {} (forbidden {}, conflict {}), instructor-rejected {}{}",
            self.accepted,
            self.leaves_reached,
            self.shapes,
            self.pruned(),
            self.pruned_forbidden,
            self.pruned_conflict,
            self.rejected_by_instructor,
            if self.capped { ", capped" } else { "" }
        )
    }
}
