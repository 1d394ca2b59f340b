//! Backtracking search over course sections.
//!
//! # Algorithm
//!
//! 1. Visit courses in ascending section count (most constrained first).
//! 2. Within a course, try sections by descending standalone probability.
//!    Sections touching a forbidden cell are dropped here, once.
//! 3. Skip a section if any of its meetings conflicts with a meeting
//!    already committed.
//! 4. Otherwise commit it, recurse, and undo.
//! 5. At a leaf, apply the instructor filter; keep the combination, record
//!    its shape.
//! 6. Stop as soon as the accepted count reaches the cap.
//!
//! # Complexity
//! O(Π sᵢ) leaves in the worst case, where sᵢ is the section count of course
//! i. Pruning is the only mitigation: committed state is path-dependent, so
//! nothing is memoized across branches.

use std::cmp::Ordering;

use super::shape::{ShapeBuckets, ShapeSignature};
use super::stats::GenerationStats;
use super::GeneratorConfig;
use crate::models::{Combination, Course, ForbiddenSlots, InstructorPreference, Meeting, Pick};

/// Immutable search inputs and visiting order.
pub(crate) struct SearchPlan<'a> {
    courses: &'a [Course],
    preference: &'a InstructorPreference,
    max_combinations: usize,
    /// Course indices in visiting order.
    course_order: Vec<usize>,
    /// Per course (by input index): section indices in visiting order,
    /// forbidden sections excluded.
    section_order: Vec<Vec<usize>>,
    /// Sections excluded for touching a forbidden cell.
    forbidden_sections: u64,
}

/// State owned by one search: the current path and everything accepted.
pub(crate) struct SearchFrame<'a> {
    /// Section index chosen per course (by input index) on the current path.
    chosen: Vec<usize>,
    /// Meetings of every section on the current path.
    committed: Vec<&'a Meeting>,
    pub(crate) accepted: Vec<Combination<'a>>,
    pub(crate) shapes: ShapeBuckets<'a>,
    pub(crate) stats: GenerationStats,
}

impl<'a> SearchPlan<'a> {
    pub(crate) fn new(
        courses: &'a [Course],
        forbidden: &'a ForbiddenSlots,
        preference: &'a InstructorPreference,
        config: &GeneratorConfig,
    ) -> Self {
        let mut course_order: Vec<usize> = (0..courses.len()).collect();
        course_order.sort_by_key(|&i| courses[i].sections.len());

        let mut forbidden_sections = 0;
        let section_order = courses
            .iter()
            .map(|course| {
                let mut ranked: Vec<(usize, Option<f64>)> = Vec::with_capacity(course.sections.len());
                for (i, section) in course.sections.iter().enumerate() {
                    if forbidden.blocks(section) {
                        forbidden_sections += 1;
                    } else {
                        ranked.push((i, section.probability()));
                    }
                }
                ranked.sort_by(|a, b| by_probability_desc(a.1, b.1));
                ranked.into_iter().map(|(i, _)| i).collect()
            })
            .collect();

        Self {
            courses,
            preference,
            max_combinations: config.max_combinations,
            course_order,
            section_order,
            forbidden_sections,
        }
    }

    /// Runs the search to completion or to the cap.
    pub(crate) fn run(&self, per_shape: usize) -> SearchFrame<'a> {
        let mut frame = SearchFrame {
            chosen: vec![0; self.courses.len()],
            committed: Vec::new(),
            accepted: Vec::new(),
            shapes: ShapeBuckets::new(per_shape),
            stats: GenerationStats {
                pruned_forbidden: self.forbidden_sections,
                ..Default::default()
            },
        };
        if !self.courses.is_empty() {
            self.descend(&mut frame, 0);
        }
        frame
    }

    fn descend(&self, frame: &mut SearchFrame<'a>, depth: usize) {
        let Some(&course_idx) = self.course_order.get(depth) else {
            self.visit_leaf(frame);
            return;
        };
        let courses: &'a [Course] = self.courses;
        let course = &courses[course_idx];

        for &section_idx in &self.section_order[course_idx] {
            if frame.accepted.len() >= self.max_combinations {
                frame.stats.capped = true;
                return;
            }

            let section = &course.sections[section_idx];
            if frame
                .committed
                .iter()
                .any(|m| section.conflicts_with_meeting(m))
            {
                frame.stats.pruned_conflict += 1;
                continue;
            }

            let mark = frame.committed.len();
            frame.committed.extend(section.meetings.iter());
            frame.chosen[course_idx] = section_idx;
            self.descend(frame, depth + 1);
            frame.committed.truncate(mark);
        }
    }

    fn visit_leaf(&self, frame: &mut SearchFrame<'a>) {
        frame.stats.leaves_reached += 1;
        if !self.preference.accepts(&frame.committed) {
            frame.stats.rejected_by_instructor += 1;
            return;
        }

        let picks = self
            .courses
            .iter()
            .zip(&frame.chosen)
            .map(|(course, &s)| Pick::new(course, &course.sections[s]))
            .collect();
        let combination = Combination::from_picks(picks);
        frame
            .shapes
            .record(ShapeSignature::of(&combination), &combination);
        frame.accepted.push(combination);
        frame.stats.accepted += 1;
    }
}

/// Descending probability; unknown sorts after every known value.
fn by_probability_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(pa), Some(pb)) => pb.total_cmp(&pa),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
