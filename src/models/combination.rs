//! Combination (solution) model.
//!
//! A combination assigns one section to every requested course. It borrows
//! the courses and sections from the request it was generated for.

use super::{Course, Meeting, Section, Weekday};
use crate::generator::combined_probability;

/// A chosen section for one course.
#[derive(Debug, Clone, Copy)]
pub struct Pick<'a> {
    /// The requested course.
    pub course: &'a Course,
    /// The section chosen for it.
    pub section: &'a Section,
}

impl<'a> Pick<'a> {
    pub fn new(course: &'a Course, section: &'a Section) -> Self {
        Self { course, section }
    }
}

impl PartialEq for Pick<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.course.name == other.course.name && self.section.name == other.section.name
    }
}

/// One conflict-free weekly schedule: a section per course, in request
/// course order.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination<'a> {
    picks: Vec<Pick<'a>>,
    probability: f64,
}

impl<'a> Combination<'a> {
    /// Builds a combination and computes its combined probability.
    pub fn from_picks(picks: Vec<Pick<'a>>) -> Self {
        let probability = combined_probability(picks.iter().flat_map(|p| &p.section.meetings));
        Self { picks, probability }
    }

    /// Chosen sections, one per course, in request order.
    pub fn picks(&self) -> &[Pick<'a>] {
        &self.picks
    }

    /// Combined admission probability in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// All meetings across the chosen sections.
    pub fn meetings(&self) -> impl Iterator<Item = &'a Meeting> + '_ {
        self.picks.iter().flat_map(|p| p.section.meetings.iter())
    }

    /// Bucketed `(weekday, slot)` cells occupied by any meeting.
    pub fn occupied_slots(&self) -> impl Iterator<Item = (Weekday, i32)> + '_ {
        self.meetings().flat_map(Meeting::occupied_slots)
    }

    /// The section chosen for a course, by course name.
    pub fn section_for(&self, course: &str) -> Option<&'a Section> {
        self.picks
            .iter()
            .find(|p| p.course.name == course)
            .map(|p| p.section)
    }

    /// Whether any meeting carries the closed sentinel.
    pub fn has_closed_section(&self) -> bool {
        self.meetings().any(Meeting::is_closed)
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}
