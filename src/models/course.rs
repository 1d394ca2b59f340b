//! Course and section models.
//!
//! A course is a requirement the student fills with exactly one of its
//! sections. A section groups meetings that are taken together (for example
//! a lecture and its lab).

use super::Meeting;

/// One offering of a course.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Section label, unique within its course.
    pub name: String,
    /// Meetings taken together when this section is chosen.
    pub meetings: Vec<Meeting>,
}

impl Section {
    /// Creates a section with no meetings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meetings: Vec::new(),
        }
    }

    /// Adds a meeting.
    pub fn with_meeting(mut self, meeting: Meeting) -> Self {
        self.meetings.push(meeting);
        self
    }

    /// Standalone admission probability of this section in `[0, 1]`.
    ///
    /// Product of the clamped factors of meetings with a known probability.
    /// `None` if no meeting carries one.
    pub fn probability(&self) -> Option<f64> {
        self.meetings
            .iter()
            .filter_map(Meeting::probability_factor)
            .fold(None, |acc, f| Some(acc.unwrap_or(1.0) * f))
    }

    /// Whether any meeting of this section conflicts with `other`.
    pub fn conflicts_with_meeting(&self, other: &Meeting) -> bool {
        self.meetings.iter().any(|m| m.conflicts_with(other))
    }
}

/// A course and its candidate sections.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Course name (e.g. `"CS 32"`).
    pub name: String,
    /// Candidate sections, in offering order.
    pub sections: Vec<Section>,
}

impl Course {
    /// Creates a course with no sections.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Finds a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}
