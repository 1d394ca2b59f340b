//! Student-side constraints: forbidden time cells and instructor preferences.
//!
//! # Constraint Types
//!
//! | Constraint | Applied | Granularity |
//! |------------|---------|-------------|
//! | [`ForbiddenSlots`] | during search, per section | bucketed `(day, slot)` cell |
//! | [`InstructorPreference`] | at leaves, per combination | whole combination |
//!
//! Instructor preference is a property of a whole combination, so it cannot
//! prune interior search nodes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::meeting::tokenize_name;
use super::{Meeting, Section, Weekday};

/// Set of `(weekday, slot)` cells the student has marked unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenSlots {
    cells: HashSet<(Weekday, i32)>,
}

impl ForbiddenSlots {
    /// Creates an empty set (nothing forbidden).
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a cell unavailable.
    pub fn insert(&mut self, day: Weekday, slot: i32) {
        self.cells.insert((day, slot));
    }

    /// Marks a cell unavailable (builder form).
    pub fn with(mut self, day: Weekday, slot: i32) -> Self {
        self.insert(day, slot);
        self
    }

    /// Marks a contiguous run of slots on one day.
    pub fn with_block(mut self, day: Weekday, first: i32, last: i32) -> Self {
        for slot in first..=last {
            self.insert(day, slot);
        }
        self
    }

    pub fn contains(&self, day: Weekday, slot: i32) -> bool {
        self.cells.contains(&(day, slot))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether a meeting's bucketed coverage touches a forbidden cell.
    pub fn hits(&self, meeting: &Meeting) -> bool {
        !self.cells.is_empty()
            && meeting
                .occupied_slots()
                .any(|cell| self.cells.contains(&cell))
    }

    /// Whether any meeting of a section touches a forbidden cell.
    pub fn blocks(&self, section: &Section) -> bool {
        section.meetings.iter().any(|m| self.hits(m))
    }
}

impl FromIterator<(Weekday, i32)> for ForbiddenSlots {
    fn from_iter<I: IntoIterator<Item = (Weekday, i32)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// How multiple preferred instructors combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Every preferred instructor must teach some meeting (strict).
    All,
    /// At least one preferred instructor must teach some meeting.
    #[default]
    Any,
}

/// Instructor filter applied to complete combinations.
///
/// A preferred name matches a meeting when its words appear as a contiguous
/// run of the meeting's instructor words, after lowercasing and dropping
/// commas. `"santos"` matches `"Santos, Ana"` but not `"Santosa, Ben"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructorPreference {
    names: Vec<Vec<String>>,
    mode: MatchMode,
}

impl InstructorPreference {
    /// No preference: every combination passes.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a preference from names and a match mode.
    ///
    /// Blank names are ignored.
    pub fn new<I, S>(names: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| tokenize_name(n.as_ref()))
            .filter(|tokens| !tokens.is_empty())
            .collect();
        Self { names, mode }
    }

    /// Creates a preference from the strict flag used at the wire boundary.
    pub fn from_strict<I, S>(names: I, strict: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mode = if strict { MatchMode::All } else { MatchMode::Any };
        Self::new(names, mode)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether no instructor names were given.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the meetings of a complete combination satisfy the preference.
    pub fn accepts(&self, meetings: &[&Meeting]) -> bool {
        if self.names.is_empty() {
            return true;
        }
        let taught = |name: &[String]| meetings.iter().any(|m| name_matches(name, m));
        match self.mode {
            MatchMode::All => self.names.iter().all(|n| taught(n.as_slice())),
            MatchMode::Any => self.names.iter().any(|n| taught(n.as_slice())),
        }
    }
}

fn name_matches(name: &[String], meeting: &Meeting) -> bool {
    meeting
        .instructor_tokens()
        .windows(name.len())
        .any(|window| window == name)
}
