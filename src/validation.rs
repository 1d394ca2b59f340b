//! Input validation for course catalogs.
//!
//! Checks structural integrity of courses before generation. Detects:
//! - Duplicate course names
//! - Duplicate section names within a course
//! - Courses with no sections and sections with no meetings
//! - Probabilities outside `[0, 100]` other than the closed sentinel
//! - Meetings whose day text has no recognizable day token
//!
//! Generation does not require a validated catalog; a course with no
//! sections simply yields no combinations.

use crate::models::{Course, CLOSED_PROBABILITY};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two courses share the same name.
    DuplicateCourse,
    /// Two sections of one course share the same name.
    DuplicateSection,
    /// A course has no sections.
    EmptyCourse,
    /// A section has no meetings.
    EmptySection,
    /// A probability is neither in `[0, 100]` nor the closed sentinel.
    ProbabilityOutOfRange,
    /// A meeting's day text contains no day token.
    NoMeetingDays,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a course catalog.
///
/// Checks:
/// 1. No duplicate course names
/// 2. No duplicate section names within a course
/// 3. Every course has at least one section
/// 4. Every section has at least one meeting
/// 5. Every known probability is in `[0, 100]` or equals the closed sentinel
/// 6. Every meeting names at least one day
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_courses(courses: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut course_names = HashSet::new();
    for course in courses {
        if !course_names.insert(course.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCourse,
                format!("Duplicate course: {}", course.name),
            ));
        }

        if course.sections.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCourse,
                format!("Course '{}' has no sections", course.name),
            ));
        }

        let mut section_names = HashSet::new();
        for section in &course.sections {
            if !section_names.insert(section.name.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateSection,
                    format!("Course '{}' has duplicate section '{}'", course.name, section.name),
                ));
            }

            if section.meetings.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptySection,
                    format!("Section '{} {}' has no meetings", course.name, section.name),
                ));
            }

            for meeting in &section.meetings {
                if let Some(p) = meeting.probability {
                    if !is_valid_probability(p) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::ProbabilityOutOfRange,
                            format!(
                                "Section '{} {}' has probability {} outside [0, 100]",
                                course.name, section.name, p
                            ),
                        ));
                    }
                }

                if meeting.days().is_empty() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::NoMeetingDays,
                        format!(
                            "Section '{} {}' meets on no recognizable day ('{}')",
                            course.name, section.name, meeting.day_text()
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_probability(p: f64) -> bool {
    (0.0..=100.0).contains(&p) || p == CLOSED_PROBABILITY
}
