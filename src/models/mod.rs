//! Timetable domain models.
//!
//! Provides the typed records the generator works on. The nested
//! `{course: [{section: [meeting]}]}` interchange shape exists only at the
//! wire boundary ([`crate::wire`]); inside the crate everything is a flat
//! `Course → Section → Meeting` hierarchy.
//!
//! # Domain Mappings
//!
//! | u-timetable | Registration system |
//! |-------------|---------------------|
//! | Course | Subject to enlist in |
//! | Section | Class offering (lecture + lab) |
//! | Meeting | Weekly class block |
//! | Combination | Enlistment plan |

mod combination;
mod constraint;
mod course;
mod day;
mod meeting;
mod time;

pub use combination::{Combination, Pick};
pub use constraint::{ForbiddenSlots, InstructorPreference, MatchMode};
pub use course::{Course, Section};
pub use day::{DaySet, Weekday};
pub use meeting::{Meeting, MeetingDetails, CLOSED_PROBABILITY};
pub use time::{ClockTime, SlotRange, TimeRange, SLOT_BASE_MINUTES, SLOT_MINUTES};
