//! Meeting model.
//!
//! A meeting is one weekly time block of a section: a day-token string, a
//! time range, a room, instructors, and an admission-probability estimate.
//! Day and time text are parsed once, at construction.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DaySet, TimeRange, Weekday};
use crate::error::Result;

/// Probability value marking a closed (effectively impossible) section.
pub const CLOSED_PROBABILITY: f64 = -100.0;

/// A single weekly meeting of a section.
///
/// Day and time text are stored next to their parsed forms, and the
/// instructor text next to its match tokens. Each pair changes together
/// through the setters, so the parsed side never goes stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Meeting {
    day_text: String,
    days: DaySet,
    time_text: String,
    time: TimeRange,
    instructors: String,
    instructor_tokens: Vec<String>,
    /// Room (free text).
    pub room: String,
    /// Admission probability in `[0, 100]`, [`CLOSED_PROBABILITY`], or
    /// `None` when unknown.
    pub probability: Option<f64>,
    /// Descriptive metadata carried through untouched.
    pub details: MeetingDetails,
}

/// Registration metadata the generator does not interpret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingDetails {
    /// Registration class code.
    pub class_code: Option<String>,
    /// Open seats.
    pub available_slots: Option<i64>,
    /// Total seats.
    pub total_slots: Option<i64>,
    /// Number of students requesting the section.
    pub demand: Option<i64>,
    /// Credit units.
    pub credits: Option<f64>,
    /// Any other keys the source attached (e.g. `Remarks`), in source form.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Meeting {
    /// Creates a meeting from day-token and time-range text.
    ///
    /// # Errors
    /// Fails if `time` is not a valid range (see [`TimeRange::parse`]).
    pub fn parse(day: impl Into<String>, time: impl Into<String>) -> Result<Self> {
        let day_text = day.into();
        let time_text = time.into();
        let time = TimeRange::parse(&time_text)?;
        Ok(Self {
            days: DaySet::parse(&day_text),
            day_text,
            time_text,
            time,
            room: String::new(),
            instructors: String::new(),
            probability: None,
            details: MeetingDetails::default(),
            instructor_tokens: Vec::new(),
        })
    }

    /// Day tokens as supplied (e.g. `"TTh"`).
    pub fn day_text(&self) -> &str {
        &self.day_text
    }

    /// Weekdays decomposed from the day text.
    pub fn days(&self) -> DaySet {
        self.days
    }

    /// Time range as supplied (e.g. `"7:30AM-9:00AM"`).
    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// Parsed time range.
    pub fn time(&self) -> TimeRange {
        self.time
    }

    /// Instructors (free text, `"Last, First"` or plain).
    pub fn instructors(&self) -> &str {
        &self.instructors
    }

    /// Replaces the day text and its decomposition.
    pub fn set_days(&mut self, day: impl Into<String>) {
        self.day_text = day.into();
        self.days = DaySet::parse(&self.day_text);
    }

    /// Replaces the time text and its parsed range.
    ///
    /// # Errors
    /// Fails, leaving the meeting unchanged, if `time` is not a valid range.
    pub fn set_time(&mut self, time: impl Into<String>) -> Result<()> {
        let time_text = time.into();
        self.time = TimeRange::parse(&time_text)?;
        self.time_text = time_text;
        Ok(())
    }

    /// Replaces the instructor text and its match tokens.
    pub fn set_instructors(&mut self, instructors: impl Into<String>) {
        self.instructors = instructors.into();
        self.instructor_tokens = tokenize_name(&self.instructors);
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    /// Sets the instructor text.
    pub fn with_instructors(mut self, instructors: impl Into<String>) -> Self {
        self.set_instructors(instructors);
        self
    }

    /// Sets the admission probability.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Sets an optional admission probability.
    pub fn with_probability_opt(mut self, probability: Option<f64>) -> Self {
        self.probability = probability;
        self
    }

    /// Sets registration metadata.
    pub fn with_details(mut self, details: MeetingDetails) -> Self {
        self.details = details;
        self
    }

    /// Whether two meetings overlap in both day and clock time.
    ///
    /// Compares exact clock times, not slot buckets, so back-to-back
    /// meetings (9:00 end, 9:00 start) do not conflict.
    #[inline]
    pub fn conflicts_with(&self, other: &Meeting) -> bool {
        self.days.intersects(other.days) && self.time.overlaps(&other.time)
    }

    /// Bucketed `(weekday, slot)` cells this meeting occupies.
    pub fn occupied_slots(&self) -> impl Iterator<Item = (Weekday, i32)> + '_ {
        let slots = self.time.slot_range();
        self.days
            .iter()
            .flat_map(move |day| slots.iter().map(move |slot| (day, slot)))
    }

    /// Probability as a `[0, 1]` factor; the closed sentinel and other
    /// negative values clamp to zero. `None` when unknown.
    pub fn probability_factor(&self) -> Option<f64> {
        self.probability.map(|p| p.max(0.0) / 100.0)
    }

    /// Whether the meeting carries the closed sentinel.
    pub fn is_closed(&self) -> bool {
        self.probability.is_some_and(|p| p <= CLOSED_PROBABILITY)
    }

    /// Lowercased, comma-free instructor words.
    pub fn instructor_tokens(&self) -> &[String] {
        &self.instructor_tokens
    }
}

/// Lowercases, removes commas, and splits on whitespace.
///
/// `"Garcia, Maria"` gives `["garcia", "maria"]`; `"Garcia,Maria"` gives
/// the single token `"garciamaria"`.
pub(crate) fn tokenize_name(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(',', "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(day: &str, time: &str) -> Meeting {
        Meeting::parse(day, time).unwrap()
    }

    #[test]
    fn test_meeting_builder() {
        let m = meeting("TTh", "10-11:30AM")
            .with_room("Rm 101")
            .with_instructors("Garcia, Maria")
            .with_probability(42.5)
            .with_details(MeetingDetails {
                demand: Some(30),
                ..Default::default()
            });

        assert_eq!(m.day_text(), "TTh");
        assert_eq!(m.days(), DaySet::parse("TTh"));
        assert_eq!(m.room, "Rm 101");
        assert_eq!(m.probability, Some(42.5));
        assert_eq!(m.details.demand, Some(30));
        assert_eq!(m.instructor_tokens(), &["garcia", "maria"]);
    }

    #[test]
    fn test_conflict_requires_shared_day() {
        let a = meeting("MWF", "8AM-9AM");
        let b = meeting("TTh", "8AM-9AM");
        let c = meeting("F", "8:30AM-10AM");
        assert!(!a.conflicts_with(&b));
        assert!(a.conflicts_with(&c));
        assert!(c.conflicts_with(&a));
    }

    #[test]
    fn test_back_to_back_no_conflict() {
        let a = meeting("M", "8AM-9AM");
        let b = meeting("M", "9AM-10AM");
        assert!(!a.conflicts_with(&b));
        // buckets overlap at slot 4, clock times do not
        assert!(a.time().slot_range().contains(4));
        assert!(b.time().slot_range().contains(4));
    }

    #[test]
    fn test_occupied_slots() {
        let m = meeting("MW", "7:30AM-8:30AM");
        let cells: Vec<_> = m.occupied_slots().collect();
        assert_eq!(
            cells,
            vec![
                (Weekday::Monday, 1),
                (Weekday::Monday, 2),
                (Weekday::Monday, 3),
                (Weekday::Wednesday, 1),
                (Weekday::Wednesday, 2),
                (Weekday::Wednesday, 3),
            ]
        );
    }

    #[test]
    fn test_probability_factor() {
        assert_eq!(meeting("M", "8-9AM").probability_factor(), None);
        assert_eq!(
            meeting("M", "8-9AM").with_probability(50.0).probability_factor(),
            Some(0.5)
        );
        let closed = meeting("M", "8-9AM").with_probability(CLOSED_PROBABILITY);
        assert_eq!(closed.probability_factor(), Some(0.0));
        assert!(closed.is_closed());
    }

    #[test]
    fn test_setters_keep_parsed_state() {
        let mut m = meeting("M", "8AM-9AM").with_instructors("Reyes, Jose");

        m.set_instructors("Santos, Ana");
        assert_eq!(m.instructors(), "Santos, Ana");
        assert_eq!(m.instructor_tokens(), &["santos", "ana"]);

        m.set_days("TTh");
        assert_eq!(m.day_text(), "TTh");
        assert_eq!(m.days(), DaySet::parse("TTh"));

        m.set_time("1-2:30PM").unwrap();
        assert_eq!(m.time_text(), "1-2:30PM");
        assert_eq!(m.time().duration_minutes(), 90);

        assert!(m.set_time("noon").is_err());
        assert_eq!(m.time_text(), "1-2:30PM");
    }

    #[test]
    fn test_comma_removed_not_split() {
        let spaced = meeting("M", "8-9AM").with_instructors("Garcia, Maria");
        let packed = meeting("M", "8-9AM").with_instructors("Garcia,Maria");
        assert_eq!(spaced.instructor_tokens(), &["garcia", "maria"]);
        assert_eq!(packed.instructor_tokens(), &["garciamaria"]);
    }

    #[test]
    fn test_bad_time_rejected() {
        assert!(Meeting::parse("M", "8-9").is_err());
    }
}
