//! Clock times, meeting time ranges, and half-hour slot arithmetic.
//!
//! # Slot Model
//!
//! The day is divided into 30-minute slots counted from 7:00 AM:
//! slot 0 = 7:00–7:30, slot 1 = 7:30–8:00, and so on. Times before 7:00
//! map to negative slots.
//!
//! Two views of a range exist:
//! - [`TimeRange::slot_span`]: exact fractional slots, for positioning and
//!   span arithmetic (`7:15` → `0.5`).
//! - [`TimeRange::slot_range`]: bucketed inclusive integer range, start
//!   floored and end ceiled. Coarser on purpose: adjacent slots count as
//!   occupied. Every slot-set membership test (forbidden slots, shape
//!   signatures) uses this view.
//!
//! # Text Format
//!
//! `"<start>-<end>"` where `<end>` carries `AM`/`PM` and `<start>` inherits it
//! when absent: `"7:30AM-9:00AM"`, `"1-2:30PM"`, `"10-11AM"`.

use std::fmt;

use crate::error::{Error, Result};

/// Minutes since midnight of slot 0 (7:00 AM).
pub const SLOT_BASE_MINUTES: i32 = 7 * 60;
/// Width of one slot in minutes.
pub const SLOT_MINUTES: i32 = 30;

/// A wall-clock time of day, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Creates a time from a 24-hour hour and minute.
    ///
    /// Returns `None` if out of range.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| Self(hour * 60 + minute))
    }

    pub fn minutes(self) -> i32 {
        i32::from(self.0)
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Fractional slot index of this instant.
    pub fn slot(self) -> f64 {
        f64::from(self.minutes() - SLOT_BASE_MINUTES) / f64::from(SLOT_MINUTES)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, suffix) = match self.hour() {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "{}:{:02}{}", hour, self.minute(), suffix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// One side of a range before meridiem resolution.
struct RawTime {
    hour: u16,
    minute: u16,
    meridiem: Option<Meridiem>,
}

impl RawTime {
    fn resolve(&self, meridiem: Meridiem) -> ClockTime {
        let hour = match (meridiem, self.hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, h) => h + 12,
        };
        ClockTime(hour * 60 + self.minute)
    }
}

/// Parses `H[:MM][AM|PM]`.
fn parse_side(side: &str) -> std::result::Result<RawTime, String> {
    let upper = side.trim().to_ascii_uppercase();
    let (digits, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(Meridiem::Am))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(Meridiem::Pm))
    } else {
        (upper.as_str(), None)
    };

    let (hour_text, minute_text) = match digits.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (digits, None),
    };

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(hour_text) || hour_text.len() > 2 {
        return Err(format!("'{}' does not match H[:MM]", side.trim()));
    }
    let hour: u16 = hour_text
        .parse()
        .map_err(|_| format!("bad hour in '{}'", side.trim()))?;
    let minute: u16 = match minute_text {
        Some(m) if m.len() == 2 && is_digits(m) => m
            .parse()
            .map_err(|_| format!("bad minute in '{}'", side.trim()))?,
        Some(_) => return Err(format!("'{}' does not match H[:MM]", side.trim())),
        None => 0,
    };

    if !(1..=12).contains(&hour) {
        return Err(format!("hour {hour} is not on a 12-hour clock"));
    }
    if minute >= 60 {
        return Err(format!("minute {minute} out of range"));
    }

    Ok(RawTime {
        hour,
        minute,
        meridiem,
    })
}

/// A half-open meeting time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// Start of the meeting (inclusive).
    pub start: ClockTime,
    /// End of the meeting (exclusive).
    pub end: ClockTime,
}

impl TimeRange {
    /// Creates a range from two clock times.
    pub fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }

    /// Parses `"<start>-<end>"`.
    ///
    /// `<end>` must carry `AM`/`PM`. A `<start>` without a suffix takes the
    /// end's suffix, except that an inherited `PM` that would put the start
    /// at or after the end is read as `AM` (`"11-1PM"` is 11:00–13:00).
    ///
    /// # Errors
    /// [`Error::TimeParse`] when a side is malformed, the end lacks a
    /// meridiem, or the range is empty or inverted.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_timetable::models::TimeRange;
    ///
    /// let r = TimeRange::parse("7:30AM-9:00AM").unwrap();
    /// assert_eq!(r.slot_span(), (1.0, 4.0));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let (start_text, end_text) = text
            .split_once('-')
            .ok_or_else(|| Error::time_parse(text, "expected '<start>-<end>'"))?;

        let raw_end = parse_side(end_text).map_err(|r| Error::time_parse(text, r))?;
        let end_meridiem = raw_end
            .meridiem
            .ok_or_else(|| Error::time_parse(text, "end time lacks AM/PM"))?;
        let end = raw_end.resolve(end_meridiem);

        let raw_start = parse_side(start_text).map_err(|r| Error::time_parse(text, r))?;
        let start = match raw_start.meridiem {
            Some(m) => raw_start.resolve(m),
            None => {
                let inherited = raw_start.resolve(end_meridiem);
                if end_meridiem == Meridiem::Pm && inherited >= end {
                    raw_start.resolve(Meridiem::Am)
                } else {
                    inherited
                }
            }
        };

        if end <= start {
            return Err(Error::time_parse(text, "end is not after start"));
        }

        Ok(Self { start, end })
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> i32 {
        self.end.minutes() - self.start.minutes()
    }

    /// Whether two ranges overlap (`start1 < end2 && start2 < end1`).
    ///
    /// Touching ranges (one ends when the other starts) do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Exact fractional slot pair `(start, end)`.
    pub fn slot_span(&self) -> (f64, f64) {
        (self.start.slot(), self.end.slot())
    }

    /// Bucketed inclusive slot range: start floored, end ceiled.
    pub fn slot_range(&self) -> SlotRange {
        let (start, end) = self.slot_span();
        SlotRange::new(start.floor() as i32, end.ceil() as i32)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// An inclusive range of integer slot indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRange {
    /// First occupied slot.
    pub first: i32,
    /// Last occupied slot (inclusive).
    pub last: i32,
}

impl SlotRange {
    /// Creates the range `first..=last`; empty when `last < first`.
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    /// Whether `slot` lies in the range, bounds included.
    #[inline]
    pub fn contains(&self, slot: i32) -> bool {
        slot >= self.first && slot <= self.last
    }

    /// Iterates every slot in the range.
    pub fn iter(&self) -> std::ops::RangeInclusive<i32> {
        self.first..=self.last
    }

    /// Number of slots covered.
    pub fn len(&self) -> usize {
        (self.last - self.first + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u16, m: u16) -> ClockTime {
        ClockTime::from_hm(h, m).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let r = TimeRange::parse("7:30AM-9:00AM").unwrap();
        assert_eq!(r.start, t(7, 30));
        assert_eq!(r.end, t(9, 0));
        assert_eq!(r.duration_minutes(), 90);
    }

    #[test]
    fn test_slot_span_and_range() {
        let r = TimeRange::parse("7:30AM-9:00AM").unwrap();
        assert_eq!(r.slot_span(), (1.0, 4.0));
        assert_eq!(r.slot_range(), SlotRange::new(1, 4));
        assert_eq!(r.slot_range().len(), 4);
    }

    #[test]
    fn test_fractional_slots() {
        let r = TimeRange::parse("7:15AM-8:45AM").unwrap();
        assert_eq!(r.slot_span(), (0.5, 3.5));
        // floor start, ceil end
        assert_eq!(r.slot_range(), SlotRange::new(0, 4));
    }

    #[test]
    fn test_start_inherits_meridiem() {
        let r = TimeRange::parse("1-2:30PM").unwrap();
        assert_eq!(r.start, t(13, 0));
        assert_eq!(r.end, t(14, 30));

        let r = TimeRange::parse("10-11AM").unwrap();
        assert_eq!(r.start, t(10, 0));
        assert_eq!(r.end, t(11, 0));
    }

    #[test]
    fn test_inherited_pm_crossing_noon() {
        let r = TimeRange::parse("11-1PM").unwrap();
        assert_eq!(r.start, t(11, 0));
        assert_eq!(r.end, t(13, 0));

        let r = TimeRange::parse("11:30-12PM").unwrap();
        assert_eq!(r.start, t(11, 30));
        assert_eq!(r.end, t(12, 0));
    }

    #[test]
    fn test_twelve_oclock_rules() {
        let r = TimeRange::parse("12PM-1PM").unwrap();
        assert_eq!(r.start, t(12, 0));
        let r = TimeRange::parse("12AM-1AM").unwrap();
        assert_eq!(r.start, t(0, 0));
    }

    #[test]
    fn test_case_and_whitespace() {
        let r = TimeRange::parse(" 4:00pm - 5:30pm ").unwrap();
        assert_eq!(r.start, t(16, 0));
        assert_eq!(r.end, t(17, 30));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            TimeRange::parse("7:30-9:00"),
            Err(Error::TimeParse { .. })
        ));
        assert!(TimeRange::parse("TBA").is_err());
        assert!(TimeRange::parse("7:3AM-9AM").is_err());
        assert!(TimeRange::parse("13:00PM-2PM").is_err());
        assert!(TimeRange::parse("7:61AM-9AM").is_err());
        assert!(TimeRange::parse("abc-9AM").is_err());
        assert!(TimeRange::parse("9AM-9AM").is_err());
        assert!(TimeRange::parse("10AM-9AM").is_err());
    }

    #[test]
    fn test_error_mentions_input() {
        let err = TimeRange::parse("7:30-9:00").unwrap_err();
        assert!(err.to_string().contains("7:30-9:00"));
        assert!(err.to_string().contains("AM/PM"));
    }

    #[test]
    fn test_overlap_half_open() {
        let a = TimeRange::parse("8AM-9AM").unwrap();
        let b = TimeRange::parse("8:30AM-10AM").unwrap();
        let c = TimeRange::parse("9AM-10AM").unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_early_morning_negative_slots() {
        let r = TimeRange::parse("6AM-7AM").unwrap();
        assert_eq!(r.slot_span(), (-2.0, 0.0));
        assert_eq!(r.slot_range(), SlotRange::new(-2, 0));
    }

    #[test]
    fn test_display() {
        let r = TimeRange::parse("1-2:30PM").unwrap();
        assert_eq!(r.to_string(), "1:00PM-2:30PM");
        assert_eq!(t(0, 5).to_string(), "12:05AM");
    }
}
