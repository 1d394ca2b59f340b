//! Weekday tokens and day-set decomposition.
//!
//! Registration systems write meeting days as compact token strings such as
//! `"MWF"` or `"TTh"`. A token string decomposes into the set of single
//! weekdays it names; there is no compound day entry.
//!
//! # Tokens
//!
//! | Token | Day |
//! |-------|-----|
//! | `M` | Monday |
//! | `T` | Tuesday |
//! | `W` | Wednesday |
//! | `Th` | Thursday |
//! | `F` | Friday |
//! | `S` | Saturday |
//! | `Su` | Sunday |
//!
//! Two-letter tokens are matched before their one-letter prefixes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Token `M`.
    Monday,
    /// Token `T`.
    Tuesday,
    /// Token `W`.
    Wednesday,
    /// Token `Th`.
    Thursday,
    /// Token `F`.
    Friday,
    /// Token `S`.
    Saturday,
    /// Token `Su`.
    Sunday,
}

/// Token table in match order (longest first).
const TOKENS: [(&str, Weekday); 7] = [
    ("Th", Weekday::Thursday),
    ("Su", Weekday::Sunday),
    ("M", Weekday::Monday),
    ("T", Weekday::Tuesday),
    ("W", Weekday::Wednesday),
    ("F", Weekday::Friday),
    ("S", Weekday::Saturday),
];

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Zero-based index, Monday = 0.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Compact registration token (`"M"`, `"Th"`, ...).
    pub fn token(self) -> &'static str {
        match self {
            Weekday::Monday => "M",
            Weekday::Tuesday => "T",
            Weekday::Wednesday => "W",
            Weekday::Thursday => "Th",
            Weekday::Friday => "F",
            Weekday::Saturday => "S",
            Weekday::Sunday => "Su",
        }
    }

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Looks up a weekday by full name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of weekdays, stored as a 7-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Decomposes a compact token string into its weekdays.
    ///
    /// Matching is greedy and longest-token-first; characters that start no
    /// known token are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_timetable::models::{DaySet, Weekday};
    ///
    /// let days = DaySet::parse("TTh");
    /// assert_eq!(days.iter().collect::<Vec<_>>(), vec![Weekday::Tuesday, Weekday::Thursday]);
    /// ```
    pub fn parse(tokens: &str) -> Self {
        let mut set = Self::empty();
        let mut rest = tokens;
        while !rest.is_empty() {
            match TOKENS.iter().find(|(tok, _)| rest.starts_with(tok)) {
                Some(&(tok, day)) => {
                    set.insert(day);
                    rest = &rest[tok.len()..];
                }
                None => {
                    let skip = rest.chars().next().map_or(1, char::len_utf8);
                    rest = &rest[skip..];
                }
            }
        }
        set
    }

    /// Adds a weekday.
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.index();
    }

    /// Adds a weekday (builder form).
    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    /// Whether the set contains `day`.
    #[inline]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.index()) != 0
    }

    /// Whether the two sets share at least one weekday.
    #[inline]
    pub fn intersects(self, other: DaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the contained weekdays, Monday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.iter() {
            f.write_str(day.token())?;
        }
        Ok(())
    }
}
