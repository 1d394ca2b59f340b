//! Synthetic course catalogs.
//!
//! Generates random but well-formed catalogs for stress tests and
//! benchmarks. Output is fully determined by the config and seed.

use rand::prelude::*;

use crate::error::{Error, Result};
use crate::models::{ClockTime, Course, Meeting, Section, TimeRange, CLOSED_PROBABILITY};

/// Day patterns drawn for overlapping catalogs.
const DAY_PATTERNS: [&str; 9] = ["M", "T", "W", "Th", "F", "MW", "TTh", "WF", "MWF"];

/// Single days, one per disjoint course block.
const SINGLE_DAYS: [&str; 5] = ["M", "T", "W", "Th", "F"];

/// Slots in the teaching day (7:00 AM to 6:00 PM).
const SLOTS_PER_DAY: i32 = 22;

/// Configuration for generating catalogs.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Number of courses.
    pub num_courses: usize,
    /// Sections per course range (min, max).
    pub sections_per_course: (usize, usize),
    /// Meetings per section range (min, max).
    pub meetings_per_section: (usize, usize),
    /// Meeting duration range in 30-minute slots (min, max).
    pub duration_slots: (i32, i32),
    /// Size of the instructor pool.
    pub num_instructors: usize,
    /// Fraction of meetings marked closed.
    pub closed_fraction: f64,
    /// Fraction of meetings with no probability.
    pub unknown_fraction: f64,
    /// Give each course its own time block so no two courses ever conflict.
    pub disjoint_courses: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::small()
    }
}

impl CatalogConfig {
    /// A handful of courses with realistic overlap.
    pub fn small() -> Self {
        Self {
            num_courses: 5,
            sections_per_course: (2, 4),
            meetings_per_section: (1, 2),
            duration_slots: (2, 3),
            num_instructors: 8,
            closed_fraction: 0.1,
            unknown_fraction: 0.1,
            disjoint_courses: false,
        }
    }

    /// 10 courses of 20 sections each, pairwise disjoint course times:
    /// every one of the 20^10 assignments is conflict-free.
    pub fn explosive() -> Self {
        Self {
            num_courses: 10,
            sections_per_course: (20, 20),
            meetings_per_section: (1, 1),
            duration_slots: (2, 2),
            num_instructors: 40,
            closed_fraction: 0.0,
            unknown_fraction: 0.05,
            disjoint_courses: true,
        }
    }
}

/// Generates a catalog.
///
/// # Errors
/// [`Error::InvalidConfig`] if the disjoint layout does not fit in one week
/// or a range in the config is inverted.
pub fn generate_catalog(config: &CatalogConfig, seed: u64) -> Result<Vec<Course>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (min_dur, max_dur) = config.duration_slots;
    if min_dur < 1 || max_dur < min_dur {
        return Err(Error::InvalidConfig(format!(
            "duration range ({min_dur}, {max_dur}) is empty"
        )));
    }
    if config.sections_per_course.1 < config.sections_per_course.0
        || config.meetings_per_section.1 < config.meetings_per_section.0
    {
        return Err(Error::InvalidConfig("inverted count range".into()));
    }
    if config.disjoint_courses {
        let blocks_per_day = (SLOTS_PER_DAY / (max_dur + 1)) as usize;
        if config.num_courses > blocks_per_day * SINGLE_DAYS.len() {
            return Err(Error::InvalidConfig(format!(
                "{} disjoint courses do not fit in one week",
                config.num_courses
            )));
        }
    }

    (0..config.num_courses)
        .map(|i| {
            let (min_s, max_s) = config.sections_per_course;
            let num_sections = rng.random_range(min_s..=max_s);
            let mut course = Course::new(format!("Course {:02}", i));

            for s in 0..num_sections {
                let (min_m, max_m) = config.meetings_per_section;
                let num_meetings = rng.random_range(min_m..=max_m);
                let instructor = format!(
                    "Instructor{:02}, Staff",
                    rng.random_range(0..config.num_instructors.max(1))
                );
                let mut section = Section::new(format!("S{:02}", s));

                for _ in 0..num_meetings {
                    let (days, start, duration) = if config.disjoint_courses {
                        let block = (i / SINGLE_DAYS.len()) as i32;
                        (SINGLE_DAYS[i % SINGLE_DAYS.len()], block * (max_dur + 1), max_dur)
                    } else {
                        let duration = rng.random_range(min_dur..=max_dur);
                        let start = rng.random_range(0..=(SLOTS_PER_DAY - duration).max(0));
                        let days = DAY_PATTERNS[rng.random_range(0..DAY_PATTERNS.len())];
                        (days, start, duration)
                    };
                    let time = TimeRange::new(slot_time(start)?, slot_time(start + duration)?);
                    let meeting = Meeting::parse(days, time.to_string())?
                        .with_room(format!("Room {}", rng.random_range(100..400)))
                        .with_instructors(instructor.as_str())
                        .with_probability_opt(random_probability(&mut rng, config));
                    section = section.with_meeting(meeting);
                }
                course = course.with_section(section);
            }
            Ok(course)
        })
        .collect()
}

fn slot_time(slot: i32) -> Result<ClockTime> {
    let minutes = 7 * 60 + slot * 30;
    u16::try_from(minutes)
        .ok()
        .and_then(|m| ClockTime::from_hm(m / 60, m % 60))
        .ok_or_else(|| Error::InvalidConfig(format!("slot {slot} is outside the day")))
}

fn random_probability(rng: &mut StdRng, config: &CatalogConfig) -> Option<f64> {
    if rng.random_bool(config.closed_fraction.clamp(0.0, 1.0)) {
        Some(CLOSED_PROBABILITY)
    } else if rng.random_bool(config.unknown_fraction.clamp(0.0, 1.0)) {
        None
    } else {
        Some(f64::from(rng.random_range(1..=1000u16)) / 10.0)
    }
}
