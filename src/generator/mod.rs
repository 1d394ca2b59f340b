//! Schedule combination generator.
//!
//! Enumerates conflict-free section combinations with a pruned
//! backtracking search, ranks them by combined admission probability, and
//! clusters them by weekly time shape.
//!
//! # Pipeline
//!
//! 1. Search ([`search`]): forbidden-slot and conflict pruning, instructor
//!    filter at leaves, hard cap on accepted leaves.
//! 2. Probability ([`combined_probability`]) per accepted combination.
//! 3. Shape bucketing ([`ShapeSignature`]) per accepted combination.
//! 4. Ranking: stable sort by descending probability.
//!
//! Each call owns its search state; a [`ScheduleGenerator`] holds only
//! configuration and may be shared across threads.

mod config;
mod probability;
mod search;
mod shape;
mod stats;

pub use config::{GeneratorConfig, DEFAULT_MAX_COMBINATIONS, DEFAULT_MAX_PER_SHAPE};
pub use probability::{combined_probability, shape_probability};
pub use shape::{ShapeBucket, ShapeBuckets, ShapeSignature};
pub use stats::GenerationStats;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{Combination, Course, ForbiddenSlots, InstructorPreference};
use search::SearchPlan;

/// Input container for generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Courses to fill, in output order.
    pub courses: Vec<Course>,
    /// Cells the student cannot attend.
    pub forbidden: ForbiddenSlots,
    /// Instructor filter for complete combinations.
    pub preference: InstructorPreference,
}

impl GenerateRequest {
    /// Creates a request with no forbidden slots and no instructor filter.
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            ..Default::default()
        }
    }

    /// Sets forbidden slots.
    pub fn with_forbidden(mut self, forbidden: ForbiddenSlots) -> Self {
        self.forbidden = forbidden;
        self
    }

    /// Sets the instructor preference.
    pub fn with_preference(mut self, preference: InstructorPreference) -> Self {
        self.preference = preference;
        self
    }
}

/// Result of one generation call.
#[derive(Debug, Clone)]
pub struct GenerationOutcome<'a> {
    /// Accepted combinations, non-increasing in combined probability.
    pub schedules: Vec<Combination<'a>>,
    /// Accepted combinations grouped by shape signature.
    pub shapes: ShapeBuckets<'a>,
    /// Search counters.
    pub stats: GenerationStats,
}

impl GenerationOutcome<'_> {
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

/// Schedule combination generator.
///
/// # Example
///
/// ```
/// use u_timetable::generator::{GenerateRequest, ScheduleGenerator};
/// use u_timetable::models::{Course, Meeting, Section};
///
/// let courses = vec![
///     Course::new("Math 21")
///         .with_section(Section::new("THX").with_meeting(
///             Meeting::parse("TTh", "7:30AM-9:00AM").unwrap().with_probability(80.0),
///         ))
///         .with_section(Section::new("WFX").with_meeting(
///             Meeting::parse("WF", "7:30AM-9:00AM").unwrap().with_probability(40.0),
///         )),
///     Course::new("Physics 71").with_section(Section::new("THY").with_meeting(
///         Meeting::parse("TTh", "8:30-10AM").unwrap().with_probability(90.0),
///     )),
/// ];
/// let request = GenerateRequest::new(courses);
///
/// let outcome = ScheduleGenerator::default().generate(&request).unwrap();
/// assert_eq!(outcome.schedules.len(), 1);
/// assert_eq!(outcome.schedules[0].picks()[0].section.name, "WFX");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    config: GeneratorConfig,
}

impl ScheduleGenerator {
    /// Creates a generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates ranked, shape-clustered combinations for a request.
    ///
    /// Zero courses yields an empty outcome. Hitting the cap is not an
    /// error; check [`GenerationStats::capped`].
    ///
    /// # Errors
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
    /// configuration does not validate.
    pub fn generate<'a>(&self, request: &'a GenerateRequest) -> Result<GenerationOutcome<'a>> {
        self.config.validate()?;

        let section_total: usize = request.courses.iter().map(|c| c.sections.len()).sum();
        debug!(
            courses = request.courses.len(),
            sections = section_total,
            forbidden = request.forbidden.len(),
            "starting combination search"
        );

        let plan = SearchPlan::new(
            &request.courses,
            &request.forbidden,
            &request.preference,
            &self.config,
        );
        let mut frame = plan.run(self.config.max_per_shape);

        frame
            .accepted
            .sort_by(|a, b| b.probability().total_cmp(&a.probability()));
        frame.shapes.rank();
        frame.stats.shapes = frame.shapes.len();

        if frame.stats.capped {
            warn!(
                cap = self.config.max_combinations,
                "combination cap reached, output truncated"
            );
        }
        info!(stats = %frame.stats, "combination search finished");

        Ok(GenerationOutcome {
            schedules: frame.accepted,
            shapes: frame.shapes,
            stats: frame.stats,
        })
    }
}
