//! Course timetable combination generator.
//!
//! Given the courses a student wants and each course's candidate sections,
//! enumerates every conflict-free pick of one section per course, drops
//! picks that touch forbidden time cells or miss preferred instructors,
//! ranks the rest by combined admission probability, and clusters them by
//! weekly time shape.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Section`, `Meeting`, `DaySet`,
//!   `TimeRange`, `ForbiddenSlots`, `InstructorPreference`, `Combination`
//! - **`generator`**: Pruned backtracking search, probability aggregation,
//!   shape buckets, configuration and statistics
//! - **`validation`**: Catalog integrity checks (duplicate names, empty
//!   courses, probability range, day tokens)
//! - **`wire`**: JSON boundary and one-shot request/response envelope
//! - **`synthetic`**: Seeded random catalogs for stress tests and benchmarks
//!
//! # Example
//!
//! ```
//! use u_timetable::wire::handle_message;
//!
//! let request = r#"{
//!     "type": "GENERATE_SCHEDULES",
//!     "payload": {
//!         "scrapedData": [
//!             { "Math 21": [ { "THX": [ { "Day": "TTh", "Time": "7:30AM-9:00AM",
//!                                         "Instructors": "Garcia, Maria", "Probability": 80 } ] } ] }
//!         ],
//!         "forbiddenSlots": [ { "day": "Monday", "slot": 0 } ]
//!     }
//! }"#;
//! let response = handle_message(request);
//! assert!(response.contains(r#""success":true"#));
//! ```
//!
//! # Logging
//!
//! Emits `tracing` events; installs no subscriber.

pub mod error;
pub mod generator;
pub mod models;
pub mod synthetic;
pub mod validation;
pub mod wire;

pub use error::{Error, Result};
