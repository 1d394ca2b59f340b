//! JSON boundary.
//!
//! The wire format nests each course as a single-key map:
//!
//! ```json
//! [ { "Math 21": [ { "THX": [ { "Day": "TTh", "Time": "7:30AM-9:00AM", ... } ] } ] } ]
//! ```
//!
//! This module converts that shape to and from the flat model types, and
//! exposes a one-shot request/response envelope ([`WorkerRequest`],
//! [`WorkerResponse`], [`handle_message`]) for hosts that drive the
//! generator over a message channel.
//!
//! # Envelope
//!
//! | Direction | Shape |
//! |-----------|-------|
//! | request | `{ "type": "GENERATE_SCHEDULES", "payload": { "scrapedData", "forbiddenSlots", "preferredInstructors", "strictInstructorMatch" } }` |
//! | success | `{ "success": true, "data": { "generatedSchedules", "similarShapeCombinations" } }` |
//! | failure | `{ "success": false, "error": "..." }` |

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::generator::{GenerateRequest, GenerationOutcome, ScheduleGenerator};
use crate::models::{
    Combination, Course, ForbiddenSlots, InstructorPreference, Meeting, MeetingDetails, Section,
    Weekday,
};

/// `{ sectionName: [meeting, ...] }`
pub type WireSection = BTreeMap<String, Vec<WireMeeting>>;

/// `{ courseName: [section, ...] }`
pub type WireCourse = BTreeMap<String, Vec<WireSection>>;

/// One meeting as it appears on the wire.
///
/// Keys without a field of their own are kept in `extra` and written back
/// unchanged, so a meeting leaves the generator with every key it came in
/// with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMeeting {
    /// Day tokens, e.g. `"TTh"`.
    #[serde(rename = "Day")]
    pub day: String,
    /// Time range, e.g. `"7:30AM-9:00AM"`.
    #[serde(rename = "Time")]
    pub time: String,
    /// Room, empty when absent.
    #[serde(rename = "Room", default)]
    pub room: String,
    /// `"Last, First"` or plain names.
    #[serde(rename = "Instructors", default)]
    pub instructors: String,
    /// `0..=100`, `-100` when closed, `null` when unknown.
    #[serde(rename = "Probability", default)]
    pub probability: Option<f64>,
    /// Registration class code.
    #[serde(rename = "Class Code", default, skip_serializing_if = "Option::is_none")]
    pub class_code: Option<String>,
    /// Open seats.
    #[serde(rename = "Available Slots", default, skip_serializing_if = "Option::is_none")]
    pub available_slots: Option<i64>,
    /// Total seats.
    #[serde(rename = "Total Slots", default, skip_serializing_if = "Option::is_none")]
    pub total_slots: Option<i64>,
    /// Students requesting the section.
    #[serde(rename = "Demand", default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<i64>,
    /// Credit units.
    #[serde(rename = "Credits", default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<f64>,
    /// Every other key (e.g. `Remarks`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireMeeting {
    /// Parses day and time text into a [`Meeting`].
    pub fn to_meeting(&self) -> Result<Meeting> {
        Ok(Meeting::parse(self.day.as_str(), self.time.as_str())?
            .with_room(self.room.as_str())
            .with_instructors(self.instructors.as_str())
            .with_probability_opt(self.probability)
            .with_details(MeetingDetails {
                class_code: self.class_code.clone(),
                available_slots: self.available_slots,
                total_slots: self.total_slots,
                demand: self.demand,
                credits: self.credits,
                extra: self.extra.clone(),
            }))
    }
}

impl From<&Meeting> for WireMeeting {
    fn from(m: &Meeting) -> Self {
        Self {
            day: m.day_text().to_string(),
            time: m.time_text().to_string(),
            room: m.room.clone(),
            instructors: m.instructors().to_string(),
            probability: m.probability,
            class_code: m.details.class_code.clone(),
            available_slots: m.details.available_slots,
            total_slots: m.details.total_slots,
            demand: m.details.demand,
            credits: m.details.credits,
            extra: m.details.extra.clone(),
        }
    }
}

/// One forbidden cell as it appears on the wire: `{ "day": "Monday", "slot": 3 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSlot {
    /// Full weekday name, any case.
    #[serde(deserialize_with = "weekday_by_name")]
    pub day: Weekday,
    /// Half-hour slot index, 0 = 7:00 AM.
    pub slot: i32,
}

fn weekday_by_name<'de, D>(deserializer: D) -> std::result::Result<Weekday, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Weekday::from_name(&name)
        .ok_or_else(|| de::Error::custom(format!("unknown weekday '{name}'")))
}

/// Parses a JSON course catalog.
///
/// # Errors
/// [`Error::Json`] on malformed JSON, [`Error::InvalidInput`] when a course
/// or section map does not hold exactly one entry, and [`Error::TimeParse`]
/// on the first malformed time range.
pub fn parse_courses(json: &str) -> Result<Vec<Course>> {
    let catalog: Vec<WireCourse> = serde_json::from_str(json)?;
    courses_from_wire(catalog)
}

/// Converts the nested wire shape into courses, preserving order.
pub fn courses_from_wire(catalog: Vec<WireCourse>) -> Result<Vec<Course>> {
    catalog
        .into_iter()
        .map(|entry| {
            let (name, sections) = single_entry(entry, "course")?;
            let mut course = Course::new(name);
            for section_entry in sections {
                let (section_name, meetings) = single_entry(section_entry, "section")?;
                let mut section = Section::new(section_name);
                for meeting in &meetings {
                    section = section.with_meeting(meeting.to_meeting()?);
                }
                course = course.with_section(section);
            }
            Ok(course)
        })
        .collect()
}

/// Builds a forbidden-slot set from wire cells.
pub fn forbidden_from_wire(slots: &[WireSlot]) -> ForbiddenSlots {
    slots.iter().map(|s| (s.day, s.slot)).collect()
}

fn single_entry<V>(map: BTreeMap<String, V>, what: &str) -> Result<(String, V)> {
    if map.len() != 1 {
        return Err(Error::InvalidInput(format!(
            "expected one {what} per entry, found {}",
            map.len()
        )));
    }
    map.into_iter()
        .next()
        .ok_or_else(|| Error::InvalidInput(format!("empty {what} entry")))
}

/// Serializes a combination in the input's nested shape.
pub fn combination_to_wire(combination: &Combination<'_>) -> Vec<WireCourse> {
    combination
        .picks()
        .iter()
        .map(|pick| {
            let meetings = pick.section.meetings.iter().map(WireMeeting::from).collect();
            let section = WireSection::from([(pick.section.name.clone(), meetings)]);
            WireCourse::from([(pick.course.name.clone(), vec![section])])
        })
        .collect()
}

/// Generation output in wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    /// Ranked combinations.
    pub generated_schedules: Vec<Vec<WireCourse>>,
    /// Shape signature text → stored combinations with that shape.
    pub similar_shape_combinations: BTreeMap<String, Vec<Vec<WireCourse>>>,
}

impl GenerationReport {
    pub fn from_outcome(outcome: &GenerationOutcome<'_>) -> Self {
        let generated_schedules = outcome.schedules.iter().map(combination_to_wire).collect();
        let similar_shape_combinations = outcome
            .shapes
            .iter()
            .map(|(signature, bucket)| {
                (
                    signature.to_string(),
                    bucket.combinations.iter().map(combination_to_wire).collect(),
                )
            })
            .collect();
        Self {
            generated_schedules,
            similar_shape_combinations,
        }
    }
}

/// Generation request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePayload {
    pub scraped_data: Vec<WireCourse>,
    #[serde(default)]
    pub forbidden_slots: Vec<WireSlot>,
    #[serde(default)]
    pub preferred_instructors: Vec<String>,
    #[serde(default)]
    pub strict_instructor_match: bool,
}

/// Incoming message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum WorkerRequest {
    #[serde(rename = "GENERATE_SCHEDULES")]
    GenerateSchedules(GeneratePayload),
}

/// Outgoing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<GenerationReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkerResponse {
    pub fn ok(data: GenerationReport) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl WorkerRequest {
    /// Runs the request to completion. Failures become a failure response.
    pub fn respond(&self, generator: &ScheduleGenerator) -> WorkerResponse {
        match self {
            WorkerRequest::GenerateSchedules(payload) => match generate(payload, generator) {
                Ok(report) => WorkerResponse::ok(report),
                Err(e) => {
                    warn!(error = %e, "schedule generation failed");
                    WorkerResponse::failure(e.to_string())
                }
            },
        }
    }
}

fn generate(payload: &GeneratePayload, generator: &ScheduleGenerator) -> Result<GenerationReport> {
    let courses = courses_from_wire(payload.scraped_data.clone())?;
    let request = GenerateRequest::new(courses)
        .with_forbidden(forbidden_from_wire(&payload.forbidden_slots))
        .with_preference(InstructorPreference::from_strict(
            &payload.preferred_instructors,
            payload.strict_instructor_match,
        ));
    let outcome = generator.generate(&request)?;
    Ok(GenerationReport::from_outcome(&outcome))
}

/// Handles one JSON message with the default generator and returns the JSON
/// response. Never fails: malformed messages yield a failure response.
pub fn handle_message(message: &str) -> String {
    handle_message_with(message, &ScheduleGenerator::default())
}

/// Like [`handle_message`], with a caller-supplied generator.
pub fn handle_message_with(message: &str, generator: &ScheduleGenerator) -> String {
    let response = match serde_json::from_str::<WorkerRequest>(message) {
        Ok(request) => {
            debug!("handling worker request");
            request.respond(generator)
        }
        Err(e) => {
            warn!(error = %e, "rejected malformed worker message");
            WorkerResponse::failure(Error::from(e).to_string())
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        serde_json::json!({ "success": false, "error": e.to_string() }).to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample() -> Value {
        json!([
            { "Math 21": [
                { "THX": [ { "Day": "TTh", "Time": "7:30AM-9:00AM", "Room": "MB 101",
                             "Instructors": "Garcia, Maria", "Probability": 80.0,
                             "Class Code": "41001", "Credits": 3.0 } ] },
                { "WFX": [ { "Day": "WF", "Time": "7:30AM-9:00AM",
                             "Instructors": "Reyes, Jose", "Probability": null } ] }
            ] },
            { "Physics 71": [
                { "THY": [ { "Day": "TTh", "Time": "8:30-10AM",
                             "Instructors": "Santos, Ana", "Probability": 50.0 } ] }
            ] }
        ])
    }

    #[test]
    fn test_parse_courses() {
        let courses = parse_courses(&sample().to_string()).unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].name, "Math 21");
        assert_eq!(courses[0].sections[0].name, "THX");
        assert_eq!(courses[0].sections[1].name, "WFX");

        let m = &courses[0].sections[0].meetings[0];
        assert_eq!(m.room, "MB 101");
        assert_eq!(m.probability, Some(80.0));
        assert_eq!(m.details.class_code.as_deref(), Some("41001"));
        assert_eq!(m.details.credits, Some(3.0));
        assert_eq!(courses[0].sections[1].meetings[0].probability, None);
    }

    #[test]
    fn test_parse_rejects_multi_key_course() {
        let json = json!([{ "A": [], "B": [] }]).to_string();
        assert!(matches!(parse_courses(&json), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_parse_rejects_bad_time() {
        let json = json!([{ "A": [{ "S": [{ "Day": "M", "Time": "noon" }] }] }]).to_string();
        assert!(matches!(parse_courses(&json), Err(Error::TimeParse { .. })));
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(matches!(parse_courses("[{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_forbidden_slots() {
        let slots: Vec<WireSlot> =
            serde_json::from_value(json!([{ "day": "Monday", "slot": 3 }, { "day": "Friday", "slot": 0 }]))
                .unwrap();
        let forbidden = forbidden_from_wire(&slots);
        assert!(forbidden.contains(Weekday::Monday, 3));
        assert!(forbidden.contains(Weekday::Friday, 0));
        assert_eq!(forbidden.len(), 2);

        let lower: Vec<WireSlot> =
            serde_json::from_value(json!([{ "day": "monday", "slot": 1 }, { "day": " FRIDAY ", "slot": 2 }]))
                .unwrap();
        assert_eq!(lower[0].day, Weekday::Monday);
        assert_eq!(lower[1].day, Weekday::Friday);

        let bad: std::result::Result<Vec<WireSlot>, _> =
            serde_json::from_value(json!([{ "day": "Moonday", "slot": 3 }]));
        assert!(bad.is_err());
    }

    #[test]
    fn test_combination_keeps_input_shape() {
        let courses = parse_courses(&sample().to_string()).unwrap();
        let request = GenerateRequest::new(courses);
        let outcome = ScheduleGenerator::default().generate(&request).unwrap();
        let report = GenerationReport::from_outcome(&outcome);

        // THX conflicts with THY; only WFX + THY remains
        assert_eq!(report.generated_schedules.len(), 1);
        let value = serde_json::to_value(&report.generated_schedules[0]).unwrap();
        assert_eq!(value[0]["Math 21"][0]["WFX"][0]["Day"], "WF");
        assert_eq!(value[1]["Physics 71"][0]["THY"][0]["Probability"], 50.0);
        assert!(value[1]["Physics 71"][0]["THY"][0].get("Class Code").is_none());
        assert_eq!(report.similar_shape_combinations.len(), 1);
    }

    #[test]
    fn test_handle_message_success() {
        let message = json!({
            "type": "GENERATE_SCHEDULES",
            "payload": {
                "scrapedData": sample(),
                "forbiddenSlots": [],
                "preferredInstructors": ["santos"],
                "strictInstructorMatch": true
            }
        });
        let response: Value = serde_json::from_str(&handle_message(&message.to_string())).unwrap();

        assert_eq!(response["success"], true);
        let schedules = response["data"]["generatedSchedules"].as_array().unwrap();
        assert_eq!(schedules.len(), 1);
        assert!(response["data"]["similarShapeCombinations"].is_object());
        assert!(response.get("error").is_none());
    }

    #[test]
    fn test_unmodelled_keys_round_trip() {
        let message = json!({
            "type": "GENERATE_SCHEDULES",
            "payload": {
                "scrapedData": [{ "Chem 16": [{ "LAB": [{
                    "Day": "M", "Time": "8-9AM", "Instructors": "X", "Probability": 50.0,
                    "Remarks": "Lab req'd", "Section Type": { "kind": "lab" }
                }] }] }],
                "forbiddenSlots": [{ "day": "tuesday", "slot": 0 }]
            }
        });
        let response: Value = serde_json::from_str(&handle_message(&message.to_string())).unwrap();
        assert_eq!(response["success"], true);

        let meeting = &response["data"]["generatedSchedules"][0][0]["Chem 16"][0]["LAB"][0];
        assert_eq!(meeting["Remarks"], "Lab req'd");
        assert_eq!(meeting["Section Type"]["kind"], "lab");
        assert_eq!(meeting["Day"], "M");

        let shapes = response["data"]["similarShapeCombinations"].as_object().unwrap();
        let (_, bucket) = shapes.iter().next().unwrap();
        assert_eq!(bucket[0][0]["Chem 16"][0]["LAB"][0]["Remarks"], "Lab req'd");
    }

    #[test]
    fn test_extra_keys_reach_meeting_details() {
        let json = json!([{ "A": [{ "S": [{ "Day": "M", "Time": "8-9AM", "Remarks": "TBA room" }] }] }]);
        let courses = parse_courses(&json.to_string()).unwrap();
        let m = &courses[0].sections[0].meetings[0];
        assert_eq!(m.details.extra.get("Remarks"), Some(&json!("TBA room")));
        assert!(!m.details.extra.contains_key("Day"));

        let back = serde_json::to_value(WireMeeting::from(m)).unwrap();
        assert_eq!(back["Remarks"], "TBA room");
    }

    #[test]
    fn test_handle_message_forbidden_empties_output() {
        // Friday 7:30-9:00 covers slots 1..=4
        let message = json!({
            "type": "GENERATE_SCHEDULES",
            "payload": {
                "scrapedData": sample(),
                "forbiddenSlots": [{ "day": "Friday", "slot": 2 }]
            }
        });
        let response: Value = serde_json::from_str(&handle_message(&message.to_string())).unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["data"]["generatedSchedules"], json!([]));
        assert_eq!(response["data"]["similarShapeCombinations"], json!({}));
    }

    #[test]
    fn test_handle_message_failures() {
        let bad_time = json!({
            "type": "GENERATE_SCHEDULES",
            "payload": { "scrapedData": [{ "A": [{ "S": [{ "Day": "M", "Time": "8-9" }] }] }] }
        });
        let response: Value = serde_json::from_str(&handle_message(&bad_time.to_string())).unwrap();
        assert_eq!(response["success"], false);
        assert!(response["error"].as_str().unwrap().contains("8-9"));
        assert!(response.get("data").is_none());

        let unknown = json!({ "type": "CANCEL", "payload": {} }).to_string();
        let response: Value = serde_json::from_str(&handle_message(&unknown)).unwrap();
        assert_eq!(response["success"], false);

        let response: Value = serde_json::from_str(&handle_message("not json")).unwrap();
        assert_eq!(response["success"], false);
    }

    #[test]
    fn test_respond_with_custom_generator() {
        let payload: GeneratePayload = serde_json::from_value(json!({ "scrapedData": sample() })).unwrap();
        let request = WorkerRequest::GenerateSchedules(payload);
        let generator = ScheduleGenerator::new(
            crate::generator::GeneratorConfig::default().with_max_combinations(0),
        );
        let response = request.respond(&generator);
        assert!(!response.success);
        assert!(response.error.is_some());
    }
}
