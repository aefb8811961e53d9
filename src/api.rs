//! JSON solve contract.
//!
//! Wire-level request/response types and the conversion into a typed
//! [`Problem`]. Optional fields are defaulted here, once:
//!
//! | Field | Missing means |
//! |-------|---------------|
//! | `duration` | 1 slot |
//! | `students` | capacity is not checked |
//! | `preferred` | no preference |
//! | `teachers` / `groups` entry | always available |
//! | `rooms` (or an empty map) | room checking skipped for every section |
//! | `preassign` | no locks |
//!
//! Every failure, including malformed JSON, is reported as
//! `{"ok": false, "message": ...}`; a schedule is only ever returned whole.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::models::{Placement, Problem, Resource, Room, RoomCatalog, Section, Timeslots, Timetable};
use crate::solver::{SolveError, SolveErrorKind, SolverConfig, TimetableSolver};

/// A solve request as received on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Slot labels in contiguity order.
    #[serde(default)]
    pub timeslots: Vec<String>,
    /// Sections to place.
    #[serde(default)]
    pub sections: Vec<SectionInput>,
    /// Teacher unavailability by id.
    #[serde(default)]
    pub teachers: BTreeMap<String, AvailabilityInput>,
    /// Group unavailability by id.
    #[serde(default)]
    pub groups: BTreeMap<String, AvailabilityInput>,
    /// Room catalog by id.
    #[serde(default)]
    pub rooms: BTreeMap<String, RoomInput>,
    /// Locked placements by section id.
    #[serde(default)]
    pub preassign: BTreeMap<String, PlacementInput>,
}

/// A section as received on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionInput {
    pub id: String,
    pub teacher: String,
    pub group: String,
    /// Slot count; must be at least 1 when given.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub students: Option<u32>,
    #[serde(default)]
    pub preferred: Option<Vec<String>>,
}

/// Unavailability of a teacher or group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityInput {
    #[serde(default)]
    pub unavailable: BTreeSet<String>,
}

/// A room as received on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomInput {
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub unavailable: BTreeSet<String>,
}

/// A locked placement: either `["Mon-1", "R101"]` / `["Mon-1", null]` or
/// `{"start": "Mon-1", "room": "R101"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlacementInput {
    Pair(String, Option<String>),
    Record {
        start: String,
        #[serde(default)]
        room: Option<String>,
    },
}

impl From<PlacementInput> for Placement {
    fn from(input: PlacementInput) -> Self {
        let (start, room) = match input {
            PlacementInput::Pair(start, room) => (start, room),
            PlacementInput::Record { start, room } => (start, room),
        };
        Placement { start, room }
    }
}

impl TryFrom<SectionInput> for Section {
    type Error = SolveError;

    fn try_from(input: SectionInput) -> Result<Self, Self::Error> {
        let duration = match input.duration {
            None => 1,
            Some(d) => u32::try_from(d).ok().filter(|&d| d >= 1).ok_or_else(|| {
                SolveError::new(
                    SolveErrorKind::Configuration,
                    format!("Section '{}' has invalid duration {d}", input.id),
                )
                .for_section(&input.id)
            })?,
        };

        Ok(Section {
            id: input.id,
            teacher: input.teacher,
            group: input.group,
            duration,
            students: input.students,
            preferred: input.preferred.unwrap_or_default(),
        })
    }
}

impl TryFrom<SolveRequest> for Problem {
    type Error = SolveError;

    fn try_from(request: SolveRequest) -> Result<Self, Self::Error> {
        let sections = request
            .sections
            .into_iter()
            .map(Section::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let resources = |inputs: BTreeMap<String, AvailabilityInput>| {
            inputs
                .into_iter()
                .map(|(id, a)| {
                    let resource = Resource {
                        id: id.clone(),
                        unavailable: a.unavailable,
                    };
                    (id, resource)
                })
                .collect::<BTreeMap<_, _>>()
        };

        let rooms = RoomCatalog::from_rooms(request.rooms.into_iter().map(|(id, r)| Room {
            id,
            capacity: r.capacity,
            unavailable: r.unavailable,
        }));

        Ok(Problem {
            timeslots: Timeslots::new(request.timeslots),
            sections,
            teachers: resources(request.teachers),
            groups: resources(request.groups),
            rooms,
            preassign: request
                .preassign
                .into_iter()
                .map(|(id, p)| (id, p.into()))
                .collect(),
        })
    }
}

/// The wire response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Timetable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SolveResponse {
    /// A successful response carrying the whole timetable.
    pub fn solved(schedule: Timetable) -> Self {
        Self {
            ok: true,
            schedule: Some(schedule),
            message: None,
        }
    }

    /// A failed response with a diagnostic.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            schedule: None,
            message: Some(message.into()),
        }
    }
}

impl From<Result<Timetable, SolveError>> for SolveResponse {
    fn from(result: Result<Timetable, SolveError>) -> Self {
        match result {
            Ok(timetable) => Self::solved(timetable),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

/// Solves a decoded request.
pub fn solve_request(request: SolveRequest, config: &SolverConfig) -> SolveResponse {
    let result = Problem::try_from(request).and_then(|problem| {
        TimetableSolver::with_config(config.clone())
            .solve(&problem)
            .map(|solution| solution.timetable)
    });
    result.into()
}

/// Solves a JSON-encoded request and returns the response value.
///
/// # Examples
///
/// ```
/// use u_timetable::api::solve_json;
/// use u_timetable::solver::SolverConfig;
///
/// let response = solve_json(
///     r#"{"timeslots": ["S1", "S2"],
///         "sections": [{"id": "A", "teacher": "T1", "group": "G1", "duration": 2}]}"#,
///     &SolverConfig::default(),
/// );
/// assert!(response.ok);
/// let schedule = response.schedule.unwrap();
/// assert_eq!(schedule.get("A").unwrap().slots, vec!["S1", "S2"]);
/// ```
pub fn solve_json(input: &str, config: &SolverConfig) -> SolveResponse {
    match serde_json::from_str::<SolveRequest>(input) {
        Ok(request) => solve_request(request, config),
        Err(e) => {
            warn!(error = %e, "rejected malformed request");
            SolveResponse::failed(format!("invalid request: {e}"))
        }
    }
}
