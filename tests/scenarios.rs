//! End-to-end solve scenarios through the typed API and the JSON contract.

use serde_json::json;
use u_timetable::api::{solve_json, SolveRequest, SolveResponse};
use u_timetable::models::{Placement, Problem, Resource, Room, Section, Timeslots};
use u_timetable::solver::{SolveErrorKind, SolverConfig, TimetableSolver};
use u_timetable::validation::verify_timetable;

fn solve_value(value: serde_json::Value) -> SolveResponse {
    solve_json(&value.to_string(), &SolverConfig::default())
}

fn slots(labels: &[&str]) -> Timeslots {
    Timeslots::new(labels.iter().copied())
}

// ===========================================================================
// Basic scenarios
// ===========================================================================

#[test]
fn test_single_section_is_placed() {
    let p = Problem::new(slots(&["S1", "S2", "S3"])).with_section(Section::new("A", "T1", "G1"));
    let t = TimetableSolver::new().solve(&p).unwrap().timetable;
    let start = t.start_of("A").unwrap();
    assert!(["S1", "S2", "S3"].contains(&start));
    assert_eq!(t.get("A").unwrap().room, None);

    let response = solve_value(json!({
        "timeslots": ["S1", "S2", "S3"],
        "sections": [{"id": "A", "teacher": "T1", "group": "G1", "duration": 1}]
    }));
    assert!(response.ok);
    assert_eq!(response.schedule.unwrap().get("A").unwrap().slots.len(), 1);
}

#[test]
fn test_shared_teacher_needs_two_slots() {
    let p = Problem::new(slots(&["S1", "S2"]))
        .with_section(Section::new("A", "T1", "G1"))
        .with_section(Section::new("B", "T1", "G2"));
    let t = TimetableSolver::new().solve(&p).unwrap().timetable;
    assert_ne!(t.start_of("A"), t.start_of("B"));

    let p = Problem {
        timeslots: slots(&["S1"]),
        ..p
    };
    let err = TimetableSolver::new().solve(&p).unwrap_err();
    assert!(err.is_no_solution());

    let response = solve_value(json!({
        "timeslots": ["S1"],
        "sections": [
            {"id": "A", "teacher": "T1", "group": "G1"},
            {"id": "B", "teacher": "T1", "group": "G2"}
        ]
    }));
    assert!(!response.ok);
    assert!(response.schedule.is_none());
}

#[test]
fn test_run_through_unavailable_slot_fails() {
    let p = Problem::new(slots(&["S1", "S2"]))
        .with_section(Section::new("A", "T1", "G1").with_duration(2))
        .with_teacher(Resource::new("T1").with_unavailable("S2"));
    let err = TimetableSolver::new().solve(&p).unwrap_err();
    assert_eq!(err.kind, SolveErrorKind::Infeasible);
    assert_eq!(err.section.as_deref(), Some("A"));

    let response = solve_value(json!({
        "timeslots": ["S1", "S2"],
        "sections": [{"id": "A", "teacher": "T1", "group": "G1", "duration": 2}],
        "teachers": {"T1": {"unavailable": ["S2"]}}
    }));
    assert!(!response.ok);
}

#[test]
fn test_lock_on_unavailable_slot_is_rejected() {
    let p = Problem::new(slots(&["S1", "S2"]))
        .with_section(Section::new("A", "T1", "G1"))
        .with_teacher(Resource::new("T1").with_unavailable("S1"))
        .with_preassignment("A", Placement::at("S1"));
    let err = TimetableSolver::new().solve(&p).unwrap_err();
    assert_eq!(err.kind, SolveErrorKind::ConstraintViolation);
    assert!(err.is_no_solution());

    let response = solve_value(json!({
        "timeslots": ["S1", "S2"],
        "sections": [{"id": "A", "teacher": "T1", "group": "G1"}],
        "teachers": {"T1": {"unavailable": ["S1"]}},
        "preassign": {"A": ["S1", null]}
    }));
    assert!(!response.ok);
    assert!(response.message.unwrap().starts_with("constraint violation"));
}

// ===========================================================================
// Locks, rooms, capacity
// ===========================================================================

fn school_week() -> serde_json::Value {
    json!({
        "timeslots": ["Mon-1", "Mon-2", "Mon-3", "Mon-4", "Tue-1", "Tue-2", "Tue-3", "Tue-4"],
        "sections": [
            {"id": "Math-7A", "teacher": "Ada", "group": "7A", "duration": 2, "students": 28},
            {"id": "Math-7B", "teacher": "Ada", "group": "7B", "duration": 2, "students": 22},
            {"id": "Bio-7A", "teacher": "Rosalind", "group": "7A", "students": 28,
             "preferred": ["Tue-1"]},
            {"id": "Bio-7B", "teacher": "Rosalind", "group": "7B", "students": 22},
            {"id": "Art-7A", "teacher": "Frida", "group": "7A", "duration": 3},
            {"id": "Art-7B", "teacher": "Frida", "group": "7B", "duration": 3},
            {"id": "PE-7A", "teacher": "Jesse", "group": "7A"},
            {"id": "PE-7B", "teacher": "Jesse", "group": "7B"}
        ],
        "teachers": {
            "Ada": {"unavailable": ["Mon-1", "Tue-4"]},
            "Frida": {"unavailable": ["Mon-2"]}
        },
        "groups": {"7B": {"unavailable": ["Tue-4"]}},
        "rooms": {
            "R101": {"capacity": 30},
            "R102": {"capacity": 24, "unavailable": ["Mon-1", "Mon-2"]},
            "Gym": {}
        },
        "preassign": {"PE-7A": {"start": "Mon-1", "room": "Gym"}}
    })
}

#[test]
fn test_school_week() {
    let request: SolveRequest = serde_json::from_value(school_week()).unwrap();
    let p = Problem::try_from(request).unwrap();
    let solution = TimetableSolver::new().solve(&p).unwrap();
    let t = &solution.timetable;

    assert_eq!(t.len(), 8);
    assert_eq!(verify_timetable(&p, t), Ok(()));

    let pe = t.get("PE-7A").unwrap();
    assert_eq!(pe.slots, vec!["Mon-1"]);
    assert_eq!(pe.room.as_deref(), Some("Gym"));
    assert_eq!(t.start_of("Bio-7A"), Some("Tue-1"));
    assert_ne!(t.get("Math-7A").unwrap().room.as_deref(), Some("R102"));
}

#[test]
fn test_school_week_deterministic() {
    let first = solve_value(school_week());
    for _ in 0..5 {
        assert_eq!(solve_value(school_week()), first);
    }
    assert!(first.ok);
}

#[test]
fn test_capacity_excludes_small_rooms() {
    let p = Problem::new(slots(&["S1"]))
        .with_section(Section::new("A", "T1", "G1").with_students(40))
        .with_room(Room::new("Small").with_capacity(20));
    let err = TimetableSolver::new().solve(&p).unwrap_err();
    assert_eq!(err.kind, SolveErrorKind::Infeasible);

    let p = p.with_room(Room::new("Large").with_capacity(40));
    let t = TimetableSolver::new().solve(&p).unwrap().timetable;
    assert_eq!(t.get("A").unwrap().room.as_deref(), Some("Large"));
}

#[test]
fn test_room_double_booking_avoided() {
    let p = Problem::new(slots(&["S1", "S2"]))
        .with_section(Section::new("A", "T1", "G1"))
        .with_section(Section::new("B", "T2", "G2"))
        .with_section(Section::new("C", "T3", "G3"))
        .with_room(Room::new("Only"));
    let err = TimetableSolver::new().solve(&p).unwrap_err();
    assert_eq!(err.kind, SolveErrorKind::Infeasible);

    let p = Problem {
        sections: p.sections[..2].to_vec(),
        ..p
    };
    let t = TimetableSolver::new().solve(&p).unwrap().timetable;
    assert_ne!(t.start_of("A"), t.start_of("B"));
}

#[test]
fn test_rooms_unchecked_when_catalog_empty() {
    let response = solve_value(json!({
        "timeslots": ["S1"],
        "sections": [
            {"id": "A", "teacher": "T1", "group": "G1", "students": 500},
            {"id": "B", "teacher": "T2", "group": "G2", "students": 500}
        ],
        "rooms": {}
    }));
    assert!(response.ok);
    let schedule = response.schedule.unwrap();
    assert!(schedule.iter().all(|(_, s)| s.room.is_none()));
    assert_eq!(schedule.sections_at("S1"), vec!["A", "B"]);
}

#[test]
fn test_lock_room_accepted_when_unchecked() {
    let response = solve_value(json!({
        "timeslots": ["S1", "S2"],
        "sections": [
            {"id": "A", "teacher": "T1", "group": "G1"},
            {"id": "B", "teacher": "T2", "group": "G2"}
        ],
        "preassign": {"A": ["S2", "Aula"]}
    }));
    let schedule = response.schedule.unwrap();
    assert_eq!(schedule.get("A").unwrap().room.as_deref(), Some("Aula"));
    assert_eq!(schedule.start_of("A"), Some("S2"));
}

#[test]
fn test_clashing_locks_rejected() {
    let response = solve_value(json!({
        "timeslots": ["S1", "S2"],
        "sections": [
            {"id": "A", "teacher": "T1", "group": "G1"},
            {"id": "B", "teacher": "T2", "group": "G1"}
        ],
        "preassign": {"A": ["S1", null], "B": ["S1", null]}
    }));
    assert!(!response.ok);
    assert!(response.message.unwrap().contains("clashes"));
}

#[test]
fn test_lock_in_unknown_room() {
    let p = Problem::new(slots(&["S1"]))
        .with_section(Section::new("A", "T1", "G1"))
        .with_room(Room::new("R1"))
        .with_preassignment("A", Placement::at("S1").in_room("R9"));
    let err = TimetableSolver::new().solve(&p).unwrap_err();
    assert_eq!(err.kind, SolveErrorKind::Configuration);
}

#[test]
fn test_preference_breaks_ties_only() {
    let p = Problem::new(slots(&["S1", "S2", "S3"]))
        .with_section(Section::new("A", "T1", "G1").with_preferred("S3").with_preferred("S2"));
    let t = TimetableSolver::new().solve(&p).unwrap().timetable;
    // Preferred starts keep their slot order among themselves.
    assert_eq!(t.start_of("A"), Some("S2"));

    let p = p.with_teacher(Resource::new("T1").with_unavailable("S2").with_unavailable("S3"));
    let t = TimetableSolver::new().solve(&p).unwrap().timetable;
    assert_eq!(t.start_of("A"), Some("S1"));
}

#[test]
fn test_node_limit_reports_limit() {
    let mut p = Problem::new(slots(&["S1", "S2", "S3", "S4", "S5", "S6"]));
    for i in 0..7 {
        p = p.with_section(Section::new(format!("X{i}"), "T1", format!("G{i}")));
    }
    let solver = TimetableSolver::with_config(SolverConfig::default().with_node_limit(50));
    let err = solver.solve(&p).unwrap_err();
    assert_eq!(err.kind, SolveErrorKind::LimitReached);

    let request = json!({
        "timeslots": ["S1", "S2"],
        "sections": [{"id": "A", "teacher": "T", "group": "G"}]
    });
    let response = solve_json(&request.to_string(), &SolverConfig::default().with_node_limit(1));
    assert!(response.ok);
}
