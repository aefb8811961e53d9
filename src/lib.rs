//! Class timetabling as constraint satisfaction.
//!
//! Assigns teaching sessions ("sections") to contiguous runs of timeslots
//! and, optionally, rooms, so that no teacher, student group or room is
//! double-booked. Honors per-resource unavailability, room capacity, hard
//! preassignments and soft preferred start slots. The result is
//! all-or-nothing and deterministic.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Timeslots`, `Section`, `Resource`, `Room`,
//!   `RoomCatalog`, `Problem`, `Timetable`
//! - **`validation`**: Input integrity checks and an independent timetable checker
//! - **`solver`**: `TimetableSolver`: domains, MRV ordering, forward-checking search
//! - **`api`**: The JSON solve contract (`{ok, schedule | message}`)
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Problem, Room, Section, Timeslots};
//! use u_timetable::solver::TimetableSolver;
//!
//! let problem = Problem::new(Timeslots::new(["Mon-1", "Mon-2", "Mon-3"]))
//!     .with_section(Section::new("Chemistry", "Curie", "9B").with_duration(2).with_students(24))
//!     .with_section(Section::new("History", "Bloch", "9B"))
//!     .with_room(Room::new("Lab").with_capacity(30));
//!
//! let timetable = TimetableSolver::new().solve(&problem).unwrap().timetable;
//! assert_eq!(timetable.get("Chemistry").unwrap().slots, vec!["Mon-1", "Mon-2"]);
//! assert_eq!(timetable.start_of("History"), Some("Mon-3"));
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"

pub mod api;
pub mod models;
pub mod solver;
pub mod validation;
