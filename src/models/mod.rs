//! Timetabling domain models.
//!
//! Provides the data types for timetabling problems and their solutions.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | University | Training Centre |
//! |-------------|--------|------------|-----------------|
//! | Section | Lesson | Lecture/Lab | Course Session |
//! | Teacher | Teacher | Lecturer | Trainer |
//! | Group | Class | Cohort | Participant Group |
//! | Room | Classroom | Lecture Hall | Training Room |
//! | Timeslot | Period | Hour Block | Session Slot |

mod problem;
mod resource;
mod section;
mod timeslot;
mod timetable;

pub use problem::Problem;
pub use resource::{Resource, ResourceKind, Room, RoomCatalog};
pub use section::Section;
pub use timeslot::{SlotRun, Timeslots};
pub use timetable::{Placement, ScheduledSection, Timetable, Violation, ViolationType};
