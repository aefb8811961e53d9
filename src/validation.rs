//! Input validation and timetable verification.
//!
//! [`validate_problem`] checks structural integrity of a problem before any
//! search starts. Detects:
//! - Duplicate section ids and timeslot labels
//! - Zero-length sections
//! - Preassignments for sections that do not exist
//! - Preassigned rooms missing from a checked room catalog
//!
//! Availability and capacity of preassignments are *not* checked here: those
//! are hard constraints evaluated by the solver.
//!
//! [`verify_timetable`] independently re-checks a finished timetable against
//! every hard constraint of its problem.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::{Problem, ResourceKind, Timetable, Violation, ViolationType};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same id or label.
    DuplicateId,
    /// A section lasts zero slots.
    InvalidDuration,
    /// A preassignment references a section that doesn't exist.
    UnknownSection,
    /// A preassignment references a room missing from the catalog.
    UnknownRoom,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the structure of a timetabling problem.
///
/// Checks:
/// 1. No duplicate timeslot labels
/// 2. No duplicate section ids
/// 3. Every section lasts at least one slot
/// 4. Every preassigned section id exists
/// 5. Every preassigned room exists, when rooms are checked
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    for label in problem.timeslots.duplicate_labels() {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            format!("Duplicate timeslot label: {label}"),
        ));
    }

    let mut section_ids = HashSet::new();
    for section in &problem.sections {
        if !section_ids.insert(section.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate section ID: {}", section.id),
            ));
        }
        if section.duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Section '{}' must last at least one slot", section.id),
            ));
        }
    }

    for (section_id, placement) in &problem.preassign {
        if !section_ids.contains(section_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSection,
                format!("Preassignment references unknown section '{section_id}'"),
            ));
        }
        if let Some(room) = &placement.room {
            if problem.rooms.is_checked() && problem.rooms.get(room).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownRoom,
                    format!("Preassignment of '{section_id}' references unknown room '{room}'"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a timetable against every hard constraint of `problem`.
///
/// Verifies coverage, run contiguity and length, availability, capacity,
/// exclusivity per slot and preassignments.
pub fn verify_timetable(problem: &Problem, timetable: &Timetable) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    let timeslots = &problem.timeslots;

    let known: HashSet<&str> = problem.sections.iter().map(|s| s.id.as_str()).collect();
    for (id, _) in timetable.iter() {
        if !known.contains(id) {
            violations.push(Violation::new(
                ViolationType::UnknownSection,
                id,
                format!("Timetable places unknown section '{id}'"),
            ));
        }
    }

    // (slot label, kind, resource id) → section holding it
    let mut usage: HashMap<(&str, ResourceKind, &str), &str> = HashMap::new();

    for section in &problem.sections {
        let id = section.id.as_str();
        let Some(entry) = timetable.get(id) else {
            violations.push(Violation::new(
                ViolationType::MissingSection,
                id,
                format!("Section '{id}' is not placed"),
            ));
            continue;
        };

        let contiguous = entry
            .start()
            .and_then(|start| timeslots.run_from(start, section.duration))
            .is_some_and(|run| timeslots.labels_of(run).eq(entry.slots.iter().map(String::as_str)));
        if !contiguous {
            violations.push(Violation::new(
                ViolationType::BrokenRun,
                id,
                format!(
                    "Section '{id}' needs {} consecutive slots, got {:?}",
                    section.duration, entry.slots
                ),
            ));
        }

        let teacher = problem.teachers.get(&section.teacher);
        let group = problem.groups.get(&section.group);
        for label in &entry.slots {
            if teacher.is_some_and(|t| !t.is_available(label)) {
                violations.push(Violation::new(
                    ViolationType::ResourceUnavailable,
                    id,
                    format!("Teacher '{}' is unavailable on {label}", section.teacher),
                ));
            }
            if group.is_some_and(|g| !g.is_available(label)) {
                violations.push(Violation::new(
                    ViolationType::ResourceUnavailable,
                    id,
                    format!("Group '{}' is unavailable on {label}", section.group),
                ));
            }
        }

        if let Some(room_id) = &entry.room {
            if problem.rooms.is_checked() {
                match problem.rooms.get(room_id) {
                    None => violations.push(Violation::new(
                        ViolationType::ResourceUnavailable,
                        id,
                        format!("Room '{room_id}' is not in the catalog"),
                    )),
                    Some(room) => {
                        if !room.fits(section.students) {
                            violations.push(Violation::new(
                                ViolationType::CapacityExceeded,
                                id,
                                format!(
                                    "Room '{room_id}' seats {:?}, section has {:?} students",
                                    room.capacity, section.students
                                ),
                            ));
                        }
                        if let Some(label) = entry.slots.iter().find(|l| !room.is_available(l)) {
                            violations.push(Violation::new(
                                ViolationType::ResourceUnavailable,
                                id,
                                format!("Room '{room_id}' is unavailable on {label}"),
                            ));
                        }
                    }
                }
            }
        }

        let mut held = vec![
            (ResourceKind::Teacher, section.teacher.as_str()),
            (ResourceKind::Group, section.group.as_str()),
        ];
        if let Some(room_id) = &entry.room {
            held.push((ResourceKind::Room, room_id.as_str()));
        }
        for label in &entry.slots {
            for &(kind, resource) in &held {
                if let Some(other) = usage.insert((label.as_str(), kind, resource), id) {
                    violations.push(Violation::new(
                        ViolationType::DoubleBooking,
                        id,
                        format!("{kind:?} '{resource}' is also used by '{other}' on {label}"),
                    ));
                }
            }
        }

        if let Some(locked) = problem.preassign.get(id) {
            if entry.placement().as_ref() != Some(locked) {
                violations.push(Violation::new(
                    ViolationType::LockBroken,
                    id,
                    format!("Section '{id}' was locked to {locked:?}"),
                ));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
