//! Timetable (solution) model.
//!
//! A timetable places every section on a run of slots and, when rooms are
//! checked, in a room. Solving is all-or-nothing: a `Timetable` handed out
//! by the solver always covers every section of its problem.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A start slot plus optional room, as used for preassignments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Label of the first slot.
    pub start: String,
    /// Room id, if any.
    pub room: Option<String>,
}

/// Where a section ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSection {
    /// Labels of the occupied slots, in sequence order.
    pub slots: Vec<String>,
    /// Assigned room, `None` when rooms are not checked.
    pub room: Option<String>,
}

/// A complete timetable: section id → placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    entries: BTreeMap<String, ScheduledSection>,
}

/// A constraint violation found when checking a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Section the violation was detected on.
    pub section_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A section of the problem has no entry.
    MissingSection,
    /// An entry names a section the problem does not have.
    UnknownSection,
    /// Slots are not `duration` consecutive labels of the sequence.
    BrokenRun,
    /// A teacher, group or room is used twice in one slot.
    DoubleBooking,
    /// A resource is used on a slot it is unavailable on.
    ResourceUnavailable,
    /// The room seats fewer students than the section has.
    CapacityExceeded,
    /// A preassigned section is not at its locked placement.
    LockBroken,
}

impl Placement {
    /// Creates a placement without a room.
    pub fn at(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            room: None,
        }
    }

    /// Sets the room.
    pub fn in_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }
}

impl ScheduledSection {
    /// Creates an entry from its slots and room.
    pub fn new(slots: Vec<String>, room: Option<String>) -> Self {
        Self { slots, room }
    }

    /// Label of the first slot.
    pub fn start(&self) -> Option<&str> {
        self.slots.first().map(String::as_str)
    }

    /// Whether the section occupies `label`.
    pub fn covers(&self, label: &str) -> bool {
        self.slots.iter().any(|s| s == label)
    }

    /// The start/room pair this entry corresponds to.
    pub fn placement(&self) -> Option<Placement> {
        Some(Placement {
            start: self.start()?.to_string(),
            room: self.room.clone(),
        })
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the placement of a section, replacing any previous one.
    pub fn insert(&mut self, section_id: impl Into<String>, entry: ScheduledSection) {
        self.entries.insert(section_id.into(), entry);
    }

    /// Placement of a section.
    pub fn get(&self, section_id: &str) -> Option<&ScheduledSection> {
        self.entries.get(section_id)
    }

    /// Start label of a section.
    pub fn start_of(&self, section_id: &str) -> Option<&str> {
        self.get(section_id).and_then(ScheduledSection::start)
    }

    /// Ids of the sections occupying `label`.
    pub fn sections_at(&self, label: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.covers(label))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Entries in section id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScheduledSection)> {
        self.entries.iter().map(|(id, e)| (id.as_str(), e))
    }

    /// Number of placed sections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no section is placed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        section_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            section_id: section_id.into(),
            message: message.into(),
        }
    }
}
