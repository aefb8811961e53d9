//! Problem model.
//!
//! The typed, fully-defaulted input of one solve call. Wire-level optional
//! fields are resolved before a `Problem` exists (see [`crate::api`]), so the
//! solver never deals with missing values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Placement, Resource, Room, RoomCatalog, Section, SlotRun, Timeslots};

/// A timetabling problem instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Problem {
    /// Ordered slots; order defines contiguity.
    pub timeslots: Timeslots,
    /// Sections to place, in input order.
    pub sections: Vec<Section>,
    /// Teachers by id. Unlisted teachers are always available.
    pub teachers: BTreeMap<String, Resource>,
    /// Student groups by id. Unlisted groups are always available.
    pub groups: BTreeMap<String, Resource>,
    /// Rooms, or the explicit unchecked mode.
    pub rooms: RoomCatalog,
    /// Locked placements by section id.
    pub preassign: BTreeMap<String, Placement>,
}

impl Problem {
    /// Creates a problem over the given slots with nothing to place.
    pub fn new(timeslots: Timeslots) -> Self {
        Self {
            timeslots,
            ..Default::default()
        }
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Resource) -> Self {
        self.teachers.insert(teacher.id.clone(), teacher);
        self
    }

    /// Adds a student group.
    pub fn with_group(mut self, group: Resource) -> Self {
        self.groups.insert(group.id.clone(), group);
        self
    }

    /// Adds a room. The first room switches the problem to checked rooms.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.insert(room);
        self
    }

    /// Locks a section to a placement.
    pub fn with_preassignment(
        mut self,
        section_id: impl Into<String>,
        placement: Placement,
    ) -> Self {
        self.preassign.insert(section_id.into(), placement);
        self
    }

    /// Index of a section by id.
    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    /// Whether the section's teacher and group are both free of
    /// unavailability over `run`.
    pub fn attendees_available(&self, section: &Section, run: SlotRun) -> bool {
        let teacher_ok = self
            .teachers
            .get(&section.teacher)
            .map_or(true, |t| t.is_available_over(self.timeslots.labels_of(run)));
        let group_ok = self
            .groups
            .get(&section.group)
            .map_or(true, |g| g.is_available_over(self.timeslots.labels_of(run)));
        teacher_ok && group_ok
    }

    /// Whether `room` is usable over `run` and seats the section.
    pub fn room_admits(&self, room: &Room, section: &Section, run: SlotRun) -> bool {
        room.fits(section.students) && room.is_available_over(self.timeslots.labels_of(run))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_problem() -> Problem {
        Problem::new(Timeslots::new(["S1", "S2", "S3"]))
            .with_section(Section::new("A", "T1", "G1").with_duration(2).with_students(25))
            .with_section(Section::new("B", "T2", "G1"))
            .with_teacher(Resource::new("T1").with_unavailable("S3"))
            .with_group(Resource::new("G1"))
    }

    #[test]
    fn test_builder() {
        let p = sample_problem();
        assert_eq!(p.sections.len(), 2);
        assert_eq!(p.section_index("B"), Some(1));
        assert_eq!(p.section_index("Z"), None);
        assert!(!p.rooms.is_checked());

        let p = p.with_room(Room::new("R1"));
        assert!(p.rooms.is_checked());
    }

    #[test]
    fn test_attendees_available() {
        let p = sample_problem();
        let a = &p.sections[0];
        assert!(p.attendees_available(a, p.timeslots.run(0, 2).unwrap()));
        assert!(!p.attendees_available(a, p.timeslots.run(1, 2).unwrap()));

        // T2 is not listed: always available.
        let b = &p.sections[1];
        assert!(p.attendees_available(b, p.timeslots.run(2, 1).unwrap()));
    }

    #[test]
    fn test_room_admits() {
        let p = sample_problem();
        let a = &p.sections[0];
        let run = p.timeslots.run(0, 2).unwrap();

        assert!(p.room_admits(&Room::new("R1").with_capacity(30), a, run));
        assert!(!p.room_admits(&Room::new("R2").with_capacity(20), a, run));
        assert!(!p.room_admits(&Room::new("R3").with_unavailable("S2"), a, run));
    }
}
