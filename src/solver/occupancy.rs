//! Per-slot occupancy tracking.
//!
//! Records, for every slot position, which teachers, groups and rooms are
//! committed. Owned by a single search call and empty again when that call
//! returns.

use std::collections::HashSet;

use crate::models::{ResourceKind, SlotRun};

/// The resources a placed section holds over its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Booking<'p> {
    pub teacher: &'p str,
    pub group: &'p str,
    pub room: Option<&'p str>,
    pub run: SlotRun,
}

#[derive(Debug, Clone, Default)]
struct SlotUsage<'p> {
    teachers: HashSet<&'p str>,
    groups: HashSet<&'p str>,
    rooms: HashSet<&'p str>,
}

impl<'p> SlotUsage<'p> {
    fn admits(&self, booking: &Booking<'p>) -> bool {
        !self.teachers.contains(booking.teacher)
            && !self.groups.contains(booking.group)
            && booking.room.map_or(true, |r| !self.rooms.contains(r))
    }

    fn is_empty(&self) -> bool {
        self.teachers.is_empty() && self.groups.is_empty() && self.rooms.is_empty()
    }
}

/// Slot-indexed teacher/group/room usage.
#[derive(Debug, Clone)]
pub(crate) struct Occupancy<'p> {
    slots: Vec<SlotUsage<'p>>,
}

impl<'p> Occupancy<'p> {
    /// Creates an empty tracker over `slot_count` positions.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![SlotUsage::default(); slot_count],
        }
    }

    /// Whether `booking` can be placed without double-booking anything.
    pub fn admits(&self, booking: &Booking<'p>) -> bool {
        self.slots[booking.run.range()]
            .iter()
            .all(|usage| usage.admits(booking))
    }

    /// Commits a booking. The caller must have checked [`Occupancy::admits`].
    pub fn place(&mut self, booking: &Booking<'p>) {
        for usage in &mut self.slots[booking.run.range()] {
            let teacher = usage.teachers.insert(booking.teacher);
            let group = usage.groups.insert(booking.group);
            let room = booking.room.map_or(true, |r| usage.rooms.insert(r));
            debug_assert!(teacher && group && room, "double booking: {booking:?}");
        }
    }

    /// Removes exactly what [`Occupancy::place`] added for `booking`.
    pub fn unplace(&mut self, booking: &Booking<'p>) {
        for usage in &mut self.slots[booking.run.range()] {
            let teacher = usage.teachers.remove(booking.teacher);
            let group = usage.groups.remove(booking.group);
            let room = booking.room.map_or(true, |r| usage.rooms.remove(r));
            debug_assert!(teacher && group && room, "unplacing absent booking: {booking:?}");
        }
    }

    /// Whether `id` of the given kind is committed at `position`.
    pub fn holds(&self, position: usize, kind: ResourceKind, id: &str) -> bool {
        self.slots.get(position).is_some_and(|usage| match kind {
            ResourceKind::Teacher => usage.teachers.contains(id),
            ResourceKind::Group => usage.groups.contains(id),
            ResourceKind::Room => usage.rooms.contains(id),
        })
    }

    /// First committed resource `booking` would collide with, as
    /// `(position, kind, id)`.
    pub fn conflict(&self, booking: &Booking<'p>) -> Option<(usize, ResourceKind, &'p str)> {
        let held = [
            Some((ResourceKind::Teacher, booking.teacher)),
            Some((ResourceKind::Group, booking.group)),
            booking.room.map(|r| (ResourceKind::Room, r)),
        ];
        booking.run.range().find_map(|position| {
            held.iter()
                .flatten()
                .find(|(kind, id)| self.holds(position, *kind, id))
                .map(|&(kind, id)| (position, kind, id))
        })
    }

    /// Whether nothing is committed anywhere.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(SlotUsage::is_empty)
    }
}
