//! Resource models.
//!
//! Teachers and student groups are exclusive resources: each can attend at
//! most one section per slot. Rooms are exclusive too and additionally
//! carry a seating capacity. All three may be blocked on individual slots.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A teacher or a student group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier within its kind.
    pub id: String,
    /// Slot labels on which the resource cannot be scheduled.
    pub unavailable: BTreeSet<String>,
}

/// A room sections may be held in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Seats available. `None` = no capacity limit.
    pub capacity: Option<u32>,
    /// Slot labels on which the room cannot be used.
    pub unavailable: BTreeSet<String>,
}

/// Which kind of exclusive resource an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Teacher,
    Group,
    Room,
}

/// How room feasibility is handled for a problem.
///
/// With `Unchecked`, no room is ever chosen: every candidate carries a null
/// room and capacity is ignored. No virtual room is synthesized. A room
/// named by a preassignment is still kept and tracked for double-booking.
///
/// `Rooms` with an empty map behaves exactly like `Unchecked`. Serialized
/// as a plain `id → room` map; an empty map reads back as `Unchecked`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Room>", into = "BTreeMap<String, Room>")]
pub enum RoomCatalog {
    /// Room checks are skipped entirely.
    #[default]
    Unchecked,
    /// Rooms keyed by id, enumerated in id order.
    Rooms(BTreeMap<String, Room>),
}

impl Resource {
    /// Creates a resource available on every slot.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unavailable: BTreeSet::new(),
        }
    }

    /// Marks a slot as unavailable.
    pub fn with_unavailable(mut self, label: impl Into<String>) -> Self {
        self.unavailable.insert(label.into());
        self
    }

    /// Whether the resource can be scheduled on `label`.
    #[inline]
    pub fn is_available(&self, label: &str) -> bool {
        !self.unavailable.contains(label)
    }

    /// Whether the resource can be scheduled on every one of `labels`.
    pub fn is_available_over<'a>(&self, mut labels: impl Iterator<Item = &'a str>) -> bool {
        labels.all(|l| self.is_available(l))
    }
}

impl Room {
    /// Creates a room with unlimited capacity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capacity: None,
            unavailable: BTreeSet::new(),
        }
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Marks a slot as unavailable.
    pub fn with_unavailable(mut self, label: impl Into<String>) -> Self {
        self.unavailable.insert(label.into());
        self
    }

    /// Whether the room can be used on `label`.
    #[inline]
    pub fn is_available(&self, label: &str) -> bool {
        !self.unavailable.contains(label)
    }

    /// Whether the room can be used on every one of `labels`.
    pub fn is_available_over<'a>(&self, mut labels: impl Iterator<Item = &'a str>) -> bool {
        labels.all(|l| self.is_available(l))
    }

    /// Whether the room seats `students`.
    ///
    /// Returns `true` when either side is unknown.
    pub fn fits(&self, students: Option<u32>) -> bool {
        match (self.capacity, students) {
            (Some(capacity), Some(students)) => capacity >= students,
            _ => true,
        }
    }
}

impl RoomCatalog {
    /// Builds a catalog; an empty set of rooms means `Unchecked`.
    pub fn from_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let rooms: BTreeMap<String, Room> =
            rooms.into_iter().map(|r| (r.id.clone(), r)).collect();
        if rooms.is_empty() {
            Self::Unchecked
        } else {
            Self::Rooms(rooms)
        }
    }

    /// The rooms to check against, `None` when room checks are skipped.
    pub fn checked(&self) -> Option<&BTreeMap<String, Room>> {
        match self {
            Self::Rooms(rooms) if !rooms.is_empty() => Some(rooms),
            _ => None,
        }
    }

    /// Whether rooms are assigned and checked.
    pub fn is_checked(&self) -> bool {
        self.checked().is_some()
    }

    /// Looks up a room by id.
    pub fn get(&self, id: &str) -> Option<&Room> {
        self.checked()?.get(id)
    }

    /// Adds a room, switching an unchecked catalog to a checked one.
    pub fn insert(&mut self, room: Room) {
        match self {
            Self::Unchecked => {
                *self = Self::from_rooms([room]);
            }
            Self::Rooms(rooms) => {
                rooms.insert(room.id.clone(), room);
            }
        }
    }

    /// Rooms in id order (empty when unchecked).
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.checked().into_iter().flat_map(BTreeMap::values)
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.checked().map_or(0, BTreeMap::len)
    }

    /// Whether the catalog has no rooms.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<BTreeMap<String, Room>> for RoomCatalog {
    fn from(rooms: BTreeMap<String, Room>) -> Self {
        Self::from_rooms(rooms.into_values())
    }
}

impl From<RoomCatalog> for BTreeMap<String, Room> {
    fn from(catalog: RoomCatalog) -> Self {
        match catalog {
            RoomCatalog::Unchecked => BTreeMap::new(),
            RoomCatalog::Rooms(rooms) => rooms,
        }
    }
}
