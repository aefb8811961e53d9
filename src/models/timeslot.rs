//! Timeslot sequence and contiguity.
//!
//! A timetable is laid out over an ordered list of slot labels. Adjacent
//! entries are treated as consecutive: a section lasting `n` slots that
//! starts at position `p` occupies positions `p..p + n`. The sequence has
//! no notion of days or breaks, so callers must order labels such that
//! positional adjacency means scheduling adjacency (e.g. group by day and
//! never let the last slot of one day precede the first slot of the next if
//! sessions must not span them).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

/// An ordered sequence of timeslot labels.
///
/// Serialized as a plain array of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Timeslots {
    labels: Vec<String>,
    /// Position of the next slot, `None` for the last one.
    successors: Vec<Option<usize>>,
    /// Label → first position carrying it.
    positions: HashMap<String, usize>,
}

/// A run of consecutive slot positions, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRun {
    start: usize,
    end: usize,
}

impl Timeslots {
    /// Creates a sequence from labels in contiguity order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let count = labels.len();

        let successors = (0..count)
            .map(|i| if i + 1 < count { Some(i + 1) } else { None })
            .collect();

        let mut positions = HashMap::with_capacity(count);
        for (i, label) in labels.iter().enumerate() {
            positions.entry(label.clone()).or_insert(i);
        }

        Self {
            labels,
            successors,
            positions,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the sequence has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at a position.
    pub fn label(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }

    /// Position of a label (first occurrence).
    pub fn position(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// Position of the slot following `position`, if any.
    pub fn successor(&self, position: usize) -> Option<usize> {
        self.successors.get(position).copied().flatten()
    }

    /// All labels in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Labels that occur more than once, in order of their second occurrence.
    pub fn duplicate_labels(&self) -> Vec<&str> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(i, label)| self.positions.get(label.as_str()) != Some(i))
            .map(|(_, label)| label.as_str())
            .collect()
    }

    /// The run of `duration` consecutive slots starting at `start`.
    ///
    /// Walks the successor chain; returns `None` if `start` is out of range,
    /// `duration` is zero, or the run would extend past the last slot.
    pub fn run(&self, start: usize, duration: u32) -> Option<SlotRun> {
        if duration == 0 || start >= self.labels.len() {
            return None;
        }
        let mut last = start;
        for _ in 1..duration {
            last = self.successor(last)?;
        }
        Some(SlotRun {
            start,
            end: last + 1,
        })
    }

    /// Same as [`Timeslots::run`], starting from a label.
    pub fn run_from(&self, label: &str, duration: u32) -> Option<SlotRun> {
        self.run(self.position(label)?, duration)
    }

    /// Labels covered by a run.
    pub fn labels_of(&self, run: SlotRun) -> impl Iterator<Item = &str> + '_ {
        self.labels[run.range()].iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Timeslots {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<Timeslots> for Vec<String> {
    fn from(timeslots: Timeslots) -> Self {
        timeslots.labels
    }
}

impl SlotRun {
    /// First position of the run.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last position.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of slots covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always false for runs produced by [`Timeslots::run`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Positions covered, as a range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether two runs share a position.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}
