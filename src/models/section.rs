//! Section model.
//!
//! A section is one teaching session: a teacher meets a student group for
//! a contiguous run of slots, optionally in a room.

use serde::{Deserialize, Serialize};

/// A teaching session to be placed in the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Teacher giving the session.
    pub teacher: String,
    /// Student group attending the session.
    pub group: String,
    /// Number of consecutive slots occupied (≥ 1).
    pub duration: u32,
    /// Expected attendance, checked against room capacity when both are known.
    pub students: Option<u32>,
    /// Preferred start slots. Soft: only affects the order candidates are tried.
    pub preferred: Vec<String>,
}

impl Section {
    /// Creates a one-slot section with no attendance or preferences.
    pub fn new(
        id: impl Into<String>,
        teacher: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            teacher: teacher.into(),
            group: group.into(),
            duration: 1,
            students: None,
            preferred: Vec::new(),
        }
    }

    /// Sets the duration in slots.
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the expected attendance.
    pub fn with_students(mut self, students: u32) -> Self {
        self.students = Some(students);
        self
    }

    /// Adds a preferred start slot.
    pub fn with_preferred(mut self, label: impl Into<String>) -> Self {
        self.preferred.push(label.into());
        self
    }

    /// Whether `label` is one of the preferred start slots.
    pub fn prefers(&self, label: &str) -> bool {
        self.preferred.iter().any(|p| p == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_defaults() {
        let s = Section::new("MATH-1", "T1", "G1");
        assert_eq!(s.id, "MATH-1");
        assert_eq!(s.teacher, "T1");
        assert_eq!(s.group, "G1");
        assert_eq!(s.duration, 1);
        assert_eq!(s.students, None);
        assert!(s.preferred.is_empty());
    }

    #[test]
    fn test_section_builder() {
        let s = Section::new("LAB", "T2", "G3")
            .with_duration(3)
            .with_students(24)
            .with_preferred("Mon-1")
            .with_preferred("Wed-1");

        assert_eq!(s.duration, 3);
        assert_eq!(s.students, Some(24));
        assert!(s.prefers("Wed-1"));
        assert!(!s.prefers("Tue-1"));
    }
}
