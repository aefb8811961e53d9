//! Solve errors.
//!
//! Infeasibility is an ordinary outcome of a solve call, not a fault; it is
//! reported through the same error type as malformed input so callers can
//! treat every failure as "no timetable", while `kind` keeps the cause.

use std::fmt;

use crate::validation::ValidationError;

/// Why a solve call produced no timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveError {
    /// Failure category.
    pub kind: SolveErrorKind,
    /// Section the failure was detected on, if any.
    pub section: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// Categories of solve failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveErrorKind {
    /// Malformed input, rejected before search.
    Configuration,
    /// A domain is empty or the search exhausted every branch.
    Infeasible,
    /// A preassignment breaks availability, capacity or exclusivity.
    ConstraintViolation,
    /// The node or time limit was hit before the search finished.
    LimitReached,
}

impl SolveError {
    pub(crate) fn new(kind: SolveErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            section: None,
            message: message.into(),
        }
    }

    pub(crate) fn infeasible(message: impl Into<String>) -> Self {
        Self::new(SolveErrorKind::Infeasible, message)
    }

    pub(crate) fn violation(section: &str, message: impl Into<String>) -> Self {
        Self::new(SolveErrorKind::ConstraintViolation, message).for_section(section)
    }

    pub(crate) fn for_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Whether the problem was well-formed but has no timetable.
    pub fn is_no_solution(&self) -> bool {
        matches!(
            self.kind,
            SolveErrorKind::Infeasible | SolveErrorKind::ConstraintViolation
        )
    }
}

impl fmt::Display for SolveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration error",
            Self::Infeasible => "infeasible",
            Self::ConstraintViolation => "constraint violation",
            Self::LimitReached => "search limit reached",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SolveError {}

impl From<Vec<ValidationError>> for SolveError {
    fn from(errors: Vec<ValidationError>) -> Self {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self::new(SolveErrorKind::Configuration, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_no_solution_kinds() {
        assert!(SolveError::infeasible("x").is_no_solution());
        assert!(SolveError::violation("S1", "x").is_no_solution());
        assert!(!SolveError::new(SolveErrorKind::Configuration, "x").is_no_solution());
        assert!(!SolveError::new(SolveErrorKind::LimitReached, "x").is_no_solution());
    }

    #[test]
    fn test_display() {
        let e = SolveError::violation("S1", "teacher T1 is unavailable on Mon-1");
        assert_eq!(e.section.as_deref(), Some("S1"));
        assert_eq!(
            e.to_string(),
            "constraint violation: teacher T1 is unavailable on Mon-1"
        );
    }

    #[test]
    fn test_from_validation_errors() {
        let errors = vec![
            ValidationError {
                kind: ValidationErrorKind::DuplicateId,
                message: "Duplicate section ID: A".into(),
            },
            ValidationError {
                kind: ValidationErrorKind::InvalidDuration,
                message: "Section 'B' must last at least one slot".into(),
            },
        ];
        let e = SolveError::from(errors);
        assert_eq!(e.kind, SolveErrorKind::Configuration);
        assert!(e.message.contains("Duplicate section ID: A; Section 'B'"));
    }
}
