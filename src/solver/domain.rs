//! Domain construction.
//!
//! A section's domain is every (start, room) pair it could legally take in
//! isolation: the run fits in the sequence, teacher and group are available
//! throughout, and (when rooms are checked) the room is available
//! throughout and seats the section. Interactions between sections are left
//! to the search.

use tracing::debug;

use super::SolveError;
use crate::models::{Problem, Section, SlotRun};

/// One legal placement of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate<'p> {
    /// Occupied slot positions.
    pub run: SlotRun,
    /// Room id, `None` when rooms are unchecked (or a lock names none).
    pub room: Option<&'p str>,
}

/// Candidates of one section, in enumeration order.
pub(crate) type Domain<'p> = Vec<Candidate<'p>>;

/// Builds the domain of every section, indexed like `problem.sections`.
///
/// A locked section's domain is exactly its lock. Fails with
/// [`SolveErrorKind::Infeasible`](super::SolveErrorKind::Infeasible) on the
/// first section whose domain is empty.
pub(crate) fn build_domains<'p>(
    problem: &'p Problem,
    locks: &[Option<Candidate<'p>>],
) -> Result<Vec<Domain<'p>>, SolveError> {
    let mut domains = Vec::with_capacity(problem.sections.len());

    for (section, lock) in problem.sections.iter().zip(locks) {
        let domain = match lock {
            Some(candidate) => vec![*candidate],
            None => enumerate(problem, section),
        };
        if domain.is_empty() {
            return Err(SolveError::infeasible(format!(
                "Section '{}' has no feasible start slot",
                section.id
            ))
            .for_section(&section.id));
        }
        debug!(section = %section.id, size = domain.len(), "domain built");
        domains.push(domain);
    }

    Ok(domains)
}

/// Enumerates candidates by start position, then room id.
fn enumerate<'p>(problem: &'p Problem, section: &Section) -> Domain<'p> {
    let mut domain = Vec::new();

    for start in 0..problem.timeslots.len() {
        let Some(run) = problem.timeslots.run(start, section.duration) else {
            continue;
        };
        if !problem.attendees_available(section, run) {
            continue;
        }
        match problem.rooms.checked() {
            None => domain.push(Candidate { run, room: None }),
            Some(rooms) => domain.extend(
                rooms
                    .values()
                    .filter(|room| problem.room_admits(room, section, run))
                    .map(|room| Candidate {
                        run,
                        room: Some(room.id.as_str()),
                    }),
            ),
        }
    }

    domain
}
