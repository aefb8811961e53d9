//! Preassignment validation.
//!
//! A preassignment is a hard lock: it is either honored exactly or the whole
//! solve fails. It is never relaxed or dropped.

use std::collections::BTreeMap;

use super::domain::Candidate;
use super::{SolveError, SolveErrorKind};
use crate::models::{Placement, Problem, Resource, Section, SlotRun};

/// Resolves every preassignment into a candidate, indexed like
/// `problem.sections` (`None` for free sections).
///
/// Checks each lock in isolation: the run exists, teacher and group are
/// available throughout, and a named room is available throughout and
/// seats the section. Clashes *between* locks are detected when the search
/// seeds them.
pub(crate) fn resolve_locks(problem: &Problem) -> Result<Vec<Option<Candidate<'_>>>, SolveError> {
    let mut locks = vec![None; problem.sections.len()];

    for (section_id, placement) in &problem.preassign {
        let index = problem.section_index(section_id).ok_or_else(|| {
            SolveError::new(
                SolveErrorKind::Configuration,
                format!("Preassignment references unknown section '{section_id}'"),
            )
            .for_section(section_id)
        })?;
        locks[index] = Some(resolve(problem, &problem.sections[index], placement)?);
    }

    Ok(locks)
}

fn resolve<'p>(
    problem: &'p Problem,
    section: &Section,
    placement: &'p Placement,
) -> Result<Candidate<'p>, SolveError> {
    let run = problem
        .timeslots
        .run_from(&placement.start, section.duration)
        .ok_or_else(|| {
            SolveError::violation(
                &section.id,
                format!(
                    "Locked section '{}' has no {}-slot run starting at '{}'",
                    section.id, section.duration, placement.start
                ),
            )
        })?;

    if let Some(label) = blocked_slot(problem, &problem.teachers, &section.teacher, run) {
        return Err(SolveError::violation(
            &section.id,
            format!(
                "Locked section '{}': teacher '{}' is unavailable on {label}",
                section.id, section.teacher
            ),
        ));
    }
    if let Some(label) = blocked_slot(problem, &problem.groups, &section.group, run) {
        return Err(SolveError::violation(
            &section.id,
            format!(
                "Locked section '{}': group '{}' is unavailable on {label}",
                section.id, section.group
            ),
        ));
    }

    let room = match (&placement.room, problem.rooms.checked()) {
        (None, _) => None,
        (Some(room_id), None) => Some(room_id.as_str()),
        (Some(room_id), Some(rooms)) => {
            let room = rooms.get(room_id).ok_or_else(|| {
                SolveError::new(
                    SolveErrorKind::Configuration,
                    format!(
                        "Preassignment of '{}' references unknown room '{room_id}'",
                        section.id
                    ),
                )
                .for_section(&section.id)
            })?;
            if let Some(label) = problem.timeslots.labels_of(run).find(|l| !room.is_available(l)) {
                return Err(SolveError::violation(
                    &section.id,
                    format!(
                        "Locked section '{}': room '{room_id}' is unavailable on {label}",
                        section.id
                    ),
                ));
            }
            if !room.fits(section.students) {
                return Err(SolveError::violation(
                    &section.id,
                    format!(
                        "Locked section '{}': room '{room_id}' seats {:?}, \
                         section has {:?} students",
                        section.id, room.capacity, section.students
                    ),
                ));
            }
            Some(room.id.as_str())
        }
    };

    Ok(Candidate { run, room })
}

/// First slot of `run` on which the listed resource `id` is unavailable.
fn blocked_slot<'p>(
    problem: &'p Problem,
    resources: &BTreeMap<String, Resource>,
    id: &str,
    run: SlotRun,
) -> Option<&'p str> {
    let resource = resources.get(id)?;
    problem
        .timeslots
        .labels_of(run)
        .find(|l| !resource.is_available(l))
}
