//! Depth-first search with forward checking.
//!
//! # Algorithm
//!
//! Sections are visited in the fixed MRV order. At each position:
//!
//! 1. Skip sections already placed (locks).
//! 2. Try the section's candidates, preferred start slots first.
//! 3. Reject a candidate that clashes with what is already committed.
//! 4. Place it, then check that every later unplaced section still has at
//!    least one candidate that fits (one-step lookahead, recomputed from
//!    scratch on every trial).
//! 5. Recurse; on failure undo the placement and try the next candidate.
//!
//! Every placement is made through a [`Trial`] guard whose `Drop` removes it
//! from the occupancy, so pruning, backtracking, limit errors and success
//! all leave the tracker exactly as they found it.
//!
//! # Complexity
//! Exponential in the worst case; each trial costs
//! O(later sections × domain size × duration) for the lookahead.
//!
//! # Reference
//! Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//! Constraint Satisfaction Problems"

use std::ops::{Deref, DerefMut};
use std::time::Instant;

use tracing::trace;

use super::domain::{Candidate, Domain};
use super::occupancy::{Booking, Occupancy};
use super::{SearchStats, SolveError, SolveErrorKind, SolverConfig};
use crate::models::Problem;

/// Mutable state of one search call.
#[derive(Debug)]
pub(crate) struct SearchState<'p> {
    pub occupancy: Occupancy<'p>,
    /// Current candidate per section index.
    pub assignment: Vec<Option<Candidate<'p>>>,
    pub stats: SearchStats,
}

impl<'p> SearchState<'p> {
    pub fn new(problem: &Problem) -> Self {
        Self {
            occupancy: Occupancy::new(problem.timeslots.len()),
            assignment: vec![None; problem.sections.len()],
            stats: SearchStats::default(),
        }
    }
}

/// Scoped placement of one or more sections.
///
/// On drop, every booking made through the guard is removed from the
/// occupancy in reverse order. Assignments are cleared too unless the guard
/// was committed, which keeps them as part of the result.
pub(crate) struct Trial<'s, 'p> {
    state: &'s mut SearchState<'p>,
    placed: Vec<(usize, Booking<'p>)>,
    committed: bool,
}

impl<'s, 'p> Trial<'s, 'p> {
    pub fn open(state: &'s mut SearchState<'p>) -> Self {
        Self {
            state,
            placed: Vec::new(),
            committed: false,
        }
    }

    pub fn place(&mut self, section: usize, candidate: Candidate<'p>, booking: Booking<'p>) {
        self.state.occupancy.place(&booking);
        self.state.assignment[section] = Some(candidate);
        self.placed.push((section, booking));
    }

    /// Keeps the assignments made through this guard.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl<'p> Deref for Trial<'_, 'p> {
    type Target = SearchState<'p>;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl<'p> DerefMut for Trial<'_, 'p> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for Trial<'_, '_> {
    fn drop(&mut self) {
        let placed = std::mem::take(&mut self.placed);
        for (section, booking) in placed.into_iter().rev() {
            self.state.occupancy.unplace(&booking);
            if !self.committed {
                self.state.assignment[section] = None;
            }
        }
    }
}

/// Read-only search context shared by every recursion level.
pub(crate) struct Search<'a, 'p> {
    problem: &'p Problem,
    domains: &'a [Domain<'p>],
    order: &'a [usize],
    /// Each domain with preferred starts moved to the front (stable).
    trial_orders: Vec<Domain<'p>>,
    config: &'a SolverConfig,
    started: Instant,
}

impl<'a, 'p> Search<'a, 'p> {
    pub fn new(
        problem: &'p Problem,
        domains: &'a [Domain<'p>],
        order: &'a [usize],
        config: &'a SolverConfig,
    ) -> Self {
        let trial_orders = domains
            .iter()
            .zip(&problem.sections)
            .map(|(domain, section)| {
                let mut ordered = domain.clone();
                ordered.sort_by_key(|c| {
                    let start = problem.timeslots.label(c.run.start()).unwrap_or_default();
                    !section.prefers(start)
                });
                ordered
            })
            .collect();

        Self {
            problem,
            domains,
            order,
            trial_orders,
            config,
            started: Instant::now(),
        }
    }

    /// Seeds the locks, then searches from the first position.
    ///
    /// Returns `Ok(true)` with `state.assignment` complete, `Ok(false)` when
    /// every branch fails. The occupancy is empty on every return.
    pub fn run(
        &self,
        state: &mut SearchState<'p>,
        locks: &[Option<Candidate<'p>>],
    ) -> Result<bool, SolveError> {
        let mut seeded = Trial::open(state);
        for (section, lock) in locks.iter().enumerate() {
            let Some(candidate) = *lock else {
                continue;
            };
            let booking = self.booking(section, candidate);
            if let Some((position, kind, resource)) = seeded.occupancy.conflict(&booking) {
                let id = &self.problem.sections[section].id;
                let label = self.problem.timeslots.label(position).unwrap_or_default();
                return Err(SolveError::violation(
                    id,
                    format!(
                        "Locked section '{id}' clashes with another locked section: \
                         {kind:?} '{resource}' is taken on {label}"
                    ),
                ));
            }
            seeded.place(section, candidate, booking);
        }

        let found = self.descend(&mut seeded, 0)?;
        if found {
            seeded.commit();
        }
        Ok(found)
    }

    fn descend(&self, state: &mut SearchState<'p>, position: usize) -> Result<bool, SolveError> {
        let Some(&section) = self.order.get(position) else {
            return Ok(true);
        };
        if state.assignment[section].is_some() {
            return self.descend(state, position + 1);
        }

        for &candidate in &self.trial_orders[section] {
            self.charge(state)?;

            let booking = self.booking(section, candidate);
            if !state.occupancy.admits(&booking) {
                continue;
            }

            let mut trial = Trial::open(state);
            trial.place(section, candidate, booking);

            if let Some(wiped) = self.wiped_out(&trial, position) {
                trial.stats.pruned += 1;
                trace!(
                    section = %self.problem.sections[section].id,
                    start = candidate.run.start(),
                    wiped = %self.problem.sections[wiped].id,
                    "candidate pruned"
                );
                continue;
            }

            if self.descend(&mut trial, position + 1)? {
                trial.commit();
                return Ok(true);
            }
            trial.stats.backtracks += 1;
        }

        Ok(false)
    }

    /// First later, unplaced section left without a fitting candidate.
    fn wiped_out(&self, state: &SearchState<'p>, position: usize) -> Option<usize> {
        self.order[position + 1..]
            .iter()
            .copied()
            .filter(|&later| state.assignment[later].is_none())
            .find(|&later| {
                !self.domains[later]
                    .iter()
                    .any(|&c| state.occupancy.admits(&self.booking(later, c)))
            })
    }

    fn booking(&self, section: usize, candidate: Candidate<'p>) -> Booking<'p> {
        let s = &self.problem.sections[section];
        Booking {
            teacher: &s.teacher,
            group: &s.group,
            room: candidate.room,
            run: candidate.run,
        }
    }

    /// Counts a node and enforces the configured limits.
    fn charge(&self, state: &mut SearchState<'p>) -> Result<(), SolveError> {
        state.stats.nodes += 1;
        if let Some(limit) = self.config.node_limit {
            if state.stats.nodes > limit {
                return Err(SolveError::new(
                    SolveErrorKind::LimitReached,
                    format!("Node limit of {limit} reached"),
                ));
            }
        }
        if let Some(limit) = self.config.time_limit {
            if self.started.elapsed() > limit {
                return Err(SolveError::new(
                    SolveErrorKind::LimitReached,
                    format!("Time limit of {limit:?} reached"),
                ));
            }
        }
        Ok(())
    }
}
