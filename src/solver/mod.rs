//! Constraint-satisfaction timetable solver.
//!
//! # Algorithm
//!
//! 1. Reject malformed input ([`crate::validation::validate_problem`]).
//! 2. Resolve preassignments into hard locks, checking each in isolation.
//! 3. Build every section's domain of (start, room) candidates.
//! 4. Fix a static MRV order: smallest domain first, longer sections first
//!    on ties, then input order.
//! 5. Depth-first search with forward checking; every placement goes
//!    through an undo guard so the occupancy tracker is empty again on
//!    every exit path.
//!
//! The result is all-or-nothing: a complete [`Timetable`] or a
//! [`SolveError`]. Identical input always yields the identical timetable.
//!
//! # Concurrency
//!
//! [`TimetableSolver::solve`] takes `&self` and keeps all search state on
//! its own stack frame, so one solver can serve concurrent calls from
//! several threads.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach",
//! Ch. 6: Constraint Satisfaction Problems

mod config;
mod domain;
mod error;
mod locks;
mod occupancy;
mod ordering;
mod search;

pub use config::{SearchStats, SolverConfig};
pub use error::{SolveError, SolveErrorKind};

use tracing::{debug, info};

use crate::models::{Problem, ScheduledSection, Timetable};
use crate::validation::validate_problem;
use domain::Candidate;
use search::{Search, SearchState};

/// A solved timetable with the statistics of the search that found it.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Placement of every section.
    pub timetable: Timetable,
    /// Search counters.
    pub stats: SearchStats,
}

/// Backtracking timetable solver.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Problem, Resource, Section, Timeslots};
/// use u_timetable::solver::TimetableSolver;
///
/// let problem = Problem::new(Timeslots::new(["Mon-1", "Mon-2"]))
///     .with_section(Section::new("Math", "Ada", "7A"))
///     .with_section(Section::new("Physics", "Ada", "7B"))
///     .with_teacher(Resource::new("Ada").with_unavailable("Mon-1"));
///
/// let err = TimetableSolver::new().solve(&problem).unwrap_err();
/// assert!(err.is_no_solution());
///
/// let problem = problem.with_teacher(Resource::new("Ada"));
/// let solution = TimetableSolver::new().solve(&problem).unwrap();
/// assert_eq!(solution.timetable.start_of("Math"), Some("Mon-1"));
/// assert_eq!(solution.timetable.start_of("Physics"), Some("Mon-2"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableSolver {
    config: SolverConfig,
}

impl TimetableSolver {
    /// Creates a solver with unlimited search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Places every section or explains why that is impossible.
    pub fn solve(&self, problem: &Problem) -> Result<Solution, SolveError> {
        info!(
            sections = problem.sections.len(),
            timeslots = problem.timeslots.len(),
            rooms = problem.rooms.len(),
            locks = problem.preassign.len(),
            "solve started"
        );

        let result = self.run(problem);
        match &result {
            Ok(solution) => info!(
                nodes = solution.stats.nodes,
                backtracks = solution.stats.backtracks,
                "solve succeeded"
            ),
            Err(e) => info!(kind = %e.kind, section = ?e.section, "solve failed: {}", e.message),
        }
        result
    }

    fn run(&self, problem: &Problem) -> Result<Solution, SolveError> {
        validate_problem(problem)?;

        let locks = locks::resolve_locks(problem)?;
        let domains = domain::build_domains(problem, &locks)?;
        let order = ordering::mrv_order(problem, &domains);
        debug!(order = ?order, "variable order fixed");

        let search = Search::new(problem, &domains, &order, &self.config);
        let mut state = SearchState::new(problem);
        let outcome = search.run(&mut state, &locks);
        debug_assert!(state.occupancy.is_empty(), "occupancy leaked out of search");
        debug!(
            nodes = state.stats.nodes,
            pruned = state.stats.pruned,
            backtracks = state.stats.backtracks,
            "search finished"
        );

        if !outcome? {
            return Err(SolveError::infeasible(
                "No timetable satisfies every constraint",
            ));
        }

        Ok(Solution {
            timetable: assemble(problem, &state.assignment)?,
            stats: state.stats,
        })
    }
}

/// Renders a complete assignment as a timetable.
fn assemble(
    problem: &Problem,
    assignment: &[Option<Candidate<'_>>],
) -> Result<Timetable, SolveError> {
    let mut timetable = Timetable::new();
    for (section, candidate) in problem.sections.iter().zip(assignment) {
        let candidate = candidate.ok_or_else(|| {
            SolveError::infeasible(format!("Section '{}' was left unplaced", section.id))
                .for_section(&section.id)
        })?;
        let slots = problem
            .timeslots
            .labels_of(candidate.run)
            .map(str::to_string)
            .collect();
        timetable.insert(
            section.id.clone(),
            ScheduledSection::new(slots, candidate.room.map(str::to_string)),
        );
    }
    Ok(timetable)
}
