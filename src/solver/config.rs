//! Solver configuration and search statistics.

use std::time::Duration;

/// Configuration for [`TimetableSolver`](super::TimetableSolver).
///
/// The search has no built-in deadline; both limits are off by default.
/// When a limit is hit the search unwinds and reports
/// [`SolveErrorKind::LimitReached`](super::SolveErrorKind::LimitReached).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_timetable::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_node_limit(1_000_000)
///     .with_time_limit(Duration::from_secs(5));
/// assert_eq!(config.node_limit, Some(1_000_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of candidate trials. `None` = unlimited.
    pub node_limit: Option<u64>,
    /// Maximum wall-clock time. `None` = unlimited.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    /// Sets the node limit.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    /// Sets the time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Whether any limit is set.
    pub fn is_bounded(&self) -> bool {
        self.node_limit.is_some() || self.time_limit.is_some()
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidates tried (consistent or not).
    pub nodes: u64,
    /// Candidates abandoned because forward checking emptied a later domain.
    pub pruned: u64,
    /// Candidates undone after the subtree below them failed.
    pub backtracks: u64,
}
