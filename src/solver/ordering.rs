//! Static variable ordering (minimum remaining values).

use std::cmp::Reverse;

use super::domain::Domain;
use crate::models::Problem;

/// Section indices in search order.
///
/// Ascending domain size, ties broken by descending duration, remaining ties
/// by input order (the sort is stable). Computed once before search.
pub(crate) fn mrv_order(problem: &Problem, domains: &[Domain<'_>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..problem.sections.len()).collect();
    order.sort_by_key(|&i| (domains[i].len(), Reverse(problem.sections[i].duration)));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Section, Timeslots};
    use crate::solver::domain::Candidate;

    fn domain_of(size: usize, timeslots: &Timeslots) -> Domain<'static> {
        (0..size)
            .map(|i| Candidate {
                run: timeslots.run(i, 1).unwrap(),
                room: None,
            })
            .collect()
    }

    #[test]
    fn test_mrv_order() {
        let ts = Timeslots::new(["S1", "S2", "S3", "S4"]);
        let p = Problem::new(ts.clone())
            .with_section(Section::new("A", "T", "G"))
            .with_section(Section::new("B", "T", "G").with_duration(2))
            .with_section(Section::new("C", "T", "G"))
            .with_section(Section::new("D", "T", "G").with_duration(3))
            .with_section(Section::new("E", "T", "G"));
        let domains = vec![
            domain_of(3, &ts),
            domain_of(3, &ts),
            domain_of(1, &ts),
            domain_of(3, &ts),
            domain_of(3, &ts),
        ];
        // C is most constrained; among size 3: D (3 slots), B (2), then A, E in input order.
        assert_eq!(mrv_order(&p, &domains), vec![2, 3, 1, 0, 4]);
    }

    #[test]
    fn test_empty() {
        let p = Problem::new(Timeslots::new(["S1"]));
        assert!(mrv_order(&p, &[]).is_empty());
    }
}
