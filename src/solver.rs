use instant::{Duration, Instant};
use log::debug;

use crate::consistency::{ac3, enforce_node_consistency};
use crate::crossword::{Crossword, Variable};
use crate::domains::DomainStore;
use crate::search::backtrack;
use crate::types::{Assignment, VariableId};

/// Settings for a fill.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// After each tentative assignment, propagate it to the unassigned neighbors with AC-3 and
    /// reject it early if some domain is wiped out. This only prunes dead branches; the set of
    /// solutions is the same either way.
    pub maintain_arc_consistency: bool,
}

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub states: u64,
    pub backtracks: u64,
    pub revisions: usize,
    pub duration: Duration,
}

/// A struct representing the results of a successful fill.
#[derive(Debug)]
pub struct FillSuccess {
    pub assignment: Assignment,
    pub statistics: Statistics,
}

impl FillSuccess {
    /// The chosen word for each variable, in variable order.
    pub fn words<'a>(&self, crossword: &'a Crossword) -> Vec<(&'a Variable, &'a str)> {
        self.assignment
            .iter()
            .map(|(&variable_id, &word_id)| {
                (
                    crossword.variable(variable_id),
                    crossword.word(word_id).string.as_str(),
                )
            })
            .collect()
    }
}

/// Why a fill didn't produce a solution. Both are ordinary outcomes for an unfillable puzzle.
#[derive(Debug)]
pub enum FillFailure {
    /// Node or arc consistency emptied this variable's domain before search started.
    UnsatisfiableByPropagation { variable_id: VariableId },

    /// Search tried every branch without completing an assignment.
    NoSolutionFound { statistics: Statistics },
}

/// Fill the crossword: enforce node consistency, then global arc consistency, then search.
pub fn solve(crossword: &Crossword, config: &SolverConfig) -> Result<FillSuccess, FillFailure> {
    let start = Instant::now();
    let mut statistics = Statistics::default();
    let mut domains = DomainStore::new(crossword);

    let removed = enforce_node_consistency(crossword, &mut domains);
    debug!(target: "solver", "node consistency removed {removed} words");

    if let Some(variable_id) = domains.first_empty() {
        debug!(
            target: "solver",
            "no words of the right length for {}",
            crossword.variable(variable_id)
        );
        return Err(FillFailure::UnsatisfiableByPropagation { variable_id });
    }

    match ac3(crossword, &mut domains, None) {
        Ok(success) => {
            statistics.revisions += success.revisions;
            debug!(
                target: "solver",
                "arc consistency reached after {} revisions",
                success.revisions
            );
        }
        Err(failure) => {
            debug!(
                target: "solver",
                "arc consistency wiped out {} after {} revisions",
                crossword.variable(failure.variable_id),
                failure.revisions
            );
            return Err(FillFailure::UnsatisfiableByPropagation {
                variable_id: failure.variable_id,
            });
        }
    }

    let result = backtrack(
        crossword,
        &mut domains,
        Assignment::new(),
        config,
        &mut statistics,
    );
    statistics.duration = start.elapsed();
    debug!(target: "solver", "search finished: {:?}", statistics);

    match result {
        Some(assignment) => Ok(FillSuccess {
            assignment,
            statistics,
        }),
        None => Err(FillFailure::NoSolutionFound { statistics }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::Direction;
    use crate::validator::{complete, consistent};

    fn crossing(words: &[&str]) -> Crossword {
        Crossword::from_variables(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 3),
            ],
            words,
        )
        .unwrap()
    }

    #[test]
    fn test_solve_crossing() {
        let crossword = crossing(&["cat", "arc", "dog"]);

        let result = solve(&crossword, &SolverConfig::default()).expect("Failed to find a fill");

        assert!(complete(&crossword, &result.assignment));
        assert!(consistent(&crossword, &result.assignment));
        assert_eq!(
            result
                .words(&crossword)
                .into_iter()
                .map(|(_, word)| word)
                .collect::<Vec<_>>(),
            vec!["CAT", "ARC"]
        );
    }

    #[test]
    fn test_solve_without_a_shared_letter() {
        // No across word has a middle letter that any word starts with.
        for words in [&["cat", "car", "dog"][..], &["cat", "fox"][..]] {
            let crossword = crossing(words);

            let result = solve(&crossword, &SolverConfig::default());

            assert!(matches!(
                result,
                Err(FillFailure::UnsatisfiableByPropagation { .. })
            ));
        }
    }

    #[test]
    fn test_solve_reports_the_variable_wiped_out_by_arc_consistency() {
        // Both domains survive node consistency; the first arc revised is (0, 1).
        let crossword = crossing(&["cat", "car", "dog"]);

        let result = solve(&crossword, &SolverConfig::default());

        assert!(matches!(
            result,
            Err(FillFailure::UnsatisfiableByPropagation { variable_id: 0 })
        ));
    }

    #[test]
    fn test_solve_without_words_of_the_right_length() {
        let crossword = crossing(&["ox", "zebra"]);

        let result = solve(&crossword, &SolverConfig::default());

        assert!(matches!(
            result,
            Err(FillFailure::UnsatisfiableByPropagation { variable_id: 0 })
        ));
    }

    #[test]
    fn test_solve_reports_exhausted_search() {
        // Arc-consistent, but the only fill reuses the same word.
        let crossword = Crossword::from_template_str("___\n_##\n_##\n", "ant").unwrap();

        match solve(&crossword, &SolverConfig::default()) {
            Err(FillFailure::NoSolutionFound { statistics }) => {
                assert!(statistics.states > 0);
            }
            other => panic!("Expected exhausted search, got {:?}", other),
        }
    }

    #[test]
    fn test_solve_with_no_slots() {
        let crossword = Crossword::from_template_str("_#_\n", "cat").unwrap();

        let result = solve(&crossword, &SolverConfig::default()).expect("Failed to find a fill");

        assert!(result.assignment.is_empty());
    }
}
