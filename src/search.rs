//! Backtracking search over partial assignments.
//!
//! Variables are chosen by minimum remaining values, with ties going to the variable that crosses
//! the most other slots. Each variable's words are tried in least-constraining-value order. The
//! search keeps an explicit stack of frames rather than recursing, and each frame remembers a
//! `Checkpoint` so that any domain narrowing done under it can be rolled back before the next
//! candidate is tried.

use log::trace;
use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};

use crate::consistency::{ac3, DirectedArc};
use crate::crossword::Crossword;
use crate::domains::{Checkpoint, DomainStore};
use crate::solver::{SolverConfig, Statistics};
use crate::types::{Assignment, VariableId, WordId};
use crate::validator::{complete, consistent};

/// Pick the unassigned variable with the fewest remaining words, preferring the one with the most
/// neighbors on a tie and the lowest id after that. Returns `None` only if every variable is
/// assigned.
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &DomainStore,
    assignment: &Assignment,
) -> Option<VariableId> {
    crossword
        .variable_ids()
        .filter(|variable_id| !assignment.contains_key(variable_id))
        .min_by_key(|&variable_id| {
            (
                domains.len(variable_id),
                Reverse(crossword.neighbors(variable_id).len()),
            )
        })
}

/// For each word in the variable's domain, count how many words it would rule out across the
/// domains of its unassigned neighbors. Only the neighbors' current domains are consulted; there's
/// no deeper lookahead.
pub fn least_constraining_costs(
    crossword: &Crossword,
    domains: &DomainStore,
    variable_id: VariableId,
    assignment: &Assignment,
) -> Vec<(WordId, usize)> {
    // (cell index in our word, neighbor domain size, how often each letter appears in the
    // neighbor's shared cell)
    let neighbor_glyph_counts: Vec<(usize, usize, HashMap<char, usize>)> = crossword
        .neighbors(variable_id)
        .iter()
        .filter(|&&neighbor_id| !assignment.contains_key(&neighbor_id))
        .filter_map(|&neighbor_id| {
            let (cell, neighbor_cell) = crossword.overlap(variable_id, neighbor_id)?;
            let mut glyph_counts: HashMap<char, usize> = HashMap::new();
            for &word_id in domains.get(neighbor_id) {
                if let Some(&glyph) = crossword.word(word_id).chars.get(neighbor_cell) {
                    *glyph_counts.entry(glyph).or_insert(0) += 1;
                }
            }
            Some((cell, domains.len(neighbor_id), glyph_counts))
        })
        .collect();

    domains
        .get(variable_id)
        .iter()
        .map(|&word_id| {
            let word = crossword.word(word_id);
            let cost = neighbor_glyph_counts
                .iter()
                .map(|(cell, option_count, glyph_counts)| {
                    let compatible = word
                        .chars
                        .get(*cell)
                        .and_then(|glyph| glyph_counts.get(glyph))
                        .copied()
                        .unwrap_or(0);
                    option_count - compatible
                })
                .sum();
            (word_id, cost)
        })
        .collect()
}

/// The variable's domain, ordered so that the words ruling out the fewest neighbor options come
/// first. Ties keep domain order.
pub fn order_domain_values(
    crossword: &Crossword,
    domains: &DomainStore,
    variable_id: VariableId,
    assignment: &Assignment,
) -> Vec<WordId> {
    let mut costs = least_constraining_costs(crossword, domains, variable_id, assignment);
    costs.sort_by_key(|&(_, cost)| cost);
    costs.into_iter().map(|(word_id, _)| word_id).collect()
}

/// One level of the search: the variable being tried, the words not yet tried for it, and the
/// domain state to return to before trying each of them.
#[derive(Debug)]
struct Frame {
    variable_id: VariableId,
    candidates: VecDeque<WordId>,
    checkpoint: Checkpoint,
}

/// Narrow the newly assigned variable's domain to its word and propagate that to its unassigned
/// neighbors. Returns false if some domain is wiped out.
fn propagate_choice(
    crossword: &Crossword,
    domains: &mut DomainStore,
    assignment: &Assignment,
    variable_id: VariableId,
    word_id: WordId,
    statistics: &mut Statistics,
) -> bool {
    domains.retain(variable_id, |candidate| candidate == word_id);

    let arcs: Vec<DirectedArc> = crossword
        .neighbors(variable_id)
        .iter()
        .filter(|&&neighbor_id| !assignment.contains_key(&neighbor_id))
        .map(|&neighbor_id| (neighbor_id, variable_id))
        .collect();

    match ac3(crossword, domains, Some(arcs)) {
        Ok(success) => {
            statistics.revisions += success.revisions;
            true
        }
        Err(failure) => {
            statistics.revisions += failure.revisions;
            false
        }
    }
}

/// Extend `assignment` to a complete, consistent assignment if one exists. Every domain change
/// made along an abandoned branch is rolled back, so on failure `domains` is left as it was found.
pub fn backtrack(
    crossword: &Crossword,
    domains: &mut DomainStore,
    mut assignment: Assignment,
    config: &SolverConfig,
    statistics: &mut Statistics,
) -> Option<Assignment> {
    let mut stack: Vec<Frame> = vec![];

    loop {
        if complete(crossword, &assignment) {
            return Some(assignment);
        }

        if let Some(variable_id) = select_unassigned_variable(crossword, domains, &assignment) {
            let candidates = order_domain_values(crossword, domains, variable_id, &assignment);
            trace!(
                target: "search",
                "depth {}: {} with {} candidates",
                stack.len(),
                crossword.variable(variable_id),
                candidates.len()
            );
            stack.push(Frame {
                variable_id,
                candidates: candidates.into(),
                checkpoint: domains.checkpoint(),
            });
        }

        // Find the next candidate that keeps the assignment consistent, unwinding any frames that
        // run out of candidates along the way.
        loop {
            let Some(frame) = stack.last_mut() else {
                return None;
            };
            let variable_id = frame.variable_id;

            assignment.remove(&variable_id);
            domains.restore(frame.checkpoint);

            let Some(word_id) = frame.candidates.pop_front() else {
                trace!(target: "search", "exhausted {}", crossword.variable(variable_id));
                stack.pop();
                statistics.backtracks += 1;
                continue;
            };

            statistics.states += 1;
            assignment.insert(variable_id, word_id);

            if !consistent(crossword, &assignment) {
                continue;
            }

            if config.maintain_arc_consistency
                && !propagate_choice(
                    crossword,
                    domains,
                    &assignment,
                    variable_id,
                    word_id,
                    statistics,
                )
            {
                continue;
            }

            break;
        }
    }
}
