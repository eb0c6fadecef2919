//! Node consistency and the AC-3 algorithm for establishing arc consistency. For our purposes, a
//! set of domains is arc-consistent when every word remaining for a slot has at least one word in
//! each crossing slot's domain that places the same letter in the shared cell.
//!
//! We keep revising arcs until no more eliminations are possible, or until some slot runs out of
//! options entirely, which means the puzzle can't be filled from this state.

use bit_set::BitSet;
use log::{debug, trace};
use std::collections::{HashSet, VecDeque};

use crate::crossword::Crossword;
use crate::domains::DomainStore;
use crate::types::VariableId;

/// An ordered pair `(x, y)`: revising it makes x's domain consistent with y's.
pub type DirectedArc = (VariableId, VariableId);

/// Remove every word whose length doesn't match its slot's length. Returns the number of words
/// removed across all domains; this may leave a domain empty, which callers check separately.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut DomainStore) -> usize {
    crossword
        .variable_ids()
        .map(|variable_id| {
            let length = crossword.variable(variable_id).length;
            domains.retain(variable_id, |word_id| crossword.word(word_id).len() == length)
        })
        .sum()
}

/// Make `x` arc-consistent with `y` by removing every word from x's domain that has no compatible
/// word in y's domain. y's domain is never touched. Returns whether anything was removed.
pub fn revise(
    crossword: &Crossword,
    domains: &mut DomainStore,
    x: VariableId,
    y: VariableId,
) -> bool {
    let Some((x_cell, y_cell)) = crossword.overlap(x, y) else {
        return false;
    };

    // The letters y can still place in the shared cell.
    let supported: HashSet<char> = domains
        .get(y)
        .iter()
        .filter_map(|&word_id| crossword.word(word_id).chars.get(y_cell).copied())
        .collect();

    let removed = domains.retain(x, |word_id| {
        crossword
            .word(word_id)
            .chars
            .get(x_cell)
            .map_or(false, |glyph| supported.contains(glyph))
    });

    if removed > 0 {
        trace!(
            target: "consistency",
            "revise({x}, {y}) removed {removed} words, {} remaining",
            domains.len(x)
        );
    }

    removed > 0
}

/// Every ordered pair of distinct variables, which is the default starting point for `ac3`.
pub fn all_arcs(crossword: &Crossword) -> Vec<DirectedArc> {
    crossword
        .variable_ids()
        .flat_map(|x| {
            crossword
                .variable_ids()
                .filter(move |&y| y != x)
                .map(move |y| (x, y))
        })
        .collect()
}

/// Results from a successful call to `ac3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcConsistencySuccess {
    /// How many arcs were revised.
    pub revisions: usize,
}

/// Result from a failed call to `ac3`, naming the variable whose domain was wiped out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    pub variable_id: VariableId,
    pub revisions: usize,
}

pub type ArcConsistencyResult = Result<ArcConsistencySuccess, ArcConsistencyFailure>;

/// Worklist of arcs still to be revised. An arc that's already waiting isn't queued twice.
#[derive(Debug)]
struct ArcQueue {
    queue: VecDeque<DirectedArc>,
    queued: BitSet,
    variable_count: usize,
}

impl ArcQueue {
    fn with_initial_queue<Items>(variable_count: usize, items: Items) -> ArcQueue
    where
        Items: IntoIterator<Item = DirectedArc>,
    {
        let mut queue = ArcQueue {
            queue: VecDeque::new(),
            queued: BitSet::with_capacity(variable_count * variable_count),
            variable_count,
        };
        for arc in items {
            queue.enqueue(arc);
        }
        queue
    }

    fn index(&self, (x, y): DirectedArc) -> usize {
        x * self.variable_count + y
    }

    fn pop_front(&mut self) -> Option<DirectedArc> {
        let arc = self.queue.pop_front()?;
        let index = self.index(arc);
        self.queued.remove(index);
        Some(arc)
    }

    fn enqueue(&mut self, arc: DirectedArc) {
        let index = self.index(arc);
        if self.queued.insert(index) {
            self.queue.push_back(arc);
        }
    }
}

/// Enforce arc consistency with AC-3. If `arcs` is `None`, start from every arc in the problem;
/// otherwise start from the given arcs only (e.g. the ones touching a just-assigned slot).
///
/// Whenever revising `(x, y)` shrinks x's domain, every arc `(z, x)` with `z` a neighbor of x
/// other than y is re-queued. Fails as soon as any domain becomes empty.
pub fn ac3(
    crossword: &Crossword,
    domains: &mut DomainStore,
    arcs: Option<Vec<DirectedArc>>,
) -> ArcConsistencyResult {
    let variable_count = crossword.variables().len();
    let mut queue = ArcQueue::with_initial_queue(
        variable_count,
        arcs.unwrap_or_else(|| all_arcs(crossword)),
    );
    let mut revisions = 0;

    while let Some((x, y)) = queue.pop_front() {
        revisions += 1;

        if !revise(crossword, domains, x, y) {
            continue;
        }

        if domains.is_empty(x) {
            debug!(
                target: "consistency",
                "domain of {} wiped out after {revisions} revisions",
                crossword.variable(x)
            );
            return Err(ArcConsistencyFailure {
                variable_id: x,
                revisions,
            });
        }

        for &z in crossword.neighbors(x) {
            if z != y {
                queue.enqueue((z, x));
            }
        }
    }

    Ok(ArcConsistencySuccess { revisions })
}
