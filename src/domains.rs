use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};

use crate::crossword::Crossword;
use crate::types::{VariableId, WordId};

/// A position in a `DomainStore`'s edit log. Restoring to it undoes every removal made since it
/// was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// The live set of candidate words for each variable during a single solve. Domains only shrink;
/// every removal is recorded so that search can roll back to an earlier `Checkpoint` when it
/// abandons a branch.
#[derive(Clone)]
pub struct DomainStore {
    domains: Vec<BTreeSet<WordId>>,

    /// (variable, removed word) in the order the removals happened.
    trail: Vec<(VariableId, WordId)>,
}

impl Debug for DomainStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainStore")
            .field(
                "domain_sizes",
                &self.domains.iter().map(BTreeSet::len).collect::<Vec<_>>(),
            )
            .field("trail_length", &self.trail.len())
            .finish()
    }
}

impl DomainStore {
    /// Start every variable off with the full vocabulary.
    pub fn new(crossword: &Crossword) -> DomainStore {
        let vocabulary: BTreeSet<WordId> = (0..crossword.words().len()).collect();

        DomainStore {
            domains: crossword.variable_ids().map(|_| vocabulary.clone()).collect(),
            trail: vec![],
        }
    }

    pub fn get(&self, variable_id: VariableId) -> &BTreeSet<WordId> {
        &self.domains[variable_id]
    }

    pub fn len(&self, variable_id: VariableId) -> usize {
        self.domains[variable_id].len()
    }

    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.domains[variable_id].is_empty()
    }

    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.domains[variable_id].contains(&word_id)
    }

    /// The first variable whose domain has been emptied, if any.
    pub fn first_empty(&self) -> Option<VariableId> {
        self.domains.iter().position(BTreeSet::is_empty)
    }

    /// Remove a word from a variable's domain, returning whether it was present.
    pub fn remove(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        let removed = self.domains[variable_id].remove(&word_id);
        if removed {
            self.trail.push((variable_id, word_id));
        }
        removed
    }

    /// Keep only the words matching `keep`, returning how many were removed.
    pub fn retain<F>(&mut self, variable_id: VariableId, mut keep: F) -> usize
    where
        F: FnMut(WordId) -> bool,
    {
        let doomed: Vec<WordId> = self.domains[variable_id]
            .iter()
            .copied()
            .filter(|&word_id| !keep(word_id))
            .collect();

        for &word_id in &doomed {
            self.remove(variable_id, word_id);
        }

        doomed.len()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Undo removals back to `checkpoint`, newest first.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        while self.trail.len() > checkpoint.0 {
            if let Some((variable_id, word_id)) = self.trail.pop() {
                self.domains[variable_id].insert(word_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossword() -> Crossword {
        Crossword::from_template_str("___\n#_#\n#_#\n", "cat\ncar\ndog\nox\n").unwrap()
    }

    #[test]
    fn test_new_copies_vocabulary() {
        let crossword = crossword();
        let domains = DomainStore::new(&crossword);

        for variable_id in crossword.variable_ids() {
            assert_eq!(domains.len(variable_id), 4);
        }
        assert_eq!(domains.first_empty(), None);
    }

    #[test]
    fn test_remove_is_per_variable() {
        let crossword = crossword();
        let mut domains = DomainStore::new(&crossword);

        assert!(domains.remove(0, 1));
        assert!(!domains.remove(0, 1));
        assert!(!domains.contains(0, 1));
        assert!(domains.contains(1, 1));
    }

    #[test]
    fn test_restore_undoes_removals_since_checkpoint() {
        let crossword = crossword();
        let mut domains = DomainStore::new(&crossword);

        domains.remove(0, 0);
        let checkpoint = domains.checkpoint();

        assert_eq!(domains.retain(1, |word_id| word_id == 2), 3);
        domains.remove(0, 3);
        assert_eq!(domains.get(1).iter().copied().collect::<Vec<_>>(), vec![2]);

        domains.restore(checkpoint);

        assert_eq!(domains.len(1), 4);
        assert_eq!(domains.len(0), 3);
        assert!(!domains.contains(0, 0));
        assert_eq!(domains.checkpoint(), checkpoint);
    }

    #[test]
    fn test_first_empty() {
        let crossword = crossword();
        let mut domains = DomainStore::new(&crossword);

        domains.retain(1, |_| false);

        assert!(domains.is_empty(1));
        assert_eq!(domains.first_empty(), Some(1));
    }
}
