use std::collections::HashSet;

use crate::crossword::Crossword;
use crate::types::{Assignment, WordId};

/// Is every variable in the crossword assigned?
pub fn complete(crossword: &Crossword, assignment: &Assignment) -> bool {
    crossword
        .variable_ids()
        .all(|variable_id| assignment.contains_key(&variable_id))
}

/// Check a (possibly partial) assignment against every constraint: no word is used twice, every
/// word fits its slot, and assigned crossing slots agree on their shared letter. Unassigned
/// variables are ignored.
pub fn consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    let mut used: HashSet<WordId> = HashSet::with_capacity(assignment.len());

    for (&x, &x_word_id) in assignment {
        if !used.insert(x_word_id) {
            return false;
        }

        let x_word = crossword.word(x_word_id);
        if x_word.len() != crossword.variable(x).length {
            return false;
        }

        for &y in crossword.neighbors(x) {
            let Some(&y_word_id) = assignment.get(&y) else {
                continue;
            };
            let Some((i, j)) = crossword.overlap(x, y) else {
                continue;
            };

            if x_word.chars.get(i) != crossword.word(y_word_id).chars.get(j) {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossword() -> Crossword {
        Crossword::from_template_str("___\n#_#\n#_#\n", "cat\narc\ndog\nant\nox").unwrap()
    }

    fn assign(crossword: &Crossword, words: &[(usize, &str)]) -> Assignment {
        words
            .iter()
            .map(|&(variable_id, word)| (variable_id, crossword.word_id(word).unwrap()))
            .collect()
    }

    #[test]
    fn test_complete() {
        let crossword = crossword();

        assert!(!complete(&crossword, &Assignment::new()));
        assert!(!complete(&crossword, &assign(&crossword, &[(0, "cat")])));
        assert!(complete(&crossword, &assign(&crossword, &[(0, "cat"), (1, "arc")])));
    }

    #[test]
    fn test_consistent_accepts_partial_and_full_assignments() {
        let crossword = crossword();

        assert!(consistent(&crossword, &Assignment::new()));
        assert!(consistent(&crossword, &assign(&crossword, &[(1, "dog")])));
        assert!(consistent(&crossword, &assign(&crossword, &[(0, "cat"), (1, "arc")])));
        assert!(consistent(&crossword, &assign(&crossword, &[(0, "cat"), (1, "ant")])));
    }

    #[test]
    fn test_consistent_rejects_repeated_words() {
        // Both slots start in the top-left cell, so the same word agrees with itself there.
        let crossword = Crossword::from_template_str("___\n_##\n_##\n", "ant").unwrap();
        let word_id = crossword.word_id("ant").unwrap();
        let assignment: Assignment = [(0, word_id), (1, word_id)].into_iter().collect();

        assert_eq!(crossword.overlap(0, 1), Some((0, 0)));
        assert!(!consistent(&crossword, &assignment));
    }

    #[test]
    fn test_consistent_rejects_crossing_conflicts() {
        let crossword = crossword();

        assert!(!consistent(&crossword, &assign(&crossword, &[(0, "cat"), (1, "dog")])));
        assert!(!consistent(&crossword, &assign(&crossword, &[(0, "arc"), (1, "ant")])));
    }

    #[test]
    fn test_consistent_rejects_wrong_lengths() {
        let crossword = crossword();

        assert!(!consistent(&crossword, &assign(&crossword, &[(0, "ox")])));
    }
}
