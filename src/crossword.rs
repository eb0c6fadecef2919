//! This module describes a puzzle independently of any fill algorithm: the slots (variables), the
//! way they cross each other, and the vocabulary available to fill them.
//!
//! A `Crossword` is immutable once built. All of the live state of a fill lives in the
//! `DomainStore` and the search's `Assignment`.

use smallvec::SmallVec;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::{Debug, Formatter};
use std::ops::Range;
use std::path::Path;
use std::{fmt, fs};

use crate::types::{GridCoord, VariableId, WordId};
use crate::{MAX_NEIGHBOR_COUNT, MAX_SLOT_LENGTH};

/// The character marking an open cell in a structure file; anything else is a block.
pub const OPEN_CELL: char = '_';

/// The direction that a slot is facing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A word slot in the grid. Two variables are the same variable only if every field matches.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Variable {
        Variable {
            row,
            col,
            direction,
            length,
        }
    }

    /// Generate the coords for each cell of this slot, in word order.
    pub fn cells(&self) -> Vec<GridCoord> {
        (0..self.length)
            .map(|cell_idx| match self.direction {
                Direction::Across => (self.row, self.col + cell_idx),
                Direction::Down => (self.row + cell_idx, self.col),
            })
            .collect()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.row, self.col, self.direction, self.length
        )
    }
}

/// A candidate word, with its characters split out so that crossing checks don't have to walk
/// the string.
#[derive(Debug, Clone)]
pub struct Word {
    pub string: String,
    pub chars: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: String) -> Word {
        let chars = string.chars().collect();
        Word { string, chars }
    }

    /// Length in characters, which is what slot lengths are measured in.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Problems that can occur while building a `Crossword`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrosswordError {
    InvalidPath(String),
    EmptyStructure,
    EmptyVariable(Variable),
    DuplicateVariable(Variable),
}

impl fmt::Display for CrosswordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CrosswordError::InvalidPath(path) => write!(f, "Can't read file: \"{path}\""),
            CrosswordError::EmptyStructure => write!(f, "Structure must have at least one cell"),
            CrosswordError::EmptyVariable(variable) => {
                write!(f, "Slot {variable} must have at least one cell")
            }
            CrosswordError::DuplicateVariable(variable) => {
                write!(f, "Slot {variable} appears more than once")
            }
        }
    }
}

impl std::error::Error for CrosswordError {}

/// The static description of a puzzle.
pub struct Crossword {
    pub height: usize,
    pub width: usize,
    structure: Vec<Vec<bool>>,
    variables: Vec<Variable>,
    words: Vec<Word>,

    /// Keyed by ordered pairs; both `(x, y)` and `(y, x)` are present for every crossing.
    overlaps: HashMap<(VariableId, VariableId), (usize, usize)>,

    neighbors: Vec<SmallVec<[VariableId; MAX_NEIGHBOR_COUNT]>>,
}

impl Debug for Crossword {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crossword")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("variables", &self.variables)
            .field("words", &format!("({} entries)", self.words.len()))
            .finish()
    }
}

impl Crossword {
    /// Build a crossword from a grid of open (`true`) and blocked (`false`) cells. Every maximal
    /// run of at least two open cells becomes a variable: across runs first in row-major order,
    /// then down runs in column-major order. Short rows are treated as padded with blocks.
    pub fn new<I, S>(structure: Vec<Vec<bool>>, words: I) -> Result<Crossword, CrosswordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let height = structure.len();
        let width = structure.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Err(CrosswordError::EmptyStructure);
        }

        let structure: Vec<Vec<bool>> = structure
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        let mut variables: Vec<Variable> = vec![];

        for row in 0..height {
            let mut col = 0;
            while col < width {
                let run = (col..width).take_while(|&c| structure[row][c]).count();
                if run > 1 {
                    variables.push(Variable::new(row, col, Direction::Across, run));
                }
                col += run.max(1);
            }
        }

        for col in 0..width {
            let mut row = 0;
            while row < height {
                let run = (row..height).take_while(|&r| structure[r][col]).count();
                if run > 1 {
                    variables.push(Variable::new(row, col, Direction::Down, run));
                }
                row += run.max(1);
            }
        }

        Ok(Self::build(height, width, structure, variables, words))
    }

    /// Build a crossword from an explicit list of slots. The grid is the smallest one containing
    /// every slot, with any cell not covered by a slot treated as a block.
    pub fn from_variables<I, S>(
        variables: Vec<Variable>,
        words: I,
    ) -> Result<Crossword, CrosswordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if variables.is_empty() {
            return Err(CrosswordError::EmptyStructure);
        }

        let mut seen: HashSet<Variable> = HashSet::with_capacity(variables.len());
        for &variable in &variables {
            if variable.length == 0 {
                return Err(CrosswordError::EmptyVariable(variable));
            }
            if !seen.insert(variable) {
                return Err(CrosswordError::DuplicateVariable(variable));
            }
        }

        let all_cells: Vec<GridCoord> = variables.iter().flat_map(Variable::cells).collect();
        let height = all_cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0);
        let width = all_cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0);

        let mut structure = vec![vec![false; width]; height];
        for (row, col) in all_cells {
            structure[row][col] = true;
        }

        Ok(Self::build(height, width, structure, variables, words))
    }

    /// Parse a structure file (`_` for open cells, anything else for blocks) and a word list (one
    /// word per line). Every line is a row; blank and short lines are padded with blocks.
    pub fn from_template_str(structure: &str, words: &str) -> Result<Crossword, CrosswordError> {
        let structure: Vec<Vec<bool>> = structure
            .lines()
            .map(|line| line.trim_end().chars().map(|c| c == OPEN_CELL).collect())
            .collect();

        Self::new(structure, words.lines())
    }

    /// Read and parse a structure file and a word list file.
    pub fn from_files(
        structure_path: &Path,
        words_path: &Path,
    ) -> Result<Crossword, CrosswordError> {
        let read = |path: &Path| {
            fs::read_to_string(path)
                .map_err(|_| CrosswordError::InvalidPath(path.to_string_lossy().into()))
        };

        Self::from_template_str(&read(structure_path)?, &read(words_path)?)
    }

    fn build<I, S>(
        height: usize,
        width: usize,
        structure: Vec<Vec<bool>>,
        variables: Vec<Variable>,
        words: I,
    ) -> Crossword
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Normalize, dedupe and sort the vocabulary so that word ids are stable.
        let words: Vec<Word> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .map(Word::new)
            .collect();

        // (variable id, cell index within variable) for every slot touching each cell.
        let mut entries_by_cell: HashMap<GridCoord, Vec<(VariableId, usize)>> = HashMap::new();
        for (variable_id, variable) in variables.iter().enumerate() {
            for (cell_idx, cell) in variable.cells().into_iter().enumerate() {
                entries_by_cell
                    .entry(cell)
                    .or_default()
                    .push((variable_id, cell_idx));
            }
        }

        // Walking cells in word order means that if two slots share several cells, the first one
        // wins from both sides, keeping the map symmetric.
        let mut overlaps: HashMap<(VariableId, VariableId), (usize, usize)> = HashMap::new();
        let mut neighbors: Vec<SmallVec<[VariableId; MAX_NEIGHBOR_COUNT]>> =
            variables.iter().map(|_| SmallVec::new()).collect();

        for (x, variable) in variables.iter().enumerate() {
            for (x_cell_idx, cell) in variable.cells().into_iter().enumerate() {
                for &(y, y_cell_idx) in &entries_by_cell[&cell] {
                    if y != x && !overlaps.contains_key(&(x, y)) {
                        overlaps.insert((x, y), (x_cell_idx, y_cell_idx));
                        neighbors[x].push(y);
                    }
                }
            }
        }

        for variable_neighbors in &mut neighbors {
            variable_neighbors.sort_unstable();
        }

        Crossword {
            height,
            width,
            structure,
            variables,
            words,
            overlaps,
            neighbors,
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, variable_id: VariableId) -> &Variable {
        &self.variables[variable_id]
    }

    /// All variable ids, in the order used for deterministic tie-breaking.
    pub fn variable_ids(&self) -> Range<VariableId> {
        0..self.variables.len()
    }

    /// Look up the id of a variable by value.
    pub fn variable_id(&self, variable: &Variable) -> Option<VariableId> {
        self.variables.iter().position(|v| v == variable)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    /// Look up the id of a word, applying the same normalization as the vocabulary.
    pub fn word_id(&self, word: &str) -> Option<WordId> {
        let word = word.trim().to_uppercase();
        self.words
            .binary_search_by(|candidate| candidate.string.as_str().cmp(word.as_str()))
            .ok()
    }

    /// If `x` and `y` cross, return `(i, j)` where character `i` of x's word must equal character
    /// `j` of y's word.
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<(usize, usize)> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// The variables crossing `variable_id`, in id order.
    pub fn neighbors(&self, variable_id: VariableId) -> &[VariableId] {
        &self.neighbors[variable_id]
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.structure
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }
}
