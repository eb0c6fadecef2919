use std::collections::BTreeMap;

/// An identifier for a given variable, based on its index in the `Crossword`'s `variables` field.
pub type VariableId = usize;

/// An identifier for a given word, based on its index in the `Crossword`'s `words` field.
pub type WordId = usize;

/// Zero-indexed row and column coords for a cell in the grid, where row 0 is the top row.
pub type GridCoord = (usize, usize);

/// A (partial) mapping from variables to the words chosen for them during search.
pub type Assignment = BTreeMap<VariableId, WordId>;
