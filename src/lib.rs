//! Constraint-satisfaction crossword filling: slots are variables, candidate words are their
//! domains, and crossing slots must agree on their shared letter.
//!
//! A fill runs in three phases: node consistency (length filtering), a global AC-3 pass, and then
//! backtracking search ordered by minimum-remaining-values, degree and least-constraining-value.

pub mod consistency;
pub mod crossword;
pub mod domains;
pub mod render;
pub mod search;
pub mod solver;
pub mod types;
pub mod validator;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

/// The expected maximum number of slots crossing any single slot.
pub const MAX_NEIGHBOR_COUNT: usize = 21;

pub use consistency::{ac3, enforce_node_consistency, revise};
pub use crossword::{Crossword, CrosswordError, Direction, Variable, Word};
pub use domains::{Checkpoint, DomainStore};
pub use render::{letter_grid, render_grid};
pub use search::{backtrack, order_domain_values, select_unassigned_variable};
pub use solver::{solve, FillFailure, FillSuccess, SolverConfig, Statistics};
pub use types::{Assignment, VariableId, WordId};
pub use validator::{complete, consistent};
