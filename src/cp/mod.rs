//! Constraint-satisfaction kernel.
//!
//! A small boolean CSP layer: models are built from decision variables
//! and cardinality constraints (`ExactlyOne`, `AtMostOne`, `Fixed`), then
//! handed to a [`CpSolver`]. The draw and round-robin generators are
//! formulated on top of it.
//!
//! # Reference
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

mod model;
mod solver;

pub use model::{BoolVar, CpConstraint, CpModel};
pub use solver::{CpSolution, CpSolver, SimpleCpSolver, SolveStatus, SolverConfig};
