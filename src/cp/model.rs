//! Boolean constraint model.
//!
//! A `CpModel` holds named boolean decision variables and cardinality
//! constraints over them. It is a pure description; solving happens in
//! [`super::CpSolver`] implementations.

use serde::{Deserialize, Serialize};

/// Handle to a boolean decision variable inside a [`CpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoolVar(usize);

impl BoolVar {
    /// Position of this variable in the model (and in solution vectors).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A constraint over boolean variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CpConstraint {
    /// Exactly one of the listed variables is true.
    ExactlyOne(Vec<BoolVar>),
    /// At most one of the listed variables is true.
    AtMostOne(Vec<BoolVar>),
    /// The variable takes the given value.
    Fixed { var: BoolVar, value: bool },
}

/// A satisfaction model over boolean variables.
///
/// There is no objective: any assignment satisfying every constraint
/// is a solution.
///
/// # Example
/// ```
/// use u_tournament::cp::CpModel;
///
/// let mut model = CpModel::new("pick-one");
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// model.add_exactly_one([a, b]);
/// model.fix(a, false);
/// assert_eq!(model.var_count(), 2);
/// assert_eq!(model.constraint_count(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CpModel {
    name: String,
    var_names: Vec<String>,
    constraints: Vec<CpConstraint>,
}

impl CpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            var_names: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Model name (used in diagnostics).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a new boolean variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        self.var_names.push(name.into());
        BoolVar(self.var_names.len() - 1)
    }

    /// Requires exactly one of `vars` to be true.
    pub fn add_exactly_one(&mut self, vars: impl IntoIterator<Item = BoolVar>) {
        self.constraints
            .push(CpConstraint::ExactlyOne(vars.into_iter().collect()));
    }

    /// Requires at most one of `vars` to be true.
    pub fn add_at_most_one(&mut self, vars: impl IntoIterator<Item = BoolVar>) {
        self.constraints
            .push(CpConstraint::AtMostOne(vars.into_iter().collect()));
    }

    /// Pins a variable to a value.
    pub fn fix(&mut self, var: BoolVar, value: bool) {
        self.constraints.push(CpConstraint::Fixed { var, value });
    }

    /// Number of declared variables.
    pub fn var_count(&self) -> usize {
        self.var_names.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Name of a variable.
    pub fn var_name(&self, var: BoolVar) -> &str {
        &self.var_names[var.0]
    }

    /// All constraints in insertion order.
    pub fn constraints(&self) -> &[CpConstraint] {
        &self.constraints
    }
}
