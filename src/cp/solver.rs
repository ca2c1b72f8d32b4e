//! Bounded backtracking solver for [`CpModel`].
//!
//! # Algorithm
//!
//! 1. Propagate every constraint to a fixpoint (unit propagation over
//!    cardinality constraints).
//! 2. Pick the open `ExactlyOne` constraint with the fewest unassigned
//!    variables and branch on which of them is the true one.
//! 3. Variables left unassigned once every `ExactlyOne` is satisfied are
//!    set to false, which cannot violate `AtMostOne`.
//!
//! Branching over the members of an `ExactlyOne` is complete, so an
//! exhausted search proves infeasibility. The search stops early when the
//! node or time limit in [`SolverConfig`] is hit.
//!
//! # Reference
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming", Ch. 4

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{BoolVar, CpConstraint, CpModel};

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// A satisfying assignment was found.
    Feasible,
    /// The search space was exhausted without a solution.
    Infeasible,
    /// The node or time limit stopped the search first.
    LimitReached,
}

/// Solver output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpSolution {
    /// How the search ended.
    pub status: SolveStatus,
    /// Search nodes expanded.
    pub nodes: u64,
    values: Vec<bool>,
}

impl CpSolution {
    fn unsolved(status: SolveStatus, nodes: u64) -> Self {
        Self {
            status,
            nodes,
            values: Vec::new(),
        }
    }

    /// Whether a satisfying assignment is available.
    pub fn is_solution_found(&self) -> bool {
        self.status == SolveStatus::Feasible
    }

    /// Value of a variable. `false` when no solution was found.
    pub fn value(&self, var: BoolVar) -> bool {
        self.values.get(var.index()).copied().unwrap_or(false)
    }
}

/// Search limits and randomisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of search nodes to expand.
    pub node_limit: u64,
    /// Wall-clock limit in milliseconds. `None` = unbounded.
    pub time_limit_ms: Option<u64>,
    /// Seed for shuffling branch order. `None` = deterministic order.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            node_limit: 100_000,
            time_limit_ms: Some(5_000),
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Sets the node limit.
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Sets the time limit.
    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = Some(time_limit_ms);
        self
    }

    /// Sets the branching seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A solver for boolean satisfaction models.
pub trait CpSolver {
    /// Searches for an assignment satisfying every constraint of `model`.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution;
}

/// Depth-first search with cardinality propagation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleCpSolver;

impl SimpleCpSolver {
    /// Creates a solver.
    pub fn new() -> Self {
        Self
    }
}

impl CpSolver for SimpleCpSolver {
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        let mut search = Search {
            model,
            nodes: 0,
            node_limit: config.node_limit,
            deadline: config
                .time_limit_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            rng: config.seed.map(StdRng::seed_from_u64),
            limit_hit: false,
        };

        let found = search.run(vec![None; model.var_count()]);
        debug!(
            model = model.name(),
            nodes = search.nodes,
            found = found.is_some(),
            "cp search finished"
        );

        match found {
            Some(values) => CpSolution {
                status: SolveStatus::Feasible,
                nodes: search.nodes,
                values,
            },
            None if search.limit_hit => {
                CpSolution::unsolved(SolveStatus::LimitReached, search.nodes)
            }
            None => CpSolution::unsolved(SolveStatus::Infeasible, search.nodes),
        }
    }
}

type Assignment = Vec<Option<bool>>;

struct Search<'a> {
    model: &'a CpModel,
    nodes: u64,
    node_limit: u64,
    deadline: Option<Instant>,
    rng: Option<StdRng>,
    limit_hit: bool,
}

impl Search<'_> {
    fn run(&mut self, mut values: Assignment) -> Option<Vec<bool>> {
        if self.limit_hit || self.out_of_budget() {
            self.limit_hit = true;
            return None;
        }
        self.nodes += 1;

        if !propagate(self.model, &mut values) {
            return None;
        }

        let Some(mut candidates) = self.branch_candidates(&values) else {
            return Some(values.into_iter().map(|v| v.unwrap_or(false)).collect());
        };
        if let Some(rng) = self.rng.as_mut() {
            candidates.shuffle(rng);
        }

        for var in candidates {
            let mut child = values.clone();
            child[var.index()] = Some(true);
            if let Some(solution) = self.run(child) {
                return Some(solution);
            }
            if self.limit_hit {
                return None;
            }
        }
        None
    }

    fn out_of_budget(&self) -> bool {
        self.nodes >= self.node_limit
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Unassigned members of the tightest still-open `ExactlyOne`.
    fn branch_candidates(&self, values: &Assignment) -> Option<Vec<BoolVar>> {
        self.model
            .constraints()
            .iter()
            .filter_map(|c| match c {
                CpConstraint::ExactlyOne(vars) => {
                    if vars.iter().any(|v| values[v.index()] == Some(true)) {
                        return None;
                    }
                    let open: Vec<BoolVar> = vars
                        .iter()
                        .copied()
                        .filter(|v| values[v.index()].is_none())
                        .collect();
                    (!open.is_empty()).then_some(open)
                }
                _ => None,
            })
            .min_by_key(|open| open.len())
    }
}

/// Applies every constraint until nothing changes.
///
/// Returns `false` on conflict.
fn propagate(model: &CpModel, values: &mut Assignment) -> bool {
    loop {
        let mut changed = false;

        for constraint in model.constraints() {
            match constraint {
                CpConstraint::Fixed { var, value } => match values[var.index()] {
                    Some(current) if current != *value => return false,
                    Some(_) => {}
                    None => {
                        values[var.index()] = Some(*value);
                        changed = true;
                    }
                },
                CpConstraint::ExactlyOne(vars) | CpConstraint::AtMostOne(vars) => {
                    let exactly = matches!(constraint, CpConstraint::ExactlyOne(_));
                    let trues = vars
                        .iter()
                        .filter(|v| values[v.index()] == Some(true))
                        .count();

                    if trues > 1 {
                        return false;
                    }

                    if trues == 1 {
                        for v in vars {
                            if values[v.index()].is_none() {
                                values[v.index()] = Some(false);
                                changed = true;
                            }
                        }
                    } else if exactly {
                        let mut open = vars.iter().filter(|v| values[v.index()].is_none());
                        match (open.next(), open.next()) {
                            (None, _) => return false,
                            (Some(only), None) => {
                                values[only.index()] = Some(true);
                                changed = true;
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        if !changed {
            return true;
        }
    }
}
