//! CP-based round-robin generation.
//!
//! Partitions the `G·(G−1)/2` pairings of a group into `D` matchdays so
//! that every pairing is played once and every team plays exactly once
//! per matchday. For a group of four over three matchdays this is the
//! classic 1-factorisation of K4.
//!
//! # Formulation
//! - One boolean `y[p][d]` per (pair, matchday)
//! - `ExactlyOne(y[p][*])` per pair
//! - `ExactlyOne(y[p][d] for p ∋ team)` per (team, matchday)
//!
//! # Reference
//! de Werra (1981), "Scheduling in Sports", Annals of Discrete Mathematics 11

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cp::{BoolVar, CpModel, CpSolver, SolveStatus, SolverConfig};
use crate::error::{Result, TournamentError};
use crate::models::{Fixture, Group};

/// Matchday partition of one group's fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRobin {
    /// Group label.
    pub group: String,
    /// `matchdays[d]` holds the fixtures of matchday `d + 1`.
    pub matchdays: Vec<Vec<Fixture>>,
}

impl RoundRobin {
    /// Fixtures of a 1-based matchday. Empty when out of range.
    pub fn matchday(&self, matchday: usize) -> &[Fixture] {
        matchday
            .checked_sub(1)
            .and_then(|d| self.matchdays.get(d))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All fixtures, matchday by matchday.
    pub fn fixtures(&self) -> impl Iterator<Item = &Fixture> {
        self.matchdays.iter().flatten()
    }

    pub fn fixture_count(&self) -> usize {
        self.matchdays.iter().map(Vec::len).sum()
    }

    /// Opponent of `team` on a 1-based matchday.
    pub fn opponent_on(&self, team: &str, matchday: usize) -> Option<&str> {
        self.matchday(matchday)
            .iter()
            .find_map(|f| f.opponent_of(team))
    }
}

/// Builds and solves the round-robin model for one group.
///
/// Home/away follows group order: the earlier-drawn team is listed first.
pub struct RoundRobinBuilder<'a> {
    group: &'a Group,
    matchdays: usize,
}

impl<'a> RoundRobinBuilder<'a> {
    /// Creates a builder spreading `group`'s pairings over `matchdays` days.
    pub fn new(group: &'a Group, matchdays: usize) -> Self {
        Self { group, matchdays }
    }

    /// Unordered pairings `(i, j)` with `i < j`, in group order.
    fn pairs(&self) -> Vec<(usize, usize)> {
        let n = self.group.len();
        (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect()
    }

    /// Builds the CP model together with its `y[p][d]` variable grid.
    pub fn build(&self) -> (CpModel, Vec<Vec<BoolVar>>) {
        let pairs = self.pairs();
        let mut model = CpModel::new(format!("round-robin-{}", self.group.label));

        let vars: Vec<Vec<BoolVar>> = pairs
            .iter()
            .map(|&(i, j)| {
                (1..=self.matchdays)
                    .map(|d| model.new_bool_var(format!("p{i}_{j}_d{d}")))
                    .collect()
            })
            .collect();

        for row in &vars {
            model.add_exactly_one(row.iter().copied());
        }

        for team in 0..self.group.len() {
            for d in 0..self.matchdays {
                model.add_exactly_one(
                    pairs
                        .iter()
                        .enumerate()
                        .filter(|(_, (i, j))| *i == team || *j == team)
                        .map(|(p, _)| vars[p][d]),
                );
            }
        }

        (model, vars)
    }

    /// Solves the partition.
    ///
    /// # Errors
    /// - `RoundRobinInfeasible` when the pairings cannot be split into
    ///   the requested number of matchdays
    /// - `SearchLimit` if the solver gave up first
    pub fn solve<S: CpSolver>(&self, solver: &S, config: &SolverConfig) -> Result<RoundRobin> {
        let pairs = self.pairs();
        let (model, vars) = self.build();
        let solution = solver.solve(&model, config);

        match solution.status {
            SolveStatus::Feasible => {}
            SolveStatus::Infeasible => {
                return Err(TournamentError::RoundRobinInfeasible {
                    group: self.group.label.clone(),
                })
            }
            SolveStatus::LimitReached => {
                return Err(TournamentError::SearchLimit {
                    model: model.name().to_string(),
                })
            }
        }

        let teams = &self.group.teams;
        let mut matchdays = vec![Vec::new(); self.matchdays];
        for (p, &(i, j)) in pairs.iter().enumerate() {
            if let Some(d) = vars[p].iter().position(|&v| solution.value(v)) {
                matchdays[d].push(Fixture::new(
                    &self.group.label,
                    d + 1,
                    &teams[i].name,
                    &teams[j].name,
                ));
            }
        }

        debug!(
            group = %self.group.label,
            nodes = solution.nodes,
            "round robin generated"
        );

        Ok(RoundRobin {
            group: self.group.label.clone(),
            matchdays,
        })
    }
}
