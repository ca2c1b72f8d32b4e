//! CP-based group draw.
//!
//! Assigns every team to exactly one group so that each pot contributes
//! at most one team per group and fixed placements (e.g. the host in
//! group A) are honored. This is a pure satisfaction problem: any feasible
//! assignment is accepted, and seeding the solver varies which one.
//!
//! # Formulation
//! - One boolean `x[t][g]` per (team, group)
//! - `ExactlyOne(x[t][*])` per team
//! - `AtMostOne(x[t][g] for t in pot)` per (group, pot)
//! - `x[t][g] = 1` per fixed placement

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cp::{BoolVar, CpModel, CpSolver, SolveStatus, SolverConfig};
use crate::error::{Result, TournamentError};
use crate::models::{FixedPlacement, Group, ReferenceData, Team};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Result of a successful draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    /// Groups in label order.
    pub groups: Vec<Group>,
}

impl Draw {
    /// Finds a group by label.
    pub fn group(&self, label: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.label == label)
    }

    /// Label of the group a team was drawn into.
    pub fn group_of(&self, team: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.contains(team))
            .map(|g| g.label.as_str())
    }

    /// Number of groups drawn.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// A built draw model with the variable layout needed to decode it.
#[derive(Debug, Clone)]
pub struct DrawModel {
    pub model: CpModel,
    teams: Vec<Team>,
    labels: Vec<String>,
    /// `vars[t][g]`: team `t` is in group `g`.
    vars: Vec<Vec<BoolVar>>,
}

/// Builds and solves the group draw model.
///
/// # Example
/// ```
/// use u_tournament::cp::{SimpleCpSolver, SolverConfig};
/// use u_tournament::draw::GroupDrawBuilder;
/// use u_tournament::models::ReferenceData;
///
/// let data = ReferenceData::euro_2024();
/// let draw = GroupDrawBuilder::new(&data)
///     .solve(&SimpleCpSolver::new(), &SolverConfig::default())
///     .unwrap();
/// assert_eq!(draw.group_of("Germany"), Some("A"));
/// ```
pub struct GroupDrawBuilder<'a> {
    reference: &'a ReferenceData,
    placements: Vec<FixedPlacement>,
}

impl<'a> GroupDrawBuilder<'a> {
    /// Creates a builder using the reference data's fixed placements.
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self {
            reference,
            placements: reference.fixed_placements.clone(),
        }
    }

    /// Adds a fixed placement on top of the reference data's.
    pub fn with_placement(mut self, team: impl Into<String>, group: impl Into<String>) -> Self {
        self.placements.push(FixedPlacement::new(team, group));
        self
    }

    /// Builds the CP model.
    ///
    /// Fails if a placement names a team or group that does not exist.
    pub fn build(&self) -> Result<DrawModel> {
        let teams = self.reference.teams();
        let labels = self.reference.group_labels();
        let mut model = CpModel::new("group-draw");

        let vars: Vec<Vec<BoolVar>> = teams
            .iter()
            .map(|team| {
                labels
                    .iter()
                    .map(|label| model.new_bool_var(format!("{}_in_{label}", team.name)))
                    .collect()
            })
            .collect();

        // Each team in exactly one group
        for row in &vars {
            model.add_exactly_one(row.iter().copied());
        }

        // At most one team per pot in each group
        let mut by_pot: HashMap<&str, Vec<usize>> = HashMap::new();
        for (t, team) in teams.iter().enumerate() {
            by_pot.entry(team.pot.as_str()).or_default().push(t);
        }
        for pot in &self.reference.pots {
            let members = by_pot.get(pot.name.as_str()).cloned().unwrap_or_default();
            for g in 0..labels.len() {
                model.add_at_most_one(members.iter().map(|&t| vars[t][g]));
            }
        }

        for placement in &self.placements {
            let t = teams
                .iter()
                .position(|team| team.name == placement.team)
                .ok_or_else(|| TournamentError::UnknownTeam(placement.team.clone()))?;
            let g = labels
                .iter()
                .position(|label| *label == placement.group)
                .ok_or_else(|| {
                    TournamentError::InvalidReference(vec![ValidationError::new(
                        ValidationErrorKind::InvalidGroupReference,
                        format!(
                            "Fixed placement of '{}' references unknown group '{}'",
                            placement.team, placement.group
                        ),
                    )])
                })?;
            model.fix(vars[t][g], true);
        }

        debug!(
            vars = model.var_count(),
            constraints = model.constraint_count(),
            "built draw model"
        );

        Ok(DrawModel {
            model,
            teams,
            labels,
            vars,
        })
    }

    /// Solves the draw.
    ///
    /// # Errors
    /// - `DrawInfeasible` if no assignment satisfies the constraints
    /// - `SearchLimit` if the solver gave up first
    pub fn solve<S: CpSolver>(&self, solver: &S, config: &SolverConfig) -> Result<Draw> {
        let draw_model = self.build()?;
        let solution = solver.solve(&draw_model.model, config);

        match solution.status {
            SolveStatus::Feasible => {}
            SolveStatus::Infeasible => return Err(TournamentError::DrawInfeasible),
            SolveStatus::LimitReached => {
                return Err(TournamentError::SearchLimit {
                    model: draw_model.model.name().to_string(),
                })
            }
        }

        let mut groups: Vec<Group> = draw_model.labels.iter().map(Group::new).collect();
        for (t, team) in draw_model.teams.iter().enumerate() {
            if let Some(g) = draw_model.vars[t].iter().position(|&v| solution.value(v)) {
                groups[g].teams.push(team.clone());
            }
        }

        for group in &groups {
            info!(group = %group.label, teams = ?group.team_names(), "group drawn");
        }

        Ok(Draw { groups })
    }
}
