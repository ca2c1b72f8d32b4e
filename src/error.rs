//! Error types for the tournament pipeline.
//!
//! Hard failures abort the run before any calendar is produced. Soft
//! outcomes (fixtures that could not be placed) are not errors; they are
//! reported through [`crate::models::DroppedFixture`].

use crate::models::Violation;
use crate::validation::ValidationError;

/// Errors raised while planning a tournament.
#[derive(thiserror::Error, Debug)]
pub enum TournamentError {
    /// Reference data failed structural validation.
    #[error("invalid reference data: {} problem(s), first: {}", .0.len(), first_message(.0))]
    InvalidReference(Vec<ValidationError>),

    /// The group-assignment model has no solution.
    #[error("group draw is infeasible")]
    DrawInfeasible,

    /// A group's matchday partition model has no solution.
    #[error("round robin for group {group} is infeasible")]
    RoundRobinInfeasible { group: String },

    /// The solver stopped at its node or time limit before deciding.
    #[error("search limit reached while solving '{model}'")]
    SearchLimit { model: String },

    /// A team named by the configuration is not part of the draw.
    #[error("unknown team: {0}")]
    UnknownTeam(String),

    /// The host team has no fixture on the opening matchday.
    #[error("no opening fixture for {team} on matchday {matchday}")]
    OpeningFixtureMissing { team: String, matchday: usize },

    /// The finished calendar double-books a team or venue.
    #[error("calendar audit failed: {} violation(s), first: {}", .0.len(), first_violation(.0))]
    InconsistentCalendar(Vec<Violation>),

    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse reference data: {0}")]
    Json(#[from] serde_json::Error),
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

fn first_violation(violations: &[Violation]) -> &str {
    violations
        .first()
        .map(|v| v.message.as_str())
        .unwrap_or("none")
}

/// Result alias for tournament operations.
pub type Result<T> = std::result::Result<T, TournamentError>;
