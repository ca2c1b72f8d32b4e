//! Tournament scheduling for pot-seeded group competitions.
//!
//! Draws teams into groups under pot constraints, generates each group's
//! round robin, places every fixture on a (day, time slot, venue) without
//! double-booking teams or venues, and lays out a placeholder knockout
//! bracket.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Team`, `Pot`, `Group`, `Fixture`,
//!   `Venue`, `Calendar`, `JourneySchedule`, `KnockoutFixture`,
//!   `ReferenceData`
//! - **`cp`**: Boolean constraint model and bounded backtracking solver
//! - **`draw`**: Group draw as a constraint-satisfaction problem
//! - **`round_robin`**: Matchday partition per group
//! - **`scheduler`**: Greedy journey scheduler, knockout builder, KPIs
//! - **`tournament`**: End-to-end pipeline producing a `TournamentCalendar`
//! - **`validation`**: Reference-data checks and calendar audits
//! - **`render`**: Plain-text calendar output
//!
//! # Example
//!
//! ```
//! use u_tournament::models::ReferenceData;
//! use u_tournament::tournament::{PlanConfig, Tournament};
//!
//! let data = ReferenceData::euro_2024();
//! let calendar = Tournament::new(&data, PlanConfig::default().with_seed(7))
//!     .plan()
//!     .unwrap();
//! assert!(calendar.is_complete());
//! println!("{calendar}");
//! ```
//!
//! # References
//!
//! - Kendall et al. (2010), "Scheduling in sports: An annotated bibliography"
//! - Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod cp;
pub mod draw;
pub mod error;
pub mod models;
pub mod render;
pub mod round_robin;
pub mod scheduler;
pub mod tournament;
pub mod validation;

pub use error::{Result, TournamentError};
