//! Greedy fixture schedulers and KPI evaluation.
//!
//! Places group fixtures journey by journey and lays out the knockout
//! bracket, then measures the resulting calendar.
//!
//! # Algorithm
//!
//! `JourneyScheduler` walks a journey's fixtures in group order and
//! assigns each the next (day, slot) of the journey window and a venue
//! not yet used that day. It is not optimal, but never double-books a
//! team or a venue. `KnockoutBuilder` lays out templated knockout
//! matchups the same way.
//!
//! # KPI
//!
//! `CalendarKpi` reports placed and dropped fixtures, days used, and
//! per-venue load.
//!
//! # References
//!
//! - Kendall et al. (2010), "Scheduling in sports: An annotated bibliography"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod journey;
mod knockout;
mod kpi;
mod venue;

pub use journey::JourneyScheduler;
pub use knockout::KnockoutBuilder;
pub use kpi::{CalendarKpi, JourneyKpi};
pub use venue::{ParseVenuePolicyError, VenueLedger, VenuePolicy};
