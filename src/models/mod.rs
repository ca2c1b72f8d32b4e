//! Tournament domain models.
//!
//! Provides the data types shared by the draw, the round-robin generator
//! and the schedulers.
//!
//! # Domain Mappings
//!
//! | u-tournament | Scheduling term | Example |
//! |--------------|-----------------|---------|
//! | Fixture | Activity | Germany vs Scotland |
//! | Venue | Resource | Allianz Arena |
//! | Calendar day × slot | Time slot | Friday 14/06, 9pm |
//! | JourneySchedule | Schedule | Matchday 1 plan |

mod calendar;
mod fixture;
mod journey;
mod knockout;
mod reference;
mod schedule;
mod team;
mod venue;

pub use calendar::{Calendar, DayWindow};
pub use fixture::{Fixture, ScheduledFixture};
pub use journey::{JourneyConfig, SlotAdvance};
pub use knockout::{
    DroppedKnockout, KnockoutFixture, KnockoutSchedule, KnockoutTemplate, Participant,
    ParticipantParseError, Phase,
};
pub use reference::{FixedPlacement, OpeningFixture, ReferenceData};
pub use schedule::{DropReason, DroppedFixture, JourneySchedule, Violation, ViolationType};
pub use team::{group_label, Group, Pot, Team};
pub use venue::Venue;
