//! Journey schedule (solution) model.
//!
//! A journey schedule is the set of group fixtures placed for one round
//! of the group stage, plus the fixtures the greedy pass could not place.
//! Calendar audits report invariant breaches as [`Violation`]s.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

use super::{Fixture, ScheduledFixture};

/// Why a fixture was left out of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// One of the teams already plays in this journey.
    TeamAlreadyScheduled,
    /// The slot cursor ran past the last day of the window.
    WindowExhausted,
    /// Every venue was already in use on the designated day.
    NoVenueAvailable,
}

/// A fixture that was not scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedFixture {
    pub fixture: Fixture,
    pub reason: DropReason,
}

/// Fixtures placed for one journey of the group stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySchedule {
    /// Journey number (1-based).
    pub journey: usize,
    /// Round-robin matchday scheduled in this journey.
    pub matchday: usize,
    /// Placed fixtures, in placement order.
    pub fixtures: Vec<ScheduledFixture>,
    /// Fixtures that could not be placed.
    pub dropped: Vec<DroppedFixture>,
}

/// An invariant breach found in a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub violation_type: ViolationType,
    /// Team, venue or pairing concerned.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of calendar violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A team plays twice on the same day.
    TeamDoubleBooked,
    /// A venue hosts two fixtures in the same day and slot.
    VenueDoubleBooked,
    /// The same pairing appears twice in the group stage.
    DuplicatePairing,
}

impl Violation {
    pub fn team_double_booked(team: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::TeamDoubleBooked,
            entity_id: team.into(),
            message: message.into(),
        }
    }

    pub fn venue_double_booked(venue: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::VenueDoubleBooked,
            entity_id: venue.into(),
            message: message.into(),
        }
    }

    pub fn duplicate_pairing(pairing: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::DuplicatePairing,
            entity_id: pairing.into(),
            message: message.into(),
        }
    }
}

impl JourneySchedule {
    /// Creates an empty schedule for a journey.
    pub fn new(journey: usize, matchday: usize) -> Self {
        Self {
            journey,
            matchday,
            fixtures: Vec::new(),
            dropped: Vec::new(),
        }
    }

    /// Records a placed fixture.
    pub fn add_fixture(&mut self, fixture: ScheduledFixture) {
        self.fixtures.push(fixture);
    }

    /// Records a fixture that could not be placed.
    pub fn drop_fixture(&mut self, fixture: Fixture, reason: DropReason) {
        self.dropped.push(DroppedFixture { fixture, reason });
    }

    /// Whether every fixture of the matchday was placed.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }

    /// Keeps the first fixture of each unordered pairing.
    ///
    /// Returns the number of fixtures removed.
    pub fn dedup_pairings(&mut self) -> usize {
        let before = self.fixtures.len();
        let mut seen = HashSet::new();
        self.fixtures.retain(|f| seen.insert(f.fixture.pair_key()));
        before - self.fixtures.len()
    }

    pub fn fixtures_on_day(&self, day: &str) -> Vec<&ScheduledFixture> {
        self.fixtures.iter().filter(|f| f.day == day).collect()
    }

    pub fn fixtures_for_team(&self, team: &str) -> Vec<&ScheduledFixture> {
        self.fixtures.iter().filter(|f| f.involves(team)).collect()
    }

    pub fn fixtures_for_group(&self, group: &str) -> Vec<&ScheduledFixture> {
        self.fixtures
            .iter()
            .filter(|f| f.fixture.group == group)
            .collect()
    }

    /// Distinct days with at least one fixture.
    pub fn days_used(&self) -> BTreeSet<&str> {
        self.fixtures.iter().map(|f| f.day.as_str()).collect()
    }

    /// Number of fixtures per venue.
    pub fn venue_counts(&self) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for f in &self.fixtures {
            *counts.entry(f.venue.clone()).or_insert(0) += 1;
        }
        counts
    }
}
