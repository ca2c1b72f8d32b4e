//! Calendar quality metrics (KPIs).
//!
//! Summarises how much of the tournament was actually placed.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled | Group and knockout fixtures placed |
//! | Dropped | Fixtures reported as not placed |
//! | Completion Rate | scheduled / (scheduled + dropped) |
//! | Days Used | Distinct group-stage days with a fixture |
//! | Venue Load | Fixtures hosted per venue |
//! | Venue Balance | min load / max load over used venues |

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{JourneySchedule, KnockoutSchedule};

/// Per-journey counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyKpi {
    pub journey: usize,
    pub scheduled: usize,
    pub dropped: usize,
    pub days_used: usize,
}

/// Calendar performance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarKpi {
    /// Group-stage breakdown.
    pub journeys: Vec<JourneyKpi>,
    /// Group fixtures placed.
    pub group_scheduled: usize,
    /// Group fixtures dropped.
    pub group_dropped: usize,
    /// Knockout fixtures placed.
    pub knockout_scheduled: usize,
    /// Knockout fixtures dropped.
    pub knockout_dropped: usize,
    /// Fraction of all fixtures placed (0.0..1.0).
    pub completion_rate: f64,
    /// Distinct group-stage days used.
    pub days_used: usize,
    /// Fixtures per venue, group and knockout combined.
    pub venue_load: BTreeMap<String, usize>,
    /// Least-used over most-used venue (1.0 = perfectly even).
    pub venue_balance: f64,
}

impl CalendarKpi {
    /// Computes KPIs from the journey schedules and the knockout bracket.
    pub fn calculate(journeys: &[JourneySchedule], knockout: &KnockoutSchedule) -> Self {
        let mut venue_load: BTreeMap<String, usize> = BTreeMap::new();
        let mut days: BTreeSet<&str> = BTreeSet::new();

        let journey_kpis: Vec<JourneyKpi> = journeys
            .iter()
            .map(|j| {
                days.extend(j.days_used());
                JourneyKpi {
                    journey: j.journey,
                    scheduled: j.fixture_count(),
                    dropped: j.dropped.len(),
                    days_used: j.days_used().len(),
                }
            })
            .collect();

        for (venue, n) in journeys.iter().flat_map(JourneySchedule::venue_counts) {
            *venue_load.entry(venue).or_insert(0) += n;
        }
        for f in &knockout.fixtures {
            *venue_load.entry(f.venue.clone()).or_insert(0) += 1;
        }

        let group_scheduled: usize = journey_kpis.iter().map(|j| j.scheduled).sum();
        let group_dropped: usize = journey_kpis.iter().map(|j| j.dropped).sum();
        let knockout_scheduled = knockout.fixtures.len();
        let knockout_dropped = knockout.dropped.len();

        let scheduled = group_scheduled + knockout_scheduled;
        let total = scheduled + group_dropped + knockout_dropped;
        let completion_rate = if total == 0 {
            1.0
        } else {
            scheduled as f64 / total as f64
        };

        let venue_balance = match (venue_load.values().min(), venue_load.values().max()) {
            (Some(&min), Some(&max)) if max > 0 => min as f64 / max as f64,
            _ => 0.0,
        };

        Self {
            journeys: journey_kpis,
            group_scheduled,
            group_dropped,
            knockout_scheduled,
            knockout_dropped,
            completion_rate,
            days_used: days.len(),
            venue_load,
            venue_balance,
        }
    }

    /// Total fixtures not placed.
    pub fn dropped(&self) -> usize {
        self.group_dropped + self.knockout_dropped
    }

    /// Whether the calendar meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_completion: f64, min_venue_balance: f64) -> bool {
        self.completion_rate >= min_completion && self.venue_balance >= min_venue_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DropReason, Fixture, KnockoutFixture, Participant, Phase, ScheduledFixture};

    fn journey() -> JourneySchedule {
        let mut j = JourneySchedule::new(1, 1);
        j.add_fixture(ScheduledFixture::new(
            Fixture::new("A", 1, "Germany", "Scotland"),
            1,
            "Fri",
            "9pm",
            "V1",
        ));
        j.add_fixture(ScheduledFixture::new(
            Fixture::new("A", 1, "Hungary", "Switzerland"),
            1,
            "Sat",
            "3pm",
            "V1",
        ));
        j.add_fixture(ScheduledFixture::new(
            Fixture::new("B", 1, "Spain", "Croatia"),
            1,
            "Sat",
            "6pm",
            "V2",
        ));
        j.drop_fixture(
            Fixture::new("B", 1, "Italy", "Albania"),
            DropReason::NoVenueAvailable,
        );
        j
    }

    fn knockout() -> KnockoutSchedule {
        let mut ko = KnockoutSchedule::new();
        ko.fixtures.push(KnockoutFixture {
            match_id: 51,
            phase: Phase::Final,
            home: Participant::winner(49),
            away: Participant::winner(50),
            day: "Sun".to_string(),
            time_slot: "9pm".to_string(),
            venue: "V2".to_string(),
        });
        ko
    }

    #[test]
    fn test_kpi_counts() {
        let kpi = CalendarKpi::calculate(&[journey()], &knockout());
        assert_eq!(kpi.group_scheduled, 3);
        assert_eq!(kpi.group_dropped, 1);
        assert_eq!(kpi.knockout_scheduled, 1);
        assert_eq!(kpi.knockout_dropped, 0);
        assert_eq!(kpi.dropped(), 1);
        assert_eq!(kpi.days_used, 2);
        assert_eq!(kpi.journeys[0].days_used, 2);
        // 4 placed out of 5
        assert!((kpi.completion_rate - 0.8).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_venue_load() {
        let kpi = CalendarKpi::calculate(&[journey()], &knockout());
        assert_eq!(kpi.venue_load["V1"], 2);
        assert_eq!(kpi.venue_load["V2"], 2);
        assert!((kpi.venue_balance - 1.0).abs() < 1e-10);

        let kpi = CalendarKpi::calculate(&[journey()], &KnockoutSchedule::new());
        // V1: 2, V2: 1
        assert!((kpi.venue_balance - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = CalendarKpi::calculate(&[], &KnockoutSchedule::new());
        assert_eq!(kpi.group_scheduled, 0);
        assert!((kpi.completion_rate - 1.0).abs() < 1e-10);
        assert!((kpi.venue_balance - 0.0).abs() < 1e-10);
        assert!(kpi.journeys.is_empty());
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = CalendarKpi::calculate(&[journey()], &knockout());
        assert!(kpi.meets_thresholds(0.8, 1.0));
        assert!(!kpi.meets_thresholds(0.9, 0.0));
        assert!(!kpi.meets_thresholds(0.0, 1.5));
    }
}
