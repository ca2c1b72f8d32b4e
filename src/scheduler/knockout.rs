//! Knockout placeholder builder.
//!
//! Lays out each phase's matchups from its [`KnockoutTemplate`]: fixture
//! `i` goes to `days[i / slots]` at `slots[i % slots]`. Participants stay
//! symbolic ("1A", "3A/D/E/F", "W37") since no results are simulated.
//!
//! Match ids are positional (`first_match_id + i`). A fixture that cannot
//! be placed leaves a gap, so `W<n>` references in later phases still
//! point at the right match.

use rand::Rng;
use tracing::{info, warn};

use super::venue::{VenueLedger, VenuePolicy};
use crate::models::{
    DropReason, DroppedKnockout, KnockoutFixture, KnockoutSchedule, KnockoutTemplate,
    ReferenceData,
};

/// Builds knockout fixtures from the reference templates.
#[derive(Debug, Clone)]
pub struct KnockoutBuilder<'a> {
    reference: &'a ReferenceData,
    policy: VenuePolicy,
}

impl<'a> KnockoutBuilder<'a> {
    /// Creates a builder with random venue choice.
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self {
            reference,
            policy: VenuePolicy::Random,
        }
    }

    /// Sets the venue policy for phases without a fixed venue.
    pub fn with_policy(mut self, policy: VenuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds one phase.
    ///
    /// Venues are unique per day within the phase; phases do not share
    /// days, so no cross-phase check is made.
    pub fn build_phase<R: Rng + ?Sized>(
        &self,
        template: &KnockoutTemplate,
        rng: &mut R,
    ) -> KnockoutSchedule {
        let mut schedule = KnockoutSchedule::new();
        let mut ledger = VenueLedger::new();
        let per_day = template.slots.len();

        for (i, (home, away)) in template.matchups.iter().enumerate() {
            let match_id = template.first_match_id + i as u32;
            let skipped = |reason| DroppedKnockout {
                match_id,
                phase: template.phase,
                home: home.clone(),
                away: away.clone(),
                reason,
            };

            let Some(day) = i.checked_div(per_day).and_then(|d| template.days.get(d)) else {
                warn!(match_id, phase = %template.phase, "no day left for knockout fixture");
                schedule.dropped.push(skipped(DropReason::WindowExhausted));
                continue;
            };
            let slot = &template.slots[i % per_day];

            let venue = match &template.venue {
                Some(fixed) if ledger.is_free(day, fixed) => Some(fixed.clone()),
                Some(_) => None,
                None => {
                    let free = ledger.free_venues(day, &self.reference.venues);
                    self.policy.pick(&free, rng).map(|v| v.name.clone())
                }
            };
            let Some(venue) = venue else {
                warn!(match_id, phase = %template.phase, %day, "no venue available");
                schedule.dropped.push(skipped(DropReason::NoVenueAvailable));
                continue;
            };

            ledger.mark(day, &venue);
            schedule.fixtures.push(KnockoutFixture {
                match_id,
                phase: template.phase,
                home: home.clone(),
                away: away.clone(),
                day: day.clone(),
                time_slot: slot.clone(),
                venue,
            });
        }

        info!(
            phase = %template.phase,
            fixtures = schedule.fixtures.len(),
            dropped = schedule.dropped.len(),
            "knockout phase built"
        );
        schedule
    }

    /// Builds every phase in template order.
    pub fn build_all<R: Rng + ?Sized>(&self, rng: &mut R) -> KnockoutSchedule {
        let mut all = KnockoutSchedule::new();
        for template in &self.reference.knockout {
            all.extend(self.build_phase(template, rng));
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Participant, Phase, Venue};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn build(data: &ReferenceData, policy: VenuePolicy) -> KnockoutSchedule {
        let mut rng = StdRng::seed_from_u64(37);
        KnockoutBuilder::new(data).with_policy(policy).build_all(&mut rng)
    }

    #[test]
    fn test_round_of_16_layout() {
        let data = ReferenceData::euro_2024();
        let ko = build(&data, VenuePolicy::Random);
        let r16 = ko.phase(Phase::RoundOf16);

        assert_eq!(r16.len(), 8);
        let ids: Vec<u32> = r16.iter().map(|f| f.match_id).collect();
        assert_eq!(ids, (37..=44).collect::<Vec<_>>());

        let days: HashSet<&str> = r16.iter().map(|f| f.day.as_str()).collect();
        assert_eq!(days.len(), 4);
        for day in days {
            let on_day: Vec<_> = r16.iter().filter(|f| f.day == day).collect();
            assert_eq!(on_day.len(), 2);
            assert_eq!(on_day[0].time_slot, "6pm");
            assert_eq!(on_day[1].time_slot, "9pm");
            assert_ne!(on_day[0].venue, on_day[1].venue);
        }

        let first = ko.fixture(37).unwrap();
        assert_eq!(first.home.to_string(), "1A");
        assert_eq!(first.away.to_string(), "2C");
        assert_eq!(ko.fixture(39).unwrap().away.to_string(), "3A/D/E/F");
    }

    #[test]
    fn test_later_phases() {
        let data = ReferenceData::euro_2024();
        let ko = build(&data, VenuePolicy::FirstFree);
        assert!(ko.is_complete());
        assert_eq!(ko.fixtures.len(), 15);

        let qf = ko.phase(Phase::QuarterFinal);
        assert_eq!(qf.iter().map(|f| f.match_id).collect::<Vec<_>>(), vec![45, 46, 47, 48]);
        assert_eq!(qf[0].home, Participant::winner(39));
        assert_eq!(qf[0].day, "Friday 05/07");
        assert_eq!(qf[3].day, "Saturday 06/07");

        let sf = ko.phase(Phase::SemiFinal);
        assert_eq!(sf.len(), 2);
        assert!(sf.iter().all(|f| f.time_slot == "9pm"));
        assert_ne!(sf[0].day, sf[1].day);

        let final_match = ko.fixture(51).unwrap();
        assert_eq!(final_match.phase, Phase::Final);
        assert_eq!(final_match.venue, "Olympiastadion");
        assert_eq!(final_match.day, "Sunday 14/07");
        assert_eq!(final_match.home, Participant::winner(49));
        assert_eq!(final_match.away, Participant::winner(50));
    }

    #[test]
    fn test_winner_references_resolve() {
        let data = ReferenceData::euro_2024();
        let ko = build(&data, VenuePolicy::Random);
        for f in &ko.fixtures {
            for p in [&f.home, &f.away] {
                if let Some(id) = p.pending_match() {
                    let earlier = ko.fixture(id).unwrap();
                    assert!(earlier.match_id < f.match_id);
                }
            }
        }
    }

    #[test]
    fn test_short_days_leave_gaps() {
        let mut data = ReferenceData::euro_2024();
        data.knockout[0].days.truncate(3);
        let ko = build(&data, VenuePolicy::FirstFree);
        let r16 = ko.phase(Phase::RoundOf16);
        assert_eq!(r16.len(), 6);
        assert_eq!(ko.dropped.len(), 2);
        assert_eq!(ko.dropped[0].match_id, 43);
        assert_eq!(ko.dropped[1].match_id, 44);
        assert!(ko.dropped.iter().all(|d| d.reason == DropReason::WindowExhausted));
        // Quarter-final ids are unaffected
        assert!(ko.fixture(45).is_some());
    }

    #[test]
    fn test_single_venue_one_match_per_day() {
        let mut data = ReferenceData::euro_2024();
        data.venues = vec![Venue::new("Olympiastadion")];
        let ko = build(&data, VenuePolicy::FirstFree);
        // R16: one per day over 4 days; QF: one per day over 2 days
        assert_eq!(ko.phase(Phase::RoundOf16).len(), 4);
        assert_eq!(ko.phase(Phase::QuarterFinal).len(), 2);
        assert_eq!(ko.phase(Phase::SemiFinal).len(), 2);
        assert!(ko.fixture(51).is_some());
        assert_eq!(ko.dropped.len(), 6);
        assert!(ko
            .dropped
            .iter()
            .all(|d| d.reason == DropReason::NoVenueAvailable));
    }
}
