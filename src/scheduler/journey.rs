//! Greedy journey scheduler.
//!
//! # Algorithm
//!
//! 1. If the journey carries the opening fixture, pin the host's fixture
//!    for the matchday to its configured (day, slot, venue).
//! 2. Walk the remaining fixtures group by group. A cursor over the
//!    journey window gives `day = window[cursor / slots]`,
//!    `slot = slots[cursor % slots]`.
//! 3. For each fixture pick a venue not yet used that day. The cursor
//!    advances after each placed fixture, or once per group under
//!    [`SlotAdvance::PerGroup`].
//! 4. Remove repeated pairings, keeping the first.
//!
//! Fixtures that cannot be placed are reported in
//! [`JourneySchedule::dropped`] rather than deferred.
//!
//! # Complexity
//! O(f · v) where f=fixtures in the matchday, v=venues.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info, warn};

use super::venue::{VenueLedger, VenuePolicy};
use crate::error::{Result, TournamentError};
use crate::models::{
    DropReason, Fixture, JourneyConfig, JourneySchedule, OpeningFixture, ReferenceData,
    ScheduledFixture, SlotAdvance,
};
use crate::round_robin::RoundRobin;

/// Working state of one journey pass. Dropped on return.
#[derive(Debug, Default)]
struct JourneyState {
    ledger: VenueLedger,
    teams: HashSet<String>,
    cursor: usize,
}

impl JourneyState {
    fn is_playing(&self, fixture: &Fixture) -> bool {
        self.teams.contains(&fixture.home) || self.teams.contains(&fixture.away)
    }

    fn mark_playing(&mut self, fixture: &Fixture) {
        self.teams.insert(fixture.home.clone());
        self.teams.insert(fixture.away.clone());
    }
}

/// Places one matchday of group fixtures onto days, slots and venues.
///
/// # Example
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_tournament::cp::{SimpleCpSolver, SolverConfig};
/// use u_tournament::draw::GroupDrawBuilder;
/// use u_tournament::models::ReferenceData;
/// use u_tournament::round_robin::RoundRobinBuilder;
/// use u_tournament::scheduler::{JourneyScheduler, VenuePolicy};
///
/// let data = ReferenceData::euro_2024();
/// let solver = SimpleCpSolver::new();
/// let config = SolverConfig::default();
/// let draw = GroupDrawBuilder::new(&data).solve(&solver, &config).unwrap();
/// let round_robins: Vec<_> = draw
///     .groups
///     .iter()
///     .map(|g| RoundRobinBuilder::new(g, 3).solve(&solver, &config).unwrap())
///     .collect();
///
/// let scheduler = JourneyScheduler::new(&data).with_policy(VenuePolicy::FirstFree);
/// let mut rng = StdRng::seed_from_u64(0);
/// let journey = scheduler
///     .schedule(1, &data.journeys[0], &round_robins, &mut rng)
///     .unwrap();
/// assert_eq!(journey.fixture_count(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct JourneyScheduler<'a> {
    reference: &'a ReferenceData,
    policy: VenuePolicy,
}

impl<'a> JourneyScheduler<'a> {
    /// Creates a scheduler with random venue choice.
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self {
            reference,
            policy: VenuePolicy::Random,
        }
    }

    /// Sets the venue policy.
    pub fn with_policy(mut self, policy: VenuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Schedules journey `journey` from `config`.
    ///
    /// `round_robins` must be in group order; fixtures are placed in that
    /// order.
    ///
    /// # Errors
    /// `OpeningFixtureMissing` if the journey pins the opening fixture and
    /// the host has no fixture on the configured matchday.
    pub fn schedule<R: Rng + ?Sized>(
        &self,
        journey: usize,
        config: &JourneyConfig,
        round_robins: &[RoundRobin],
        rng: &mut R,
    ) -> Result<JourneySchedule> {
        let days = self.reference.calendar.window_days(&config.window);
        let mut schedule = JourneySchedule::new(journey, config.matchday);
        let mut state = JourneyState::default();

        let opening = if config.opening {
            match &self.reference.opening {
                Some(opening) => {
                    let fixture = self.pin_opening(journey, opening, config, round_robins)?;
                    state.ledger.mark(&opening.day, &opening.venue);
                    state.mark_playing(&fixture.fixture);
                    schedule.add_fixture(fixture.clone());
                    Some(fixture.fixture)
                }
                None => {
                    warn!(journey, "journey pins an opening fixture but none is configured");
                    None
                }
            }
        } else {
            None
        };

        let positions = match config.advance {
            SlotAdvance::PerFixture => round_robins
                .iter()
                .map(|rr| rr.matchday(config.matchday).len())
                .sum::<usize>()
                .saturating_sub(usize::from(opening.is_some())),
            SlotAdvance::PerGroup => round_robins.len(),
        };
        if config.capacity() < positions {
            warn!(
                journey,
                capacity = config.capacity(),
                needed = positions,
                "journey window too small for its matchday"
            );
        }

        let slot_count = config.slots.len();
        for rr in round_robins {
            for fixture in rr.matchday(config.matchday) {
                if opening.as_ref().is_some_and(|o| o.same_pairing(fixture)) {
                    continue;
                }
                if state.is_playing(fixture) {
                    debug!(journey, home = %fixture.home, away = %fixture.away, "team already playing");
                    schedule.drop_fixture(fixture.clone(), DropReason::TeamAlreadyScheduled);
                    continue;
                }

                let day_index = state.cursor.checked_div(slot_count);
                let Some(day) = day_index.and_then(|i| days.get(i)) else {
                    warn!(journey, home = %fixture.home, away = %fixture.away, "journey window exhausted");
                    schedule.drop_fixture(fixture.clone(), DropReason::WindowExhausted);
                    continue;
                };
                let slot = &config.slots[state.cursor % slot_count];

                let free = state.ledger.free_venues(day, &self.reference.venues);
                let Some(venue) = self.policy.pick(&free, rng) else {
                    warn!(
                        journey,
                        %day,
                        used = state.ledger.used_on(day),
                        home = %fixture.home,
                        away = %fixture.away,
                        "no venue available"
                    );
                    schedule.drop_fixture(fixture.clone(), DropReason::NoVenueAvailable);
                    continue;
                };

                state.ledger.mark(day, &venue.name);
                state.mark_playing(fixture);
                schedule.add_fixture(ScheduledFixture::new(
                    fixture.clone(),
                    journey,
                    day,
                    slot,
                    &venue.name,
                ));

                if config.advance == SlotAdvance::PerFixture {
                    state.cursor += 1;
                }
            }

            if config.advance == SlotAdvance::PerGroup {
                state.cursor += 1;
            }
        }

        let removed = schedule.dedup_pairings();
        if removed > 0 {
            debug!(journey, removed, "removed repeated pairings");
        }

        info!(
            journey,
            matchday = config.matchday,
            scheduled = schedule.fixture_count(),
            dropped = schedule.dropped.len(),
            "journey scheduled"
        );

        Ok(schedule)
    }

    /// Builds the opening fixture with the host listed first.
    fn pin_opening(
        &self,
        journey: usize,
        opening: &OpeningFixture,
        config: &JourneyConfig,
        round_robins: &[RoundRobin],
    ) -> Result<ScheduledFixture> {
        let fixture = round_robins
            .iter()
            .flat_map(|rr| rr.matchday(config.matchday))
            .find(|f| f.involves(&opening.team))
            .ok_or_else(|| TournamentError::OpeningFixtureMissing {
                team: opening.team.clone(),
                matchday: config.matchday,
            })?;

        let opponent = fixture.opponent_of(&opening.team).unwrap_or(fixture.away.as_str());
        let pinned = Fixture::new(&fixture.group, fixture.matchday, &opening.team, opponent);

        info!(
            home = %pinned.home,
            away = %pinned.away,
            day = %opening.day,
            slot = %opening.time_slot,
            venue = %opening.venue,
            "opening fixture pinned"
        );

        Ok(ScheduledFixture::new(
            pinned,
            journey,
            &opening.day,
            &opening.time_slot,
            &opening.venue,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::{SimpleCpSolver, SolverConfig};
    use crate::draw::GroupDrawBuilder;
    use crate::models::{DayWindow, KnockoutSchedule, Venue};
    use crate::round_robin::RoundRobinBuilder;
    use crate::validation::audit_calendar;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn round_robins(data: &ReferenceData, seed: u64) -> Vec<RoundRobin> {
        let solver = SimpleCpSolver::new();
        let config = SolverConfig::default().with_seed(seed);
        let draw = GroupDrawBuilder::new(data).solve(&solver, &config).unwrap();
        draw.groups
            .iter()
            .map(|g| RoundRobinBuilder::new(g, data.matchdays).solve(&solver, &config).unwrap())
            .collect()
    }

    fn run(
        data: &ReferenceData,
        index: usize,
        policy: VenuePolicy,
        seed: u64,
    ) -> JourneySchedule {
        let rrs = round_robins(data, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        JourneyScheduler::new(data)
            .with_policy(policy)
            .schedule(index + 1, &data.journeys[index], &rrs, &mut rng)
            .unwrap()
    }

    fn assert_no_double_booking(journey: &JourneySchedule) {
        let violations = audit_calendar(std::slice::from_ref(journey), &KnockoutSchedule::new());
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_journey_one_with_opening() {
        let data = ReferenceData::euro_2024();
        let journey = run(&data, 0, VenuePolicy::Random, 7);

        assert!(journey.is_complete(), "{:?}", journey.dropped);
        assert_eq!(journey.fixture_count(), 12);
        assert_no_double_booking(&journey);

        let opening = &journey.fixtures[0];
        assert_eq!(opening.fixture.home, "Germany");
        assert_eq!(opening.day, "Friday 14/06");
        assert_eq!(opening.time_slot, "9pm");
        assert_eq!(opening.venue, "Allianz Arena");
        assert_eq!(journey.fixtures_for_team("Germany").len(), 1);
        assert_eq!(journey.fixtures_on_day("Friday 14/06").len(), 1);

        // 11 remaining fixtures over Sat..Tue, three per day
        assert_eq!(journey.fixtures_on_day("Saturday 15/06").len(), 3);
        assert_eq!(journey.fixtures_on_day("Monday 17/06").len(), 3);
        assert_eq!(journey.fixtures_on_day("Tuesday 18/06").len(), 2);
    }

    #[test]
    fn test_journey_two_fills_window() {
        let data = ReferenceData::euro_2024();
        let journey = run(&data, 1, VenuePolicy::FirstFree, 3);
        assert!(journey.is_complete());
        assert_eq!(journey.fixture_count(), 12);
        assert_eq!(journey.days_used().len(), 4);
        assert!(journey.fixtures.iter().all(|f| f.fixture.matchday == 2));
        assert_no_double_booking(&journey);

        // First free venue each day, in slot order
        let first_day = journey.fixtures_on_day("Wednesday 19/06");
        let venues: Vec<&str> = first_day.iter().map(|f| f.venue.as_str()).collect();
        assert_eq!(venues, vec!["Olympiastadion", "RheinEnergieStadion", "Signal Iduna Park"]);
        let slots: Vec<&str> = first_day.iter().map(|f| f.time_slot.as_str()).collect();
        assert_eq!(slots, vec!["3pm", "6pm", "9pm"]);
    }

    #[test]
    fn test_journey_three_simultaneous_kickoffs() {
        let data = ReferenceData::euro_2024();
        let journey = run(&data, 2, VenuePolicy::Random, 11);
        assert!(journey.is_complete());
        assert_eq!(journey.fixture_count(), 12);
        assert_no_double_booking(&journey);

        for label in data.group_labels() {
            let group = journey.fixtures_for_group(&label);
            assert_eq!(group.len(), 2);
            assert_eq!(group[0].day, group[1].day);
            assert_eq!(group[0].time_slot, group[1].time_slot);
        }
        assert!(journey
            .fixtures
            .iter()
            .all(|f| f.time_slot == "6pm" || f.time_slot == "9pm"));
        assert_eq!(journey.days_used().len(), 3);
    }

    #[test]
    fn test_single_venue_drops_fixtures() {
        let mut data = ReferenceData::euro_2024();
        data.venues = vec![Venue::new("Allianz Arena")];
        let journey = run(&data, 1, VenuePolicy::FirstFree, 5);

        // The cursor stays on the first day once its only venue is taken
        assert_eq!(journey.fixture_count(), 1);
        assert_eq!(journey.dropped.len(), 11);
        assert!(journey
            .dropped
            .iter()
            .all(|d| d.reason == DropReason::NoVenueAvailable));
        assert!(!journey.is_complete());
        assert_no_double_booking(&journey);
    }

    #[test]
    fn test_short_window_exhausted() {
        let mut data = ReferenceData::euro_2024();
        data.journeys[1].window = DayWindow::new(5, 6);
        let journey = run(&data, 1, VenuePolicy::FirstFree, 5);
        assert_eq!(journey.fixture_count(), 3);
        assert_eq!(journey.dropped.len(), 9);
        assert!(journey
            .dropped
            .iter()
            .all(|d| d.reason == DropReason::WindowExhausted));
    }

    #[test]
    fn test_duplicate_team_is_skipped() {
        let data = ReferenceData::euro_2024();
        let mut rrs = round_robins(&data, 1);
        // Repeat group A's first fixture in group B's matchday
        let extra = rrs[0].matchdays[1][0].clone();
        rrs[1].matchdays[1].push(extra.clone());

        let mut rng = StdRng::seed_from_u64(1);
        let journey = JourneyScheduler::new(&data)
            .schedule(2, &data.journeys[1], &rrs, &mut rng)
            .unwrap();
        assert_eq!(journey.fixture_count(), 12);
        assert_eq!(journey.dropped.len(), 1);
        assert_eq!(journey.dropped[0].fixture, extra);
        assert_eq!(journey.dropped[0].reason, DropReason::TeamAlreadyScheduled);
    }

    #[test]
    fn test_missing_host_fixture() {
        let mut data = ReferenceData::euro_2024();
        data.opening.as_mut().unwrap().team = "Wales".to_string();
        let rrs = round_robins(&data, 2);
        let mut rng = StdRng::seed_from_u64(2);
        let result = JourneyScheduler::new(&data).schedule(1, &data.journeys[0], &rrs, &mut rng);
        assert!(matches!(
            result,
            Err(TournamentError::OpeningFixtureMissing { matchday: 1, .. })
        ));
    }

    #[test]
    fn test_same_seed_same_journey() {
        let data = ReferenceData::euro_2024();
        assert_eq!(
            run(&data, 0, VenuePolicy::Random, 99),
            run(&data, 0, VenuePolicy::Random, 99)
        );
    }
}
