//! End-to-end tournament planning.
//!
//! Runs validation, the group draw, one round robin per group, each
//! group-stage journey in order and the knockout layout, then audits the
//! finished calendar. Any hard failure aborts before a calendar is
//! returned.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::cp::{CpSolver, SimpleCpSolver, SolverConfig};
use crate::draw::{Draw, GroupDrawBuilder};
use crate::error::{Result, TournamentError};
use crate::models::{JourneySchedule, KnockoutSchedule, ReferenceData};
use crate::round_robin::{RoundRobin, RoundRobinBuilder};
use crate::scheduler::{CalendarKpi, JourneyScheduler, KnockoutBuilder, VenuePolicy};
use crate::validation::{audit_calendar, validate_reference};

/// Run parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Seed for the pipeline RNG. `None` = seeded from the OS.
    pub seed: Option<u64>,
    pub venue_policy: VenuePolicy,
    /// Limits for the draw and round-robin solves. When its seed is unset,
    /// one is drawn from the pipeline RNG.
    pub solver: SolverConfig,
}

impl PlanConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_venue_policy(mut self, policy: VenuePolicy) -> Self {
        self.venue_policy = policy;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// A planned tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentCalendar {
    /// Tournament name.
    pub name: String,
    pub draw: Draw,
    /// Matchday partitions, in group order.
    pub round_robins: Vec<RoundRobin>,
    /// Group-stage journeys, in play order.
    pub journeys: Vec<JourneySchedule>,
    pub knockout: KnockoutSchedule,
}

impl TournamentCalendar {
    /// Whether every group and knockout fixture was placed.
    pub fn is_complete(&self) -> bool {
        self.journeys.iter().all(JourneySchedule::is_complete) && self.knockout.is_complete()
    }

    /// Number of fixtures that could not be placed.
    pub fn dropped_count(&self) -> usize {
        self.journeys.iter().map(|j| j.dropped.len()).sum::<usize>() + self.knockout.dropped.len()
    }

    /// Total group fixtures placed.
    pub fn group_fixture_count(&self) -> usize {
        self.journeys.iter().map(JourneySchedule::fixture_count).sum()
    }

    pub fn kpi(&self) -> CalendarKpi {
        CalendarKpi::calculate(&self.journeys, &self.knockout)
    }

    /// Serialises to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Tournament planner.
///
/// # Example
///
/// ```
/// use u_tournament::models::ReferenceData;
/// use u_tournament::tournament::{PlanConfig, Tournament};
///
/// let data = ReferenceData::euro_2024();
/// let calendar = Tournament::new(&data, PlanConfig::default().with_seed(2024))
///     .plan()
///     .unwrap();
/// assert_eq!(calendar.group_fixture_count(), 36);
/// assert_eq!(calendar.knockout.fixtures.len(), 15);
/// ```
#[derive(Debug, Clone)]
pub struct Tournament<'a, S = SimpleCpSolver> {
    reference: &'a ReferenceData,
    config: PlanConfig,
    solver: S,
}

impl<'a> Tournament<'a, SimpleCpSolver> {
    /// Creates a planner using the built-in solver.
    pub fn new(reference: &'a ReferenceData, config: PlanConfig) -> Self {
        Self {
            reference,
            config,
            solver: SimpleCpSolver::new(),
        }
    }
}

impl<'a, S: CpSolver> Tournament<'a, S> {
    /// Replaces the CP solver.
    pub fn with_solver<T: CpSolver>(self, solver: T) -> Tournament<'a, T> {
        Tournament {
            reference: self.reference,
            config: self.config,
            solver,
        }
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Plans the tournament with an RNG built from the configured seed.
    pub fn plan(&self) -> Result<TournamentCalendar> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.plan_with_rng(&mut rng)
    }

    /// Plans the tournament drawing all randomness from `rng`.
    ///
    /// # Errors
    /// - `InvalidReference` if the reference data is malformed
    /// - `DrawInfeasible`, `RoundRobinInfeasible` or `SearchLimit` from
    ///   the solves
    /// - `OpeningFixtureMissing` if the host has no opening-day fixture
    /// - `InconsistentCalendar` if the audit finds a double booking
    pub fn plan_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TournamentCalendar> {
        let data = self.reference;
        let _span = info_span!("plan", tournament = %data.name).entered();

        validate_reference(data).map_err(TournamentError::InvalidReference)?;

        let mut solver_config = self.config.solver.clone();
        if solver_config.seed.is_none() {
            solver_config.seed = Some(rng.random());
        }

        let draw = GroupDrawBuilder::new(data).solve(&self.solver, &solver_config)?;

        let round_robins = draw
            .groups
            .iter()
            .map(|group| {
                RoundRobinBuilder::new(group, data.matchdays).solve(&self.solver, &solver_config)
            })
            .collect::<Result<Vec<_>>>()?;

        let scheduler = JourneyScheduler::new(data).with_policy(self.config.venue_policy);
        let journeys = data
            .journeys
            .iter()
            .enumerate()
            .map(|(i, config)| scheduler.schedule(i + 1, config, &round_robins, rng))
            .collect::<Result<Vec<_>>>()?;

        let knockout = KnockoutBuilder::new(data)
            .with_policy(self.config.venue_policy)
            .build_all(rng);

        let violations = audit_calendar(&journeys, &knockout);
        if !violations.is_empty() {
            return Err(TournamentError::InconsistentCalendar(violations));
        }

        let calendar = TournamentCalendar {
            name: data.name.clone(),
            draw,
            round_robins,
            journeys,
            knockout,
        };

        info!(
            groups = calendar.draw.group_count(),
            group_fixtures = calendar.group_fixture_count(),
            knockout_fixtures = calendar.knockout.fixtures.len(),
            dropped = calendar.dropped_count(),
            "tournament planned"
        );

        Ok(calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::{CpModel, CpSolution};
    use crate::models::{DayWindow, Phase, Pot, Venue};
    use crate::validation::ValidationErrorKind;
    use proptest::prelude::*;

    fn plan(data: &ReferenceData, config: PlanConfig) -> Result<TournamentCalendar> {
        Tournament::new(data, config).plan()
    }

    #[test]
    fn test_euro_2024_plan() {
        let data = ReferenceData::euro_2024();
        let calendar = plan(&data, PlanConfig::default().with_seed(2024)).unwrap();

        assert!(calendar.is_complete());
        assert_eq!(calendar.dropped_count(), 0);
        assert_eq!(calendar.draw.group_of("Germany"), Some("A"));
        assert_eq!(calendar.round_robins.len(), 6);
        assert_eq!(calendar.journeys.len(), 3);
        assert_eq!(calendar.group_fixture_count(), 36);
        assert!(audit_calendar(&calendar.journeys, &calendar.knockout).is_empty());

        let j1 = &calendar.journeys[0];
        let openings: Vec<_> = j1
            .fixtures
            .iter()
            .filter(|f| f.day == "Friday 14/06")
            .collect();
        assert_eq!(openings.len(), 1);
        assert_eq!(openings[0].fixture.home, "Germany");
        assert_eq!(openings[0].venue, "Allianz Arena");
        assert_eq!(j1.fixtures_for_team("Germany").len(), 1);

        let r16 = calendar.knockout.phase(Phase::RoundOf16);
        assert_eq!(r16.first().map(|f| f.match_id), Some(37));
        assert_eq!(r16.last().map(|f| f.match_id), Some(44));
        assert_eq!(calendar.knockout.fixture(51).map(|f| f.venue.as_str()), Some("Olympiastadion"));
    }

    #[test]
    fn test_every_pairing_played_once() {
        let data = ReferenceData::euro_2024();
        let calendar = plan(&data, PlanConfig::default().with_seed(5)).unwrap();
        for group in &calendar.draw.groups {
            let fixtures: Vec<_> = calendar
                .journeys
                .iter()
                .flat_map(|j| j.fixtures_for_group(&group.label))
                .collect();
            assert_eq!(fixtures.len(), 6);
            for team in group.team_names() {
                assert_eq!(fixtures.iter().filter(|f| f.involves(team)).count(), 3);
            }
        }
    }

    #[test]
    fn test_seeded_plan_is_reproducible() {
        let data = ReferenceData::euro_2024();
        let config = PlanConfig::default().with_seed(77);
        assert_eq!(plan(&data, config.clone()).unwrap(), plan(&data, config).unwrap());
    }

    #[test]
    fn test_first_free_policy() {
        let data = ReferenceData::euro_2024();
        let config = PlanConfig::default()
            .with_seed(1)
            .with_venue_policy(VenuePolicy::FirstFree);
        let calendar = plan(&data, config).unwrap();
        let first_day = calendar.journeys[0].fixtures_on_day("Saturday 15/06");
        assert_eq!(first_day[0].venue, "Olympiastadion");
    }

    #[test]
    fn test_unbalanced_pots_rejected() {
        let mut data = ReferenceData::euro_2024();
        data.pots[3].teams.pop();
        let err = plan(&data, PlanConfig::default().with_seed(1)).unwrap_err();
        match err {
            TournamentError::InvalidReference(errors) => {
                assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::UnbalancedPots));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_opening_day_reused_rejected() {
        let mut data = ReferenceData::euro_2024();
        data.journeys[1].window = DayWindow::new(0, 1);
        data.journeys[1].slots = vec!["9pm".into()];
        let err = plan(&data, PlanConfig::default().with_seed(1)).unwrap_err();
        match err {
            TournamentError::InvalidReference(errors) => {
                assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::InvalidDay));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_contradictory_placements() {
        let mut data = ReferenceData::euro_2024();
        data.fixed_placements
            .push(crate::models::FixedPlacement::new("France", "A"));
        let err = plan(&data, PlanConfig::default().with_seed(1)).unwrap_err();
        assert!(matches!(err, TournamentError::DrawInfeasible));
    }

    #[test]
    fn test_too_few_matchdays() {
        let mut data = ReferenceData::euro_2024();
        data.matchdays = 2;
        data.journeys.truncate(2);
        let err = plan(&data, PlanConfig::default().with_seed(1)).unwrap_err();
        assert!(matches!(err, TournamentError::RoundRobinInfeasible { .. }));
    }

    #[test]
    fn test_tight_node_limit() {
        let data = ReferenceData::euro_2024();
        let config = PlanConfig::default()
            .with_seed(1)
            .with_solver(SolverConfig::default().with_node_limit(2));
        let err = plan(&data, config).unwrap_err();
        assert!(matches!(err, TournamentError::SearchLimit { .. }));
    }

    #[test]
    fn test_too_few_venues_reports_drops() {
        let mut data = ReferenceData::euro_2024();
        data.venues = vec![Venue::new("Allianz Arena"), Venue::new("Olympiastadion")];
        let calendar = plan(&data, PlanConfig::default().with_seed(3)).unwrap();
        assert!(!calendar.is_complete());
        assert!(calendar.dropped_count() > 0);
        assert!(calendar.kpi().completion_rate < 1.0);
    }

    #[test]
    fn test_smaller_tournament() {
        let mut data = ReferenceData::euro_2024();
        data.pots = vec![
            Pot::new("Pot 1").with_teams(["Germany", "Spain"]),
            Pot::new("Pot 2").with_teams(["Italy", "France"]),
            Pot::new("Pot 3").with_teams(["Scotland", "Croatia"]),
            Pot::new("Pot 4").with_teams(["Albania", "Hungary"]),
        ];
        data.knockout.clear();
        let calendar = plan(&data, PlanConfig::default().with_seed(8)).unwrap();
        assert_eq!(calendar.draw.group_count(), 2);
        assert_eq!(calendar.group_fixture_count(), 12);
        assert!(calendar.is_complete());
    }

    #[test]
    fn test_custom_solver() {
        struct GivingUp;
        impl CpSolver for GivingUp {
            fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
                SimpleCpSolver::new().solve(model, &config.clone().with_node_limit(0))
            }
        }

        let data = ReferenceData::euro_2024();
        let err = Tournament::new(&data, PlanConfig::default().with_seed(1))
            .with_solver(GivingUp)
            .plan()
            .unwrap_err();
        assert!(matches!(err, TournamentError::SearchLimit { .. }));
    }

    #[test]
    fn test_calendar_json() {
        let data = ReferenceData::euro_2024();
        let calendar = plan(&data, PlanConfig::default().with_seed(12)).unwrap();
        let json = calendar.to_json_string().unwrap();
        assert!(json.contains("\"Allianz Arena\""));
        assert!(json.contains("\"W49\""));
        let back: TournamentCalendar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, calendar);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_any_seed_gives_clean_calendar(seed in any::<u64>()) {
            let data = ReferenceData::euro_2024();
            let calendar = plan(&data, PlanConfig::default().with_seed(seed)).unwrap();
            prop_assert!(calendar.is_complete());
            prop_assert_eq!(calendar.group_fixture_count(), 36);
            prop_assert!(audit_calendar(&calendar.journeys, &calendar.knockout).is_empty());
        }
    }
}
