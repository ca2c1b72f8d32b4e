//! Static tournament reference data.
//!
//! Everything the pipeline needs that is decided before the draw: pots,
//! venues, calendar, fixed placements, the opening fixture, journey
//! density and the knockout layout. Read-only once built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    group_label, Calendar, DayWindow, JourneyConfig, KnockoutTemplate, Phase, Pot, SlotAdvance,
    Team, Venue,
};
use crate::error::Result;

/// A team that must land in a given group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPlacement {
    pub team: String,
    /// Group label ("A", "B", ...).
    pub group: String,
}

impl FixedPlacement {
    pub fn new(team: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            group: group.into(),
        }
    }
}

/// The host team's first fixture, pinned to a day, slot and venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningFixture {
    pub team: String,
    pub day: String,
    pub time_slot: String,
    pub venue: String,
}

/// Complete static input of a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Tournament name.
    pub name: String,
    /// Seeding pots. All pots have the same size, which is also the group count.
    pub pots: Vec<Pot>,
    pub venues: Vec<Venue>,
    /// Group-stage days and time slots.
    pub calendar: Calendar,
    /// Matchdays in each group's round robin.
    pub matchdays: usize,
    #[serde(default)]
    pub fixed_placements: Vec<FixedPlacement>,
    #[serde(default)]
    pub opening: Option<OpeningFixture>,
    /// One entry per group-stage journey, in play order.
    pub journeys: Vec<JourneyConfig>,
    #[serde(default)]
    pub knockout: Vec<KnockoutTemplate>,
}

impl ReferenceData {
    /// Parses reference data from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads reference data from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialises to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of groups (= pot size).
    pub fn group_count(&self) -> usize {
        self.pots.first().map(Pot::len).unwrap_or(0)
    }

    /// Teams per group (= pot count).
    pub fn teams_per_group(&self) -> usize {
        self.pots.len()
    }

    /// Group labels in order.
    pub fn group_labels(&self) -> Vec<String> {
        (0..self.group_count()).map(group_label).collect()
    }

    /// All teams, pot by pot.
    pub fn teams(&self) -> Vec<Team> {
        self.pots
            .iter()
            .flat_map(|pot| pot.teams.iter().map(move |t| Team::new(t, &pot.name)))
            .collect()
    }

    /// Pot a team belongs to.
    pub fn pot_of(&self, team: &str) -> Option<&Pot> {
        self.pots.iter().find(|p| p.contains(team))
    }

    pub fn venue(&self, name: &str) -> Option<&Venue> {
        self.venues.iter().find(|v| v.name == name)
    }

    /// UEFA EURO 2024 (Germany): 24 teams in 4 pots of 6, 10 stadiums,
    /// 13 group-stage days with 3pm/6pm/9pm slots, host in group A.
    pub fn euro_2024() -> Self {
        let pots = vec![
            Pot::new("Pot 1").with_teams([
                "Germany", "Portugal", "France", "Spain", "Belgium", "England",
            ]),
            Pot::new("Pot 2").with_teams([
                "Hungary", "Turkey", "Romania", "Denmark", "Albania", "Austria",
            ]),
            Pot::new("Pot 3").with_teams([
                "Netherlands",
                "Scotland",
                "Croatia",
                "Slovenia",
                "Slovakia",
                "Czech Republic",
            ]),
            Pot::new("Pot 4").with_teams([
                "Italy",
                "Serbia",
                "Switzerland",
                "Poland",
                "Ukraine",
                "Georgia",
            ]),
        ];

        let venues = vec![
            Venue::new("Olympiastadion").with_city("Berlin").with_capacity(71_000),
            Venue::new("RheinEnergieStadion").with_city("Cologne").with_capacity(43_000),
            Venue::new("Signal Iduna Park").with_city("Dortmund").with_capacity(62_000),
            Venue::new("Merkur Spiel-Arena").with_city("Düsseldorf").with_capacity(47_000),
            Venue::new("Deutsche Bank Park").with_city("Frankfurt").with_capacity(47_000),
            Venue::new("Volksparkstadion").with_city("Hamburg").with_capacity(49_000),
            Venue::new("Allianz Arena").with_city("Munich").with_capacity(66_000),
            Venue::new("MHPArena").with_city("Stuttgart").with_capacity(51_000),
            Venue::new("Red Bull Arena").with_city("Leipzig").with_capacity(40_000),
            Venue::new("Veltins-Arena").with_city("Gelsenkirchen").with_capacity(50_000),
        ];

        let mut calendar = Calendar::new()
            .with_time_slot("3pm")
            .with_time_slot("6pm")
            .with_time_slot("9pm");
        for day in [
            "Friday 14/06",
            "Saturday 15/06",
            "Sunday 16/06",
            "Monday 17/06",
            "Tuesday 18/06",
            "Wednesday 19/06",
            "Thursday 20/06",
            "Friday 21/06",
            "Saturday 22/06",
            "Sunday 23/06",
            "Monday 24/06",
            "Tuesday 25/06",
            "Wednesday 26/06",
        ] {
            calendar = calendar.with_day(day);
        }

        let journeys = vec![
            JourneyConfig::new(1, DayWindow::new(1, 5))
                .with_slots(["3pm", "6pm", "9pm"])
                .with_opening(),
            JourneyConfig::new(2, DayWindow::new(5, 9)).with_slots(["3pm", "6pm", "9pm"]),
            JourneyConfig::new(3, DayWindow::new(9, 12))
                .with_slots(["6pm", "9pm"])
                .with_advance(SlotAdvance::PerGroup),
        ];

        let knockout = vec![
            KnockoutTemplate::new(Phase::RoundOf16, 37)
                .with_days([
                    "Saturday 29/06",
                    "Sunday 30/06",
                    "Monday 01/07",
                    "Tuesday 02/07",
                ])
                .with_slots(["6pm", "9pm"])
                .with_matchup("1A", "2C")
                .with_matchup("2A", "2B")
                .with_matchup("1B", "3A/D/E/F")
                .with_matchup("1C", "3D/E/F")
                .with_matchup("1F", "3A/B/C")
                .with_matchup("2D", "2E")
                .with_matchup("1E", "3A/B/C/D")
                .with_matchup("1D", "2F"),
            KnockoutTemplate::new(Phase::QuarterFinal, 45)
                .with_days(["Friday 05/07", "Saturday 06/07"])
                .with_slots(["6pm", "9pm"])
                .with_matchup("W39", "W37")
                .with_matchup("W41", "W42")
                .with_matchup("W43", "W44")
                .with_matchup("W40", "W38"),
            KnockoutTemplate::new(Phase::SemiFinal, 49)
                .with_days(["Tuesday 09/07", "Wednesday 10/07"])
                .with_slots(["9pm"])
                .with_matchup("W45", "W46")
                .with_matchup("W47", "W48"),
            KnockoutTemplate::new(Phase::Final, 51)
                .with_days(["Sunday 14/07"])
                .with_slots(["9pm"])
                .with_matchup("W49", "W50")
                .with_venue("Olympiastadion"),
        ];

        Self {
            name: "UEFA EURO 2024".to_string(),
            pots,
            venues,
            calendar,
            matchdays: 3,
            fixed_placements: vec![FixedPlacement::new("Germany", "A")],
            opening: Some(OpeningFixture {
                team: "Germany".to_string(),
                day: "Friday 14/06".to_string(),
                time_slot: "9pm".to_string(),
                venue: "Allianz Arena".to_string(),
            }),
            journeys,
            knockout,
        }
    }
}
