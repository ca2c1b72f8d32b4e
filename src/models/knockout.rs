//! Knockout-stage model.
//!
//! Knockout fixtures are built before any group result exists, so their
//! participants are usually placeholders: a group standing ("1A"), the
//! best-ranked team among several groups ("3A/D/E/F") or the winner of an
//! earlier match ("W37"). A resolved team can be slotted in later without
//! changing the fixture shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::schedule::DropReason;

/// Knockout round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    Final,
}

impl Phase {
    /// All phases in bracket order.
    pub const ALL: [Phase; 4] = [
        Phase::RoundOf16,
        Phase::QuarterFinal,
        Phase::SemiFinal,
        Phase::Final,
    ];

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Phase::RoundOf16 => "round of 16",
            Phase::QuarterFinal => "quarter final",
            Phase::SemiFinal => "semi final",
            Phase::Final => "final",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One side of a knockout fixture.
///
/// Serialised as its label string ("1A", "3A/D/E/F", "W37", or a team name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Participant {
    /// A known team.
    Team(String),
    /// The team finishing at `position` in `group`.
    GroupPosition { position: u8, group: String },
    /// The best team finishing at `position` among `groups`.
    BestRanked { position: u8, groups: Vec<String> },
    /// The winner of an earlier knockout match.
    Winner(u32),
}

impl Participant {
    /// A resolved team.
    pub fn team(name: impl Into<String>) -> Self {
        Participant::Team(name.into())
    }

    /// The team finishing at `position` in `group` ("1A").
    pub fn group_position(position: u8, group: impl Into<String>) -> Self {
        Participant::GroupPosition {
            position,
            group: group.into(),
        }
    }

    /// The winner of match `match_id` ("W37").
    pub fn winner(match_id: u32) -> Self {
        Participant::Winner(match_id)
    }

    /// Whether the participant is still a placeholder.
    pub fn is_pending(&self) -> bool {
        !matches!(self, Participant::Team(_))
    }

    /// Match this participant waits on, if any.
    pub fn pending_match(&self) -> Option<u32> {
        match self {
            Participant::Winner(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Team(name) => f.write_str(name),
            Participant::GroupPosition { position, group } => write!(f, "{position}{group}"),
            Participant::BestRanked { position, groups } => {
                write!(f, "{position}{}", groups.join("/"))
            }
            Participant::Winner(id) => write!(f, "W{id}"),
        }
    }
}

/// Error for a participant label that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("empty participant label")]
pub struct ParticipantParseError;

impl FromStr for Participant {
    type Err = ParticipantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParticipantParseError);
        }

        if let Some(id) = s.strip_prefix('W').and_then(|rest| rest.parse::<u32>().ok()) {
            return Ok(Participant::Winner(id));
        }

        let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            if let Ok(position) = s[..digits].parse::<u8>() {
                let groups: Vec<String> = s[digits..].split('/').map(str::to_string).collect();
                let well_formed = groups
                    .iter()
                    .all(|g| !g.is_empty() && g.chars().all(|c| c.is_ascii_uppercase()));
                if well_formed {
                    return Ok(if groups.len() == 1 {
                        Participant::GroupPosition {
                            position,
                            group: groups.into_iter().next().unwrap_or_default(),
                        }
                    } else {
                        Participant::BestRanked { position, groups }
                    });
                }
            }
        }

        Ok(Participant::Team(s.to_string()))
    }
}

impl TryFrom<String> for Participant {
    type Error = ParticipantParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Participant> for String {
    fn from(value: Participant) -> Self {
        value.to_string()
    }
}

/// A knockout fixture with its date and venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutFixture {
    pub match_id: u32,
    pub phase: Phase,
    pub home: Participant,
    pub away: Participant,
    pub day: String,
    pub time_slot: String,
    pub venue: String,
}

/// Static layout of one knockout phase.
///
/// Fixture `i` is played on `days[i / slots.len()]` at `slots[i % slots.len()]`
/// and carries match id `first_match_id + i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutTemplate {
    pub phase: Phase,
    pub first_match_id: u32,
    pub days: Vec<String>,
    pub slots: Vec<String>,
    pub matchups: Vec<(Participant, Participant)>,
    /// Venue for every fixture of the phase. `None` = chosen per fixture.
    #[serde(default)]
    pub venue: Option<String>,
}

impl KnockoutTemplate {
    pub fn new(phase: Phase, first_match_id: u32) -> Self {
        Self {
            phase,
            first_match_id,
            days: Vec::new(),
            slots: Vec::new(),
            matchups: Vec::new(),
            venue: None,
        }
    }

    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days.extend(days.into_iter().map(Into::into));
        self
    }

    pub fn with_slots<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots.extend(slots.into_iter().map(Into::into));
        self
    }

    /// Adds a matchup from two labels ("1A", "W37", ...).
    pub fn with_matchup(mut self, home: &str, away: &str) -> Self {
        let parse = |label: &str| {
            label
                .parse()
                .unwrap_or_else(|_| Participant::Team(label.to_string()))
        };
        self.matchups.push((parse(home), parse(away)));
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Match id of the last fixture in this phase.
    pub fn last_match_id(&self) -> u32 {
        self.first_match_id + self.matchups.len().saturating_sub(1) as u32
    }
}

/// A knockout fixture that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedKnockout {
    pub match_id: u32,
    pub phase: Phase,
    pub home: Participant,
    pub away: Participant,
    pub reason: DropReason,
}

/// Output of the knockout builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutSchedule {
    pub fixtures: Vec<KnockoutFixture>,
    pub dropped: Vec<DroppedKnockout>,
}

impl KnockoutSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixtures of one phase, in match id order.
    pub fn phase(&self, phase: Phase) -> Vec<&KnockoutFixture> {
        self.fixtures.iter().filter(|f| f.phase == phase).collect()
    }

    /// Finds a fixture by match id.
    pub fn fixture(&self, match_id: u32) -> Option<&KnockoutFixture> {
        self.fixtures.iter().find(|f| f.match_id == match_id)
    }

    /// Whether every templated fixture was placed.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Appends another schedule.
    pub fn extend(&mut self, other: KnockoutSchedule) {
        self.fixtures.extend(other.fixtures);
        self.dropped.extend(other.dropped);
    }
}
