//! Group-stage fixtures.

use serde::{Deserialize, Serialize};

/// An unscheduled pairing inside a group's round robin.
///
/// The pairing is unordered; `home`/`away` only record the order the
/// generator emitted them in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    /// Group label.
    pub group: String,
    /// Matchday within the group's round robin (1-based).
    pub matchday: usize,
    pub home: String,
    pub away: String,
}

impl Fixture {
    pub fn new(
        group: impl Into<String>,
        matchday: usize,
        home: impl Into<String>,
        away: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            matchday,
            home: home.into(),
            away: away.into(),
        }
    }

    /// Whether `team` plays in this fixture.
    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }

    /// The other team, if `team` plays in this fixture.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        if self.home == team {
            Some(&self.away)
        } else if self.away == team {
            Some(&self.home)
        } else {
            None
        }
    }

    /// Order-independent key for the pairing.
    pub fn pair_key(&self) -> (String, String) {
        if self.home <= self.away {
            (self.home.clone(), self.away.clone())
        } else {
            (self.away.clone(), self.home.clone())
        }
    }

    /// Whether both fixtures pair the same two teams, in either order.
    pub fn same_pairing(&self, other: &Fixture) -> bool {
        (self.home == other.home && self.away == other.away)
            || (self.home == other.away && self.away == other.home)
    }
}

/// A fixture bound to a day, time slot and venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFixture {
    pub fixture: Fixture,
    /// Journey the fixture was scheduled in (1-based).
    pub journey: usize,
    pub day: String,
    pub time_slot: String,
    pub venue: String,
}

impl ScheduledFixture {
    pub fn new(
        fixture: Fixture,
        journey: usize,
        day: impl Into<String>,
        time_slot: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        Self {
            fixture,
            journey,
            day: day.into(),
            time_slot: time_slot.into(),
            venue: venue.into(),
        }
    }

    #[inline]
    pub fn involves(&self, team: &str) -> bool {
        self.fixture.involves(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involves_and_opponent() {
        let f = Fixture::new("A", 1, "Germany", "Scotland");
        assert!(f.involves("Germany"));
        assert!(!f.involves("Hungary"));
        assert_eq!(f.opponent_of("Scotland"), Some("Germany"));
        assert_eq!(f.opponent_of("Hungary"), None);
    }

    #[test]
    fn test_pairing_is_unordered() {
        let a = Fixture::new("A", 1, "Germany", "Scotland");
        let b = Fixture::new("A", 3, "Scotland", "Germany");
        assert!(a.same_pairing(&b));
        assert_eq!(a.pair_key(), b.pair_key());

        let c = Fixture::new("A", 1, "Hungary", "Scotland");
        assert!(!a.same_pairing(&c));
    }
}
