//! Teams, pots and groups.

use serde::{Deserialize, Serialize};

/// A participating team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    /// Team name (unique across the tournament).
    pub name: String,
    /// Name of the seeding pot the team was drawn from.
    pub pot: String,
}

impl Team {
    pub fn new(name: impl Into<String>, pot: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pot: pot.into(),
        }
    }
}

/// A seeding tier. After a valid draw, every pot has exactly one
/// representative in every group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    /// Pot name.
    pub name: String,
    /// Names of the teams in this pot.
    pub teams: Vec<String>,
}

impl Pot {
    /// Creates an empty pot.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            teams: Vec::new(),
        }
    }

    /// Adds a team.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.teams.push(team.into());
        self
    }

    /// Adds several teams.
    pub fn with_teams<I, S>(mut self, teams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teams.extend(teams.into_iter().map(Into::into));
        self
    }

    /// Number of teams.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether the pot has no teams.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Whether a team belongs to this pot.
    pub fn contains(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }
}

/// A drawn group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group label ("A", "B", ...).
    pub label: String,
    /// Teams, ordered by pot.
    pub teams: Vec<Team>,
}

impl Group {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            teams: Vec::new(),
        }
    }

    /// Whether a team is in this group.
    pub fn contains(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t.name == team)
    }

    /// Team names in group order.
    pub fn team_names(&self) -> Vec<&str> {
        self.teams.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Label for the group at `index`: 0 → "A", 1 → "B", ..., 26 → "AA".
pub fn group_label(index: usize) -> String {
    let mut label = String::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_labels() {
        assert_eq!(group_label(0), "A");
        assert_eq!(group_label(5), "F");
        assert_eq!(group_label(25), "Z");
        assert_eq!(group_label(26), "AA");
    }

    #[test]
    fn test_pot_builder() {
        let pot = Pot::new("Pot 1")
            .with_team("Germany")
            .with_teams(["Spain", "France"]);
        assert_eq!(pot.len(), 3);
        assert!(pot.contains("Spain"));
        assert!(!pot.contains("Italy"));
    }

    #[test]
    fn test_group_membership() {
        let mut group = Group::new("A");
        group.teams.push(Team::new("Germany", "Pot 1"));
        group.teams.push(Team::new("Scotland", "Pot 3"));
        assert!(group.contains("Scotland"));
        assert_eq!(group.team_names(), vec!["Germany", "Scotland"]);
        assert_eq!(group.len(), 2);
    }
}
