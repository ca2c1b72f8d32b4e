//! Per-journey scheduling parameters.
//!
//! Each journey of the group stage is scheduled from one `JourneyConfig`.
//! Density differences between journeys (three slots a day early on, two
//! simultaneous evening kick-offs on the last matchday) are expressed here
//! rather than in the scheduler.

use serde::{Deserialize, Serialize};

use super::DayWindow;

/// How the (day, slot) cursor moves while a journey is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotAdvance {
    /// Move to the next slot after every placed fixture.
    #[default]
    PerFixture,
    /// Move once per group, so a group's fixtures share a kick-off.
    PerGroup,
}

/// Scheduling parameters for one journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyConfig {
    /// Round-robin matchday played in this journey (1-based).
    pub matchday: usize,
    /// Calendar days available to the journey.
    pub window: DayWindow,
    /// Time slots used each day, in order.
    pub slots: Vec<String>,
    #[serde(default)]
    pub advance: SlotAdvance,
    /// Whether the opening fixture is pinned in this journey.
    #[serde(default)]
    pub opening: bool,
}

impl JourneyConfig {
    pub fn new(matchday: usize, window: DayWindow) -> Self {
        Self {
            matchday,
            window,
            slots: Vec::new(),
            advance: SlotAdvance::PerFixture,
            opening: false,
        }
    }

    pub fn with_slots<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots.extend(slots.into_iter().map(Into::into));
        self
    }

    pub fn with_advance(mut self, advance: SlotAdvance) -> Self {
        self.advance = advance;
        self
    }

    /// Pins the opening fixture in this journey.
    pub fn with_opening(mut self) -> Self {
        self.opening = true;
        self
    }

    /// Number of (day, slot) positions the cursor can visit.
    pub fn capacity(&self) -> usize {
        self.window.len() * self.slots.len()
    }
}
