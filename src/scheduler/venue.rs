//! Venue selection.
//!
//! A venue hosts at most one fixture per day within one scheduling pass.
//! `VenueLedger` tracks that usage; `VenuePolicy` picks among the venues
//! still free.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Venue;

/// How a venue is chosen among the free ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VenuePolicy {
    /// Uniformly at random, using the caller's RNG.
    #[default]
    Random,
    /// First free venue in reference order. Reproducible without a seed.
    FirstFree,
}

impl VenuePolicy {
    /// Picks one of `candidates`, or `None` if there are none.
    pub fn pick<'v, R: Rng + ?Sized>(
        &self,
        candidates: &[&'v Venue],
        rng: &mut R,
    ) -> Option<&'v Venue> {
        match self {
            VenuePolicy::Random => candidates.choose(rng).copied(),
            VenuePolicy::FirstFree => candidates.first().copied(),
        }
    }
}

impl fmt::Display for VenuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VenuePolicy::Random => write!(f, "random"),
            VenuePolicy::FirstFree => write!(f, "first-free"),
        }
    }
}

/// Unrecognised venue policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown venue policy '{0}' (expected 'random' or 'first-free')")]
pub struct ParseVenuePolicyError(String);

impl FromStr for VenuePolicy {
    type Err = ParseVenuePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(VenuePolicy::Random),
            "first-free" | "first_free" => Ok(VenuePolicy::FirstFree),
            _ => Err(ParseVenuePolicyError(s.to_string())),
        }
    }
}

/// Venues used per day.
#[derive(Debug, Clone, Default)]
pub struct VenueLedger {
    used: HashMap<String, HashSet<String>>,
}

impl VenueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `venue` is still free on `day`.
    pub fn is_free(&self, day: &str, venue: &str) -> bool {
        self.used
            .get(day)
            .map_or(true, |venues| !venues.contains(venue))
    }

    /// Marks `venue` as used on `day`. Returns `false` if it already was.
    pub fn mark(&mut self, day: &str, venue: &str) -> bool {
        self.used
            .entry(day.to_string())
            .or_default()
            .insert(venue.to_string())
    }

    /// Venues still free on `day`, in reference order.
    pub fn free_venues<'v>(&self, day: &str, venues: &'v [Venue]) -> Vec<&'v Venue> {
        venues.iter().filter(|v| self.is_free(day, &v.name)).collect()
    }

    /// Number of venues used on `day`.
    pub fn used_on(&self, day: &str) -> usize {
        self.used.get(day).map(HashSet::len).unwrap_or(0)
    }
}
