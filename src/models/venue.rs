//! Venue model.
//!
//! Venues are the resources fixtures are bound to. A venue hosts at most
//! one fixture per day.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stadium that can host fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Unique venue name.
    pub name: String,
    /// Host city.
    #[serde(default)]
    pub city: String,
    /// Seating capacity, if known.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Domain-specific metadata.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Venue {
    /// Creates a venue with no city or capacity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: String::new(),
            capacity: None,
            attributes: HashMap::new(),
        }
    }

    /// Sets the host city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
