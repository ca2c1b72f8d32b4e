//! Tournament calendar and day windows.
//!
//! The calendar is an ordered list of days, each split into the same
//! ordered list of time slots. Journeys address it through half-open
//! [`DayWindow`]s of day indices.

use serde::{Deserialize, Serialize};

/// Ordered days and time slots of the group stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// Day labels in chronological order.
    pub days: Vec<String>,
    /// Time slot labels in chronological order within a day.
    pub time_slots: Vec<String>,
}

impl Calendar {
    pub fn new() -> Self {
        Self {
            days: Vec::new(),
            time_slots: Vec::new(),
        }
    }

    /// Appends a day.
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.days.push(day.into());
        self
    }

    /// Appends a time slot.
    pub fn with_time_slot(mut self, slot: impl Into<String>) -> Self {
        self.time_slots.push(slot.into());
        self
    }

    /// Index of a day label.
    pub fn day_index(&self, day: &str) -> Option<usize> {
        self.days.iter().position(|d| d == day)
    }

    /// Whether a time slot label exists.
    pub fn has_time_slot(&self, slot: &str) -> bool {
        self.time_slots.iter().any(|s| s == slot)
    }

    /// Days covered by `window`. Empty if the window falls outside the calendar.
    pub fn window_days(&self, window: &DayWindow) -> &[String] {
        self.days.get(window.start..window.end).unwrap_or(&[])
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

/// A half-open range of day indices [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// First day index (inclusive).
    pub start: usize,
    /// Last day index (exclusive).
    pub end: usize,
}

impl DayWindow {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of days in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a day index falls within the window.
    #[inline]
    pub fn contains(&self, day_index: usize) -> bool {
        day_index >= self.start && day_index < self.end
    }

    /// Whether two windows share a day.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Calendar {
        Calendar::new()
            .with_day("Fri")
            .with_day("Sat")
            .with_day("Sun")
            .with_time_slot("6pm")
            .with_time_slot("9pm")
    }

    #[test]
    fn test_day_window() {
        let w = DayWindow::new(1, 3);
        assert_eq!(w.len(), 2);
        assert!(w.contains(1));
        assert!(w.contains(2));
        assert!(!w.contains(3)); // exclusive end
        assert!(!w.contains(0));
    }

    #[test]
    fn test_window_overlap() {
        let a = DayWindow::new(0, 4);
        let b = DayWindow::new(3, 6);
        assert!(a.overlaps(&b));
        let c = DayWindow::new(4, 6); // touching
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_window_days() {
        let cal = sample();
        assert_eq!(cal.window_days(&DayWindow::new(1, 3)), ["Sat", "Sun"]);
        assert!(cal.window_days(&DayWindow::new(2, 9)).is_empty());
    }

    #[test]
    fn test_lookups() {
        let cal = sample();
        assert_eq!(cal.day_index("Sun"), Some(2));
        assert_eq!(cal.day_index("Mon"), None);
        assert!(cal.has_time_slot("9pm"));
        assert!(!cal.has_time_slot("3pm"));
    }
}
