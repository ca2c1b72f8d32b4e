//! Input validation and calendar audits.
//!
//! [`validate_reference`] checks the structural integrity of reference
//! data before the draw. Detects:
//! - Duplicate team, pot and venue names
//! - Unbalanced or empty pots
//! - Fixed placements and the opening fixture naming unknown teams,
//!   groups, days, slots or venues
//! - Journey windows and slots outside the calendar
//! - Journey windows that share a day, or that contain the opening day
//!   without pinning the opening fixture
//! - Knockout phases that share a day or a match id
//!
//! [`audit_calendar`] re-checks a finished calendar: no team twice on a
//! day, no venue twice in a (day, slot), no pairing scheduled twice.

use std::collections::{HashMap, HashSet};

use crate::models::{JourneySchedule, KnockoutSchedule, Phase, ReferenceData, Violation};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same name.
    DuplicateId,
    /// Pots are empty or differ in size.
    UnbalancedPots,
    /// A team reference does not match any pot entry.
    InvalidTeamReference,
    /// A group label is outside the drawn groups.
    InvalidGroupReference,
    /// A venue reference does not match any venue.
    InvalidVenueReference,
    /// A day or day window lies outside the calendar.
    InvalidDay,
    /// A time slot is not part of the calendar.
    InvalidTimeSlot,
    /// A journey names a matchday the round robin does not have.
    InvalidMatchday,
    /// A journey pins the opening fixture but none is configured.
    MissingOpening,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates tournament reference data.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_reference(data: &ReferenceData) -> ValidationResult {
    let mut errors = Vec::new();

    check_pots(data, &mut errors);
    check_venues(data, &mut errors);
    check_placements(data, &mut errors);
    check_opening(data, &mut errors);
    check_journeys(data, &mut errors);
    check_journey_windows(data, &mut errors);
    check_knockout(data, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_pots(data: &ReferenceData, errors: &mut Vec<ValidationError>) {
    if data.pots.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnbalancedPots,
            "No pots defined",
        ));
        return;
    }

    let mut pot_names = HashSet::new();
    let mut team_names = HashSet::new();
    for pot in &data.pots {
        if !pot_names.insert(pot.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate pot name: {}", pot.name),
            ));
        }
        for team in &pot.teams {
            if !team_names.insert(team.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate team name: {team}"),
                ));
            }
        }
    }

    let size = data.pots[0].len();
    if size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnbalancedPots,
            format!("Pot '{}' is empty", data.pots[0].name),
        ));
    }
    for pot in &data.pots[1..] {
        if pot.len() != size {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnbalancedPots,
                format!(
                    "Pot '{}' has {} teams, expected {size}",
                    pot.name,
                    pot.len()
                ),
            ));
        }
    }
}

fn check_venues(data: &ReferenceData, errors: &mut Vec<ValidationError>) {
    let mut names = HashSet::new();
    for venue in &data.venues {
        if !names.insert(venue.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate venue name: {}", venue.name),
            ));
        }
    }

    for template in &data.knockout {
        if let Some(venue) = &template.venue {
            if data.venue(venue).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidVenueReference,
                    format!("{} references unknown venue '{venue}'", template.phase),
                ));
            }
        }
    }
}

fn check_placements(data: &ReferenceData, errors: &mut Vec<ValidationError>) {
    let labels = data.group_labels();
    for placement in &data.fixed_placements {
        if data.pot_of(&placement.team).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTeamReference,
                format!("Fixed placement references unknown team '{}'", placement.team),
            ));
        }
        if !labels.contains(&placement.group) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidGroupReference,
                format!(
                    "Fixed placement of '{}' references unknown group '{}'",
                    placement.team, placement.group
                ),
            ));
        }
    }
}

fn check_opening(data: &ReferenceData, errors: &mut Vec<ValidationError>) {
    let Some(opening) = &data.opening else {
        if data.journeys.iter().any(|j| j.opening) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingOpening,
                "A journey pins the opening fixture but none is configured",
            ));
        }
        return;
    };

    if data.pot_of(&opening.team).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTeamReference,
            format!("Opening fixture references unknown team '{}'", opening.team),
        ));
    }
    if data.calendar.day_index(&opening.day).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidDay,
            format!("Opening fixture day '{}' is not in the calendar", opening.day),
        ));
    }
    if !data.calendar.has_time_slot(&opening.time_slot) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimeSlot,
            format!(
                "Opening fixture slot '{}' is not in the calendar",
                opening.time_slot
            ),
        ));
    }
    if data.venue(&opening.venue).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidVenueReference,
            format!("Opening fixture references unknown venue '{}'", opening.venue),
        ));
    }
}

fn check_journeys(data: &ReferenceData, errors: &mut Vec<ValidationError>) {
    let day_count = data.calendar.days.len();

    for (i, journey) in data.journeys.iter().enumerate() {
        let number = i + 1;

        if journey.matchday == 0 || journey.matchday > data.matchdays {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidMatchday,
                format!(
                    "Journey {number} plays matchday {}, round robin has {}",
                    journey.matchday, data.matchdays
                ),
            ));
        }

        if journey.window.is_empty() || journey.window.end > day_count {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDay,
                format!(
                    "Journey {number} window [{}, {}) is outside the {day_count}-day calendar",
                    journey.window.start, journey.window.end
                ),
            ));
        }

        if journey.slots.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeSlot,
                format!("Journey {number} has no time slots"),
            ));
        }
        for slot in &journey.slots {
            if !data.calendar.has_time_slot(slot) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeSlot,
                    format!("Journey {number} uses unknown time slot '{slot}'"),
                ));
            }
        }
    }
}

/// Journeys must use disjoint days. The opening day may only fall in the
/// window of a journey that pins the opening fixture.
fn check_journey_windows(data: &ReferenceData, errors: &mut Vec<ValidationError>) {
    for (i, a) in data.journeys.iter().enumerate() {
        for (j, b) in data.journeys.iter().enumerate().skip(i + 1) {
            if a.window.overlaps(&b.window) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidDay,
                    format!(
                        "Journey {} window [{}, {}) overlaps journey {} window [{}, {})",
                        i + 1,
                        a.window.start,
                        a.window.end,
                        j + 1,
                        b.window.start,
                        b.window.end
                    ),
                ));
            }
        }
    }

    let Some(opening) = &data.opening else {
        return;
    };
    let Some(day) = data.calendar.day_index(&opening.day) else {
        return;
    };
    for (i, journey) in data.journeys.iter().enumerate() {
        if !journey.opening && journey.window.contains(day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDay,
                format!(
                    "Opening day '{}' falls in journey {} which does not pin the opening fixture",
                    opening.day,
                    i + 1
                ),
            ));
        }
    }
}

fn check_knockout(data: &ReferenceData, errors: &mut Vec<ValidationError>) {
    let mut days: HashMap<&str, Phase> = HashMap::new();
    for template in &data.knockout {
        for day in &template.days {
            match days.get(day.as_str()) {
                Some(&other) if other != template.phase => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidDay,
                        format!("{} and {} both use day '{day}'", other, template.phase),
                    ));
                }
                Some(_) => {}
                None => {
                    days.insert(day.as_str(), template.phase);
                }
            }
        }
    }

    for (i, a) in data.knockout.iter().enumerate() {
        if a.matchups.is_empty() {
            continue;
        }
        for b in data.knockout.iter().skip(i + 1) {
            if b.matchups.is_empty() {
                continue;
            }
            if a.first_match_id <= b.last_match_id() && b.first_match_id <= a.last_match_id() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!(
                        "{} ids {}..={} overlap {} ids {}..={}",
                        a.phase,
                        a.first_match_id,
                        a.last_match_id(),
                        b.phase,
                        b.first_match_id,
                        b.last_match_id()
                    ),
                ));
            }
        }
    }
}

/// Audits a finished calendar.
///
/// Group fixtures are checked for team double-booking per day, venue
/// double-booking per (day, slot) and repeated pairings. Knockout fixtures
/// are checked for venue double-booking. Returns every violation found.
pub fn audit_calendar(journeys: &[JourneySchedule], knockout: &KnockoutSchedule) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut team_days: HashSet<(&str, &str)> = HashSet::new();
    let mut venue_slots: HashMap<(&str, &str, &str), usize> = HashMap::new();
    let mut pairings = HashSet::new();

    for journey in journeys {
        for f in &journey.fixtures {
            for team in [f.fixture.home.as_str(), f.fixture.away.as_str()] {
                if !team_days.insert((team, f.day.as_str())) {
                    violations.push(Violation::team_double_booked(
                        team,
                        format!("{team} plays more than once on {}", f.day),
                    ));
                }
            }

            *venue_slots
                .entry((f.venue.as_str(), f.day.as_str(), f.time_slot.as_str()))
                .or_insert(0) += 1;

            let (a, b) = f.fixture.pair_key();
            if !pairings.insert((a.clone(), b.clone())) {
                violations.push(Violation::duplicate_pairing(
                    format!("{a}-{b}"),
                    format!("{a} vs {b} is scheduled more than once"),
                ));
            }
        }
    }

    for f in &knockout.fixtures {
        *venue_slots
            .entry((f.venue.as_str(), f.day.as_str(), f.time_slot.as_str()))
            .or_insert(0) += 1;
    }

    let mut doubled: Vec<_> = venue_slots.into_iter().filter(|(_, n)| *n > 1).collect();
    doubled.sort();
    for ((venue, day, slot), n) in doubled {
        violations.push(Violation::venue_double_booked(
            venue,
            format!("{venue} hosts {n} fixtures on {day} at {slot}"),
        ));
    }

    violations
}
