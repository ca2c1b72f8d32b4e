//! Plain-text calendar rendering.
//!
//! Group-stage matches are numbered sequentially across journeys and
//! listed group by group; knockout matches keep their match ids.

use std::fmt::{self, Write};

use crate::models::{DropReason, Phase};
use crate::tournament::TournamentCalendar;

/// Renders the whole calendar as text.
pub fn render_calendar(calendar: &TournamentCalendar) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_calendar(&mut out, calendar);
    out
}

fn reason_label(reason: DropReason) -> &'static str {
    match reason {
        DropReason::TeamAlreadyScheduled => "team already playing",
        DropReason::WindowExhausted => "no slot left",
        DropReason::NoVenueAvailable => "no venue available",
    }
}

fn write_calendar(out: &mut impl Write, calendar: &TournamentCalendar) -> fmt::Result {
    writeln!(out, "{}", calendar.name)?;
    writeln!(out)?;
    writeln!(out, "======== Group draw ========")?;
    for group in &calendar.draw.groups {
        writeln!(out, "Group {}: {}", group.label, group.team_names().join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "======== Group stage ========")?;
    let mut number = 1;
    for journey in &calendar.journeys {
        writeln!(out)?;
        writeln!(out, "Journey {} (matchday {}):", journey.journey, journey.matchday)?;
        for group in &calendar.draw.groups {
            let fixtures = journey.fixtures_for_group(&group.label);
            if fixtures.is_empty() {
                continue;
            }
            writeln!(out, "Group {}", group.label)?;
            for f in fixtures {
                writeln!(
                    out,
                    "Match {number}: {} vs {} - {} - {} - {}",
                    f.fixture.home, f.fixture.away, f.day, f.time_slot, f.venue
                )?;
                number += 1;
            }
        }
        for d in &journey.dropped {
            writeln!(
                out,
                "Not scheduled: {} vs {} (group {}, {})",
                d.fixture.home,
                d.fixture.away,
                d.fixture.group,
                reason_label(d.reason)
            )?;
        }
    }

    if calendar.knockout.fixtures.is_empty() && calendar.knockout.dropped.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "======== Knockout phase ========")?;
    for phase in Phase::ALL {
        let fixtures = calendar.knockout.phase(phase);
        let dropped: Vec<_> = calendar
            .knockout
            .dropped
            .iter()
            .filter(|d| d.phase == phase)
            .collect();
        if fixtures.is_empty() && dropped.is_empty() {
            continue;
        }

        writeln!(out)?;
        writeln!(out, "{phase}:")?;
        for f in fixtures {
            writeln!(
                out,
                "Match {}: {} - {} - {} - {} - {}",
                f.match_id, f.home, f.away, f.day, f.time_slot, f.venue
            )?;
        }
        for d in dropped {
            writeln!(
                out,
                "Match {}: {} - {} not scheduled ({})",
                d.match_id,
                d.home,
                d.away,
                reason_label(d.reason)
            )?;
        }
    }

    Ok(())
}

impl fmt::Display for TournamentCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_calendar(f, self)
    }
}
