//! Schedule strings, i.e.: `월/수/금 18:00~22:00, 토 10:00~12:00`
//!
//! Parsing is lenient: a clause that doesn't match is dropped, there is no
//! error to report. Hours and minutes are kept as written, without checking
//! they make a valid clock time.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use self::models::{ScheduleEntry, ScheduleSummary, TimeRange, DAY_SYMBOLS};

pub mod models;

/// `HH:MM~HH:MM` (or `-`) at the end of a clause
const RANGE: &str =
    r"\s*(?P<h1>[0-9]{1,2}):(?P<m1>[0-9]{2})\s*[~-]\s*(?P<h2>[0-9]{1,2}):(?P<m2>[0-9]{2})$";

fn symbols() -> String {
    DAY_SYMBOLS.iter().collect()
}

/// Exactly one day then the time range
static SINGLE_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?P<day>[{}]){RANGE}", symbols())).expect("valid single-day regex")
});

/// A run of days and `/` then the time range
static MULTI_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?P<days>[{}/]+){RANGE}", symbols())).expect("valid multi-day regex")
});

/// Parse every clause of a schedule, one entry per day
pub fn parse_schedule_multiple(text: Option<&str>) -> Vec<ScheduleEntry> {
    let Some(text) = text else {
        return vec![];
    };

    let mut entries = vec![];
    for segment in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if let Some(captures) = SINGLE_DAY.captures(segment) {
            let range = range(&captures);
            entries.push(range.entry(&captures["day"]));
        } else if let Some(captures) = MULTI_DAY.captures(segment) {
            let range = range(&captures);
            entries.extend(day_tokens(&captures["days"]).map(|day| range.entry(&day)));
        } else {
            debug!(segment, "dropping unrecognised schedule clause");
        }
    }

    entries
}

/// Split a day run into tokens
///
/// With `/` the pieces are kept as they are, otherwise every day symbol is
/// its own token and anything else is ignored.
fn day_tokens(days: &str) -> Box<dyn Iterator<Item = String> + '_> {
    if days.contains('/') {
        Box::new(
            days.split('/')
                .filter(|piece| !piece.is_empty())
                .map(str::to_owned),
        )
    } else {
        Box::new(
            days.chars()
                .filter(|c| DAY_SYMBOLS.contains(c))
                .map(String::from),
        )
    }
}

/// Time range of a matching clause
fn range(captures: &Captures) -> TimeRange {
    // At most two ASCII digits, always fits
    let number = |name: &str| captures[name].parse::<u8>().unwrap_or_default();

    TimeRange {
        start_hour: number("h1"),
        start_minute: number("m1"),
        end_hour: number("h2"),
        end_minute: number("m2"),
    }
}

/// Collapse a schedule into a single time range shared by all its days
///
/// Takes the time of the first entry: only exact when every clause uses the
/// same range.
pub fn parse_schedule(text: Option<&str>) -> Option<ScheduleSummary> {
    let entries = parse_schedule_multiple(text);
    let first = entries.first()?;

    let mut days: Vec<String> = vec![];
    for entry in &entries {
        if !days.contains(&entry.day) {
            days.push(entry.day.clone());
        }
    }

    Some(ScheduleSummary {
        days,
        start_hour: first.start_hour,
        start_minute: first.start_minute,
        end_hour: first.end_hour,
        end_minute: first.end_minute,
    })
}

/// Write entries back as a schedule string
///
/// Days sharing a time range end up in the same clause, clauses keep the
/// order in which their range first appears.
pub fn format_entries(entries: &[ScheduleEntry]) -> String {
    let mut clauses: Vec<(TimeRange, Vec<&str>)> = vec![];
    for entry in entries {
        let range = entry.range();
        match clauses.iter_mut().find(|(r, _)| *r == range) {
            Some((_, days)) => {
                if !days.contains(&entry.day.as_str()) {
                    days.push(&entry.day);
                }
            }
            None => clauses.push((range, vec![entry.day.as_str()])),
        }
    }

    clauses
        .iter()
        .map(|(range, days)| format!("{} {range}", days.join("/")))
        .collect::<Vec<_>>()
        .join(", ")
}
