use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Day symbols, from monday to sunday
pub const DAY_SYMBOLS: [char; 7] = ['월', '화', '수', '목', '금', '토', '일'];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Weekday of a day symbol
pub fn weekday_of(symbol: char) -> Option<Weekday> {
    DAY_SYMBOLS
        .iter()
        .position(|&c| c == symbol)
        .map(|i| WEEKDAYS[i])
}

/// Day symbol of a weekday
pub fn symbol_of(weekday: Weekday) -> char {
    DAY_SYMBOLS[weekday.num_days_from_monday() as usize]
}

/// One weekday paired with one time range
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Day token, usually a single day symbol
    pub day: String,

    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

impl ScheduleEntry {
    /// Weekday of the entry, only when the token is exactly one day symbol
    pub fn weekday(&self) -> Option<Weekday> {
        let mut chars = self.day.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => weekday_of(c),
            _ => None,
        }
    }

    /// Start as a clock time, `None` when the numbers are out of range
    pub fn start_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.start_hour.into(), self.start_minute.into(), 0)
    }

    /// End as a clock time, `None` when the numbers are out of range
    pub fn end_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.end_hour.into(), self.end_minute.into(), 0)
    }

    /// Time range of the entry, as written in schedule strings
    pub fn range(&self) -> TimeRange {
        TimeRange {
            start_hour: self.start_hour,
            start_minute: self.start_minute,
            end_hour: self.end_hour,
            end_minute: self.end_minute,
        }
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.range())
    }
}

/// Start and end of a clause, shared by all its days
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeRange {
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

impl TimeRange {
    /// Entry for `day` using this range
    pub fn entry(self, day: &str) -> ScheduleEntry {
        ScheduleEntry {
            day: day.to_owned(),
            start_hour: self.start_hour,
            start_minute: self.start_minute,
            end_hour: self.end_hour,
            end_minute: self.end_minute,
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}~{}:{:02}",
            self.start_hour, self.start_minute, self.end_hour, self.end_minute
        )
    }
}

/// Legacy shape: every day of a schedule with a single shared time range
///
/// The time is the one of the first entry, so a schedule mixing several
/// ranges loses information here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub days: Vec<String>,
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

impl ScheduleSummary {
    pub fn range(&self) -> TimeRange {
        TimeRange {
            start_hour: self.start_hour,
            start_minute: self.start_minute,
            end_hour: self.end_hour,
            end_minute: self.end_minute,
        }
    }

    /// Expand back to one entry per day
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        let range = self.range();
        self.days.iter().map(|day| range.entry(day)).collect()
    }

    /// Single multi-day clause, i.e.: `월/수/금 18:00~22:00`
    pub fn to_schedule_string(&self) -> String {
        format!("{} {}", self.days.join("/"), self.range())
    }
}
