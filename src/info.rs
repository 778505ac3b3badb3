use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use regex::Regex;

use crate::error::{Error, Result};

/// Period over which the weekly schedule repeats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Term {
    /// First day of classes
    pub first_day: NaiveDate,
    /// Number of weeks
    pub weeks: u32,
}

static KOREAN_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<y>[0-9]{4})\s*년\s*(?P<m>[0-9]{1,2})\s*월\s*(?P<d>[0-9]{1,2})\s*일$")
        .expect("valid date regex")
});

/// Turn `2025-03-04` or `2025년 3월 4일` to a date
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    let date = date.trim();
    let invalid = || Error::InvalidDate(date.to_owned());

    if let Some(captures) = KOREAN_DATE.captures(date) {
        let y = captures["y"].parse().map_err(|_| invalid())?;
        let m = captures["m"].parse().map_err(|_| invalid())?;
        let d = captures["d"].parse().map_err(|_| invalid())?;
        return NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())
}

/// First date on or after `from` which is a `weekday`
pub fn next_occurrence(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - from.weekday().num_days_from_monday()) % 7;
    from + Duration::days(ahead.into())
}

/// Proposed start of the term: the coming monday
pub fn default_first_day(today: NaiveDate) -> NaiveDate {
    next_occurrence(today, Weekday::Mon)
}
