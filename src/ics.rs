use chrono::{NaiveDateTime, Utc};
use ::ics::{
    escape_text,
    parameters::TzIDParam,
    properties::{Description, DtEnd, DtStart, RRule, Summary},
    Event, ICalendar,
};
use tracing::info;

use crate::error::Result;
use crate::info::{next_occurrence, Term};
use crate::timetable::Block;

const PRODID: &str = concat!("-//hagwon-timetable//", env!("CARGO_PKG_VERSION"), "//KO");

fn ics_datetime(datetime: NaiveDateTime) -> String {
    datetime.format("%Y%m%dT%H%M%S").to_string()
}

/// Build the calendar, each block repeats weekly over the term
///
/// With `tz` times are attached to that timezone, otherwise they are
/// floating times.
pub fn build<'a>(blocks: &[Block], term: &Term, tz: Option<&'a str>) -> ICalendar<'a> {
    let mut calendar = ICalendar::new("2.0", PRODID);
    let dtstamp = format!("{}Z", ics_datetime(Utc::now().naive_utc()));

    for block in blocks {
        let date = next_occurrence(term.first_day, block.day);

        // UID, Date
        let mut event = Event::new(uuid::Uuid::new_v4().to_string(), dtstamp.clone());

        // Start and end of the first occurrence
        let mut dtstart = DtStart::new(ics_datetime(date.and_time(block.start)));
        let mut dtend = DtEnd::new(ics_datetime(date.and_time(block.end)));
        if let Some(tz) = tz {
            dtstart.add(TzIDParam::new(tz));
            dtend.add(TzIDParam::new(tz));
        }
        event.push(dtstart);
        event.push(dtend);

        event.push(RRule::new(format!("FREQ=WEEKLY;COUNT={}", term.weeks)));
        event.push(Summary::new(escape_text(block.label.clone())));
        event.push(Description::new(format!(
            "{}~{}",
            block.start.format("%H:%M"),
            block.end.format("%H:%M")
        )));

        calendar.add_event(event);
    }

    calendar
}

/// Write the calendar, adding the `.ics` extension when missing
pub fn export(calendar: &ICalendar, filename: &str) -> Result<String> {
    let mut filename = filename.to_owned();
    if !filename.ends_with(".ics") {
        filename.push_str(".ics");
    }

    calendar.save_file(&filename)?;
    info!(%filename, "calendar exported");

    Ok(filename)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Weekday};

    use super::*;

    fn sample() -> Vec<Block> {
        vec![Block {
            day: Weekday::Wed,
            start: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            label: "수학, 심화".to_string(),
        }]
    }

    fn term() -> Term {
        Term {
            // tuesday
            first_day: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            weeks: 12,
        }
    }

    #[test]
    fn weekly_event() {
        let blocks = sample();
        let calendar = build(&blocks, &term(), Some("Asia/Seoul")).to_string();

        assert!(calendar.contains("BEGIN:VEVENT"));
        assert!(calendar.contains("DTSTART;TZID=Asia/Seoul:20250305T180000"));
        assert!(calendar.contains("DTEND;TZID=Asia/Seoul:20250305T203000"));
        assert!(calendar.contains("RRULE:FREQ=WEEKLY;COUNT=12"));
        assert!(calendar.contains("SUMMARY:수학\\, 심화"));
    }

    #[test]
    fn floating_times() {
        let blocks = sample();
        let calendar = build(&blocks, &term(), None).to_string();

        assert!(calendar.contains("DTSTART:20250305T180000\r\n"));
    }

    #[test]
    fn export_adds_extension() {
        let dir = tempfile::tempdir().unwrap();
        let blocks = sample();
        let calendar = build(&blocks, &term(), None);

        let name = dir.path().join("timetable").to_string_lossy().to_string();
        let written = export(&calendar, &name).unwrap();

        assert!(written.ends_with("timetable.ics"));
        let content = std::fs::read_to_string(written).unwrap();
        assert!(content.starts_with("BEGIN:VCALENDAR"));
    }
}
