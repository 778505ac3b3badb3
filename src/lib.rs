//! Weekly timetables out of academy schedule strings
//!
//! The core is [`schedule::parse_schedule_multiple`], turning
//! `월/수/금 18:00~22:00` into one entry per day. Everything else displays,
//! filters or exports those entries.

pub mod config;
pub mod error;
pub mod filter;
pub mod ics;
pub mod info;
pub mod schedule;
pub mod source;
pub mod timetable;
pub mod utils;

pub use error::{Error, Result};
pub use schedule::{
    format_entries, parse_schedule, parse_schedule_multiple,
    models::{ScheduleEntry, ScheduleSummary},
};
