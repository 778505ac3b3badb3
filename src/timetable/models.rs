use chrono::{NaiveTime, Weekday};

/// A class on one day of the week
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub day: Weekday,

    /// Time the class starts
    pub start: NaiveTime,

    /// Time the class ends, always after `start`
    pub end: NaiveTime,

    /// Class' name, or the time range when there is none
    pub label: String,
}

/// Weekly grid, one column per day and one row per time slot
#[derive(Debug)]
pub struct Timetable {
    /// Columns, from monday
    pub days: Vec<Weekday>,

    /// Start of the first row
    pub origin: NaiveTime,

    /// Length of a row, in minutes
    pub slot_minutes: u32,

    /// Number of rows
    pub rows: usize,

    /// `cells[column][row]` is the index of the block using the slot
    pub cells: Vec<Vec<Option<usize>>>,

    pub blocks: Vec<Block>,

    /// Pairs of blocks sharing at least one slot, the first one is displayed
    pub conflicts: Vec<(usize, usize)>,
}
