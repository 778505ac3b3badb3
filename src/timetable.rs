use chrono::{Duration, NaiveTime, Timelike, Weekday};
use tracing::warn;

use crate::schedule::models::{symbol_of, ScheduleEntry};
use crate::utils::{
    self, center, display_width,
    models::{Position, TabChar},
};

pub use self::models::{Block, Timetable};

pub mod models;

/// Width of the hours column
const HOURS_LENGTH: usize = 7;

/// Turn parsed entries into blocks
///
/// Entries that can't be placed on the grid are skipped: unknown day token,
/// impossible clock time, or an end not after the start. Without `label`
/// blocks are named after their time range.
pub fn blocks(entries: &[ScheduleEntry], label: Option<&str>) -> Vec<Block> {
    entries
        .iter()
        .filter_map(|entry| {
            let (Some(day), Some(start), Some(end)) =
                (entry.weekday(), entry.start_time(), entry.end_time())
            else {
                warn!(%entry, "entry doesn't fit in a week, skipped");
                return None;
            };
            if end <= start {
                warn!(%entry, "entry ends before it starts, skipped");
                return None;
            }

            Some(Block {
                day,
                start,
                end,
                label: label.map_or_else(|| entry.range().to_string(), str::to_owned),
            })
        })
        .collect()
}

fn minutes(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

impl Timetable {
    /// Lay the blocks out on a grid of `slot_minutes` rows
    ///
    /// Blocks not ending after their start are left out.
    pub fn build(blocks: Vec<Block>, slot_minutes: u32) -> Self {
        let slot = slot_minutes.max(1);
        let blocks: Vec<Block> = blocks
            .into_iter()
            .filter(|block| {
                if block.end <= block.start {
                    warn!(label = %block.label, "block ends before it starts, skipped");
                    return false;
                }
                true
            })
            .collect();

        let mut days = vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ];
        for weekend in [Weekday::Sat, Weekday::Sun] {
            if blocks.iter().any(|block| block.day == weekend) {
                days.push(weekend);
            }
        }

        let first = blocks.iter().map(|b| minutes(b.start)).min().unwrap_or(0) / slot * slot;
        let last = blocks
            .iter()
            .map(|b| minutes(b.end).div_ceil(slot) * slot)
            .max()
            .unwrap_or(first);
        let rows = ((last - first) / slot) as usize;

        let mut cells: Vec<Vec<Option<usize>>> = vec![vec![None; rows]; days.len()];
        let mut conflicts = vec![];
        for (i, block) in blocks.iter().enumerate() {
            let Some(column) = days.iter().position(|d| *d == block.day) else {
                continue;
            };
            let from = ((minutes(block.start) - first) / slot) as usize;
            let to = ((minutes(block.end) - first).div_ceil(slot)) as usize;

            for cell in &mut cells[column][from..to] {
                match *cell {
                    Some(j) => {
                        if !conflicts.contains(&(j, i)) {
                            warn!(
                                first = %blocks[j].label,
                                second = %block.label,
                                "classes overlap"
                            );
                            conflicts.push((j, i));
                        }
                    }
                    None => *cell = Some(i),
                }
            }
        }

        let origin = NaiveTime::default() + Duration::minutes(first.into());

        Self {
            days,
            origin,
            slot_minutes: slot,
            rows,
            cells,
            blocks,
            conflicts,
        }
    }

    /// Time a row starts
    pub fn slot_start(&self, row: usize) -> NaiveTime {
        let offset = i64::from(self.slot_minutes) * row as i64;
        self.origin + Duration::minutes(offset)
    }

    /// Blocks overlapping each other, as pairs of indexes
    pub fn conflicts(&self) -> &[(usize, usize)] {
        &self.conflicts
    }

    /// True when the slot continues the block of the slot above
    fn continues(&self, column: usize, row: usize) -> bool {
        row > 0
            && self.cells[column][row].is_some()
            && self.cells[column][row] == self.cells[column][row - 1]
    }

    /// Text of a cell: the label on the first slot of a block, its time range
    /// on the second one, or only its end when the range doesn't fit
    fn text(&self, column: usize, row: usize, cell_length: usize) -> String {
        let Some(i) = self.cells[column][row] else {
            return String::new();
        };
        let block = &self.blocks[i];

        if !self.continues(column, row) {
            block.label.clone()
        } else if !self.continues(column, row - 1) {
            let end = format!("~{}", block.end.format("%H:%M"));
            let range = format!("{}{end}", block.start.format("%H:%M"));
            if display_width(&range) <= cell_length {
                range
            } else if display_width(&end) <= cell_length {
                end
            } else {
                String::new()
            }
        } else {
            String::new()
        }
    }
}

/// Draw the timetable
pub fn render(timetable: &Timetable, cell_length: usize) -> String {
    let sep = TabChar::Bv.val();
    let mut widths = vec![HOURS_LENGTH];
    widths.extend(std::iter::repeat(cell_length).take(timetable.days.len()));

    // Top of the tab
    let mut out = utils::line_table(&widths, &[], Position::Top);

    // First empty case then the days of the week
    out.push(sep);
    out.push_str(&center("", HOURS_LENGTH));
    out.push(sep);
    for day in &timetable.days {
        out.push_str(&center(&symbol_of(*day).to_string(), cell_length));
        out.push(sep);
    }
    out.push('\n');

    for row in 0..timetable.rows {
        // Separator, left open where a block goes on
        let mut rules = vec![true];
        rules.extend((0..timetable.days.len()).map(|c| !timetable.continues(c, row)));
        out.push_str(&utils::line_table(&widths, &rules, Position::Middle));

        out.push(sep);
        out.push_str(&center(
            &timetable.slot_start(row).format("%H:%M").to_string(),
            HOURS_LENGTH,
        ));
        out.push(sep);
        for column in 0..timetable.days.len() {
            out.push_str(&center(&timetable.text(column, row, cell_length), cell_length));
            out.push(sep);
        }
        out.push('\n');
    }

    // Bottom of the table
    out.push_str(&utils::line_table(&widths, &[], Position::Bottom));

    out
}
