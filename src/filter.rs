use chrono::Weekday;
use dialoguer::MultiSelect;

use crate::error::Result;
use crate::schedule::models::symbol_of;
use crate::timetable::Block;

const DISCLAIMER: &str = "(선택은 SPACE, 확인은 ENTER)";

/// Let the user pick the classes then the days to keep
pub fn timetable(blocks: Vec<Block>) -> Result<Vec<Block>> {
    let blocks = classes(blocks)?;
    days(blocks)
}

/// Exclude some classes, only asked when there is more than one
pub fn classes(blocks: Vec<Block>) -> Result<Vec<Block>> {
    let labels = distinct_labels(&blocks);
    if labels.len() < 2 {
        return Ok(blocks);
    }

    let defaults = vec![true; labels.len()];
    let selections = MultiSelect::new()
        .with_prompt(format!("수업을 선택하세요 {DISCLAIMER}"))
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    let kept: Vec<String> = selections.into_iter().map(|i| labels[i].clone()).collect();
    Ok(retain_labels(blocks, &kept))
}

/// Exclude some days
pub fn days(blocks: Vec<Block>) -> Result<Vec<Block>> {
    let days = distinct_days(&blocks);
    if days.len() < 2 {
        return Ok(blocks);
    }

    let items: Vec<String> = days.iter().map(|d| symbol_of(*d).to_string()).collect();
    let defaults = vec![true; days.len()];
    let selections = MultiSelect::new()
        .with_prompt(format!("요일을 선택하세요 {DISCLAIMER}"))
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    let kept: Vec<Weekday> = selections.into_iter().map(|i| days[i]).collect();
    Ok(retain_days(blocks, &kept))
}

/// Labels in order of first appearance
pub fn distinct_labels(blocks: &[Block]) -> Vec<String> {
    let mut labels: Vec<String> = vec![];
    for block in blocks {
        if !labels.contains(&block.label) {
            labels.push(block.label.clone());
        }
    }

    labels
}

/// Days used, from monday
pub fn distinct_days(blocks: &[Block]) -> Vec<Weekday> {
    let mut days: Vec<Weekday> = blocks.iter().map(|b| b.day).collect();
    days.sort_by_key(Weekday::num_days_from_monday);
    days.dedup();

    days
}

pub fn retain_labels(mut blocks: Vec<Block>, labels: &[String]) -> Vec<Block> {
    blocks.retain(|block| labels.contains(&block.label));
    blocks
}

pub fn retain_days(mut blocks: Vec<Block>, days: &[Weekday]) -> Vec<Block> {
    blocks.retain(|block| days.contains(&block.day));
    blocks
}
