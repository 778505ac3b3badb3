use std::thread;

use hagwon_timetable::{
    format_entries, parse_schedule, parse_schedule_multiple, ScheduleEntry, ScheduleSummary,
};

fn days(entries: &[ScheduleEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.day.as_str()).collect()
}

#[test]
fn nothing_in_nothing_out() {
    assert!(parse_schedule_multiple(None).is_empty());
    assert!(parse_schedule_multiple(Some("")).is_empty());
}

#[test]
fn one_clause_per_day_group() {
    let entries = parse_schedule_multiple(Some("월/수/금 18:00~22:00, 토 10:00-13:30"));

    assert_eq!(days(&entries), vec!["월", "수", "금", "토"]);
    assert!(entries[..3]
        .iter()
        .all(|e| (e.start_hour, e.start_minute, e.end_hour, e.end_minute) == (18, 0, 22, 0)));
    assert_eq!(
        (entries[3].start_hour, entries[3].end_hour, entries[3].end_minute),
        (10, 13, 30)
    );
}

#[test]
fn day_runs_split_per_symbol() {
    let entries = parse_schedule_multiple(Some("화목 9:00~10:00"));
    assert_eq!(days(&entries), vec!["화", "목"]);
}

#[test]
fn time_only_clause_is_ignored() {
    assert!(parse_schedule_multiple(Some("18:00~20:00")).is_empty());
    assert_eq!(
        days(&parse_schedule_multiple(Some("18:00~20:00, 일 14:00~16:00"))),
        vec!["일"]
    );
}

#[test]
fn json_field_names() {
    let entries = parse_schedule_multiple(Some("월 18:00~20:00"));
    let json = serde_json::to_value(&entries).unwrap();

    assert_eq!(
        json,
        serde_json::json!([{
            "day": "월",
            "startHour": 18,
            "startMinute": 0,
            "endHour": 20,
            "endMinute": 0
        }])
    );
}

#[test]
fn concurrent_callers_agree() {
    let text = "월/수/금 18:00~22:00, 토 10:00~12:00";
    let expected = parse_schedule_multiple(Some(text));

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(move || parse_schedule_multiple(Some(text))))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn summary_rebuilds_a_clause() {
    let original = "월 19:00~21:00, 수 19:00~21:00, 금 19:00~21:00";
    let summary = parse_schedule(Some(original)).unwrap();

    assert_eq!(
        summary,
        ScheduleSummary {
            days: vec!["월".into(), "수".into(), "금".into()],
            start_hour: 19,
            start_minute: 0,
            end_hour: 21,
            end_minute: 0,
        }
    );
    assert_eq!(
        parse_schedule_multiple(Some(&summary.to_schedule_string())),
        parse_schedule_multiple(Some(original))
    );
    assert_eq!(
        format_entries(&parse_schedule_multiple(Some(original))),
        summary.to_schedule_string()
    );
}

#[test]
fn summary_keeps_only_the_first_range() {
    let summary = parse_schedule(Some("월 18:00~20:00, 토 10:00~12:00")).unwrap();

    assert_eq!(summary.to_schedule_string(), "월/토 18:00~20:00");
}
