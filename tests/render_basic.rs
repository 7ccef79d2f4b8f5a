#![forbid(unsafe_code)]
use astreinte_render::{
    model::{Override, PersonId, RotationDefinition, ScheduleEntry, Window},
    render_schedule, Scheduler,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn jan(d: u32) -> DateTime<Utc> {
    day(2024, 1, d)
}

fn weekly_abc() -> RotationDefinition {
    RotationDefinition::with_days(
        jan(1),
        7,
        vec![PersonId::new("A"), PersonId::new("B"), PersonId::new("C")],
    )
    .unwrap()
}

fn ov(who: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Override {
    Override::new(PersonId::new(who), start, end).unwrap()
}

fn entry(who: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleEntry {
    ScheduleEntry {
        participant: PersonId::new(who),
        start,
        end,
    }
}

fn render(overrides: Vec<Override>, from: DateTime<Utc>, until: DateTime<Utc>) -> Vec<ScheduleEntry> {
    let mut s = Scheduler::new(weekly_abc());
    s.add_overrides(overrides);
    s.render(Window::new(from, until))
}

fn assert_contiguous(entries: &[ScheduleEntry], from: DateTime<Utc>, until: DateTime<Utc>) {
    assert_eq!(entries.first().map(|e| e.start), Some(from));
    assert_eq!(entries.last().map(|e| e.end), Some(until));
    for e in entries {
        assert!(e.start < e.end, "empty entry {e:?}");
    }
    for pair in entries.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn rotation_only_mid_interval_window() {
    let got = render(vec![], jan(10), jan(20));
    assert_eq!(
        got,
        vec![entry("B", jan(10), jan(15)), entry("C", jan(15), jan(20))]
    );
}

#[test]
fn override_inside_interval_splits_rotation() {
    let got = render(vec![ov("X", jan(12), jan(16))], jan(10), jan(20));
    assert_eq!(
        got,
        vec![
            entry("B", jan(10), jan(12)),
            entry("X", jan(12), jan(16)),
            entry("C", jan(16), jan(20)),
        ]
    );
}

#[test]
fn override_spanning_several_intervals_skips_participants() {
    let got = render(vec![ov("Y", jan(5), jan(20))], jan(1), day(2024, 2, 5));
    assert_eq!(
        got,
        vec![
            entry("A", jan(1), jan(5)),
            entry("Y", jan(5), jan(20)),
            entry("C", jan(20), jan(22)),
            entry("A", jan(22), jan(29)),
            entry("B", jan(29), day(2024, 2, 5)),
        ]
    );
}

#[test]
fn override_on_handover_boundary_has_no_empty_fragment() {
    let got = render(vec![ov("Z", jan(8), jan(10))], jan(1), jan(15));
    assert_eq!(
        got,
        vec![
            entry("A", jan(1), jan(8)),
            entry("Z", jan(8), jan(10)),
            entry("B", jan(10), jan(15)),
        ]
    );
}

#[test]
fn override_starting_before_window_is_clipped() {
    let got = render(vec![ov("X", jan(5), jan(12))], jan(10), jan(20));
    assert_eq!(
        got,
        vec![
            entry("X", jan(10), jan(12)),
            entry("B", jan(12), jan(15)),
            entry("C", jan(15), jan(20)),
        ]
    );
}

#[test]
fn override_crossing_window_end_is_truncated() {
    let got = render(vec![ov("X", jan(12), jan(16))], jan(10), jan(14));
    assert_eq!(
        got,
        vec![entry("B", jan(10), jan(12)), entry("X", jan(12), jan(14))]
    );
}

#[test]
fn overrides_outside_window_are_ignored() {
    let overrides = vec![ov("early", jan(2), jan(4)), ov("late", jan(25), jan(26))];
    let got = render(overrides, jan(10), jan(20));
    assert_eq!(
        got,
        vec![entry("B", jan(10), jan(15)), entry("C", jan(15), jan(20))]
    );
}

#[test]
fn override_starting_at_window_end_is_dropped() {
    let got = render(vec![ov("X", jan(20), jan(22))], jan(10), jan(20));
    assert_eq!(
        got,
        vec![entry("B", jan(10), jan(15)), entry("C", jan(15), jan(20))]
    );
}

#[test]
fn unsorted_overrides_are_merged_in_order() {
    let overrides = vec![ov("Y", jan(17), jan(18)), ov("X", jan(11), jan(12))];
    let got = render(overrides, jan(10), jan(20));
    assert_eq!(
        got,
        vec![
            entry("B", jan(10), jan(11)),
            entry("X", jan(11), jan(12)),
            entry("B", jan(12), jan(15)),
            entry("C", jan(15), jan(17)),
            entry("Y", jan(17), jan(18)),
            entry("C", jan(18), jan(20)),
        ]
    );
}

#[test]
fn adjacent_overrides_stay_separate() {
    let overrides = vec![ov("X", jan(11), jan(12)), ov("Y", jan(12), jan(13))];
    let got = render(overrides, jan(10), jan(14));
    assert_eq!(
        got,
        vec![
            entry("B", jan(10), jan(11)),
            entry("X", jan(11), jan(12)),
            entry("Y", jan(12), jan(13)),
            entry("B", jan(13), jan(14)),
        ]
    );
}

#[test]
fn window_before_handover_starts_at_handover() {
    let got = render(vec![], day(2023, 12, 25), jan(10));
    assert_eq!(
        got,
        vec![entry("A", jan(1), jan(8)), entry("B", jan(8), jan(10))]
    );
}

#[test]
fn override_before_handover_is_clipped_to_handover() {
    let got = render(
        vec![ov("X", day(2023, 12, 30), jan(3))],
        day(2023, 12, 25),
        jan(10),
    );
    assert_eq!(
        got,
        vec![
            entry("X", jan(1), jan(3)),
            entry("A", jan(3), jan(8)),
            entry("B", jan(8), jan(10)),
        ]
    );
}

#[test]
fn empty_or_inverted_window_yields_nothing() {
    assert!(render(vec![], jan(10), jan(10)).is_empty());
    assert!(render(vec![], jan(20), jan(10)).is_empty());
    assert!(render(vec![ov("X", jan(10), jan(12))], jan(10), jan(10)).is_empty());
}

#[test]
fn window_ending_before_handover_yields_nothing() {
    assert!(render(vec![], day(2023, 12, 1), day(2023, 12, 20)).is_empty());
}

#[test]
fn missing_rotation_yields_nothing() {
    let got = render_schedule(None, &[ov("X", jan(1), jan(2))], Window::new(jan(1), jan(5)));
    assert!(got.is_empty());
}

#[test]
fn render_schedule_sorts_its_overrides() {
    let rotation = weekly_abc();
    let overrides = [ov("Y", jan(17), jan(18)), ov("X", jan(11), jan(12))];
    let got = render_schedule(Some(&rotation), &overrides, Window::new(jan(10), jan(20)));
    let participants: Vec<&str> = got.iter().map(|e| e.participant.as_str()).collect();
    assert_eq!(participants, ["B", "X", "B", "C", "Y", "C"]);
}

#[test]
fn pure_rotation_cycles_participants_with_full_segments() {
    let got = render(vec![], jan(3), day(2024, 3, 1));
    assert_contiguous(&got, jan(3), day(2024, 3, 1));
    let names = ["A", "B", "C"];
    for (i, e) in got.iter().enumerate() {
        assert_eq!(e.participant.as_str(), names[i % 3]);
        if i != 0 && i != got.len() - 1 {
            assert_eq!(e.duration(), Duration::days(7));
        }
    }
}

#[test]
fn coverage_holds_across_windows() {
    let overrides = vec![
        ov("X", jan(3), jan(4)),
        ov("Y", jan(8), jan(19)),
        ov("Z", day(2024, 2, 1), day(2024, 2, 2)),
    ];
    let starts = [jan(1), jan(2), jan(3), jan(8), jan(10), jan(19), jan(30)];
    for from in starts {
        for weeks in 1..6 {
            let until = from + Duration::days(5 * weeks);
            let got = render(overrides.clone(), from, until);
            assert_contiguous(&got, from, until);
        }
    }
}

#[test]
fn override_kept_whole_inside_window() {
    let got = render(vec![ov("X", jan(12), jan(13))], jan(10), jan(20));
    let hits: Vec<_> = got.iter().filter(|e| e.participant.as_str() == "X").collect();
    assert_eq!(hits, vec![&entry("X", jan(12), jan(13))]);
}

#[test]
fn rotation_resumes_as_if_override_absent() {
    let plain = Scheduler::new(weekly_abc());
    let got = render(vec![ov("X", jan(6), jan(24))], jan(1), jan(31));
    let pos = got
        .iter()
        .position(|e| e.participant.as_str() == "X")
        .unwrap();
    let after = &got[pos + 1];
    assert_eq!(after.start, jan(24));
    assert_eq!(Some(&after.participant), plain.on_call_at(after.start));
}

#[test]
fn sub_day_interval_rotation() {
    let rotation = RotationDefinition::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        Duration::hours(12),
        vec![PersonId::new("day"), PersonId::new("night")],
    )
    .unwrap();
    let from = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let until = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
    let got = render_schedule(Some(&rotation), &[], Window::new(from, until));
    assert_eq!(
        got,
        vec![
            entry("night", from, Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()),
            entry("day", Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(), until),
        ]
    );
}

#[test]
fn on_call_at_prefers_override() {
    let mut s = Scheduler::new(weekly_abc());
    s.add_overrides(vec![ov("X", jan(12), jan(16))]);
    assert_eq!(s.on_call_at(day(2023, 12, 31)), None);
    assert_eq!(s.on_call_at(jan(1)).map(PersonId::as_str), Some("A"));
    assert_eq!(s.on_call_at(jan(11)).map(PersonId::as_str), Some("B"));
    assert_eq!(s.on_call_at(jan(12)).map(PersonId::as_str), Some("X"));
    assert_eq!(s.on_call_at(jan(16)).map(PersonId::as_str), Some("C"));
    assert_eq!(s.on_call_at(jan(22)).map(PersonId::as_str), Some("A"));
}

#[test]
fn add_overrides_keeps_them_sorted() {
    let mut s = Scheduler::new(weekly_abc());
    s.add_overrides(vec![ov("Y", jan(20), jan(21))]);
    s.add_overrides(vec![ov("X", jan(5), jan(6))]);
    let starts: Vec<_> = s.overrides().iter().map(|o| o.start).collect();
    assert_eq!(starts, vec![jan(5), jan(20)]);
}

#[test]
fn rotation_near_last_instant_renders_without_overflow() {
    let last = DateTime::<Utc>::MAX_UTC;
    let handover = last - Duration::days(10);
    let rotation =
        RotationDefinition::with_days(handover, 7, vec![PersonId::new("A"), PersonId::new("B")])
            .unwrap();
    let got = render_schedule(Some(&rotation), &[], Window::new(handover, last));
    assert_eq!(
        got,
        vec![
            entry("A", handover, handover + Duration::days(7)),
            entry("B", handover + Duration::days(7), last),
        ]
    );
}
