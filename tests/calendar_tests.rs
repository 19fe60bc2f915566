//! Engine tests: grid layout, bucketing, phase overlay, composition,
//! navigation and the mutation adapter.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Weekday};
use pretty_assertions::assert_eq;

use training_calendar::calendar::*;
use training_calendar::model::*;
use training_calendar::store::{load_schedule, Schedule};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn fixtures() -> Schedule {
    load_schedule(&fixtures_dir()).expect("fixtures should load")
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn month(y: i32, m: u32) -> CalendarMonth {
    CalendarMonth::new(y, m).unwrap()
}

fn item(kind: ItemKind, name: &str, date: Option<NaiveDate>) -> ScheduledItem {
    ScheduledItem::new(kind, name, date).with_id(name)
}

fn block(id: &str, start: NaiveDate, end: NaiveDate) -> Phase {
    Phase::new(id, id, PhaseKind::Build, start, end)
}

// ═══════════════════════════════════════════════════════════════════════════
// Date grid
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_july_2025_sunday_layout() {
    let days = DateGridBuilder::default().build(month(2025, 7));

    assert_eq!(days.len(), 35);
    assert_eq!(days[0].date, d(2025, 6, 29));
    assert_eq!(days[2].date, d(2025, 7, 1));
    assert_eq!(days[34].date, d(2025, 8, 2));
    assert!(!days[0].in_current_month);
    assert!(!days[1].in_current_month);
    assert!(days[2].in_current_month);
    assert!(!days[33].in_current_month);
    assert_eq!(days.iter().filter(|d| d.in_current_month).count(), 31);
}

#[test]
fn test_july_2025_monday_layout() {
    let builder = DateGridBuilder::new(WeekStart::Monday);
    let days = builder.build(month(2025, 7));

    assert_eq!(days.len(), 35);
    assert_eq!(days[0].date, d(2025, 6, 30));
    assert_eq!(days[0].date.weekday(), Weekday::Mon);
    assert_eq!(days[34].date, d(2025, 8, 3));
    assert_eq!(builder.header_labels()[0], "Mon");
}

#[test]
fn test_month_without_padding() {
    // February 2026 starts on a Sunday and ends on a Saturday.
    let days = DateGridBuilder::default().build(month(2026, 2));
    assert_eq!(days.len(), 28);
    assert!(days.iter().all(|d| d.in_current_month));
}

#[test]
fn test_six_row_month() {
    let days = DateGridBuilder::default().build(month(2025, 8));
    assert_eq!(days.len(), 42);
    assert_eq!(days[0].date, d(2025, 7, 27));
    assert_eq!(days[41].date, d(2025, 9, 6));
}

#[test]
fn test_grid_shape_holds_for_every_month() {
    for builder in [DateGridBuilder::new(WeekStart::Sunday), DateGridBuilder::new(WeekStart::Monday)] {
        let mut m = month(2023, 1);
        for _ in 0..48 {
            let days = builder.build(m);
            assert_eq!(days.len() % 7, 0, "{m}");
            assert_eq!(
                days.iter().filter(|d| d.in_current_month).count() as u32,
                m.days_in_month(),
                "{m}"
            );
            assert_eq!(days[0].date.weekday(), builder.week_start().weekday(), "{m}");
            for pair in days.windows(2) {
                assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
            }
            m = m.succ();
        }
    }
}

#[test]
fn test_leap_february() {
    let days = DateGridBuilder::default().build(month(2024, 2));
    assert_eq!(days.iter().filter(|d| d.in_current_month).count(), 29);
}

#[test]
fn test_grid_shape_at_ends_of_date_range() {
    assert!(CalendarMonth::parse("262142-12").is_err());

    for edge in [NaiveDate::MIN, NaiveDate::MAX] {
        let m = CalendarMonth::containing(edge);
        for week_start in [WeekStart::Sunday, WeekStart::Monday] {
            let days = DateGridBuilder::new(week_start).build(m);
            assert_eq!(days.len() % 7, 0, "{m} {week_start:?}");
            assert_eq!(
                days.iter().filter(|d| d.in_current_month).count() as u32,
                m.days_in_month()
            );
            assert!(days.windows(2).all(|w| w[0].date.succ_opt() == Some(w[1].date)));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Bucketing
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_bucket_keeps_source_order() {
    let day = d(2025, 7, 25);
    let items = vec![
        item(ItemKind::Routine, "first", Some(day)),
        item(ItemKind::Skills, "elsewhere", Some(d(2025, 7, 26))),
        item(ItemKind::Conditioning, "second", Some(day)),
        item(ItemKind::Skills, "third", Some(day)),
    ];
    let days = DateGridBuilder::default().build(month(2025, 7));
    let buckets = bucket(&days, &items);

    let names: Vec<&str> = buckets[&day].iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(buckets.len(), days.len());
}

#[test]
fn test_bucket_skips_undated_and_off_grid_items() {
    let items = vec![
        item(ItemKind::Routine, "undated", None),
        item(ItemKind::Routine, "december", Some(d(2025, 12, 1))),
        item(ItemKind::Routine, "padding", Some(d(2025, 6, 30))),
    ];
    let days = DateGridBuilder::default().build(month(2025, 7));
    let buckets = bucket(&days, &items);

    let placed: usize = buckets.values().map(Vec::len).sum();
    assert_eq!(placed, 1);
    assert_eq!(buckets[&d(2025, 6, 30)][0].name, "padding");
}

#[test]
fn test_visible_items_truncate_with_remainder() {
    let day = Some(d(2025, 7, 3));
    let items: Vec<ScheduledItem> = (0..5)
        .map(|i| item(ItemKind::Routine, &format!("r{i}"), day))
        .collect();

    let visible = VisibleItems::of(&items);
    assert_eq!(visible.shown.len(), MAX_VISIBLE_ITEMS);
    assert_eq!(visible.shown[0].name, "r0");
    assert_eq!(visible.remainder, 3);

    let visible = VisibleItems::of(&items[..2]);
    assert_eq!(visible.shown.len(), 2);
    assert_eq!(visible.remainder, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Phase resolution
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_resolve_flags_start_and_end() {
    let phases = vec![block("a", d(2025, 7, 10), d(2025, 7, 12))];

    let start = resolve(d(2025, 7, 10), &phases);
    assert!(start.is_phase_start && !start.is_phase_end);

    let middle = resolve(d(2025, 7, 11), &phases);
    assert_eq!(middle.active_phase.as_ref().map(|p| p.id.as_str()), Some("a"));
    assert!(!middle.is_phase_start && !middle.is_phase_end);

    let end = resolve(d(2025, 7, 12), &phases);
    assert!(!end.is_phase_start && end.is_phase_end);

    assert_eq!(resolve(d(2025, 7, 13), &phases), PhaseResolution::default());
}

#[test]
fn test_single_day_phase_is_start_and_end() {
    let phases = vec![block("one", d(2025, 7, 4), d(2025, 7, 4))];
    let r = resolve(d(2025, 7, 4), &phases);
    assert!(r.is_phase_start);
    assert!(r.is_phase_end);
    assert_eq!(phases[0].span_days(), 0);
}

#[test]
fn test_overlapping_phases_first_listed_wins() {
    let phases = vec![
        block("outer", d(2025, 7, 1), d(2025, 7, 31)),
        block("inner", d(2025, 7, 10), d(2025, 7, 15)),
    ];
    let r = resolve(d(2025, 7, 10), &phases);
    assert_eq!(r.active_phase.unwrap().id, "outer");
    // Flags belong to the winning phase, not the hidden one.
    assert!(!r.is_phase_start);

    let swapped: Vec<Phase> = phases.into_iter().rev().collect();
    let r = resolve(d(2025, 7, 10), &swapped);
    assert_eq!(r.active_phase.unwrap().id, "inner");
    assert!(r.is_phase_start);
}

#[test]
fn test_inverted_phase_covers_nothing() {
    let phases = vec![block("backwards", d(2025, 9, 10), d(2025, 9, 1))];
    assert!(phases[0].is_inverted());
    assert_eq!(phases[0].span_days(), 0);
    for day in d(2025, 8, 25).iter_days().take(25) {
        assert_eq!(resolve(day, &phases).active_phase, None);
    }

    let issues = phase::inverted_intervals(&phases);
    assert_eq!(
        issues,
        vec![CalendarError::InvertedPhaseInterval {
            phase_id: "backwards".into(),
            start: d(2025, 9, 10),
            end: d(2025, 9, 1),
        }]
    );
}

#[test]
fn test_timeline_orders_by_start_stably() {
    let phases = vec![
        block("late", d(2025, 9, 1), d(2025, 9, 30)),
        block("early-a", d(2025, 7, 1), d(2025, 7, 5)),
        block("early-b", d(2025, 7, 1), d(2025, 7, 9)),
    ];
    let ids: Vec<&str> = timeline(&phases).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["early-a", "early-b", "late"]);
}

#[test]
fn test_current_phase_from_fixtures() {
    let schedule = fixtures();
    let peak = current_phase(d(2025, 7, 21), &schedule.phases).unwrap();
    assert_eq!(peak.name, "Peak");
    assert_eq!(current_phase(d(2025, 9, 5), &schedule.phases), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// Grid composition against the fixture schedule
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_busy_day_in_peak_phase() {
    let schedule = fixtures();
    let grids = compose(month(2025, 7), MonthsToShow::One, &schedule.items, &schedule.phases);
    assert_eq!(grids.len(), 1);

    let grid = &grids[0];
    assert_eq!(grid.title, "July 2025");
    assert_eq!(grid.weekday_labels[0], "Sun");
    assert_eq!(grid.row_count(), 5);

    let cell = grid.cell(d(2025, 7, 25)).unwrap();
    assert_eq!(cell.items.len(), 3);
    let visible = cell.visible_items();
    let shown: Vec<&str> = visible.shown.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(shown, vec!["Competition Prep", "Upper Body"]);
    assert_eq!(visible.remainder, 1);
    assert_eq!(cell.active_phase.as_ref().unwrap().name, "Peak");
    assert_eq!(cell.phase_label(), None);
}

#[test]
fn test_peak_scenario_with_explicit_inputs() {
    let phases = vec![Phase::new("peak", "Peak", PhaseKind::Peak, d(2025, 7, 21), d(2025, 7, 31))];
    let items = vec![item(ItemKind::Routine, "Competition Prep", Some(d(2025, 7, 25)))];
    let grid = &compose(month(2025, 7), MonthsToShow::One, &items, &phases)[0];
    assert_eq!(grid.cells.len(), 35);

    let cell = grid.cell(d(2025, 7, 25)).unwrap();
    assert_eq!(cell.active_phase.as_ref().unwrap().name, "Peak");
    assert!(!cell.is_phase_start);
    assert!(!cell.is_phase_end);
    assert_eq!(cell.items[0].name, "Competition Prep");

    assert!(grid.cell(d(2025, 7, 21)).unwrap().is_phase_start);
    assert!(grid.cell(d(2025, 7, 31)).unwrap().is_phase_end);
    assert_eq!(grid.cell(d(2025, 8, 1)).unwrap().active_phase, None);

    // Exactly one start and one end across the grid.
    assert_eq!(grid.cells.iter().filter(|c| c.is_phase_start).count(), 1);
    assert_eq!(grid.cells.iter().filter(|c| c.is_phase_end).count(), 1);
}

#[test]
fn test_empty_collections_render_plain_grid() {
    let grids = compose(month(2025, 7), MonthsToShow::Two, &[], &[]);
    assert!(grids
        .iter()
        .flat_map(|g| g.cells.iter())
        .all(|c| c.items.is_empty() && c.active_phase.is_none()));
}

#[test]
fn test_phase_boundaries_in_fixture_month() {
    let schedule = fixtures();
    let grid = &compose(month(2025, 7), MonthsToShow::One, &schedule.items, &schedule.phases)[0];

    let build_end = grid.cell(d(2025, 7, 20)).unwrap();
    assert_eq!(build_end.active_phase.as_ref().unwrap().name, "Build Phase");
    assert!(build_end.is_phase_end);

    let peak_start = grid.cell(d(2025, 7, 21)).unwrap();
    assert!(peak_start.is_phase_start);
    assert_eq!(peak_start.phase_label(), Some("Peak"));

    // Padding days before July 1 are outside every phase.
    let padding = grid.cell(d(2025, 6, 30)).unwrap();
    assert!(!padding.day.in_current_month);
    assert_eq!(padding.active_phase, None);
}

#[test]
fn test_undated_and_malformed_items_never_render() {
    let schedule = fixtures();
    let grids = compose(month(2025, 7), MonthsToShow::Three, &schedule.items, &schedule.phases);
    let rendered: Vec<&str> = grids
        .iter()
        .flat_map(|g| g.cells.iter())
        .flat_map(|c| c.items.iter())
        .map(|i| i.name.as_str())
        .collect();
    assert!(!rendered.contains(&"Warm-up Routine"));
    assert!(!rendered.contains(&"Flexibility"));
}

#[test]
fn test_compose_months_and_boundary_visibility() {
    let schedule = fixtures();
    for (count, expected) in [(MonthsToShow::One, 1), (MonthsToShow::Two, 2), (MonthsToShow::Three, 3)] {
        let grids = compose(month(2025, 7), count, &schedule.items, &schedule.phases);
        assert_eq!(grids.len(), expected);
        for (i, grid) in grids.iter().enumerate() {
            assert_eq!(grid.month, month(2025, 7).offset(i as i32));
        }
    }

    // Aug 2 shows in July's trailing padding and in August proper.
    let grids = compose(month(2025, 7), MonthsToShow::Two, &schedule.items, &schedule.phases);
    let in_july = grids[0].cell(d(2025, 8, 2)).unwrap();
    let in_august = grids[1].cell(d(2025, 8, 2)).unwrap();
    assert!(!in_july.day.in_current_month);
    assert!(in_august.day.in_current_month);
    assert_eq!(in_july.items, in_august.items);
    assert_eq!(in_july.items[0].name, "Cardio");
}

#[test]
fn test_compose_is_idempotent() {
    let schedule = fixtures();
    let a = compose(month(2025, 7), MonthsToShow::Two, &schedule.items, &schedule.phases);
    let b = compose(month(2025, 7), MonthsToShow::Two, &schedule.items, &schedule.phases);
    assert_eq!(a, b);
}

#[test]
fn test_compose_year_rollover() {
    let grids = compose(month(2025, 11), MonthsToShow::Three, &[], &[]);
    let titles: Vec<&str> = grids.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["November 2025", "December 2025", "January 2026"]);
}

#[test]
fn test_day_detail_is_untruncated() {
    let schedule = fixtures();
    let detail = on_day_click(d(2025, 7, 25), &schedule.items, &schedule.phases);
    assert_eq!(detail.title, "Friday, July 25, 2025");
    assert_eq!(detail.items.len(), 3);
    assert_eq!(detail.phase.active_phase.unwrap().name, "Peak");
}

// ═══════════════════════════════════════════════════════════════════════════
// Navigation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_navigation_advance_and_retreat() {
    let mut nav = NavigationState::new(month(2025, 12), MonthsToShow::One);
    nav.advance();
    assert_eq!(nav.reference_month(), month(2026, 1));
    nav.retreat();
    nav.retreat();
    assert_eq!(nav.reference_month(), month(2025, 11));
}

#[test]
fn test_navigation_clamps_view_count() {
    let mut nav = NavigationState::starting_at(d(2025, 7, 12));
    assert_eq!(nav.months_to_show(), MonthsToShow::One);
    assert_eq!(nav.set_months_to_show(4), MonthsToShow::Three);
    assert_eq!(nav.set_months_to_show(0), MonthsToShow::One);
    assert_eq!(nav.set_months_to_show(-7), MonthsToShow::One);
    assert_eq!(nav.set_months_to_show(2), MonthsToShow::Two);
    assert_eq!(nav.visible_months(), vec![month(2025, 7), month(2025, 8)]);
}

#[test]
fn test_navigation_reveal_scrolls_minimally() {
    let mut nav = NavigationState::new(month(2025, 7), MonthsToShow::Two);

    nav.reveal(d(2025, 8, 15));
    assert_eq!(nav.reference_month(), month(2025, 7));

    nav.reveal(d(2025, 9, 1));
    assert_eq!(nav.reference_month(), month(2025, 8));
    assert!(nav.shows(d(2025, 9, 1)));

    nav.reveal(d(2025, 5, 31));
    assert_eq!(nav.reference_month(), month(2025, 5));
    assert_eq!(nav.last_visible_month(), month(2025, 6));
}

#[test]
fn test_navigation_grid_model_matches_compose() {
    let schedule = fixtures();
    let nav = NavigationState::new(month(2025, 7), MonthsToShow::Two);
    let composer = MultiMonthComposer::default();
    assert_eq!(
        nav.grid_model(&composer, &schedule.items, &schedule.phases),
        compose(month(2025, 7), MonthsToShow::Two, &schedule.items, &schedule.phases)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Mutation adapter
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_on_drop_builds_request() {
    let req = ScheduleMutationAdapter::on_drop(SourceKind::Conditioning, d(2025, 7, 22), "Beach Abs");
    assert_eq!(req.date, d(2025, 7, 22));
    assert_eq!(req.kind, ItemKind::Conditioning);
    assert_eq!(req.name, "Beach Abs");
    assert_eq!(req.payload, ItemPayload::default());
}

#[test]
fn test_on_drop_records_phase_context() {
    let schedule = fixtures();
    let req = ScheduleMutationAdapter::on_drop(SourceKind::Skills, d(2025, 7, 22), "Layout")
        .in_phase_of(&schedule.phases);
    assert_eq!(req.payload.phase.as_deref(), Some("Peak"));

    let req = ScheduleMutationAdapter::on_drop(SourceKind::Skills, d(2025, 12, 1), "Layout")
        .in_phase_of(&schedule.phases);
    assert_eq!(req.payload.phase, None);
}

#[test]
fn test_on_save_log_one_request_per_selection() {
    let log = DailyLog {
        routines: vec!["Competition Routine".into()],
        conditioning: vec!["Beach Abs".into(), "Cardio".into()],
        notes: "  felt strong  ".into(),
    };
    let reqs = ScheduleMutationAdapter::on_save_log(d(2025, 7, 12), &log);

    let summary: Vec<(ItemKind, &str)> = reqs.iter().map(|r| (r.kind, r.name.as_str())).collect();
    assert_eq!(
        summary,
        vec![
            (ItemKind::Routine, "Competition Routine"),
            (ItemKind::Conditioning, "Beach Abs"),
            (ItemKind::Conditioning, "Cardio"),
        ]
    );
    assert!(reqs.iter().all(|r| r.date == d(2025, 7, 12)));
    assert!(reqs.iter().all(|r| r.payload.notes.as_deref() == Some("felt strong")));
}

#[test]
fn test_on_save_log_empty_and_blank_notes() {
    assert!(ScheduleMutationAdapter::on_save_log(d(2025, 7, 12), &DailyLog::default()).is_empty());

    let log = DailyLog {
        routines: vec!["Practice Routine".into()],
        conditioning: vec![],
        notes: "   ".into(),
    };
    let reqs = ScheduleMutationAdapter::on_save_log(d(2025, 7, 12), &log);
    assert_eq!(reqs[0].payload.notes, None);
}

#[test]
fn test_new_phase_request_default_span() {
    let req = NewPhaseRequest::starting("Taper Block", PhaseKind::Taper, d(2025, 9, 1));
    assert_eq!(req.end_date, d(2025, 9, 15));
    assert_eq!(req.color, "bg-orange-500");

    let phase = req.into_phase("p-9");
    assert_eq!(phase.span_days(), mutation::DEFAULT_PHASE_SPAN_DAYS as i64);
    assert!(phase.covers(d(2025, 9, 15)));
}

// ═══════════════════════════════════════════════════════════════════════════
// Upcoming
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_upcoming_window_and_limit() {
    let schedule = fixtures();
    let found = upcoming(&schedule.items, d(2025, 7, 20), 7, 10);
    let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Recovery Session", "Competition Prep", "Upper Body", "Layout"]
    );

    let found = upcoming(&schedule.items, d(2025, 7, 20), 7, 2);
    assert_eq!(found.len(), 2);

    assert!(upcoming(&schedule.items, d(2025, 10, 1), 30, 10).is_empty());
}
