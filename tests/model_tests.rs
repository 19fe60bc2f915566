//! Model unit tests: enums, loose parsing, calendar months.

use chrono::{NaiveDate, Weekday};
use training_calendar::model::*;

// ═══════════════════════════════════════════════════════════════════════════
// Enum cycling
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_months_to_show_cycles() {
    assert_eq!(MonthsToShow::One.next(), MonthsToShow::Two);
    assert_eq!(MonthsToShow::Two.next(), MonthsToShow::Three);
    assert_eq!(MonthsToShow::Three.next(), MonthsToShow::One);
}

#[test]
fn test_source_kind_cycles() {
    assert_eq!(SourceKind::Routine.next(), SourceKind::Conditioning);
    assert_eq!(SourceKind::Conditioning.next(), SourceKind::Skills);
    assert_eq!(SourceKind::Skills.next(), SourceKind::Routine);
}

// ═══════════════════════════════════════════════════════════════════════════
// View count
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_months_to_show_exact_and_clamped() {
    assert_eq!(MonthsToShow::from_count(2), Some(MonthsToShow::Two));
    assert_eq!(MonthsToShow::from_count(0), None);
    assert_eq!(MonthsToShow::from_count(4), None);

    assert_eq!(MonthsToShow::clamped(i64::MIN), MonthsToShow::One);
    assert_eq!(MonthsToShow::clamped(0), MonthsToShow::One);
    assert_eq!(MonthsToShow::clamped(3), MonthsToShow::Three);
    assert_eq!(MonthsToShow::clamped(12), MonthsToShow::Three);
    assert_eq!(MonthsToShow::Three.count(), 3);
    assert_eq!(MonthsToShow::Two.to_string(), "2 Months");
}

// ═══════════════════════════════════════════════════════════════════════════
// Loose parsing
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_item_kind_from_str_loose() {
    assert_eq!(ItemKind::from_str_loose("Routine"), ItemKind::Routine);
    assert_eq!(ItemKind::from_str_loose("conditioning"), ItemKind::Conditioning);
    assert_eq!(ItemKind::from_str_loose(" COND "), ItemKind::Conditioning);
    assert_eq!(ItemKind::from_str_loose("skill"), ItemKind::Skills);
    assert_eq!(ItemKind::from_str_loose("Skills"), ItemKind::Skills);
    assert_eq!(ItemKind::from_str_loose("rest"), ItemKind::Recovery);
    assert_eq!(ItemKind::from_str_loose("mystery"), ItemKind::Routine);
}

#[test]
fn test_phase_kind_from_str_loose() {
    assert_eq!(PhaseKind::from_str_loose("build"), PhaseKind::Build);
    assert_eq!(PhaseKind::from_str_loose("PEAK"), PhaseKind::Peak);
    assert_eq!(PhaseKind::from_str_loose("Taper"), PhaseKind::Taper);
    assert_eq!(PhaseKind::from_str_loose("recovery"), PhaseKind::Recovery);
    assert_eq!(
        PhaseKind::from_str_loose(" Off Season "),
        PhaseKind::Other("Off Season".into())
    );
    assert_eq!(PhaseKind::Other("Off Season".into()).label(), "Off Season");
}

#[test]
fn test_phase_kind_default_colors() {
    assert_eq!(PhaseKind::Build.default_color(), "bg-blue-500");
    assert_eq!(PhaseKind::Peak.default_color(), "bg-purple-500");
    assert_eq!(PhaseKind::Taper.default_color(), "bg-orange-500");
    assert_eq!(PhaseKind::Recovery.default_color(), "bg-green-500");
    assert_eq!(PhaseKind::Other("x".into()).default_color(), "bg-gray-500");
}

#[test]
fn test_source_kind_from_container_id() {
    assert_eq!(SourceKind::from_container_id("routine-list"), SourceKind::Routine);
    assert_eq!(SourceKind::from_container_id("sidebar-Skills"), SourceKind::Skills);
    assert_eq!(
        SourceKind::from_container_id("conditioning"),
        SourceKind::Conditioning
    );
    assert_eq!(SourceKind::from_container_id("unknown"), SourceKind::Routine);
    assert_eq!(SourceKind::Skills.item_kind(), ItemKind::Skills);
}

#[test]
fn test_week_start_columns() {
    assert_eq!(WeekStart::Sunday.column_of(Weekday::Sun), 0);
    assert_eq!(WeekStart::Sunday.column_of(Weekday::Sat), 6);
    assert_eq!(WeekStart::Monday.column_of(Weekday::Mon), 0);
    assert_eq!(WeekStart::Monday.column_of(Weekday::Sun), 6);
    assert_eq!(WeekStart::from_str_loose("Mon"), WeekStart::Monday);
    assert_eq!(WeekStart::from_str_loose("whatever"), WeekStart::Sunday);
    assert_eq!(WeekStart::default(), WeekStart::Sunday);
}

#[test]
fn test_enum_serde_uses_labels() {
    let json = serde_json::to_string(&ItemKind::Conditioning).unwrap();
    assert_eq!(json, "\"Conditioning\"");
    let kind: ItemKind = serde_json::from_str("\"skills\"").unwrap();
    assert_eq!(kind, ItemKind::Skills);
    let kind: PhaseKind = serde_json::from_str("\"Deload\"").unwrap();
    assert_eq!(kind, PhaseKind::Other("Deload".into()));
}

// ═══════════════════════════════════════════════════════════════════════════
// Calendar months and schedule values
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_calendar_month_basics() {
    let m = CalendarMonth::parse("2025-07").unwrap();
    assert_eq!(m.title(), "July 2025");
    assert_eq!(m.to_string(), "2025-07");
    assert_eq!(m.days_in_month(), 31);
    assert_eq!(m.last_day(), NaiveDate::from_ymd_opt(2025, 7, 31).unwrap());
    assert_eq!(m.offset(6).to_string(), "2026-01");
    assert_eq!(m.offset(-7).to_string(), "2024-12");
    assert!(CalendarMonth::parse("July").is_err());
    assert!(CalendarMonth::parse("2025-13").is_err());
}

#[test]
fn test_phase_covers_inclusive() {
    let start = NaiveDate::from_ymd_opt(2025, 8, 11).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap();
    let phase = Phase::new("p", "Recovery", PhaseKind::Recovery, start, end);

    assert!(phase.covers(start));
    assert!(phase.covers(end));
    assert!(!phase.covers(end.succ_opt().unwrap()));
    assert_eq!(phase.span_days(), 9);
    assert_eq!(phase.color, "bg-green-500");
}

#[test]
fn test_item_id_generate_is_unique() {
    let a = ItemId::generate();
    let b = ItemId::generate();
    assert_ne!(a, b);
    assert_eq!(a.as_str().len(), 36);
}
