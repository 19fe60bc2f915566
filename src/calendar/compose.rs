//! Grid model composition: month layout + item buckets + phase overlay,
//! for one to three consecutive months.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::calendar::bucket::{self, VisibleItems};
use crate::calendar::grid::DateGridBuilder;
use crate::calendar::phase::{self, PhaseResolution};
use crate::model::{CalendarDay, CalendarMonth, MonthsToShow, Phase, ScheduledItem};

// ---------------------------------------------------------------------------
// GridCell / MonthGrid: the render-ready model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub day: CalendarDay,
    /// All items for the day in source order. Use [`GridCell::visible_items`]
    /// for the truncated display list.
    pub items: Vec<ScheduledItem>,
    pub active_phase: Option<Phase>,
    pub is_phase_start: bool,
    pub is_phase_end: bool,
}

impl GridCell {
    pub fn date(&self) -> NaiveDate {
        self.day.date
    }

    pub fn visible_items(&self) -> VisibleItems<'_> {
        VisibleItems::of(&self.items)
    }

    /// The phase name, shown on the start day only.
    pub fn phase_label(&self) -> Option<&str> {
        if self.is_phase_start {
            self.active_phase.as_ref().map(|p| p.name.as_str())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: CalendarMonth,
    pub title: String,
    pub weekday_labels: [&'static str; 7],
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Cells as week rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }

    pub fn row_count(&self) -> usize {
        self.cells.len() / 7
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.day.date == date)
    }
}

// ---------------------------------------------------------------------------
// MultiMonthComposer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct MultiMonthComposer {
    builder: DateGridBuilder,
}

impl MultiMonthComposer {
    pub fn new(builder: DateGridBuilder) -> Self {
        Self { builder }
    }

    pub fn builder(&self) -> &DateGridBuilder {
        &self.builder
    }

    /// Build one month against the full item and phase collections.
    pub fn build_month(
        &self,
        month: CalendarMonth,
        items: &[ScheduledItem],
        phases: &[Phase],
    ) -> MonthGrid {
        let days = self.builder.build(month);
        let mut buckets = bucket::bucket(&days, items);

        let cells = days
            .into_iter()
            .map(|day| {
                let PhaseResolution {
                    active_phase,
                    is_phase_start,
                    is_phase_end,
                } = phase::resolve(day.date, phases);
                GridCell {
                    items: buckets.remove(&day.date).unwrap_or_default(),
                    day,
                    active_phase,
                    is_phase_start,
                    is_phase_end,
                }
            })
            .collect();

        MonthGrid {
            month,
            title: month.title(),
            weekday_labels: self.builder.header_labels(),
            cells,
        }
    }

    /// `months` consecutive grids starting at `reference`. Every grid sees
    /// the same collections, so items and phases near a month boundary show
    /// up in the neighbouring grid's padding days too.
    pub fn compose(
        &self,
        reference: CalendarMonth,
        months: MonthsToShow,
        items: &[ScheduledItem],
        phases: &[Phase],
    ) -> Vec<MonthGrid> {
        for issue in phase::inverted_intervals(phases) {
            warn!(error = %issue, "ignoring phase");
        }

        let grids: Vec<MonthGrid> = (0..months.count() as i32)
            .map(|i| self.build_month(reference.offset(i), items, phases))
            .collect();

        debug!(
            reference = %reference,
            months = months.count(),
            items = items.len(),
            phases = phases.len(),
            "composed grid model"
        );
        grids
    }
}

/// Compose with the default (Sunday-first) layout.
pub fn compose(
    reference: CalendarMonth,
    months: MonthsToShow,
    items: &[ScheduledItem],
    phases: &[Phase],
) -> Vec<MonthGrid> {
    MultiMonthComposer::default().compose(reference, months, items, phases)
}

// ---------------------------------------------------------------------------
// Day detail (selection hook)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    /// e.g. `Saturday, July 12, 2025`
    pub title: String,
    pub items: Vec<ScheduledItem>,
    pub phase: PhaseResolution,
}

/// Everything the day-detail panel needs for `date`, untruncated.
pub fn on_day_click(date: NaiveDate, items: &[ScheduledItem], phases: &[Phase]) -> DayDetail {
    DayDetail {
        date,
        title: date.format("%A, %B %-d, %Y").to_string(),
        items: items.iter().filter(|i| i.is_on(date)).cloned().collect(),
        phase: phase::resolve(date, phases),
    }
}
