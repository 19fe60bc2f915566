use chrono::NaiveDate;
use tracing::warn;

use crate::calendar::compose::{MonthGrid, MultiMonthComposer};
use crate::calendar::error::CalendarError;
use crate::model::{CalendarMonth, MonthsToShow, Phase, ScheduledItem};

/// Which months are on screen. Lives for the UI session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    reference_month: CalendarMonth,
    months_to_show: MonthsToShow,
}

impl NavigationState {
    pub fn new(reference_month: CalendarMonth, months_to_show: MonthsToShow) -> Self {
        Self {
            reference_month,
            months_to_show,
        }
    }

    /// Single-month view of the month containing `today`.
    pub fn starting_at(today: NaiveDate) -> Self {
        Self::new(CalendarMonth::containing(today), MonthsToShow::One)
    }

    pub fn reference_month(&self) -> CalendarMonth {
        self.reference_month
    }

    pub fn months_to_show(&self) -> MonthsToShow {
        self.months_to_show
    }

    pub fn advance(&mut self) {
        self.reference_month = self.reference_month.succ();
    }

    pub fn retreat(&mut self) {
        self.reference_month = self.reference_month.pred();
    }

    pub fn set_view(&mut self, months: MonthsToShow) {
        self.months_to_show = months;
    }

    /// Set the view count from an untyped value, clamping anything outside
    /// 1..=3 to the nearest valid count. Returns what was applied.
    pub fn set_months_to_show(&mut self, n: i64) -> MonthsToShow {
        let applied = MonthsToShow::from_count(n).unwrap_or_else(|| {
            let clamped = MonthsToShow::clamped(n);
            warn!(
                error = %CalendarError::InvalidViewCount(n),
                applied = clamped.count(),
                "clamping view count"
            );
            clamped
        });
        self.months_to_show = applied;
        applied
    }

    pub fn visible_months(&self) -> Vec<CalendarMonth> {
        (0..self.months_to_show.count() as i32)
            .map(|i| self.reference_month.offset(i))
            .collect()
    }

    pub fn last_visible_month(&self) -> CalendarMonth {
        self.reference_month
            .offset(self.months_to_show.count() as i32 - 1)
    }

    /// Whether `date` falls inside one of the visible months (padding days
    /// of the outer grids do not count).
    pub fn shows(&self, date: NaiveDate) -> bool {
        let month = CalendarMonth::containing(date);
        self.reference_month <= month && month <= self.last_visible_month()
    }

    /// Move the reference month the least amount needed to show `date`.
    pub fn reveal(&mut self, date: NaiveDate) {
        let month = CalendarMonth::containing(date);
        if month < self.reference_month {
            self.reference_month = month;
        } else if month > self.last_visible_month() {
            self.reference_month = month.offset(1 - self.months_to_show.count() as i32);
        }
    }

    /// The composed grid model for the current state.
    pub fn grid_model(
        &self,
        composer: &MultiMonthComposer,
        items: &[ScheduledItem],
        phases: &[Phase],
    ) -> Vec<MonthGrid> {
        composer.compose(self.reference_month, self.months_to_show, items, phases)
    }
}
