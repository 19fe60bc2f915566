//! Month grid layout: whole weeks covering a month, padded with the
//! trailing days of the previous month and the leading days of the next.

use chrono::{Datelike, Days};

use crate::model::{CalendarDay, CalendarMonth, WeekStart};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateGridBuilder {
    week_start: WeekStart,
}

impl DateGridBuilder {
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Build the day sequence for `month`. The length is always a multiple
    /// of 7 (35 or 42 for most months, 28 for a February that starts on the
    /// first column of a non-leap year).
    pub fn build(&self, month: CalendarMonth) -> Vec<CalendarDay> {
        let first = month.first_day();
        let last = month.last_day();

        let lead = self.week_start.column_of(first.weekday());
        let trail = 6 - self.week_start.column_of(last.weekday());
        let total = (lead + month.days_in_month() + trail) as usize;

        // CalendarMonth only admits months whose padding fits chrono's range.
        let Some(start) = first.checked_sub_days(Days::new(u64::from(lead))) else {
            return Vec::new();
        };

        start
            .iter_days()
            .take(total)
            .map(|date| CalendarDay::new(date, month.contains(date)))
            .collect()
    }

    pub fn header_labels(&self) -> [&'static str; 7] {
        self.week_start.header_labels()
    }
}
