//! Calendar-date value types.
//!
//! Everything here is a plain (year, month, day) value. Nothing is ever
//! converted through an instant or a timezone, so a record dated
//! `2025-07-12` lands on July 12 wherever the program runs.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::error::CalendarError;

/// Parse a `YYYY-MM-DD` calendar date.
///
/// A trailing time component (`2025-07-12T18:30:00Z`, `2025-07-12 06:00`)
/// is cut off and ignored rather than interpreted.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = s.trim();
    let date_part = match trimmed.find(|c: char| c == 'T' || c == ' ') {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| CalendarError::MalformedDate {
        value: s.to_string(),
    })
}

/// Format a date the way it crosses the data boundary.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// CalendarMonth
// ---------------------------------------------------------------------------

/// A calendar month, stored as its first day.
///
/// Only months whose padded grid (up to six days either side) stays inside
/// chrono's date range can be built, so the first and last month of that
/// range are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth(NaiveDate);

/// Whether a full week of padding fits on both sides of the month.
fn grid_fits(first: NaiveDate) -> bool {
    let before = first.checked_sub_days(Days::new(6));
    let after = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_add_days(Days::new(5)));
    before.is_some() && after.is_some()
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .filter(|first| grid_fits(*first))
            .map(Self)
    }

    /// The month holding `date`, moved one month inward when `date` sits in
    /// the first or last month chrono can represent.
    pub fn containing(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        if grid_fits(first) {
            return Self(first);
        }
        let inward = if first.year() > 0 {
            first.checked_sub_months(Months::new(1))
        } else {
            first.checked_add_months(Months::new(1))
        };
        Self(inward.unwrap_or(first))
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self, CalendarError> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .ok()
            .filter(|first| grid_fits(*first))
            .map(Self)
            .ok_or_else(|| CalendarError::MalformedDate {
                value: s.to_string(),
            })
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    pub fn last_day(self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Shift by `n` whole months. Stays put when the shifted month would
    /// leave the supported range.
    pub fn offset(self, n: i32) -> Self {
        let shifted = if n >= 0 {
            self.0.checked_add_months(Months::new(n.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(n.unsigned_abs()))
        };
        shifted
            .filter(|first| grid_fits(*first))
            .map(Self)
            .unwrap_or(self)
    }

    pub fn succ(self) -> Self {
        self.offset(1)
    }

    pub fn pred(self) -> Self {
        self.offset(-1)
    }

    /// Heading text, e.g. `July 2025`.
    pub fn title(self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for CalendarMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CalendarMonth::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// CalendarDay
// ---------------------------------------------------------------------------

/// One day slot in a month grid. Identity is the date alone.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_current_month: bool,
}

impl CalendarDay {
    pub fn new(date: NaiveDate, in_current_month: bool) -> Self {
        Self {
            date,
            in_current_month,
        }
    }
}

impl PartialEq for CalendarDay {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl Eq for CalendarDay {}

impl Hash for CalendarDay {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
    }
}
