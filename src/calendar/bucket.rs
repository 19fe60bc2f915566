//! Group dated items under the grid day they belong to.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{CalendarDay, ScheduledItem};

/// Items rendered directly in a cell; the rest collapse into `+N more`.
pub const MAX_VISIBLE_ITEMS: usize = 2;

/// The truncated view of one day's items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleItems<'a> {
    pub shown: &'a [ScheduledItem],
    pub remainder: usize,
}

impl<'a> VisibleItems<'a> {
    pub fn of(items: &'a [ScheduledItem]) -> Self {
        let cut = items.len().min(MAX_VISIBLE_ITEMS);
        Self {
            shown: &items[..cut],
            remainder: items.len() - cut,
        }
    }
}

/// Bucket `items` by calendar date for every day in `days`.
///
/// Every grid day gets an entry, empty or not. Undated items and items dated
/// outside the grid are left out. Within a day the input order is kept.
pub fn bucket(days: &[CalendarDay], items: &[ScheduledItem]) -> BTreeMap<NaiveDate, Vec<ScheduledItem>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<ScheduledItem>> =
        days.iter().map(|d| (d.date, Vec::new())).collect();

    for item in items {
        let Some(date) = item.date else {
            continue;
        };
        if let Some(bucket) = buckets.get_mut(&date) {
            bucket.push(item.clone());
        }
    }

    buckets
}
