use chrono::{Days, NaiveDate};

use crate::model::ScheduledItem;

/// Dated items from `today` through `today + horizon_days`, earliest first,
/// at most `limit` of them. Items on the same day keep their input order.
pub fn upcoming(
    items: &[ScheduledItem],
    today: NaiveDate,
    horizon_days: u64,
    limit: usize,
) -> Vec<&ScheduledItem> {
    let until = today
        .checked_add_days(Days::new(horizon_days))
        .unwrap_or(NaiveDate::MAX);

    let mut found: Vec<&ScheduledItem> = items
        .iter()
        .filter(|item| matches!(item.date, Some(d) if today <= d && d <= until))
        .collect();
    found.sort_by_key(|item| item.date);
    found.truncate(limit);
    found
}
