//! Interaction → create-request translation.
//!
//! Drops onto a day cell and "save day" submissions become plain request
//! values; handing them to a store is the caller's job. Nothing here does
//! I/O or validation.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::phase;
use crate::model::{ItemId, ItemKind, ItemPayload, Phase, PhaseKind, ScheduledItem, SourceKind};

/// Length of a freshly created phase, counted from its start date.
pub const DEFAULT_PHASE_SPAN_DAYS: u64 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub date: NaiveDate,
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)]
    pub payload: ItemPayload,
}

impl CreateItemRequest {
    /// Record the name of the phase running on the request's date, if any.
    pub fn in_phase_of(mut self, phases: &[Phase]) -> Self {
        self.payload.phase = phase::find_covering(self.date, phases).map(|p| p.name.clone());
        self
    }

    pub fn into_item(self, id: ItemId) -> ScheduledItem {
        ScheduledItem {
            id: Some(id),
            date: Some(self.date),
            kind: self.kind,
            name: self.name,
            payload: self.payload,
        }
    }
}

/// One day's log as submitted from the day-detail panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLog {
    pub routines: Vec<String>,
    pub conditioning: Vec<String>,
    pub notes: String,
}

pub struct ScheduleMutationAdapter;

impl ScheduleMutationAdapter {
    /// An item dragged out of a `source` list and dropped on `target_date`.
    pub fn on_drop(source: SourceKind, target_date: NaiveDate, dragged_name: &str) -> CreateItemRequest {
        CreateItemRequest {
            date: target_date,
            kind: source.item_kind(),
            name: dragged_name.to_string(),
            payload: ItemPayload::default(),
        }
    }

    /// One request per selected routine, then per conditioning session, all
    /// bound to `date` and carrying the day's notes.
    pub fn on_save_log(date: NaiveDate, log: &DailyLog) -> Vec<CreateItemRequest> {
        let notes = Some(log.notes.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let routines = log.routines.iter().map(|n| (ItemKind::Routine, n));
        let conditioning = log.conditioning.iter().map(|n| (ItemKind::Conditioning, n));

        routines
            .chain(conditioning)
            .map(|(kind, name)| CreateItemRequest {
                date,
                kind,
                name: name.clone(),
                payload: ItemPayload {
                    notes: notes.clone(),
                    ..ItemPayload::default()
                },
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// New phase requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPhaseRequest {
    pub name: String,
    pub kind: PhaseKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub color: String,
}

impl NewPhaseRequest {
    /// A phase template starting on `start_date` with the default span and
    /// its kind's color.
    pub fn starting(name: impl Into<String>, kind: PhaseKind, start_date: NaiveDate) -> Self {
        let end_date = start_date
            .checked_add_days(Days::new(DEFAULT_PHASE_SPAN_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self {
            name: name.into(),
            color: kind.default_color().to_string(),
            kind,
            start_date,
            end_date,
        }
    }

    pub fn into_phase(self, id: impl Into<String>) -> Phase {
        Phase {
            id: id.into(),
            name: self.name,
            kind: self.kind,
            start_date: self.start_date,
            end_date: self.end_date,
            color: self.color,
        }
    }
}
