use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{ItemKind, PhaseKind};

// ---------------------------------------------------------------------------
// ItemId: newtype for type safety
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Fresh random id for a newly stored record.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// ScheduledItem: a routine, conditioning session, etc. placed on a day
// ---------------------------------------------------------------------------

/// Extra fields carried along with an item. The calendar never looks inside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPayload {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exercises: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Name of the phase the item was planned in, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledItem {
    pub id: Option<ItemId>,
    /// `None` for undated items; those never appear on the grid.
    pub date: Option<NaiveDate>,
    pub kind: ItemKind,
    pub name: String,
    pub payload: ItemPayload,
}

impl ScheduledItem {
    pub fn new(kind: ItemKind, name: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            id: None,
            date,
            kind,
            name: name.into(),
            payload: ItemPayload::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == Some(date)
    }
}

// ---------------------------------------------------------------------------
// Phase: a named, date-ranged training block
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phase {
    pub id: String,
    pub name: String,
    pub kind: PhaseKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub color: String,
}

impl Phase {
    /// A phase colored with its kind's default token.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: PhaseKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let color = kind.default_color().to_string();
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            start_date,
            end_date,
            color,
        }
    }

    /// `end_date` earlier than `start_date`. Such a phase covers no day.
    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }

    /// Inclusive on both ends.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Days from start to end (0 for a single-day or inverted phase).
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0)
    }
}
