//! On-disk record shapes for `items.json`/`items.yaml` and
//! `phases.json`/`phases.yaml`.
//!
//! Records keep dates as strings; conversion to the domain types is where
//! calendar-date parsing happens. Field names follow the data store's
//! column names (`phase_type`, `start_date`, ...), with a few aliases for
//! hand-written files.
//!
//! Date fields accept any JSON/YAML value. A null or missing date reads as
//! absent, and a number or other non-string keeps its text so it fails date
//! parsing for that one record instead of failing the whole file.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::calendar::error::CalendarError;
use crate::model::{
    format_calendar_date, parse_calendar_date, ItemId, ItemKind, ItemPayload, Phase, PhaseKind,
    ScheduledItem,
};

/// Read a date field leniently: strings pass through, null is `None`, any
/// other value is kept as its JSON text.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn required_date(field: &str, raw: Option<&str>) -> Result<chrono::NaiveDate, CalendarError> {
    match raw {
        Some(raw) => parse_calendar_date(raw),
        None => Err(CalendarError::MalformedDate {
            value: format!("<missing {field}>"),
        }),
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct ItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: ItemKind,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub payload: ItemPayload,
}

impl ItemRecord {
    /// Convert to a domain item. An unparsable date leaves the item undated,
    /// which keeps it off the grid without dropping the record.
    pub fn into_item(self) -> ScheduledItem {
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match parse_calendar_date(raw) {
                Ok(d) => Some(d),
                Err(e) => {
                    warn!(item = %self.name, error = %e, "item date unreadable, leaving it off the calendar");
                    None
                }
            },
        };

        ScheduledItem {
            id: self.id.map(ItemId::new),
            date,
            kind: self.kind,
            name: self.name,
            payload: self.payload,
        }
    }
}

impl From<&ScheduledItem> for ItemRecord {
    fn from(item: &ScheduledItem) -> Self {
        Self {
            id: item.id.as_ref().map(|id| id.as_str().to_string()),
            date: item.date.map(format_calendar_date),
            kind: item.kind,
            name: item.name.clone(),
            payload: item.payload.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct PhaseRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "type")]
    pub phase_type: Option<String>,
    #[serde(default, alias = "startDate", deserialize_with = "lenient_date")]
    pub start_date: Option<String>,
    #[serde(default, alias = "endDate", deserialize_with = "lenient_date")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PhaseRecord {
    /// Convert to a domain phase. Fails only on a missing or unparsable
    /// date; an inverted interval converts fine and simply covers no day.
    pub fn into_phase(self) -> Result<Phase, CalendarError> {
        let start_date = required_date("start_date", self.start_date.as_deref())?;
        let end_date = required_date("end_date", self.end_date.as_deref())?;
        let kind = self
            .phase_type
            .as_deref()
            .map(PhaseKind::from_str_loose)
            .unwrap_or_default();
        let color = self
            .color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| kind.default_color().to_string());

        Ok(Phase {
            id: self.id,
            name: self.name,
            kind,
            start_date,
            end_date,
            color,
        })
    }
}

impl From<&Phase> for PhaseRecord {
    fn from(phase: &Phase) -> Self {
        Self {
            id: phase.id.clone(),
            name: phase.name.clone(),
            phase_type: Some(phase.kind.label().to_string()),
            start_date: Some(format_calendar_date(phase.start_date)),
            end_date: Some(format_calendar_date(phase.end_date)),
            color: Some(phase.color.clone()),
        }
    }
}
