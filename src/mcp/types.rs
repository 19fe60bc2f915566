use serde::{Deserialize, Serialize};

use crate::calendar::{DayDetail, GridCell, MonthGrid};
use crate::model::{format_calendar_date, Phase, ScheduledItem};

// ---------------------------------------------------------------------------
// Tool parameter types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetGridModelParams {
    /// First month to show as "YYYY-MM". Defaults to the current month.
    #[schemars(default)]
    pub month: Option<String>,
    /// Number of consecutive months, 1 to 3 (default 1). Other values are clamped.
    #[schemars(default)]
    pub months: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDayParams {
    /// Calendar date as "YYYY-MM-DD"
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCurrentPhaseParams {
    /// Calendar date as "YYYY-MM-DD". Defaults to today.
    #[schemars(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListUpcomingParams {
    /// First day to include as "YYYY-MM-DD". Defaults to today.
    #[schemars(default)]
    pub from: Option<String>,
    /// How many days ahead to look (default 14)
    #[schemars(default)]
    pub days: Option<u64>,
    /// Maximum number of items (default 10)
    #[schemars(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DropItemParams {
    /// Source list the item comes from: "routine", "conditioning" or "skills"
    pub source: String,
    /// Target day as "YYYY-MM-DD"
    pub date: String,
    /// Name of the routine, conditioning session or skill
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteItemParams {
    /// The item id
    pub id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveDayLogParams {
    /// Day being logged as "YYYY-MM-DD"
    pub date: String,
    /// Routine names done that day
    #[serde(default)]
    #[schemars(default)]
    pub routines: Vec<String>,
    /// Conditioning session names done that day
    #[serde(default)]
    #[schemars(default)]
    pub conditioning: Vec<String>,
    /// Free-text notes attached to every logged item
    #[schemars(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreatePhaseParams {
    pub name: String,
    /// Phase type: "Build", "Peak", "Taper", "Recovery" or any other label (default Build)
    #[schemars(default)]
    pub phase_type: Option<String>,
    /// First day as "YYYY-MM-DD"
    pub start_date: String,
    /// Last day as "YYYY-MM-DD". Defaults to two weeks after the start.
    #[schemars(default)]
    pub end_date: Option<String>,
    /// Color token such as "bg-blue-500". Defaults to the phase type's color.
    #[schemars(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeletePhaseParams {
    /// The phase id
    pub id: String,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemResponse {
    pub id: Option<String>,
    pub date: Option<String>,
    pub kind: String,
    pub name: String,
    pub phase: Option<String>,
}

impl From<&ScheduledItem> for ItemResponse {
    fn from(item: &ScheduledItem) -> Self {
        Self {
            id: item.id.as_ref().map(|id| id.as_str().to_string()),
            date: item.date.map(format_calendar_date),
            kind: item.kind.label().to_string(),
            name: item.name.clone(),
            phase: item.payload.phase.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PhaseResponse {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub start_date: String,
    pub end_date: String,
    pub color: String,
    pub span_days: i64,
}

impl From<&Phase> for PhaseResponse {
    fn from(phase: &Phase) -> Self {
        Self {
            id: phase.id.clone(),
            name: phase.name.clone(),
            kind: phase.kind.label().to_string(),
            start_date: format_calendar_date(phase.start_date),
            end_date: format_calendar_date(phase.end_date),
            color: phase.color.clone(),
            span_days: phase.span_days(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CellResponse {
    pub date: String,
    pub in_current_month: bool,
    /// At most two items; `remainder` counts the rest.
    pub items: Vec<ItemResponse>,
    pub remainder: usize,
    pub phase: Option<String>,
    pub phase_color: Option<String>,
    /// Phase name, present on the phase's first day only.
    pub phase_label: Option<String>,
    pub phase_start: bool,
    pub phase_end: bool,
}

impl From<&GridCell> for CellResponse {
    fn from(cell: &GridCell) -> Self {
        let visible = cell.visible_items();
        Self {
            date: format_calendar_date(cell.date()),
            in_current_month: cell.day.in_current_month,
            items: visible.shown.iter().map(ItemResponse::from).collect(),
            remainder: visible.remainder,
            phase: cell.active_phase.as_ref().map(|p| p.name.clone()),
            phase_color: cell.active_phase.as_ref().map(|p| p.color.clone()),
            phase_label: cell.phase_label().map(str::to_string),
            phase_start: cell.is_phase_start,
            phase_end: cell.is_phase_end,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthGridResponse {
    pub month: String,
    pub title: String,
    pub weekdays: Vec<String>,
    pub weeks: Vec<Vec<CellResponse>>,
}

impl From<&MonthGrid> for MonthGridResponse {
    fn from(grid: &MonthGrid) -> Self {
        Self {
            month: grid.month.to_string(),
            title: grid.title.clone(),
            weekdays: grid.weekday_labels.iter().map(|s| s.to_string()).collect(),
            weeks: grid
                .weeks()
                .map(|week| week.iter().map(CellResponse::from).collect())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayDetailResponse {
    pub date: String,
    pub title: String,
    pub items: Vec<ItemResponse>,
    pub phase: Option<PhaseResponse>,
    pub phase_start: bool,
    pub phase_end: bool,
}

impl From<&DayDetail> for DayDetailResponse {
    fn from(detail: &DayDetail) -> Self {
        Self {
            date: format_calendar_date(detail.date),
            title: detail.title.clone(),
            items: detail.items.iter().map(ItemResponse::from).collect(),
            phase: detail.phase.active_phase.as_ref().map(PhaseResponse::from),
            phase_start: detail.phase.is_phase_start,
            phase_end: detail.phase.is_phase_end,
        }
    }
}
