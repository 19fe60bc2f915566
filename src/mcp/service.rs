use std::path::Path;

use chrono::NaiveDate;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};

use crate::calendar::error::CalendarError;
use crate::calendar::{
    self, DailyLog, DateGridBuilder, MultiMonthComposer, NewPhaseRequest, ScheduleMutationAdapter,
};
use crate::model::{
    parse_calendar_date, CalendarMonth, ItemId, MonthsToShow, PhaseKind, SourceKind, WeekStart,
};
use crate::store::error::StoreError;
use crate::store::{FileStore, Schedule, ScheduleStore};

use super::types::*;

const DEFAULT_UPCOMING_DAYS: u64 = 14;
const DEFAULT_UPCOMING_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// CalendarService
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CalendarService {
    store: FileStore,
    composer: MultiMonthComposer,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CalendarService {
    pub fn new(data_dir: &Path, week_start: WeekStart) -> Result<Self, StoreError> {
        Ok(Self {
            store: FileStore::open(data_dir)?,
            composer: MultiMonthComposer::new(DateGridBuilder::new(week_start)),
            tool_router: Self::tool_router(),
        })
    }

    // -- helpers (not tools) ------------------------------------------------

    fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Both collections, re-read so edits made elsewhere show up.
    fn schedule(&self) -> Result<Schedule, StoreError> {
        Ok(Schedule {
            items: self.store.list_items()?,
            phases: self.store.list_phases()?,
        })
    }

    fn date_or_today(raw: Option<&str>) -> Result<NaiveDate, String> {
        match raw {
            Some(s) => parse_calendar_date(s).map_err(|e| format!("Error: {e}")),
            None => Ok(Self::today()),
        }
    }

    fn to_json<T: serde::Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Error: {e}"))
    }

    // -- tools --------------------------------------------------------------

    #[tool(
        description = "Get the calendar grid for one to three consecutive months: week rows of day cells with up to two items each, an overflow count, and the phase overlay (phase name, color, start/end flags)."
    )]
    pub fn get_grid_model(&self, Parameters(params): Parameters<GetGridModelParams>) -> String {
        let reference = match params.month.as_deref() {
            Some(s) => match CalendarMonth::parse(s) {
                Ok(m) => m,
                Err(e) => return format!("Error: {e}"),
            },
            None => CalendarMonth::containing(Self::today()),
        };
        let months = MonthsToShow::clamped(params.months.unwrap_or(1));

        let schedule = match self.schedule() {
            Ok(s) => s,
            Err(e) => return format!("Error: {e}"),
        };

        let grids: Vec<MonthGridResponse> = self
            .composer
            .compose(reference, months, &schedule.items, &schedule.phases)
            .iter()
            .map(MonthGridResponse::from)
            .collect();
        Self::to_json(&grids)
    }

    #[tool(
        description = "Get everything scheduled on one day: all items (untruncated) and the active phase with start/end flags."
    )]
    pub fn get_day(&self, Parameters(params): Parameters<GetDayParams>) -> String {
        let date = match parse_calendar_date(&params.date) {
            Ok(d) => d,
            Err(e) => return format!("Error: {e}"),
        };
        let schedule = match self.schedule() {
            Ok(s) => s,
            Err(e) => return format!("Error: {e}"),
        };
        let detail = calendar::on_day_click(date, &schedule.items, &schedule.phases);
        Self::to_json(&DayDetailResponse::from(&detail))
    }

    #[tool(
        description = "Get the training phase running on a date (default today). When phases overlap, the first one listed wins."
    )]
    pub fn get_current_phase(
        &self,
        Parameters(params): Parameters<GetCurrentPhaseParams>,
    ) -> String {
        let date = match Self::date_or_today(params.date.as_deref()) {
            Ok(d) => d,
            Err(msg) => return msg,
        };
        let phases = match self.store.list_phases() {
            Ok(p) => p,
            Err(e) => return format!("Error: {e}"),
        };
        match calendar::current_phase(date, &phases) {
            Some(phase) => Self::to_json(&PhaseResponse::from(phase)),
            None => format!("No phase covers {date}"),
        }
    }

    #[tool(description = "List all training phases ordered by start date.")]
    pub fn list_phases(&self) -> String {
        match self.store.list_phases() {
            Ok(phases) => {
                let timeline: Vec<PhaseResponse> = calendar::timeline(&phases)
                    .into_iter()
                    .map(PhaseResponse::from)
                    .collect();
                Self::to_json(&timeline)
            }
            Err(e) => format!("Error: {e}"),
        }
    }

    #[tool(
        description = "List upcoming scheduled items from a date (default today) within a number of days, earliest first."
    )]
    pub fn list_upcoming(&self, Parameters(params): Parameters<ListUpcomingParams>) -> String {
        let from = match Self::date_or_today(params.from.as_deref()) {
            Ok(d) => d,
            Err(msg) => return msg,
        };
        let items = match self.store.list_items() {
            Ok(i) => i,
            Err(e) => return format!("Error: {e}"),
        };
        let found: Vec<ItemResponse> = calendar::upcoming(
            &items,
            from,
            params.days.unwrap_or(DEFAULT_UPCOMING_DAYS),
            params.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT),
        )
        .into_iter()
        .map(ItemResponse::from)
        .collect();
        Self::to_json(&found)
    }

    #[tool(
        description = "Place a routine, conditioning session or skill on a day, as if dragged from its list onto the calendar. Returns the stored item."
    )]
    pub fn drop_item(&self, Parameters(params): Parameters<DropItemParams>) -> String {
        let date = match parse_calendar_date(&params.date) {
            Ok(d) => d,
            Err(e) => return format!("Error: {e}"),
        };
        let phases = match self.store.list_phases() {
            Ok(p) => p,
            Err(e) => return format!("Error: {e}"),
        };
        let source = SourceKind::from_container_id(&params.source);
        let request = ScheduleMutationAdapter::on_drop(source, date, &params.name).in_phase_of(&phases);

        match self.store.create_item(request) {
            Ok(item) => Self::to_json(&ItemResponse::from(&item)),
            Err(e) => format!("Error: {e}"),
        }
    }

    #[tool(description = "Delete a scheduled item by id.")]
    pub fn delete_item(&self, Parameters(params): Parameters<DeleteItemParams>) -> String {
        match self.store.delete_item(&ItemId::new(params.id.as_str())) {
            Ok(()) => format!("Deleted item {}", params.id),
            Err(e) => format!("Error: {e}"),
        }
    }

    #[tool(
        description = "Save a day's training log: one item per routine and per conditioning session, all on that day and sharing the notes. Returns the stored items."
    )]
    pub fn save_day_log(&self, Parameters(params): Parameters<SaveDayLogParams>) -> String {
        let date = match parse_calendar_date(&params.date) {
            Ok(d) => d,
            Err(e) => return format!("Error: {e}"),
        };
        let log = DailyLog {
            routines: params.routines,
            conditioning: params.conditioning,
            notes: params.notes.unwrap_or_default(),
        };
        let requests = ScheduleMutationAdapter::on_save_log(date, &log);
        if requests.is_empty() {
            return format!("Error: nothing to log for {date}");
        }
        let phases = match self.store.list_phases() {
            Ok(p) => p,
            Err(e) => return format!("Error: {e}"),
        };

        let mut saved = Vec::with_capacity(requests.len());
        for request in requests {
            match self.store.create_item(request.in_phase_of(&phases)) {
                Ok(item) => saved.push(ItemResponse::from(&item)),
                Err(e) => return format!("Error: {e} ({} of the log saved)", saved.len()),
            }
        }
        Self::to_json(&saved)
    }

    #[tool(
        description = "Create a training phase. Without an end date it runs for two weeks; without a color it takes its type's color. Returns the stored phase."
    )]
    pub fn create_phase(&self, Parameters(params): Parameters<CreatePhaseParams>) -> String {
        let start = match parse_calendar_date(&params.start_date) {
            Ok(d) => d,
            Err(e) => return format!("Error: {e}"),
        };
        let kind = params
            .phase_type
            .as_deref()
            .map(PhaseKind::from_str_loose)
            .unwrap_or_default();

        let mut request = NewPhaseRequest::starting(params.name, kind, start);
        if let Some(raw) = params.end_date.as_deref() {
            match parse_calendar_date(raw) {
                Ok(end) if end < start => {
                    let err = CalendarError::InvertedPhaseInterval {
                        phase_id: request.name,
                        start,
                        end,
                    };
                    return format!("Error: {err}");
                }
                Ok(end) => request.end_date = end,
                Err(e) => return format!("Error: {e}"),
            }
        }
        if let Some(color) = params.color.filter(|c| !c.trim().is_empty()) {
            request.color = color;
        }

        match self.store.create_phase(request) {
            Ok(phase) => Self::to_json(&PhaseResponse::from(&phase)),
            Err(e) => format!("Error: {e}"),
        }
    }

    #[tool(description = "Delete a training phase by id.")]
    pub fn delete_phase(&self, Parameters(params): Parameters<DeletePhaseParams>) -> String {
        match self.store.delete_phase(&params.id) {
            Ok(()) => format!("Deleted phase {}", params.id),
            Err(e) => format!("Error: {e}"),
        }
    }
}

#[tool_handler]
impl ServerHandler for CalendarService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Training Calendar MCP Server - month grids with scheduled routines, \
                 conditioning and skills overlaid with training phases. Use get_grid_model \
                 for whole months, get_day for one day, list_phases for the phase timeline, \
                 drop_item to schedule something on a day, save_day_log to record a day's \
                 training and create_phase to add a phase."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
