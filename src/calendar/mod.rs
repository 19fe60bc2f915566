//! The calendar engine: a pure transform from (month, items, phases) to a
//! renderable grid model. Nothing here keeps state between calls.

pub mod bucket;
pub mod compose;
pub mod error;
pub mod grid;
pub mod mutation;
pub mod navigation;
pub mod phase;
pub mod upcoming;

pub use bucket::{bucket, VisibleItems, MAX_VISIBLE_ITEMS};
pub use compose::{compose, on_day_click, DayDetail, GridCell, MonthGrid, MultiMonthComposer};
pub use error::CalendarError;
pub use grid::DateGridBuilder;
pub use mutation::{CreateItemRequest, DailyLog, NewPhaseRequest, ScheduleMutationAdapter};
pub use navigation::NavigationState;
pub use phase::{current_phase, resolve, timeline, PhaseResolution};
pub use upcoming::upcoming;
