pub mod error;
pub mod file;
pub mod records;

use std::path::Path;

use tracing::debug;

use crate::calendar::mutation::{CreateItemRequest, NewPhaseRequest};
use crate::model::{ItemId, Phase, ScheduledItem};
use crate::store::error::StoreError;

pub use file::FileStore;

/// The persistence collaborator the calendar reads from and hands create
/// requests to.
pub trait ScheduleStore {
    fn list_items(&self) -> Result<Vec<ScheduledItem>, StoreError>;
    fn list_phases(&self) -> Result<Vec<Phase>, StoreError>;
    fn create_item(&self, request: CreateItemRequest) -> Result<ScheduledItem, StoreError>;
    fn delete_item(&self, id: &ItemId) -> Result<(), StoreError>;
    fn create_phase(&self, request: NewPhaseRequest) -> Result<Phase, StoreError>;
    fn delete_phase(&self, id: &str) -> Result<(), StoreError>;
}

/// Both collections, as handed to the engine.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub items: Vec<ScheduledItem>,
    pub phases: Vec<Phase>,
}

/// Load items and phases from a data directory.
///
/// Missing files are empty collections. Items with unreadable dates stay
/// undated and phases with unreadable dates are skipped; both are logged.
pub fn load_schedule(data_dir: &Path) -> Result<Schedule, StoreError> {
    let store = FileStore::open(data_dir)?;
    let schedule = Schedule {
        items: store.list_items()?,
        phases: store.list_phases()?,
    };
    debug!(
        items = schedule.items.len(),
        phases = schedule.phases.len(),
        "loaded schedule"
    );
    Ok(schedule)
}
