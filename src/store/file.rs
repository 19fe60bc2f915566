//! FileStore: items and phases kept as JSON (or YAML) arrays in a data
//! directory.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calendar::mutation::{CreateItemRequest, NewPhaseRequest};
use crate::model::{ItemId, Phase, ScheduledItem, ITEM_FILES, PHASE_FILES};
use crate::store::error::StoreError;
use crate::store::records::{ItemRecord, PhaseRecord};
use crate::store::ScheduleStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Open an existing data directory.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        if !data_dir.is_dir() {
            return Err(StoreError::DirNotFound(data_dir.to_path_buf()));
        }
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Open a data directory, creating it first if needed.
    pub fn create(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::Io {
            path: data_dir.to_path_buf(),
            source: e,
        })?;
        Self::open(data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join(ITEM_FILES[0])
    }

    pub fn phases_path(&self) -> PathBuf {
        self.data_dir.join(PHASE_FILES[0])
    }

    fn load_item_records(&self) -> Result<Vec<ItemRecord>, StoreError> {
        read_records(&self.data_dir, ITEM_FILES)
    }

    fn load_phase_records(&self) -> Result<Vec<PhaseRecord>, StoreError> {
        read_records(&self.data_dir, PHASE_FILES)
    }
}

impl ScheduleStore for FileStore {
    fn list_items(&self) -> Result<Vec<ScheduledItem>, StoreError> {
        let items: Vec<ScheduledItem> = self
            .load_item_records()?
            .into_iter()
            .map(ItemRecord::into_item)
            .collect();
        debug!(count = items.len(), "loaded items");
        Ok(items)
    }

    fn list_phases(&self) -> Result<Vec<Phase>, StoreError> {
        let phases: Vec<Phase> = self
            .load_phase_records()?
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match record.into_phase() {
                    Ok(phase) => Some(phase),
                    Err(e) => {
                        warn!(phase_id = %id, error = %e, "skipping phase");
                        None
                    }
                }
            })
            .collect();
        debug!(count = phases.len(), "loaded phases");
        Ok(phases)
    }

    fn create_item(&self, request: CreateItemRequest) -> Result<ScheduledItem, StoreError> {
        let mut records = self.load_item_records()?;
        let item = request.into_item(ItemId::generate());
        records.push(ItemRecord::from(&item));
        write_records(&self.items_path(), &records)?;
        info!(id = ?item.id, name = %item.name, date = ?item.date, "created item");
        Ok(item)
    }

    fn delete_item(&self, id: &ItemId) -> Result<(), StoreError> {
        let mut records = self.load_item_records()?;
        let before = records.len();
        records.retain(|r| r.id.as_deref() != Some(id.as_str()));
        if records.len() == before {
            return Err(StoreError::NotFound {
                kind: "item",
                id: id.to_string(),
            });
        }
        write_records(&self.items_path(), &records)?;
        info!(id = %id, "deleted item");
        Ok(())
    }

    fn create_phase(&self, request: NewPhaseRequest) -> Result<Phase, StoreError> {
        let mut records = self.load_phase_records()?;
        let phase = request.into_phase(ItemId::generate().to_string());
        records.push(PhaseRecord::from(&phase));
        write_records(&self.phases_path(), &records)?;
        info!(id = %phase.id, name = %phase.name, "created phase");
        Ok(phase)
    }

    fn delete_phase(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.load_phase_records()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound {
                kind: "phase",
                id: id.to_string(),
            });
        }
        write_records(&self.phases_path(), &records)?;
        info!(id, "deleted phase");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// Read the first existing file of `[json, yaml]`. Neither existing means an
/// empty collection.
fn read_records<T: DeserializeOwned>(dir: &Path, names: [&str; 2]) -> Result<Vec<T>, StoreError> {
    let json_path = dir.join(names[0]);
    let yaml_path = dir.join(names[1]);

    if json_path.exists() {
        let content = read_file(&json_path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        return serde_json::from_str(&content).map_err(|e| StoreError::Invalid {
            path: json_path,
            message: e.to_string(),
        });
    }

    if yaml_path.exists() {
        let content = read_file(&yaml_path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        return serde_yaml::from_str(&content).map_err(|e| StoreError::Invalid {
            path: yaml_path,
            message: e.to_string(),
        });
    }

    Ok(Vec::new())
}

fn read_file(path: &Path) -> Result<String, StoreError> {
    std::fs::read_to_string(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write pretty JSON through a sibling temp file so watchers never see a
/// half-written file.
fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json + "\n").map_err(|e| StoreError::Io {
        path: tmp.clone(),
        source: e,
    })?;
    std::fs::rename(&tmp, path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
