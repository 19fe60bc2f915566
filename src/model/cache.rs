//! ReloadScope: decides which collections to re-read when data files change.

use std::path::{Path, PathBuf};

pub const ITEM_FILES: [&str; 2] = ["items.json", "items.yaml"];
pub const PHASE_FILES: [&str; 2] = ["phases.json", "phases.yaml"];

/// Determines what needs to be reloaded when files change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadScope {
    /// Nothing the calendar reads changed.
    Nothing,
    /// Only the item file changed.
    Items,
    /// Only the phase file changed.
    Phases,
    /// Both collections need re-reading.
    Full,
}

impl ReloadScope {
    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Nothing, s) | (s, Self::Nothing) => s,
            (a, b) if a == b => a,
            _ => Self::Full,
        }
    }

    pub fn reloads_items(self) -> bool {
        matches!(self, Self::Items | Self::Full)
    }

    pub fn reloads_phases(self) -> bool {
        matches!(self, Self::Phases | Self::Full)
    }
}

/// Classify a set of changed file paths into a ReloadScope.
pub fn classify_changes(paths: &[PathBuf]) -> ReloadScope {
    paths
        .iter()
        .map(|p| classify_path(p))
        .fold(ReloadScope::Nothing, ReloadScope::merge)
}

fn classify_path(path: &Path) -> ReloadScope {
    match path.file_name().and_then(|f| f.to_str()) {
        Some(name) if ITEM_FILES.contains(&name) => ReloadScope::Items,
        Some(name) if PHASE_FILES.contains(&name) => ReloadScope::Phases,
        _ => ReloadScope::Nothing,
    }
}
