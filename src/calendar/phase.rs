//! Phase overlay: which phase (if any) covers a day, and whether the day is
//! where that phase's bar starts or ends.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::error::CalendarError;
use crate::model::Phase;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhaseResolution {
    pub active_phase: Option<Phase>,
    pub is_phase_start: bool,
    pub is_phase_end: bool,
}

/// Resolve the phase for `date`.
///
/// When several phases cover the day the first one in `phases` wins; callers
/// decide precedence by ordering the input. Inverted phases cover nothing.
pub fn resolve(date: NaiveDate, phases: &[Phase]) -> PhaseResolution {
    match find_covering(date, phases) {
        Some(phase) => PhaseResolution {
            is_phase_start: date == phase.start_date,
            is_phase_end: date == phase.end_date,
            active_phase: Some(phase.clone()),
        },
        None => PhaseResolution::default(),
    }
}

/// First phase in input order covering `date`.
pub fn find_covering(date: NaiveDate, phases: &[Phase]) -> Option<&Phase> {
    phases.iter().find(|p| p.covers(date))
}

/// The phase running on `today`.
pub fn current_phase(today: NaiveDate, phases: &[Phase]) -> Option<&Phase> {
    find_covering(today, phases)
}

/// Phases ordered by start date. Equal starts keep their input order.
pub fn timeline(phases: &[Phase]) -> Vec<&Phase> {
    let mut sorted: Vec<&Phase> = phases.iter().collect();
    sorted.sort_by_key(|p| p.start_date);
    sorted
}

/// Report every phase whose end precedes its start.
pub fn inverted_intervals(phases: &[Phase]) -> Vec<CalendarError> {
    phases
        .iter()
        .filter(|p| p.is_inverted())
        .map(|p| CalendarError::InvertedPhaseInterval {
            phase_id: p.id.clone(),
            start: p.start_date,
            end: p.end_date,
        })
        .collect()
}
