use chrono::NaiveDate;

/// Data problems the calendar recovers from locally.
///
/// None of these stop a grid from being built; they are returned by the
/// parsing helpers and logged by the compose path.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Malformed calendar date: {value:?}")]
    MalformedDate { value: String },

    #[error("Invalid months-to-show value {0}, expected 1, 2 or 3")]
    InvalidViewCount(i64),

    #[error("Phase {phase_id} ends ({end}) before it starts ({start})")]
    InvertedPhaseInterval {
        phase_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}
