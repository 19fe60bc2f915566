use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Item kind (what a scheduled item is)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemKind {
    #[default]
    Routine,
    Conditioning,
    Skills,
    Recovery,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Routine => "Routine",
            Self::Conditioning => "Conditioning",
            Self::Skills => "Skills",
            Self::Recovery => "Recovery",
        }
    }

    /// Color token used by the calendar chips.
    pub fn color_token(self) -> &'static str {
        match self {
            Self::Routine => "bg-purple-500",
            Self::Skills => "bg-blue-500",
            Self::Conditioning => "bg-red-500",
            Self::Recovery => "bg-green-500",
        }
    }

    /// Parse an item kind leniently. Anything unrecognised is a routine.
    pub fn from_str_loose(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        match lower.trim() {
            "conditioning" | "cond" => Self::Conditioning,
            "skills" | "skill" => Self::Skills,
            "recovery" | "rest" => Self::Recovery,
            _ => Self::Routine,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ItemKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ItemKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ItemKind::from_str_loose(&s))
    }
}

// ---------------------------------------------------------------------------
// Phase kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PhaseKind {
    #[default]
    Build,
    Peak,
    Taper,
    Recovery,
    /// Any other phase type, kept verbatim.
    Other(String),
}

impl PhaseKind {
    pub fn label(&self) -> &str {
        match self {
            Self::Build => "Build",
            Self::Peak => "Peak",
            Self::Taper => "Taper",
            Self::Recovery => "Recovery",
            Self::Other(s) => s,
        }
    }

    /// Color token a phase of this kind gets when none is stored.
    pub fn default_color(&self) -> &'static str {
        match self {
            Self::Build => "bg-blue-500",
            Self::Peak => "bg-purple-500",
            Self::Taper => "bg-orange-500",
            Self::Recovery => "bg-green-500",
            Self::Other(_) => "bg-gray-500",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "build" => Self::Build,
            "peak" => Self::Peak,
            "taper" => Self::Taper,
            "recovery" => Self::Recovery,
            _ => Self::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PhaseKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for PhaseKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(PhaseKind::from_str_loose(&s))
    }
}

// ---------------------------------------------------------------------------
// Drag source (which list an item was dragged out of)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceKind {
    #[default]
    Routine,
    Conditioning,
    Skills,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Routine => "Routines",
            Self::Conditioning => "Conditioning",
            Self::Skills => "Skills",
        }
    }

    /// Map a drag source container id such as `"routine-list"` or
    /// `"sidebar-conditioning"` to its source kind. Routines are the fallback.
    pub fn from_container_id(id: &str) -> Self {
        let lower = id.to_ascii_lowercase();
        if lower.contains("routine") {
            Self::Routine
        } else if lower.contains("skill") {
            Self::Skills
        } else if lower.contains("conditioning") {
            Self::Conditioning
        } else {
            Self::Routine
        }
    }

    pub fn item_kind(self) -> ItemKind {
        match self {
            Self::Routine => ItemKind::Routine,
            Self::Conditioning => ItemKind::Conditioning,
            Self::Skills => ItemKind::Skills,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Routine => Self::Conditioning,
            Self::Conditioning => Self::Skills,
            Self::Skills => Self::Routine,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Months shown side by side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MonthsToShow {
    #[default]
    One = 1,
    Two = 2,
    Three = 3,
}

impl MonthsToShow {
    pub fn count(self) -> usize {
        self as usize
    }

    /// Exact conversion; `None` for anything outside 1..=3.
    pub fn from_count(n: i64) -> Option<Self> {
        match n {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    /// Clamp any count to the nearest valid value.
    pub fn clamped(n: i64) -> Self {
        match n {
            i64::MIN..=1 => Self::One,
            2 => Self::Two,
            _ => Self::Three,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::Three,
            Self::Three => Self::One,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::One => "1 Month",
            Self::Two => "2 Months",
            Self::Three => "3 Months",
        }
    }
}

impl fmt::Display for MonthsToShow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Week start convention
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }

    /// Column index (0..7) of `day` in a week starting on this day.
    pub fn column_of(self, day: Weekday) -> u32 {
        (day.num_days_from_sunday() + 7 - self.weekday().num_days_from_sunday()) % 7
    }

    /// Short weekday labels in column order.
    pub fn header_labels(self) -> [&'static str; 7] {
        match self {
            Self::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Self::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Self::Monday,
            _ => Self::Sunday,
        }
    }
}
