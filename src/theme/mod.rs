pub mod colors;

use ratatui::style::Color;

use training_calendar::model::{ItemKind, Phase};

use colors::{token_color, ChalkColors};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub bar_bg: Color,
    pub text_on_bar: Color,
    pub surface: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub outside_month: Color,
    pub accent: Color,
    pub warning: Color,
    pub error: Color,
    pub selected_bg: Color,
}

impl Theme {
    pub fn chalk() -> Self {
        Self {
            name: "Chalk",
            bar_bg: ChalkColors::BAR_BG,
            text_on_bar: ChalkColors::TEXT_PRIMARY,
            surface: ChalkColors::SURFACE,
            border: ChalkColors::BORDER,
            text_primary: ChalkColors::TEXT_PRIMARY,
            text_secondary: ChalkColors::TEXT_SECONDARY,
            outside_month: ChalkColors::BORDER,
            accent: ChalkColors::PEAK,
            warning: ChalkColors::WARNING,
            error: ChalkColors::CONDITIONING,
            selected_bg: ChalkColors::SURFACE,
        }
    }

    pub fn paper() -> Self {
        Self {
            name: "Paper",
            bar_bg: ChalkColors::BUILD,
            text_on_bar: ChalkColors::PAPER,
            surface: ChalkColors::PAPER,
            border: ChalkColors::TEXT_SECONDARY,
            text_primary: ChalkColors::TEXT_DARK,
            text_secondary: ChalkColors::BORDER,
            outside_month: ChalkColors::TEXT_SECONDARY,
            accent: ChalkColors::BUILD,
            warning: ChalkColors::TAPER,
            error: ChalkColors::CONDITIONING,
            selected_bg: ChalkColors::TEXT_PRIMARY,
        }
    }

    pub fn next(self) -> Self {
        if self.name == "Chalk" {
            Self::paper()
        } else {
            Self::chalk()
        }
    }

    /// Bar color for a phase: its stored token, else its kind's default.
    pub fn phase_color(&self, phase: &Phase) -> Color {
        token_color(&phase.color)
            .or_else(|| token_color(phase.kind.default_color()))
            .unwrap_or(ChalkColors::OTHER)
    }

    pub fn item_color(&self, kind: ItemKind) -> Color {
        token_color(kind.color_token()).unwrap_or(ChalkColors::OTHER)
    }
}
