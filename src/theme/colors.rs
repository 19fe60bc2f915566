//! Palette constants as ratatui Color::Rgb values.

use ratatui::style::Color;

pub struct ChalkColors;

impl ChalkColors {
    // Phase bars
    pub const BUILD: Color = Color::Rgb(59, 130, 246); // #3B82F6
    pub const PEAK: Color = Color::Rgb(168, 85, 247); // #A855F7
    pub const TAPER: Color = Color::Rgb(249, 115, 22); // #F97316
    pub const RECOVERY: Color = Color::Rgb(34, 197, 94); // #22C55E
    pub const OTHER: Color = Color::Rgb(107, 114, 128); // #6B7280

    // Item chips
    pub const CONDITIONING: Color = Color::Rgb(239, 68, 68); // #EF4444

    // Surfaces
    pub const BAR_BG: Color = Color::Rgb(17, 24, 39); // #111827
    pub const SURFACE: Color = Color::Rgb(31, 41, 55); // #1F2937
    pub const BORDER: Color = Color::Rgb(75, 85, 99); // #4B5563
    pub const PAPER: Color = Color::Rgb(249, 250, 251); // #F9FAFB

    // Text
    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 231, 235); // #E5E7EB
    pub const TEXT_SECONDARY: Color = Color::Rgb(156, 163, 175); // #9CA3AF
    pub const TEXT_DARK: Color = Color::Rgb(31, 41, 55); // #1F2937
    pub const WARNING: Color = Color::Rgb(234, 179, 8); // #EAB308
}

/// Map a Tailwind-style color token (`bg-blue-500`) to a terminal color.
pub fn token_color(token: &str) -> Option<Color> {
    let hue = token.trim().strip_prefix("bg-")?.split('-').next()?;
    match hue {
        "blue" => Some(ChalkColors::BUILD),
        "purple" => Some(ChalkColors::PEAK),
        "orange" => Some(ChalkColors::TAPER),
        "green" => Some(ChalkColors::RECOVERY),
        "red" => Some(ChalkColors::CONDITIONING),
        "gray" | "grey" => Some(ChalkColors::OTHER),
        _ => None,
    }
}
