//! Colour themes for the text overlay.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colour used for the countdown banner and help line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTheme {
    #[default]
    Gold,
    Cyan,
    Magenta,
    White,
    Orange,
}

impl ColorTheme {
    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Gold => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::White,
            ColorTheme::White => ColorTheme::Orange,
            ColorTheme::Orange => ColorTheme::Gold,
        }
    }

    pub fn color(self) -> Color {
        match self {
            ColorTheme::Gold => Color::Rgb(0xFF, 0xD7, 0x00),
            ColorTheme::Cyan => Color::Rgb(0x00, 0xFF, 0xFF),
            ColorTheme::Magenta => Color::Rgb(0xFF, 0x00, 0xFF),
            ColorTheme::White => Color::White,
            ColorTheme::Orange => Color::Rgb(0xFF, 0xA5, 0x00),
        }
    }
}
