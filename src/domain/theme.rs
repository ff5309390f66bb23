// Display themes and the chart color parameters they carry
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Chart styling colors. The original dashboard read these from CSS custom
/// properties on the page body; here they are frozen per theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPalette {
    pub background: &'static str,
    pub font_color: &'static str,
    pub axis_color: &'static str,
}

const LIGHT_PALETTE: ChartPalette = ChartPalette {
    background: "#ffffff",
    font_color: "#363949",
    axis_color: "#677483",
};

const DARK_PALETTE: ChartPalette = ChartPalette {
    background: "#181a1e",
    font_color: "#edeffd",
    axis_color: "#a3bdcc",
};

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> ChartPalette {
        match self {
            ThemeMode::Light => LIGHT_PALETTE,
            ThemeMode::Dark => DARK_PALETTE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}
