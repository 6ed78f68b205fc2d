//! Theme values.
//!
//! The theme is an explicit value built once from the user's preference and
//! the scheme the platform reports, then passed to whatever renders. Nothing
//! in this crate reads a global "dark mode" flag.

use serde::{Deserialize, Serialize};

use crate::error::CourtsideError;
use crate::metrics::Rating;

/// Light or dark rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for ColorScheme {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(CourtsideError::Config(format!(
                "unknown color scheme '{}'",
                other
            ))),
        }
    }
}

/// What the user picked in settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the platform
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    pub fn resolve(self, platform: ColorScheme) -> ColorScheme {
        match self {
            ThemePreference::System => platform,
            ThemePreference::Light => ColorScheme::Light,
            ThemePreference::Dark => ColorScheme::Dark,
        }
    }
}

impl std::str::FromStr for ThemePreference {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "system" => Ok(ThemePreference::System),
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(CourtsideError::Config(format!(
                "unknown theme preference '{}'",
                other
            ))),
        }
    }
}

/// Colors for one scheme, as CSS-style hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub border: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub accent: &'static str,
    pub good: &'static str,
    pub average: &'static str,
    pub poor: &'static str,
    pub made_shot: &'static str,
    pub missed_shot: &'static str,
}

pub const LIGHT: Palette = Palette {
    background: "#ffffff",
    surface: "#f4f4f5",
    border: "#e4e4e7",
    text_primary: "#18181b",
    text_secondary: "#52525b",
    accent: "#ea580c",
    good: "#16a34a",
    average: "#ca8a04",
    poor: "#dc2626",
    made_shot: "#16a34a",
    missed_shot: "#dc2626",
};

pub const DARK: Palette = Palette {
    background: "#09090b",
    surface: "#18181b",
    border: "#27272a",
    text_primary: "#fafafa",
    text_secondary: "#a1a1aa",
    accent: "#fb923c",
    good: "#4ade80",
    average: "#facc15",
    poor: "#f87171",
    made_shot: "#4ade80",
    missed_shot: "#f87171",
};

/// The resolved theme handed to every view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub scheme: ColorScheme,
    pub palette: Palette,
}

impl Theme {
    pub fn new(scheme: ColorScheme) -> Self {
        let palette = match scheme {
            ColorScheme::Light => LIGHT,
            ColorScheme::Dark => DARK,
        };
        Self { scheme, palette }
    }

    pub fn from_preference(preference: ThemePreference, platform: ColorScheme) -> Self {
        Self::new(preference.resolve(platform))
    }

    pub fn is_dark(&self) -> bool {
        self.scheme == ColorScheme::Dark
    }

    pub fn rating_color(&self, rating: Rating) -> &'static str {
        match rating {
            Rating::Good => self.palette.good,
            Rating::Average => self.palette.average,
            Rating::Poor => self.palette.poor,
        }
    }

    pub fn shot_color(&self, made: bool) -> &'static str {
        if made {
            self.palette.made_shot
        } else {
            self.palette.missed_shot
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}
