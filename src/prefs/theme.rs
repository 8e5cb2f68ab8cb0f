//! Light/dark theme selection.

use crate::error::FolioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Theme requested by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the terminal's background colour
    #[default]
    System,
}

/// Concrete theme after `System` has been resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ThemeMode {
    /// Light → Dark → System → Light
    pub fn cycle(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Resolve against the terminal, reading `COLORFGBG` through `env`
    pub fn resolve(self, env: impl Fn(&str) -> Option<String>) -> ResolvedTheme {
        match self {
            ThemeMode::Light => ResolvedTheme::Light,
            ThemeMode::Dark => ResolvedTheme::Dark,
            ThemeMode::System => env("COLORFGBG")
                .and_then(|value| background_from_colorfgbg(&value))
                .unwrap_or(ResolvedTheme::Dark),
        }
    }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background 7 or 15 is light
fn background_from_colorfgbg(value: &str) -> Option<ResolvedTheme> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(match background {
        7 | 15 => ResolvedTheme::Light,
        _ => ResolvedTheme::Dark,
    })
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThemeMode {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(FolioError::InvalidArgument {
                message: format!("unknown theme `{other}` (expected light, dark or system)"),
            }),
        }
    }
}
