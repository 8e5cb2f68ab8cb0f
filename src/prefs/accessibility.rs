//! Accessibility preferences.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityPreferences {
    /// Replace the theme palette with the high-contrast one
    pub high_contrast: bool,
    /// Jump instead of scrolling smoothly
    pub reduced_motion: bool,
    /// Extra spacing between items
    pub large_text: bool,
    /// Show the key hint bar
    pub show_key_hints: bool,
}

impl Default for AccessibilityPreferences {
    fn default() -> Self {
        Self {
            high_contrast: false,
            reduced_motion: false,
            large_text: false,
            show_key_hints: true,
        }
    }
}

/// A single on/off accessibility setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityToggle {
    HighContrast,
    ReducedMotion,
    LargeText,
    KeyHints,
}

impl AccessibilityToggle {
    fn flag(self, prefs: &mut AccessibilityPreferences) -> &mut bool {
        match self {
            AccessibilityToggle::HighContrast => &mut prefs.high_contrast,
            AccessibilityToggle::ReducedMotion => &mut prefs.reduced_motion,
            AccessibilityToggle::LargeText => &mut prefs.large_text,
            AccessibilityToggle::KeyHints => &mut prefs.show_key_hints,
        }
    }

    /// Flip the setting and return its new value
    pub fn apply(self, prefs: &mut AccessibilityPreferences) -> bool {
        let flag = self.flag(prefs);
        *flag = !*flag;
        *flag
    }

    pub fn label(self) -> &'static str {
        match self {
            AccessibilityToggle::HighContrast => "High contrast",
            AccessibilityToggle::ReducedMotion => "Reduced motion",
            AccessibilityToggle::LargeText => "Large text",
            AccessibilityToggle::KeyHints => "Key hints",
        }
    }

    /// Message announced after the setting changes
    pub fn announcement(self, enabled: bool) -> String {
        format!("{} {}", self.label(), if enabled { "on" } else { "off" })
    }
}
