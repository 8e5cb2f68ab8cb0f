//! Color themes and styling definitions using ratatui colors
//!
//! A theme is picked from the user's preferences: `NO_COLOR` wins over everything,
//! high contrast overrides the light/dark choice, and `System` is resolved against
//! the terminal background.

use crate::prefs::{Preferences, ResolvedTheme};
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTheme {
    /// Normal text color (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Section headings and item titles
    pub heading: Style,

    /// Secondary text such as dates, metadata and hints
    pub muted: Style,

    /// Accent used for tags, categories and icons
    pub accent: Color,

    /// Matched characters inside search results
    pub search_match: Style,

    /// Selected search result
    pub selection: Style,

    /// Active tab in the section bar
    pub active_tab: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Border of the search palette
    pub border: Color,

    /// Error/warning text
    pub error_text: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorTheme {
    /// Palette for dark terminal backgrounds
    pub fn dark() -> Self {
        Self {
            normal_text: None,
            heading: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            accent: Color::LightMagenta,
            search_match: Style::default().fg(Color::Black).bg(Color::Yellow),
            selection: Style::default().fg(Color::White).bg(Color::Blue),
            active_tab: Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::Blue,
            status_fg: Color::White,
            border: Color::Cyan,
            error_text: Color::Red,
        }
    }

    /// Palette for light terminal backgrounds
    pub fn light() -> Self {
        Self {
            normal_text: Some(Color::Black),
            heading: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::Gray),
            accent: Color::Magenta,
            search_match: Style::default().fg(Color::Black).bg(Color::LightYellow),
            selection: Style::default().fg(Color::White).bg(Color::Blue),
            active_tab: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::Gray,
            status_fg: Color::Black,
            border: Color::Blue,
            error_text: Color::Red,
        }
    }

    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            heading: Style::default().add_modifier(Modifier::BOLD),
            muted: Style::default().add_modifier(Modifier::DIM),
            accent: Color::Reset,
            search_match: Style::default().add_modifier(Modifier::UNDERLINED),
            selection: Style::default().add_modifier(Modifier::REVERSED),
            active_tab: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            status_bg: Color::Reset,
            status_fg: Color::Reset,
            border: Color::Reset,
            error_text: Color::Reset,
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            normal_text: Some(Color::White),
            heading: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            muted: Style::default().fg(Color::White),
            accent: Color::LightGreen,
            search_match: Style::default().fg(Color::Black).bg(Color::LightYellow),
            selection: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            active_tab: Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::White,
            status_fg: Color::Black,
            border: Color::White,
            error_text: Color::LightRed,
        }
    }

    /// Theme matching `prefs`, reading `NO_COLOR` and `COLORFGBG` through `env`
    pub fn for_preferences(prefs: &Preferences, env: impl Fn(&str) -> Option<String>) -> Self {
        if env("NO_COLOR").is_some_and(|value| !value.is_empty()) {
            return Self::monochrome();
        }
        if prefs.accessibility.high_contrast {
            return Self::high_contrast();
        }
        match prefs.theme.resolve(env) {
            ResolvedTheme::Light => Self::light(),
            ResolvedTheme::Dark => Self::dark(),
        }
    }

    /// Style for ordinary body text
    pub fn text(&self) -> Style {
        match self.normal_text {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::ThemeMode;

    fn env_of<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_default_theme_is_dark() {
        let theme = ColorTheme::default();
        assert_eq!(theme, ColorTheme::dark());
        assert_eq!(theme.status_bg, Color::Blue);
        assert_eq!(theme.search_match.bg, Some(Color::Yellow));
    }

    #[test]
    fn test_theme_follows_mode() {
        let mut prefs = Preferences::default();
        prefs.theme = ThemeMode::Light;
        assert_eq!(
            ColorTheme::for_preferences(&prefs, env_of(&[])),
            ColorTheme::light()
        );

        prefs.theme = ThemeMode::System;
        assert_eq!(
            ColorTheme::for_preferences(&prefs, env_of(&[("COLORFGBG", "0;15")])),
            ColorTheme::light()
        );
        assert_eq!(
            ColorTheme::for_preferences(&prefs, env_of(&[("COLORFGBG", "15;0")])),
            ColorTheme::dark()
        );
    }

    #[test]
    fn test_high_contrast_overrides_mode() {
        let mut prefs = Preferences::default();
        prefs.theme = ThemeMode::Light;
        prefs.accessibility.high_contrast = true;
        let theme = ColorTheme::for_preferences(&prefs, env_of(&[]));
        assert_eq!(theme, ColorTheme::high_contrast());
        assert_eq!(theme.normal_text, Some(Color::White));
    }

    #[test]
    fn test_no_color_forces_monochrome() {
        let mut prefs = Preferences::default();
        prefs.accessibility.high_contrast = true;
        assert_eq!(
            ColorTheme::for_preferences(&prefs, env_of(&[("NO_COLOR", "1")])),
            ColorTheme::monochrome()
        );
        // An empty NO_COLOR does not count
        assert_eq!(
            ColorTheme::for_preferences(&prefs, env_of(&[("NO_COLOR", "")])),
            ColorTheme::high_contrast()
        );
    }

    #[test]
    fn test_text_style() {
        assert_eq!(ColorTheme::dark().text(), Style::default());
        assert_eq!(ColorTheme::light().text().fg, Some(Color::Black));
    }
}
