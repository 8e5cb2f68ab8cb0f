//! UI state management structures
//!
//! `ViewState` is everything the renderer needs for one frame: which section is shown,
//! where it is scrolled to, the section filters, the palette contents and the status
//! line. Search itself runs in the worker; the view only stores the latest results.

use crate::content::ContentStore;
use crate::input::ScrollDirection;
use crate::prefs::Preferences;
use crate::render::protocol::SearchHit;
use crate::render::ui::sections;
use crate::search::{BlogFilter, ProjectFilter};
use crate::section::{Navigator, Section};
use std::sync::Arc;

/// Rows taken by the section tab bar
const TAB_BAR_ROWS: u16 = 1;
/// Rows taken by the status line
const STATUS_ROWS: u16 = 1;
/// Rows taken by the key hint bar when it is shown
const HINT_ROWS: u16 = 1;

/// Contents of the search palette overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteView {
    pub open: bool,
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub selected: Option<usize>,
}

/// Viewport state for rendering
#[derive(Debug)]
pub struct ViewState {
    /// The portfolio being browsed
    pub content: Arc<ContentStore>,

    /// Where the content came from, shown in the status line
    pub source: String,

    /// Section currently on screen
    pub section: Section,

    /// First body row currently displayed
    pub scroll_top: u16,

    /// Row the body is moving towards; equals `scroll_top` when idle
    scroll_target: u16,

    pub project_filter: ProjectFilter,
    pub blog_filter: BlogFilter,

    pub palette: PaletteView,

    /// Status line content
    pub status_line: StatusLine,

    /// Snapshot of the preferences the view is drawn with
    pub preferences: Preferences,

    /// Use Unicode glyphs for icons
    pub unicode_icons: bool,

    /// Viewport dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewState {
    pub fn new(
        content: Arc<ContentStore>,
        source: impl Into<String>,
        viewport_width: u16,
        viewport_height: u16,
    ) -> Self {
        Self {
            content,
            source: source.into(),
            section: Section::About,
            scroll_top: 0,
            scroll_target: 0,
            project_filter: ProjectFilter::default(),
            blog_filter: BlogFilter::default(),
            palette: PaletteView::default(),
            status_line: StatusLine::new(),
            preferences: Preferences::default(),
            unicode_icons: true,
            viewport_width,
            viewport_height,
        }
    }

    /// Rows available to the section body
    pub fn body_height(&self) -> u16 {
        let hints = if self.preferences.accessibility.show_key_hints {
            HINT_ROWS
        } else {
            0
        };
        self.viewport_height
            .saturating_sub(TAB_BAR_ROWS + STATUS_ROWS + hints)
    }

    /// Width available for wrapped body text
    pub fn body_width(&self) -> u16 {
        self.viewport_width
    }

    /// Number of rows the current section renders to
    pub fn body_line_count(&self) -> usize {
        sections::section_line_count(self)
    }

    pub fn max_scroll(&self) -> u16 {
        let overflow = self
            .body_line_count()
            .saturating_sub(self.body_height() as usize);
        u16::try_from(overflow).unwrap_or(u16::MAX)
    }

    pub fn scroll_target(&self) -> u16 {
        self.scroll_target
    }

    /// Whether a smooth scroll is still in progress
    pub fn is_animating(&self) -> bool {
        self.scroll_top != self.scroll_target
    }

    /// Move the scroll target, clamped to the section; jumps directly under reduced motion
    pub fn set_scroll_target(&mut self, row: u16) {
        self.scroll_target = row.min(self.max_scroll());
        if self.preferences.accessibility.reduced_motion {
            self.scroll_top = self.scroll_target;
        }
    }

    pub fn scroll_by(&mut self, direction: ScrollDirection, lines: u64) {
        let lines = u16::try_from(lines).unwrap_or(u16::MAX);
        let target = match direction {
            ScrollDirection::Up => self.scroll_target.saturating_sub(lines),
            ScrollDirection::Down => self.scroll_target.saturating_add(lines),
        };
        self.set_scroll_target(target);
    }

    pub fn page_down(&mut self) {
        let page = self.body_height().saturating_sub(1).max(1);
        self.scroll_by(ScrollDirection::Down, page as u64);
    }

    pub fn page_up(&mut self) {
        let page = self.body_height().saturating_sub(1).max(1);
        self.scroll_by(ScrollDirection::Up, page as u64);
    }

    pub fn scroll_to_top(&mut self) {
        self.set_scroll_target(0);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.set_scroll_target(u16::MAX);
    }

    /// Advance a smooth scroll by one row. Returns true if the view moved.
    pub fn tick(&mut self) -> bool {
        if self.scroll_top < self.scroll_target {
            self.scroll_top += 1;
            true
        } else if self.scroll_top > self.scroll_target {
            self.scroll_top -= 1;
            true
        } else {
            false
        }
    }

    /// Show `section` from its first row
    pub fn switch_section(&mut self, section: Section) {
        self.section = section;
        self.scroll_top = 0;
        self.scroll_target = 0;
    }

    /// Re-clamp the scroll position after the section's contents changed
    pub fn refresh_scroll(&mut self) {
        let max = self.max_scroll();
        self.scroll_target = self.scroll_target.min(max);
        self.scroll_top = self.scroll_top.min(max);
    }

    /// Update terminal dimensions. Returns true if dimensions actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;

        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
            self.refresh_scroll();
        }

        changed
    }

    pub fn apply_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
        if preferences.accessibility.reduced_motion {
            self.scroll_top = self.scroll_target;
        }
        self.refresh_scroll();
    }

    pub fn open_palette(&mut self) {
        self.palette = PaletteView {
            open: true,
            ..PaletteView::default()
        };
    }

    pub fn close_palette(&mut self) {
        self.palette = PaletteView::default();
    }

    /// Replace the palette results; the selection resets to the first hit
    pub fn set_results(&mut self, hits: Vec<SearchHit>) {
        self.palette.selected = if hits.is_empty() { None } else { Some(0) };
        self.palette.hits = hits;
    }

    /// Target anchor of the palette result at `position`
    pub fn result_target(&self, position: usize) -> Option<&str> {
        self.palette
            .hits
            .get(position)
            .map(|hit| hit.record.target.as_str())
    }

    /// Format the complete status line for this view state
    pub fn format_status_line(&self) -> String {
        let position = if self.body_line_count() <= self.body_height() as usize {
            "All".to_string()
        } else if self.scroll_top == 0 {
            "Top".to_string()
        } else if self.scroll_top >= self.max_scroll() {
            "Bot".to_string()
        } else {
            let percentage = self.scroll_top as f32 / self.max_scroll() as f32 * 100.0;
            format!("{:.0}%", percentage)
        };

        self.status_line
            .format_status_line(&self.source, self.section.title(), &position)
    }
}

impl Navigator for ViewState {
    fn navigate_to(&mut self, target: &str) -> bool {
        match Section::from_anchor(target) {
            Some(section) => {
                self.switch_section(section);
                true
            }
            None => false,
        }
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    /// Create a new status line
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn format_status_line(&self, source: &str, section: &str, position: &str) -> String {
        match &self.message {
            Some(message) => format!("{} | {} | {} | {}", source, section, position, message),
            None => format!("{} | {} | {}", source, section, position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Profile, Skill};
    use crate::content::Icon;

    fn store_with_skills(count: usize) -> Arc<ContentStore> {
        let skills = (0..count)
            .map(|i| Skill {
                id: format!("skill{i}"),
                name: format!("Skill {i}"),
                category: "Languages".to_string(),
                description: String::new(),
                level: 50,
                years: None,
                icon: Icon::Code,
            })
            .collect();
        Arc::new(ContentStore {
            profile: Profile {
                name: "Test".to_string(),
                ..Profile::default()
            },
            skills,
            ..ContentStore::default()
        })
    }

    fn skills_view(count: usize) -> ViewState {
        let mut state = ViewState::new(store_with_skills(count), "test.toml", 80, 12);
        state.switch_section(Section::Skills);
        state
    }

    #[test]
    fn test_view_state_creation() {
        let state = ViewState::new(store_with_skills(1), "test.toml", 80, 24);
        assert_eq!(state.section, Section::About);
        assert_eq!(state.scroll_top, 0);
        assert!(!state.palette.open);
        // tabs, status and hint bar
        assert_eq!(state.body_height(), 21);
    }

    #[test]
    fn test_smooth_scroll_moves_one_row_per_tick() {
        let mut state = skills_view(40);
        state.scroll_by(ScrollDirection::Down, 3);
        assert_eq!(state.scroll_target(), 3);
        assert_eq!(state.scroll_top, 0);

        assert!(state.tick());
        assert!(state.tick());
        assert!(state.tick());
        assert!(!state.tick());
        assert_eq!(state.scroll_top, 3);
    }

    #[test]
    fn test_reduced_motion_jumps() {
        let mut state = skills_view(40);
        let mut prefs = Preferences::default();
        prefs.accessibility.reduced_motion = true;
        state.apply_preferences(prefs);

        state.page_down();
        assert!(state.scroll_top > 0);
        assert!(!state.is_animating());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = skills_view(40);
        state.scroll_to_bottom();
        assert_eq!(state.scroll_target(), state.max_scroll());
        state.scroll_by(ScrollDirection::Up, 10_000);
        assert_eq!(state.scroll_target(), 0);

        let mut short = skills_view(1);
        short.scroll_to_bottom();
        assert_eq!(short.scroll_target(), 0);
    }

    #[test]
    fn test_navigator_switches_section() {
        let mut state = skills_view(40);
        state.scroll_by(ScrollDirection::Down, 5);

        assert!(state.navigate_to("projects"));
        assert_eq!(state.section, Section::Projects);
        assert_eq!(state.scroll_top, 0);
        assert_eq!(state.scroll_target(), 0);

        assert!(state.navigate_to("#blog"));
        assert_eq!(state.section, Section::Blog);

        assert!(!state.navigate_to("pricing"));
        assert_eq!(state.section, Section::Blog);
    }

    #[test]
    fn test_status_line_format() {
        let mut state = skills_view(1);
        assert_eq!(state.format_status_line(), "test.toml | Skills | All");

        state.status_line.set_message("Theme: dark");
        assert_eq!(
            state.format_status_line(),
            "test.toml | Skills | All | Theme: dark"
        );

        let mut long = skills_view(40);
        assert!(long.format_status_line().ends_with("| Top"));
        long.scroll_to_bottom();
        while long.tick() {}
        assert!(long.format_status_line().ends_with("| Bot"));
    }

    #[test]
    fn test_terminal_resize() {
        let mut state = skills_view(40);
        assert!(!state.update_terminal_size(80, 12));
        state.scroll_to_bottom();
        while state.tick() {}
        let bottom = state.scroll_top;

        // A taller terminal shows more rows, so less scrolling is possible
        assert!(state.update_terminal_size(80, 30));
        assert!(state.scroll_top < bottom);
        assert_eq!(state.scroll_top, state.max_scroll());
    }

    #[test]
    fn test_palette_results_reset_selection() {
        let mut state = skills_view(1);
        state.open_palette();
        assert!(state.palette.open);
        state.set_results(Vec::new());
        assert_eq!(state.palette.selected, None);
        assert_eq!(state.result_target(0), None);

        state.close_palette();
        assert!(!state.palette.open);
    }
}
