//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait for rendering terminal interfaces and managing
//! lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::render::ui::state::ViewState;
use crate::render::ui::theme::ColorTheme;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Render the current view state to the terminal
    fn render(&mut self, view_state: &ViewState) -> Result<()>;

    /// Initialize the terminal UI (raw mode, alternate screen, mouse and paste capture)
    fn initialize(&mut self) -> Result<()>;

    /// Clean up and restore terminal state
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)

    /// Replace the palette used for subsequent frames
    fn set_theme(&mut self, theme: ColorTheme);
}
