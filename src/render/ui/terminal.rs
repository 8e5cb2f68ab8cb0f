//! Terminal UI implementation using ratatui
//!
//! Draws the section tab bar, the scrolled section body, the status line, the optional
//! key hint bar and, on top of everything, the search palette. All data comes from
//! `ViewState`; this module only turns it into widgets.

use crate::error::{FolioError, Result};
use crate::render::ui::renderer::UIRenderer;
use crate::render::ui::sections::section_lines;
use crate::render::ui::state::{PaletteView, ViewState};
use crate::render::ui::theme::ColorTheme;
use crate::section::Section;
use ratatui::crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Hints shown while browsing sections
const BROWSE_HINTS: &str =
    "/ search  tab/1-6 sections  j/k scroll  c category  T tag  t theme  H M L a11y  ? hints  q quit";
/// Hints shown while the palette is open
const SEARCH_HINTS: &str = "type to search  ↑/↓ select  enter open  esc close";

/// Share of the screen width used by the palette
const PALETTE_WIDTH_PERCENT: u16 = 70;

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn render_tabs(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let titles: Vec<Line> = Section::ALL
            .iter()
            .enumerate()
            .map(|(i, section)| Line::from(format!("{} {}", i + 1, section.title())))
            .collect();

        let tabs = Tabs::new(titles)
            .select(view_state.section.index())
            .style(theme.muted)
            .highlight_style(theme.active_tab)
            .divider("|");
        frame.render_widget(tabs, area);
    }

    fn render_body(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let lines = section_lines(view_state, theme);
        let paragraph = Paragraph::new(lines)
            .style(theme.text())
            .scroll((view_state.scroll_top, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let status_style = Style::default().bg(theme.status_bg).fg(theme.status_fg);
        let status = Paragraph::new(view_state.format_status_line()).style(status_style);
        frame.render_widget(status, area);
    }

    fn render_hints(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let hints = if view_state.palette.open {
            SEARCH_HINTS
        } else {
            BROWSE_HINTS
        };
        frame.render_widget(Paragraph::new(hints).style(theme.muted), area);
    }

    /// Create a line with search highlights applied using theme colors
    fn create_highlighted_line<'a>(
        content: &'a str,
        highlights: &[(usize, usize)],
        theme: &ColorTheme,
    ) -> Vec<Span<'a>> {
        if highlights.is_empty() {
            return vec![Span::raw(content)];
        }

        let mut spans = Vec::new();
        let mut last_end = 0;

        for &(start, end) in highlights {
            if start < last_end
                || start >= end
                || !content.is_char_boundary(start)
                || !content.is_char_boundary(end)
            {
                continue;
            }
            if start > last_end {
                spans.push(Span::raw(&content[last_end..start]));
            }
            spans.push(Span::styled(&content[start..end], theme.search_match));
            last_end = end;
        }

        if last_end < content.len() {
            spans.push(Span::raw(&content[last_end..]));
        }

        spans
    }

    fn palette_area(area: Rect, palette: &PaletteView) -> Rect {
        // borders, prompt and separator plus one row per hit (or the empty notice)
        let rows = palette.hits.len().max(1) as u16 + 4;
        let height = rows.min(area.height);
        let scaled = u32::from(area.width) * u32::from(PALETTE_WIDTH_PERCENT) / 100;
        let width = (scaled as u16).max(20).min(area.width);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height.saturating_sub(height) / 4,
            width,
            height,
        }
    }

    fn render_palette(frame: &mut Frame, area: Rect, palette: &PaletteView, theme: &ColorTheme) {
        let area = Self::palette_area(area, palette);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Search ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let prompt = Line::from(vec![
            Span::styled("> ", theme.heading),
            Span::styled(palette.query.as_str(), theme.text()),
        ]);
        frame.render_widget(Paragraph::new(prompt), chunks[0]);
        frame.render_widget(
            Paragraph::new("─".repeat(chunks[1].width as usize)).style(theme.muted),
            chunks[1],
        );

        if palette.hits.is_empty() {
            let notice = if palette.query.trim().is_empty() {
                "Search projects, posts, skills, achievements and testimonials"
            } else {
                "No results"
            };
            frame.render_widget(Paragraph::new(notice).style(theme.muted), chunks[2]);
            return;
        }

        let items: Vec<ListItem> = palette
            .hits
            .iter()
            .map(|hit| {
                let mut spans = vec![Span::styled(
                    format!("{:<12}", hit.record.record_type.to_string()),
                    theme.muted,
                )];
                spans.extend(Self::create_highlighted_line(
                    &hit.record.title,
                    &hit.title_highlights,
                    theme,
                ));
                spans.push(Span::styled(
                    format!("  #{}", hit.record.target),
                    theme.muted,
                ));
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).highlight_style(theme.selection);
        let mut state = ListState::default().with_selected(palette.selected);
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            // Extract theme before closure to avoid borrowing issues
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let size = frame.size();
                let hint_rows = if view_state.preferences.accessibility.show_key_hints {
                    1
                } else {
                    0
                };

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Min(0),
                        Constraint::Length(1),
                        Constraint::Length(hint_rows),
                    ])
                    .split(size);

                Self::render_tabs(frame, chunks[0], view_state, theme);
                Self::render_body(frame, chunks[1], view_state, theme);
                Self::render_status(frame, chunks[2], view_state, theme);
                if hint_rows > 0 {
                    Self::render_hints(frame, chunks[3], view_state, theme);
                }

                if view_state.palette.open {
                    Self::render_palette(frame, size, &view_state.palette, theme);
                }
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode().map_err(|e| FolioError::ui(format!("cannot enter raw mode: {e}")))?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            disable_raw_mode()?;
            execute!(
                io::stdout(),
                DisableBracketedPaste,
                DisableMouseCapture,
                LeaveAlternateScreen
            )?;
            terminal.show_cursor()?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        ratatui::crossterm::terminal::size()
            .map_err(|e| FolioError::ui(format!("terminal size unavailable: {e}")))
    }

    fn set_theme(&mut self, theme: ColorTheme) {
        self.theme = theme;
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
