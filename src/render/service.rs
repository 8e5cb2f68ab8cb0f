//! Render coordination helpers.
//!
//! Provides the state machine that mediates between input actions, search commands, and view
//! updates. The palette state machine lives here so every palette transition and every
//! worker response goes through one place; responses to anything but the latest query
//! are dropped.

use crate::error::{FolioError, Result};
use crate::input::InputAction;
use crate::prefs::PreferenceStore;
use crate::render::protocol::{RequestId, SearchCommand, SearchResponse};
use crate::render::ui::ViewState;
use crate::search::filter::cycle_option;
use crate::search::{normalize_query, BlogFilter, PaletteEvent, PaletteKey, ProjectFilter};
use crate::search::SearchPalette;
use crate::section::{Navigator, Section};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Tracks render-related state that must persist across input actions and worker responses.
pub struct RenderLoopState {
    palette: SearchPalette,
    prefs: Arc<PreferenceStore>,
    next_request_id: RequestId,
    latest_search_request: Option<RequestId>,
}

impl RenderLoopState {
    pub fn new(prefs: Arc<PreferenceStore>) -> Self {
        Self {
            palette: SearchPalette::new(),
            prefs,
            next_request_id: 1,
            latest_search_request: None,
        }
    }

    pub fn palette(&self) -> &SearchPalette {
        &self.palette
    }

    pub fn latest_search_request(&self) -> Option<RequestId> {
        self.latest_search_request
    }

    /// Apply one input action. Returns false when the application should quit.
    pub async fn process_action(
        &mut self,
        action: InputAction,
        view_state: &mut ViewState,
        search_tx: &mpsc::Sender<SearchCommand>,
    ) -> Result<bool> {
        // Focus trap: section navigation never sees input while the palette is open
        if self.palette.is_open() && !Self::is_palette_action(&action) {
            return Ok(true);
        }

        match action {
            InputAction::Quit => return Ok(false),
            InputAction::Scroll { direction, lines } => view_state.scroll_by(direction, lines),
            InputAction::PageUp => view_state.page_up(),
            InputAction::PageDown => view_state.page_down(),
            InputAction::GoToTop => view_state.scroll_to_top(),
            InputAction::GoToBottom => view_state.scroll_to_bottom(),
            InputAction::NextSection => {
                view_state.switch_section(view_state.section.next());
                view_state.status_line.clear_message();
            }
            InputAction::PreviousSection => {
                view_state.switch_section(view_state.section.previous());
                view_state.status_line.clear_message();
            }
            InputAction::JumpToSection(section) => {
                view_state.switch_section(section);
                view_state.status_line.clear_message();
            }
            InputAction::CycleCategory => Self::cycle_category(view_state),
            InputAction::CycleTag => Self::cycle_tag(view_state),
            InputAction::CycleTheme => {
                let updated = self
                    .prefs
                    .commit(|prefs| prefs.theme = prefs.theme.cycle())
                    .await;
                view_state.apply_preferences(updated);
                view_state
                    .status_line
                    .set_message(format!("Theme: {}", updated.theme));
            }
            InputAction::ToggleAccessibility(toggle) => {
                let mut enabled = false;
                let updated = self
                    .prefs
                    .commit(|prefs| enabled = toggle.apply(&mut prefs.accessibility))
                    .await;
                view_state.apply_preferences(updated);
                view_state
                    .status_line
                    .set_message(toggle.announcement(enabled));
            }
            InputAction::OpenSearch => {
                self.palette.open();
                self.latest_search_request = None;
                view_state.open_palette();
            }
            InputAction::UpdateQuery(query) => {
                self.update_query(query, view_state, search_tx).await?;
            }
            InputAction::SelectNext => self.move_selection(PaletteKey::ArrowDown, view_state),
            InputAction::SelectPrevious => self.move_selection(PaletteKey::ArrowUp, view_state),
            InputAction::CommitSelection => {
                let event = self.palette.handle_key(PaletteKey::Enter);
                let target = match event {
                    PaletteEvent::Committed(position) => {
                        view_state.result_target(position).map(str::to_string)
                    }
                    _ => None,
                };
                self.finish_search(view_state);

                if let Some(target) = target {
                    if view_state.navigate_to(&target) {
                        view_state
                            .status_line
                            .set_message(format!("Showing {}", view_state.section.title()));
                    } else {
                        log::warn!("search result points at unknown section `{target}`");
                    }
                }
            }
            InputAction::CloseSearch => {
                self.palette.handle_key(PaletteKey::Escape);
                self.finish_search(view_state);
            }
            InputAction::Resize { width, height } => {
                view_state.update_terminal_size(width, height);
            }
            InputAction::NoAction | InputAction::InvalidInput => {}
        }
        Ok(true)
    }

    pub fn handle_response(&mut self, response: SearchResponse, view_state: &mut ViewState) {
        match response {
            SearchResponse::Results {
                request_id, hits, ..
            } => {
                if Some(request_id) != self.latest_search_request {
                    log::trace!("dropping stale search response {request_id}");
                    return;
                }
                self.latest_search_request = None;
                if !self.palette.is_open() {
                    return;
                }
                self.palette.set_result_count(hits.len());
                view_state.set_results(hits);
            }
        }
    }

    fn is_palette_action(action: &InputAction) -> bool {
        matches!(
            action,
            InputAction::UpdateQuery(_)
                | InputAction::SelectNext
                | InputAction::SelectPrevious
                | InputAction::CommitSelection
                | InputAction::CloseSearch
                | InputAction::Resize { .. }
                | InputAction::Quit
        )
    }

    async fn update_query(
        &mut self,
        query: String,
        view_state: &mut ViewState,
        search_tx: &mpsc::Sender<SearchCommand>,
    ) -> Result<()> {
        if !self.palette.is_open() {
            return Ok(());
        }
        view_state.palette.query = query.clone();

        if normalize_query(&query).is_none() {
            self.latest_search_request = None;
            self.palette.set_result_count(0);
            view_state.set_results(Vec::new());
            return Ok(());
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_search_request = Some(request_id);
        search_tx
            .send(SearchCommand::Query { request_id, query })
            .await
            .map_err(|_| FolioError::search("search worker unavailable"))?;
        Ok(())
    }

    fn move_selection(&mut self, key: PaletteKey, view_state: &mut ViewState) {
        if let PaletteEvent::Selected(position) = self.palette.handle_key(key) {
            view_state.palette.selected = Some(position);
        }
    }

    fn finish_search(&mut self, view_state: &mut ViewState) {
        self.palette.close();
        self.latest_search_request = None;
        view_state.close_palette();
    }

    fn cycle_category(view_state: &mut ViewState) {
        let label = match view_state.section {
            Section::Projects => {
                let options = ProjectFilter::categories(&view_state.content.projects);
                let next = cycle_option(view_state.project_filter.category.as_deref(), &options);
                view_state.project_filter.category = next;
                view_state.project_filter.category.clone()
            }
            Section::Blog => {
                let options = BlogFilter::categories(&view_state.content.posts);
                let next = cycle_option(view_state.blog_filter.category.as_deref(), &options);
                view_state.blog_filter.category = next;
                view_state.blog_filter.category.clone()
            }
            _ => {
                view_state
                    .status_line
                    .set_message("No category filter in this section");
                return;
            }
        };

        view_state.refresh_scroll();
        view_state.status_line.set_message(match label {
            Some(category) => format!("Category: {category}"),
            None => "Category filter off".to_string(),
        });
    }

    fn cycle_tag(view_state: &mut ViewState) {
        if view_state.section != Section::Blog {
            view_state
                .status_line
                .set_message("Tags are only available in Blog");
            return;
        }

        let options = BlogFilter::tags(&view_state.content.posts);
        let next = cycle_option(view_state.blog_filter.tag.as_deref(), &options);
        view_state.blog_filter.tag = next;

        view_state.refresh_scroll();
        view_state
            .status_line
            .set_message(match view_state.blog_filter.tag.as_deref() {
                Some(tag) => format!("Tag: {tag}"),
                None => "Tag filter off".to_string(),
            });
    }
}
