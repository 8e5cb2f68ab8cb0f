//! Keyboard navigation over search results.
//!
//! The palette is either closed, open with nothing to select, or open with a valid
//! selection in `[0, count)`. Arrow keys wrap through the results, Enter commits the
//! selection and closes, Escape closes unconditionally. Keys are ignored while closed.

/// State of the search palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteState {
    #[default]
    Closed,
    OpenEmpty,
    OpenWithResults { selected: usize, count: usize },
}

impl PaletteState {
    pub fn is_open(&self) -> bool {
        !matches!(self, PaletteState::Closed)
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            PaletteState::OpenWithResults { selected, .. } => Some(*selected),
            _ => None,
        }
    }
}

/// Keys the palette reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Observable outcome of feeding a key to the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteEvent {
    /// Nothing changed
    Ignored,
    /// Selection moved to the given result
    Selected(usize),
    /// The result at this position was committed; the palette is now closed
    Committed(usize),
    /// The palette closed without committing anything
    Closed,
}

/// Search palette state machine
#[derive(Debug, Clone, Default)]
pub struct SearchPalette {
    state: PaletteState,
}

impl SearchPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PaletteState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Open with no results; a no-op when already open
    pub fn open(&mut self) {
        if !self.is_open() {
            self.state = PaletteState::OpenEmpty;
        }
    }

    pub fn close(&mut self) {
        self.state = PaletteState::Closed;
    }

    /// Replace the result set; the selection resets to the first result.
    ///
    /// Ignored while closed so a late result cannot reopen the palette.
    pub fn set_result_count(&mut self, count: usize) {
        if !self.is_open() {
            return;
        }
        self.state = if count == 0 {
            PaletteState::OpenEmpty
        } else {
            PaletteState::OpenWithResults { selected: 0, count }
        };
    }

    pub fn handle_key(&mut self, key: PaletteKey) -> PaletteEvent {
        match (self.state, key) {
            (PaletteState::Closed, _) => PaletteEvent::Ignored,
            (_, PaletteKey::Escape) => {
                self.close();
                PaletteEvent::Closed
            }
            (PaletteState::OpenEmpty, PaletteKey::Enter) => {
                self.close();
                PaletteEvent::Closed
            }
            (PaletteState::OpenEmpty, _) => PaletteEvent::Ignored,
            (PaletteState::OpenWithResults { selected, .. }, PaletteKey::Enter) => {
                self.close();
                PaletteEvent::Committed(selected)
            }
            (PaletteState::OpenWithResults { selected, count }, PaletteKey::ArrowDown) => {
                let selected = (selected + 1) % count;
                self.state = PaletteState::OpenWithResults { selected, count };
                PaletteEvent::Selected(selected)
            }
            (PaletteState::OpenWithResults { selected, count }, PaletteKey::ArrowUp) => {
                let selected = (selected + count - 1) % count;
                self.state = PaletteState::OpenWithResults { selected, count };
                PaletteEvent::Selected(selected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with(count: usize) -> SearchPalette {
        let mut palette = SearchPalette::new();
        palette.open();
        palette.set_result_count(count);
        palette
    }

    #[test]
    fn starts_closed_and_ignores_keys() {
        let mut palette = SearchPalette::new();
        assert_eq!(palette.state(), PaletteState::Closed);
        for key in [
            PaletteKey::ArrowDown,
            PaletteKey::ArrowUp,
            PaletteKey::Enter,
            PaletteKey::Escape,
        ] {
            assert_eq!(palette.handle_key(key), PaletteEvent::Ignored);
        }
        assert_eq!(palette.state(), PaletteState::Closed);
    }

    #[test]
    fn arrow_down_wraps_to_first_result() {
        let mut palette = open_with(3);
        palette.handle_key(PaletteKey::ArrowDown);
        palette.handle_key(PaletteKey::ArrowDown);
        assert_eq!(palette.state().selected(), Some(2));

        assert_eq!(
            palette.handle_key(PaletteKey::ArrowDown),
            PaletteEvent::Selected(0)
        );
    }

    #[test]
    fn arrow_up_wraps_to_last_result() {
        let mut palette = open_with(3);
        assert_eq!(
            palette.handle_key(PaletteKey::ArrowUp),
            PaletteEvent::Selected(2)
        );
        assert_eq!(
            palette.handle_key(PaletteKey::ArrowUp),
            PaletteEvent::Selected(1)
        );
    }

    #[test]
    fn enter_commits_selection_and_closes() {
        let mut palette = open_with(4);
        palette.handle_key(PaletteKey::ArrowDown);
        assert_eq!(
            palette.handle_key(PaletteKey::Enter),
            PaletteEvent::Committed(1)
        );
        assert!(!palette.is_open());
    }

    #[test]
    fn enter_without_results_closes_without_commit() {
        let mut palette = open_with(0);
        assert_eq!(palette.state(), PaletteState::OpenEmpty);
        assert_eq!(
            palette.handle_key(PaletteKey::ArrowDown),
            PaletteEvent::Ignored
        );
        assert_eq!(palette.handle_key(PaletteKey::Enter), PaletteEvent::Closed);
        assert!(!palette.is_open());
    }

    #[test]
    fn escape_always_closes() {
        let mut palette = open_with(2);
        assert_eq!(palette.handle_key(PaletteKey::Escape), PaletteEvent::Closed);
        assert_eq!(palette.state(), PaletteState::Closed);

        let mut empty = open_with(0);
        assert_eq!(empty.handle_key(PaletteKey::Escape), PaletteEvent::Closed);
    }

    #[test]
    fn new_results_reset_selection() {
        let mut palette = open_with(5);
        palette.handle_key(PaletteKey::ArrowUp);
        palette.set_result_count(2);
        assert_eq!(
            palette.state(),
            PaletteState::OpenWithResults {
                selected: 0,
                count: 2
            }
        );
        palette.set_result_count(0);
        assert_eq!(palette.state(), PaletteState::OpenEmpty);
    }

    #[test]
    fn results_do_not_reopen_a_closed_palette() {
        let mut palette = SearchPalette::new();
        palette.set_result_count(3);
        assert_eq!(palette.state(), PaletteState::Closed);
    }
}
