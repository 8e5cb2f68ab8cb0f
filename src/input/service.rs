//! High-level input service.
//!
//! Consumes coalesced raw events, runs the browse/search input state machine, and yields
//! domain-level `InputAction`s that the render coordinator consumes. While the search
//! palette is open every key is routed to it; section navigation never sees them.

use crate::error::Result;
use crate::input::raw::{RawInputCollector, RawInputEvent, ScrollDirection};
use crate::prefs::AccessibilityToggle;
use crate::section::Section;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Current input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Browsing,
    Searching,
}

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Scroll {
        direction: ScrollDirection,
        lines: u64,
    },
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    NextSection,
    PreviousSection,
    JumpToSection(Section),
    CycleCategory,
    CycleTag,
    CycleTheme,
    ToggleAccessibility(AccessibilityToggle),
    OpenSearch,
    UpdateQuery(String),
    SelectNext,
    SelectPrevious,
    CommitSelection,
    CloseSearch,
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
    NoAction,
    InvalidInput,
}

fn plain(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// State machine translating keys into actions.
pub struct InputStateMachine {
    state: InputState,
    query: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Browsing,
            query: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind == KeyEventKind::Release {
            return InputAction::NoAction;
        }

        match self.state {
            InputState::Browsing => self.handle_browsing_key(key_event.code, key_event.modifiers),
            InputState::Searching => self.handle_search_key(key_event.code, key_event.modifiers),
        }
    }

    fn handle_browsing_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputAction {
        match (code, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => self.open_search(),
            (_, modifiers) if !plain(modifiers) => InputAction::InvalidInput,

            (KeyCode::Char('/'), _) => self.open_search(),
            (KeyCode::Char('q'), _) => InputAction::Quit,

            (KeyCode::Char('j') | KeyCode::Down, _) => InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            },
            (KeyCode::Char('k') | KeyCode::Up, _) => InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            },
            (KeyCode::Char(' ' | 'f') | KeyCode::PageDown, _) => InputAction::PageDown,
            (KeyCode::Char('b') | KeyCode::PageUp, _) => InputAction::PageUp,
            (KeyCode::Char('g') | KeyCode::Home, _) => InputAction::GoToTop,
            (KeyCode::Char('G') | KeyCode::End, _) => InputAction::GoToBottom,

            (KeyCode::Tab | KeyCode::Right | KeyCode::Char('l'), _) => InputAction::NextSection,
            (KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h'), _) => {
                InputAction::PreviousSection
            }
            (KeyCode::Char(digit @ '1'..='9'), _) => {
                let position = digit as usize - '1' as usize;
                match Section::ALL.get(position) {
                    Some(section) => InputAction::JumpToSection(*section),
                    None => InputAction::InvalidInput,
                }
            }

            (KeyCode::Char('c'), _) => InputAction::CycleCategory,
            (KeyCode::Char('T'), _) => InputAction::CycleTag,
            (KeyCode::Char('t'), _) => InputAction::CycleTheme,
            (KeyCode::Char('H'), _) => {
                InputAction::ToggleAccessibility(AccessibilityToggle::HighContrast)
            }
            (KeyCode::Char('M'), _) => {
                InputAction::ToggleAccessibility(AccessibilityToggle::ReducedMotion)
            }
            (KeyCode::Char('L'), _) => {
                InputAction::ToggleAccessibility(AccessibilityToggle::LargeText)
            }
            (KeyCode::Char('?'), _) => {
                InputAction::ToggleAccessibility(AccessibilityToggle::KeyHints)
            }

            _ => InputAction::InvalidInput,
        }
    }

    fn handle_search_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputAction {
        match (code, modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.close_search(),
            (KeyCode::Enter, _) => {
                self.close_search();
                InputAction::CommitSelection
            }
            (KeyCode::Down | KeyCode::Tab, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                InputAction::SelectNext
            }
            (KeyCode::Up | KeyCode::BackTab, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                InputAction::SelectPrevious
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.query.clear();
                InputAction::UpdateQuery(String::new())
            }
            (KeyCode::Backspace, _) => {
                if self.query.pop().is_some() {
                    InputAction::UpdateQuery(self.query.clone())
                } else {
                    InputAction::NoAction
                }
            }
            (KeyCode::Char(ch), modifiers) if plain(modifiers) && !ch.is_control() => {
                self.query.push(ch);
                InputAction::UpdateQuery(self.query.clone())
            }
            _ => InputAction::InvalidInput,
        }
    }

    /// Append pasted text to the query; ignored outside search mode
    pub fn handle_paste(&mut self, text: &str) -> InputAction {
        if self.state != InputState::Searching {
            return InputAction::NoAction;
        }
        let cleaned: String = text
            .chars()
            .map(|ch| if ch.is_control() { ' ' } else { ch })
            .collect();
        if cleaned.is_empty() {
            return InputAction::NoAction;
        }
        self.query.push_str(&cleaned);
        InputAction::UpdateQuery(self.query.clone())
    }

    /// Wheel input scrolls while browsing and moves the selection while searching
    pub fn handle_scroll(&mut self, direction: ScrollDirection, lines: u64) -> InputAction {
        match (self.state, direction) {
            (InputState::Browsing, _) => InputAction::Scroll { direction, lines },
            (InputState::Searching, ScrollDirection::Down) => InputAction::SelectNext,
            (InputState::Searching, ScrollDirection::Up) => InputAction::SelectPrevious,
        }
    }

    fn open_search(&mut self) -> InputAction {
        self.state = InputState::Searching;
        self.query.clear();
        InputAction::OpenSearch
    }

    fn close_search(&mut self) -> InputAction {
        self.state = InputState::Browsing;
        self.query.clear();
        InputAction::CloseSearch
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
            raw_input: RawInputCollector::new(),
        }
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            actions.extend(self.process_raw_event(raw_event));
            while let Some(extra_event) = self.raw_input.try_flush() {
                actions.extend(self.process_raw_event(extra_event));
            }
        }

        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        let mut actions = Vec::new();
        self.raw_input.process_event(event);
        while let Some(raw_event) = self.raw_input.try_flush() {
            actions.extend(self.process_raw_event(raw_event));
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Paste(text) => self.state_machine.handle_paste(&text),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Scroll { direction, lines } => {
                self.state_machine.handle_scroll(direction, lines)
            }
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::MouseEvent;
    use ratatui::crossterm::event::MouseEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(sm: &mut InputStateMachine, text: &str) -> InputAction {
        let mut last = InputAction::NoAction;
        for ch in text.chars() {
            last = sm.handle_key_event(key(KeyCode::Char(ch)));
        }
        last
    }

    #[test]
    fn browsing_keys_navigate() {
        let mut sm = InputStateMachine::new();
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('j'))),
            InputAction::Scroll {
                direction: ScrollDirection::Down,
                lines: 1,
            }
        );
        assert_eq!(sm.handle_key_event(key(KeyCode::Tab)), InputAction::NextSection);
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('3'))),
            InputAction::JumpToSection(Section::Projects)
        );
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Char('9'))),
            InputAction::InvalidInput
        );
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('t'))), InputAction::CycleTheme);
        assert_eq!(
            sm.handle_key_event(KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT)),
            InputAction::ToggleAccessibility(AccessibilityToggle::HighContrast)
        );
        assert_eq!(sm.handle_key_event(ctrl('c')), InputAction::Quit);
    }

    #[test]
    fn slash_and_ctrl_k_open_search() {
        let mut sm = InputStateMachine::new();
        assert_eq!(sm.handle_key_event(key(KeyCode::Char('/'))), InputAction::OpenSearch);
        assert_eq!(sm.state(), InputState::Searching);

        let mut sm = InputStateMachine::new();
        assert_eq!(sm.handle_key_event(ctrl('k')), InputAction::OpenSearch);
        assert_eq!(sm.state(), InputState::Searching);
    }

    #[test]
    fn search_mode_traps_every_key() {
        let mut sm = InputStateMachine::new();
        sm.handle_key_event(key(KeyCode::Char('/')));

        // 'q' and 'j' are query text here, not quit/scroll
        assert_eq!(type_text(&mut sm, "qj"), InputAction::UpdateQuery("qj".into()));
        assert_eq!(sm.handle_key_event(key(KeyCode::Down)), InputAction::SelectNext);
        assert_eq!(sm.handle_key_event(key(KeyCode::Up)), InputAction::SelectPrevious);
        assert_eq!(sm.handle_key_event(key(KeyCode::Tab)), InputAction::SelectNext);
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Backspace)),
            InputAction::UpdateQuery("q".into())
        );
        assert_eq!(sm.handle_key_event(ctrl('u')), InputAction::UpdateQuery(String::new()));
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Backspace)),
            InputAction::NoAction
        );
        assert_eq!(sm.state(), InputState::Searching);
    }

    #[test]
    fn enter_commits_and_escape_closes() {
        let mut sm = InputStateMachine::new();
        sm.handle_key_event(key(KeyCode::Char('/')));
        type_text(&mut sm, "react");
        assert_eq!(
            sm.handle_key_event(key(KeyCode::Enter)),
            InputAction::CommitSelection
        );
        assert_eq!(sm.state(), InputState::Browsing);
        assert_eq!(sm.query(), "");

        sm.handle_key_event(key(KeyCode::Char('/')));
        assert_eq!(sm.handle_key_event(key(KeyCode::Esc)), InputAction::CloseSearch);
        assert_eq!(sm.state(), InputState::Browsing);
    }

    #[test]
    fn paste_only_applies_while_searching() {
        let mut sm = InputStateMachine::new();
        assert_eq!(sm.handle_paste("react"), InputAction::NoAction);

        sm.handle_key_event(key(KeyCode::Char('/')));
        assert_eq!(
            sm.handle_paste("dev\nflow"),
            InputAction::UpdateQuery("dev flow".into())
        );
    }

    #[test]
    fn wheel_moves_selection_in_search_mode() {
        let mut service = InputService::new();
        service.process_event(Event::Key(key(KeyCode::Char('/'))));
        service.raw_input.process_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
        let actions = service.process_event(Event::Resize(100, 30));

        assert_eq!(
            actions,
            vec![
                InputAction::SelectNext,
                InputAction::Resize {
                    width: 100,
                    height: 30
                }
            ]
        );
    }

    #[test]
    fn keyboard_events_pass_through_state_machine() {
        let mut service = InputService::new();
        assert_eq!(
            service.process_event(Event::Key(key(KeyCode::Char('k')))),
            vec![InputAction::Scroll {
                direction: ScrollDirection::Up,
                lines: 1,
            }]
        );
        assert!(service
            .process_event(Event::Key(key(KeyCode::F(5))))
            .is_empty());
    }
}
