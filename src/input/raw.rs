//! Low-level input collection: crossterm polling, mouse wheel coalescing, and
//! translation into primitive events that the higher-level input service can consume.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default coalescing window in milliseconds for wheel events.
const DEFAULT_COALESCE_WINDOW_MS: u64 = 12;
/// Number of lines produced by a single mouse wheel tick.
const MOUSE_SCROLL_LINES: u64 = 3;
/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Direction for scroll coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Paste(String),
    Resize {
        width: u16,
        height: u16,
    },
    Scroll {
        direction: ScrollDirection,
        lines: u64,
    },
}

/// Aggregates bursts of same-direction wheel events into one larger step.
#[derive(Debug, Clone)]
pub struct InputCoalescer {
    window: Duration,
    pending: Option<PendingScroll>,
}

#[derive(Debug, Clone)]
struct PendingScroll {
    direction: ScrollDirection,
    lines: u64,
    last_event: Instant,
}

impl InputCoalescer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Register a wheel step, returning a previously queued scroll in the other direction.
    pub fn push(
        &mut self,
        direction: ScrollDirection,
        lines: u64,
        now: Instant,
    ) -> Option<(ScrollDirection, u64)> {
        match self.pending {
            Some(ref mut pending) if pending.direction == direction => {
                pending.lines = pending.lines.saturating_add(lines);
                pending.last_event = now;
                None
            }
            _ => {
                let flushed = self.flush();
                self.pending = Some(PendingScroll {
                    direction,
                    lines,
                    last_event: now,
                });
                flushed
            }
        }
    }

    /// Flush the accumulated scroll once the window has passed without new steps.
    pub fn flush_if_stale(&mut self, now: Instant) -> Option<(ScrollDirection, u64)> {
        match &self.pending {
            Some(pending) if now.duration_since(pending.last_event) >= self.window => self.flush(),
            _ => None,
        }
    }

    pub fn flush(&mut self) -> Option<(ScrollDirection, u64)> {
        self.pending
            .take()
            .map(|pending| (pending.direction, pending.lines))
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

/// Collector that polls crossterm for events and applies wheel coalescing.
#[derive(Debug)]
pub struct RawInputCollector {
    coalescer: InputCoalescer,
    pending_events: VecDeque<RawInputEvent>,
}

impl Default for RawInputCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(DEFAULT_COALESCE_WINDOW_MS))
    }

    /// Create a collector with a custom coalescing window (useful for tests).
    pub fn with_window(window: Duration) -> Self {
        Self {
            coalescer: InputCoalescer::new(window),
            pending_events: VecDeque::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.pending_events.is_empty() && self.coalescer.is_empty()
    }

    /// Feed a synthetic event (primarily used by unit tests).
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Next ready event without polling the terminal.
    ///
    /// A stale wheel burst is emitted ahead of queued events; a fresh one keeps
    /// accumulating until a non-wheel event forces it out.
    pub fn try_flush(&mut self) -> Option<RawInputEvent> {
        self.coalescer
            .flush_if_stale(Instant::now())
            .map(|(direction, lines)| RawInputEvent::Scroll { direction, lines })
            .or_else(|| self.pending_events.pop_front())
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.try_flush() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        if event::poll(poll_timeout)? {
            let event = event::read()?;
            self.enqueue_event(event);
        }
        Ok(self.try_flush())
    }

    fn enqueue_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                self.flush_pending_scroll();
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Paste(text) => {
                self.flush_pending_scroll();
                self.pending_events.push_back(RawInputEvent::Paste(text));
            }
            Event::Resize(width, height) => {
                self.flush_pending_scroll();
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let direction = match mouse_event.kind {
            MouseEventKind::ScrollUp => ScrollDirection::Up,
            MouseEventKind::ScrollDown => ScrollDirection::Down,
            _ => return,
        };

        if let Some((flushed_dir, lines)) =
            self.coalescer
                .push(direction, MOUSE_SCROLL_LINES, Instant::now())
        {
            self.pending_events.push_back(RawInputEvent::Scroll {
                direction: flushed_dir,
                lines,
            });
        }
    }

    fn flush_pending_scroll(&mut self) {
        if let Some((direction, lines)) = self.coalescer.flush() {
            self.pending_events
                .push_back(RawInputEvent::Scroll { direction, lines });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn wheel(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn accumulates_same_direction_within_window() {
        let mut collector = RawInputCollector::with_window(Duration::from_millis(10));
        collector.process_event(wheel(MouseEventKind::ScrollDown));
        collector.process_event(wheel(MouseEventKind::ScrollDown));
        assert!(collector.try_flush().is_none());

        std::thread::sleep(Duration::from_millis(11));
        assert_eq!(
            collector.try_flush(),
            Some(RawInputEvent::Scroll {
                direction: ScrollDirection::Down,
                lines: 6
            })
        );
        assert!(collector.is_idle());
    }

    #[test]
    fn direction_change_flushes_previous_burst() {
        let mut coalescer = InputCoalescer::new(Duration::from_millis(10));
        let now = Instant::now();

        assert!(coalescer.push(ScrollDirection::Up, 1, now).is_none());
        let flushed = coalescer
            .push(ScrollDirection::Down, 1, now + Duration::from_millis(3))
            .unwrap();
        assert_eq!(flushed, (ScrollDirection::Up, 1));
        assert_eq!(
            coalescer.flush_if_stale(now + Duration::from_millis(20)),
            Some((ScrollDirection::Down, 1))
        );
    }

    #[test]
    fn key_press_forces_pending_scroll_out_first() {
        let mut collector = RawInputCollector::new();
        collector.process_event(wheel(MouseEventKind::ScrollUp));
        collector.process_event(Event::Key(KeyEvent::new(
            KeyCode::Char('j'),
            KeyModifiers::NONE,
        )));

        assert!(matches!(
            collector.try_flush(),
            Some(RawInputEvent::Scroll {
                direction: ScrollDirection::Up,
                lines: 3
            })
        ));
        match collector.try_flush() {
            Some(RawInputEvent::Key(key)) => assert_eq!(key.code, KeyCode::Char('j')),
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn paste_and_resize_are_queued_in_order() {
        let mut collector = RawInputCollector::new();
        collector.process_event(Event::Paste("react".to_string()));
        collector.process_event(Event::Resize(80, 40));

        assert_eq!(
            collector.try_flush(),
            Some(RawInputEvent::Paste("react".to_string()))
        );
        assert_eq!(
            collector.try_flush(),
            Some(RawInputEvent::Resize {
                width: 80,
                height: 40
            })
        );
    }

    #[test]
    fn key_releases_are_dropped() {
        let mut collector = RawInputCollector::new();
        let mut release = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        collector.process_event(Event::Key(release));
        assert!(collector.is_idle());
    }
}
