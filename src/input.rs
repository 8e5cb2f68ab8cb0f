//! Input subsystem.
//!
//! `raw` talks to crossterm and coalesces wheel bursts; `service` turns the resulting
//! events into [`InputAction`]s through the browse/search state machine.

pub mod raw;
pub mod service;

// Modules outside this crate should prefer importing from `crate::input` rather than
// reaching into submodules.
pub use raw::ScrollDirection;
pub use service::{InputAction, InputService, InputState, InputStateMachine};
