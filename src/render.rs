//! Rendering subsystem.
//!
//! `protocol` defines the messages exchanged with the search worker, `service` is the
//! coordinator that applies input actions and worker responses to the view, and `ui`
//! draws the result.

pub mod protocol;
pub mod service;
pub mod ui;

pub use service::RenderLoopState;
