//! # folio - Terminal Portfolio Browser
//!
//! Presents a developer portfolio (profile, skills, projects, blog posts, achievements
//! and testimonials) as navigable terminal sections, with a global search palette over
//! all of it.
//!
//! ## Features
//!
//! - **Instant search**: case-insensitive substring search over every content item,
//!   title matches first, at most ten results
//! - **Keyboard palette**: focus-trapping result list with wrapping selection
//! - **Section filters**: category and tag filters for projects and posts
//! - **Themes and accessibility**: light/dark/system themes, high contrast, reduced
//!   motion, large text, persisted between runs
//! - **Compressed content**: portfolio documents may be gzip, bzip2, xz or zstd
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`content`] - Typed portfolio document and its sources
//! - [`search`] - Index builder, query engine, section filters and palette state machine
//! - [`prefs`] - Theme and accessibility preferences with change notification
//! - [`input`] - Terminal input collection and key mapping
//! - [`render`] - Render coordinator and terminal user interface
//! - [`app`] - Application core and component coordination

// Core modules
pub mod config;
pub mod content;
pub mod error;
pub mod section;

// Subsystems
pub mod input;
pub mod prefs;
pub mod render;

// Core components
pub mod app;
pub mod search;

// Re-export commonly used types for convenience
pub use error::{FolioError, Result};

// Public API surface for external usage
pub use app::Application;
pub use config::AppConfig;
pub use content::{ContentSource, ContentStore};
pub use search::{build_index, SearchIndex, SearchRecord};
pub use section::{Navigator, Section};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
