//! Content store: the read-only portfolio document.
//!
//! This module provides the typed portfolio model (profile, projects, posts, skills,
//! achievements, testimonials) and the sources it can be loaded from. Content is parsed
//! once at startup, validated, and then shared immutably behind an `Arc`.

pub mod compression;
pub mod icon;
pub mod loader;
pub mod model;
pub mod validation;

pub use icon::Icon;
pub use loader::{BuiltinContentSource, ContentSource, ContentSourceFactory, FileContentSource};
pub use model::{
    Achievement, BlogPost, ContactLink, ContentStore, Profile, Project, ProjectStatus, Skill,
    Testimonial,
};
pub use validation::validate_store;
