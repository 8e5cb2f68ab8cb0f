//! User preferences: colour theme and accessibility settings.
//!
//! Preferences live in a shared [`PreferenceStore`] that notifies subscribers on every
//! change and persists itself to a small TOML file.

pub mod accessibility;
pub mod store;
pub mod theme;

pub use accessibility::{AccessibilityPreferences, AccessibilityToggle};
pub use store::{default_preferences_path, PreferenceStore, Preferences};
pub use theme::{ResolvedTheme, ThemeMode};
