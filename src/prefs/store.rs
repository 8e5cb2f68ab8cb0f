//! Shared preference container with change notification and persistence.
//!
//! Readers take cheap snapshots; reactive consumers hold a `watch` receiver and see
//! every committed change. Persistence is best effort: a failed save is logged and the
//! in-memory state still changes.

use crate::error::{FolioError, Result};
use crate::prefs::accessibility::AccessibilityPreferences;
use crate::prefs::theme::ThemeMode;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: ThemeMode,
    pub accessibility: AccessibilityPreferences,
}

/// `<config dir>/folio/preferences.toml`
pub fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("preferences.toml"))
}

pub struct PreferenceStore {
    current: RwLock<Preferences>,
    notifier: watch::Sender<Preferences>,
    path: Option<PathBuf>,
}

impl PreferenceStore {
    /// Store that never touches the filesystem
    pub fn in_memory(initial: Preferences) -> Self {
        let (notifier, _) = watch::channel(initial);
        Self {
            current: RwLock::new(initial),
            notifier,
            path: None,
        }
    }

    /// Load from `path`, falling back to defaults when the file is missing or invalid
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = match read_preferences(&path) {
            Ok(Some(prefs)) => prefs,
            Ok(None) => Preferences::default(),
            Err(err) => {
                log::warn!("ignoring preferences at {}: {}", path.display(), err);
                Preferences::default()
            }
        };

        let mut store = Self::in_memory(initial);
        store.path = Some(path);
        store
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn snapshot(&self) -> Preferences {
        *self.current.read()
    }

    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.notifier.subscribe()
    }

    /// Apply `change`; subscribers are notified and the file rewritten only when the
    /// preferences actually differ afterwards. Saves on the calling thread.
    pub fn update(&self, change: impl FnOnce(&mut Preferences)) -> Preferences {
        match self.apply(change) {
            Ok(updated) => {
                if let Err(err) = self.save() {
                    log::warn!("failed to persist preferences: {}", err);
                }
                updated
            }
            Err(unchanged) => unchanged,
        }
    }

    /// Like [`update`](Self::update), but the file is written on the blocking pool so
    /// async callers never wait on disk I/O from a runtime worker thread
    pub async fn commit(self: &Arc<Self>, change: impl FnOnce(&mut Preferences)) -> Preferences {
        let updated = match self.apply(change) {
            Ok(updated) => updated,
            Err(unchanged) => return unchanged,
        };
        if self.path.is_none() {
            return updated;
        }

        let store = Arc::clone(self);
        match tokio::task::spawn_blocking(move || store.save()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => log::warn!("failed to persist preferences: {}", err),
            Err(err) => log::warn!("preferences save task failed: {}", err),
        }
        updated
    }

    /// Change the in-memory value and notify subscribers; `Err` carries the unchanged value
    fn apply(
        &self,
        change: impl FnOnce(&mut Preferences),
    ) -> std::result::Result<Preferences, Preferences> {
        let updated = {
            let mut current = self.current.write();
            let before = *current;
            change(&mut *current);
            if *current == before {
                return Err(before);
            }
            *current
        };
        self.notifier.send_replace(updated);
        Ok(updated)
    }

    /// Write the current preferences atomically; a no-op for in-memory stores
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let text = toml::to_string_pretty(&self.snapshot())
            .map_err(|e| FolioError::preferences(e.to_string()))?;

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent)
            .map_err(|e| FolioError::file_error("Failed to create preferences directory", e))?;

        let mut temp = NamedTempFile::new_in(parent)
            .map_err(|e| FolioError::file_error("Failed to create temp preferences file", e))?;
        temp.write_all(text.as_bytes())
            .map_err(|e| FolioError::file_error("Failed to write preferences", e))?;
        temp.persist(path)
            .map_err(|e| FolioError::file_error("Failed to replace preferences file", e.error))?;
        Ok(())
    }
}

fn read_preferences(path: &Path) -> Result<Option<Preferences>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(FolioError::file_error("Failed to read preferences", err)),
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|e| FolioError::preferences(e.message().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::accessibility::AccessibilityToggle;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::load(dir.path().join("preferences.toml"));
        assert_eq!(store.snapshot(), Preferences::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "theme = 42").unwrap();
        let store = PreferenceStore::load(&path);
        assert_eq!(store.snapshot(), Preferences::default());
    }

    #[test]
    fn updates_persist_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let store = PreferenceStore::load(&path);
        store.update(|prefs| {
            prefs.theme = ThemeMode::Light;
            AccessibilityToggle::ReducedMotion.apply(&mut prefs.accessibility);
        });
        assert!(path.exists());

        let reloaded = PreferenceStore::load(&path).snapshot();
        assert_eq!(reloaded.theme, ThemeMode::Light);
        assert!(reloaded.accessibility.reduced_motion);
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let store = PreferenceStore::in_memory(Preferences::default());
        let mut rx = store.subscribe();

        store.update(|prefs| prefs.theme = ThemeMode::Dark);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().theme, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn commit_persists_and_notifies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.toml");
        let store = Arc::new(PreferenceStore::load(&path));
        let mut rx = store.subscribe();

        let updated = store
            .commit(|prefs| {
                AccessibilityToggle::LargeText.apply(&mut prefs.accessibility);
            })
            .await;
        assert!(updated.accessibility.large_text);
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().accessibility.large_text);

        // Written by the time commit returns
        assert!(PreferenceStore::load(&path).snapshot().accessibility.large_text);

        let again = store.commit(|_| {}).await;
        assert_eq!(again, updated);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn unchanged_update_does_not_notify() {
        let store = PreferenceStore::in_memory(Preferences::default());
        let rx = store.subscribe();
        store.update(|_| {});
        assert!(!rx.has_changed().unwrap());
    }
}
