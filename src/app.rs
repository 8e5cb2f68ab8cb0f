//! Application orchestration layer
//!
//! Loads the content, builds the search index, and runs the interactive event loop that
//! ties the input thread, the search worker, preference changes and the animation tick
//! together. Each component keeps its own state; this module only moves messages.

pub mod runtime;

use crate::config::AppConfig;
use crate::content::{ContentSource, ContentSourceFactory, ContentStore};
use crate::error::Result;
use crate::prefs::PreferenceStore;
use crate::render::protocol::SearchCommand;
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use crate::render::RenderLoopState;
use crate::search::worker::search_worker_loop;
use crate::search::{build_index, SearchIndex, SearchRecord};
use futures::StreamExt;
use runtime::spawn_input_thread;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_stream::wrappers::WatchStream;

/// Capacity of the coordinator/worker channels
const SEARCH_CHANNEL_CAPACITY: usize = 32;

/// Content and the index built from it
pub struct LoadedContent {
    pub store: Arc<ContentStore>,
    pub index: Arc<SearchIndex>,
    /// Human-readable origin of the content
    pub description: String,
}

/// Load content from `path` (or the built-in sample) and index it
pub async fn load_content(path: Option<&Path>) -> Result<LoadedContent> {
    let source = ContentSourceFactory::create(path);
    let description = source.describe();
    let store = source.load().await?;

    let started = Instant::now();
    let index = build_index(&store);
    log::debug!(
        "indexed {} records from {} in {:?}",
        index.len(),
        description,
        started.elapsed()
    );

    Ok(LoadedContent {
        store: Arc::new(store),
        index: Arc::new(index),
        description,
    })
}

/// One line of non-interactive query output: `type  title  -> #target`
pub fn format_result_line(record: &SearchRecord) -> String {
    format!(
        "{:<12} {}  -> #{}",
        record.record_type.to_string(),
        record.title,
        record.target
    )
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Whether the locale advertises UTF-8 output
fn locale_is_utf8() -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|key| read_env(key))
        .find(|value| !value.is_empty())
        .map(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("utf-8") || value.contains("utf8")
        })
        .unwrap_or(false)
}

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    config: AppConfig,
    content: LoadedContent,
    prefs: Arc<PreferenceStore>,
    ui_renderer: Box<dyn UIRenderer>,
}

impl Application {
    /// Create application by loading content and wiring components together
    pub async fn new(
        config: AppConfig,
        prefs: Arc<PreferenceStore>,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Result<Self> {
        let content = load_content(config.content_path.as_deref()).await?;
        Ok(Self {
            config,
            content,
            prefs,
            ui_renderer,
        })
    }

    /// Run the interactive session until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(
            Arc::clone(&self.content.store),
            self.content.description.clone(),
            width,
            height,
        );
        view_state.unicode_icons = locale_is_utf8();

        let (search_tx, search_rx) = mpsc::channel(SEARCH_CHANNEL_CAPACITY);
        let (response_tx, mut response_rx) = mpsc::channel(SEARCH_CHANNEL_CAPACITY);
        let worker = tokio::spawn(search_worker_loop(
            search_rx,
            response_tx,
            Arc::clone(&self.content.index),
            self.config.worker_cache_size,
        ));

        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_handle = spawn_input_thread(
            input_tx,
            Arc::clone(&shutdown),
            self.config.input_poll_interval(),
        );

        // The first item is the current value, which also sets the initial theme
        let mut prefs_stream = WatchStream::new(self.prefs.subscribe());
        let mut ticker = tokio::time::interval(self.config.tick_interval());
        let mut render_state = RenderLoopState::new(Arc::clone(&self.prefs));

        let result = async {
            loop {
                let mut dirty = true;
                tokio::select! {
                    action = input_rx.recv() => match action {
                        Some(action) => {
                            if !render_state
                                .process_action(action, &mut view_state, &search_tx)
                                .await?
                            {
                                break;
                            }
                        }
                        None => {
                            log::warn!("input channel closed");
                            break;
                        }
                    },
                    Some(response) = response_rx.recv() => {
                        render_state.handle_response(response, &mut view_state);
                    }
                    Some(prefs) = prefs_stream.next() => {
                        view_state.apply_preferences(prefs);
                        self.ui_renderer
                            .set_theme(ColorTheme::for_preferences(&prefs, read_env));
                    }
                    _ = ticker.tick() => {
                        dirty = view_state.tick();
                    }
                }

                if dirty {
                    self.ui_renderer.render(&view_state)?;
                }
            }
            Ok::<(), crate::error::FolioError>(())
        }
        .await;

        shutdown.store(true, Ordering::SeqCst);
        let _ = search_tx.send(SearchCommand::Shutdown).await;
        if let Err(err) = worker.await {
            log::warn!("search worker ended abnormally: {}", err);
        }
        let _ = tokio::task::spawn_blocking(move || input_handle.join()).await;

        self.ui_renderer.cleanup()?;
        result
    }
}
