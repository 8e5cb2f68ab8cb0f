use crate::render::protocol::{RequestId, SearchCommand, SearchHit, SearchResponse};
use crate::search::index::SearchIndex;
use crate::search::query::{highlight_ranges, normalize_query};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{Receiver, Sender};

/// Default number of distinct queries remembered by the worker
pub const DEFAULT_CACHE_SIZE: usize = 64;

/// Run the search worker processing commands from the coordinator.
pub async fn search_worker_loop(
    mut rx: Receiver<SearchCommand>,
    tx: Sender<SearchResponse>,
    index: Arc<SearchIndex>,
    cache_size: usize,
) {
    let mut state = WorkerState::new(index, cache_size);

    while let Some(cmd) = rx.recv().await {
        let outcome = state.handle_command(cmd);
        if let Some(response) = outcome.response {
            if tx.send(response).await.is_err() {
                break;
            }
        }

        if outcome.done {
            break;
        }
    }
}

struct WorkerState {
    index: Arc<SearchIndex>,
    cache: LruCache<String, Arc<[usize]>>,
}

impl WorkerState {
    fn new(index: Arc<SearchIndex>, cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            index,
            cache: LruCache::new(capacity),
        }
    }

    fn handle_command(&mut self, cmd: SearchCommand) -> HandlerOutcome {
        match cmd {
            SearchCommand::Query { request_id, query } => {
                HandlerOutcome::respond(self.execute_query(request_id, query))
            }
            SearchCommand::Shutdown => HandlerOutcome::exit(),
        }
    }

    fn execute_query(&mut self, request_id: RequestId, query: String) -> SearchResponse {
        let Some(normalized) = normalize_query(&query) else {
            return SearchResponse::Results {
                request_id,
                query,
                hits: Vec::new(),
            };
        };

        let positions = match self.cache.get(&normalized) {
            Some(positions) => {
                log::trace!("query cache hit for {normalized:?}");
                Arc::clone(positions)
            }
            None => {
                let started = Instant::now();
                let positions: Arc<[usize]> = self.index.query_positions(&normalized).into();
                log::debug!(
                    "query {:?} matched {} records in {:?}",
                    normalized,
                    positions.len(),
                    started.elapsed()
                );
                self.cache.put(normalized.clone(), Arc::clone(&positions));
                positions
            }
        };

        let hits = positions
            .iter()
            .filter_map(|&position| self.index.get(position))
            .map(|record| SearchHit {
                title_highlights: highlight_ranges(&record.title, &normalized),
                record: record.clone(),
            })
            .collect();

        SearchResponse::Results {
            request_id,
            query,
            hits,
        }
    }
}

struct HandlerOutcome {
    response: Option<SearchResponse>,
    done: bool,
}

impl HandlerOutcome {
    fn respond(response: SearchResponse) -> Self {
        Self {
            response: Some(response),
            done: false,
        }
    }

    fn exit() -> Self {
        Self {
            response: None,
            done: true,
        }
    }
}
