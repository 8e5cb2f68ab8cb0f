//! Protocol definitions shared between the render coordinator and the search worker.

use crate::search::SearchRecord;

/// Identifier attached to cross-task requests so responses can be correlated.
pub type RequestId = u64;

/// One ranked result, with title match ranges precomputed for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub record: SearchRecord,
    pub title_highlights: Vec<(usize, usize)>,
}

/// Commands sent from the render coordinator to the search worker.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCommand {
    Query { request_id: RequestId, query: String },
    Shutdown,
}

/// Responses emitted by the search worker back to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    Results {
        request_id: RequestId,
        query: String,
        hits: Vec<SearchHit>,
    },
}
