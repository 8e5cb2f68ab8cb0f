//! Global search over the portfolio content.
//!
//! The index flattens every content collection into uniform [`SearchRecord`]s, the query
//! engine filters and ranks them, and the palette state machine drives keyboard
//! selection over the ranked results. A background worker answers queries for the
//! interactive UI.

pub mod filter;
pub mod index;
pub mod navigation;
pub mod query;
pub mod worker;

pub use filter::{BlogFilter, ProjectFilter};
pub use index::{build_index, RecordType, SearchIndex, SearchRecord};
pub use navigation::{PaletteEvent, PaletteKey, PaletteState, SearchPalette};
pub use query::{highlight_ranges, normalize_query, MAX_RESULTS};
pub use worker::search_worker_loop;
