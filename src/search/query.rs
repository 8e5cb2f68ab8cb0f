//! Query evaluation: filter, rank and cap.
//!
//! A record matches when the case-folded query is a substring of its title, content,
//! category or any metadata value. Title matches rank ahead of everything else; the
//! sort is stable so ties keep index order. At most [`MAX_RESULTS`] records are
//! returned, and a blank query returns nothing rather than everything.

use crate::search::index::{FoldedFields, SearchIndex, SearchRecord};
use memchr::memmem::{self, Finder};

/// Upper bound on the number of results returned for one query
pub const MAX_RESULTS: usize = 10;

/// Trim and case-fold a raw query; `None` when nothing is left to search for
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    Title,
    Body,
}

fn match_kind(fields: &FoldedFields, finder: &Finder<'_>) -> Option<MatchKind> {
    let hit = |text: &str| finder.find(text.as_bytes()).is_some();

    if hit(&fields.title) {
        Some(MatchKind::Title)
    } else if hit(&fields.content)
        || fields.category.as_deref().is_some_and(hit)
        || fields.metadata.iter().any(|value| hit(value))
    {
        Some(MatchKind::Body)
    } else {
        None
    }
}

impl SearchIndex {
    /// Positions of the ranked, capped results for `raw`
    pub fn query_positions(&self, raw: &str) -> Vec<usize> {
        let Some(needle) = normalize_query(raw) else {
            return Vec::new();
        };
        let finder = Finder::new(needle.as_bytes());

        let mut hits: Vec<(usize, MatchKind)> = self
            .folded
            .iter()
            .enumerate()
            .filter_map(|(position, fields)| {
                match_kind(fields, &finder).map(|kind| (position, kind))
            })
            .collect();

        // stable: ties keep index order
        hits.sort_by_key(|&(_, kind)| kind != MatchKind::Title);
        hits.truncate(MAX_RESULTS);
        hits.into_iter().map(|(position, _)| position).collect()
    }

    /// Ranked, capped records matching `raw`
    pub fn query(&self, raw: &str) -> Vec<&SearchRecord> {
        self.query_positions(raw)
            .into_iter()
            .filter_map(|position| self.get(position))
            .collect()
    }
}

/// Byte ranges of case-insensitive occurrences of `query` in `text`.
///
/// Ranges index into `text` itself. When case folding changes the byte length of
/// `text` the folded offsets no longer line up, so no ranges are returned.
pub fn highlight_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };
    let folded = text.to_lowercase();
    if folded.len() != text.len() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut last_end = 0;
    for start in memmem::find_iter(folded.as_bytes(), needle.as_bytes()) {
        if start < last_end {
            continue;
        }
        let end = start + needle.len();
        if text.is_char_boundary(start) && text.is_char_boundary(end) {
            ranges.push((start, end));
            last_end = end;
        }
    }
    ranges
}
