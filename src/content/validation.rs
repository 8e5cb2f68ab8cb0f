//! Validation for content documents and the paths they are loaded from.
//!
//! A store that passes [`validate_store`] is guaranteed to produce a search index with
//! unique, non-empty record ids.

use crate::content::model::ContentStore;
use crate::error::{FolioError, Result};
use std::collections::HashSet;
use std::path::Path;

/// Largest content document accepted, on disk and after decompression
pub const MAX_DOCUMENT_SIZE: u64 = 16 * 1024 * 1024;

/// Skill levels are percentages
pub const MAX_SKILL_LEVEL: u8 = 100;
/// Testimonial ratings are out of five stars
pub const MAX_RATING: u8 = 5;

/// Validate that a content path is a readable regular file of reasonable size
pub fn validate_content_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(FolioError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| FolioError::file_error("Failed to read content file metadata", e))?;

    if !metadata.is_file() {
        return Err(FolioError::file_error(
            format!("Path is not a file: {}", path.display()),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "Not a file"),
        ));
    }

    if metadata.len() == 0 {
        return Err(FolioError::content(format!(
            "content file is empty: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_DOCUMENT_SIZE {
        return Err(FolioError::content(format!(
            "content file is too large ({} bytes): {}",
            metadata.len(),
            path.display()
        )));
    }

    Ok(())
}

/// Check the invariants the search index depends on.
///
/// Every item needs a non-empty id, and ids must be unique within their collection so
/// that the type-prefixed record ids are unique across the whole store. Skill levels and
/// testimonial ratings must be in range, since the index publishes them verbatim.
pub fn validate_store(store: &ContentStore) -> Result<()> {
    let mut seen = HashSet::new();

    let ids = store
        .projects
        .iter()
        .map(|p| ("project", p.id.as_str()))
        .chain(store.posts.iter().map(|p| ("blog", p.id.as_str())))
        .chain(store.skills.iter().map(|s| ("skill", s.id.as_str())))
        .chain(
            store
                .achievements
                .iter()
                .map(|a| ("achievement", a.id.as_str())),
        )
        .chain(
            store
                .testimonials
                .iter()
                .map(|t| ("testimonial", t.id.as_str())),
        );

    for (prefix, id) in ids {
        if id.trim().is_empty() {
            return Err(FolioError::content(format!("{prefix} with an empty id")));
        }
        let record_id = format!("{prefix}-{id}");
        if !seen.insert(record_id.clone()) {
            return Err(FolioError::content(format!("duplicate id `{record_id}`")));
        }
    }

    if let Some(skill) = store.skills.iter().find(|s| s.level > MAX_SKILL_LEVEL) {
        return Err(FolioError::content(format!(
            "skill `{}` has level {} (maximum {MAX_SKILL_LEVEL})",
            skill.id, skill.level
        )));
    }

    for testimonial in &store.testimonials {
        if let Some(rating) = testimonial.rating.filter(|&r| r > MAX_RATING) {
            return Err(FolioError::content(format!(
                "testimonial `{}` has rating {rating} (maximum {MAX_RATING})",
                testimonial.id
            )));
        }
    }

    Ok(())
}
