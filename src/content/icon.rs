//! Icon identifiers for content items.
//!
//! Content documents name icons by tag; the renderer looks each tag up in a fixed
//! glyph table. Two glyph sets exist so terminals without good Unicode coverage can
//! fall back to plain ASCII.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    #[default]
    Dot,
    Code,
    Database,
    Cloud,
    Design,
    Mobile,
    Award,
    Star,
    Book,
    Briefcase,
    Github,
    Linkedin,
    Twitter,
    Mail,
    Globe,
}

/// (unicode, ascii) glyph pairs, indexed by `Icon as usize`
const GLYPHS: [(&str, &str); 15] = [
    ("•", "*"),
    ("⌨", "<>"),
    ("⛁", "db"),
    ("☁", "~"),
    ("✎", "/"),
    ("▯", "[]"),
    ("✪", "@"),
    ("★", "*"),
    ("❏", "#"),
    ("▣", "$"),
    ("⌥", "gh"),
    ("in", "in"),
    ("✕", "x"),
    ("✉", "@"),
    ("◍", "www"),
];

impl Icon {
    /// Glyph for this icon; `unicode` selects the rich set
    pub fn glyph(self, unicode: bool) -> &'static str {
        let (rich, plain) = GLYPHS[self as usize];
        if unicode {
            rich
        } else {
            plain
        }
    }
}
