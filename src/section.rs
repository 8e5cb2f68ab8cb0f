//! Portfolio sections and the navigation seam.
//!
//! Search results carry a target anchor rather than a reference into the UI; whatever
//! owns the view implements [`Navigator`] and resolves the anchor to a section.

/// The navigable sections of the portfolio, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Skills,
    Projects,
    Blog,
    Testimonials,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Blog,
        Section::Testimonials,
        Section::Contact,
    ];

    /// Anchor used as a search record target
    pub fn anchor(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Blog => "blog",
            Section::Testimonials => "testimonials",
            Section::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Blog => "Blog",
            Section::Testimonials => "Testimonials",
            Section::Contact => "Contact",
        }
    }

    /// Resolve an anchor, tolerating a leading `#`
    pub fn from_anchor(anchor: &str) -> Option<Section> {
        let anchor = anchor.strip_prefix('#').unwrap_or(anchor);
        Section::ALL
            .into_iter()
            .find(|section| section.anchor() == anchor)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next section, wrapping past the last
    pub fn next(self) -> Section {
        Section::ALL[(self.index() + 1) % Section::ALL.len()]
    }

    /// Previous section, wrapping before the first
    pub fn previous(self) -> Section {
        Section::ALL[(self.index() + Section::ALL.len() - 1) % Section::ALL.len()]
    }
}

/// Collaborator invoked when a search result is committed.
///
/// Returns false when the target does not name a known location.
pub trait Navigator {
    fn navigate_to(&mut self, target: &str) -> bool;
}
