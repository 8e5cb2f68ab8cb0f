//! Typed portfolio content.
//!
//! The model mirrors the on-disk TOML document one-to-one so `serde` can parse it
//! directly. Every collection keeps declaration order; the search index and the
//! section renderers both rely on that order.

use crate::content::icon::Icon;
use serde::{Deserialize, Serialize};

/// The complete portfolio document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentStore {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default, rename = "project")]
    pub projects: Vec<Project>,
    #[serde(default, rename = "post")]
    pub posts: Vec<BlogPost>,
    #[serde(default, rename = "skill")]
    pub skills: Vec<Skill>,
    #[serde(default, rename = "achievement")]
    pub achievements: Vec<Achievement>,
    #[serde(default, rename = "testimonial")]
    pub testimonials: Vec<Testimonial>,
}

impl ContentStore {
    /// Total number of searchable items across all collections
    pub fn item_count(&self) -> usize {
        self.projects.len()
            + self.posts.len()
            + self.skills.len()
            + self.achievements.len()
            + self.testimonials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

/// Biography and contact details shown in the About and Contact sections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub bio: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "link")]
    pub links: Vec<ContactLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub icon: Icon,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Completed,
    InProgress,
    Planned,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in progress",
            Self::Planned => "planned",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publication date as written in the document (`YYYY-MM-DD`)
    pub date: String,
    /// Estimated reading time in minutes
    pub read_time: u32,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Proficiency in percent (0-100)
    pub level: u8,
    #[serde(default)]
    pub years: Option<u8>,
    #[serde(default)]
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    pub company: String,
    pub quote: String,
    /// Star rating out of 5
    #[serde(default)]
    pub rating: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let doc = r#"
            [profile]
            name = "Ada"

            [[project]]
            id = "devflow"
            title = "DevFlow"
            description = "Workflow board"
            category = "Web"
            status = "in-progress"

            [[skill]]
            id = "react"
            name = "React"
            category = "Frontend"
            level = 90
            icon = "code"
        "#;

        let store: ContentStore = toml::from_str(doc).unwrap();
        assert_eq!(store.profile.name, "Ada");
        assert_eq!(store.projects[0].status, ProjectStatus::InProgress);
        assert_eq!(store.skills[0].icon, Icon::Code);
        assert!(store.posts.is_empty());
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn status_labels() {
        assert_eq!(ProjectStatus::Completed.label(), "completed");
        assert_eq!(ProjectStatus::InProgress.label(), "in progress");
        assert_eq!(ProjectStatus::Planned.label(), "planned");
    }
}
