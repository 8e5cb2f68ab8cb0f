//! Search index construction.
//!
//! Every content item becomes exactly one [`SearchRecord`]. Records are emitted in
//! declaration order, grouped by type: projects, blog posts, skills, achievements,
//! testimonials. The index is built in one pass and never updated incrementally.

use crate::content::{Achievement, BlogPost, ContentStore, Project, Skill, Testimonial};
use crate::section::Section;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of content a record was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Project,
    Blog,
    Skill,
    Achievement,
    Testimonial,
}

impl RecordType {
    /// Prefix used for record ids
    pub fn prefix(self) -> &'static str {
        match self {
            RecordType::Project => "project",
            RecordType::Blog => "blog",
            RecordType::Skill => "skill",
            RecordType::Achievement => "achievement",
            RecordType::Testimonial => "testimonial",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Normalized unit of searchable content derived from one source item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub record_type: RecordType,
    pub category: Option<String>,
    /// Section anchor to navigate to when the record is selected
    pub target: String,
    pub metadata: BTreeMap<String, String>,
}

/// Case-folded copies of the matchable fields of one record
#[derive(Debug, Clone)]
pub(crate) struct FoldedFields {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: Option<String>,
    pub(crate) metadata: Vec<String>,
}

impl FoldedFields {
    fn new(record: &SearchRecord) -> Self {
        Self {
            title: record.title.to_lowercase(),
            content: record.content.to_lowercase(),
            category: record.category.as_ref().map(|c| c.to_lowercase()),
            metadata: record.metadata.values().map(|v| v.to_lowercase()).collect(),
        }
    }
}

/// Immutable, ordered set of search records
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    records: Vec<SearchRecord>,
    pub(crate) folded: Vec<FoldedFields>,
}

impl SearchIndex {
    /// Build an index from already-flattened records, preserving their order
    pub fn from_records(records: Vec<SearchRecord>) -> Self {
        let folded = records.iter().map(FoldedFields::new).collect();
        Self { records, folded }
    }

    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    pub fn get(&self, position: usize) -> Option<&SearchRecord> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Flatten the content store into a search index
pub fn build_index(store: &ContentStore) -> SearchIndex {
    let mut records = Vec::with_capacity(store.item_count());
    records.extend(store.projects.iter().map(project_record));
    records.extend(store.posts.iter().map(post_record));
    records.extend(store.skills.iter().map(skill_record));
    records.extend(store.achievements.iter().map(achievement_record));
    records.extend(store.testimonials.iter().map(testimonial_record));

    log::debug!("built search index with {} records", records.len());
    SearchIndex::from_records(records)
}

fn join_text<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn record(
    record_type: RecordType,
    id: &str,
    title: &str,
    content: String,
    category: Option<&str>,
    target: Section,
    metadata: BTreeMap<String, String>,
) -> SearchRecord {
    SearchRecord {
        id: format!("{}-{}", record_type.prefix(), id),
        title: title.to_string(),
        content,
        record_type,
        category: category.map(str::to_string),
        target: target.anchor().to_string(),
        metadata,
    }
}

fn project_record(project: &Project) -> SearchRecord {
    let technologies = project.technologies.join(", ");
    let content = join_text(
        [
            project.description.as_str(),
            project.long_description.as_str(),
        ]
        .into_iter()
        .chain(project.technologies.iter().map(String::as_str)),
    );

    let mut metadata = BTreeMap::new();
    metadata.insert("status".to_string(), project.status.label().to_string());
    if let Some(year) = project.year {
        metadata.insert("year".to_string(), year.to_string());
    }
    if !technologies.is_empty() {
        metadata.insert("technologies".to_string(), technologies);
    }

    record(
        RecordType::Project,
        &project.id,
        &project.title,
        content,
        Some(&project.category),
        Section::Projects,
        metadata,
    )
}

fn post_record(post: &BlogPost) -> SearchRecord {
    let content = join_text(
        std::iter::once(post.excerpt.as_str()).chain(post.tags.iter().map(String::as_str)),
    );

    let mut metadata = BTreeMap::new();
    metadata.insert("date".to_string(), post.date.clone());
    metadata.insert(
        "read_time".to_string(),
        format!("{} min read", post.read_time),
    );

    record(
        RecordType::Blog,
        &post.id,
        &post.title,
        content,
        Some(&post.category),
        Section::Blog,
        metadata,
    )
}

fn skill_record(skill: &Skill) -> SearchRecord {
    let content = join_text([skill.category.as_str(), skill.description.as_str()]);

    let mut metadata = BTreeMap::new();
    metadata.insert("level".to_string(), format!("{}%", skill.level));
    if let Some(years) = skill.years {
        metadata.insert("years".to_string(), years.to_string());
    }

    record(
        RecordType::Skill,
        &skill.id,
        &skill.name,
        content,
        Some(&skill.category),
        Section::Skills,
        metadata,
    )
}

fn achievement_record(achievement: &Achievement) -> SearchRecord {
    let content = join_text([
        achievement.description.as_str(),
        achievement.issuer.as_deref().unwrap_or_default(),
    ]);

    let mut metadata = BTreeMap::new();
    if let Some(date) = &achievement.date {
        metadata.insert("date".to_string(), date.clone());
    }
    if let Some(issuer) = &achievement.issuer {
        metadata.insert("issuer".to_string(), issuer.clone());
    }

    record(
        RecordType::Achievement,
        &achievement.id,
        &achievement.title,
        content,
        Some(&achievement.category),
        Section::About,
        metadata,
    )
}

fn testimonial_record(testimonial: &Testimonial) -> SearchRecord {
    let content = join_text([
        testimonial.quote.as_str(),
        testimonial.role.as_str(),
        testimonial.company.as_str(),
    ]);

    let mut metadata = BTreeMap::new();
    metadata.insert("role".to_string(), testimonial.role.clone());
    metadata.insert("company".to_string(), testimonial.company.clone());

    record(
        RecordType::Testimonial,
        &testimonial.id,
        &testimonial.name,
        content,
        None,
        Section::Testimonials,
        metadata,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::parse_document;
    use std::collections::HashSet;
    use std::path::Path;

    const DOC: &str = r#"
        [[project]]
        id = "ecotracker"
        title = "EcoTracker"
        description = "Carbon tracker"
        category = "Mobile"
        technologies = ["Flutter", "Firebase"]
        year = 2023

        [[post]]
        id = "rsc"
        title = "Server Components"
        excerpt = "Rendering on the server"
        category = "Frontend"
        tags = ["react"]
        date = "2024-05-12"
        read_time = 9

        [[skill]]
        id = "react"
        name = "React"
        category = "Frontend"
        level = 95

        [[achievement]]
        id = "aws"
        title = "AWS Certified"
        description = "Architecture exam"
        category = "Certification"
        issuer = "Amazon"

        [[testimonial]]
        id = "sarah"
        name = "Sarah Chen"
        role = "Manager"
        company = "Northwind"
        quote = "Great work"
    "#;

    fn index() -> SearchIndex {
        build_index(&parse_document(Path::new("test"), DOC).unwrap())
    }

    #[test]
    fn one_record_per_item_in_type_order() {
        let index = index();
        let types: Vec<_> = index.records().iter().map(|r| r.record_type).collect();
        assert_eq!(
            types,
            vec![
                RecordType::Project,
                RecordType::Blog,
                RecordType::Skill,
                RecordType::Achievement,
                RecordType::Testimonial,
            ]
        );
    }

    #[test]
    fn ids_are_prefixed_and_unique() {
        let index = index();
        let ids: Vec<_> = index.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "project-ecotracker",
                "blog-rsc",
                "skill-react",
                "achievement-aws",
                "testimonial-sarah"
            ]
        );
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
    }

    #[test]
    fn project_fields_flow_into_record() {
        let index = index();
        let project = index.get(0).unwrap();
        assert_eq!(project.title, "EcoTracker");
        assert_eq!(project.content, "Carbon tracker Flutter Firebase");
        assert_eq!(project.category.as_deref(), Some("Mobile"));
        assert_eq!(project.target, "projects");
        assert_eq!(project.metadata["status"], "completed");
        assert_eq!(project.metadata["year"], "2023");
        assert_eq!(project.metadata["technologies"], "Flutter, Firebase");
    }

    #[test]
    fn type_specific_targets_and_metadata() {
        let index = index();
        assert_eq!(index.get(1).unwrap().metadata["read_time"], "9 min read");
        assert_eq!(index.get(2).unwrap().metadata["level"], "95%");
        assert_eq!(index.get(3).unwrap().target, "about");
        let testimonial = index.get(4).unwrap();
        assert_eq!(testimonial.category, None);
        assert_eq!(testimonial.target, "testimonials");
        assert_eq!(testimonial.content, "Great work Manager Northwind");
    }

    #[test]
    fn empty_store_builds_empty_index() {
        assert!(build_index(&ContentStore::default()).is_empty());
    }
}
