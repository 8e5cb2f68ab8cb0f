//! Section-level filtering for the Projects and Blog sections.
//!
//! These filters work directly on the typed content rather than the search index:
//! they narrow a section's list by category, tag and free text while the global
//! search stays independent of them. Featured items float to the top of the
//! filtered list; everything else keeps declaration order.

use crate::content::{BlogPost, Project};

/// Shown wherever a filter is unset
pub const UNFILTERED_LABEL: &str = "(all)";

/// Distinct values in first-seen order
pub fn distinct_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut options: Vec<String> = Vec::new();
    for value in values {
        if !options.iter().any(|existing| existing == value) {
            options.push(value.to_string());
        }
    }
    options
}

fn category_matches(selected: Option<&str>, category: &str) -> bool {
    match selected {
        None => true,
        Some(selected) => selected.eq_ignore_ascii_case(category),
    }
}

fn featured_first<T>(mut items: Vec<&T>, featured: impl Fn(&T) -> bool) -> Vec<&T> {
    items.sort_by_key(|item| !featured(*item));
    items
}

/// Filter state of the Projects section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub category: Option<String>,
}

impl ProjectFilter {
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        let selected = self.category.as_deref();
        let matching = projects
            .iter()
            .filter(|project| category_matches(selected, &project.category))
            .collect();
        featured_first(matching, |project| project.featured)
    }

    pub fn categories(projects: &[Project]) -> Vec<String> {
        distinct_values(projects.iter().map(|p| p.category.as_str()))
    }
}

/// Filter state of the Blog section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    pub category: Option<String>,
    pub tag: Option<String>,
    /// Free-text term matched against title, excerpt and tags
    pub term: String,
}

impl BlogFilter {
    pub fn apply<'a>(&self, posts: &'a [BlogPost]) -> Vec<&'a BlogPost> {
        let selected = self.category.as_deref();
        let term = self.term.trim().to_lowercase();

        let matching = posts
            .iter()
            .filter(|post| category_matches(selected, &post.category))
            .filter(|post| match &self.tag {
                Some(tag) => post.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)),
                None => true,
            })
            .filter(|post| {
                term.is_empty()
                    || post.title.to_lowercase().contains(&term)
                    || post.excerpt.to_lowercase().contains(&term)
                    || post.tags.iter().any(|t| t.to_lowercase().contains(&term))
            })
            .collect();
        featured_first(matching, |post| post.featured)
    }

    pub fn categories(posts: &[BlogPost]) -> Vec<String> {
        distinct_values(posts.iter().map(|p| p.category.as_str()))
    }

    /// Every tag used by any post, in first-seen order
    pub fn tags(posts: &[BlogPost]) -> Vec<String> {
        distinct_values(posts.iter().flat_map(|p| p.tags.iter().map(String::as_str)))
    }

    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.tag.is_some() || !self.term.trim().is_empty()
    }
}

/// Advance a selection through `options`; `None` is the unfiltered stop between the
/// last option and the first
pub fn cycle_option(current: Option<&str>, options: &[String]) -> Option<String> {
    let position: Option<usize> =
        current.and_then(|value| options.iter().position(|option| option == value));
    let next = match position {
        None => 0,
        Some(position) => position + 1,
    };
    options.get(next).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, category: &str, featured: bool) -> Project {
        Project {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            long_description: String::new(),
            category: category.to_string(),
            technologies: Vec::new(),
            status: Default::default(),
            year: None,
            repository: None,
            demo: None,
            featured,
        }
    }

    fn post(id: &str, category: &str, tags: &[&str], featured: bool) -> BlogPost {
        BlogPost {
            id: id.to_string(),
            title: format!("About {id}"),
            excerpt: String::new(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: "2024-01-01".to_string(),
            read_time: 5,
            featured,
        }
    }

    fn project_ids(items: &[&Project]) -> Vec<String> {
        items.iter().map(|p| p.id.clone()).collect()
    }

    fn post_ids(items: &[&BlogPost]) -> Vec<String> {
        items.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn project_categories_are_first_seen() {
        let projects = vec![
            project("a", "Web", false),
            project("b", "Mobile", false),
            project("c", "Web", false),
        ];
        assert_eq!(
            ProjectFilter::categories(&projects),
            vec!["Web", "Mobile"]
        );
    }

    #[test]
    fn project_filter_by_category_keeps_featured_first() {
        let projects = vec![
            project("a", "Web", false),
            project("b", "Mobile", true),
            project("c", "Web", true),
        ];

        let all = ProjectFilter::default().apply(&projects);
        assert_eq!(project_ids(&all), vec!["b", "c", "a"]);

        let web = ProjectFilter {
            category: Some("web".to_string()),
        }
        .apply(&projects);
        assert_eq!(project_ids(&web), vec!["c", "a"]);
    }

    #[test]
    fn category_named_all_is_an_ordinary_category() {
        let projects = vec![project("a", "All", false), project("b", "Web", false)];
        let only_all = ProjectFilter {
            category: Some("All".to_string()),
        }
        .apply(&projects);
        assert_eq!(project_ids(&only_all), vec!["a"]);
    }

    #[test]
    fn blog_filter_combines_category_tag_and_term() {
        let posts = vec![
            post("rsc", "Frontend", &["react", "ssr"], false),
            post("hooks", "Frontend", &["react"], false),
            post("pg", "Backend", &["postgresql"], true),
        ];

        let react = BlogFilter {
            tag: Some("React".to_string()),
            ..Default::default()
        };
        assert_eq!(post_ids(&react.apply(&posts)), vec!["rsc", "hooks"]);

        let narrowed = BlogFilter {
            category: Some("Frontend".to_string()),
            tag: Some("react".to_string()),
            term: "ssr".to_string(),
        };
        assert_eq!(post_ids(&narrowed.apply(&posts)), vec!["rsc"]);
        assert!(narrowed.is_active());

        let unfiltered = BlogFilter::default();
        assert!(!unfiltered.is_active());
        assert_eq!(
            post_ids(&unfiltered.apply(&posts)),
            vec!["pg", "rsc", "hooks"]
        );
    }

    #[test]
    fn tags_are_distinct_in_first_seen_order() {
        let posts = vec![
            post("a", "X", &["react", "ssr"], false),
            post("b", "X", &["ssr", "rust"], false),
        ];
        assert_eq!(BlogFilter::tags(&posts), vec!["react", "ssr", "rust"]);
    }

    #[test]
    fn cycling_wraps_back_to_no_filter() {
        let options = vec!["Web".to_string(), "Mobile".to_string()];
        assert_eq!(cycle_option(None, &options), Some("Web".to_string()));
        assert_eq!(
            cycle_option(Some("Web"), &options),
            Some("Mobile".to_string())
        );
        assert_eq!(cycle_option(Some("Mobile"), &options), None);
        assert_eq!(cycle_option(None, &[]), None);
    }

    #[test]
    fn tag_named_all_still_cycles_back_to_no_filter() {
        let posts = vec![post("a", "X", &["rust", "All"], false)];
        let tags = BlogFilter::tags(&posts);

        let mut current: Option<String> = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            current = cycle_option(current.as_deref(), &tags);
            seen.push(current.clone());
        }
        assert_eq!(
            seen,
            vec![
                Some("rust".to_string()),
                Some("All".to_string()),
                None,
                Some("rust".to_string()),
                Some("All".to_string()),
            ]
        );

        let filtered = BlogFilter {
            tag: Some("All".to_string()),
            ..Default::default()
        };
        assert_eq!(post_ids(&filtered.apply(&posts)), vec!["a"]);
    }

    #[test]
    fn unknown_current_value_restarts_at_first_option() {
        let options = vec!["Web".to_string()];
        assert_eq!(cycle_option(Some("Gone"), &options), Some("Web".to_string()));
    }
}
