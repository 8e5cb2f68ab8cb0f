//! Section bodies rendered as styled lines.
//!
//! Text is wrapped here rather than by the paragraph widget so the view state can
//! compute scroll bounds from the same line list the terminal draws.

use crate::content::{Achievement, BlogPost, ContentStore, Project, Skill, Testimonial};
use crate::render::ui::state::ViewState;
use crate::render::ui::theme::ColorTheme;
use crate::search::filter::UNFILTERED_LABEL;
use crate::search::{BlogFilter, ProjectFilter};
use crate::section::Section;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Left indent of item bodies
const INDENT: usize = 2;
/// Narrowest width text is wrapped to
const MIN_WRAP_WIDTH: usize = 16;
/// Cells used by the skill level bar
const LEVEL_BAR_WIDTH: usize = 20;

/// Styled body lines for the section currently shown in `state`
pub fn section_lines(state: &ViewState, theme: &ColorTheme) -> Vec<Line<'static>> {
    let mut writer = SectionWriter::new(state, theme);
    let content: &ContentStore = &state.content;

    match state.section {
        Section::About => write_about(&mut writer, content),
        Section::Skills => write_skills(&mut writer, &content.skills),
        Section::Projects => write_projects(&mut writer, &content.projects, &state.project_filter),
        Section::Blog => write_blog(&mut writer, &content.posts, &state.blog_filter),
        Section::Testimonials => write_testimonials(&mut writer, &content.testimonials),
        Section::Contact => write_contact(&mut writer, content),
    }

    writer.lines
}

pub fn section_line_count(state: &ViewState) -> usize {
    section_lines(state, &ColorTheme::monochrome()).len()
}

/// Greedy word wrap on character counts; words longer than `width` are split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

struct SectionWriter<'a> {
    lines: Vec<Line<'static>>,
    theme: &'a ColorTheme,
    width: usize,
    item_spacing: usize,
    unicode: bool,
}

impl<'a> SectionWriter<'a> {
    fn new(state: &ViewState, theme: &'a ColorTheme) -> Self {
        let large_text = state.preferences.accessibility.large_text;
        Self {
            lines: Vec::new(),
            theme,
            width: (state.body_width() as usize)
                .saturating_sub(INDENT * 2)
                .max(MIN_WRAP_WIDTH),
            item_spacing: if large_text { 2 } else { 1 },
            unicode: state.unicode_icons,
        }
    }

    fn heading(&mut self, text: impl Into<String>) {
        self.lines
            .push(Line::from(Span::styled(text.into(), self.theme.heading)));
    }

    fn paragraph(&mut self, text: &str, style: Style) {
        let indent = " ".repeat(INDENT);
        for row in wrap_text(text, self.width) {
            self.lines
                .push(Line::from(Span::styled(format!("{indent}{row}"), style)));
        }
    }

    fn body(&mut self, text: &str) {
        let style = self.theme.text();
        self.paragraph(text, style);
    }

    fn muted(&mut self, text: &str) {
        let style = self.theme.muted;
        self.paragraph(text, style);
    }

    fn push(&mut self, spans: Vec<Span<'static>>) {
        self.lines.push(Line::from(spans));
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    /// Gap between list items; wider when large text is on
    fn item_gap(&mut self) {
        for _ in 0..self.item_spacing {
            self.blank();
        }
    }

    fn accent(&self, text: impl Into<String>) -> Span<'static> {
        Span::styled(text.into(), Style::default().fg(self.theme.accent))
    }

    fn title(&self, text: impl Into<String>) -> Span<'static> {
        Span::styled(
            text.into(),
            self.theme.text().add_modifier(Modifier::BOLD),
        )
    }

    fn muted_span(&self, text: impl Into<String>) -> Span<'static> {
        Span::styled(text.into(), self.theme.muted)
    }

    fn filter_bar(&mut self, parts: &[(&str, Option<&str>, char)]) {
        let mut spans = Vec::new();
        for (label, value, key) in parts {
            if !spans.is_empty() {
                spans.push(Span::raw("   "));
            }
            spans.push(self.muted_span(format!("{label}: ")));
            spans.push(self.accent(value.unwrap_or(UNFILTERED_LABEL).to_string()));
            spans.push(self.muted_span(format!(" ({key})")));
        }
        self.push(spans);
        self.blank();
    }
}

fn write_about(w: &mut SectionWriter, content: &ContentStore) {
    let profile = &content.profile;
    w.heading(profile.name.clone());
    if !profile.headline.is_empty() {
        w.body(&profile.headline);
    }
    if let Some(location) = &profile.location {
        w.muted(location);
    }
    w.blank();

    for paragraph in &profile.bio {
        w.body(paragraph);
        w.blank();
    }

    if content.achievements.is_empty() {
        return;
    }
    w.heading("Achievements");
    w.blank();
    for (i, achievement) in content.achievements.iter().enumerate() {
        if i > 0 {
            w.item_gap();
        }
        write_achievement(w, achievement);
    }
}

fn write_achievement(w: &mut SectionWriter, achievement: &Achievement) {
    let mut spans = vec![
        w.accent(format!("{} ", achievement.icon.glyph(w.unicode))),
        w.title(achievement.title.clone()),
    ];
    if let Some(date) = &achievement.date {
        spans.push(w.muted_span(format!("  {date}")));
    }
    w.push(spans);
    if let Some(issuer) = &achievement.issuer {
        w.muted(issuer);
    }
    w.body(&achievement.description);
}

fn write_skills(w: &mut SectionWriter, skills: &[Skill]) {
    let mut categories: Vec<&str> = Vec::new();
    for skill in skills {
        if !categories.contains(&skill.category.as_str()) {
            categories.push(&skill.category);
        }
    }

    for (i, category) in categories.iter().enumerate() {
        if i > 0 {
            w.item_gap();
        }
        w.heading(category.to_string());
        for skill in skills.iter().filter(|s| s.category == *category) {
            write_skill(w, skill);
        }
    }
}

fn write_skill(w: &mut SectionWriter, skill: &Skill) {
    let level = usize::from(skill.level.min(100));
    let filled = level * LEVEL_BAR_WIDTH / 100;
    let (full, empty) = if w.unicode { ("█", "░") } else { ("#", "-") };
    let bar = format!(
        "{}{}",
        full.repeat(filled),
        empty.repeat(LEVEL_BAR_WIDTH - filled)
    );

    let mut spans = vec![
        Span::raw(" ".repeat(INDENT)),
        w.accent(format!("{} ", skill.icon.glyph(w.unicode))),
        w.title(format!("{:<14}", skill.name)),
        w.accent(bar),
        w.muted_span(format!(" {level:>3}%")),
    ];
    if let Some(years) = skill.years {
        spans.push(w.muted_span(format!("  {years}y")));
    }
    w.push(spans);
    if !skill.description.is_empty() {
        w.muted(&format!("  {}", skill.description));
    }
}

fn write_projects(w: &mut SectionWriter, projects: &[Project], filter: &ProjectFilter) {
    w.filter_bar(&[("Category", filter.category.as_deref(), 'c')]);

    let visible = filter.apply(projects);
    if visible.is_empty() {
        w.muted("No projects match the current filter.");
        return;
    }

    for (i, project) in visible.iter().enumerate() {
        if i > 0 {
            w.item_gap();
        }
        write_project(w, project);
    }
}

fn write_project(w: &mut SectionWriter, project: &Project) {
    let mut spans = Vec::new();
    if project.featured {
        spans.push(w.accent(if w.unicode { "★ " } else { "* " }));
    }
    spans.push(w.title(project.title.clone()));
    let mut details = vec![project.category.clone(), project.status.label().to_string()];
    if let Some(year) = project.year {
        details.push(year.to_string());
    }
    spans.push(w.muted_span(format!("  {}", details.join(" · "))));
    w.push(spans);

    w.body(&project.description);
    if !project.long_description.is_empty() {
        w.muted(&project.long_description);
    }
    if !project.technologies.is_empty() {
        let line = vec![
            Span::raw(" ".repeat(INDENT)),
            w.accent(project.technologies.join(", ")),
        ];
        w.push(line);
    }
    for (label, link) in [("repo", &project.repository), ("demo", &project.demo)] {
        if let Some(url) = link {
            w.muted(&format!("{label}: {url}"));
        }
    }
}

fn write_blog(w: &mut SectionWriter, posts: &[BlogPost], filter: &BlogFilter) {
    w.filter_bar(&[
        ("Category", filter.category.as_deref(), 'c'),
        ("Tag", filter.tag.as_deref(), 'T'),
    ]);

    let visible = filter.apply(posts);
    if visible.is_empty() {
        w.muted("No posts match the current filter.");
        return;
    }

    for (i, post) in visible.iter().enumerate() {
        if i > 0 {
            w.item_gap();
        }
        let mut spans = Vec::new();
        if post.featured {
            spans.push(w.accent(if w.unicode { "★ " } else { "* " }));
        }
        spans.push(w.title(post.title.clone()));
        w.push(spans);
        w.muted(&format!(
            "{} · {} min read · {}",
            post.date, post.read_time, post.category
        ));
        w.body(&post.excerpt);
        if !post.tags.is_empty() {
            let tags: Vec<String> = post.tags.iter().map(|tag| format!("#{tag}")).collect();
            let line = vec![Span::raw(" ".repeat(INDENT)), w.accent(tags.join(" "))];
            w.push(line);
        }
    }
}

fn write_testimonials(w: &mut SectionWriter, testimonials: &[Testimonial]) {
    if testimonials.is_empty() {
        w.muted("No testimonials yet.");
        return;
    }
    for (i, testimonial) in testimonials.iter().enumerate() {
        if i > 0 {
            w.item_gap();
        }
        w.body(&format!("\"{}\"", testimonial.quote));

        let star = if w.unicode { "★" } else { "*" };
        let rating = usize::from(testimonial.rating.unwrap_or(0).min(5));
        let mut spans = vec![
            Span::raw(" ".repeat(INDENT)),
            w.title(format!("- {}", testimonial.name)),
            w.muted_span(format!(", {} at {}", testimonial.role, testimonial.company)),
        ];
        if rating > 0 {
            spans.push(w.accent(format!("  {}", star.repeat(rating))));
        }
        w.push(spans);
    }
}

fn write_contact(w: &mut SectionWriter, content: &ContentStore) {
    let profile = &content.profile;
    w.heading("Get in touch");
    w.blank();
    if let Some(email) = &profile.email {
        let spans = vec![
            Span::raw(" ".repeat(INDENT)),
            w.accent(format!("{} ", crate::content::Icon::Mail.glyph(w.unicode))),
            w.title(email.clone()),
        ];
        w.push(spans);
    }
    if let Some(location) = &profile.location {
        w.muted(location);
    }
    w.blank();
    for link in &profile.links {
        let spans = vec![
            Span::raw(" ".repeat(INDENT)),
            w.accent(format!("{} ", link.icon.glyph(w.unicode))),
            w.title(format!("{:<10}", link.label)),
            w.muted_span(link.url.clone()),
        ];
        w.push(spans);
    }
}
