//! Parsing of free-form advisor replies into [`Suggestions`]
//!
//! The model is asked to answer under fixed section headers. Replies are
//! matched line by line; anything outside a known section is ignored.

use super::{AdviceRequest, Suggestions, fallback};

const LIST_BULLETS: [char; 3] = ['-', '*', '•'];
const MIN_ITEM_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Title,
    MetaDescription,
    H1,
    Outline,
    Keywords,
    BlogTopics,
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        let upper = line.to_uppercase();
        if upper.contains("OPTIMIZED TITLE:") {
            Some(Self::Title)
        } else if upper.contains("OPTIMIZED META DESCRIPTION:") {
            Some(Self::MetaDescription)
        } else if upper.contains("IMPROVED H1:") {
            Some(Self::H1)
        } else if upper.contains("CONTENT OUTLINE:") {
            Some(Self::Outline)
        } else if upper.contains("TARGET KEYWORDS:")
            || (upper.contains("KEYWORDS:") && upper.contains("TARGET"))
        {
            Some(Self::Keywords)
        } else if upper.contains("BLOG TOPICS:") {
            Some(Self::BlogTopics)
        } else {
            None
        }
    }
}

/// Split a reply into its sections.
///
/// Header lines are consumed even when they carry trailing text. Single-line
/// sections keep the first plain line; list sections keep bulleted or
/// numbered lines with more than three characters after the marker.
pub fn parse_sections(text: &str) -> Suggestions {
    let mut suggestions = Suggestions::default();
    let mut current = None;

    for line in text.lines().map(str::trim) {
        if let Some(section) = Section::from_header(line) {
            current = Some(section);
            continue;
        }
        if line.is_empty() {
            continue;
        }

        match current {
            Some(Section::Title) => set_single(&mut suggestions.optimized_title, line),
            Some(Section::MetaDescription) => {
                set_single(&mut suggestions.optimized_meta_description, line)
            }
            Some(Section::H1) => set_single(&mut suggestions.improved_h1, line),
            Some(Section::Outline) => push_item(&mut suggestions.content_outline, line),
            Some(Section::Keywords) => push_item(&mut suggestions.keywords, line),
            Some(Section::BlogTopics) => push_item(&mut suggestions.blog_topics, line),
            None => {}
        }
    }

    suggestions
}

/// Fill every empty field from the page itself or from templates, then cap
/// the lists.
pub fn complete(mut suggestions: Suggestions, request: &AdviceRequest<'_>) -> Suggestions {
    let industry = request.industry;
    let page = request.page;

    if suggestions.optimized_title.is_empty() {
        suggestions.optimized_title = page
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("{industry} - Professional Services"));
    }
    if suggestions.optimized_meta_description.is_empty() {
        suggestions.optimized_meta_description = page
            .meta_description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("Leading {industry} services with professional expertise."));
    }
    if suggestions.improved_h1.is_empty() {
        suggestions.improved_h1 = page
            .first_h1()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Welcome to {industry} Services"));
    }
    if suggestions.content_outline.is_empty() {
        suggestions.content_outline = fallback::outline(industry);
    }
    if suggestions.keywords.is_empty() {
        suggestions.keywords = fallback::keywords(industry);
    }
    if suggestions.blog_topics.is_empty() {
        suggestions.blog_topics = fallback::blog_topics(industry);
    }

    suggestions.truncate_lists();
    suggestions
}

fn set_single(field: &mut String, line: &str) {
    if field.is_empty() && !line.starts_with(['-', '*', '•', '#']) {
        *field = line.to_string();
    }
}

fn push_item(items: &mut Vec<String>, line: &str) {
    if !is_list_item(line) {
        return;
    }
    let cleaned = line
        .trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '-' | '*' | '•' | '.' | ' '))
        .trim();
    if cleaned.chars().count() >= MIN_ITEM_CHARS {
        items.push(cleaned.to_string());
    }
}

fn is_list_item(line: &str) -> bool {
    if line.starts_with(LIST_BULLETS) {
        return true;
    }
    line.starts_with(|c: char| c.is_ascii_digit()) && line.chars().take(3).any(|c| c == '.')
}
