//! Common types used across seolens

use serde::{Deserialize, Serialize};

use crate::error::SeoError;

/// On-page SEO signals extracted from a single HTML document.
///
/// Produced by a [`crate::provider::PageDataProvider`] and consumed by the
/// scoring engine. Empty strings are normalized away by the provider for the
/// presence-only fields (canonical, robots, Open Graph, Twitter); `title` and
/// `meta_description` keep an empty value so the rubric can tell "empty"
/// from "missing".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageAttributes {
    pub url: String,
    pub status_code: u16,
    /// Seconds, rounded to two decimals
    pub load_time: f64,
    pub page_size_kb: f64,

    // Meta tags
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub canonical_url: Option<String>,
    pub meta_robots: Option<String>,

    // Open Graph
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,

    // Twitter cards
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,

    // Headings (non-empty texts only)
    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,
    pub h3_tags: Vec<String>,
    pub h4_tags: Vec<String>,

    // Images
    pub images: usize,
    pub images_with_alt: usize,
    pub images_without_alt: usize,

    // Links
    pub internal_links: usize,
    pub external_links: usize,

    // Content
    pub word_count: usize,
    pub paragraph_count: usize,
    /// First 3000 characters of visible text
    pub text_content: String,

    // Technical
    pub has_https: bool,
    pub has_viewport: bool,
    pub has_favicon: bool,
    pub has_charset: bool,
    /// Value of `<html lang>`, when declared
    pub language: Option<String>,

    // Structured data
    pub has_schema: bool,
    pub schema_types: Vec<String>,
}

impl PageAttributes {
    /// Title length in characters, if a title element exists
    pub fn title_length(&self) -> Option<usize> {
        self.title.as_deref().map(|t| t.chars().count())
    }

    /// Meta description length in characters, if one exists
    pub fn meta_description_length(&self) -> Option<usize> {
        self.meta_description.as_deref().map(|d| d.chars().count())
    }

    pub fn has_language(&self) -> bool {
        self.language.is_some()
    }

    /// Number of og:title / og:description / og:image tags present
    pub fn open_graph_count(&self) -> usize {
        [&self.og_title, &self.og_description, &self.og_image]
            .into_iter()
            .filter(|tag| tag.is_some())
            .count()
    }

    pub fn first_h1(&self) -> Option<&str> {
        self.h1_tags.first().map(String::as_str)
    }
}

/// Input to the scoring engine: either extracted attributes or the message
/// explaining why the page could not be retrieved or parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageData {
    Ready(Box<PageAttributes>),
    Error(String),
}

impl PageData {
    pub fn attributes(&self) -> Option<&PageAttributes> {
        match self {
            Self::Ready(attrs) => Some(attrs),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Error(message) => Some(message),
        }
    }
}

impl From<PageAttributes> for PageData {
    fn from(attrs: PageAttributes) -> Self {
        Self::Ready(Box::new(attrs))
    }
}

impl From<Result<PageAttributes, SeoError>> for PageData {
    fn from(result: Result<PageAttributes, SeoError>) -> Self {
        match result {
            Ok(attrs) => attrs.into(),
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

/// The four scored rubric groups, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MetaTags,
    Content,
    Technical,
    Social,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::MetaTags,
        Category::Content,
        Category::Technical,
        Category::Social,
    ];

    pub fn max_points(self) -> u32 {
        match self {
            Self::MetaTags => 30,
            Self::Content => 35,
            Self::Technical => 25,
            Self::Social => 10,
        }
    }

    /// Key used in serialized reports
    pub fn key(self) -> &'static str {
        match self {
            Self::MetaTags => "meta_tags",
            Self::Content => "content",
            Self::Technical => "technical",
            Self::Social => "social",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::MetaTags => "Meta Tags",
            Self::Content => "Content",
            Self::Technical => "Technical",
            Self::Social => "Social & Images",
        }
    }
}

/// One value per category. Used for both points and percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub meta_tags: u32,
    pub content: u32,
    pub technical: u32,
    pub social: u32,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::MetaTags => self.meta_tags,
            Category::Content => self.content,
            Category::Technical => self.technical,
            Category::Social => self.social,
        }
    }

    pub fn set(&mut self, category: Category, value: u32) {
        match category {
            Category::MetaTags => self.meta_tags = value,
            Category::Content => self.content = value,
            Category::Technical => self.technical = value,
            Category::Social => self.social = value,
        }
    }

    pub fn total(&self) -> u32 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Result of scoring one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Sum of the four category scores, 0..=100
    pub score: u32,
    pub category_scores: CategoryScores,
    pub category_percentages: CategoryScores,
    /// In rubric evaluation order
    pub issues: Vec<String>,
    /// In rubric evaluation order
    pub strengths: Vec<String>,
}

/// Scores below this trigger content suggestions
pub const ADVICE_THRESHOLD: u32 = 70;

impl ScoreReport {
    /// Zero report carrying a fetch/parse failure as its only issue
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            issues: vec![message.into()],
            ..Self::default()
        }
    }

    pub fn needs_advice(&self) -> bool {
        self.score < ADVICE_THRESHOLD
    }
}
