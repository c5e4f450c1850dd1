//! Content recommendations for low-scoring pages
//!
//! An [`Advisor`] produces [`Suggestions`] for a page. The AI-backed advisor
//! may be missing or failing; [`recommend`] checks availability up front and
//! degrades to the deterministic [`FallbackAdvisor`] so callers always get a
//! complete set of suggestions.

mod fallback;
#[cfg(feature = "http")]
mod gemini;
pub mod response;

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::types::PageAttributes;

pub use fallback::FallbackAdvisor;
#[cfg(feature = "http")]
pub use gemini::GeminiAdvisor;

pub const MAX_OUTLINE_ITEMS: usize = 7;
pub const MAX_KEYWORDS: usize = 8;
pub const MAX_BLOG_TOPICS: usize = 5;

/// Recommended rewrites and content ideas for one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub optimized_title: String,
    pub optimized_meta_description: String,
    pub improved_h1: String,
    /// Suggested H2 subheadings
    pub content_outline: Vec<String>,
    pub keywords: Vec<String>,
    pub blog_topics: Vec<String>,
}

impl Suggestions {
    pub fn truncate_lists(&mut self) {
        self.content_outline.truncate(MAX_OUTLINE_ITEMS);
        self.keywords.truncate(MAX_KEYWORDS);
        self.blog_topics.truncate(MAX_BLOG_TOPICS);
    }
}

/// Everything an advisor may look at
#[derive(Debug, Clone, Copy)]
pub struct AdviceRequest<'a> {
    pub industry: &'a str,
    pub page: &'a PageAttributes,
    pub issues: &'a [String],
}

impl<'a> AdviceRequest<'a> {
    pub fn new(industry: &'a str, page: &'a PageAttributes, issues: &'a [String]) -> Self {
        Self {
            industry,
            page,
            issues,
        }
    }
}

/// A source of suggestions.
///
/// `is_available` is checked before `suggest` is called, so advisors that
/// need configuration can opt out without producing an error.
pub trait Advisor {
    fn suggest(
        &self,
        request: &AdviceRequest<'_>,
    ) -> impl Future<Output = Result<Suggestions>> + Send;

    fn is_available(&self) -> bool {
        true
    }
}

/// Ask `primary` for suggestions, falling back to templates when it is
/// absent, unavailable, or fails.
pub async fn recommend<A>(primary: Option<&A>, request: &AdviceRequest<'_>) -> Suggestions
where
    A: Advisor + Sync,
{
    match primary {
        Some(advisor) if advisor.is_available() => match advisor.suggest(request).await {
            Ok(suggestions) => return suggestions,
            Err(err) => warn!(error = %err, "advisor failed, using fallback suggestions"),
        },
        Some(_) => info!("advisor not configured, using fallback suggestions"),
        None => info!("no advisor supplied, using fallback suggestions"),
    }

    FallbackAdvisor.generate(request.industry, Some(request.page))
}
