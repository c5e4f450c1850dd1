use super::{AdviceRequest, Advisor, Suggestions};
use crate::error::Result;
use crate::types::PageAttributes;

/// Template-based suggestions keyed by industry.
///
/// Keeps the page's own title and first H1 when it has them. Always available
/// and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackAdvisor;

impl FallbackAdvisor {
    pub fn generate(&self, industry: &str, page: Option<&PageAttributes>) -> Suggestions {
        let current_title = page
            .and_then(|p| p.title.as_deref())
            .filter(|t| !t.is_empty());
        let current_h1 = page.and_then(PageAttributes::first_h1);

        Suggestions {
            optimized_title: current_title.map(str::to_string).unwrap_or_else(|| {
                format!("Best {industry} Services - Professional {industry} Solutions")
            }),
            optimized_meta_description: format!(
                "Looking for reliable {industry} services? We provide expert {industry} solutions with proven results. Contact us today for a free consultation."
            ),
            improved_h1: current_h1
                .map(str::to_string)
                .unwrap_or_else(|| format!("Professional {industry} Services You Can Trust")),
            content_outline: outline(industry),
            keywords: keywords(industry),
            blog_topics: blog_topics(industry),
        }
    }
}

impl Advisor for FallbackAdvisor {
    async fn suggest(&self, request: &AdviceRequest<'_>) -> Result<Suggestions> {
        Ok(self.generate(request.industry, Some(request.page)))
    }
}

pub(crate) fn outline(industry: &str) -> Vec<String> {
    vec![
        format!("Why Choose Our {industry} Services"),
        format!("Our {industry} Process and Methodology"),
        format!("Benefits of Professional {industry}"),
        format!("Common {industry} Challenges We Solve"),
        format!("Our {industry} Service Areas"),
        "Client Success Stories and Testimonials".to_string(),
        format!("Get Started with {industry} Today"),
    ]
}

pub(crate) fn keywords(industry: &str) -> Vec<String> {
    vec![
        format!("best {industry} services"),
        format!("{industry} near me"),
        format!("affordable {industry}"),
        format!("{industry} expert"),
        format!("professional {industry}"),
        format!("top {industry} company"),
        format!("{industry} solutions"),
        format!("local {industry} services"),
    ]
}

pub(crate) fn blog_topics(industry: &str) -> Vec<String> {
    vec![
        format!("Top 10 {industry} Tips for Beginners in 2024"),
        format!("How to Choose the Right {industry} Service Provider"),
        format!("Common {industry} Mistakes to Avoid"),
        format!("The Ultimate Guide to {industry} Best Practices"),
        format!("Why {industry} is Essential for Your Business Success"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{MAX_BLOG_TOPICS, MAX_KEYWORDS, MAX_OUTLINE_ITEMS};

    #[test]
    fn templates_without_page_data() {
        let suggestions = FallbackAdvisor.generate("Bakery", None);

        assert_eq!(
            suggestions.optimized_title,
            "Best Bakery Services - Professional Bakery Solutions"
        );
        assert_eq!(
            suggestions.improved_h1,
            "Professional Bakery Services You Can Trust"
        );
        assert!(suggestions.optimized_meta_description.starts_with(
            "Looking for reliable Bakery services?"
        ));
        assert_eq!(suggestions.content_outline.len(), MAX_OUTLINE_ITEMS);
        assert_eq!(suggestions.keywords.len(), MAX_KEYWORDS);
        assert_eq!(suggestions.blog_topics.len(), MAX_BLOG_TOPICS);
        assert_eq!(suggestions.keywords[1], "Bakery near me");
    }

    #[test]
    fn keeps_existing_title_and_h1() {
        let page = PageAttributes {
            title: Some("Fresh Bread Daily".to_string()),
            h1_tags: vec!["Our Bakery".to_string(), "Second".to_string()],
            ..Default::default()
        };
        let suggestions = FallbackAdvisor.generate("Bakery", Some(&page));

        assert_eq!(suggestions.optimized_title, "Fresh Bread Daily");
        assert_eq!(suggestions.improved_h1, "Our Bakery");
    }

    #[test]
    fn empty_title_uses_template() {
        let page = PageAttributes {
            title: Some(String::new()),
            ..Default::default()
        };
        let suggestions = FallbackAdvisor.generate("Law", Some(&page));
        assert_eq!(
            suggestions.optimized_title,
            "Best Law Services - Professional Law Solutions"
        );
    }

    #[test]
    fn output_is_deterministic() {
        let page = PageAttributes::default();
        assert_eq!(
            FallbackAdvisor.generate("Dental", Some(&page)),
            FallbackAdvisor.generate("Dental", Some(&page))
        );
    }
}
