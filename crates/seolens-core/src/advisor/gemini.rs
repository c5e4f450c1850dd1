use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::response::{complete, parse_sections};
use super::{AdviceRequest, Advisor, Suggestions};
use crate::config::AdvisorConfig;
use crate::error::{Result, SeoError};

const PREVIEW_CHARS: usize = 500;
const PROMPT_H2_LIMIT: usize = 5;
const PROMPT_ISSUE_LIMIT: usize = 10;

/// Suggestions from the Gemini `generateContent` REST endpoint
#[derive(Debug, Clone)]
pub struct GeminiAdvisor {
    client: Client,
    config: AdvisorConfig,
}

impl GeminiAdvisor {
    pub fn new(config: AdvisorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SeoError::advisor(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl Advisor for GeminiAdvisor {
    async fn suggest(&self, request: &AdviceRequest<'_>) -> Result<Suggestions> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|_| self.config.has_api_key())
        else {
            return Err(SeoError::AdvisorUnavailable(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        };

        let body = json!({
            "contents": [{
                "parts": [{ "text": build_prompt(request) }]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_output_tokens,
            }
        });

        info!(model = %self.config.model, "requesting AI suggestions");
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| SeoError::advisor(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SeoError::advisor(format!("Gemini API error {status}: {detail}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SeoError::advisor(format!("invalid response body: {e}")))?;
        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| SeoError::advisor("response contained no text"))?;

        let parsed = parse_sections(text);
        debug!(
            outline = parsed.content_outline.len(),
            keywords = parsed.keywords.len(),
            blog_topics = parsed.blog_topics.len(),
            "parsed AI suggestions"
        );
        Ok(complete(parsed, request))
    }

    fn is_available(&self) -> bool {
        self.config.has_api_key()
    }
}

/// Prompt describing the page, its issues, and the expected reply layout.
pub fn build_prompt(request: &AdviceRequest<'_>) -> String {
    let industry = request.industry;
    let page = request.page;

    let title = page.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("Missing");
    let meta = page.meta_description.as_deref().unwrap_or("Missing");
    let h1 = page.first_h1().unwrap_or("None");
    let h2_list = if page.h2_tags.is_empty() {
        "None".to_string()
    } else {
        page.h2_tags
            .iter()
            .take(PROMPT_H2_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let preview: String = page.text_content.chars().take(PREVIEW_CHARS).collect();
    let issues = if request.issues.is_empty() {
        "No major issues".to_string()
    } else {
        request
            .issues
            .iter()
            .take(PROMPT_ISSUE_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are an expert SEO consultant analyzing a {industry} website. Based on the data below, provide SPECIFIC, ACTIONABLE recommendations.

=== WEBSITE DATA ===
URL: {url}
Industry: {industry}

Current Title: {title}
Title Length: {title_len} characters

Current Meta Description: {meta}
Meta Description Length: {meta_len} characters

Current H1: {h1}
Current H2 Tags: {h2_list}

Content Stats:
- Word Count: {words} words
- Images: {images} ({missing_alt} missing alt text)
- Internal Links: {internal}

Content Preview (first {PREVIEW_CHARS} chars):
{preview}

=== SEO ISSUES FOUND ===
{issues}

=== YOUR TASK ===
Provide detailed, specific recommendations in these 6 categories:

1. **OPTIMIZED TITLE TAG** - Write a better title tag (30-60 chars) that:
   - Includes primary keyword naturally
   - Is compelling for click-through
   - Specific to this {industry} business

2. **OPTIMIZED META DESCRIPTION** - Write a better meta description (120-160 chars) that:
   - Includes primary and secondary keywords
   - Has a clear call-to-action
   - Entices users to click

3. **IMPROVED H1 TAG** - Suggest a better H1 that:
   - Clearly states the page purpose
   - Includes primary keyword
   - Is engaging and descriptive

4. **CONTENT OUTLINE** - Provide 5-7 H2 subheadings for page structure:
   - Covers important topics for this industry
   - Includes relevant keywords naturally
   - Logical flow and comprehensive coverage

5. **TARGET KEYWORDS** - List 8 specific keywords for this {industry} business:
   - Mix of short-tail and long-tail keywords
   - Based on actual business and location if mentioned
   - Include search intent (informational, commercial, transactional)

6. **BLOG TOPICS** - Suggest 5 blog post ideas that:
   - Address customer pain points
   - Help with SEO and organic traffic
   - Establish authority in {industry}

Format your response EXACTLY like this (use exact section headers):

OPTIMIZED TITLE:
[Your optimized title here]

OPTIMIZED META DESCRIPTION:
[Your optimized meta description here]

IMPROVED H1:
[Your improved H1 here]

CONTENT OUTLINE:
- H2 subheading 1
- H2 subheading 2
(continue for 5-7 subheadings)

TARGET KEYWORDS:
- keyword 1
- keyword 2
(continue for 8 keywords)

BLOG TOPICS:
- Blog topic 1
- Blog topic 2
(continue for 5 topics)

Be specific and actionable. Base recommendations on the actual website content and industry.",
        url = page.url,
        title_len = page.title_length().unwrap_or(0),
        meta_len = page.meta_description_length().unwrap_or(0),
        words = page.word_count,
        images = page.images,
        missing_alt = page.images_without_alt,
        internal = page.internal_links,
    )
}
