//! # seolens-core
//!
//! Core library for scoring a web page's on-page SEO.
//!
//! This library provides:
//! - Page attribute extraction from HTML (meta tags, headings, links, images, schema)
//! - A fixed 100-point rubric across four categories with issues and strengths
//! - Content suggestions for low-scoring pages, AI-backed with a template fallback
//!
//! ## Features
//!
//! - `default`: Enables `http`
//! - `http`: Page fetching and the Gemini advisor via `reqwest`
//!
//! ## Example
//!
//! ```
//! use seolens_core::{PageData, parser, score};
//! use url::Url;
//!
//! let html = r#"<html lang="en"><head><title>Handmade ceramics from a small studio</title></head>
//!     <body><h1>Studio</h1><p>Bowls and plates.</p></body></html>"#;
//! let url = Url::parse("https://example.com/").unwrap();
//!
//! let attrs = parser::extract_page_attributes(html, &url);
//! let report = score(&PageData::from(attrs));
//! assert!(report.score <= 100);
//! ```

pub mod advisor;
pub mod config;
pub mod error;
pub mod parser;
pub mod provider;
pub mod scoring;
pub mod types;
pub mod url_utils;

// Re-export commonly used types
pub use types::{
    ADVICE_THRESHOLD, Category, CategoryScores, PageAttributes, PageData, ScoreReport,
};

pub use advisor::{AdviceRequest, Advisor, FallbackAdvisor, Suggestions, recommend};
pub use config::{AdvisorConfig, ProviderConfig};
pub use error::{Result, SeoError};
pub use provider::PageDataProvider;
pub use scoring::{score, score_attributes};

#[cfg(feature = "http")]
pub use advisor::GeminiAdvisor;

#[cfg(feature = "http")]
pub use provider::HttpPageProvider;
