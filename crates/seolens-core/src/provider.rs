//! Page retrieval
//!
//! A [`PageDataProvider`] turns a user-supplied URL into [`PageAttributes`].
//! Failures come back as [`SeoError`], which converts into the
//! [`crate::PageData::Error`] the scoring engine short-circuits on.

use std::future::Future;

use crate::error::Result;
use crate::types::PageAttributes;

#[cfg(feature = "http")]
pub use http::HttpPageProvider;

/// Source of page attributes for a URL
pub trait PageDataProvider {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<PageAttributes>> + Send;
}

#[cfg(feature = "http")]
mod http {
    use std::time::Instant;

    use reqwest::Client;
    use tracing::{debug, info};

    use super::PageDataProvider;
    use crate::config::ProviderConfig;
    use crate::error::{Result, SeoError};
    use crate::parser::extract_page_attributes;
    use crate::types::PageAttributes;
    use crate::url_utils::normalize_page_url;

    /// Fetches pages over HTTP(S) and extracts their attributes
    #[derive(Debug, Clone)]
    pub struct HttpPageProvider {
        client: Client,
    }

    impl HttpPageProvider {
        pub fn new(config: &ProviderConfig) -> Result<Self> {
            let client = Client::builder()
                .user_agent(config.user_agent.as_str())
                .timeout(config.timeout)
                .build()
                .map_err(|e| SeoError::fetch(format!("failed to build HTTP client: {e}")))?;
            Ok(Self { client })
        }
    }

    impl PageDataProvider for HttpPageProvider {
        async fn fetch(&self, input: &str) -> Result<PageAttributes> {
            let url = normalize_page_url(input)?;
            info!(%url, "fetching page");

            let started = Instant::now();
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| SeoError::fetch(e.to_string()))?
                .error_for_status()
                .map_err(|e| SeoError::fetch(e.to_string()))?;

            let status_code = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| SeoError::fetch(format!("failed to read response body: {e}")))?;
            let elapsed = started.elapsed().as_secs_f64();

            let html = String::from_utf8_lossy(&body);
            let mut attrs = extract_page_attributes(&html, &url);
            attrs.status_code = status_code;
            attrs.load_time = (elapsed * 100.0).round() / 100.0;
            attrs.page_size_kb = body.len() as f64 / 1024.0;

            debug!(
                url = %attrs.url,
                status = status_code,
                load_time = attrs.load_time,
                page_size_kb = attrs.page_size_kb,
                "fetched page"
            );
            Ok(attrs)
        }
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::error::SeoError;
    use crate::types::PageData;

    const PAGE: &str = r#"
        <html lang="en">
            <head>
                <title>Hand-made pottery and ceramics studio</title>
                <meta name="viewport" content="width=device-width">
            </head>
            <body>
                <h1>Pottery Studio</h1>
                <a href="/classes">Classes</a>
                <a href="https://example.org/">Partner</a>
            </body>
        </html>
    "#;

    #[tokio::test]
    async fn fetches_and_extracts_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(PAGE)
            .create_async()
            .await;

        let provider = HttpPageProvider::new(&ProviderConfig::default()).unwrap();
        let attrs = provider.fetch(&server.url()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(attrs.status_code, 200);
        assert!(!attrs.has_https);
        assert_eq!(attrs.h1_tags, vec!["Pottery Studio".to_string()]);
        assert_eq!(attrs.internal_links, 1);
        assert_eq!(attrs.external_links, 1);
        assert!(attrs.load_time >= 0.0);
        assert!((attrs.page_size_kb - PAGE.len() as f64 / 1024.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let provider = HttpPageProvider::new(&ProviderConfig::default()).unwrap();
        let result = provider.fetch(&format!("{}/missing", server.url())).await;

        assert!(matches!(result, Err(SeoError::Fetch(_))));
        let data = PageData::from(result);
        assert!(
            data.error()
                .unwrap()
                .starts_with("Could not fetch website:")
        );
    }

    #[tokio::test]
    async fn invalid_url_never_hits_the_network() {
        let provider = HttpPageProvider::new(&ProviderConfig::default()).unwrap();
        let result = provider.fetch("http://").await;
        assert!(matches!(result, Err(SeoError::InvalidUrl(_))));
    }
}
