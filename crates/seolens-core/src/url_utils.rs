use url::Url;

use crate::error::{Result, SeoError};

/// Parse user input as a page URL, assuming `https://` when no scheme is given.
pub fn normalize_page_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed =
        Url::parse(&with_scheme).map_err(|e| SeoError::InvalidUrl(format!("{input}: {e}")))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(SeoError::InvalidUrl(format!("{input}: missing host")));
    }
    Ok(parsed)
}

/// Host plus explicit port, e.g. `example.com:8443`.
pub fn netloc(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// A link is internal when either netloc contains the other.
///
/// This is a substring test, not a registrable-domain comparison: it treats
/// subdomains as internal, but it also treats unrelated hosts that share a
/// suffix (`example.com` vs `myexample.com`) as internal. Link counts feed the
/// rubric, so changing this changes scores.
pub fn is_internal_link(page_netloc: &str, link_netloc: &str) -> bool {
    page_netloc.contains(link_netloc) || link_netloc.contains(page_netloc)
}
