//! Runtime configuration for the page provider and the AI advisor
//!
//! Both configs have sensible defaults and can be overridden from the
//! environment, so the CLI only needs `GEMINI_API_KEY` to enable AI advice.

use std::env;
use std::time::Duration;

pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "SEOLENS_GEMINI_MODEL";
pub const ENV_GEMINI_BASE_URL: &str = "SEOLENS_GEMINI_BASE_URL";
pub const ENV_FETCH_TIMEOUT: &str = "SEOLENS_FETCH_TIMEOUT_SECS";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Settings for fetching a page over HTTP
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: format!(
                "Mozilla/5.0 (compatible; seolens/{})",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

impl ProviderConfig {
    /// Defaults, with the timeout overridable via `SEOLENS_FETCH_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(secs) = read_var(ENV_FETCH_TIMEOUT).and_then(|v| v.parse::<u64>().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

/// Settings for the Gemini-backed advisor
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// `None` means the advisor is not configured and the fallback is used
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            temperature: 0.7,
            max_output_tokens: 2000,
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: read_var(ENV_GEMINI_API_KEY),
            model: read_var(ENV_GEMINI_MODEL).unwrap_or(defaults.model),
            base_url: read_var(ENV_GEMINI_BASE_URL).unwrap_or(defaults.base_url),
            ..defaults
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Read a variable, treating blank values as unset
fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
