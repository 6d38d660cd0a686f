//! Application configuration.
//!
//! Resolved once at start-up from the build environment and then passed into
//! components. The only input is the API base URL; the static asset base is
//! derived from it by dropping a trailing `/api` segment.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("API base URL cannot be empty")]
    EmptyBaseUrl,
    #[error("API base URL must start with http:// or https:// or /: {0}")]
    InvalidBaseUrl(String),
    #[error("page limit must be at least 1")]
    ZeroPageLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    api_base_url: String,
    static_base_url: String,
    page_limit: u32,
}

impl AppConfig {
    pub fn new(api_base_url: &str, page_limit: u32) -> Result<Self, ConfigError> {
        let api_base_url = api_base_url.trim().trim_end_matches('/');
        if api_base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(api_base_url.starts_with("http://")
            || api_base_url.starts_with("https://")
            || api_base_url.starts_with('/'))
        {
            return Err(ConfigError::InvalidBaseUrl(api_base_url.to_string()));
        }
        if page_limit == 0 {
            return Err(ConfigError::ZeroPageLimit);
        }

        let static_base_url = api_base_url
            .strip_suffix("/api")
            .unwrap_or(api_base_url)
            .to_string();

        Ok(Self {
            api_base_url: api_base_url.to_string(),
            static_base_url,
            page_limit,
        })
    }

    /// Builds the configuration from an optional environment value, falling
    /// back to [`DEFAULT_API_BASE_URL`] when it is unset or blank.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        let base = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        Self::new(base, DEFAULT_PAGE_LIMIT)
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn static_base_url(&self) -> &str {
        &self.static_base_url
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            static_base_url: DEFAULT_API_BASE_URL
                .trim_end_matches("/api")
                .to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}
