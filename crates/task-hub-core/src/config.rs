//! Client Configuration
//!
//! Values are baked in at compile time from environment variables.

use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// REST root, without trailing slash
    pub api_base_url: String,
    /// Applied to every outbound request
    pub request_timeout: Duration,
    /// Page size for the dashboard's recent comments
    pub recent_comments_page_size: u32,
    /// Rows per page in list views
    pub list_page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            recent_comments_page_size: 10,
            list_page_size: 10,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read `TASK_HUB_API_URL` and `TASK_HUB_TIMEOUT_MS` captured at build time.
    pub fn from_env() -> Self {
        let timeout_ms = option_env!("TASK_HUB_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        Self::new(option_env!("TASK_HUB_API_URL").unwrap_or(DEFAULT_API_URL))
            .with_timeout(Duration::from_millis(timeout_ms))
    }

    /// Join a path such as `/projects` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Process-wide configuration, loaded once.
pub fn config() -> &'static ClientConfig {
    CONFIG.get_or_init(ClientConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let cfg = ClientConfig::new("https://tasks.example.com/api/");
        assert_eq!(cfg.api_base_url, "https://tasks.example.com/api");
        assert_eq!(cfg.url("/projects"), "https://tasks.example.com/api/projects");
        assert_eq!(cfg.url("users"), "https://tasks.example.com/api/users");
    }

    #[test]
    fn test_defaults() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert_eq!(cfg.list_page_size, 10);
    }
}
