use std::env;
use tracing::warn;

const DEFAULT_AUTH_API_URL: &str = "http://localhost:5000";
const DEFAULT_MANAGER_API_URL: &str = "http://localhost:5001";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth_api_url: String,
    pub manager_api_url: String,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            auth_api_url: env::var("AUTH_API_URL")
                .unwrap_or_else(|_| {
                    warn!("AUTH_API_URL not set, using default {}", DEFAULT_AUTH_API_URL);
                    DEFAULT_AUTH_API_URL.to_string()
                }),
            manager_api_url: env::var("MANAGER_API_URL")
                .unwrap_or_else(|_| {
                    warn!("MANAGER_API_URL not set, using default {}", DEFAULT_MANAGER_API_URL);
                    DEFAULT_MANAGER_API_URL.to_string()
                }),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing API base URLs");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.auth_api_url.is_empty() && !self.manager_api_url.is_empty()
    }
}
