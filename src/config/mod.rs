use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub admin_tg_id: String,
    pub admin_token: String,
    pub host: String,
    pub port: u16,
    pub upstream_timeout_secs: u64,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3003/api".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base_url,
            admin_tg_id: lookup("ADMIN_TG_ID").unwrap_or_else(|| "0".to_string()),
            admin_token: lookup("ADMIN_TOKEN").unwrap_or_else(|| "your_admin_token".to_string()),
            host: lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("BACKEND_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            upstream_timeout_secs: lookup("UPSTREAM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
        }
    }
}
