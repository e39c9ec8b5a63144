//! API configuration

use serde::{Deserialize, Serialize};

/// API configuration
///
/// Loaded from `API_*` environment variables over the defaults below, so
/// `API_PORT=9000` overrides `port`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Access token lifetime, in seconds
    pub access_token_ttl_secs: u64,
    /// Refresh token lifetime, in seconds
    pub refresh_token_ttl_secs: u64,
    /// Mark session cookies `Secure`
    pub secure_cookies: bool,
    /// Origin allowed to make credentialed cross-site requests
    pub cors_origin: String,
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/financing".to_string(),
            max_connections: 10,
            jwt_secret: "change-me-in-production".to_string(),
            access_token_ttl_secs: 5 * 60,
            refresh_token_ttl_secs: 7 * 24 * 60 * 60,
            secure_cookies: false,
            cors_origin: "http://localhost:3000".to_string(),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
