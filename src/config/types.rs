use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Marketplace API endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every API path is appended to (e.g. "http://localhost:8080/api").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Login flow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Origin of the web client the OAuth2 redirect is served from.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Path that starts the OAuth2 authorization flow.
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl AuthConfig {
    pub fn login_url(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), self.login_path)
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_origin() -> String {
    "http://localhost:4200".to_string()
}

fn default_login_path() -> String {
    "/oauth2/authorization/okta".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            login_path: default_login_path(),
        }
    }
}
