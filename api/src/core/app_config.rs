//! Listener settings.

use std::env;

/// Bind address used when `API_ADDRESS` is not set.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// `host:port` the HTTP listener binds to.
    pub api_address: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_address = env::var("API_ADDRESS")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());
        Self { api_address }
    }
}
