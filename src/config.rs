//! Client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Defaults match a local development
//! deployment of the Snippedia backend.

use std::path::PathBuf;

/// Top-level client configuration.
///
/// Loaded once at startup via [`ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Snippedia API (e.g. `http://localhost:8080`).
    pub api_url: String,

    /// GitHub OAuth application client id, required for `login`.
    pub github_client_id: Option<String>,

    /// Port the loopback listener binds for the OAuth token handoff.
    /// Must match the frontend URL the backend redirects to.
    pub callback_port: u16,

    /// Per-request timeout in seconds for API calls.
    pub request_timeout_secs: u64,

    /// Override for the bearer-token file location.
    pub token_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = std::env::var("SNIPPEDIA_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let github_client_id = std::env::var("SNIPPEDIA_GITHUB_CLIENT_ID").ok();

        let callback_port = parse_env("SNIPPEDIA_CALLBACK_PORT", 3000);
        let request_timeout_secs = parse_env("SNIPPEDIA_REQUEST_TIMEOUT_SECS", 30);

        let token_path = std::env::var("SNIPPEDIA_TOKEN_PATH")
            .ok()
            .map(PathBuf::from);

        Self {
            api_url,
            github_client_id,
            callback_port,
            request_timeout_secs,
            token_path,
        }
    }

    /// Resolves the bearer-token file path: the configured override, or
    /// `<config dir>/snippedia/token` under the platform config directory.
    #[must_use]
    pub fn resolved_token_path(&self) -> PathBuf {
        self.token_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("snippedia")
                .join("token")
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
