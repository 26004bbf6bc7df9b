use std::path::PathBuf;

/// Default REST API base URL for local development.
const DEFAULT_API_URL: &str = "http://localhost:5000/api";
/// Default live channel endpoint for local development.
const DEFAULT_WS_URL: &str = "ws://localhost:5000";
/// Default location of the persisted session file.
const DEFAULT_SESSION_FILE: &str = ".campus-session.json";

/// Dashboard configuration loaded from environment variables.
///
/// All fields have defaults suitable for a locally-running backend.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// REST API base URL.
    pub api_url: String,
    /// Live channel (WebSocket) base URL.
    pub ws_url: String,
    /// Where session credentials are persisted between runs.
    pub session_file: PathBuf,
}

impl DashboardConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                     |
    /// |-----------------------|-----------------------------|
    /// | `CAMPUS_API_URL`      | `http://localhost:5000/api` |
    /// | `CAMPUS_WS_URL`       | `ws://localhost:5000`       |
    /// | `CAMPUS_SESSION_FILE` | `.campus-session.json`      |
    pub fn from_env() -> Self {
        let api_url = std::env::var("CAMPUS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let ws_url = std::env::var("CAMPUS_WS_URL").unwrap_or_else(|_| DEFAULT_WS_URL.into());
        let session_file = std::env::var("CAMPUS_SESSION_FILE")
            .unwrap_or_else(|_| DEFAULT_SESSION_FILE.into())
            .into();

        Self {
            api_url,
            ws_url,
            session_file,
        }
    }
}
