//! Client configuration

use std::path::PathBuf;

use reqwest::Url;

use crate::{ClientError, ClientResult};

/// Default API root of the reservation server
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Default location of the persisted session, relative to the working directory
pub const DEFAULT_SESSION_FILE: &str = ".booking/session.json";

/// Client configuration for talking to the reservation API
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | BOOKING_API_BASE | http://localhost:8080/api/v1 | API 根地址 |
/// | BOOKING_SESSION_FILE | .booking/session.json | 会话持久化文件 |
/// | BOOKING_TIMEOUT_SECS | (none) | 请求超时(秒)，不设置则不超时 |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:8080/api/v1")
    pub base_url: String,

    /// Where the session token and user are mirrored between runs
    pub session_file: PathBuf,

    /// Request timeout in seconds. `None` waits for the server indefinitely.
    pub timeout: Option<u64>,
}

impl ClientConfig {
    /// Create a configuration for the given API root
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            timeout: None,
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BOOKING_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let session_file = std::env::var("BOOKING_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));
        let timeout = std::env::var("BOOKING_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok());

        Self {
            base_url,
            session_file,
            timeout,
        }
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the session file path
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Server origin without the API path, used for `/healthz`
    ///
    /// `http://host:8080/api/v1` -> `http://host:8080`. Credentials, query
    /// and fragment are dropped.
    pub fn origin(&self) -> ClientResult<String> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::Config(format!("invalid API base URL \"{}\": {}", self.base_url, e))
        })?;
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(ClientError::Config(format!(
                "API base URL \"{}\" has no host",
                self.base_url
            )));
        }
        Ok(origin.ascii_serialization())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
