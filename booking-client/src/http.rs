// booking-client/src/http.rs
// HTTP 客户端 - 网络通信

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::ErrorBody;

/// HTTP 客户端 trait
///
/// Paths are relative to the API base and start with `/`. The bearer token
/// is passed per call; the session is its only owner.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str, token: Option<&str>)
    -> ClientResult<T>;
    /// `GET /healthz` on the server origin, outside the API root
    async fn health(&self) -> ClientResult<Value>;
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    origin: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            origin: config.origin()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        mut req: RequestBuilder,
        token: Option<&str>,
    ) -> ClientResult<T> {
        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let response = req.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), len = bytes.len(), "response received");

        let body = decode_body(status, content_type.as_deref(), &bytes)?;
        serde_json::from_value(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        self.execute(self.client.get(&url), token).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        self.execute(self.client.post(&url).json(body), token).await
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        self.execute(self.client.delete(&url), token).await
    }

    async fn health(&self) -> ClientResult<Value> {
        let url = format!("{}/healthz", self.origin);
        tracing::debug!(%url, "GET");
        self.execute(self.client.get(&url), None).await
    }
}

/// Turn a raw response into a JSON value, or the error the user should see.
///
/// - `204` has no body and yields `{}`
/// - an `application/json` body is parsed; unparsable JSON yields `{}`
/// - any other content type yields `{}`
/// - non-2xx yields `ClientError::Api` carrying `body.error` when present,
///   otherwise `HTTP <status>: <reason>`
pub fn decode_body(
    status: StatusCode,
    content_type: Option<&str>,
    bytes: &[u8],
) -> ClientResult<Value> {
    let empty = || Value::Object(Default::default());

    let body = if status == StatusCode::NO_CONTENT {
        empty()
    } else if content_type.is_some_and(|ct| ct.contains("application/json")) {
        serde_json::from_slice(bytes).unwrap_or_else(|_| empty())
    } else {
        empty()
    };

    if !status.is_success() {
        let message = serde_json::from_value::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
                .trim_end()
                .to_string()
            });
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}
