//! Recording `HttpClient` for unit tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    pub token: Option<String>,
}

type Reply = Result<Value, (u16, String)>;

/// Canned replies keyed by method and path, consumed in order
#[derive(Debug, Default)]
pub struct MockHttpClient {
    replies: Mutex<HashMap<(&'static str, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &'static str, path: &str, body: Value) {
        self.push(method, path, Ok(body));
    }

    pub fn fail(&self, method: &'static str, path: &str, status: u16, message: &str) {
        self.push(method, path, Err((status, message.to_string())));
    }

    fn push(&self, method: &'static str, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn handle<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> ClientResult<T> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
            token: token.map(str::to_owned),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&(method, path.to_string()))
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err((404, format!("no mock for {} {}", method, path))));

        match reply {
            Ok(value) => serde_json::from_value(value)
                .map_err(|e| ClientError::InvalidResponse(e.to_string())),
            Err((status, message)) => Err(ClientError::Api { status, message }),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<T> {
        self.handle("GET", path, None, token)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.handle("POST", path, Some(body), token)
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> ClientResult<T> {
        self.handle("DELETE", path, None, token)
    }

    async fn health(&self) -> ClientResult<Value> {
        self.handle("GET", "/healthz", None, None)
    }
}
