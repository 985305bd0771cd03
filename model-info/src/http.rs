//! HTTP seam used by the network-backed adapters.
//!
//! Adapters never talk to reqwest directly: they build an [`HttpRequest`] and hand it
//! to an [`HttpClient`], so tests can swap in a mock and callers can share one client.

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::ModelInfoError;

/// Request method. Only the two the adapters need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Outgoing request: method, URL, headers and an optional JSON body.
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST with a JSON body (`Content-Type: application/json`).
    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_bearer_auth(self, token: &str) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token))
    }

    /// Value of the first header with this name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Keeps credentials out of debug logs.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// Status code and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

/// Sends one request. Abstraction for testing and for sharing a client.
///
/// `Err` is reserved for transport failures (connection refused, TLS, ...); any
/// status the server answers with is returned as `Ok`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// Reqwest-based HTTP client.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing reqwest client (shared pool, custom timeouts, proxies).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }
        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(HttpResponse { status, body })
    }
}

/// `base` with `segments` appended as path segments, each percent-encoded, so a
/// model id containing `/`, `?`, `#` or spaces stays one segment.
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<String, ModelInfoError> {
    let invalid = |reason: String| ModelInfoError::FetchFailed {
        url: base.to_string(),
        reason,
    };
    let mut url = Url::parse(base).map_err(|e| invalid(format!("invalid base url: {}", e)))?;
    url.path_segments_mut()
        .map_err(|()| invalid("base url cannot have a path".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}

/// Send `request` and decode a 200 response body as JSON.
///
/// Transport errors and non-200 statuses become [`ModelInfoError::FetchFailed`];
/// a body that does not decode into `T` becomes [`ModelInfoError::DecodeFailed`].
pub async fn fetch_json<T>(client: &dyn HttpClient, request: HttpRequest) -> Result<T, ModelInfoError>
where
    T: DeserializeOwned,
{
    let url = request.url.clone();
    tracing::debug!(method = ?request.method, url = %url, "model_info request");
    let response = client
        .send(request)
        .await
        .map_err(|reason| ModelInfoError::FetchFailed {
            url: url.clone(),
            reason,
        })?;
    if response.status != 200 {
        return Err(ModelInfoError::FetchFailed {
            url,
            reason: format!("status {}", response.status),
        });
    }
    serde_json::from_str(&response.body)
        .map_err(|e| ModelInfoError::DecodeFailed(format!("{}: {}", url, e)))
}
