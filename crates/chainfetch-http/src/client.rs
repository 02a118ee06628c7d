//! JSON-over-HTTP transport backed by `reqwest`.
//!
//! Each call POSTs the request body to `<base_url><path>` with
//! `Content-Type` and `Accept` set to `application/json`. A 200 body is
//! returned as JSON and must be labelled as such; any other status is
//! decoded as a node error.
//!
//! Retry is not done here; it belongs to
//! [`Fetcher`](chainfetch_core::Fetcher), which knows whether the response
//! was valid.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;

use chainfetch_core::error::TransportError;
use chainfetch_core::transport::Transport;
use chainfetch_core::types::NodeError;

const APPLICATION_JSON: &str = "application/json";

/// Configuration for `HttpTransport`.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: format!("chainfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP transport for one node.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the node API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, config: HttpClientConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            request_timeout: config.request_timeout,
        })
    }

    /// Create with default configuration.
    pub fn default_for(base_url: impl Into<String>) -> Result<Self, TransportError> {
        Self::new(base_url, HttpClientConfig::default())
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                ms: self.request_timeout.as_millis() as u64,
            }
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::trace!(url = %url, "sending request");

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = resp.bytes().await.map_err(|e| self.map_send_error(e))?;

        if status != StatusCode::OK {
            return match serde_json::from_slice::<NodeError>(&bytes) {
                Ok(err) => {
                    tracing::debug!(url = %url, status = status.as_u16(), code = err.code, "node returned error");
                    Err(TransportError::Node(err))
                }
                Err(_) => Err(TransportError::Http(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    String::from_utf8_lossy(&bytes)
                ))),
            };
        }

        if !is_json(&content_type) {
            tracing::debug!(url = %url, content_type = %content_type, "non-JSON response");
            return Err(TransportError::Http(format!("unexpected content type: {content_type:?}")));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn url(&self) -> &str {
        &self.base_url
    }
}

/// `application/json`, with or without parameters such as `charset`.
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|mime| mime.trim().eq_ignore_ascii_case(APPLICATION_JSON))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let transport = HttpTransport::default_for("http://localhost:8080/").unwrap();
        assert_eq!(transport.url(), "http://localhost:8080");
    }

    #[test]
    fn default_user_agent_names_crate() {
        assert!(HttpClientConfig::default().user_agent.starts_with("chainfetch/"));
    }

    #[test]
    fn json_content_type_detection() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("Application/JSON"));
        assert!(!is_json("text/plain"));
        assert!(!is_json("application/jsonx"));
        assert!(!is_json(""));
    }
}
