//! The `Transport` trait: how the fetcher reaches a node.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

/// Executes one request against a node endpoint.
///
/// A node-reported failure is returned as [`TransportError::Node`]; any
/// other variant means the request never produced a protocol answer.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; one transport is shared by every
/// concurrent fetcher call.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// POST `body` to `path` (e.g. `/network/status`) and return the decoded
    /// JSON response body.
    async fn send(&self, path: &str, body: Value) -> Result<Value, TransportError>;

    /// Return the transport's identifier (base URL or name).
    fn url(&self) -> &str;
}
