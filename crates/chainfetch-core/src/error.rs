//! Error types for transport, assertion and fetch failures.

use thiserror::Error;

use crate::types::{AccountIdentifier, Currency, NetworkIdentifier, NodeError};

/// Errors that can occur while sending a request to the node.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, non-200 without a node error body, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Request body could not be serialized.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Structured error returned by the node.
    #[error("{0}")]
    Node(NodeError),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if this error is transient and worth another attempt.
    ///
    /// Node errors are retried only when explicitly flagged `retriable: true`.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Node(err) => err.is_retriable(),
            Self::Http(_)
            | Self::Timeout { .. }
            | Self::Encoding(_)
            | Self::Deserialization(_)
            | Self::Other(_) => true,
        }
    }
}

/// A response violated a protocol invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    #[error("{0} is nil")]
    IdentifierNil(&'static str),

    #[error("{0} is missing")]
    FieldMissing(&'static str),

    #[error("no {0} found")]
    Empty(&'static str),

    #[error("no successful Options.OperationStatuses found")]
    NoSuccessfulStatus,

    #[error("Error.Code is negative")]
    NegativeCode,

    #[error("BlockIdentifier.Index is negative")]
    NegativeBlockIndex,

    #[error("NetworkStatusResponse.CurrentBlockTimestamp is negative")]
    NegativeTimestamp,

    #[error("error code {0} used multiple times")]
    DuplicateErrorCode(i32),

    #[error("currency {0} used in balance multiple times")]
    DuplicateCurrencyInBalance(Currency),

    #[error("account identifier {0} used in balance multiple times")]
    DuplicateAccountIdentifier(AccountIdentifier),

    #[error("network identifier {0} listed multiple times")]
    DuplicateNetworkIdentifier(NetworkIdentifier),
}

/// Errors surfaced by [`Fetcher`](crate::fetcher::Fetcher).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The node answered, but the answer is malformed. Never retried.
    #[error("invalid response: {0}")]
    Assertion(#[from] AssertionError),

    #[error("exhausted retries for {operation} ({context})")]
    RetriesExhausted {
        operation: &'static str,
        context: String,
        #[source]
        last: Box<FetchError>,
    },

    /// `last` holds the failed attempt the cancelled backoff was waiting out.
    #[error("{operation} ({context}) cancelled")]
    Cancelled {
        operation: &'static str,
        context: String,
        #[source]
        last: Option<Box<FetchError>>,
    },
}

impl FetchError {
    /// Returns `true` if another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_retryable(),
            Self::Assertion(_) | Self::RetriesExhausted { .. } | Self::Cancelled { .. } => false,
        }
    }

    /// The node error behind this failure, if any.
    pub fn node_error(&self) -> Option<&NodeError> {
        match self {
            Self::Transport(TransportError::Node(err)) => Some(err),
            Self::RetriesExhausted { last, .. } => last.node_error(),
            Self::Cancelled { last: Some(last), .. } => last.node_error(),
            _ => None,
        }
    }
}
