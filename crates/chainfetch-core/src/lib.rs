//! chainfetch-core — validated, retrying access to blockchain node query APIs.
//!
//! # Overview
//!
//! The core crate defines:
//!
//! - [`types`] / [`request`] — entities and request/response bodies
//! - [`asserter`] — pure checks of decoded responses
//! - [`Transport`] — the async trait a node client implements
//! - [`Endpoint`] — per-operation path, types and response check
//! - [`policy`] module — bounded, jittered exponential backoff
//! - [`Fetcher`] — raw, validated and retrying forms of every operation
//! - [`FetchError`] / [`TransportError`] / [`AssertionError`] — error taxonomy

pub mod asserter;
pub mod endpoint;
pub mod error;
pub mod fetcher;
pub mod policy;
pub mod request;
pub mod transport;
pub mod types;

pub use endpoint::Endpoint;
pub use error::{AssertionError, FetchError, TransportError};
pub use fetcher::{Fetcher, FetcherConfig};
pub use policy::{BackoffConfig, BackoffPolicy};
pub use request::{
    AccountBalanceRequest, AccountBalanceResponse, MetadataRequest, NetworkListResponse,
    NetworkOptionsResponse, NetworkRequest, NetworkStatusResponse,
};
pub use transport::Transport;
pub use types::{
    AccountIdentifier, Amount, Balance, BlockIdentifier, Currency, Metadata, MetadataValue,
    NetworkIdentifier, NodeError, OperationStatus, Options, Peer, SubAccountIdentifier,
    SubNetworkIdentifier, Version,
};
pub use tokio_util::sync::CancellationToken;
