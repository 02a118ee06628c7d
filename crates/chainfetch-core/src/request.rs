//! Request and response bodies, one pair per node endpoint.

use serde::{Deserialize, Serialize};

use crate::types::{
    AccountIdentifier, Balance, BlockIdentifier, Metadata, NetworkIdentifier, Options, Peer, Version,
};

/// Body of `/network/list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body of `/network/options` and `/network/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRequest {
    pub network_identifier: NetworkIdentifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl NetworkRequest {
    pub fn new(network_identifier: NetworkIdentifier) -> Self {
        Self {
            network_identifier,
            metadata: None,
        }
    }
}

/// Body of `/account/balance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalanceRequest {
    pub network_identifier: NetworkIdentifier,
    pub account_identifier: AccountIdentifier,
}

impl AccountBalanceRequest {
    pub fn new(network_identifier: NetworkIdentifier, account_identifier: AccountIdentifier) -> Self {
        Self {
            network_identifier,
            account_identifier,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkListResponse {
    #[serde(default)]
    pub network_identifiers: Vec<NetworkIdentifier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkOptionsResponse {
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default)]
    pub allow: Option<Options>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkStatusResponse {
    #[serde(default)]
    pub current_block_identifier: Option<BlockIdentifier>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub current_block_timestamp: i64,
    #[serde(default)]
    pub genesis_block_identifier: Option<BlockIdentifier>,
    #[serde(default)]
    pub peers: Vec<Peer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountBalanceResponse {
    #[serde(default)]
    pub block_identifier: Option<BlockIdentifier>,
    #[serde(default)]
    pub balances: Vec<Balance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}
