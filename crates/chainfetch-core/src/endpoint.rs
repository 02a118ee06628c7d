//! Type-level descriptors for the node endpoints the fetcher supports.
//!
//! An [`Endpoint`] ties a path to its request and response bodies and to the
//! asserter check its response must pass, so the fetcher can implement the
//! raw, validated and retrying call forms once for all of them.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::asserter;
use crate::error::AssertionError;
use crate::request::{
    AccountBalanceRequest, AccountBalanceResponse, MetadataRequest, NetworkListResponse,
    NetworkOptionsResponse, NetworkRequest, NetworkStatusResponse,
};

pub trait Endpoint {
    /// Operation name used in logs and errors.
    const NAME: &'static str;
    const PATH: &'static str;

    type Request: Serialize + Sync;
    type Response: DeserializeOwned + Send;

    fn check(resp: &Self::Response) -> Result<(), AssertionError>;

    /// Identifies the request in diagnostics, e.g. `account acct1`.
    fn context(req: &Self::Request) -> String;
}

pub struct NetworkList;

impl Endpoint for NetworkList {
    const NAME: &'static str = "network_list";
    const PATH: &'static str = "/network/list";

    type Request = MetadataRequest;
    type Response = NetworkListResponse;

    fn check(resp: &NetworkListResponse) -> Result<(), AssertionError> {
        asserter::network_list_response(resp)
    }

    fn context(_req: &MetadataRequest) -> String {
        "networks".to_string()
    }
}

pub struct NetworkOptions;

impl Endpoint for NetworkOptions {
    const NAME: &'static str = "network_options";
    const PATH: &'static str = "/network/options";

    type Request = NetworkRequest;
    type Response = NetworkOptionsResponse;

    fn check(resp: &NetworkOptionsResponse) -> Result<(), AssertionError> {
        asserter::network_options_response(resp)
    }

    fn context(req: &NetworkRequest) -> String {
        format!("network {}", req.network_identifier)
    }
}

pub struct NetworkStatus;

impl Endpoint for NetworkStatus {
    const NAME: &'static str = "network_status";
    const PATH: &'static str = "/network/status";

    type Request = NetworkRequest;
    type Response = NetworkStatusResponse;

    fn check(resp: &NetworkStatusResponse) -> Result<(), AssertionError> {
        asserter::network_status_response(resp)
    }

    fn context(req: &NetworkRequest) -> String {
        format!("network {}", req.network_identifier)
    }
}

pub struct AccountBalance;

impl Endpoint for AccountBalance {
    const NAME: &'static str = "account_balance";
    const PATH: &'static str = "/account/balance";

    type Request = AccountBalanceRequest;
    type Response = AccountBalanceResponse;

    fn check(resp: &AccountBalanceResponse) -> Result<(), AssertionError> {
        asserter::account_balance_response(resp)
    }

    fn context(req: &AccountBalanceRequest) -> String {
        format!("account {}", req.account_identifier)
    }
}
