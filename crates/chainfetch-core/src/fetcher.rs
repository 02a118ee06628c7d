//! `Fetcher`: validated, retrying access to a node through a [`Transport`].
//!
//! Every operation comes in three forms:
//!
//! - `unsafe_*`: one transport call, response returned as decoded, no checks;
//! - plain: the unsafe form followed by the endpoint's asserter check;
//! - `*_retry`: the plain form repeated under a [`BackoffPolicy`] until it
//!   succeeds, fails permanently, is cancelled or runs out of budget.
//!
//! The forms are implemented once over [`Endpoint`] in [`Fetcher::unsafe_fetch`],
//! [`Fetcher::fetch`] and [`Fetcher::fetch_retry`]; the named methods only
//! build the request.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::endpoint::{AccountBalance, Endpoint, NetworkList, NetworkOptions, NetworkStatus};
use crate::error::{AssertionError, FetchError, TransportError};
use crate::policy::{BackoffConfig, BackoffPolicy};
use crate::request::{
    AccountBalanceRequest, AccountBalanceResponse, MetadataRequest, NetworkListResponse,
    NetworkOptionsResponse, NetworkRequest, NetworkStatusResponse,
};
use crate::transport::Transport;
use crate::types::{AccountIdentifier, Balance, BlockIdentifier, NetworkIdentifier};

/// Configuration for [`Fetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub backoff: BackoffConfig,
    /// Default wall-clock bound for callers that have no opinion.
    pub max_elapsed_time: Duration,
    /// Default retry count for callers that have no opinion.
    pub max_retries: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            backoff: BackoffConfig::default(),
            max_elapsed_time: Duration::from_secs(60),
            max_retries: 10,
        }
    }
}

/// Shared, stateless front end over one transport.
///
/// Safe to call from any number of tasks at once; each retrying call owns
/// its own backoff state.
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    config: FetcherConfig,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, config: FetcherConfig) -> Self {
        Self { transport, config }
    }

    /// Create with default configuration.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, FetcherConfig::default())
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// One transport call, decoded but unchecked.
    pub async fn unsafe_fetch<E: Endpoint>(
        &self,
        req: &E::Request,
    ) -> Result<E::Response, TransportError> {
        let body = serde_json::to_value(req).map_err(|e| TransportError::Encoding(e.to_string()))?;
        let value = self.transport.send(E::PATH, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// One transport call whose response must pass `E::check`.
    pub async fn fetch<E: Endpoint>(&self, req: &E::Request) -> Result<E::Response, FetchError> {
        let resp = self.unsafe_fetch::<E>(req).await?;
        E::check(&resp)?;
        Ok(resp)
    }

    /// Repeats [`fetch`](Self::fetch) until success or a terminal condition.
    ///
    /// Assertion failures and node errors not flagged retriable end the loop
    /// at once. `cancel` is observed before every attempt, during the
    /// attempt and during every backoff sleep; a cancelled sleep reports the
    /// failure it was backing off from.
    pub async fn fetch_retry<E: Endpoint>(
        &self,
        cancel: &CancellationToken,
        req: &E::Request,
        max_elapsed_time: Duration,
        max_retries: u64,
    ) -> Result<E::Response, FetchError> {
        let context = E::context(req);
        let cancelled = |last: Option<Box<FetchError>>| FetchError::Cancelled {
            operation: E::NAME,
            context: context.clone(),
            last,
        };
        let mut backoff = BackoffPolicy::new(self.config.backoff.clone(), max_elapsed_time, max_retries);

        loop {
            if cancel.is_cancelled() {
                return Err(cancelled(None));
            }

            let attempt = backoff.retries() + 1;
            tracing::debug!(operation = E::NAME, context = %context, attempt, url = self.transport.url(), "fetching");

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(None)),
                result = self.fetch::<E>(req) => result,
            };

            let err = match result {
                Ok(resp) => return Ok(resp),
                Err(e) if !e.is_retryable() => {
                    tracing::debug!(operation = E::NAME, context = %context, attempt, error = %e, "permanent failure");
                    return Err(e);
                }
                Err(e) => e,
            };

            let Some(delay) = backoff.next_delay() else {
                tracing::error!(
                    operation = E::NAME,
                    context = %context,
                    attempt,
                    elapsed_ms = backoff.elapsed().as_millis() as u64,
                    error = %err,
                    "retries exhausted"
                );
                return Err(FetchError::RetriesExhausted {
                    operation: E::NAME,
                    context: context.clone(),
                    last: Box::new(err),
                });
            };

            tracing::warn!(
                operation = E::NAME,
                context = %context,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "retrying request"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(Some(Box::new(err)))),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    // ─── /network/list ───────────────────────────────────────────────────────

    pub async fn unsafe_network_list(&self) -> Result<NetworkListResponse, TransportError> {
        self.unsafe_fetch::<NetworkList>(&MetadataRequest::default()).await
    }

    pub async fn network_list(&self) -> Result<NetworkListResponse, FetchError> {
        self.fetch::<NetworkList>(&MetadataRequest::default()).await
    }

    pub async fn network_list_retry(
        &self,
        cancel: &CancellationToken,
        max_elapsed_time: Duration,
        max_retries: u64,
    ) -> Result<NetworkListResponse, FetchError> {
        self.fetch_retry::<NetworkList>(cancel, &MetadataRequest::default(), max_elapsed_time, max_retries)
            .await
    }

    // ─── /network/options ────────────────────────────────────────────────────

    pub async fn unsafe_network_options(
        &self,
        network: &NetworkIdentifier,
    ) -> Result<NetworkOptionsResponse, TransportError> {
        self.unsafe_fetch::<NetworkOptions>(&NetworkRequest::new(network.clone()))
            .await
    }

    pub async fn network_options(
        &self,
        network: &NetworkIdentifier,
    ) -> Result<NetworkOptionsResponse, FetchError> {
        self.fetch::<NetworkOptions>(&NetworkRequest::new(network.clone())).await
    }

    pub async fn network_options_retry(
        &self,
        cancel: &CancellationToken,
        network: &NetworkIdentifier,
        max_elapsed_time: Duration,
        max_retries: u64,
    ) -> Result<NetworkOptionsResponse, FetchError> {
        let req = NetworkRequest::new(network.clone());
        self.fetch_retry::<NetworkOptions>(cancel, &req, max_elapsed_time, max_retries)
            .await
    }

    // ─── /network/status ─────────────────────────────────────────────────────

    pub async fn unsafe_network_status(
        &self,
        network: &NetworkIdentifier,
    ) -> Result<NetworkStatusResponse, TransportError> {
        self.unsafe_fetch::<NetworkStatus>(&NetworkRequest::new(network.clone()))
            .await
    }

    pub async fn network_status(
        &self,
        network: &NetworkIdentifier,
    ) -> Result<NetworkStatusResponse, FetchError> {
        self.fetch::<NetworkStatus>(&NetworkRequest::new(network.clone())).await
    }

    pub async fn network_status_retry(
        &self,
        cancel: &CancellationToken,
        network: &NetworkIdentifier,
        max_elapsed_time: Duration,
        max_retries: u64,
    ) -> Result<NetworkStatusResponse, FetchError> {
        let req = NetworkRequest::new(network.clone());
        self.fetch_retry::<NetworkStatus>(cancel, &req, max_elapsed_time, max_retries)
            .await
    }

    // ─── /account/balance ────────────────────────────────────────────────────

    pub async fn unsafe_account_balance(
        &self,
        network: &NetworkIdentifier,
        account: &AccountIdentifier,
    ) -> Result<AccountBalanceResponse, TransportError> {
        let req = AccountBalanceRequest::new(network.clone(), account.clone());
        self.unsafe_fetch::<AccountBalance>(&req).await
    }

    /// Validated balances and the block they were observed at.
    pub async fn account_balance(
        &self,
        network: &NetworkIdentifier,
        account: &AccountIdentifier,
    ) -> Result<(BlockIdentifier, Vec<Balance>), FetchError> {
        let req = AccountBalanceRequest::new(network.clone(), account.clone());
        into_block_balances(self.fetch::<AccountBalance>(&req).await?)
    }

    pub async fn account_balance_retry(
        &self,
        cancel: &CancellationToken,
        network: &NetworkIdentifier,
        account: &AccountIdentifier,
        max_elapsed_time: Duration,
        max_retries: u64,
    ) -> Result<(BlockIdentifier, Vec<Balance>), FetchError> {
        let req = AccountBalanceRequest::new(network.clone(), account.clone());
        let resp = self
            .fetch_retry::<AccountBalance>(cancel, &req, max_elapsed_time, max_retries)
            .await?;
        into_block_balances(resp)
    }
}

fn into_block_balances(
    resp: AccountBalanceResponse,
) -> Result<(BlockIdentifier, Vec<Balance>), FetchError> {
    let block = resp
        .block_identifier
        .ok_or(AssertionError::IdentifierNil("BlockIdentifier"))?;
    Ok((block, resp.balances))
}
