//! Response asserter: pure checks of decoded node responses.
//!
//! Every check returns the first violation it finds as an
//! [`AssertionError`](crate::error::AssertionError) and touches no shared
//! state, so checks are safe to run from any number of tasks at once.
//!
//! Absent input is passed as `None` and rejected with
//! [`AssertionError::IdentifierNil`](crate::error::AssertionError::IdentifierNil).

mod account;
mod block;
mod network;
mod node_error;

pub use account::{
    account_balance, account_balance_response, account_identifier, contains_account_identifier,
    contains_currency,
};
pub use block::block_identifier;
pub use network::{
    network_identifier, network_list_response, network_options, network_options_response,
    network_status_response, peer, version,
};
pub use node_error::{error, errors};
