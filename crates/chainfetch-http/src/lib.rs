//! chainfetch-http — `reqwest`-backed [`Transport`](chainfetch_core::Transport)
//! for node APIs that speak JSON over HTTP POST.

pub mod client;

pub use client::{HttpClientConfig, HttpTransport};
