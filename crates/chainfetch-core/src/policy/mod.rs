//! Retry policy for the fetcher.
//!
//! ```text
//! Fetcher → [attempt] → (transient error) → BackoffPolicy::next_delay → sleep → [attempt] …
//! ```

pub mod backoff;

pub use backoff::{BackoffConfig, BackoffPolicy};
