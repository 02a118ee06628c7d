//! Bounded exponential backoff with randomized jitter.

use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

/// Shape of the delay sequence. The bounds are supplied per call.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Delay before the first retry, before jitter.
    pub initial_interval: Duration,
    /// Multiplier applied to the interval after each retry.
    pub multiplier: f64,
    /// Cap on the un-jittered interval.
    pub max_interval: Duration,
    /// Delays are drawn from `interval * (1 ± randomization_factor)`.
    /// Zero, negative and non-finite factors disable jitter.
    pub randomization_factor: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            multiplier: 1.5,
            max_interval: Duration::from_secs(60),
            randomization_factor: 0.5,
        }
    }
}

/// Delay generator for one retrying call. Not shared between calls.
#[derive(Debug)]
pub struct BackoffPolicy {
    config: BackoffConfig,
    max_elapsed_time: Duration,
    max_retries: u64,
    retries: u64,
    current_interval: Duration,
    started: Instant,
}

impl BackoffPolicy {
    /// Starts the elapsed-time clock now.
    ///
    /// A zero `max_elapsed_time` disables the wall-clock bound; `max_retries`
    /// always applies.
    pub fn new(config: BackoffConfig, max_elapsed_time: Duration, max_retries: u64) -> Self {
        let current_interval = config.initial_interval.min(config.max_interval);
        Self {
            config,
            max_elapsed_time,
            max_retries,
            retries: 0,
            current_interval,
            started: Instant::now(),
        }
    }

    /// Number of delays handed out so far.
    pub fn retries(&self) -> u64 {
        self.retries
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns the wait before the next attempt, or `None` once either bound
    /// is reached.
    pub fn next_delay(&mut self) -> Option<Duration> {
        self.next_delay_with(&mut rand::thread_rng())
    }

    pub fn next_delay_with<R: Rng>(&mut self, rng: &mut R) -> Option<Duration> {
        if self.retries >= self.max_retries {
            return None;
        }

        let delay = randomize(self.current_interval, self.config.randomization_factor, rng);
        if !self.max_elapsed_time.is_zero() && self.elapsed() + delay > self.max_elapsed_time {
            return None;
        }

        self.retries += 1;
        let next_nanos = self.current_interval.as_nanos() as f64 * self.config.multiplier;
        self.current_interval = Duration::from_nanos(next_nanos as u64).min(self.config.max_interval);
        Some(delay)
    }
}

fn randomize<R: Rng>(interval: Duration, factor: f64, rng: &mut R) -> Duration {
    if !factor.is_finite() || factor <= 0.0 {
        return interval;
    }
    let delta = interval.as_secs_f64() * factor;
    let base = interval.as_secs_f64();
    Duration::from_secs_f64(rng.gen_range((base - delta).max(0.0)..=base + delta))
}
