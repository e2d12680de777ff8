//! Whole-run deadline
//!
//! Every network fetch and every politeness sleep runs under the same
//! [`Deadline`], so an unreachable catalog cannot hold a run open forever.

use crate::FetchError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Point in time after which the run stops waiting
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// No deadline: operations only stop on their own per-request timeouts
    pub fn none() -> Self {
        Self { at: None }
    }

    pub fn after(duration: Duration) -> Self {
        Self {
            at: Some(Instant::now() + duration),
        }
    }

    /// Builds the deadline from the optional `run-timeout-secs` setting
    pub fn from_secs(secs: Option<u64>) -> Self {
        secs.map(|s| Self::after(Duration::from_secs(s)))
            .unwrap_or_default()
    }

    pub fn is_expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }

    /// Time left, `None` when unbounded
    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Runs `future` to completion or until the deadline, whichever is first
    ///
    /// Returns `None` if the deadline won.
    pub async fn run<F: Future>(&self, future: F) -> Option<F::Output> {
        match self.at {
            Some(at) => tokio::time::timeout_at(at, future).await.ok(),
            None => Some(future.await),
        }
    }

    /// Like [`Deadline::run`] for fetches: the deadline becomes
    /// [`FetchError::DeadlineExceeded`]
    pub async fn fetch<F>(&self, url: &str, future: F) -> Result<String, FetchError>
    where
        F: Future<Output = Result<String, FetchError>>,
    {
        self.run(future)
            .await
            .unwrap_or_else(|| {
                Err(FetchError::DeadlineExceeded {
                    url: url.to_string(),
                })
            })
    }
}
