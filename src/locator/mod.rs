#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Classifying user input and building candidate URLs.
pub mod target;

use std::time::Duration;

use bon::Builder;
use reqwest::Client;
use serde::Serialize;
pub use target::{Candidate, RawFile, Target};

use crate::{
    config::ConfigHandle,
    constants::{DEFAULT_BRANCHES, FETCH_TIMEOUT_SECS, RAW_CONTENT_BASE},
    error::{FailedAttempt, FailureReason, SubmissionError},
};

/// HTML fetched from the first candidate that answered successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedPage {
    /// URL that produced the body.
    pub url:  String,
    /// Response body.
    #[serde(skip)]
    pub body: String,
}

/// Resolves student input to raw HTML by probing candidate URLs in order.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct Locator {
    /// HTTP client used for every attempt.
    #[builder(default)]
    client:   Client,
    /// Base that raw repository files are served from.
    #[builder(default = RAW_CONTENT_BASE.to_string())]
    raw_base: String,
    /// Conventional default branches, in preference order.
    #[builder(default = DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect())]
    #[builder(with = FromIterator::from_iter)]
    branches: Vec<String>,
    /// Upper bound on a single attempt, including reading the body.
    #[builder(default = Duration::from_secs(FETCH_TIMEOUT_SECS))]
    timeout:  Duration,
}

impl Default for Locator {
    fn default() -> Self {
        Locator::builder().build()
    }
}

impl Locator {
    /// Builds a locator from the shared configuration.
    pub fn from_config(config: &ConfigHandle) -> Self {
        Locator::builder()
            .client(config.http_client())
            .raw_base(config.raw_base())
            .timeout(config.fetch_timeout())
            .build()
    }

    /// Returns the per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the candidate URLs for `target`, in the order they are tried.
    pub fn candidates(&self, target: &Target) -> Vec<Candidate> {
        target.candidates(&self.raw_base, &self.branches)
    }

    /// Parses `input` and fetches the first candidate that responds.
    pub async fn locate(&self, input: &str) -> Result<FetchedPage, SubmissionError> {
        let target = Target::parse(input)?;
        self.fetch(&target).await
    }

    /// Fetches candidates in order and returns the first successful body.
    ///
    /// When every candidate fails, the reported reason is taken from the
    /// final attempt.
    pub async fn fetch(&self, target: &Target) -> Result<FetchedPage, SubmissionError> {
        let candidates = self.candidates(target);
        let mut attempts = Vec::with_capacity(candidates.len());

        for candidate in &candidates {
            tracing::debug!("Trying {} ({})", candidate.url(), candidate.label());
            match self.attempt(candidate.url()).await {
                Ok(body) => {
                    tracing::info!("Fetched {}", candidate.url());
                    return Ok(FetchedPage {
                        url: candidate.url().to_string(),
                        body,
                    });
                }
                Err(failed) => {
                    tracing::warn!("{}: {} ({})", failed.url, failed.reason, failed.detail);
                    attempts.push(failed);
                }
            }
        }

        let reason = attempts
            .last()
            .map(|a| a.reason)
            .unwrap_or(FailureReason::FetchError);
        Err(SubmissionError::FetchExhausted {
            attempted: attempts.len(),
            reason,
            attempts,
        })
    }

    /// Performs a single bounded GET request.
    async fn attempt(&self, url: &str) -> Result<String, FailedAttempt> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_failure(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FailedAttempt {
                url:    url.to_string(),
                reason: FailureReason::FetchError,
                detail: format!("HTTP {status}"),
            });
        }

        response.text().await.map_err(|e| transport_failure(url, &e))
    }
}

/// Classifies a reqwest error into one of the two reported categories.
fn transport_failure(url: &str, err: &reqwest::Error) -> FailedAttempt {
    let reason = if err.is_timeout() {
        FailureReason::TimedOut
    } else {
        FailureReason::FetchError
    };

    FailedAttempt {
        url: url.to_string(),
        reason,
        detail: err.to_string(),
    }
}
