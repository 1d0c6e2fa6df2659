#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use serde::Serialize;

/// Collapsed cause reported when no candidate URL could be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The deciding attempt ran out of time.
    TimedOut,
    /// Any other failure: connection errors, non-2xx statuses, unreadable
    /// bodies.
    FetchError,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::TimedOut => write!(f, "timed out"),
            FailureReason::FetchError => write!(f, "fetch error"),
        }
    }
}

/// Record of one failed attempt against a candidate URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedAttempt {
    /// URL that was requested.
    pub url:    String,
    /// Category of the failure.
    pub reason: FailureReason,
    /// Low-level detail, e.g. the HTTP status or transport error.
    pub detail: String,
}

/// Problems with user input, detected before any network activity.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The student's display name is blank.
    #[error("Please enter the student's name.")]
    MissingName,
    /// The GitHub username or URL is blank.
    #[error("Please enter a GitHub username or a URL to the page.")]
    MissingTarget,
    /// The target could not be understood as a username or a supported URL.
    #[error("`{input}` is not a GitHub username or a supported URL: {problem}")]
    MalformedTarget {
        /// The trimmed input.
        input:   String,
        /// What was wrong with it.
        problem: String,
    },
}

/// Errors surfaced while grading a single submission.
#[derive(thiserror::Error, Debug)]
pub enum SubmissionError {
    /// A required field is missing or malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Every candidate URL failed.
    #[error(
        "Could not fetch the page: none of the {attempted} candidate URL(s) succeeded \
         ({reason})"
    )]
    FetchExhausted {
        /// Number of candidates tried.
        attempted: usize,
        /// Collapsed cause, decided by the final attempt.
        reason:    FailureReason,
        /// One record per candidate, in the order they were tried.
        attempts:  Vec<FailedAttempt>,
    },
}

impl SubmissionError {
    /// Returns true when the submission failed because the deciding fetch
    /// attempt timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            SubmissionError::FetchExhausted {
                reason: FailureReason::TimedOut,
                ..
            }
        )
    }

    /// Returns true for user input problems.
    pub fn is_validation(&self) -> bool {
        matches!(self, SubmissionError::Validation(_))
    }

    /// Hints shown alongside a fetch failure telling the student what the
    /// grader expects to find.
    pub fn guidance(&self) -> Option<Vec<String>> {
        match self {
            SubmissionError::FetchExhausted { .. } => Some(vec![
                "Your GitHub username is correct".to_string(),
                "You have a repository named <username>.github.io (or the project named in the \
                 URL)"
                    .to_string(),
                "There's an index.html file on the main (or master) branch".to_string(),
                "The repository is public".to_string(),
            ]),
            _ => None,
        }
    }
}
