//! # pagegrade
//!
//! Grades a student's GitHub Pages site by checking its HTML for a fixed set
//! of Bootstrap utility classes.
//!
//! The pipeline is: validate the [`Submission`], let the
//! [`locator::Locator`] find and fetch the raw HTML, score it with a
//! [`grade::ClassGrader`], and hand the [`GradedSubmission`] to
//! [`report`] for display.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Environment driven runtime configuration
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Error types surfaced per submission
pub mod error;
/// For all things related to grading
pub mod grade;
/// Resolving student input into fetchable HTML
pub mod locator;
/// Terminal and JSON rendering of results
pub mod report;

use error::{SubmissionError, ValidationError};
use grade::{ClassGrader, GradeReport};
use locator::{Locator, Target};
use serde::Serialize;

/// A validated request to grade one student's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Display name, only used for presentation.
    student: String,
    /// GitHub username or URL as typed, trimmed.
    input:   String,
    /// Parsed form of `input`.
    #[serde(skip)]
    target:  Target,
}

impl Submission {
    /// Validates the two user-provided fields.
    pub fn new(student: &str, input: &str) -> Result<Self, ValidationError> {
        let student = student.trim();
        if student.is_empty() {
            return Err(ValidationError::MissingName);
        }
        let target = Target::parse(input)?;

        Ok(Self {
            student: student.to_string(),
            input: input.trim().to_string(),
            target,
        })
    }

    /// The student's display name.
    pub fn student(&self) -> &str {
        &self.student
    }

    /// The trimmed username or URL.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The classified target.
    pub fn target(&self) -> &Target {
        &self.target
    }
}

/// A submission together with the page it resolved to and its grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradedSubmission {
    /// What was graded.
    pub submission: Submission,
    /// URL the HTML was fetched from.
    pub source_url: String,
    /// The grade and feedback.
    pub report:     GradeReport,
}

/// Fetches and grades one submission.
///
/// Scoring only starts once a candidate has been fetched; when none can be,
/// the fetch failure is returned instead of a partial report.
pub async fn grade_submission(
    submission: Submission,
    locator: &Locator,
    grader: &ClassGrader,
) -> Result<GradedSubmission, SubmissionError> {
    let page = locator.fetch(submission.target()).await?;
    let report = grader.grade(&page.body);

    Ok(GradedSubmission {
        submission,
        source_url: page.url,
        report,
    })
}
