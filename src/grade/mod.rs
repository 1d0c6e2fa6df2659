#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Suggestion text for graded pages.
pub mod feedback;
/// Extracting class tokens from HTML.
pub mod matcher;
/// Grade report types.
pub mod results;
/// The list of classes a page must use.
pub mod rubric;

pub use feedback::suggestions;
pub use results::{ClassRow, GradeReport, GradeTier, MAX_GRADE, grade_for};
pub use rubric::{RequiredClasses, RubricError};

/// Scores HTML against a fixed set of required classes.
#[derive(Debug, Clone, Default)]
pub struct ClassGrader {
    /// The rubric every page is checked against.
    required: RequiredClasses,
}

impl ClassGrader {
    /// Creates a grader for `required`.
    pub fn new(required: RequiredClasses) -> Self {
        Self { required }
    }

    /// The rubric in use.
    pub fn required(&self) -> &RequiredClasses {
        &self.required
    }

    /// Checks `html` for every required class.
    ///
    /// Any text is accepted; content without `class` attributes simply finds
    /// nothing.
    pub fn grade(&self, html: &str) -> GradeReport {
        let tokens = matcher::class_tokens(html);
        let (found, missing): (Vec<String>, Vec<String>) = self
            .required
            .names()
            .iter()
            .cloned()
            .partition(|class| tokens.contains(class.as_str()));

        let total = self.required.len();
        let grade = grade_for(found.len(), total);
        let tier = GradeTier::for_grade(grade);
        let suggestions = suggestions(&missing, tier);

        tracing::debug!("{} of {total} required classes found", found.len());

        GradeReport {
            found,
            missing,
            grade,
            total,
            tier,
            suggestions,
        }
    }
}
