#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::Itertools;

use super::results::GradeTier;

/// Extra tip shown once everything is present.
pub const PERFECT_FOLLOW_UP: &str = "Consider adding more Bootstrap components for extra practice";

/// Groups of missing classes that each get their own suggestion line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    /// `text-*` classes.
    Text,
    /// `bg-*` classes.
    Background,
    /// Everything else, e.g. `fw-bold` or `mb-4`.
    Utility,
}

impl Bucket {
    /// Bucket a class name belongs to.
    fn of(class: &str) -> Self {
        if class.starts_with("text-") {
            Bucket::Text
        } else if class.starts_with("bg-") {
            Bucket::Background
        } else {
            Bucket::Utility
        }
    }

    /// Lead-in for the suggestion line.
    fn prompt(&self) -> &'static str {
        match self {
            Bucket::Text => "Add text utility classes",
            Bucket::Background => "Add background classes",
            Bucket::Utility => "Add utility classes",
        }
    }
}

/// Builds the suggestion lines for a graded page.
///
/// `missing` must already be in rubric order; each bucket line keeps it.
pub fn suggestions(missing: &[String], tier: GradeTier) -> Vec<String> {
    let mut lines = Vec::new();

    if !missing.is_empty() {
        lines.push(format!("Missing {} required Bootstrap classes", missing.len()));

        for bucket in [Bucket::Text, Bucket::Background, Bucket::Utility] {
            let members = missing
                .iter()
                .filter(|class| Bucket::of(class) == bucket)
                .join(", ");
            if !members.is_empty() {
                lines.push(format!("{}: {members}", bucket.prompt()));
            }
        }
    }

    lines.push(tier.sentence().to_string());
    if tier == GradeTier::Perfect {
        lines.push(PERFECT_FOLLOW_UP.to_string());
    }

    lines
}
