#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use serde::Serialize;
use tabled::Tabled;

/// Highest grade a submission can receive.
pub const MAX_GRADE: u8 = 10;

/// Converts a found count into a grade out of [`MAX_GRADE`].
///
/// Rounds half up, like `Math.round` on non-negative values: 4 of 16 (2.5)
/// becomes 3. Integer arithmetic keeps every total exact.
pub fn grade_for(found: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let found = found.min(total);
    let max = usize::from(MAX_GRADE);
    ((2 * found * max + total) / (2 * total)) as u8
}

/// Feedback band a grade falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeTier {
    /// Every required class is present.
    Perfect,
    /// 7 to 9.
    Great,
    /// 5 or 6.
    GoodStart,
    /// 4 or below.
    KeepPracticing,
}

impl GradeTier {
    /// Tier for a grade out of [`MAX_GRADE`].
    pub fn for_grade(grade: u8) -> Self {
        match grade {
            g if g >= MAX_GRADE => GradeTier::Perfect,
            7..=9 => GradeTier::Great,
            5..=6 => GradeTier::GoodStart,
            _ => GradeTier::KeepPracticing,
        }
    }

    /// Short label, e.g. for a badge.
    pub fn label(&self) -> &'static str {
        match self {
            GradeTier::Perfect => "perfect",
            GradeTier::Great => "great",
            GradeTier::GoodStart => "good start",
            GradeTier::KeepPracticing => "keep practicing",
        }
    }

    /// The feedback sentence for this tier.
    pub fn sentence(&self) -> &'static str {
        match self {
            GradeTier::Perfect => "Perfect! All required Bootstrap classes are present! 🎉",
            GradeTier::Great => "Great work! Just a few more classes needed",
            GradeTier::GoodStart => {
                "Good start! Review Bootstrap documentation for missing classes"
            }
            GradeTier::KeepPracticing => {
                "Keep practicing! Make sure to include all required Bootstrap utility classes"
            }
        }
    }
}

impl Display for GradeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of checking one page against the required classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeReport {
    /// Required classes present in the page, in rubric order.
    pub(crate) found:       Vec<String>,
    /// Required classes absent from the page, in rubric order.
    pub(crate) missing:     Vec<String>,
    /// Grade out of [`MAX_GRADE`].
    pub(crate) grade:       u8,
    /// Size of the rubric.
    pub(crate) total:       usize,
    /// Feedback band for `grade`.
    pub(crate) tier:        GradeTier,
    /// Suggestions for the student, in display order.
    pub(crate) suggestions: Vec<String>,
}

impl GradeReport {
    /// Classes that were found.
    pub fn found(&self) -> &[String] {
        &self.found
    }

    /// Classes that were not found.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Grade out of [`MAX_GRADE`].
    pub fn grade(&self) -> u8 {
        self.grade
    }

    /// Number of required classes.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Feedback band.
    pub fn tier(&self) -> GradeTier {
        self.tier
    }

    /// Suggestion lines.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Whether every required class was found.
    pub fn is_perfect(&self) -> bool {
        self.missing.is_empty()
    }

    /// One table row per required class, in rubric order.
    pub fn rows<'r>(&self, rubric: impl IntoIterator<Item = &'r str>) -> Vec<ClassRow> {
        rubric
            .into_iter()
            .map(|class| ClassRow {
                class:  class.to_string(),
                status: if self.found.iter().any(|f| f == class) {
                    "found".to_string()
                } else {
                    "missing".to_string()
                },
            })
            .collect()
    }
}

/// A row of the class overview table.
#[derive(Tabled, Debug, Clone)]
pub struct ClassRow {
    #[tabled(rename = "Class")]
    /// The required class.
    pub class:  String,
    #[tabled(rename = "Status")]
    /// `found` or `missing`.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_rounds_half_up_over_sixteen() {
        let expected = [0, 1, 1, 2, 3, 3, 4, 4, 5, 6, 6, 7, 8, 8, 9, 9, 10];
        for (found, grade) in expected.iter().enumerate() {
            assert_eq!(grade_for(found, 16), *grade, "found = {found}");
        }
    }

    #[test]
    fn grade_handles_other_rubric_sizes() {
        assert_eq!(grade_for(1, 4), 3);
        assert_eq!(grade_for(1, 3), 3);
        assert_eq!(grade_for(2, 3), 7);
        assert_eq!(grade_for(1, 20), 1);
        assert_eq!(grade_for(5, 5), 10);
        assert_eq!(grade_for(0, 0), 0);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(GradeTier::for_grade(10), GradeTier::Perfect);
        assert_eq!(GradeTier::for_grade(9), GradeTier::Great);
        assert_eq!(GradeTier::for_grade(7), GradeTier::Great);
        assert_eq!(GradeTier::for_grade(6), GradeTier::GoodStart);
        assert_eq!(GradeTier::for_grade(5), GradeTier::GoodStart);
        assert_eq!(GradeTier::for_grade(4), GradeTier::KeepPracticing);
        assert_eq!(GradeTier::for_grade(0), GradeTier::KeepPracticing);
    }

    #[test]
    fn perfect_sentence_celebrates() {
        assert!(GradeTier::Perfect.sentence().ends_with(" 🎉"));
        assert_eq!(GradeTier::Great.sentence(), "Great work! Just a few more classes needed");
    }
}
