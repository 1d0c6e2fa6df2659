#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::{Context, Result};
use colored::Colorize;
use itertools::Itertools;
use tabled::{
    Table,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use crate::{
    GradedSubmission,
    error::SubmissionError,
    grade::{GradeTier, MAX_GRADE, RequiredClasses},
    locator::Candidate,
};

/// Width of the text progress bar, in cells.
const BAR_WIDTH: usize = 20;

/// Renders a `[#####.....]` bar for a grade out of [`MAX_GRADE`].
pub fn progress_bar(grade: u8) -> String {
    let filled = usize::from(grade.min(MAX_GRADE)) * BAR_WIDTH / usize::from(MAX_GRADE);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Colors a grade line by tier.
fn tier_colored(tier: GradeTier, text: String) -> String {
    match tier {
        GradeTier::Perfect | GradeTier::Great => text.green().bold().to_string(),
        GradeTier::GoodStart => text.yellow().bold().to_string(),
        GradeTier::KeepPracticing => text.red().bold().to_string(),
    }
}

/// Renders the per-class overview table.
pub fn class_table(graded: &GradedSubmission, rubric: &RequiredClasses) -> String {
    let report = &graded.report;
    let rows = report.rows(rubric.iter());

    Table::new(&rows)
        .with(Panel::header(format!("{}'s Results", graded.submission.student())))
        .with(Panel::footer(format!(
            "Total: {}/{MAX_GRADE} ({} of {} classes found)",
            report.grade(),
            report.found().len(),
            report.total()
        )))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(
            Modify::new(Rows::last())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern())
        .to_string()
}

/// Renders a graded submission for the terminal.
pub fn render_text(
    graded: &GradedSubmission,
    rubric: &RequiredClasses,
    show_table: bool,
) -> String {
    let report = &graded.report;

    let heading = if show_table {
        class_table(graded, rubric)
    } else {
        format!("{}'s Results", graded.submission.student().bold())
    };
    let mut out = format!(
        "{heading}\n\nSource: {}\n{} {}\n{} out of {} classes found\n",
        graded.source_url,
        tier_colored(report.tier(), format!("{}/{MAX_GRADE}", report.grade())),
        progress_bar(report.grade()),
        report.found().len(),
        report.total()
    );

    if !report.found().is_empty() {
        out.push_str(&format!(
            "\n{} ({})\n  {}\n",
            "Found Classes".green().bold(),
            report.found().len(),
            report.found().iter().map(|c| c.green()).join("  ")
        ));
    }
    if !report.missing().is_empty() {
        out.push_str(&format!(
            "\n{} ({})\n  {}\n",
            "Missing Classes".red().bold(),
            report.missing().len(),
            report.missing().iter().map(|c| c.red()).join("  ")
        ));
    }

    out.push_str(&format!(
        "\n{}\n{}\n",
        "Suggestions & Feedback".blue().bold(),
        report.suggestions().iter().map(|line| format!("  • {line}")).join("\n")
    ));

    out
}

/// Serializes a graded submission as pretty JSON.
pub fn render_json(graded: &GradedSubmission) -> Result<String> {
    serde_json::to_string_pretty(graded).context("Failed to serialize grade report")
}

/// Renders an error for the terminal, with guidance for fetch failures.
pub fn render_error(err: &SubmissionError) -> String {
    let mut out = format!("{} {err}", "Error:".red().bold());

    if let SubmissionError::FetchExhausted { attempts, .. } = err {
        for attempt in attempts {
            out.push_str(&format!(
                "\n  - {} ({}: {})",
                attempt.url, attempt.reason, attempt.detail
            ));
        }
    }

    if let Some(hints) = err.guidance() {
        let hints = hints
            .iter()
            .enumerate()
            .map(|(i, hint)| format!("{}. {hint}", i + 1))
            .join("\n");
        out.push_str(&format!("\n\nMake sure:\n{hints}"));
    }

    out
}

/// Lists candidate URLs in the order they would be tried.
pub fn render_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}  ({})", i + 1, c.url(), c.label()))
        .join("\n")
}
