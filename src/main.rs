#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # pagegrade
//!
//! Checks a student's GitHub Pages site for the Bootstrap utility classes the
//! exercise requires, and prints a grade out of 10 with feedback.
//!
//! ```text
//! pagegrade grade --name "Ada Lovelace" ada
//! pagegrade grade --name "Frank" https://frank.github.io/proj --json
//! pagegrade candidates frank.github.io/proj
//! ```

use std::process::ExitCode;

use anyhow::Result;
use bpaf::*;
use dotenvy::dotenv;
use pagegrade::{
    Submission, config,
    error::SubmissionError,
    grade::ClassGrader,
    grade_submission,
    locator::{Locator, Target},
    report,
};
use tracing::metadata::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Exit code for submissions whose page could not be fetched.
const EXIT_FETCH_FAILED: u8 = 1;
/// Exit code for missing or malformed input.
const EXIT_INVALID_INPUT: u8 = 2;

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Fetch and grade a student's page
    Grade {
        /// Student display name
        name:     String,
        /// Print JSON instead of the terminal report
        json:     bool,
        /// Skip the per-class table
        no_table: bool,
        /// GitHub username or URL
        target:   String,
    },
    /// Print the URLs that would be tried for a target
    Candidates(String),
    /// Print the required classes
    Classes,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the GitHub username or URL
    fn t() -> impl Parser<String> {
        positional("USERNAME/URL")
            .help("GitHub username, or a link to the student's page or repository")
    }

    let name = long("name")
        .short('n')
        .help("Student name, shown in the results")
        .argument::<String>("NAME");
    let json = long("json").help("Print the results as JSON").switch();
    let no_table = long("no-table")
        .help("Skip the per-class overview table")
        .switch();
    let target = t();

    let grade = construct!(Cmd::Grade {
        name,
        json,
        no_table,
        target
    })
    .to_options()
    .command("grade")
    .help("Fetch a student's page and grade it");

    let candidates = construct!(Cmd::Candidates(t()))
        .to_options()
        .command("candidates")
        .help("List the URLs that would be tried, without fetching them");

    let classes = pure(Cmd::Classes)
        .to_options()
        .command("classes")
        .help("List the required Bootstrap classes");

    let cmd = construct!([grade, candidates, classes]);

    cmd.to_options()
        .descr("Bootstrap class checker for GitHub Pages submissions")
        .run()
}

/// Prints a submission error and picks the exit code for it.
fn report_failure(err: &SubmissionError) -> ExitCode {
    eprintln!("{}", report::render_error(err));
    if err.is_validation() {
        ExitCode::from(EXIT_INVALID_INPUT)
    } else {
        ExitCode::from(EXIT_FETCH_FAILED)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    let config = config::ensure_initialized()?;

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer = LevelFilter::from_level(config.log_level());
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();

    match cmd {
        Cmd::Grade {
            name,
            json,
            no_table,
            target,
        } => {
            let submission = match Submission::new(&name, &target) {
                Ok(submission) => submission,
                Err(e) => return Ok(report_failure(&e.into())),
            };
            let locator = Locator::from_config(&config);
            let grader = ClassGrader::default();

            match grade_submission(submission, &locator, &grader).await {
                Ok(graded) => {
                    if json {
                        println!("{}", report::render_json(&graded)?);
                    } else {
                        print!("{}", report::render_text(&graded, grader.required(), !no_table));
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => Ok(report_failure(&e)),
            }
        }
        Cmd::Candidates(target) => match Target::parse(&target) {
            Ok(target) => {
                let locator = Locator::from_config(&config);
                println!("{}", report::render_candidates(&locator.candidates(&target)));
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => Ok(report_failure(&e.into())),
        },
        Cmd::Classes => {
            for class in ClassGrader::default().required().iter() {
                println!("{class}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
