use std::time::Duration;

use pagegrade::{
    Submission,
    constants::DEFAULT_REQUIRED_CLASSES,
    error::{SubmissionError, ValidationError},
    grade::{ClassGrader, GradeTier, RequiredClasses},
    grade_submission,
    locator::Locator,
    report,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Builds a page using the first `n` required classes, spread over elements
/// with mixed quoting.
fn page_with(n: usize) -> String {
    let body: String = DEFAULT_REQUIRED_CLASSES
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, class)| {
            if i % 2 == 0 {
                format!("<div class=\"container {class}\">{i}</div>\n")
            } else {
                format!("<p class='{class} lead'>{i}</p>\n")
            }
        })
        .collect();
    format!("<!DOCTYPE html><html><body>\n{body}</body></html>")
}

#[test]
fn found_and_missing_partition_the_rubric() {
    let grader = ClassGrader::default();
    for n in 0..=16 {
        let report = grader.grade(&page_with(n));
        assert_eq!(report.found().len() + report.missing().len(), 16);
        assert!(report.found().iter().all(|c| !report.missing().contains(c)));

        let mut merged: Vec<&String> = report.found().iter().chain(report.missing()).collect();
        let rubric: Vec<&str> = DEFAULT_REQUIRED_CLASSES.to_vec();
        merged.sort_by_key(|c| rubric.iter().position(|r| *r == c.as_str()));
        assert_eq!(merged, rubric);

        let order = |list: &[String]| -> Vec<usize> {
            list.iter()
                .map(|c| rubric.iter().position(|r| *r == c.as_str()).expect("in rubric"))
                .collect()
        };
        assert!(order(report.found()).is_sorted());
        assert!(order(report.missing()).is_sorted());
    }
}

#[test]
fn grade_matches_reference_for_every_found_count() {
    let expected = [0u8, 1, 1, 2, 3, 3, 4, 4, 5, 6, 6, 7, 8, 8, 9, 9, 10];
    let grader = ClassGrader::default();
    for (n, grade) in expected.iter().enumerate() {
        let report = grader.grade(&page_with(n));
        assert_eq!(report.found().len(), n);
        assert_eq!(report.grade(), *grade, "found = {n}");
        assert_eq!(report.total(), 16);
    }
}

#[test]
fn grading_is_idempotent() {
    let grader = ClassGrader::default();
    let html = page_with(9);
    assert_eq!(grader.grade(&html), grader.grade(&html));
}

#[test]
fn token_boundary_and_quote_style() {
    let grader = ClassGrader::default();

    let report = grader.grade(r#"<span class="text-primary-custom">x</span>"#);
    assert!(!report.found().iter().any(|c| c == "text-primary"));

    let report = grader.grade(r#"<span class="fw-bold text-center">x</span>"#);
    assert!(report.found().iter().any(|c| c == "fw-bold"));
    assert!(report.found().iter().any(|c| c == "text-center"));

    for html in ["<div class='bg-dark'></div>", r#"<div class="bg-dark"></div>"#] {
        let report = grader.grade(html);
        assert_eq!(report.found(), ["bg-dark"]);
    }
}

#[test]
fn tier_sentences_at_boundaries() {
    let grader = ClassGrader::default();

    let seven = grader.grade(&page_with(11));
    assert_eq!(seven.grade(), 7);
    assert_eq!(seven.tier(), GradeTier::Great);
    assert!(seven.suggestions().iter().any(|s| s == GradeTier::Great.sentence()));

    let six = grader.grade(&page_with(10));
    assert_eq!(six.grade(), 6);
    assert_eq!(six.tier(), GradeTier::GoodStart);
    assert!(six.suggestions().iter().any(|s| s == GradeTier::GoodStart.sentence()));

    let perfect = grader.grade(&page_with(16));
    assert!(perfect.is_perfect());
    assert_eq!(perfect.suggestions()[0], GradeTier::Perfect.sentence());
}

#[test]
fn suggestions_list_missing_buckets_in_rubric_order() {
    let report = ClassGrader::default().grade(&page_with(12));
    assert_eq!(
        report.suggestions(),
        [
            "Missing 4 required Bootstrap classes",
            "Add text utility classes: text-light",
            "Add background classes: bg-danger, bg-warning, bg-dark",
            "Great work! Just a few more classes needed",
        ]
    );
}

#[test]
fn non_html_input_finds_nothing() {
    let grader = ClassGrader::new(RequiredClasses::new(["btn", "card"]).expect("rubric"));
    let report = grader.grade("{\"class\": \"btn\"} \u{0}\u{1} plain text");
    assert!(report.found().is_empty());
    assert_eq!(report.grade(), 0);
}

#[test]
fn submission_requires_both_fields() {
    assert_eq!(Submission::new("  ", "alice"), Err(ValidationError::MissingName));
    assert_eq!(Submission::new("Alice", ""), Err(ValidationError::MissingTarget));
    let submission = Submission::new(" Alice ", " alice ").expect("valid");
    assert_eq!(submission.student(), "Alice");
    assert_eq!(submission.input(), "alice");
}

#[tokio::test]
async fn pipeline_grades_the_fetched_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ada/ada.github.io/main/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_with(16)))
        .mount(&server)
        .await;

    let locator = Locator::builder()
        .raw_base(server.uri())
        .timeout(Duration::from_secs(2))
        .build();
    let grader = ClassGrader::default();
    let submission = Submission::new("Ada", "ada").expect("valid");

    let graded = grade_submission(submission, &locator, &grader)
        .await
        .expect("graded");

    assert_eq!(graded.report.grade(), 10);
    assert!(graded.source_url.ends_with("/ada/ada.github.io/main/index.html"));

    let json: serde_json::Value =
        serde_json::from_str(&report::render_json(&graded).expect("json")).expect("parse");
    assert_eq!(json["report"]["grade"], 10);
    assert_eq!(json["report"]["tier"], "perfect");
    assert_eq!(json["submission"]["student"], "Ada");

    let text = report::render_text(&graded, grader.required(), true);
    assert!(text.contains("Ada's Results"));
}

#[tokio::test]
async fn pipeline_never_returns_partial_report_on_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let locator = Locator::builder().raw_base(server.uri()).build();
    let submission = Submission::new("Bea", "bea").expect("valid");
    let err = grade_submission(submission, &locator, &ClassGrader::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmissionError::FetchExhausted { attempted: 1, .. }));
    let rendered = report::render_error(&err);
    assert!(rendered.contains("none of the 1 candidate URL(s) succeeded"));
    assert!(rendered.contains("The repository is public"));
}
