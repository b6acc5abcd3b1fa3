#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    bingo_test_support::logging::init();
}

/// Assert a response is an RFC 7807 problem document with the given status
/// and error code.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).expect("Response body should be valid UTF-8");
    let problem: Value = serde_json::from_str(body_str)
        .unwrap_or_else(|_| panic!("Failed to parse error body as ProblemDetails. Raw body: {body_str}"));

    for key in ["type", "title", "status", "detail", "code"] {
        assert!(problem.get(key).is_some(), "{key} field should be present");
    }
    assert_eq!(problem["code"], expected_code);
    assert_eq!(problem["status"], expected_status);
    assert!(
        problem["type"]
            .as_str()
            .is_some_and(|t| t.starts_with("https://bingo.local/errors/")),
        "type should follow the expected URL format"
    );

    problem
}
