//! Tests for domain error construction and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::vaccine_unavailable("empty"), ErrorCode::VaccineUnavailable)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::invalid_request("bad").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[tokio::test]
async fn captures_trace_id_in_scope() {
    let id = TraceId::generate();
    let error = TraceId::scope(id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(id.to_string().as_str()));
}

#[rstest]
fn serialises_snake_case_code_and_camel_case_fields() {
    let error = Error::vaccine_unavailable("Vaccine not available.")
        .with_trace_id("abc")
        .with_details(json!({ "vaccine": "Covaxin" }));
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "vaccine_unavailable",
            "message": "Vaccine not available.",
            "traceId": "abc",
            "details": { "vaccine": "Covaxin" },
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::not_found("gone")).expect("serialise error");
    assert!(value.get("details").is_none());
    assert!(value.get("traceId").is_none());
}
