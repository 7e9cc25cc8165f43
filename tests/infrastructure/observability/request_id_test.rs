use axum::http::{HeaderMap, HeaderValue};

use asr_relay::infrastructure::observability::{REQUEST_ID_HEADER, RequestId};

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_header_with_id_when_reading_then_reuses_caller_id() {
    let mut headers = HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-123"));

    assert_eq!(RequestId::from_headers(&headers).as_str(), "abc-123");
}

#[test]
fn given_blank_or_missing_header_when_reading_then_generates_uuid() {
    let mut headers = HeaderMap::new();
    let generated = RequestId::from_headers(&headers);
    assert_eq!(generated.as_str().len(), 36);

    headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("   "));
    let generated = RequestId::from_headers(&headers);
    assert_eq!(generated.as_str().len(), 36);
}

#[test]
fn given_two_generated_ids_when_compared_then_they_differ() {
    assert_ne!(RequestId::generate(), RequestId::generate());
}
