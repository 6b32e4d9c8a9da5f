use super::*;

fn response(status: u16, body: &str) -> RawResponse {
    RawResponse { status, body: body.to_owned() }
}

// =============================================================
// URL helpers
// =============================================================

#[test]
fn join_url_handles_slashes() {
    assert_eq!(join_url("https://api.test/", "/auth/register"), "https://api.test/auth/register");
    assert_eq!(join_url("https://api.test", "users/update"), "https://api.test/users/update");
}

#[test]
fn join_url_with_empty_base_is_same_origin() {
    assert_eq!(join_url("  ", "/api/welcome/email"), "/api/welcome/email");
}

#[test]
fn bearer_header_formats_token() {
    assert_eq!(bearer_header("abc"), "Bearer abc");
    assert_eq!(bearer_header(""), "Bearer ");
}

// =============================================================
// decode_json
// =============================================================

#[test]
fn decode_json_parses_success_body() {
    let value: serde_json::Value = decode_json(&response(200, r#"{"a":1}"#)).unwrap();
    assert_eq!(value["a"], 1);
}

#[test]
fn decode_json_maps_error_status() {
    let err = decode_json::<serde_json::Value>(&response(404, " missing ")).unwrap_err();
    assert_eq!(err, AppError::Http { status: 404, message: "missing".to_owned() });
}

#[test]
fn decode_json_reports_parse_failures() {
    let err = decode_json::<serde_json::Value>(&response(200, "<html>")).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));
}

// =============================================================
// decode_envelope
// =============================================================

#[derive(Debug, PartialEq, serde::Deserialize)]
struct Payload {
    uid: String,
}

#[test]
fn decode_envelope_returns_data_on_success() {
    let payload: Payload = decode_envelope(&response(200, r#"{"success":true,"data":{"uid":"u1"}}"#)).unwrap();
    assert_eq!(payload, Payload { uid: "u1".to_owned() });
}

#[test]
fn decode_envelope_prefers_backend_message_over_status() {
    let err = decode_envelope::<Payload>(&response(409, r#"{"success":false,"error":"Email already registered"}"#))
        .unwrap_err();
    assert_eq!(err, AppError::Api("Email already registered".to_owned()));
}

#[test]
fn decode_envelope_without_envelope_on_error_status_is_http() {
    let err = decode_envelope::<Payload>(&response(502, "Bad Gateway")).unwrap_err();
    assert_eq!(err, AppError::Http { status: 502, message: "Bad Gateway".to_owned() });
}

#[test]
fn decode_envelope_rejects_malformed_success_body() {
    let err = decode_envelope::<Payload>(&response(200, "ok")).unwrap_err();
    assert!(matches!(err, AppError::Parse(_)));
}

#[test]
fn decode_ack_accepts_success_without_data() {
    assert_eq!(decode_ack(&response(200, r#"{"success":true}"#)), Ok(()));
    assert_eq!(decode_ack(&response(200, r#"{"success":true,"data":{"messageId":"m1"}}"#)), Ok(()));
}

#[test]
fn decode_ack_reports_refusal_and_bad_status() {
    assert_eq!(
        decode_ack(&response(401, r#"{"success":false,"error":"Unauthorized"}"#)),
        Err(AppError::Api("Unauthorized".to_owned()))
    );
    assert!(matches!(decode_ack(&response(500, "boom")), Err(AppError::Http { status: 500, .. })));
}

#[test]
fn decode_envelope_rejects_success_flag_on_error_status() {
    let err = decode_envelope::<Payload>(&response(503, r#"{"success":true,"data":{"uid":"u1"}}"#)).unwrap_err();
    assert!(matches!(err, AppError::Http { status: 503, .. }));
}

#[test]
fn decode_ack_rejects_success_flag_on_error_status() {
    let err = decode_ack(&response(500, r#"{"success":true}"#)).unwrap_err();
    assert!(matches!(err, AppError::Http { status: 500, .. }));
}

// =============================================================
// Transport
// =============================================================

#[test]
fn classify_transport_error_detects_timeouts() {
    assert!(matches!(classify_transport_error("The operation was aborted."), AppError::Timeout(_)));
    assert!(matches!(classify_transport_error("TypeError: Failed to fetch"), AppError::Network(_)));
}

#[test]
fn body_read_error_is_network_failure() {
    let err = body_read_error("stream closed");
    assert_eq!(err, AppError::Network("Failed to read response: stream closed".to_owned()));
}

#[test]
fn send_is_unavailable_without_browser() {
    let result = futures::executor::block_on(send(HttpMethod::Get, "/x", RequestBody::Empty, None));
    assert!(matches!(result, Err(AppError::Network(_))));
}

#[test]
fn encode_json_wraps_payload() {
    let body = encode_json(&serde_json::json!({ "k": "v" })).unwrap();
    assert_eq!(body, RequestBody::Json(r#"{"k":"v"}"#.to_owned()));
}
