//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;
use super::fixtures::{JOB_PREFIX, JOB_TRAILER};

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an ApiError body: `{"status": ..., "error": ...}`
pub fn assert_api_error(response: &TestResponse, expected: StatusCode, message: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(expected.as_u16() as u64));
    assert_eq!(json["error"], message);
}

/// Assert the job was accepted
pub fn assert_job_sent(response: &TestResponse) {
    assert_ok(response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["message"], "Print job sent");
}

/// Assert bytes form one complete raster job and return (width_bytes, height)
pub fn assert_raster_job(bytes: &[u8]) -> (usize, usize) {
    assert!(
        bytes.len() >= JOB_PREFIX.len() + 4 + JOB_TRAILER.len(),
        "Job too short: {} bytes",
        bytes.len()
    );
    assert_eq!(&bytes[..6], &JOB_PREFIX);
    assert_eq!(&bytes[bytes.len() - 5..], &JOB_TRAILER);

    let width_bytes = u16::from_le_bytes([bytes[6], bytes[7]]) as usize;
    let height = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
    assert_eq!(
        bytes.len(),
        10 + width_bytes * height + 5,
        "Payload length disagrees with header {width_bytes}x{height}"
    );
    (width_bytes, height)
}
