//! JSON error responses with a uniform shape
//!
//! ```json
//! {
//!   "error": "snake_code",
//!   "message": "Human readable detail"
//! }
//! ```

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};

type Resp = Response<Full<Bytes>>;

pub fn json_error(status: StatusCode, code: &str, message: &str) -> Resp {
    let body = serde_json::json!({ "error": code, "message": message }).to_string();
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

/// 405 Method Not Allowed with Allow header
pub fn method_not_allowed(allowed: &str) -> Resp {
    let body =
        serde_json::json!({ "error": "method_not_allowed", "allow": allowed }).to_string();
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("content-type", "application/json")
        .header("allow", allowed)
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

pub fn not_found() -> Resp {
    json_error(StatusCode::NOT_FOUND, "not_found", "No such route")
}
