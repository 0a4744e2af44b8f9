//! Fixed CORS policy: one allowed origin, `POST` + `OPTIONS`, and the `Content-Type` header.
//! No credentials, no per-request variation.

use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderName, HeaderValue,
    },
    response::Response,
};

pub const ALLOWED_ORIGIN: &str = "https://axinbox.com";
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOWED_ORIGIN),
        ),
        (
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ),
        (
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ),
    ]
}

/// Merges the policy headers into every outgoing response, overwriting any existing values.
pub async fn apply_cors_headers(mut resp: Response) -> Response {
    let headers = resp.headers_mut();
    for (name, value) in cors_headers() {
        headers.insert(name, value);
    }
    resp
}
