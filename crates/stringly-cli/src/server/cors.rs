//! CORS policy: local development origins and *.stringlytyped.com

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method};
use lazy_static::lazy_static;
use regex::Regex;
use tower_http::cors::{AllowOrigin, CorsLayer};

lazy_static! {
    static ref ALLOWED_ORIGINS: Vec<Regex> = vec![
        Regex::new(r"^https?://localhost(:[0-9]+)?$").unwrap(),
        Regex::new(r"^https?://127\.0\.0\.1(:[0-9]+)?$").unwrap(),
        Regex::new(r"^https://.*\.stringlytyped\.com$").unwrap(),
    ];
}

pub fn is_allowed_origin(origin: &str) -> bool {
    ALLOWED_ORIGINS.iter().any(|pattern| pattern.is_match(origin))
}

pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| {
                origin.to_str().map(is_allowed_origin).unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT])
        .allow_credentials(true)
}
