//! Request guards: API-key authentication and CORS origin matching.

use crate::AppState;
use api_shared::auth::API_KEY_HEADER;
use api_shared::ErrorRes;
use axum::extract::{Request, State};
use axum::http::{header, request::Parts, HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Rejects requests without an accepted `X-API-Key` header.
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    let result = state.api_keys.validate(provided);

    match result {
        Ok(()) => next.run(req).await,
        Err(err) => {
            tracing::warn!(path = %req.uri().path(), error = %err, "api key rejected");
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorRes {
                    message: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// CORS for the configured origin patterns (`*` matches any run of characters).
pub fn cors_layer(patterns: &[String]) -> CorsLayer {
    let patterns: Arc<[String]> = patterns.into();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| patterns.iter().any(|p| origin_matches(p, origin)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(API_KEY_HEADER),
            HeaderName::from_static("x-correlation-id"),
        ])
}

pub fn origin_matches(pattern: &str, origin: &str) -> bool {
    let mut segments = pattern.split('*');
    let head = segments.next().unwrap_or_default();
    let Some(mut rest) = origin.strip_prefix(head) else {
        return false;
    };

    let tail: Vec<&str> = segments.collect();
    let Some((last, middle)) = tail.split_last() else {
        // no wildcard
        return rest.is_empty();
    };

    for segment in middle {
        match rest.find(segment) {
            Some(idx) => rest = &rest[idx + segment.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::origin_matches;

    #[test]
    fn exact_patterns() {
        assert!(origin_matches("https://app.example.org", "https://app.example.org"));
        assert!(!origin_matches("https://app.example.org", "https://app.example.org.evil"));
    }

    #[test]
    fn port_wildcard() {
        assert!(origin_matches("http://localhost:*", "http://localhost:3000"));
        assert!(!origin_matches("http://localhost:*", "http://localhost.evil:3000"));
        assert!(!origin_matches("http://localhost:*", "https://localhost:3000"));
    }

    #[test]
    fn subdomain_wildcard() {
        assert!(origin_matches("https://*.example.org", "https://a.example.org"));
        assert!(origin_matches("https://*.example.org:*", "https://a.b.example.org:8443"));
        assert!(!origin_matches("https://*.example.org", "https://example.com"));
        assert!(!origin_matches("https://*.example.org", "https://a.example.org:8443"));
    }
}
