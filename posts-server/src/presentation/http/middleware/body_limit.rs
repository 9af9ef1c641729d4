use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

/// Bodies above `limit_bytes` are answered with 413.
pub(crate) fn apply_body_limit(router: Router, limit_bytes: usize) -> Router {
    router.layer(RequestBodyLimitLayer::new(limit_bytes))
}
