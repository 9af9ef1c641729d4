use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::infrastructure::settings::CorsOrigins;

const ALLOWED_METHODS: [Method; 7] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// Request headers are mirrored back, so any header a browser asks for is allowed.
pub(crate) fn build_cors_layer(origins: &CorsOrigins) -> Result<CorsLayer> {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => {
            let values = list
                .iter()
                .map(|origin| {
                    HeaderValue::from_str(origin)
                        .with_context(|| format!("invalid CORS origin '{origin}'"))
                })
                .collect::<Result<Vec<_>>>()?;
            AllowOrigin::list(values)
        }
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(AllowHeaders::mirror_request()))
}

pub(crate) fn apply_cors(router: Router, origins: &CorsOrigins) -> Result<Router> {
    Ok(router.layer(build_cors_layer(origins)?))
}
