use axum::Router;
use tower_http::services::ServeFile;

use crate::presentation::AppState;

pub(crate) mod posts;

pub(crate) fn router(index_path: &str) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(index_path))
        .merge(posts::router())
}
