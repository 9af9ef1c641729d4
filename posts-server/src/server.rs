use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::http::middleware::body_limit::apply_body_limit;
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::trace::apply_trace;
use crate::presentation::http::openapi::ApiDoc;
use crate::presentation::http::routes;

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> Result<()> {
    let app = build_router(state, settings)?;

    let listener = TcpListener::bind(&settings.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.http_addr))?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState, settings: &Settings) -> Result<Router> {
    let mut app = routes::router(&settings.index_path).with_state(state);
    if settings.api_docs {
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    let app = apply_body_limit(app, settings.http_request_body_limit_bytes);
    let app = apply_trace(app);
    apply_cors(app, &settings.cors_origins)
}
