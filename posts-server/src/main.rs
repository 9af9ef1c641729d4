use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_service::PostService;
use data::repositories::sqlite::post_repository::SqlitePostRepository;
use infrastructure::database::{create_pool, ensure_schema};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    ensure_schema(&pool).await?;
    info!(database_url = %settings.database_url, "database ready");

    let post_service = Arc::new(PostService::new(SqlitePostRepository::new(pool)));
    let state = AppState::new(post_service);

    server::run_http(&settings, state).await
}
