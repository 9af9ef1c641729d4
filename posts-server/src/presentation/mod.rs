use std::sync::Arc;

use crate::application::post_service::PostService;
use crate::data::repositories::sqlite::post_repository::SqlitePostRepository;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) post_service: Arc<PostService<SqlitePostRepository>>,
}

impl AppState {
    pub(crate) fn new(post_service: Arc<PostService<SqlitePostRepository>>) -> Self {
        Self { post_service }
    }
}
