use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) created_at: String,
}

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<String>,
}

/// Row-level access to the `posts` table.
///
/// Mutations report the number of affected rows so callers can tell a
/// missing id (0) from a success (1).
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Post>, DomainError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn insert(&self, input: NewPost) -> Result<i64, DomainError>;
    async fn update(&self, id: i64, patch: PostPatch) -> Result<u64, DomainError>;
    async fn delete_by_id(&self, id: i64) -> Result<u64, DomainError>;
}
