use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostInput, timestamp_now};

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// An empty table is reported as [`DomainError::NoPosts`], not as an empty list.
    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.repo.list_all().await?;
        if posts.is_empty() {
            return Err(DomainError::NoPosts);
        }
        Ok(posts)
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub(crate) async fn create_post(&self, input: PostInput) -> Result<Post, DomainError> {
        let created_at = timestamp_now();
        let new_post = NewPost {
            title: input.title.clone(),
            content: input.content.clone(),
            author: input.author.clone(),
            created_at: created_at.clone(),
        };

        let id = self.repo.insert(new_post).await?;
        Ok(Post::from_input(id, input, Some(created_at)))
    }

    pub(crate) async fn update_post(&self, id: i64, input: PostInput) -> Result<Post, DomainError> {
        let existing = self.get_post(id).await?;

        let patch = PostPatch {
            title: input.title.clone(),
            content: input.content.clone(),
            author: input.author.clone(),
        };
        // The row may have been deleted since the existence check.
        if self.repo.update(id, patch).await? == 0 {
            return Err(not_found(id));
        }

        Ok(Post::from_input(id, input, existing.created_at))
    }

    pub(crate) async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        self.get_post(id).await?;

        if self.repo.delete_by_id(id).await? == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::PostNotFound { id: id.to_string() }
}
