use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("Post not found")]
    PostNotFound { id: String },

    #[error("No posts found")]
    NoPosts,

    #[error("{0}")]
    Storage(String),
}

