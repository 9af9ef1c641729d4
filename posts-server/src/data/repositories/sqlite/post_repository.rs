use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
    created_at: Option<String>,
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, author, created_at
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(map_row_to_post).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, author, created_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(map_row_to_post))
    }

    async fn insert(&self, input: NewPost) -> Result<i64, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (title, content, author, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .bind(input.author)
        .bind(input.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, patch: PostPatch) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = ?,
                content = ?,
                author = ?
            WHERE id = ?
            "#,
        )
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.author)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected())
    }
}

fn map_row_to_post(row: PostRow) -> Post {
    Post {
        id: row.id,
        title: row.title,
        content: row.content,
        author: row.author,
        created_at: row.created_at,
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => DomainError::Storage(db_err.message().to_string()),
        _ => DomainError::Storage(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::SqlitePostRepository;
    use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
    use crate::domain::error::DomainError;
    use crate::infrastructure::database::{create_pool, ensure_schema};

    async fn repo() -> SqlitePostRepository {
        let pool = create_pool("sqlite::memory:")
            .await
            .expect("in-memory pool must open");
        ensure_schema(&pool).await.expect("schema must apply");
        SqlitePostRepository::new(pool)
    }

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: Some(title.to_string()),
            content: Some("content".to_string()),
            author: Some("author".to_string()),
            created_at: "2026-01-02T03:04:05.678Z".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = repo().await;

        let first = repo.insert(new_post("a")).await.expect("insert must succeed");
        let second = repo.insert(new_post("b")).await.expect("insert must succeed");

        assert_eq!(first, 1);
        assert!(second > first);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = repo().await;

        let first = repo.insert(new_post("a")).await.expect("insert must succeed");
        repo.delete_by_id(first).await.expect("delete must succeed");
        let second = repo.insert(new_post("b")).await.expect("insert must succeed");

        assert!(second > first);
    }

    #[tokio::test]
    async fn list_all_returns_rows_in_insertion_order() {
        let repo = repo().await;
        assert!(repo.list_all().await.expect("list must succeed").is_empty());

        repo.insert(new_post("first")).await.expect("insert must succeed");
        repo.insert(new_post("second")).await.expect("insert must succeed");

        let posts = repo.list_all().await.expect("list must succeed");
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_deref()).collect();
        assert_eq!(titles, vec![Some("first"), Some("second")]);
    }

    #[tokio::test]
    async fn get_by_id_reads_back_inserted_row() {
        let repo = repo().await;
        let id = repo.insert(new_post("title")).await.expect("insert must succeed");

        let post = repo
            .get_by_id(id)
            .await
            .expect("get must succeed")
            .expect("row must exist");

        assert_eq!(post.id, id);
        assert_eq!(post.title.as_deref(), Some("title"));
        assert_eq!(post.created_at.as_deref(), Some("2026-01-02T03:04:05.678Z"));
        assert!(repo.get_by_id(id + 1).await.expect("get must succeed").is_none());
    }

    #[tokio::test]
    async fn insert_stores_missing_fields_as_null() {
        let repo = repo().await;
        let id = repo
            .insert(NewPost {
                title: None,
                content: None,
                author: None,
                created_at: "2026-01-02T03:04:05.678Z".to_string(),
            })
            .await
            .expect("insert must succeed");

        let post = repo
            .get_by_id(id)
            .await
            .expect("get must succeed")
            .expect("row must exist");
        assert_eq!(post.title, None);
        assert_eq!(post.content, None);
        assert_eq!(post.author, None);
    }

    #[tokio::test]
    async fn update_changes_fields_and_keeps_created_at() {
        let repo = repo().await;
        let id = repo.insert(new_post("old")).await.expect("insert must succeed");

        let affected = repo
            .update(
                id,
                PostPatch {
                    title: Some("new".to_string()),
                    content: Some("body".to_string()),
                    author: None,
                },
            )
            .await
            .expect("update must succeed");
        assert_eq!(affected, 1);

        let post = repo
            .get_by_id(id)
            .await
            .expect("get must succeed")
            .expect("row must exist");
        assert_eq!(post.title.as_deref(), Some("new"));
        assert_eq!(post.content.as_deref(), Some("body"));
        assert_eq!(post.author, None);
        assert_eq!(post.created_at.as_deref(), Some("2026-01-02T03:04:05.678Z"));
    }

    #[tokio::test]
    async fn mutations_on_missing_id_affect_no_rows() {
        let repo = repo().await;

        let updated = repo
            .update(
                9,
                PostPatch {
                    title: None,
                    content: None,
                    author: None,
                },
            )
            .await
            .expect("update must succeed");
        let deleted = repo.delete_by_id(9).await.expect("delete must succeed");

        assert_eq!(updated, 0);
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn storage_fault_is_reported_with_driver_message() {
        let repo = repo().await;
        sqlx::query("DROP TABLE posts")
            .execute(&repo.pool)
            .await
            .expect("drop must succeed");

        let err = repo.list_all().await.expect_err("query must fail");
        match err {
            DomainError::Storage(message) => assert!(message.contains("no such table")),
            other => panic!("expected DomainError::Storage, got {other:?}"),
        }
    }
}
