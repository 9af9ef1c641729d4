use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostInput};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorResponseDto};
use crate::presentation::http::extract::JsonOrEmpty;

const SUCCESS: &str = "success";

/// Body accepted by create and update. Unknown fields are ignored and any
/// JSON scalar is stored as text.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct PostPayloadDto {
    #[serde(default, deserialize_with = "lenient_text")]
    pub(crate) title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub(crate) content: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub(crate) author: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) created_at: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UpdatedPostDto {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostCreatedResponseDto {
    pub(crate) status: String,
    pub(crate) data: PostDto,
    pub(crate) message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostUpdatedResponseDto {
    pub(crate) status: String,
    pub(crate) data: UpdatedPostDto,
    pub(crate) message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDeletedResponseDto {
    pub(crate) status: String,
    pub(crate) message: String,
}

impl From<PostPayloadDto> for PostInput {
    fn from(dto: PostPayloadDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            author: dto.author,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
            created_at: post.created_at,
        }
    }
}

impl From<Post> for UpdatedPostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
        }
    }
}

/// Text the `posts` column would hold for a JSON value. Booleans become 1/0
/// and composite values keep their JSON encoding.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(String::from(if flag { "1" } else { "0" })),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    })
}

/// Resolves a path segment to a row id the way an INTEGER column compares
/// against text: integer literals (`+1`, `01`) and integral reals (`1.0`,
/// `1e0`) match, surrounding whitespace is ignored, anything else matches
/// no row.
fn parse_post_id(raw: &str) -> Result<i64, DomainError> {
    let not_found = || DomainError::PostNotFound { id: raw.to_string() };
    let text = raw.trim();

    if let Ok(id) = text.parse::<i64>() {
        return Ok(id);
    }

    // Rust also accepts `inf`/`NaN`; the numeric checks below drop them.
    let real = text.parse::<f64>().map_err(|_| not_found())?;
    let integral = real.is_finite() && real.fract() == 0.0;
    if integral && real >= i64::MIN as f64 && real < i64::MAX as f64 {
        Ok(real as i64)
    } else {
        Err(not_found())
    }
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts in insertion order", body = Vec<PostDto>),
        (status = 404, description = "No posts found", body = ErrorResponseDto),
        (status = 500, description = "Storage error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<PostDto>>)> {
    let posts = state.post_service.list_posts().await?;

    info!(count = posts.len(), "posts retrieved");
    Ok((
        StatusCode::OK,
        Json(posts.into_iter().map(PostDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorResponseDto),
        (status = 500, description = "Storage error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let id = parse_post_id(&id)?;
    let post = state.post_service.get_post(id).await?;

    info!(post_id = id, "post retrieved");
    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = PostPayloadDto,
    responses(
        (status = 200, description = "Post created", body = PostCreatedResponseDto),
        (status = 400, description = "Malformed JSON body", body = ErrorResponseDto),
        (status = 500, description = "Storage error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    JsonOrEmpty(dto): JsonOrEmpty<PostPayloadDto>,
) -> AppResult<(StatusCode, Json<PostCreatedResponseDto>)> {
    let post = state.post_service.create_post(dto.into()).await?;

    info!(post_id = post.id, "post created");
    Ok((
        StatusCode::OK,
        Json(PostCreatedResponseDto {
            status: SUCCESS.to_string(),
            data: PostDto::from(post),
            message: "Post created successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = PostPayloadDto,
    responses(
        (status = 200, description = "Post updated", body = PostUpdatedResponseDto),
        (status = 400, description = "Malformed JSON body", body = ErrorResponseDto),
        (status = 404, description = "Post not found", body = ErrorResponseDto),
        (status = 500, description = "Storage error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonOrEmpty(dto): JsonOrEmpty<PostPayloadDto>,
) -> AppResult<(StatusCode, Json<PostUpdatedResponseDto>)> {
    let id = parse_post_id(&id)?;
    let post = state.post_service.update_post(id, dto.into()).await?;

    info!(post_id = id, "post updated");
    Ok((
        StatusCode::OK,
        Json(PostUpdatedResponseDto {
            status: SUCCESS.to_string(),
            data: UpdatedPostDto::from(post),
            message: "Post updated".to_string(),
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted", body = PostDeletedResponseDto),
        (status = 404, description = "Post not found", body = ErrorResponseDto),
        (status = 500, description = "Storage error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDeletedResponseDto>)> {
    let id = parse_post_id(&id)?;
    state.post_service.delete_post(id).await?;

    info!(post_id = id, "post deleted");
    Ok((
        StatusCode::OK,
        Json(PostDeletedResponseDto {
            status: SUCCESS.to_string(),
            message: "Post deleted".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{PostPayloadDto, parse_post_id};
    use crate::domain::error::DomainError;

    #[test]
    fn parse_post_id_follows_integer_column_comparison() {
        let cases = [("1", 1), ("+1", 1), ("01", 1), ("1.0", 1), ("1e0", 1), (" 7 ", 7)];
        for (raw, expected) in cases {
            assert_eq!(parse_post_id(raw).expect(raw), expected, "{raw}");
        }
    }

    #[test]
    fn parse_post_id_rejects_non_integral_values() {
        for raw in ["abc", "1.5", "inf", "NaN", "", "1e300"] {
            let err = parse_post_id(raw).expect_err(raw);
            assert!(matches!(err, DomainError::PostNotFound { .. }), "{raw}");
        }
    }

    #[test]
    fn payload_stores_scalars_as_text() {
        let dto: PostPayloadDto =
            serde_json::from_value(json!({"title": 5, "content": true, "author": null}))
                .expect("payload must deserialize");

        assert_eq!(dto.title.as_deref(), Some("5"));
        assert_eq!(dto.content.as_deref(), Some("1"));
        assert_eq!(dto.author, None);
    }

    #[test]
    fn payload_missing_fields_are_empty() {
        let dto: PostPayloadDto =
            serde_json::from_value(json!({"extra": [1, 2]})).expect("payload must deserialize");

        assert_eq!(dto.title, None);
        assert_eq!(dto.content, None);
        assert_eq!(dto.author, None);
    }
}
