use utoipa::OpenApi;

use crate::presentation::http::app_error::ErrorResponseDto;
use crate::presentation::http::handlers::posts::{
    PostCreatedResponseDto, PostDeletedResponseDto, PostDto, PostPayloadDto,
    PostUpdatedResponseDto, UpdatedPostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            PostPayloadDto,
            PostDto,
            UpdatedPostDto,
            PostCreatedResponseDto,
            PostUpdatedResponseDto,
            PostDeletedResponseDto,
            ErrorResponseDto
        )
    ),
    tags(
        (name = "posts", description = "Post endpoints")
    )
)]
pub(crate) struct ApiDoc;
