use axum::{
    Json,
    extract::{FromRequest, OptionalFromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::app_error::AppError;

/// Lenient JSON body extractor.
///
/// A request without a JSON `Content-Type`, or whose JSON body is not an
/// object, yields `T::default()`. Only a JSON body that fails to parse is
/// rejected (400).
pub(crate) struct JsonOrEmpty<T>(pub(crate) T);

impl<T, S> FromRequest<S> for JsonOrEmpty<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match <Json<Value> as OptionalFromRequest<S>>::from_request(req, state).await {
            Ok(body) => body,
            Err(JsonRejection::MissingJsonContentType(_)) => None,
            Err(rejection) => return Err(rejection.into()),
        };

        let value = match body {
            Some(Json(value @ Value::Object(_))) => value,
            _ => return Ok(Self(T::default())),
        };

        serde_json::from_value(value)
            .map(Self)
            .map_err(|err| AppError::Body {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            })
    }
}
